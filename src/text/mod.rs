//! # Line Breaking
//!
//! Greedy packing of clusters into lines against a list of width budgets.
//!
//! The engine owns every break decision but no font logic: widths come from a
//! [`WidthMeasurer`], line views from a [`RangeSlicer`], forced hyphens from a
//! [`GlyphInserter`], and intra-word break points from an optional
//! [`SyllableClassifier`]. Each call is a pure function of its inputs.

pub mod classify;
pub mod cluster;

use crate::error::{Result, TextkitError};
use crate::model::{validate_syllables, AttributedString, Syllable};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::ops::Range;

pub use classify::TextClassifier;
pub use cluster::{build_clusters, Cluster, ClusterKind};

/// Rendered advance width of a character range.
///
/// Implementations must be deterministic, non-negative, and non-decreasing
/// as the range grows.
pub trait WidthMeasurer {
    fn measure_width(&self, range: Range<usize>, string: &AttributedString) -> f64;
}

/// A self-contained view of a character range.
pub trait RangeSlicer {
    fn slice(&self, range: Range<usize>, string: &AttributedString) -> AttributedString;
}

/// Returns a copy of `string` with `glyph` inserted at a character index.
pub trait GlyphInserter {
    fn insert_glyph(&self, index: usize, glyph: char, string: &AttributedString)
        -> AttributedString;
}

/// Segments raw text into classified syllables.
pub trait SyllableClassifier {
    fn classify(&self, text: &str) -> Vec<Syllable>;

    /// Character offsets inside `word` where a hyphen may be inserted.
    fn hyphenation_points(&self, _word: &str) -> Vec<usize> {
        Vec::new()
    }
}

/// Tunables for [`LineBreaker`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineBreakConfig {
    /// Split oversized words at hyphenation points.
    pub hyphenation_enabled: bool,
    /// Leave trailing glue out of a line's measured width.
    pub trim_trailing_glue_width: bool,
    /// Glyph inserted at a forced hyphenation break.
    pub hyphen: char,
}

impl Default for LineBreakConfig {
    fn default() -> Self {
        Self {
            hyphenation_enabled: true,
            trim_trailing_glue_width: true,
            hyphen: '-',
        }
    }
}

/// One line of output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// First character of the line in the original string.
    pub start: usize,
    /// End of the line in the original string, trailing glue included.
    pub end: usize,
    /// End of the width-counted content.
    pub content_end: usize,
    /// Measured width of `start..content_end` (plus the hyphen, if any).
    pub width: f64,
    /// The budget this line was packed against.
    pub budget: f64,
    /// The line ends in an inserted hyphen, which `string` carries.
    pub hyphenated: bool,
    /// A single cluster wider than the budget was placed here.
    pub overflow: bool,
    pub string: AttributedString,
}

impl Line {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn content_range(&self) -> Range<usize> {
        self.start..self.content_end
    }

    pub fn text(&self) -> &str {
        &self.string.string
    }
}

/// Cursor over the width budgets. Past the end it keeps returning the last
/// budget.
#[derive(Debug, Clone)]
pub struct BudgetCursor<'a> {
    budgets: &'a [f64],
    line: usize,
}

impl<'a> BudgetCursor<'a> {
    pub fn new(budgets: &'a [f64]) -> Result<Self> {
        if budgets.is_empty() {
            return Err(TextkitError::InvalidInput(
                "no width budgets supplied".to_string(),
            ));
        }
        if let Some((i, b)) = budgets
            .iter()
            .enumerate()
            .find(|(_, b)| !b.is_finite() || **b <= 0.0)
        {
            return Err(TextkitError::InvalidInput(format!(
                "width budget {} is {}, expected a positive number",
                i, b
            )));
        }
        Ok(Self { budgets, line: 0 })
    }

    pub fn current(&self) -> f64 {
        self.budgets[self.line.min(self.budgets.len() - 1)]
    }

    pub fn advance(&mut self) {
        self.line += 1;
    }

    /// Zero-based index of the line being packed.
    pub fn line(&self) -> usize {
        self.line
    }
}

/// The line being packed.
#[derive(Debug, Clone, Copy)]
struct OpenLine {
    start: usize,
    end: usize,
    content_end: usize,
    width: f64,
    has_content: bool,
    overflow: bool,
}

impl OpenLine {
    fn at(start: usize) -> Self {
        Self {
            start,
            end: start,
            content_end: start,
            width: 0.0,
            has_content: false,
            overflow: false,
        }
    }

    fn accept(&mut self, end: usize, width: f64) {
        self.end = end;
        self.content_end = end;
        self.width = width;
        self.has_content = true;
    }
}

pub struct LineBreaker<'a> {
    measurer: &'a dyn WidthMeasurer,
    slicer: &'a dyn RangeSlicer,
    inserter: &'a dyn GlyphInserter,
    hyphenator: Option<&'a dyn SyllableClassifier>,
    config: LineBreakConfig,
}

impl<'a> LineBreaker<'a> {
    pub fn new(
        measurer: &'a dyn WidthMeasurer,
        slicer: &'a dyn RangeSlicer,
        inserter: &'a dyn GlyphInserter,
    ) -> Self {
        Self {
            measurer,
            slicer,
            inserter,
            hyphenator: None,
            config: LineBreakConfig::default(),
        }
    }

    /// Use `classifier` to find hyphenation points in oversized words.
    pub fn with_hyphenator(mut self, classifier: &'a dyn SyllableClassifier) -> Self {
        self.hyphenator = Some(classifier);
        self
    }

    pub fn with_config(mut self, config: LineBreakConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &LineBreakConfig {
        &self.config
    }

    /// Break a string using the syllables it carries.
    pub fn break_attributed(
        &self,
        string: &AttributedString,
        budgets: &[f64],
    ) -> Result<Vec<Line>> {
        self.break_lines(string, &string.syllables, budgets)
    }

    /// Partition `string` into lines, one budget per line.
    ///
    /// Every character lands in exactly one line. A cluster that cannot fit
    /// even on an empty line is hyphenated if possible, otherwise emitted
    /// alone and flagged as overflow.
    pub fn break_lines(
        &self,
        string: &AttributedString,
        syllables: &[Syllable],
        budgets: &[f64],
    ) -> Result<Vec<Line>> {
        let mut cursor = BudgetCursor::new(budgets)?;
        validate_syllables(syllables, string.char_len())?;
        string.validate_runs()?;

        let mut pending: VecDeque<Cluster> = build_clusters(syllables).into();
        let mut lines = Vec::new();
        let mut line = OpenLine::at(0);
        // Hyphenation points of the word last split, keyed by its word end.
        let mut word_points: Option<(usize, Vec<usize>)> = None;

        while let Some(cluster) = pending.pop_front() {
            let budget = cursor.current();

            // Glue always stays on the line it follows, so no line after
            // the first ever starts with it.
            if cluster.is_glue() {
                self.place_glue(string, &mut line, cluster, budget)?;
                continue;
            }

            // Re-measure the whole prospective line; widths are not additive
            // across kerning and run boundaries.
            let width = self.measure(string, line.start..cluster.end)?;
            if width <= budget {
                log::trace!(
                    "line {}: cluster {}..{} fits ({:.2} <= {:.2})",
                    cursor.line(),
                    cluster.start,
                    cluster.end,
                    width,
                    budget
                );
                line.accept(cluster.end, width);
                continue;
            }

            // A line holding only leading glue closes too, as long as the
            // cluster fits on a line by itself.
            let glue_only = !line.has_content && line.end > line.start;
            if line.has_content || (glue_only && self.measure(string, cluster.range())? <= budget)
            {
                if glue_only {
                    log::trace!(
                        "line {}: closing glue-only line {}..{} before cluster {}..{}",
                        cursor.line(),
                        line.start,
                        line.end,
                        cluster.start,
                        cluster.end
                    );
                }
                lines.push(self.emit(string, &line, budget));
                cursor.advance();
                line = OpenLine::at(cluster.start);
                pending.push_front(cluster);
                continue;
            }

            let points = self.word_breaks(string, cluster, &mut word_points);
            if let Some((hyphenated, rest)) =
                self.split_with_hyphen(string, line.start, cluster, budget, &points)?
            {
                lines.push(hyphenated);
                cursor.advance();
                line = OpenLine::at(rest.start);
                pending.push_front(rest);
                continue;
            }

            log::debug!(
                "line {}: cluster {}..{} is {:.2} wide, over budget {:.2}; placing alone",
                cursor.line(),
                cluster.start,
                cluster.end,
                width,
                budget
            );
            line.accept(cluster.end, width);
            line.overflow = true;
        }

        if line.end > line.start {
            lines.push(self.emit(string, &line, cursor.current()));
        }

        Ok(lines)
    }

    /// Attach glue to the open line. Only counted toward width when trailing
    /// glue is not trimmed and it still fits.
    fn place_glue(
        &self,
        string: &AttributedString,
        line: &mut OpenLine,
        cluster: Cluster,
        budget: f64,
    ) -> Result<()> {
        line.end = cluster.end;
        if self.config.trim_trailing_glue_width {
            return Ok(());
        }
        let width = self.measure(string, line.start..cluster.end)?;
        if width <= budget {
            line.content_end = cluster.end;
            line.width = width;
        }
        Ok(())
    }

    /// Absolute hyphenation offsets inside the word part of `cluster`.
    ///
    /// Points are found once per whole word. The remainder of a split word
    /// reuses them instead of hyphenating the fragment on its own.
    fn word_breaks(
        &self,
        string: &AttributedString,
        cluster: Cluster,
        cache: &mut Option<(usize, Vec<usize>)>,
    ) -> Vec<usize> {
        if !self.config.hyphenation_enabled || cluster.kind != ClusterKind::Word {
            return Vec::new();
        }
        let Some(hyphenator) = self.hyphenator else {
            return Vec::new();
        };

        if !matches!(cache, Some((word_end, _)) if *word_end == cluster.word_end) {
            let mut points: Vec<usize> = hyphenator
                .hyphenation_points(string.text_in(cluster.word_range()))
                .into_iter()
                .map(|offset| cluster.start + offset)
                .collect();
            points.sort_unstable();
            points.dedup();
            *cache = Some((cluster.word_end, points));
        }
        cache
            .as_ref()
            .map(|(_, points)| {
                points
                    .iter()
                    .copied()
                    .filter(|&at| at > cluster.start && at < cluster.word_end)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Split an oversized word cluster at the rightmost of `points` whose
    /// hyphenated prefix fits. Returns the finished line and the remainder
    /// of the cluster.
    fn split_with_hyphen(
        &self,
        string: &AttributedString,
        line_start: usize,
        cluster: Cluster,
        budget: f64,
        points: &[usize],
    ) -> Result<Option<(Line, Cluster)>> {
        for &at in points.iter().rev() {
            let with_hyphen = self.inserter.insert_glyph(at, self.config.hyphen, string);
            let width = self.measure(&with_hyphen, line_start..at + 1)?;
            if width > budget {
                continue;
            }

            log::debug!(
                "hyphenating cluster {}..{} at {} ({:.2} <= {:.2})",
                cluster.start,
                cluster.end,
                at,
                width,
                budget
            );
            let line = Line {
                start: line_start,
                end: at,
                content_end: at,
                width,
                budget,
                hyphenated: true,
                overflow: false,
                string: self.slicer.slice(line_start..at + 1, &with_hyphen),
            };
            let rest = Cluster {
                start: at,
                ..cluster
            };
            return Ok(Some((line, rest)));
        }

        Ok(None)
    }

    fn emit(&self, string: &AttributedString, line: &OpenLine, budget: f64) -> Line {
        log::debug!(
            "emit line {}..{} width {:.2} / {:.2}{}",
            line.start,
            line.end,
            line.width,
            budget,
            if line.overflow { " (overflow)" } else { "" }
        );
        Line {
            start: line.start,
            end: line.end,
            content_end: line.content_end,
            width: line.width,
            budget,
            hyphenated: false,
            overflow: line.overflow,
            string: self.slicer.slice(line.start..line.end, string),
        }
    }

    fn measure(&self, string: &AttributedString, range: Range<usize>) -> Result<f64> {
        let (start, end) = (range.start, range.end);
        let width = self.measurer.measure_width(range, string);
        if !width.is_finite() || width < 0.0 {
            return Err(TextkitError::MeasurementError { start, end, width });
        }
        Ok(width)
    }
}
