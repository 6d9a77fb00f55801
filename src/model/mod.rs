//! # Attributed Strings
//!
//! The input representation for the line breaker. An attributed string is
//! plain text plus formatting runs, and optionally the syllables a
//! classifier produced for it.
//!
//! All offsets are **character** indices (Unicode scalar values), never
//! byte offsets. Ranges are half-open.

pub mod edit;

use crate::error::{Result, TextkitError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

pub use edit::{RunGlyphInserter, SubstringSlicer};

/// Text plus formatting runs and classified syllables.
///
/// Character offsets are resolved through an index built on first use, so
/// `string` must not be edited in place afterwards; build a new value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributedString {
    pub string: String,
    #[serde(default)]
    pub runs: Vec<Run>,
    #[serde(default)]
    pub syllables: Vec<Syllable>,
    #[serde(skip)]
    char_index: CharIndex,
}

/// Byte offset of every character, built once per string.
#[derive(Clone, Default)]
struct CharIndex(OnceLock<Vec<usize>>);

impl CharIndex {
    fn offsets(&self, text: &str) -> &[usize] {
        self.0
            .get_or_init(|| text.char_indices().map(|(b, _)| b).collect())
    }
}

// A cache, not part of the value.
impl PartialEq for CharIndex {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl fmt::Debug for CharIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CharIndex")
    }
}

/// A contiguous character range sharing one set of attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub attributes: Attributes,
}

/// Formatting attributes that affect measured width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attributes {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: u32,
    pub font_style: FontStyle,
    /// Extra advance added after every character, in points.
    pub letter_spacing: f64,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            font_family: "Helvetica".to_string(),
            font_size: 12.0,
            font_weight: 400,
            font_style: FontStyle::Normal,
            letter_spacing: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::Oblique)
    }
}

/// An indivisible breakable unit of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Syllable {
    pub start: usize,
    pub end: usize,
    pub kind: SyllableKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyllableKind {
    /// A word or word fragment.
    Word,
    /// Inter-word space. Trimmable at line edges.
    Glue,
    /// Punctuation that binds to the word before it.
    Punctuation,
}

impl Syllable {
    pub fn new(start: usize, end: usize, kind: SyllableKind) -> Self {
        Self { start, end, kind }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl AttributedString {
    /// Create a string with one run covering all of `text`.
    pub fn new(text: impl Into<String>, attributes: Attributes) -> Self {
        let string = text.into();
        let len = string.chars().count();
        let runs = if len == 0 {
            Vec::new()
        } else {
            vec![Run {
                start: 0,
                end: len,
                attributes,
            }]
        };
        Self::from_parts(string, runs, Vec::new())
    }

    /// Create a string from explicit runs, checking that they tile the text.
    pub fn from_runs(text: impl Into<String>, runs: Vec<Run>) -> Result<Self> {
        let s = Self::from_parts(text.into(), runs, Vec::new());
        s.validate_runs()?;
        Ok(s)
    }

    pub(crate) fn from_parts(string: String, runs: Vec<Run>, syllables: Vec<Syllable>) -> Self {
        Self {
            string,
            runs,
            syllables,
            char_index: CharIndex::default(),
        }
    }

    pub fn with_syllables(mut self, syllables: Vec<Syllable>) -> Self {
        self.syllables = syllables;
        self
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.char_index.offsets(&self.string).len()
    }

    pub fn is_empty(&self) -> bool {
        self.string.is_empty()
    }

    /// The text covered by a character range. Out-of-range ends are clamped.
    pub fn text_in(&self, range: Range<usize>) -> &str {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end.max(range.start));
        &self.string[start..end]
    }

    /// Byte offset of a character index, clamped to the end of the string.
    pub fn byte_offset(&self, char_index: usize) -> usize {
        self.char_index
            .offsets(&self.string)
            .get(char_index)
            .copied()
            .unwrap_or(self.string.len())
    }

    /// The run covering a character index.
    pub fn run_at(&self, index: usize) -> Option<&Run> {
        self.runs.iter().find(|r| r.start <= index && index < r.end)
    }

    /// Runs must be non-empty, contiguous, in order, and cover the string.
    pub fn validate_runs(&self) -> Result<()> {
        let len = self.char_len();
        if len == 0 {
            return Ok(());
        }
        let mut expected = 0;
        for run in &self.runs {
            if run.start != expected || run.end <= run.start {
                return Err(TextkitError::InvalidInput(format!(
                    "run {}..{} does not continue at offset {}",
                    run.start, run.end, expected
                )));
            }
            expected = run.end;
        }
        if expected != len {
            return Err(TextkitError::InvalidInput(format!(
                "runs cover {} characters but string has {}",
                expected, len
            )));
        }
        Ok(())
    }
}

/// Check that syllables tile `0..len` in order with no gaps or overlaps.
pub fn validate_syllables(syllables: &[Syllable], len: usize) -> Result<()> {
    let mut expected = 0;
    for syl in syllables {
        if syl.start != expected {
            return Err(TextkitError::InvalidInput(format!(
                "syllable {}..{} leaves a gap or overlap at offset {}",
                syl.start, syl.end, expected
            )));
        }
        if syl.is_empty() {
            return Err(TextkitError::InvalidInput(format!(
                "empty syllable at offset {}",
                syl.start
            )));
        }
        expected = syl.end;
    }
    if expected != len {
        return Err(TextkitError::InvalidInput(format!(
            "syllables span {} characters but string has {}",
            expected, len
        )));
    }
    Ok(())
}
