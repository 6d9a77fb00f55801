//! # Textkit
//!
//! A line-breaking engine for attributed text.
//!
//! Given styled text and a list of per-line width budgets, textkit partitions
//! the text into lines that fit. Breaks happen only between clusters, so
//! trailing punctuation always stays with the word it follows. A word too
//! wide for any line is hyphenated when possible and otherwise placed alone,
//! never dropped.
//!
//! ## Architecture
//!
//! ```text
//! Input (text + runs + budgets)
//!       ↓
//!   [text::classify] — UAX#14 segmentation into word / glue / punctuation
//!       ↓
//!   [text::cluster]  — bind punctuation to the word before it
//!       ↓
//!   [text]           — greedy packing against the budgets
//!       ↓
//!   Lines (ranges, widths, sliced views)
//! ```
//!
//! Width measurement, slicing and glyph insertion are capabilities the
//! engine borrows ([`text::WidthMeasurer`], [`text::RangeSlicer`],
//! [`text::GlyphInserter`]). The defaults live in [`font`] and [`model`].

pub mod error;
pub mod font;
pub mod job;
pub mod model;
pub mod text;

pub use error::TextkitError;
pub use text::{Line, LineBreakConfig, LineBreaker};

use error::Result;
use font::{FontContext, FontMeasurer};
use model::{AttributedString, Attributes, RunGlyphInserter, SubstringSlicer};
use text::{SyllableClassifier, TextClassifier};

/// Break plain text in one set of attributes using the built-in fonts.
pub fn break_text(
    text: &str,
    attributes: Attributes,
    budgets: &[f64],
    config: LineBreakConfig,
    lang: Option<&str>,
) -> Result<Vec<Line>> {
    let fonts = FontContext::new();
    let string = AttributedString::new(text, attributes);
    break_attributed(&fonts, string, budgets, config, lang)
}

/// Classify, then break, an attributed string with the default collaborators.
///
/// Any syllables already on `string` are replaced by the classifier's.
pub fn break_attributed(
    fonts: &FontContext,
    string: AttributedString,
    budgets: &[f64],
    config: LineBreakConfig,
    lang: Option<&str>,
) -> Result<Vec<Line>> {
    let classifier = TextClassifier::new(lang);
    let syllables = classifier.classify(&string.string);
    let string = string.with_syllables(syllables);

    let measurer = FontMeasurer::new(fonts);
    let breaker = LineBreaker::new(&measurer, &SubstringSlicer, &RunGlyphInserter)
        .with_hyphenator(&classifier)
        .with_config(config);
    breaker.break_attributed(&string, budgets)
}
