//! Non-mutating edits on attributed strings: slicing a character range out,
//! and inserting a glyph. Both return new values and leave the input intact.

use super::{AttributedString, Run, Syllable};
use crate::text::{GlyphInserter, RangeSlicer};
use std::ops::Range;

/// Slices text, runs and syllables to a range, rebasing offsets to zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringSlicer;

impl RangeSlicer for SubstringSlicer {
    fn slice(&self, range: Range<usize>, string: &AttributedString) -> AttributedString {
        let len = string.char_len();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);

        let runs = string
            .runs
            .iter()
            .filter(|r| r.start < end && r.end > start)
            .map(|r| Run {
                start: r.start.max(start) - start,
                end: r.end.min(end) - start,
                attributes: r.attributes.clone(),
            })
            .collect();

        let syllables = string
            .syllables
            .iter()
            .filter(|s| s.start < end && s.end > start)
            .map(|s| Syllable {
                start: s.start.max(start) - start,
                end: s.end.min(end) - start,
                kind: s.kind,
            })
            .collect();

        AttributedString::from_parts(string.text_in(start..end).to_string(), runs, syllables)
    }
}

/// Inserts a glyph and lets it inherit the run of the character before it.
///
/// At index 0 the glyph joins the first run. Syllables follow the same rule,
/// so a hyphen inserted inside a word extends that word's syllable.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunGlyphInserter;

impl GlyphInserter for RunGlyphInserter {
    fn insert_glyph(&self, index: usize, glyph: char, string: &AttributedString) -> AttributedString {
        let index = index.min(string.char_len());
        let byte = string.byte_offset(index);

        let mut text = String::with_capacity(string.string.len() + glyph.len_utf8());
        text.push_str(&string.string[..byte]);
        text.push(glyph);
        text.push_str(&string.string[byte..]);

        let runs = string
            .runs
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let (start, end) = shift_span(r.start, r.end, index, i == 0);
                Run {
                    start,
                    end,
                    attributes: r.attributes.clone(),
                }
            })
            .collect();

        let syllables = string
            .syllables
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let (start, end) = shift_span(s.start, s.end, index, i == 0);
                Syllable {
                    start,
                    end,
                    kind: s.kind,
                }
            })
            .collect();

        AttributedString::from_parts(text, runs, syllables)
    }
}

/// Move a span to account for one character inserted at `index`.
///
/// The span that owns the character before `index` grows by one; spans
/// after it shift right. The first span absorbs an insertion at zero.
fn shift_span(start: usize, end: usize, index: usize, first: bool) -> (usize, usize) {
    if index == 0 {
        if first {
            (0, end + 1)
        } else {
            (start + 1, end + 1)
        }
    } else if start < index && index <= end {
        (start, end + 1)
    } else if start >= index {
        (start + 1, end + 1)
    } else {
        (start, end)
    }
}
