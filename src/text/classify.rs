//! # Syllable Classification
//!
//! Segments raw text into words, glue and punctuation using UAX#14 break
//! opportunities, and exposes Knuth-Liang hyphenation points inside words.

use super::SyllableClassifier;
use crate::model::{Syllable, SyllableKind};
use unicode_linebreak::linebreaks;

/// Default classifier backed by `unicode-linebreak` and `hypher`.
#[derive(Debug, Clone, Copy)]
pub struct TextClassifier {
    lang: Option<hypher::Lang>,
}

impl Default for TextClassifier {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TextClassifier {
    /// Create a classifier for a BCP 47 language tag. English when `None`;
    /// unsupported languages get no hyphenation points.
    pub fn new(lang: Option<&str>) -> Self {
        Self {
            lang: resolve_hypher_lang(lang),
        }
    }

    pub fn hyphenates(&self) -> bool {
        self.lang.is_some()
    }
}

impl SyllableClassifier for TextClassifier {
    fn classify(&self, text: &str) -> Vec<Syllable> {
        let chars: Vec<char> = text.chars().collect();
        let mut syllables = Vec::new();
        let mut seg_start = 0;

        for seg_end in segment_ends(text) {
            classify_segment(&chars, seg_start, seg_end, &mut syllables);
            seg_start = seg_end;
        }
        if seg_start < chars.len() {
            classify_segment(&chars, seg_start, chars.len(), &mut syllables);
        }

        syllables
    }

    fn hyphenation_points(&self, word: &str) -> Vec<usize> {
        let Some(lang) = self.lang else {
            return Vec::new();
        };

        // Hyphenate the alphabetic core only; leading quotes or brackets
        // would otherwise confuse the patterns.
        let lead = word.chars().take_while(|c| !c.is_alphabetic()).count();
        let core: String = word
            .chars()
            .skip(lead)
            .take_while(|c| c.is_alphabetic())
            .collect();
        if core.is_empty() {
            return Vec::new();
        }

        let parts: Vec<&str> = hypher::hyphenate(&core, lang).collect();
        let mut points = Vec::with_capacity(parts.len().saturating_sub(1));
        let mut offset = lead;
        for part in &parts[..parts.len().saturating_sub(1)] {
            offset += part.chars().count();
            points.push(offset);
        }
        points
    }
}

/// Character offsets where UAX#14 allows (or forces) a break, in order.
fn segment_ends(text: &str) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut char_idx = 0;
    let mut byte_iter = text.char_indices().peekable();

    for (byte_offset, _opp) in linebreaks(text) {
        while let Some(&(b, _)) = byte_iter.peek() {
            if b >= byte_offset {
                break;
            }
            byte_iter.next();
            char_idx += 1;
        }
        if char_idx > 0 {
            ends.push(char_idx);
        }
    }

    ends
}

/// Split one unbreakable segment into word, trailing punctuation and glue.
///
/// Leading punctuation stays inside the word so "(hello" is never broken
/// after the bracket.
fn classify_segment(chars: &[char], start: usize, end: usize, out: &mut Vec<Syllable>) {
    if start >= end {
        return;
    }

    let mut glue_start = end;
    while glue_start > start && is_glue(chars[glue_start - 1]) {
        glue_start -= 1;
    }

    let mut punct_start = glue_start;
    while punct_start > start && is_punctuation(chars[punct_start - 1]) {
        punct_start -= 1;
    }

    if punct_start > start {
        out.push(Syllable::new(start, punct_start, SyllableKind::Word));
    }
    if glue_start > punct_start {
        out.push(Syllable::new(punct_start, glue_start, SyllableKind::Punctuation));
    }
    if end > glue_start {
        out.push(Syllable::new(glue_start, end, SyllableKind::Glue));
    }
}

fn is_glue(ch: char) -> bool {
    ch.is_whitespace() && !matches!(ch, '\u{00A0}' | '\u{2007}' | '\u{202F}')
}

fn is_punctuation(ch: char) -> bool {
    !ch.is_alphanumeric() && !ch.is_whitespace()
}

/// Map a BCP 47 language tag to a `hypher::Lang`.
fn resolve_hypher_lang(lang: Option<&str>) -> Option<hypher::Lang> {
    let Some(tag) = lang else {
        return Some(hypher::Lang::English);
    };
    let primary = tag.split(|c: char| c == '-' || c == '_').next().unwrap_or(tag).to_lowercase();
    let lang = match primary.as_str() {
        "af" => hypher::Lang::Afrikaans,
        "sq" => hypher::Lang::Albanian,
        "be" => hypher::Lang::Belarusian,
        "bg" => hypher::Lang::Bulgarian,
        "ca" => hypher::Lang::Catalan,
        "hr" => hypher::Lang::Croatian,
        "cs" => hypher::Lang::Czech,
        "da" => hypher::Lang::Danish,
        "nl" => hypher::Lang::Dutch,
        "en" => hypher::Lang::English,
        "et" => hypher::Lang::Estonian,
        "fi" => hypher::Lang::Finnish,
        "fr" => hypher::Lang::French,
        "ka" => hypher::Lang::Georgian,
        "de" => hypher::Lang::German,
        "el" => hypher::Lang::Greek,
        "hu" => hypher::Lang::Hungarian,
        "is" => hypher::Lang::Icelandic,
        "it" => hypher::Lang::Italian,
        "ku" => hypher::Lang::Kurmanji,
        "la" => hypher::Lang::Latin,
        "lt" => hypher::Lang::Lithuanian,
        "mn" => hypher::Lang::Mongolian,
        "nb" | "nn" | "no" => hypher::Lang::Norwegian,
        "pl" => hypher::Lang::Polish,
        "pt" => hypher::Lang::Portuguese,
        "ru" => hypher::Lang::Russian,
        "sr" => hypher::Lang::Serbian,
        "sk" => hypher::Lang::Slovak,
        "sl" => hypher::Lang::Slovenian,
        "es" => hypher::Lang::Spanish,
        "sv" => hypher::Lang::Swedish,
        "tr" => hypher::Lang::Turkish,
        "tk" => hypher::Lang::Turkmen,
        "uk" => hypher::Lang::Ukrainian,
        _ => return None,
    };
    Some(lang)
}

#[cfg(test)]
mod tests {
    use super::*;
    use SyllableKind::*;

    fn kinds(text: &str) -> Vec<(String, SyllableKind)> {
        let chars: Vec<char> = text.chars().collect();
        TextClassifier::default()
            .classify(text)
            .into_iter()
            .map(|s| (chars[s.start..s.end].iter().collect(), s.kind))
            .collect()
    }

    #[test]
    fn test_classify_comma_case() {
        assert_eq!(
            kinds("Prefix Hello, World"),
            vec![
                ("Prefix".to_string(), Word),
                (" ".to_string(), Glue),
                ("Hello".to_string(), Word),
                (",".to_string(), Punctuation),
                (" ".to_string(), Glue),
                ("World".to_string(), Word),
            ]
        );
    }

    #[test]
    fn test_classify_covers_text() {
        let text = "Hello,  “quoted” text... and more!";
        let syls = TextClassifier::default().classify(text);
        assert!(crate::model::validate_syllables(&syls, text.chars().count()).is_ok());
    }

    #[test]
    fn test_apostrophe_stays_in_word() {
        let k = kinds("don't stop");
        assert_eq!(k[0], ("don't".to_string(), Word));
    }

    #[test]
    fn test_leading_bracket_joins_word() {
        let k = kinds("(see above)");
        assert_eq!(k[0], ("(see".to_string(), Word));
        assert_eq!(k[2], ("above".to_string(), Word));
        assert_eq!(k[3], (")".to_string(), Punctuation));
    }

    #[test]
    fn test_hyphen_compound_breaks_after_hyphen() {
        let k = kinds("well-known");
        assert_eq!(
            k,
            vec![
                ("well".to_string(), Word),
                ("-".to_string(), Punctuation),
                ("known".to_string(), Word),
            ]
        );
    }

    #[test]
    fn test_no_break_space_is_not_glue() {
        let k = kinds("10\u{00A0}kg");
        assert!(k.iter().all(|(_, kind)| *kind != Glue), "got {k:?}");
    }

    #[test]
    fn test_cjk_each_ideograph_is_a_word() {
        let k = kinds("中文字");
        assert_eq!(k.len(), 3);
        assert!(k.iter().all(|(_, kind)| *kind == Word));
    }

    #[test]
    fn test_empty_text() {
        assert!(TextClassifier::default().classify("").is_empty());
    }

    #[test]
    fn test_hyphenation_points_english() {
        let points = TextClassifier::default().hyphenation_points("extraordinary");
        assert!(!points.is_empty());
        assert!(points.iter().all(|&p| p > 0 && p < 13));
        assert!(points.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_hyphenation_points_skip_leading_punctuation() {
        let plain = TextClassifier::default().hyphenation_points("extraordinary");
        let quoted = TextClassifier::default().hyphenation_points("“extraordinary");
        let shifted: Vec<usize> = plain.iter().map(|p| p + 1).collect();
        assert_eq!(quoted, shifted);
    }

    #[test]
    fn test_unsupported_lang_has_no_points() {
        let c = TextClassifier::new(Some("xx-YY"));
        assert!(!c.hyphenates());
        assert!(c.hyphenation_points("extraordinary").is_empty());
    }

    #[test]
    fn test_resolve_hypher_lang_mapping() {
        assert!(matches!(
            resolve_hypher_lang(Some("de-DE")),
            Some(hypher::Lang::German)
        ));
        assert!(matches!(
            resolve_hypher_lang(Some("pt_BR")),
            Some(hypher::Lang::Portuguese)
        ));
        assert!(matches!(resolve_hypher_lang(None), Some(hypher::Lang::English)));
        assert!(resolve_hypher_lang(Some("ja")).is_none());
    }
}
