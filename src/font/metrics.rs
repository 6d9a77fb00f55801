//! Built-in metrics for fonts that need no font data.
//!
//! Widths are in 1/1000 em, taken from the Adobe AFM files.

/// Helvetica advance widths for ASCII 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

/// Helvetica-Bold advance widths for ASCII 32..=126.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a..m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n..z
    389, 280, 389, 584, // {..~
];

/// Width used for characters outside the table.
const HELVETICA_DEFAULT: u16 = 556;

const COURIER_WIDTH: u16 = 600;

/// A built-in face. Oblique faces share the advance widths of their upright
/// face, so italic lookups map to the same variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    /// Regular and bold are both 600 units wide.
    Courier,
}

impl StandardFont {
    pub fn family(&self) -> &'static str {
        match self {
            StandardFont::Helvetica | StandardFont::HelveticaBold => "Helvetica",
            StandardFont::Courier => "Courier",
        }
    }

    /// Advance width in 1/1000 em.
    fn advance(&self, ch: char) -> u16 {
        match self {
            StandardFont::Courier => COURIER_WIDTH,
            StandardFont::Helvetica => helvetica_advance(ch, &HELVETICA_WIDTHS, 222, 333),
            StandardFont::HelveticaBold => {
                helvetica_advance(ch, &HELVETICA_BOLD_WIDTHS, 278, 500)
            }
        }
    }

    /// Advance width of a character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        self.advance(ch) as f64 / 1000.0 * font_size
    }
}

/// Table lookup plus the typographic punctuation outside ASCII. Curly
/// single and double quotes differ between weights.
fn helvetica_advance(ch: char, table: &[u16; 95], single_quote: u16, double_quote: u16) -> u16 {
    match ch {
        ' '..='~' => table[ch as usize - 32],
        // No-break and thin spaces measure like a space.
        '\u{00A0}' | '\u{2007}' | '\u{2009}' | '\u{202F}' => table[0],
        '\u{00AD}' | '\u{2010}' | '\u{2011}' => table[b'-' as usize - 32],
        '\u{2013}' => 556,
        '\u{2014}' => 1000,
        '\u{2018}' | '\u{2019}' => single_quote,
        '\u{201C}' | '\u{201D}' => double_quote,
        '\u{2026}' => 1000,
        _ => HELVETICA_DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lookup() {
        assert_eq!(StandardFont::Helvetica.advance(' '), 278);
        assert_eq!(StandardFont::Helvetica.advance('0'), 556);
        assert_eq!(StandardFont::Helvetica.advance('@'), 1015);
        assert_eq!(StandardFont::Helvetica.advance('W'), 944);
        assert_eq!(StandardFont::Helvetica.advance('i'), 222);
        assert_eq!(StandardFont::Helvetica.advance('~'), 584);
        assert_eq!(StandardFont::Helvetica.advance('é'), HELVETICA_DEFAULT);
    }

    #[test]
    fn test_bold_table_lookup() {
        let bold = StandardFont::HelveticaBold;
        assert_eq!(bold.advance(' '), 278);
        assert_eq!(bold.advance('@'), 975);
        assert_eq!(bold.advance('b'), 611);
        assert_eq!(bold.advance('m'), 889);
        assert_eq!(bold.advance('\u{201C}'), 500);
        assert!(bold.advance('n') > StandardFont::Helvetica.advance('n'));
        assert_eq!(bold.family(), "Helvetica");
    }

    #[test]
    fn test_hyphen_variants_match_hyphen() {
        let hyphen = StandardFont::Helvetica.advance('-');
        assert_eq!(hyphen, 333);
        assert_eq!(StandardFont::Helvetica.advance('\u{2010}'), hyphen);
    }
}
