//! # Font Metrics
//!
//! Advance widths for measuring attributed text.
//!
//! Two standard families (Helvetica, Courier) are built in and need no font
//! data. Custom TrueType/OpenType fonts are parsed with ttf-parser. Anything
//! unresolved falls back to Helvetica.

pub mod metrics;

use crate::error::{Result, TextkitError};
use crate::model::{AttributedString, Attributes};
use crate::text::WidthMeasurer;
use std::collections::HashMap;
use std::ops::Range;

pub use metrics::StandardFont;

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct FontKey {
    pub family: String,
    pub weight: u32,
    pub italic: bool,
}

#[derive(Debug, Clone)]
pub enum FontData {
    /// A built-in family with fixed metrics.
    Standard(StandardFont),
    /// Metrics parsed from TrueType/OpenType data.
    Custom(CustomFontMetrics),
}

/// Parsed metrics from a TrueType/OpenType font via ttf-parser.
#[derive(Debug, Clone)]
pub struct CustomFontMetrics {
    pub units_per_em: u16,
    pub advance_widths: HashMap<char, u16>,
    pub default_advance: u16,
}

impl CustomFontMetrics {
    /// Advance width of a character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let w = self
            .advance_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance);
        (w as f64 / self.units_per_em as f64) * font_size
    }

    /// Parse metrics from font data.
    pub fn from_font_data(data: &[u8]) -> Result<Self> {
        let face = ttf_parser::Face::parse(data, 0)
            .map_err(|e| TextkitError::FontError(format!("failed to parse font: {}", e)))?;
        let units_per_em = face.units_per_em();

        let mut advance_widths = HashMap::new();
        let mut default_advance = 0u16;

        // Only the BMP; anything else uses the default advance.
        for code in 32u32..=0xFFFF {
            let Some(ch) = char::from_u32(code) else {
                continue;
            };
            if let Some(glyph_id) = face.glyph_index(ch) {
                let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0);
                advance_widths.insert(ch, advance);
                if ch == ' ' {
                    default_advance = advance;
                }
            }
        }

        if default_advance == 0 {
            default_advance = units_per_em / 2;
        }

        Ok(CustomFontMetrics {
            units_per_em,
            advance_widths,
            default_advance,
        })
    }
}

/// Maps family + weight + style to font data.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    fonts: HashMap<FontKey, FontData>,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    pub fn new() -> Self {
        let mut fonts = HashMap::new();
        let builtins = [
            (StandardFont::Helvetica, 400),
            (StandardFont::HelveticaBold, 700),
            (StandardFont::Courier, 400),
            (StandardFont::Courier, 700),
        ];
        for (font, weight) in builtins {
            for italic in [false, true] {
                fonts.insert(
                    FontKey {
                        family: font.family().to_string(),
                        weight,
                        italic,
                    },
                    FontData::Standard(font),
                );
            }
        }
        Self { fonts }
    }

    /// Look up a font. Tries the exact key, then the weight snapped to 400 or
    /// 700, then Helvetica.
    pub fn resolve(&self, family: &str, weight: u32, italic: bool) -> &FontData {
        static FALLBACK: FontData = FontData::Standard(StandardFont::Helvetica);

        let snapped = if weight >= 600 { 700 } else { 400 };
        [(family, weight), (family, snapped), ("Helvetica", snapped)]
            .into_iter()
            .find_map(|(family, weight)| {
                self.fonts.get(&FontKey {
                    family: family.to_string(),
                    weight,
                    italic,
                })
            })
            .unwrap_or(&FALLBACK)
    }

    /// Register a custom font from TrueType/OpenType bytes.
    pub fn register(&mut self, family: &str, weight: u32, italic: bool, data: &[u8]) -> Result<()> {
        let metrics = CustomFontMetrics::from_font_data(data)?;
        log::debug!(
            "registered font {} {}{} ({} glyphs)",
            family,
            weight,
            if italic { " italic" } else { "" },
            metrics.advance_widths.len()
        );
        self.fonts.insert(
            FontKey {
                family: family.to_string(),
                weight,
                italic,
            },
            FontData::Custom(metrics),
        );
        Ok(())
    }

    /// Register a font from base64 data or a `data:` URI.
    pub fn register_base64(&mut self, family: &str, weight: u32, italic: bool, src: &str) -> Result<()> {
        let data = decode_font_source(src)?;
        self.register(family, weight, italic, &data)
    }
}

fn decode_font_source(src: &str) -> Result<Vec<u8>> {
    use base64::Engine;

    let b64 = if src.starts_with("data:") {
        let comma = src
            .find(',')
            .ok_or_else(|| TextkitError::FontError("invalid data URI: missing comma".to_string()))?;
        &src[comma + 1..]
    } else {
        src
    };
    base64::engine::general_purpose::STANDARD
        .decode(b64.trim())
        .map_err(|e| TextkitError::FontError(format!("base64 decode error: {}", e)))
}

/// Font registry plus measurement helpers.
#[derive(Debug, Clone, Default)]
pub struct FontContext {
    registry: FontRegistry,
}

impl FontContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance width of a single character in points.
    pub fn char_width(&self, ch: char, family: &str, weight: u32, italic: bool, font_size: f64) -> f64 {
        match self.registry.resolve(family, weight, italic) {
            FontData::Standard(font) => font.char_width(ch, font_size),
            FontData::Custom(m) => m.char_width(ch, font_size),
        }
    }

    /// Width of a string in one set of attributes.
    pub fn measure_string(&self, text: &str, attributes: &Attributes) -> f64 {
        let italic = attributes.font_style.is_italic();
        text.chars()
            .map(|ch| {
                self.char_width(
                    ch,
                    &attributes.font_family,
                    attributes.font_weight,
                    italic,
                    attributes.font_size,
                ) + attributes.letter_spacing
            })
            .sum()
    }

    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FontRegistry {
        &mut self.registry
    }
}

/// [`WidthMeasurer`] backed by a [`FontContext`].
///
/// Each character is measured in the attributes of the run covering it.
/// Characters outside every run use the default attributes.
pub struct FontMeasurer<'a> {
    fonts: &'a FontContext,
    fallback: Attributes,
}

impl<'a> FontMeasurer<'a> {
    pub fn new(fonts: &'a FontContext) -> Self {
        Self {
            fonts,
            fallback: Attributes::default(),
        }
    }
}

impl WidthMeasurer for FontMeasurer<'_> {
    fn measure_width(&self, range: Range<usize>, string: &AttributedString) -> f64 {
        let mut runs = string
            .runs
            .iter()
            .filter(|r| r.end > range.start && r.start < range.end)
            .peekable();

        let mut width = 0.0;
        let chars = (range.start..).zip(string.text_in(range.clone()).chars());
        for (index, ch) in chars {
            while runs.peek().is_some_and(|r| r.end <= index) {
                runs.next();
            }
            let attrs = match runs.peek() {
                Some(run) if run.start <= index => &run.attributes,
                _ => &self.fallback,
            };
            width += self.fonts.char_width(
                ch,
                &attrs.font_family,
                attrs.font_weight,
                attrs.font_style.is_italic(),
                attrs.font_size,
            ) + attrs.letter_spacing;
        }
        width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Run;

    #[test]
    fn test_font_context_helvetica() {
        let ctx = FontContext::new();
        let w = ctx.char_width('A', "Helvetica", 400, false, 10.0);
        assert!((w - 6.67).abs() < 1e-9, "got {w}");
    }

    #[test]
    fn test_courier_is_monospaced() {
        let ctx = FontContext::new();
        let i = ctx.char_width('i', "Courier", 400, false, 10.0);
        let m = ctx.char_width('M', "Courier", 700, true, 10.0);
        assert!((i - 6.0).abs() < 1e-9);
        assert_eq!(i, m);
    }

    #[test]
    fn test_bold_helvetica_uses_bold_widths() {
        let ctx = FontContext::new();
        let regular = ctx.char_width('n', "Helvetica", 400, false, 10.0);
        let bold = ctx.char_width('n', "Helvetica", 700, false, 10.0);
        let bold_oblique = ctx.char_width('n', "Helvetica", 700, true, 10.0);
        assert!((regular - 5.56).abs() < 1e-9);
        assert!((bold - 6.11).abs() < 1e-9);
        assert_eq!(bold, bold_oblique);
        // 600 snaps to bold.
        assert_eq!(ctx.char_width('n', "Helvetica", 600, false, 10.0), bold);
    }

    #[test]
    fn test_unknown_family_falls_back() {
        let ctx = FontContext::new();
        let a = ctx.char_width('a', "NoSuchFont", 300, false, 12.0);
        let b = ctx.char_width('a', "Helvetica", 400, false, 12.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_register_rejects_garbage() {
        let mut reg = FontRegistry::new();
        let err = reg.register("Broken", 400, false, b"not a font").unwrap_err();
        assert!(matches!(err, TextkitError::FontError(_)));
        let err = reg
            .register_base64("Broken", 400, false, "data:font/ttf;base64,@@@")
            .unwrap_err();
        assert!(matches!(err, TextkitError::FontError(_)));
    }

    #[test]
    fn test_measurer_uses_run_attributes() {
        let ctx = FontContext::new();
        let big = Attributes {
            font_size: 24.0,
            ..Default::default()
        };
        let s = AttributedString::from_runs(
            "aaaa",
            vec![
                Run {
                    start: 0,
                    end: 2,
                    attributes: Attributes::default(),
                },
                Run {
                    start: 2,
                    end: 4,
                    attributes: big,
                },
            ],
        )
        .unwrap();
        let m = FontMeasurer::new(&ctx);
        let small_half = m.measure_width(0..2, &s);
        let big_half = m.measure_width(2..4, &s);
        assert!((big_half - 2.0 * small_half).abs() < 1e-9);
        assert!((m.measure_width(0..4, &s) - (small_half + big_half)).abs() < 1e-9);
        assert_eq!(m.measure_width(1..1, &s), 0.0);
    }

    #[test]
    fn test_measurer_letter_spacing() {
        let ctx = FontContext::new();
        let spaced = Attributes {
            letter_spacing: 1.5,
            ..Default::default()
        };
        let plain = AttributedString::new("abc", Attributes::default());
        let wide = AttributedString::new("abc", spaced);
        let m = FontMeasurer::new(&ctx);
        let diff = m.measure_width(0..3, &wide) - m.measure_width(0..3, &plain);
        assert!((diff - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_measurer_range_inside_multibyte_text() {
        let ctx = FontContext::new();
        let s = AttributedString::new("naïve café — déjà vu", Attributes::default());
        let m = FontMeasurer::new(&ctx);
        let expected = ctx.measure_string("déjà", &Attributes::default());
        assert!((m.measure_width(13..17, &s) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_measure_string_matches_measurer() {
        let ctx = FontContext::new();
        let s = AttributedString::new("Hello, World", Attributes::default());
        let m = FontMeasurer::new(&ctx);
        let a = ctx.measure_string("Hello, World", &Attributes::default());
        assert!((a - m.measure_width(0..12, &s)).abs() < 1e-9);
    }
}
