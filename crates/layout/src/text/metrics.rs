use quire_types::FontKey;
use serde::Deserialize;

/// Measures words for line breaking.
pub trait FontMetrics {
    fn word_width(&self, word: &str, font: &FontKey, size: f32) -> f32;
    fn space_width(&self, font: &FontKey, size: f32) -> f32;

    /// Width of a run of words separated by single spaces.
    fn text_width(&self, text: &str, font: &FontKey, size: f32) -> f32 {
        let mut width = 0.0;
        for (i, word) in text.split_whitespace().enumerate() {
            if i > 0 {
                width += self.space_width(font, size);
            }
            width += self.word_width(word, font, size);
        }
        width
    }
}

/// Every character advances by the same fraction of the font size.
///
/// Without embedded fonts there are no glyph tables to consult; a fixed
/// advance keeps breaking deterministic across backends.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FixedAdvanceMetrics {
    pub advance_ratio: f32,
    pub space_width_ratio: f32,
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.5,
            space_width_ratio: 0.25,
        }
    }
}

impl FontMetrics for FixedAdvanceMetrics {
    fn word_width(&self, word: &str, _font: &FontKey, size: f32) -> f32 {
        word.chars().count() as f32 * size * self.advance_ratio
    }

    fn space_width(&self, _font: &FontKey, size: f32) -> f32 {
        size * self.space_width_ratio
    }
}
