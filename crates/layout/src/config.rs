use crate::style::TextDecoration;
use crate::text::FixedAdvanceMetrics;
use serde::Deserialize;

/// Offsets of text decoration lines relative to the text baseline.
///
/// The defaults fit the metrics of the standard PDF fonts; backends with
/// different font conventions should supply their own.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecorationConfig {
    /// Absolute offset of an underline.
    pub underline_offset: f32,
    /// Fraction of the font size at which a line-through is drawn.
    pub line_through_ratio: f32,
    /// Added to the font size to place an overline.
    pub overline_offset: f32,
    /// Stroke width of every decoration line.
    pub line_width: f32,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            underline_offset: -1.0,
            line_through_ratio: 1.0 / 3.0,
            overline_offset: -1.0,
            line_width: 0.5,
        }
    }
}

impl DecorationConfig {
    /// Vertical offset from the baseline, or `None` when nothing is drawn.
    pub fn offset(&self, decoration: TextDecoration, font_size: f32) -> Option<f32> {
        match decoration {
            TextDecoration::None => None,
            TextDecoration::Underline => Some(self.underline_offset),
            TextDecoration::LineThrough => Some(font_size * self.line_through_ratio),
            TextDecoration::Overline => Some(font_size + self.overline_offset),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Line height used for text without an explicit `line-height`,
    /// as a multiple of the font size.
    ///
    /// Defaults to `1.2`.
    pub line_height_multiplier: f32,
    pub decoration: DecorationConfig,
    /// Encoding handed to the backend with every piece of text.
    pub default_encoding: String,
    /// Character advances used when no real font metrics are available.
    pub metrics: FixedAdvanceMetrics,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_height_multiplier: 1.2,
            decoration: DecorationConfig::default(),
            default_encoding: "utf-8".to_string(),
            metrics: FixedAdvanceMetrics::default(),
        }
    }
}
