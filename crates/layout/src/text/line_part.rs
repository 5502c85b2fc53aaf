use super::line::Line;
use crate::LayoutError;
use crate::config::LayoutConfig;
use crate::painting::DrawingTask;
use crate::style::StyleMap;
use crate::tree::{DocumentTree, LinePartRef, NodeId};

/// A run of words from one text node placed on one line.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePart {
    words: String,
    base_width: f32,
    x_translation: f32,
    word_spacing: Option<f32>,
    text: NodeId,
}

impl LinePart {
    /// Creates the part and registers it with its text node at `location`.
    pub fn new(
        words: impl Into<String>,
        width: f32,
        x_translation: f32,
        text: NodeId,
        tree: &mut DocumentTree,
        location: LinePartRef,
    ) -> Result<Self, LayoutError> {
        tree.register_line_part(text, location)?;
        Ok(Self {
            words: words.into(),
            base_width: width,
            x_translation,
            word_spacing: None,
            text,
        })
    }

    /// The text drawn by this part, spaces included.
    pub fn words(&self) -> &str {
        &self.words
    }

    pub fn set_words(&mut self, words: impl Into<String>) {
        self.words = words.into();
    }

    pub fn number_of_words(&self) -> usize {
        self.words.split_whitespace().count()
    }

    /// Measured width of the words without extra word spacing.
    ///
    /// Decoration lines span this width.
    pub fn base_width(&self) -> f32 {
        self.base_width
    }

    /// Measured width plus the extra spacing between words, if any.
    pub fn width(&self) -> f32 {
        match self.word_spacing {
            Some(spacing) => {
                self.base_width + self.number_of_words().saturating_sub(1) as f32 * spacing
            }
            None => self.base_width,
        }
    }

    pub fn word_spacing(&self) -> Option<f32> {
        self.word_spacing
    }

    pub fn set_word_spacing(&mut self, spacing: Option<f32>) {
        self.word_spacing = spacing;
    }

    /// Offset of the part from the line's first point.
    pub fn x_translation(&self) -> f32 {
        self.x_translation
    }

    /// The text node this part was cut from.
    pub fn text(&self) -> NodeId {
        self.text
    }

    pub fn height(&self, styles: &StyleMap) -> Result<f32, LayoutError> {
        Ok(styles.get(self.text)?.line_height)
    }

    /// Paint instructions for this part on `line`.
    pub fn drawing_tasks(
        &self,
        line: &Line,
        styles: &StyleMap,
        config: &LayoutConfig,
    ) -> Result<Vec<DrawingTask>, LayoutError> {
        let attrs = styles.get(self.text)?;
        let origin = line.first_point();
        let x = origin.x + self.x_translation;
        let y = origin.y - attrs.font_size - (line.height() - attrs.line_height);

        let mut tasks = vec![
            DrawingTask::SaveGs,
            DrawingTask::SetFont {
                font: attrs.font.clone(),
                size: attrs.font_size,
            },
            DrawingTask::SetFillColor(attrs.color.clone()),
            DrawingTask::SetAlpha(attrs.alpha),
            DrawingTask::DrawText {
                text: self.words.clone(),
                x,
                y,
                encoding: attrs.encoding.clone(),
                word_spacing: self.word_spacing.unwrap_or(0.0),
            },
        ];

        if let Some(offset) = config.decoration.offset(attrs.text_decoration, attrs.font_size) {
            tasks.push(DrawingTask::SetLineColor(attrs.color.clone()));
            tasks.push(DrawingTask::SetLineWidth(config.decoration.line_width));
            tasks.push(DrawingTask::DrawLine {
                x1: x,
                y1: y + offset,
                x2: x + self.base_width(),
                y2: y + offset,
            });
        }

        tasks.push(DrawingTask::RestoreGs);
        Ok(tasks)
    }
}
