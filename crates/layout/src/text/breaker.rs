use super::line::Line;
use super::line_part::LinePart;
use super::metrics::FontMetrics;
use crate::LayoutError;
use crate::style::{StyleMap, TextAlign};
use crate::tree::{DocumentTree, LinePartRef, NodeId, NodeKind};
use log::{debug, warn};
use quire_types::{Boundary, Point};

/// Words collected for one text node on the line being filled.
#[derive(Debug)]
struct PendingPart {
    text: NodeId,
    words: String,
    width: f32,
    x: f32,
}

#[derive(Debug, Default)]
struct PendingLine {
    parts: Vec<PendingPart>,
    width: f32,
}

impl PendingLine {
    fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    fn gaps(&self) -> usize {
        let inner: usize = self
            .parts
            .iter()
            .map(|part| part.words.split_whitespace().count().saturating_sub(1))
            .sum();
        inner + self.parts.len().saturating_sub(1)
    }
}

/// Greedy word-fill line breaking for paragraphs.
pub struct LineBreaker<'a> {
    styles: &'a StyleMap,
    metrics: &'a dyn FontMetrics,
}

impl<'a> LineBreaker<'a> {
    pub fn new(styles: &'a StyleMap, metrics: &'a dyn FontMetrics) -> Self {
        Self { styles, metrics }
    }

    /// Breaks the text children of `paragraph` into lines starting at `start`
    /// (top-left) and returns the height consumed.
    ///
    /// Lines are stored on the paragraph and every line part is registered
    /// with its text node. A word wider than `available_width` gets a line
    /// of its own and overflows.
    pub fn break_paragraph(
        &self,
        tree: &mut DocumentTree,
        paragraph: NodeId,
        start: Point,
        available_width: f32,
    ) -> Result<f32, LayoutError> {
        if available_width < 0.0 {
            return Err(LayoutError::NegativeWidth {
                width: available_width,
            });
        }
        let align = self.styles.get(paragraph)?.text_align;

        let mut texts = Vec::new();
        for child in tree.children(paragraph)? {
            match tree.kind(child)? {
                NodeKind::Text { content } => texts.push((child, content.clone())),
                other => {
                    return Err(LayoutError::UnexpectedNodeKind {
                        node: child,
                        expected: "Text",
                        found: other.name(),
                    });
                }
            }
            tree.clear_line_parts(child)?;
        }

        let mut pending_lines: Vec<PendingLine> = Vec::new();
        let mut current = PendingLine::default();

        for (text, content) in &texts {
            let attrs = self.styles.get(*text)?;
            let space = self.metrics.space_width(&attrs.font, attrs.font_size);

            for word in content.split_whitespace() {
                let word_width = self.metrics.word_width(word, &attrs.font, attrs.font_size);
                let mut gap = if current.is_empty() { 0.0 } else { space };

                if !current.is_empty() && current.width + gap + word_width > available_width {
                    pending_lines.push(std::mem::take(&mut current));
                    gap = 0.0;
                }
                if current.is_empty() && word_width > available_width {
                    warn!(
                        "Word '{}' ({:.2}) is wider than the available width {:.2}.",
                        word, word_width, available_width
                    );
                }

                match current.parts.last_mut() {
                    Some(part) if part.text == *text => {
                        part.words.push(' ');
                        part.words.push_str(word);
                        part.width += gap + word_width;
                    }
                    _ => current.parts.push(PendingPart {
                        text: *text,
                        words: word.to_string(),
                        width: word_width,
                        x: current.width + gap,
                    }),
                }
                current.width += gap + word_width;
            }
        }
        if !current.is_empty() {
            pending_lines.push(current);
        }

        let line_count = pending_lines.len();
        let mut lines = Vec::with_capacity(line_count);
        let mut y = start.y;
        for (index, pending) in pending_lines.into_iter().enumerate() {
            let is_last = index + 1 == line_count;
            let line = self.finish_line(
                tree,
                paragraph,
                index,
                pending,
                Point::new(start.x, y),
                available_width,
                align,
                is_last,
            )?;
            y -= line.height();
            lines.push(line);
        }

        let height = start.y - y;
        debug!(
            "Paragraph {} broken into {} lines ({:.2} high) at width {:.2}.",
            paragraph, line_count, height, available_width
        );
        tree.set_lines(paragraph, lines)?;
        tree.set_boundary(paragraph, Boundary::rectangle(start, available_width, height))?;
        Ok(height)
    }

    #[allow(clippy::too_many_arguments)]
    fn finish_line(
        &self,
        tree: &mut DocumentTree,
        paragraph: NodeId,
        index: usize,
        pending: PendingLine,
        first_point: Point,
        available_width: f32,
        align: TextAlign,
        is_last: bool,
    ) -> Result<Line, LayoutError> {
        let extra = (available_width - pending.width).max(0.0);
        let gaps = pending.gaps();
        let spacing = match align {
            TextAlign::Justify if !is_last && gaps > 0 => Some(extra / gaps as f32),
            _ => None,
        };
        let offset = match align {
            TextAlign::Center => extra / 2.0,
            TextAlign::Right => extra,
            _ => 0.0,
        };

        let mut line = Line::new(first_point);
        let mut height: f32 = 0.0;
        let mut shift = 0.0;
        for (part_index, part) in pending.parts.into_iter().enumerate() {
            if part_index > 0 {
                shift += spacing.unwrap_or(0.0);
            }
            let location = LinePartRef {
                paragraph,
                line: index,
                part: part_index,
            };
            let mut line_part =
                LinePart::new(part.words, part.width, part.x + offset + shift, part.text, tree, location)?;
            line_part.set_word_spacing(spacing);
            shift += line_part.width() - line_part.base_width();
            height = height.max(line_part.height(self.styles)?);
            line.push_part(line_part);
        }
        line.set_height(height);
        Ok(line)
    }
}
