use super::line_part::LinePart;
use quire_types::Point;

/// One laid-out line of a paragraph.
///
/// Part x-translations are offsets from `first_point`, the line's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    first_point: Point,
    height: f32,
    parts: Vec<LinePart>,
}

impl Line {
    pub fn new(first_point: Point) -> Self {
        Self {
            first_point,
            height: 0.0,
            parts: Vec::new(),
        }
    }

    /// Top-left corner of the line in page coordinates.
    pub fn first_point(&self) -> Point {
        self.first_point
    }

    /// Height of the line: the tallest of its parts once breaking is done.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    pub fn parts(&self) -> &[LinePart] {
        &self.parts
    }

    /// Appends a part; the caller positions it with its x-translation.
    pub fn push_part(&mut self, part: LinePart) {
        self.parts.push(part);
    }

    /// Horizontal extent covered by the parts.
    pub fn width(&self) -> f32 {
        let Some(first) = self.parts.first() else {
            return 0.0;
        };
        let right = self
            .parts
            .iter()
            .map(|part| part.x_translation() + part.width())
            .fold(f32::NEG_INFINITY, f32::max);
        right - first.x_translation()
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.first_point = self.first_point.translate(dx, dy);
    }
}
