use serde::{Deserialize, Serialize};
use thiserror::Error;

const EPSILON: f32 = 0.001;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Point index {index} is out of range for a boundary of {len} points.")]
    PointIndexOutOfRange { index: usize, len: usize },
}

/// A point in page space. The y axis grows upwards, as in PDF user space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the point moved by `(dx, dy)`.
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Equal within a hundredth of a point.
    pub fn approx_eq(self, other: Point) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// ISO A4 in points.
    pub fn a4() -> Self {
        Self::new(595.28, 841.89)
    }
}

/// An axis-aligned rectangle anchored at its lower-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from two opposite corners in any order.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
        }
    }

    /// `[x1, y1, x2, y2]`, the order PDF annotation rectangles use.
    pub fn corners(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// The polygon a node occupies on the page.
///
/// For rectangles the points run clockwise from the top-left corner:
/// top-left, top-right, bottom-right, bottom-left. The first point is the
/// reference used when placing lines of text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Boundary {
    points: Vec<Point>,
}

impl Boundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    /// Four corners clockwise from `top_left`, with y growing upwards.
    pub fn rectangle(top_left: Point, width: f32, height: f32) -> Self {
        Self {
            points: vec![
                top_left,
                top_left.translate(width, 0.0),
                top_left.translate(width, -height),
                top_left.translate(0.0, -height),
            ],
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// The corner every boundary is anchored at: top left for rectangles.
    pub fn first_point(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Upper-left corner of the bounding box, used when the polygon is not a rectangle.
    pub fn top_left(&self) -> Point {
        Point::new(self.min_x(), self.max_y())
    }

    /// Moves every corner by `(dx, dy)`.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        for point in &mut self.points {
            *point = point.translate(dx, dy);
        }
    }

    /// Moves a single corner, leaving the others in place.
    pub fn point_translate(&mut self, index: usize, dx: f32, dy: f32) -> Result<(), GeometryError> {
        let len = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or(GeometryError::PointIndexOutOfRange { index, len })?;
        *point = point.translate(dx, dy);
        Ok(())
    }

    pub fn min_x(&self) -> f32 {
        self.fold(|p| p.x, f32::min, f32::INFINITY)
    }

    pub fn max_x(&self) -> f32 {
        self.fold(|p| p.x, f32::max, f32::NEG_INFINITY)
    }

    pub fn min_y(&self) -> f32 {
        self.fold(|p| p.y, f32::min, f32::INFINITY)
    }

    pub fn max_y(&self) -> f32 {
        self.fold(|p| p.y, f32::max, f32::NEG_INFINITY)
    }

    pub fn width(&self) -> f32 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.max_x() - self.min_x()
    }

    pub fn height(&self) -> f32 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.max_y() - self.min_y()
    }

    /// Width of the narrower horizontal edge of a four-point boundary.
    ///
    /// Differs from [`Boundary::width`] once a single corner has been moved.
    pub fn min_width(&self) -> f32 {
        match self.points.as_slice() {
            [top_left, top_right, bottom_right, bottom_left] => (top_right.x - top_left.x)
                .abs()
                .min((bottom_right.x - bottom_left.x).abs()),
            _ => self.width(),
        }
    }

    /// Axis-aligned box around all corners.
    pub fn bounding_rect(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::default();
        }
        Rect::new(self.min_x(), self.min_y(), self.width(), self.height())
    }

    /// Whether `point` lies inside the bounding box, edges included.
    pub fn contains(&self, point: Point) -> bool {
        !self.points.is_empty()
            && point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    fn fold(&self, key: impl Fn(&Point) -> f32, pick: fn(f32, f32) -> f32, init: f32) -> f32 {
        self.points.iter().map(key).fold(init, pick)
    }
}
