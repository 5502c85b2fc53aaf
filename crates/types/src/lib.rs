pub mod color;
pub mod geometry;
pub mod ids;

pub use color::Color;
pub use geometry::{Boundary, GeometryError, Point, Rect, Size};
pub use ids::{BookmarkId, FontKey, ImageKey, PageIndex};
