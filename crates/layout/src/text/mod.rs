//! Line breaking and the line parts it produces.

pub mod breaker;
pub mod line;
pub mod line_part;
pub mod metrics;

pub use breaker::LineBreaker;
pub use line::Line;
pub use line_part::LinePart;
pub use metrics::{FixedAdvanceMetrics, FontMetrics};
