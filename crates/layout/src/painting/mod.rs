//! Deferred paint instructions.
//!
//! Painting a laid-out tree yields plain [`DrawingTask`] values per page;
//! nothing reaches a backend until a [`Painter`] replays them.

pub mod box_painter;
pub mod painter;
pub mod task;

pub use painter::{PageTasks, paint_tree};
pub use task::{DashPattern, DrawingTask, FillMode, Painter};
