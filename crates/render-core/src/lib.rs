//! Backend-independent rendering for quire.
//!
//! This crate provides:
//! - the [`Backend`] trait implemented by output formats
//! - [`GraphicsContext`], a per-page queue of backend calls whose state
//!   setters are elided when they would not change anything
//! - [`Engine`], which owns the pages and the outline and commits them
//! - [`RecordingBackend`], an in-memory backend for tests and inspection

mod call;
mod context;
mod engine;
mod error;
mod outline;
pub mod recording;
mod state;
mod traits;

pub use call::BackendCall;
pub use context::{GraphicsContext, PendingBookmark};
pub use engine::Engine;
pub use error::{BackendError, RenderError};
pub use outline::{OutlineBuilder, OutlineEntry, OutlineNode};
pub use recording::{Recording, RecordingBackend};
pub use state::{GraphicsState, StateStack};
pub use traits::Backend;
