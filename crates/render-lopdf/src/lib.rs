//! PDF backend for quire built on lopdf.
//!
//! [`LopdfBackend`] implements [`quire_render_core::Backend`]: every page
//! collects content stream operations and annotations until the engine
//! commits, then the whole object graph is written in one go.

mod backend;
mod content;
mod outline;

pub use backend::{LopdfBackend, STANDARD_FONTS};
pub use content::to_win_ansi;
