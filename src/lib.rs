//! Lays out a tree of pages, paragraphs and tables and renders it to PDF.
//!
//! The work is split across the workspace crates:
//! - `quire-types`: geometry, colors and handles shared by everything else
//! - `quire-layout`: the document tree, line breaking, table sizing and the
//!   drawing tasks produced by painting a laid-out tree
//! - `quire-render-core`: the graphics state cache and the deferred backend
//!   calls, committed together with the bookmark outline
//! - `quire-render-lopdf`: a backend writing PDF through lopdf
//!
//! This crate ties them together behind [`Pipeline`].

pub mod document;
pub mod error;
pub mod pipeline;

pub use document::{CellSpec, DocumentSpec, ElementSpec, InlineSpec, PageSpec, RowSpec};
pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineConfig};

pub use quire_layout as layout;
pub use quire_render_core as render;
pub use quire_render_lopdf as lopdf_backend;
pub use quire_types as types;
