use quire_layout::LayoutError;
use quire_render_core::RenderError;
use thiserror::Error;

/// Everything that can go wrong between reading a document and writing a PDF.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Invalid document: {0}")]
    Document(String),
}
