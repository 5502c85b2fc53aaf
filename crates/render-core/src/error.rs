use quire_layout::LayoutError;
use quire_types::PageIndex;
use std::error::Error as StdError;
use thiserror::Error;

/// Failure reported by a [`Backend`](crate::Backend) primitive.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct BackendError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for BackendError {
    fn from(s: &str) -> Self {
        BackendError::new(s)
    }
}

impl From<String> for BackendError {
    fn from(s: String) -> Self {
        BackendError::new(s)
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Backend call {operation} failed: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: BackendError,
    },
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("No graphics context for {0}.")]
    UnknownPage(PageIndex),
}

impl RenderError {
    pub fn backend(operation: &'static str) -> impl FnOnce(BackendError) -> RenderError {
        move |source| RenderError::Backend { operation, source }
    }
}
