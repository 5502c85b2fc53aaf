#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use quire::{DocumentSpec, Pipeline, PipelineConfig, PipelineError};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

pub fn render(document: &Value) -> Result<GeneratedPdf, PipelineError> {
    render_with_config(document, PipelineConfig::default())
}

pub fn render_with_config(document: &Value, config: PipelineConfig) -> Result<GeneratedPdf, PipelineError> {
    let spec: DocumentSpec = serde_json::from_value(document.clone())?;
    let bytes = Pipeline::new(config).render(&spec)?;
    GeneratedPdf::from_bytes(bytes).map_err(|e| PipelineError::Document(e.to_string()))
}

#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let shown = $crate::common::pdf_assertions::shown_text(&$pdf.doc).join(" ");
        assert!(shown.contains($text), "PDF should show {:?}, found {:?}", $text, shown);
    };
}
