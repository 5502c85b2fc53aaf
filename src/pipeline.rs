//! Layout, paint and commit, in that order.

use crate::document::DocumentSpec;
use crate::error::PipelineError;
use log::{debug, info};
use quire_layout::{LayoutConfig, LayoutEngine, paint_tree};
use quire_render_core::{Backend, Engine};
use quire_render_lopdf::LopdfBackend;
use serde::Deserialize;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineConfig {
    pub layout: LayoutConfig,
    /// Written to the PDF information dictionary.
    pub title: Option<String>,
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

pub struct Pipeline {
    config: PipelineConfig,
    engine: LayoutEngine,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let engine = LayoutEngine::new(config.layout.clone());
        Self { config, engine }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Renders `document` to PDF bytes.
    pub fn render(&self, document: &DocumentSpec) -> Result<Vec<u8>, PipelineError> {
        let mut backend = LopdfBackend::new();
        if let Some(title) = &self.config.title {
            backend = backend.with_title(title.clone());
        }
        self.render_with(document, backend)
    }

    /// Lays out `document` and replays its drawing tasks on `backend`.
    ///
    /// Nothing reaches the backend before the whole tree is laid out and
    /// painted; the engine then commits every page at once.
    pub fn render_with<B: Backend>(
        &self,
        document: &DocumentSpec,
        backend: B,
    ) -> Result<B::Output, PipelineError> {
        let start = Instant::now();
        let mut tree = document.build_tree()?;
        let styles = self.engine.layout(&mut tree)?;
        let pages = paint_tree(&tree, &styles, self.engine.config())?;
        debug!("Layout and paint took {:?}.", start.elapsed());

        let mut engine = Engine::new(backend);
        for page in pages {
            let index = engine.add_page(page.size)?;
            if index != page.page {
                return Err(PipelineError::Document(format!(
                    "backend numbered {} as {}",
                    page.page, index
                )));
            }
            engine.run_tasks(index, page.tasks)?;
        }
        let page_count = engine.page_count();
        let output = engine.commit()?;
        info!("Rendered {} pages in {:?}.", page_count, start.elapsed());
        Ok(output)
    }

    pub fn render_to_file(
        &self,
        document: &DocumentSpec,
        path: impl AsRef<Path>,
    ) -> Result<(), PipelineError> {
        let bytes = self.render(document)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote {} bytes to {}.", bytes.len(), path.as_ref().display());
        Ok(())
    }
}
