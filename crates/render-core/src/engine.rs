use crate::context::GraphicsContext;
use crate::error::RenderError;
use crate::outline::OutlineBuilder;
use crate::traits::Backend;
use log::debug;
use quire_layout::painting::DrawingTask;
use quire_types::{PageIndex, Size};

/// Owns a backend and one graphics context per page until commit.
pub struct Engine<B: Backend> {
    backend: B,
    pages: Vec<GraphicsContext>,
}

impl<B: Backend> Engine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            pages: Vec::new(),
        }
    }

    pub fn add_page(&mut self, size: Size) -> Result<PageIndex, RenderError> {
        let page = self
            .backend
            .add_page(size)
            .map_err(RenderError::backend("addPage"))?;
        self.pages.push(GraphicsContext::new(page, size));
        Ok(page)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, page: PageIndex) -> Result<&GraphicsContext, RenderError> {
        self.pages
            .iter()
            .find(|ctx| ctx.page() == page)
            .ok_or(RenderError::UnknownPage(page))
    }

    pub fn page_mut(&mut self, page: PageIndex) -> Result<&mut GraphicsContext, RenderError> {
        self.pages
            .iter_mut()
            .find(|ctx| ctx.page() == page)
            .ok_or(RenderError::UnknownPage(page))
    }

    /// Replays drawing tasks on the context of `page`, in order.
    pub fn run_tasks(
        &mut self,
        page: PageIndex,
        tasks: impl IntoIterator<Item = DrawingTask>,
    ) -> Result<(), RenderError> {
        let context = self.page_mut(page)?;
        for task in tasks {
            task.invoke(&mut *context)?;
        }
        Ok(())
    }

    /// Flushes every page, installs the outline and finishes the backend.
    ///
    /// Bookmarks are registered page by page in the order they were added.
    /// A bookmark whose parent never appeared fails the whole commit.
    pub fn commit(mut self) -> Result<B::Output, RenderError> {
        let mut outline = OutlineBuilder::new();
        let mut sent = 0;
        for context in &mut self.pages {
            if context.state().depth() > 0 {
                return Err(RenderError::Configuration(format!(
                    "{} has {} unbalanced saveGS calls",
                    context.page(),
                    context.state().depth()
                )));
            }
            sent += context.flush(&mut self.backend)?;
            let page = context.page();
            for bookmark in context.take_bookmarks() {
                outline.add_bookmark(bookmark.id, bookmark.title, page, bookmark.top, bookmark.parent);
            }
        }

        let outlines = outline.resolve()?;
        if !outlines.is_empty() {
            self.backend
                .set_outlines(&outlines)
                .map_err(RenderError::backend("setOutlines"))?;
        }
        debug!(
            "Committed {} pages: {} backend calls, {} top-level bookmarks.",
            self.pages.len(),
            sent,
            outlines.len()
        );
        self.backend.finish().map_err(RenderError::backend("finish"))
    }
}
