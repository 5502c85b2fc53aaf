use crate::call::BackendCall;
use crate::error::RenderError;
use crate::state::StateStack;
use crate::traits::Backend;
use log::trace;
use quire_layout::painting::{DashPattern, FillMode, Painter};
use quire_types::{BookmarkId, Color, FontKey, ImageKey, PageIndex, Rect, Size};

/// A bookmark requested while painting, not yet part of the outline.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingBookmark {
    pub id: BookmarkId,
    pub title: String,
    pub top: f32,
    pub parent: Option<BookmarkId>,
}

/// Drawing surface for one page.
///
/// Calls are queued and only reach the backend on [`GraphicsContext::flush`].
/// State setters are compared against the innermost saved frame and dropped
/// when they would not change anything.
#[derive(Debug)]
pub struct GraphicsContext {
    page: PageIndex,
    size: Size,
    state: StateStack,
    queue: Vec<BackendCall>,
    bookmarks: Vec<PendingBookmark>,
}

impl GraphicsContext {
    pub fn new(page: PageIndex, size: Size) -> Self {
        Self {
            page,
            size,
            state: StateStack::new(),
            queue: Vec::new(),
            bookmarks: Vec::new(),
        }
    }

    pub fn page(&self) -> PageIndex {
        self.page
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn state(&self) -> &StateStack {
        &self.state
    }

    /// Calls waiting for the next flush.
    pub fn queued(&self) -> &[BackendCall] {
        &self.queue
    }

    pub fn bookmarks(&self) -> &[PendingBookmark] {
        &self.bookmarks
    }

    fn elided(&self, operation: &str) {
        trace!("{}: {} unchanged, not sent.", self.page, operation);
    }

    pub fn save_gs(&mut self) {
        self.state.save();
        self.queue.push(BackendCall::SaveGs);
    }

    pub fn restore_gs(&mut self) -> Result<(), RenderError> {
        if !self.state.restore() {
            return Err(RenderError::Configuration(format!(
                "restoreGS without a matching saveGS on {}",
                self.page
            )));
        }
        self.queue.push(BackendCall::RestoreGs);
        Ok(())
    }

    pub fn set_font(&mut self, font: &FontKey, size: f32) {
        if self.state.current_mut().set_font(font, size) {
            self.queue.push(BackendCall::SetFont {
                font: font.clone(),
                size,
            });
        } else {
            self.elided("setFont");
        }
    }

    pub fn set_fill_color(&mut self, color: &Color) {
        if self.state.current_mut().set_fill_color(color) {
            self.queue.push(BackendCall::SetFillColor(color.clone()));
        } else {
            self.elided("setFillColor");
        }
    }

    pub fn set_line_color(&mut self, color: &Color) {
        if self.state.current_mut().set_line_color(color) {
            self.queue.push(BackendCall::SetLineColor(color.clone()));
        } else {
            self.elided("setLineColor");
        }
    }

    pub fn set_line_width(&mut self, width: f32) {
        if self.state.current_mut().set_line_width(width) {
            self.queue.push(BackendCall::SetLineWidth(width));
        } else {
            self.elided("setLineWidth");
        }
    }

    pub fn set_line_dashing_pattern(&mut self, pattern: &DashPattern) {
        let normalized = pattern.normalized();
        if self.state.current_mut().set_dashing_pattern(&normalized) {
            self.queue.push(BackendCall::SetLineDashingPattern(normalized));
        } else {
            self.elided("setLineDashingPattern");
        }
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        if self.state.current_mut().set_alpha(alpha) {
            self.queue.push(BackendCall::SetAlpha(alpha));
        } else {
            self.elided("setAlpha");
        }
    }

    pub fn clip_rectangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.queue.push(BackendCall::ClipRectangle { x1, y1, x2, y2 });
    }

    pub fn draw_text(&mut self, text: &str, x: f32, y: f32, encoding: &str, word_spacing: f32) {
        self.queue.push(BackendCall::DrawText {
            text: text.to_string(),
            x,
            y,
            encoding: encoding.to_string(),
            word_spacing,
        });
    }

    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.queue.push(BackendCall::DrawLine { x1, y1, x2, y2 });
    }

    pub fn draw_polygon(&mut self, xs: &[f32], ys: &[f32], fill: FillMode) {
        self.queue.push(BackendCall::DrawPolygon {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            fill,
        });
    }

    pub fn draw_rounded_rectangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32, fill: FillMode) {
        self.queue.push(BackendCall::DrawRoundedRectangle {
            x1,
            y1,
            x2,
            y2,
            radius,
            fill,
        });
    }

    pub fn draw_image(&mut self, image: &ImageKey, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.queue.push(BackendCall::DrawImage {
            image: image.clone(),
            x1,
            y1,
            x2,
            y2,
        });
    }

    pub fn attach_uri_action(&mut self, rect: Rect, uri: &str) {
        self.queue.push(BackendCall::UriAction {
            rect,
            uri: uri.to_string(),
        });
    }

    pub fn attach_go_to_action(&mut self, rect: Rect, target: PageIndex, top: f32) {
        self.queue.push(BackendCall::GoToAction { rect, target, top });
    }

    pub fn attach_sticky_note(&mut self, rect: Rect, text: &str) {
        self.queue.push(BackendCall::StickyNote {
            rect,
            text: text.to_string(),
        });
    }

    /// Records an outline entry pointing at `top` on this page.
    pub fn add_bookmark(&mut self, id: BookmarkId, title: &str, top: f32, parent: Option<BookmarkId>) {
        self.bookmarks.push(PendingBookmark {
            id,
            title: title.to_string(),
            top,
            parent,
        });
    }

    /// Sends every queued call to `backend` in order and empties the queue.
    pub fn flush<B: Backend + ?Sized>(&mut self, backend: &mut B) -> Result<usize, RenderError> {
        let calls = std::mem::take(&mut self.queue);
        for call in &calls {
            call.apply(backend, self.page)?;
        }
        Ok(calls.len())
    }

    /// Takes the bookmarks recorded so far.
    pub fn take_bookmarks(&mut self) -> Vec<PendingBookmark> {
        std::mem::take(&mut self.bookmarks)
    }
}

impl Painter for GraphicsContext {
    type Error = RenderError;

    fn save_gs(&mut self) {
        GraphicsContext::save_gs(self);
    }

    fn restore_gs(&mut self) -> Result<(), RenderError> {
        GraphicsContext::restore_gs(self)
    }

    fn set_font(&mut self, font: &FontKey, size: f32) {
        GraphicsContext::set_font(self, font, size);
    }

    fn set_fill_color(&mut self, color: &Color) {
        GraphicsContext::set_fill_color(self, color);
    }

    fn set_line_color(&mut self, color: &Color) {
        GraphicsContext::set_line_color(self, color);
    }

    fn set_line_width(&mut self, width: f32) {
        GraphicsContext::set_line_width(self, width);
    }

    fn set_line_dashing_pattern(&mut self, pattern: &DashPattern) {
        GraphicsContext::set_line_dashing_pattern(self, pattern);
    }

    fn set_alpha(&mut self, alpha: f32) {
        GraphicsContext::set_alpha(self, alpha);
    }

    fn clip_rectangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        GraphicsContext::clip_rectangle(self, x1, y1, x2, y2);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, encoding: &str, word_spacing: f32) {
        GraphicsContext::draw_text(self, text, x, y, encoding, word_spacing);
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        GraphicsContext::draw_line(self, x1, y1, x2, y2);
    }

    fn draw_polygon(&mut self, xs: &[f32], ys: &[f32], fill: FillMode) {
        GraphicsContext::draw_polygon(self, xs, ys, fill);
    }

    fn draw_rounded_rectangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32, fill: FillMode) {
        GraphicsContext::draw_rounded_rectangle(self, x1, y1, x2, y2, radius, fill);
    }

    fn draw_image(&mut self, image: &ImageKey, x1: f32, y1: f32, x2: f32, y2: f32) {
        GraphicsContext::draw_image(self, image, x1, y1, x2, y2);
    }

    fn uri_action(&mut self, rect: Rect, uri: &str) {
        self.attach_uri_action(rect, uri);
    }

    fn go_to_action(&mut self, rect: Rect, target: PageIndex, top: f32) {
        self.attach_go_to_action(rect, target, top);
    }

    fn sticky_note(&mut self, rect: Rect, text: &str) {
        self.attach_sticky_note(rect, text);
    }

    fn add_bookmark(&mut self, id: BookmarkId, title: &str, top: f32, parent: Option<BookmarkId>) {
        GraphicsContext::add_bookmark(self, id, title, top, parent);
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
