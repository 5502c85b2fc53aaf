//! An in-memory [`Backend`] that records every call.

use crate::call::BackendCall;
use crate::error::BackendError;
use crate::outline::OutlineNode;
use crate::traits::Backend;
use quire_layout::painting::FillMode;
use quire_types::{Color, FontKey, ImageKey, PageIndex, Rect, Size};

/// Everything a [`RecordingBackend`] saw, in call order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    pub pages: Vec<Size>,
    pub calls: Vec<(PageIndex, BackendCall)>,
    pub outlines: Vec<OutlineNode>,
}

impl Recording {
    /// The calls made on one page.
    pub fn calls_on(&self, page: PageIndex) -> Vec<&BackendCall> {
        self.calls
            .iter()
            .filter(|(p, _)| *p == page)
            .map(|(_, call)| call)
            .collect()
    }

    pub fn names_on(&self, page: PageIndex) -> Vec<&'static str> {
        self.calls_on(page).into_iter().map(BackendCall::name).collect()
    }
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    recording: Recording,
    fail_annotations: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose annotation calls all fail.
    pub fn failing_annotations() -> Self {
        Self {
            fail_annotations: true,
            ..Self::default()
        }
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    fn record(&mut self, page: PageIndex, call: BackendCall) -> Result<(), BackendError> {
        if page.0 >= self.recording.pages.len() {
            return Err(BackendError::new(format!("{} was never added", page)));
        }
        self.recording.calls.push((page, call));
        Ok(())
    }

    fn annotate(&mut self, page: PageIndex, call: BackendCall) -> Result<(), BackendError> {
        if self.fail_annotations {
            return Err(BackendError::new(format!("annotations are disabled on {}", page)));
        }
        self.record(page, call)
    }
}

impl Backend for RecordingBackend {
    type Output = Recording;

    fn add_page(&mut self, size: Size) -> Result<PageIndex, BackendError> {
        self.recording.pages.push(size);
        Ok(PageIndex(self.recording.pages.len() - 1))
    }

    fn save_gs(&mut self, page: PageIndex) -> Result<(), BackendError> {
        self.record(page, BackendCall::SaveGs)
    }

    fn restore_gs(&mut self, page: PageIndex) -> Result<(), BackendError> {
        self.record(page, BackendCall::RestoreGs)
    }

    fn set_font(&mut self, page: PageIndex, font: &FontKey, size: f32) -> Result<(), BackendError> {
        self.record(
            page,
            BackendCall::SetFont {
                font: font.clone(),
                size,
            },
        )
    }

    fn set_fill_color(&mut self, page: PageIndex, color: &Color) -> Result<(), BackendError> {
        self.record(page, BackendCall::SetFillColor(color.clone()))
    }

    fn set_line_color(&mut self, page: PageIndex, color: &Color) -> Result<(), BackendError> {
        self.record(page, BackendCall::SetLineColor(color.clone()))
    }

    fn set_line_width(&mut self, page: PageIndex, width: f32) -> Result<(), BackendError> {
        self.record(page, BackendCall::SetLineWidth(width))
    }

    fn set_line_dashing_pattern(&mut self, page: PageIndex, pattern: &[f32]) -> Result<(), BackendError> {
        self.record(page, BackendCall::SetLineDashingPattern(pattern.to_vec()))
    }

    fn set_alpha(&mut self, page: PageIndex, alpha: f32) -> Result<(), BackendError> {
        self.record(page, BackendCall::SetAlpha(alpha))
    }

    fn clip_rectangle(&mut self, page: PageIndex, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), BackendError> {
        self.record(page, BackendCall::ClipRectangle { x1, y1, x2, y2 })
    }

    fn draw_text(
        &mut self,
        page: PageIndex,
        text: &str,
        x: f32,
        y: f32,
        encoding: &str,
        word_spacing: f32,
    ) -> Result<(), BackendError> {
        self.record(
            page,
            BackendCall::DrawText {
                text: text.to_string(),
                x,
                y,
                encoding: encoding.to_string(),
                word_spacing,
            },
        )
    }

    fn draw_line(&mut self, page: PageIndex, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), BackendError> {
        self.record(page, BackendCall::DrawLine { x1, y1, x2, y2 })
    }

    fn draw_polygon(&mut self, page: PageIndex, xs: &[f32], ys: &[f32], fill: FillMode) -> Result<(), BackendError> {
        self.record(
            page,
            BackendCall::DrawPolygon {
                xs: xs.to_vec(),
                ys: ys.to_vec(),
                fill,
            },
        )
    }

    fn draw_rounded_rectangle(
        &mut self,
        page: PageIndex,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        radius: f32,
        fill: FillMode,
    ) -> Result<(), BackendError> {
        self.record(
            page,
            BackendCall::DrawRoundedRectangle {
                x1,
                y1,
                x2,
                y2,
                radius,
                fill,
            },
        )
    }

    fn draw_image(
        &mut self,
        page: PageIndex,
        image: &ImageKey,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    ) -> Result<(), BackendError> {
        self.record(
            page,
            BackendCall::DrawImage {
                image: image.clone(),
                x1,
                y1,
                x2,
                y2,
            },
        )
    }

    fn attach_uri_action(&mut self, page: PageIndex, rect: Rect, uri: &str) -> Result<(), BackendError> {
        self.annotate(
            page,
            BackendCall::UriAction {
                rect,
                uri: uri.to_string(),
            },
        )
    }

    fn attach_go_to_action(
        &mut self,
        page: PageIndex,
        rect: Rect,
        target: PageIndex,
        top: f32,
    ) -> Result<(), BackendError> {
        self.annotate(page, BackendCall::GoToAction { rect, target, top })
    }

    fn attach_sticky_note(&mut self, page: PageIndex, rect: Rect, text: &str) -> Result<(), BackendError> {
        self.annotate(
            page,
            BackendCall::StickyNote {
                rect,
                text: text.to_string(),
            },
        )
    }

    fn set_outlines(&mut self, outlines: &[OutlineNode]) -> Result<(), BackendError> {
        self.recording.outlines = outlines.to_vec();
        Ok(())
    }

    fn finish(self) -> Result<Recording, BackendError> {
        Ok(self.recording)
    }
}
