use crate::error::RenderError;
use crate::traits::Backend;
use quire_layout::painting::FillMode;
use quire_types::{Color, FontKey, ImageKey, PageIndex, Rect};

/// One backend primitive with its arguments.
///
/// Graphics contexts queue these until commit; the recording backend keeps
/// them so tests can compare call lists.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    SaveGs,
    RestoreGs,
    SetFont { font: FontKey, size: f32 },
    SetFillColor(Color),
    SetLineColor(Color),
    SetLineWidth(f32),
    SetLineDashingPattern(Vec<f32>),
    SetAlpha(f32),
    ClipRectangle { x1: f32, y1: f32, x2: f32, y2: f32 },
    DrawText { text: String, x: f32, y: f32, encoding: String, word_spacing: f32 },
    DrawLine { x1: f32, y1: f32, x2: f32, y2: f32 },
    DrawPolygon { xs: Vec<f32>, ys: Vec<f32>, fill: FillMode },
    DrawRoundedRectangle { x1: f32, y1: f32, x2: f32, y2: f32, radius: f32, fill: FillMode },
    DrawImage { image: ImageKey, x1: f32, y1: f32, x2: f32, y2: f32 },
    UriAction { rect: Rect, uri: String },
    GoToAction { rect: Rect, target: PageIndex, top: f32 },
    StickyNote { rect: Rect, text: String },
}

impl BackendCall {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCall::SaveGs => "saveGS",
            BackendCall::RestoreGs => "restoreGS",
            BackendCall::SetFont { .. } => "setFont",
            BackendCall::SetFillColor(_) => "setFillColor",
            BackendCall::SetLineColor(_) => "setLineColor",
            BackendCall::SetLineWidth(_) => "setLineWidth",
            BackendCall::SetLineDashingPattern(_) => "setLineDashingPattern",
            BackendCall::SetAlpha(_) => "setAlpha",
            BackendCall::ClipRectangle { .. } => "clipRectangle",
            BackendCall::DrawText { .. } => "drawText",
            BackendCall::DrawLine { .. } => "drawLine",
            BackendCall::DrawPolygon { .. } => "drawPolygon",
            BackendCall::DrawRoundedRectangle { .. } => "drawRoundedRectangle",
            BackendCall::DrawImage { .. } => "drawImage",
            BackendCall::UriAction { .. } => "attachUriAction",
            BackendCall::GoToAction { .. } => "attachGoToAction",
            BackendCall::StickyNote { .. } => "attachStickyNote",
        }
    }

    /// Forwards the call to `backend`, naming the operation in any error.
    pub fn apply<B: Backend + ?Sized>(&self, backend: &mut B, page: PageIndex) -> Result<(), RenderError> {
        let result = match self {
            BackendCall::SaveGs => backend.save_gs(page),
            BackendCall::RestoreGs => backend.restore_gs(page),
            BackendCall::SetFont { font, size } => backend.set_font(page, font, *size),
            BackendCall::SetFillColor(color) => backend.set_fill_color(page, color),
            BackendCall::SetLineColor(color) => backend.set_line_color(page, color),
            BackendCall::SetLineWidth(width) => backend.set_line_width(page, *width),
            BackendCall::SetLineDashingPattern(pattern) => backend.set_line_dashing_pattern(page, pattern),
            BackendCall::SetAlpha(alpha) => backend.set_alpha(page, *alpha),
            BackendCall::ClipRectangle { x1, y1, x2, y2 } => backend.clip_rectangle(page, *x1, *y1, *x2, *y2),
            BackendCall::DrawText {
                text,
                x,
                y,
                encoding,
                word_spacing,
            } => backend.draw_text(page, text, *x, *y, encoding, *word_spacing),
            BackendCall::DrawLine { x1, y1, x2, y2 } => backend.draw_line(page, *x1, *y1, *x2, *y2),
            BackendCall::DrawPolygon { xs, ys, fill } => backend.draw_polygon(page, xs, ys, *fill),
            BackendCall::DrawRoundedRectangle {
                x1,
                y1,
                x2,
                y2,
                radius,
                fill,
            } => backend.draw_rounded_rectangle(page, *x1, *y1, *x2, *y2, *radius, *fill),
            BackendCall::DrawImage { image, x1, y1, x2, y2 } => {
                backend.draw_image(page, image, *x1, *y1, *x2, *y2)
            }
            BackendCall::UriAction { rect, uri } => backend.attach_uri_action(page, *rect, uri),
            BackendCall::GoToAction { rect, target, top } => {
                backend.attach_go_to_action(page, *rect, *target, *top)
            }
            BackendCall::StickyNote { rect, text } => backend.attach_sticky_note(page, *rect, text),
        };
        result.map_err(RenderError::backend(self.name()))
    }
}
