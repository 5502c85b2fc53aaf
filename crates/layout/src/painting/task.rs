use quire_types::{BookmarkId, Color, FontKey, ImageKey, PageIndex, Rect};

/// Line dashing as requested by layout, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum DashPattern {
    Solid,
    Dotted,
    Dashed,
    Custom(Vec<f32>),
}

impl DashPattern {
    /// The dash array sent to the backend. `Solid` becomes the single-element pattern `[0]`.
    pub fn normalized(&self) -> Vec<f32> {
        match self {
            DashPattern::Solid => vec![0.0],
            DashPattern::Dotted => vec![1.0, 2.0],
            DashPattern::Dashed => vec![3.0, 3.0],
            DashPattern::Custom(pattern) => pattern.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Fill,
    Stroke,
    FillAndStroke,
}

/// A single deferred paint call.
///
/// Tasks capture fully resolved values, so replaying them needs nothing but
/// a [`Painter`]. [`DrawingTask::invoke`] consumes the task.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingTask {
    SaveGs,
    RestoreGs,
    SetFont {
        font: FontKey,
        size: f32,
    },
    SetFillColor(Color),
    SetLineColor(Color),
    SetLineWidth(f32),
    SetLineDashingPattern(DashPattern),
    SetAlpha(f32),
    ClipRectangle {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    DrawText {
        text: String,
        x: f32,
        y: f32,
        encoding: String,
        word_spacing: f32,
    },
    DrawLine {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    DrawPolygon {
        xs: Vec<f32>,
        ys: Vec<f32>,
        fill: FillMode,
    },
    DrawRoundedRectangle {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        radius: f32,
        fill: FillMode,
    },
    DrawImage {
        image: ImageKey,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    UriAction {
        rect: Rect,
        uri: String,
    },
    GoToAction {
        rect: Rect,
        target: PageIndex,
        top: f32,
    },
    StickyNote {
        rect: Rect,
        text: String,
    },
    Bookmark {
        id: BookmarkId,
        title: String,
        top: f32,
        parent: Option<BookmarkId>,
    },
}

/// Receiver of drawing tasks, implemented by graphics contexts.
pub trait Painter {
    type Error;

    fn save_gs(&mut self);
    fn restore_gs(&mut self) -> Result<(), Self::Error>;
    fn set_font(&mut self, font: &FontKey, size: f32);
    fn set_fill_color(&mut self, color: &Color);
    fn set_line_color(&mut self, color: &Color);
    fn set_line_width(&mut self, width: f32);
    fn set_line_dashing_pattern(&mut self, pattern: &DashPattern);
    fn set_alpha(&mut self, alpha: f32);
    fn clip_rectangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, encoding: &str, word_spacing: f32);
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    fn draw_polygon(&mut self, xs: &[f32], ys: &[f32], fill: FillMode);
    #[allow(clippy::too_many_arguments)]
    fn draw_rounded_rectangle(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        radius: f32,
        fill: FillMode,
    );
    fn draw_image(&mut self, image: &ImageKey, x1: f32, y1: f32, x2: f32, y2: f32);
    fn uri_action(&mut self, rect: Rect, uri: &str);
    fn go_to_action(&mut self, rect: Rect, target: PageIndex, top: f32);
    fn sticky_note(&mut self, rect: Rect, text: &str);
    fn add_bookmark(&mut self, id: BookmarkId, title: &str, top: f32, parent: Option<BookmarkId>);
}

impl DrawingTask {
    pub fn invoke<P: Painter + ?Sized>(self, painter: &mut P) -> Result<(), P::Error> {
        match self {
            DrawingTask::SaveGs => painter.save_gs(),
            DrawingTask::RestoreGs => painter.restore_gs()?,
            DrawingTask::SetFont { font, size } => painter.set_font(&font, size),
            DrawingTask::SetFillColor(color) => painter.set_fill_color(&color),
            DrawingTask::SetLineColor(color) => painter.set_line_color(&color),
            DrawingTask::SetLineWidth(width) => painter.set_line_width(width),
            DrawingTask::SetLineDashingPattern(pattern) => painter.set_line_dashing_pattern(&pattern),
            DrawingTask::SetAlpha(alpha) => painter.set_alpha(alpha),
            DrawingTask::ClipRectangle { x1, y1, x2, y2 } => painter.clip_rectangle(x1, y1, x2, y2),
            DrawingTask::DrawText {
                text,
                x,
                y,
                encoding,
                word_spacing,
            } => painter.draw_text(&text, x, y, &encoding, word_spacing),
            DrawingTask::DrawLine { x1, y1, x2, y2 } => painter.draw_line(x1, y1, x2, y2),
            DrawingTask::DrawPolygon { xs, ys, fill } => painter.draw_polygon(&xs, &ys, fill),
            DrawingTask::DrawRoundedRectangle {
                x1,
                y1,
                x2,
                y2,
                radius,
                fill,
            } => painter.draw_rounded_rectangle(x1, y1, x2, y2, radius, fill),
            DrawingTask::DrawImage {
                image,
                x1,
                y1,
                x2,
                y2,
            } => painter.draw_image(&image, x1, y1, x2, y2),
            DrawingTask::UriAction { rect, uri } => painter.uri_action(rect, &uri),
            DrawingTask::GoToAction { rect, target, top } => painter.go_to_action(rect, target, top),
            DrawingTask::StickyNote { rect, text } => painter.sticky_note(rect, &text),
            DrawingTask::Bookmark {
                id,
                title,
                top,
                parent,
            } => painter.add_bookmark(id, &title, top, parent),
        }
        Ok(())
    }

    /// Short name used in logs and test assertions.
    pub fn name(&self) -> &'static str {
        match self {
            DrawingTask::SaveGs => "saveGS",
            DrawingTask::RestoreGs => "restoreGS",
            DrawingTask::SetFont { .. } => "setFont",
            DrawingTask::SetFillColor(_) => "setFillColor",
            DrawingTask::SetLineColor(_) => "setLineColor",
            DrawingTask::SetLineWidth(_) => "setLineWidth",
            DrawingTask::SetLineDashingPattern(_) => "setLineDashingPattern",
            DrawingTask::SetAlpha(_) => "setAlpha",
            DrawingTask::ClipRectangle { .. } => "clipRectangle",
            DrawingTask::DrawText { .. } => "drawText",
            DrawingTask::DrawLine { .. } => "drawLine",
            DrawingTask::DrawPolygon { .. } => "drawPolygon",
            DrawingTask::DrawRoundedRectangle { .. } => "drawRoundedRectangle",
            DrawingTask::DrawImage { .. } => "drawImage",
            DrawingTask::UriAction { .. } => "uriAction",
            DrawingTask::GoToAction { .. } => "goToAction",
            DrawingTask::StickyNote { .. } => "stickyNote",
            DrawingTask::Bookmark { .. } => "bookmark",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct NameLog(Vec<String>);

    impl Painter for NameLog {
        type Error = String;

        fn save_gs(&mut self) {
            self.0.push("save".into());
        }
        fn restore_gs(&mut self) -> Result<(), String> {
            if !self.0.contains(&"save".to_string()) {
                return Err("nothing saved".into());
            }
            self.0.push("restore".into());
            Ok(())
        }
        fn set_font(&mut self, font: &FontKey, size: f32) {
            self.0.push(format!("font {} {}", font, size));
        }
        fn set_fill_color(&mut self, _: &Color) {}
        fn set_line_color(&mut self, _: &Color) {}
        fn set_line_width(&mut self, _: f32) {}
        fn set_line_dashing_pattern(&mut self, pattern: &DashPattern) {
            self.0.push(format!("dash {:?}", pattern.normalized()));
        }
        fn set_alpha(&mut self, _: f32) {}
        fn clip_rectangle(&mut self, _: f32, _: f32, _: f32, _: f32) {}
        fn draw_text(&mut self, text: &str, _: f32, _: f32, _: &str, _: f32) {
            self.0.push(format!("text {}", text));
        }
        fn draw_line(&mut self, _: f32, _: f32, _: f32, _: f32) {}
        fn draw_polygon(&mut self, _: &[f32], _: &[f32], _: FillMode) {}
        fn draw_rounded_rectangle(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: FillMode) {}
        fn draw_image(&mut self, _: &ImageKey, _: f32, _: f32, _: f32, _: f32) {}
        fn uri_action(&mut self, _: Rect, _: &str) {}
        fn go_to_action(&mut self, _: Rect, _: PageIndex, _: f32) {}
        fn sticky_note(&mut self, _: Rect, _: &str) {}
        fn add_bookmark(&mut self, id: BookmarkId, _: &str, _: f32, _: Option<BookmarkId>) {
            self.0.push(format!("bookmark {}", id));
        }
    }

    #[test]
    fn invoke_forwards_captured_values() {
        let mut log = NameLog::default();
        let tasks = vec![
            DrawingTask::SaveGs,
            DrawingTask::SetFont {
                font: FontKey::new("Courier"),
                size: 9.0,
            },
            DrawingTask::DrawText {
                text: "hi".into(),
                x: 0.0,
                y: 0.0,
                encoding: "utf-8".into(),
                word_spacing: 0.0,
            },
            DrawingTask::SetLineDashingPattern(DashPattern::Solid),
            DrawingTask::Bookmark {
                id: BookmarkId::new("b"),
                title: "B".into(),
                top: 1.0,
                parent: None,
            },
            DrawingTask::RestoreGs,
        ];
        for task in tasks {
            task.invoke(&mut log).unwrap();
        }
        assert_eq!(
            log.0,
            vec!["save", "font Courier 9", "text hi", "dash [0.0]", "bookmark b", "restore"]
        );
    }

    #[test]
    fn invoke_surfaces_painter_errors() {
        let mut log = NameLog::default();
        assert_eq!(
            DrawingTask::RestoreGs.invoke(&mut log),
            Err("nothing saved".to_string())
        );
    }

    #[test]
    fn dash_patterns_normalize() {
        assert_eq!(DashPattern::Solid.normalized(), vec![0.0]);
        assert_eq!(DashPattern::Dotted.normalized(), vec![1.0, 2.0]);
        assert_eq!(DashPattern::Custom(vec![4.0, 1.0]).normalized(), vec![4.0, 1.0]);
    }
}
