use super::task::{DashPattern, DrawingTask, FillMode};
use crate::style::{Attributes, BorderStyle};
use quire_types::Boundary;

/// Generates background and border tasks for a node's boundary.
///
/// Stateless; used by containers, tables, rows and cells. Each group is
/// wrapped in its own save/restore pair so nothing leaks into the content.
pub fn background_and_border_tasks(boundary: &Boundary, attributes: &Attributes, alpha: f32) -> Vec<DrawingTask> {
    let mut tasks = Vec::new();
    if boundary.is_empty() {
        return tasks;
    }
    let radius = attributes.border_radius.filter(|r| *r > 0.0);

    if let Some(background) = &attributes.background {
        tasks.push(DrawingTask::SaveGs);
        tasks.push(DrawingTask::SetFillColor(background.clone()));
        tasks.push(DrawingTask::SetAlpha(alpha));
        tasks.push(shape(boundary, radius, FillMode::Fill));
        tasks.push(DrawingTask::RestoreGs);
    }

    if let Some(border) = attributes.border.as_ref().filter(|b| b.width > 0.0) {
        tasks.push(DrawingTask::SaveGs);
        tasks.push(DrawingTask::SetLineColor(border.color.clone()));
        tasks.push(DrawingTask::SetLineWidth(border.width));
        tasks.push(DrawingTask::SetLineDashingPattern(dash_pattern(border.style)));
        tasks.push(DrawingTask::SetAlpha(alpha));
        tasks.push(shape(boundary, radius, FillMode::Stroke));
        tasks.push(DrawingTask::RestoreGs);
    }

    tasks
}

pub fn dash_pattern(style: BorderStyle) -> DashPattern {
    match style {
        BorderStyle::Solid => DashPattern::Solid,
        BorderStyle::Dotted => DashPattern::Dotted,
        BorderStyle::Dashed => DashPattern::Dashed,
    }
}

fn shape(boundary: &Boundary, radius: Option<f32>, fill: FillMode) -> DrawingTask {
    match radius {
        Some(radius) => DrawingTask::DrawRoundedRectangle {
            x1: boundary.min_x(),
            y1: boundary.min_y(),
            x2: boundary.max_x(),
            y2: boundary.max_y(),
            radius,
            fill,
        },
        None => DrawingTask::DrawPolygon {
            xs: boundary.points().iter().map(|p| p.x).collect(),
            ys: boundary.points().iter().map(|p| p.y).collect(),
            fill,
        },
    }
}
