use crate::error::BackendError;
use crate::outline::OutlineNode;
use quire_layout::painting::FillMode;
use quire_types::{Color, FontKey, ImageKey, PageIndex, Rect, Size};

/// The drawing primitives an output format has to provide.
///
/// Coordinates are in page space with the origin at the lower-left corner.
/// Every call names the page it targets; pages are created with
/// [`Backend::add_page`] before anything is drawn on them.
pub trait Backend {
    type Output;

    fn add_page(&mut self, size: Size) -> Result<PageIndex, BackendError>;

    fn save_gs(&mut self, page: PageIndex) -> Result<(), BackendError>;
    fn restore_gs(&mut self, page: PageIndex) -> Result<(), BackendError>;

    fn set_font(&mut self, page: PageIndex, font: &FontKey, size: f32) -> Result<(), BackendError>;
    fn set_fill_color(&mut self, page: PageIndex, color: &Color) -> Result<(), BackendError>;
    fn set_line_color(&mut self, page: PageIndex, color: &Color) -> Result<(), BackendError>;
    fn set_line_width(&mut self, page: PageIndex, width: f32) -> Result<(), BackendError>;
    fn set_line_dashing_pattern(&mut self, page: PageIndex, pattern: &[f32]) -> Result<(), BackendError>;
    fn set_alpha(&mut self, page: PageIndex, alpha: f32) -> Result<(), BackendError>;

    fn clip_rectangle(&mut self, page: PageIndex, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), BackendError>;
    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        page: PageIndex,
        text: &str,
        x: f32,
        y: f32,
        encoding: &str,
        word_spacing: f32,
    ) -> Result<(), BackendError>;
    fn draw_line(&mut self, page: PageIndex, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), BackendError>;
    fn draw_polygon(&mut self, page: PageIndex, xs: &[f32], ys: &[f32], fill: FillMode) -> Result<(), BackendError>;
    #[allow(clippy::too_many_arguments)]
    fn draw_rounded_rectangle(
        &mut self,
        page: PageIndex,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        radius: f32,
        fill: FillMode,
    ) -> Result<(), BackendError>;
    #[allow(clippy::too_many_arguments)]
    fn draw_image(
        &mut self,
        page: PageIndex,
        image: &ImageKey,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    ) -> Result<(), BackendError>;

    fn attach_uri_action(&mut self, page: PageIndex, rect: Rect, uri: &str) -> Result<(), BackendError>;
    fn attach_go_to_action(
        &mut self,
        page: PageIndex,
        rect: Rect,
        target: PageIndex,
        top: f32,
    ) -> Result<(), BackendError>;
    fn attach_sticky_note(&mut self, page: PageIndex, rect: Rect, text: &str) -> Result<(), BackendError>;

    /// Installs the resolved outline. Called at most once, before `finish`.
    fn set_outlines(&mut self, outlines: &[OutlineNode]) -> Result<(), BackendError>;

    fn finish(self) -> Result<Self::Output, BackendError>;
}
