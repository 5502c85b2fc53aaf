use crate::content::{self, literal, reals};
use crate::outline::write_outlines;
use log::{debug, warn};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use quire_layout::painting::FillMode;
use quire_render_core::{Backend, BackendError, OutlineNode};
use quire_types::{Color, FontKey, ImageKey, PageIndex, Rect, Size};
use std::collections::BTreeMap;

/// Fonts every PDF reader provides without embedding.
pub const STANDARD_FONTS: [&str; 14] = [
    "Courier",
    "Courier-Bold",
    "Courier-BoldOblique",
    "Courier-Oblique",
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-BoldOblique",
    "Helvetica-Oblique",
    "Symbol",
    "Times-Bold",
    "Times-BoldItalic",
    "Times-Italic",
    "Times-Roman",
    "ZapfDingbats",
];

const FALLBACK_FONT: &str = "Helvetica";

/// Text encodings that map onto WinAnsi without loss for Latin-1 input.
const ENCODINGS: [&str; 8] = [
    "utf-8",
    "utf8",
    "winansi",
    "win-ansi",
    "windows-1252",
    "cp1252",
    "iso-8859-1",
    "latin-1",
];

struct PageBuffer {
    id: ObjectId,
    size: Size,
    operations: Vec<Operation>,
    annotations: Vec<Dictionary>,
    /// One entry per open `q`; whether a font is selected in that frame.
    font_selected: Vec<bool>,
}

impl PageBuffer {
    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn font_selected(&self) -> bool {
        self.font_selected.last().copied().unwrap_or(false)
    }
}

struct ImageResource {
    name: String,
    id: ObjectId,
}

/// A [`Backend`] that builds a PDF document in memory.
///
/// Fonts are the Standard-14 set referenced by name; any other [`FontKey`]
/// falls back to Helvetica. Images must be registered as XObjects with
/// [`LopdfBackend::add_image`]; unknown images are drawn as a crossed frame.
pub struct LopdfBackend {
    document: Document,
    pages_id: ObjectId,
    pages: Vec<PageBuffer>,
    fonts: BTreeMap<FontKey, String>,
    alphas: Vec<(u32, String)>,
    images: BTreeMap<ImageKey, ImageResource>,
    outline_root: Option<ObjectId>,
    title: Option<String>,
}

impl Default for LopdfBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LopdfBackend {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            pages: Vec::new(),
            fonts: BTreeMap::new(),
            alphas: Vec::new(),
            images: BTreeMap::new(),
            outline_root: None,
            title: None,
        }
    }

    /// Sets the `/Title` of the document information dictionary.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Registers a complete image XObject stream under `key`.
    ///
    /// The image is scaled to fill the box given to `draw_image`.
    pub fn add_image(&mut self, key: ImageKey, stream: Stream) {
        let name = format!("Im{}", self.images.len() + 1);
        let id = self.document.add_object(stream);
        self.images.insert(key, ImageResource { name, id });
    }

    fn page(&mut self, page: PageIndex) -> Result<&mut PageBuffer, BackendError> {
        self.pages
            .get_mut(page.0)
            .ok_or_else(|| BackendError::new(format!("{} was never added", page)))
    }

    fn page_id(&self, page: PageIndex) -> Result<ObjectId, BackendError> {
        self.pages
            .get(page.0)
            .map(|buffer| buffer.id)
            .ok_or_else(|| BackendError::new(format!("{} was never added", page)))
    }

    fn font_resource(&mut self, font: &FontKey) -> String {
        let next = self.fonts.len() + 1;
        self.fonts
            .entry(font.clone())
            .or_insert_with(|| format!("F{}", next))
            .clone()
    }

    fn alpha_resource(&mut self, alpha: f32) -> String {
        let bits = alpha.to_bits();
        if let Some((_, name)) = self.alphas.iter().find(|(b, _)| *b == bits) {
            return name.clone();
        }
        let name = format!("GS{}", self.alphas.len() + 1);
        self.alphas.push((bits, name.clone()));
        name
    }

    fn annotate(&mut self, page: PageIndex, rect: Rect, mut annotation: Dictionary) -> Result<(), BackendError> {
        annotation.set("Type", "Annot");
        annotation.set("Rect", reals(&rect.corners()));
        self.page(page)?.annotations.push(annotation);
        Ok(())
    }

    fn resources(&mut self) -> Dictionary {
        let mut fonts = Dictionary::new();
        for (key, name) in &self.fonts {
            let base_font = if STANDARD_FONTS.contains(&key.as_str()) {
                key.as_str()
            } else {
                warn!("Font '{}' is not a standard PDF font, using {}.", key, FALLBACK_FONT);
                FALLBACK_FONT
            };
            let id = self.document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => base_font,
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(name.as_bytes(), id);
        }

        let mut states = Dictionary::new();
        for (bits, name) in &self.alphas {
            let alpha = f32::from_bits(*bits);
            states.set(
                name.as_bytes(),
                dictionary! { "Type" => "ExtGState", "CA" => alpha, "ca" => alpha },
            );
        }

        let mut images = Dictionary::new();
        for image in self.images.values() {
            images.set(image.name.as_bytes(), image.id);
        }

        let mut resources = dictionary! { "Font" => fonts };
        if !states.is_empty() {
            resources.set("ExtGState", states);
        }
        if !images.is_empty() {
            resources.set("XObject", images);
        }
        resources
    }
}

fn lopdf_error(context: &'static str) -> impl FnOnce(lopdf::Error) -> BackendError {
    move |source| BackendError::with_source(context, source)
}

impl Backend for LopdfBackend {
    type Output = Vec<u8>;

    fn add_page(&mut self, size: Size) -> Result<PageIndex, BackendError> {
        if size.width <= 0.0 || size.height <= 0.0 {
            return Err(BackendError::new(format!(
                "page size must be positive, got {}x{}",
                size.width, size.height
            )));
        }
        let id = self.document.new_object_id();
        self.pages.push(PageBuffer {
            id,
            size,
            operations: Vec::new(),
            annotations: Vec::new(),
            font_selected: vec![false],
        });
        Ok(PageIndex(self.pages.len() - 1))
    }

    fn save_gs(&mut self, page: PageIndex) -> Result<(), BackendError> {
        let buffer = self.page(page)?;
        let selected = buffer.font_selected();
        buffer.font_selected.push(selected);
        buffer.push("q", vec![]);
        Ok(())
    }

    fn restore_gs(&mut self, page: PageIndex) -> Result<(), BackendError> {
        let buffer = self.page(page)?;
        if buffer.font_selected.len() < 2 {
            return Err(BackendError::new(format!("Q without a matching q on {}", page)));
        }
        buffer.font_selected.pop();
        buffer.push("Q", vec![]);
        Ok(())
    }

    fn set_font(&mut self, page: PageIndex, font: &FontKey, size: f32) -> Result<(), BackendError> {
        self.page(page)?;
        let name = self.font_resource(font);
        let buffer = self.page(page)?;
        if let Some(selected) = buffer.font_selected.last_mut() {
            *selected = true;
        }
        buffer.push("Tf", vec![Object::Name(name.into_bytes()), size.into()]);
        Ok(())
    }

    fn set_fill_color(&mut self, page: PageIndex, color: &Color) -> Result<(), BackendError> {
        self.page(page)?.operations.push(content::fill_color(color));
        Ok(())
    }

    fn set_line_color(&mut self, page: PageIndex, color: &Color) -> Result<(), BackendError> {
        self.page(page)?.operations.push(content::stroke_color(color));
        Ok(())
    }

    fn set_line_width(&mut self, page: PageIndex, width: f32) -> Result<(), BackendError> {
        self.page(page)?.push("w", vec![width.into()]);
        Ok(())
    }

    fn set_line_dashing_pattern(&mut self, page: PageIndex, pattern: &[f32]) -> Result<(), BackendError> {
        self.page(page)?.operations.push(content::dash(pattern));
        Ok(())
    }

    fn set_alpha(&mut self, page: PageIndex, alpha: f32) -> Result<(), BackendError> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(BackendError::new(format!("alpha must be within 0..=1, got {}", alpha)));
        }
        self.page(page)?;
        let name = self.alpha_resource(alpha);
        self.page(page)?.push("gs", vec![Object::Name(name.into_bytes())]);
        Ok(())
    }

    fn clip_rectangle(&mut self, page: PageIndex, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), BackendError> {
        let buffer = self.page(page)?;
        buffer.operations.push(content::rectangle(x1, y1, x2, y2));
        buffer.push("W", vec![]);
        buffer.push("n", vec![]);
        Ok(())
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
        if !ENCODINGS.iter().any(|known| known.eq_ignore_ascii_case(encoding)) {
            return Err(BackendError::new(format!("unsupported text encoding '{}'", encoding)));
        }
        let buffer = self.page(page)?;
        if !buffer.font_selected() {
            return Err(BackendError::new(format!("drawText before setFont on {}", page)));
        }
        buffer.push("BT", vec![]);
        buffer.push("Tw", vec![word_spacing.into()]);
        buffer.push("Td", vec![x.into(), y.into()]);
        buffer.push("Tj", vec![literal(text)]);
        buffer.push("ET", vec![]);
        Ok(())
    }

    fn draw_line(&mut self, page: PageIndex, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), BackendError> {
        let buffer = self.page(page)?;
        buffer.push("m", vec![x1.into(), y1.into()]);
        buffer.push("l", vec![x2.into(), y2.into()]);
        buffer.push("S", vec![]);
        Ok(())
    }

    fn draw_polygon(&mut self, page: PageIndex, xs: &[f32], ys: &[f32], fill: FillMode) -> Result<(), BackendError> {
        if xs.len() != ys.len() {
            return Err(BackendError::new(format!(
                "polygon has {} x and {} y coordinates",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Ok(());
        }
        let buffer = self.page(page)?;
        buffer.operations.extend(content::polygon(xs, ys));
        buffer.operations.push(content::paint(fill));
        Ok(())
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
        let buffer = self.page(page)?;
        buffer
            .operations
            .extend(content::rounded_rectangle(x1, y1, x2, y2, radius));
        buffer.operations.push(content::paint(fill));
        Ok(())
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
        let (x, y) = (x1.min(x2), y1.min(y2));
        let (width, height) = ((x2 - x1).abs(), (y2 - y1).abs());
        let resource = self.images.get(image).map(|res| res.name.clone());
        let buffer = self.page(page)?;
        buffer.push("q", vec![]);
        match resource {
            Some(name) => {
                buffer.push("cm", reals(&[width, 0.0, 0.0, height, x, y]));
                buffer.push("Do", vec![Object::Name(name.into_bytes())]);
            }
            None => {
                warn!("Image '{}' is not registered, drawing a placeholder on {}.", image, page);
                buffer.push("RG", reals(&[0.6, 0.6, 0.6]));
                buffer.push("w", vec![0.5.into()]);
                buffer.operations.push(content::rectangle(x1, y1, x2, y2));
                buffer.push("S", vec![]);
                buffer.push("m", reals(&[x, y]));
                buffer.push("l", reals(&[x + width, y + height]));
                buffer.push("m", reals(&[x, y + height]));
                buffer.push("l", reals(&[x + width, y]));
                buffer.push("S", vec![]);
            }
        }
        buffer.push("Q", vec![]);
        Ok(())
    }

    fn attach_uri_action(&mut self, page: PageIndex, rect: Rect, uri: &str) -> Result<(), BackendError> {
        if uri.trim().is_empty() {
            return Err(BackendError::new("link target URI is empty"));
        }
        let annotation = dictionary! {
            "Subtype" => "Link",
            "Border" => vec![0.into(), 0.into(), 0.into()],
            "A" => dictionary! { "Type" => "Action", "S" => "URI", "URI" => literal(uri) },
        };
        self.annotate(page, rect, annotation)
    }

    fn attach_go_to_action(
        &mut self,
        page: PageIndex,
        rect: Rect,
        target: PageIndex,
        top: f32,
    ) -> Result<(), BackendError> {
        let target_id = self.page_id(target)?;
        let annotation = dictionary! {
            "Subtype" => "Link",
            "Border" => vec![0.into(), 0.into(), 0.into()],
            "Dest" => vec![Object::Reference(target_id), "FitH".into(), top.into()],
        };
        self.annotate(page, rect, annotation)
    }

    fn attach_sticky_note(&mut self, page: PageIndex, rect: Rect, text: &str) -> Result<(), BackendError> {
        let annotation = dictionary! {
            "Subtype" => "Text",
            "Name" => "Note",
            "Contents" => literal(text),
        };
        self.annotate(page, rect, annotation)
    }

    fn set_outlines(&mut self, outlines: &[OutlineNode]) -> Result<(), BackendError> {
        let page_ids: Vec<ObjectId> = self.pages.iter().map(|page| page.id).collect();
        self.outline_root = write_outlines(&mut self.document, &page_ids, outlines)?;
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>, BackendError> {
        let resources = self.resources();
        let resources_id = self.document.add_object(resources);

        let pages = std::mem::take(&mut self.pages);
        let mut kids = Vec::with_capacity(pages.len());
        for page in pages {
            let encoded = Content {
                operations: page.operations,
            }
            .encode()
            .map_err(lopdf_error("failed to encode a content stream"))?;
            let content_id = self.document.add_object(Stream::new(dictionary! {}, encoded));

            let mut page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "MediaBox" => vec![0.into(), 0.into(), page.size.width.into(), page.size.height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            };
            if !page.annotations.is_empty() {
                let annotations: Vec<Object> = page
                    .annotations
                    .into_iter()
                    .map(|annotation| Object::Reference(self.document.add_object(annotation)))
                    .collect();
                page_dict.set("Annots", annotations);
            }
            self.document.objects.insert(page.id, page_dict.into());
            kids.push(Object::Reference(page.id));
        }

        let count = kids.len();
        self.document.objects.insert(
            self.pages_id,
            dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => count as i64 }.into(),
        );

        let mut catalog = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        if let Some(outline_root) = self.outline_root {
            catalog.set("Outlines", outline_root);
            catalog.set("PageMode", "UseOutlines");
        }
        let catalog_id = self.document.add_object(catalog);
        self.document.trailer.set("Root", catalog_id);

        if let Some(title) = &self.title {
            let info_id = self.document.add_object(dictionary! {
                "Title" => literal(title),
                "Producer" => literal("quire"),
            });
            self.document.trailer.set("Info", info_id);
        }

        let mut bytes = Vec::new();
        self.document
            .save_to(&mut bytes)
            .map_err(|e| BackendError::with_source("failed to write the PDF", e))?;
        debug!("Wrote {} pages, {} bytes.", count, bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;
