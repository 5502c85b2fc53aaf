use super::*;
use quire_render_core::{Engine, RenderError};
use quire_types::BookmarkId;

fn load(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("generated PDF should parse")
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).expect("dangling reference"),
        other => other,
    }
}

fn dict<'a>(doc: &'a Document, object: &'a Object) -> &'a Dictionary {
    match resolve(doc, object) {
        Object::Dictionary(dict) => dict,
        other => panic!("expected a dictionary, got {other:?}"),
    }
}

fn name(object: &Object) -> &[u8] {
    match object {
        Object::Name(name) => name,
        other => panic!("expected a name, got {other:?}"),
    }
}

/// Integral reals are written without a fraction and read back as integers.
fn number(object: &Object) -> f32 {
    match object {
        Object::Integer(v) => *v as f32,
        Object::Real(v) => *v,
        other => panic!("expected a number, got {other:?}"),
    }
}

fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

fn operators(doc: &Document, page: ObjectId) -> Vec<String> {
    let data = doc.get_page_content(page).expect("page content");
    Content::decode(&data)
        .expect("content stream should decode")
        .operations
        .into_iter()
        .map(|op| op.operator)
        .collect()
}

fn catalog(doc: &Document) -> &Dictionary {
    let root = doc.trailer.get(b"Root").expect("trailer has a root");
    dict(doc, root)
}

fn page_dict(doc: &Document, page: ObjectId) -> &Dictionary {
    doc.get_dictionary(page).expect("page dictionary")
}

fn annotations(doc: &Document, page: ObjectId) -> Vec<&Dictionary> {
    match page_dict(doc, page).get(b"Annots") {
        Ok(Object::Array(items)) => items.iter().map(|item| dict(doc, item)).collect(),
        _ => Vec::new(),
    }
}

fn helvetica() -> FontKey {
    FontKey::new("Helvetica")
}

#[test]
fn pages_keep_their_size() {
    let mut backend = LopdfBackend::new();
    backend.add_page(Size::a4()).unwrap();
    backend.add_page(Size::new(300.0, 200.0)).unwrap();
    let doc = load(&backend.finish().unwrap());

    let pages = page_ids(&doc);
    assert_eq!(pages.len(), 2);
    match page_dict(&doc, pages[1]).get(b"MediaBox").unwrap() {
        Object::Array(values) => {
            assert_eq!(values.len(), 4);
            assert_eq!(number(&values[2]), 300.0);
        }
        other => panic!("unexpected media box {other:?}"),
    }
}

#[test]
fn rejects_empty_pages_and_unknown_page_indices() {
    let mut backend = LopdfBackend::new();
    assert!(backend.add_page(Size::zero()).is_err());
    assert!(backend.save_gs(PageIndex(0)).is_err());
}

#[test]
fn text_is_written_inside_a_text_object() {
    let mut backend = LopdfBackend::new();
    let page = backend.add_page(Size::a4()).unwrap();
    backend.save_gs(page).unwrap();
    backend.set_font(page, &helvetica(), 12.0).unwrap();
    backend.set_fill_color(page, &Color::rgb(255, 0, 0)).unwrap();
    backend.draw_text(page, "Hello", 72.0, 700.0, "utf-8", 2.0).unwrap();
    backend.restore_gs(page).unwrap();
    let doc = load(&backend.finish().unwrap());

    let pages = page_ids(&doc);
    assert_eq!(
        operators(&doc, pages[0]),
        vec!["q", "Tf", "rg", "BT", "Tw", "Td", "Tj", "ET", "Q"]
    );
    let data = doc.get_page_content(pages[0]).unwrap();
    let shown = Content::decode(&data)
        .unwrap()
        .operations
        .into_iter()
        .find(|op| op.operator == "Tj")
        .map(|op| op.operands);
    assert!(matches!(shown.as_deref(), Some([Object::String(text, _)]) if text == b"Hello"));
}

#[test]
fn typographic_punctuation_survives_the_round_trip() {
    let mut backend = LopdfBackend::new();
    let page = backend.add_page(Size::a4()).unwrap();
    backend.set_font(page, &helvetica(), 12.0).unwrap();
    backend.draw_text(page, "it’s €5 — done", 72.0, 700.0, "utf-8", 0.0).unwrap();
    let doc = load(&backend.finish().unwrap());

    let data = doc.get_page_content(page_ids(&doc)[0]).unwrap();
    let shown = Content::decode(&data)
        .unwrap()
        .operations
        .into_iter()
        .find(|op| op.operator == "Tj")
        .map(|op| op.operands);
    assert!(matches!(
        shown.as_deref(),
        Some([Object::String(text, _)]) if text == b"it\x92s \x805 \x97 done"
    ));
}

#[test]
fn text_needs_a_font_in_the_current_frame() {
    let mut backend = LopdfBackend::new();
    let page = backend.add_page(Size::a4()).unwrap();
    let err = backend.draw_text(page, "x", 0.0, 0.0, "utf-8", 0.0).unwrap_err();
    assert!(err.message().contains("setFont"));

    // A font chosen inside a saved frame is gone after the restore.
    backend.save_gs(page).unwrap();
    backend.set_font(page, &helvetica(), 10.0).unwrap();
    backend.draw_text(page, "x", 0.0, 0.0, "utf-8", 0.0).unwrap();
    backend.restore_gs(page).unwrap();
    assert!(backend.draw_text(page, "x", 0.0, 0.0, "utf-8", 0.0).is_err());
}

#[test]
fn unknown_encodings_are_rejected() {
    let mut backend = LopdfBackend::new();
    let page = backend.add_page(Size::a4()).unwrap();
    backend.set_font(page, &helvetica(), 10.0).unwrap();
    let err = backend.draw_text(page, "x", 0.0, 0.0, "shift-jis", 0.0).unwrap_err();
    assert!(err.message().contains("shift-jis"));
    assert!(backend.draw_text(page, "x", 0.0, 0.0, "Latin-1", 0.0).is_ok());
}

#[test]
fn unbalanced_restore_is_an_error() {
    let mut backend = LopdfBackend::new();
    let page = backend.add_page(Size::a4()).unwrap();
    assert!(backend.restore_gs(page).is_err());
}

#[test]
fn fonts_are_shared_resources_with_fallback() {
    let mut backend = LopdfBackend::new();
    let page = backend.add_page(Size::a4()).unwrap();
    backend.set_font(page, &helvetica(), 10.0).unwrap();
    backend.set_font(page, &FontKey::new("Times-Bold"), 10.0).unwrap();
    backend.set_font(page, &helvetica(), 14.0).unwrap();
    backend.set_font(page, &FontKey::new("Comic Sans"), 9.0).unwrap();
    let doc = load(&backend.finish().unwrap());

    let pages = page_ids(&doc);
    let resources = dict(&doc, page_dict(&doc, pages[0]).get(b"Resources").unwrap());
    let fonts = dict(&doc, resources.get(b"Font").unwrap());
    assert_eq!(fonts.len(), 3);
    let base = |key: &[u8]| name(dict(&doc, fonts.get(key).unwrap()).get(b"BaseFont").unwrap()).to_vec();
    assert_eq!(base(b"F1"), b"Helvetica".to_vec());
    assert_eq!(base(b"F2"), b"Times-Bold".to_vec());
    assert_eq!(base(b"F3"), b"Helvetica".to_vec());
}

#[test]
fn equal_alphas_share_one_graphics_state() {
    let mut backend = LopdfBackend::new();
    let first = backend.add_page(Size::a4()).unwrap();
    let second = backend.add_page(Size::a4()).unwrap();
    backend.set_alpha(first, 0.5).unwrap();
    backend.set_alpha(second, 0.5).unwrap();
    backend.set_alpha(second, 0.25).unwrap();
    assert!(backend.set_alpha(second, 1.5).is_err());
    let doc = load(&backend.finish().unwrap());

    let pages = page_ids(&doc);
    let resources = dict(&doc, page_dict(&doc, pages[0]).get(b"Resources").unwrap());
    let states = dict(&doc, resources.get(b"ExtGState").unwrap());
    assert_eq!(states.len(), 2);
    let half = dict(&doc, states.get(b"GS1").unwrap());
    assert_eq!(number(half.get(b"ca").unwrap()), 0.5);
    assert_eq!(operators(&doc, pages[1]), vec!["gs", "gs"]);
}

#[test]
fn shapes_become_paths() {
    let mut backend = LopdfBackend::new();
    let page = backend.add_page(Size::a4()).unwrap();
    backend.clip_rectangle(page, 0.0, 0.0, 100.0, 100.0).unwrap();
    backend.set_line_dashing_pattern(page, &[0.0]).unwrap();
    backend.draw_line(page, 0.0, 0.0, 10.0, 0.0).unwrap();
    backend
        .draw_polygon(page, &[0.0, 10.0, 10.0], &[0.0, 0.0, 10.0], FillMode::Fill)
        .unwrap();
    backend
        .draw_rounded_rectangle(page, 0.0, 0.0, 50.0, 20.0, 0.0, FillMode::FillAndStroke)
        .unwrap();
    let doc = load(&backend.finish().unwrap());

    let pages = page_ids(&doc);
    assert_eq!(
        operators(&doc, pages[0]),
        vec!["re", "W", "n", "d", "m", "l", "S", "m", "l", "l", "h", "f", "re", "B"]
    );
}

#[test]
fn polygon_coordinates_must_pair_up() {
    let mut backend = LopdfBackend::new();
    let page = backend.add_page(Size::a4()).unwrap();
    assert!(backend.draw_polygon(page, &[0.0, 1.0], &[0.0], FillMode::Stroke).is_err());
}

#[test]
fn registered_images_are_painted_and_unknown_ones_get_a_placeholder() {
    let mut backend = LopdfBackend::new();
    let stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => 1,
            "Height" => 1,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
        },
        vec![0],
    );
    backend.add_image(ImageKey::new("logo"), stream);
    let page = backend.add_page(Size::a4()).unwrap();
    backend.draw_image(page, &ImageKey::new("logo"), 10.0, 10.0, 60.0, 40.0).unwrap();
    backend.draw_image(page, &ImageKey::new("missing"), 10.0, 10.0, 60.0, 40.0).unwrap();
    let doc = load(&backend.finish().unwrap());

    let ops = operators(&doc, page_ids(&doc)[0]);
    assert_eq!(&ops[..4], &["q", "cm", "Do", "Q"]);
    assert!(!ops[4..].contains(&"Do".to_string()));
    assert_eq!(ops.last().map(String::as_str), Some("Q"));
}

#[test]
fn links_and_notes_become_annotations() {
    let mut backend = LopdfBackend::new();
    let first = backend.add_page(Size::a4()).unwrap();
    let second = backend.add_page(Size::a4()).unwrap();
    let rect = Rect::new(10.0, 10.0, 100.0, 12.0);
    backend.attach_uri_action(first, rect, "https://example.com").unwrap();
    backend.attach_go_to_action(first, rect, second, 600.0).unwrap();
    backend.attach_sticky_note(second, rect, "remember").unwrap();
    let doc = load(&backend.finish().unwrap());

    let pages = page_ids(&doc);
    let on_first = annotations(&doc, pages[0]);
    assert_eq!(on_first.len(), 2);
    let action = dict(&doc, on_first[0].get(b"A").unwrap());
    assert_eq!(name(action.get(b"S").unwrap()), b"URI");
    match on_first[1].get(b"Dest").unwrap() {
        Object::Array(dest) => {
            assert!(matches!(dest[0], Object::Reference(id) if id == pages[1]));
            assert_eq!(name(&dest[1]), b"FitH");
        }
        other => panic!("unexpected destination {other:?}"),
    }

    let on_second = annotations(&doc, pages[1]);
    assert_eq!(on_second.len(), 1);
    assert_eq!(name(on_second[0].get(b"Subtype").unwrap()), b"Text");
}

#[test]
fn go_to_actions_need_an_existing_target() {
    let mut backend = LopdfBackend::new();
    let page = backend.add_page(Size::a4()).unwrap();
    let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
    assert!(backend.attach_go_to_action(page, rect, PageIndex(4), 0.0).is_err());
    assert!(backend.attach_uri_action(page, rect, "  ").is_err());
}

#[test]
fn engine_commit_writes_an_outline() -> Result<(), RenderError> {
    let mut engine = Engine::new(LopdfBackend::new().with_title("Report"));
    let first = engine.add_page(Size::a4())?;
    let second = engine.add_page(Size::a4())?;
    let ctx = engine.page_mut(first)?;
    ctx.add_bookmark(BookmarkId::new("intro"), "Intro", 800.0, None);
    ctx.add_bookmark(BookmarkId::new("scope"), "Scope", 500.0, Some(BookmarkId::new("intro")));
    engine
        .page_mut(second)?
        .add_bookmark(BookmarkId::new("end"), "End", 700.0, None);
    let doc = load(&engine.commit()?);

    let catalog = catalog(&doc);
    assert_eq!(name(catalog.get(b"PageMode").unwrap()), b"UseOutlines");
    let outlines = dict(&doc, catalog.get(b"Outlines").unwrap());
    assert!(matches!(outlines.get(b"Count").unwrap(), Object::Integer(3)));

    let intro = dict(&doc, outlines.get(b"First").unwrap());
    assert!(matches!(intro.get(b"Title").unwrap(), Object::String(t, _) if t == b"Intro"));
    assert!(matches!(intro.get(b"Count").unwrap(), Object::Integer(-1)));
    let scope = dict(&doc, intro.get(b"First").unwrap());
    assert!(matches!(scope.get(b"Title").unwrap(), Object::String(t, _) if t == b"Scope"));
    let end = dict(&doc, intro.get(b"Next").unwrap());
    match end.get(b"Dest").unwrap() {
        Object::Array(dest) => {
            assert!(matches!(dest[0], Object::Reference(id) if id == page_ids(&doc)[1]));
            assert_eq!(number(&dest[2]), 700.0);
        }
        other => panic!("unexpected destination {other:?}"),
    }

    let info = dict(&doc, doc.trailer.get(b"Info").unwrap());
    assert!(matches!(info.get(b"Title").unwrap(), Object::String(t, _) if t == b"Report"));
    Ok(())
}

#[test]
fn documents_without_bookmarks_have_no_outline() {
    let mut backend = LopdfBackend::new();
    backend.add_page(Size::a4()).unwrap();
    backend.set_outlines(&[]).unwrap();
    let doc = load(&backend.finish().unwrap());
    assert!(catalog(&doc).get(b"Outlines").is_err());
}
