use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

pub fn page_ids(doc: &LopdfDocument) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

pub fn resolve<'a>(doc: &'a LopdfDocument, object: &'a Object) -> Option<&'a Dictionary> {
    match object {
        Object::Reference(id) => doc.get_object(*id).ok().and_then(|obj| obj.as_dict().ok()),
        other => other.as_dict().ok(),
    }
}

pub fn number(object: &Object) -> f32 {
    match object {
        Object::Integer(v) => *v as f32,
        Object::Real(v) => *v,
        other => panic!("expected a number, got {other:?}"),
    }
}

/// The decoded content stream of one page.
pub fn content(doc: &LopdfDocument, page: ObjectId) -> Content {
    let data = doc.get_page_content(page).expect("page content");
    Content::decode(&data).expect("content stream should decode")
}

pub fn operators(doc: &LopdfDocument, page: ObjectId) -> Vec<String> {
    content(doc, page).operations.into_iter().map(|op| op.operator).collect()
}

/// Every string shown with `Tj`, page by page.
pub fn shown_text(doc: &LopdfDocument) -> Vec<String> {
    let mut shown = Vec::new();
    for page in page_ids(doc) {
        for op in content(doc, page).operations {
            if op.operator == "Tj" {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    shown.push(String::from_utf8_lossy(bytes).to_string());
                }
            }
        }
    }
    shown
}

/// Shown strings of one page with the position given by the preceding `Td`.
pub fn positioned_text(doc: &LopdfDocument, page: ObjectId) -> Vec<(String, f32, f32)> {
    let mut positioned = Vec::new();
    let mut at = (0.0, 0.0);
    for op in content(doc, page).operations {
        match op.operator.as_str() {
            "Td" => at = (number(&op.operands[0]), number(&op.operands[1])),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    positioned.push((String::from_utf8_lossy(bytes).to_string(), at.0, at.1));
                }
            }
            _ => {}
        }
    }
    positioned
}

/// Word spacing (`Tw`) of every text object on the page.
pub fn word_spacings(doc: &LopdfDocument, page: ObjectId) -> Vec<f32> {
    content(doc, page)
        .operations
        .into_iter()
        .filter(|op| op.operator == "Tw")
        .map(|op| number(&op.operands[0]))
        .collect()
}

pub fn annotations<'a>(doc: &'a LopdfDocument, page: ObjectId) -> Vec<&'a Dictionary> {
    let Ok(page_dict) = doc.get_dictionary(page) else {
        return Vec::new();
    };
    match page_dict.get(b"Annots") {
        Ok(Object::Array(items)) => items.iter().filter_map(|item| resolve(doc, item)).collect(),
        _ => Vec::new(),
    }
}

pub fn count_uri_links(doc: &LopdfDocument) -> usize {
    page_ids(doc)
        .into_iter()
        .flat_map(|page| annotations(doc, page))
        .filter(|annot| annot.get(b"A").is_ok())
        .count()
}

/// Targets of internal links as (page object, top offset).
pub fn internal_link_targets(doc: &LopdfDocument) -> Vec<(ObjectId, f32)> {
    let mut targets = Vec::new();
    for page in page_ids(doc) {
        for annot in annotations(doc, page) {
            if let Ok(Object::Array(dest)) = annot.get(b"Dest") {
                if let (Some(Object::Reference(id)), Some(top)) = (dest.first(), dest.get(2)) {
                    targets.push((*id, number(top)));
                }
            }
        }
    }
    targets
}

/// Outline titles in depth-first order, indented by two spaces per level.
pub fn outline_titles(doc: &LopdfDocument) -> Vec<String> {
    fn walk<'a>(doc: &'a LopdfDocument, first: Option<&'a Dictionary>, depth: usize, out: &mut Vec<String>) {
        let mut current = first;
        while let Some(item) = current {
            if let Ok(Object::String(title, _)) = item.get(b"Title") {
                out.push(format!("{}{}", "  ".repeat(depth), String::from_utf8_lossy(title)));
            }
            walk(doc, item.get(b"First").ok().and_then(|f| resolve(doc, f)), depth + 1, out);
            current = item.get(b"Next").ok().and_then(|n| resolve(doc, n));
        }
    }

    let mut titles = Vec::new();
    let outlines = doc
        .trailer
        .get(b"Root")
        .ok()
        .and_then(|root| resolve(doc, root))
        .and_then(|catalog| catalog.get(b"Outlines").ok())
        .and_then(|outlines| resolve(doc, outlines));
    if let Some(outlines) = outlines {
        let first = outlines.get(b"First").ok().and_then(|f| resolve(doc, f));
        walk(doc, first, 0, &mut titles);
    }
    titles
}
