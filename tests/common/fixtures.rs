use serde_json::{Value, json};

pub fn document(pages: Vec<Value>) -> Value {
    json!({ "pages": pages })
}

/// A 400x600 page with a 20pt padding box: content starts at (20, 580)
/// and is 360 wide.
pub fn page(children: Vec<Value>) -> Value {
    json!({
        "size": { "width": 400.0, "height": 600.0 },
        "attributes": { "padding": 20.0 },
        "children": children
    })
}

pub fn single_page(children: Vec<Value>) -> Value {
    document(vec![page(children)])
}

pub fn text(content: &str) -> Value {
    json!({ "type": "Text", "content": content })
}

pub fn styled_text(content: &str, attributes: Value) -> Value {
    json!({ "type": "Text", "content": content, "attributes": attributes })
}

pub fn paragraph(children: Vec<Value>) -> Value {
    json!({ "type": "Paragraph", "children": children })
}

pub fn styled_paragraph(attributes: Value, children: Vec<Value>) -> Value {
    json!({ "type": "Paragraph", "attributes": attributes, "children": children })
}

/// A paragraph with `meta` (id, link, bookmark or note) on the paragraph node.
pub fn paragraph_with_meta(meta: Value, content: &str) -> Value {
    json!({ "type": "Paragraph", "meta": meta, "children": [text(content)] })
}

pub fn container(attributes: Value, children: Vec<Value>) -> Value {
    json!({ "type": "Container", "attributes": attributes, "children": children })
}

pub fn table(attributes: Value, rows: Vec<Value>) -> Value {
    json!({ "type": "Table", "attributes": attributes, "rows": rows })
}

pub fn row(cells: Vec<Value>) -> Value {
    json!({ "cells": cells })
}

pub fn cell(attributes: Value, children: Vec<Value>) -> Value {
    json!({ "attributes": attributes, "children": children })
}

pub fn text_cell(content: &str) -> Value {
    cell(json!({}), vec![paragraph(vec![text(content)])])
}
