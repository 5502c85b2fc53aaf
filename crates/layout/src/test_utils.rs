use crate::config::LayoutConfig;
use crate::style::{Attributes, StyleMap, TextDecoration};
use crate::text::{Line, LinePart};
use crate::tree::{DocumentTree, LinePartRef, NodeId, NodeKind};
use quire_types::{Point, Size};

pub const PAGE_HEIGHT: f32 = 500.0;

pub fn text_attributes(font_size: f32, line_height: f32, decoration: TextDecoration) -> Attributes {
    Attributes {
        font_size: Some(font_size),
        line_height: Some(line_height),
        text_decoration: Some(decoration),
        ..Default::default()
    }
}

/// A single page holding one paragraph with one text node per entry of `texts`.
pub fn paragraph_tree(
    paragraph: Attributes,
    texts: Vec<(&str, Attributes)>,
) -> (DocumentTree, NodeId, NodeId, Vec<NodeId>) {
    let mut tree = DocumentTree::new();
    let page = tree.add_root(
        NodeKind::Page {
            size: Size::new(300.0, PAGE_HEIGHT),
        },
        Attributes::default(),
    );
    let paragraph = tree
        .add_child(page, NodeKind::Paragraph { lines: Vec::new() }, paragraph)
        .unwrap();
    let texts = texts
        .into_iter()
        .map(|(content, attributes)| {
            tree.add_child(
                paragraph,
                NodeKind::Text {
                    content: content.to_string(),
                },
                attributes,
            )
            .unwrap()
        })
        .collect();
    (tree, page, paragraph, texts)
}

pub struct LinePartFixture {
    pub tree: DocumentTree,
    pub styles: StyleMap,
    pub line: Line,
    pub part: LinePart,
    pub text: NodeId,
    pub location: LinePartRef,
}

/// A line part of three words, 40pt wide, 5pt into a line whose top-left
/// corner is at (10, 100) and whose height matches the text's line height.
pub fn line_part_fixture(
    font_size: f32,
    line_height: f32,
    decoration: TextDecoration,
    word_spacing: Option<f32>,
) -> LinePartFixture {
    let (mut tree, _, paragraph, texts) = paragraph_tree(
        Attributes::default(),
        vec![("Lorem ipsum dolor", text_attributes(font_size, line_height, decoration))],
    );
    let text = texts[0];
    let styles = StyleMap::resolve(&tree, &LayoutConfig::default()).unwrap();
    let location = LinePartRef {
        paragraph,
        line: 0,
        part: 0,
    };
    let mut part = LinePart::new("Lorem ipsum dolor", 40.0, 5.0, text, &mut tree, location).unwrap();
    part.set_word_spacing(word_spacing);
    let mut line = Line::new(Point::new(10.0, 100.0));
    line.set_height(line_height);
    LinePartFixture {
        tree,
        styles,
        line,
        part,
        text,
        location,
    }
}
