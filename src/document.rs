//! The JSON document model and its conversion into a [`DocumentTree`].
//!
//! ```json
//! {
//!   "pages": [{
//!     "size": { "width": 595.0, "height": 842.0 },
//!     "attributes": { "padding": 36.0 },
//!     "children": [
//!       { "type": "Paragraph", "children": [{ "type": "Text", "content": "Hello" }] }
//!     ]
//!   }]
//! }
//! ```

use crate::error::PipelineError;
use quire_layout::{Attributes, DocumentTree, NodeId, NodeKind, NodeMeta};
use quire_types::{ImageKey, Size};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentSpec {
    #[serde(default)]
    pub pages: Vec<PageSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageSpec {
    #[serde(default = "Size::a4")]
    pub size: Size,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub meta: NodeMeta,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

/// A block-level element.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ElementSpec {
    Container {
        #[serde(default)]
        attributes: Attributes,
        #[serde(default)]
        meta: NodeMeta,
        #[serde(default)]
        children: Vec<ElementSpec>,
    },
    Paragraph {
        #[serde(default)]
        attributes: Attributes,
        #[serde(default)]
        meta: NodeMeta,
        #[serde(default)]
        children: Vec<InlineSpec>,
    },
    Table {
        #[serde(default)]
        attributes: Attributes,
        #[serde(default)]
        meta: NodeMeta,
        #[serde(default)]
        rows: Vec<RowSpec>,
    },
    Image {
        image: ImageKey,
        width: f32,
        height: f32,
        #[serde(default)]
        attributes: Attributes,
        #[serde(default)]
        meta: NodeMeta,
    },
}

/// A run of text inside a paragraph.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum InlineSpec {
    Text {
        content: String,
        #[serde(default)]
        attributes: Attributes,
        #[serde(default)]
        meta: NodeMeta,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowSpec {
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub cells: Vec<CellSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CellSpec {
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub meta: NodeMeta,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

impl DocumentSpec {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Builds the node tree: one root per page, children in document order.
    pub fn build_tree(&self) -> Result<DocumentTree, PipelineError> {
        if self.pages.is_empty() {
            return Err(PipelineError::Document("the document has no pages".into()));
        }
        let mut tree = DocumentTree::new();
        for page in &self.pages {
            if page.size.width <= 0.0 || page.size.height <= 0.0 {
                return Err(PipelineError::Document(format!(
                    "page size must be positive, got {}x{}",
                    page.size.width, page.size.height
                )));
            }
            let root = tree.add_root(NodeKind::Page { size: page.size }, page.attributes.clone());
            tree.set_meta(root, page.meta.clone())?;
            for child in &page.children {
                child.build(&mut tree, root)?;
            }
        }
        Ok(tree)
    }
}

impl ElementSpec {
    fn build(&self, tree: &mut DocumentTree, parent: NodeId) -> Result<NodeId, PipelineError> {
        let id = match self {
            ElementSpec::Container {
                attributes,
                meta,
                children,
            } => {
                let id = add(tree, parent, NodeKind::Container, attributes, meta)?;
                for child in children {
                    child.build(tree, id)?;
                }
                id
            }
            ElementSpec::Paragraph {
                attributes,
                meta,
                children,
            } => {
                let kind = NodeKind::Paragraph { lines: Vec::new() };
                let id = add(tree, parent, kind, attributes, meta)?;
                for InlineSpec::Text {
                    content,
                    attributes,
                    meta,
                } in children
                {
                    let kind = NodeKind::Text {
                        content: content.clone(),
                    };
                    add(tree, id, kind, attributes, meta)?;
                }
                id
            }
            ElementSpec::Table {
                attributes,
                meta,
                rows,
            } => {
                let kind = NodeKind::Table { prepared: false };
                let id = add(tree, parent, kind, attributes, meta)?;
                for row in rows {
                    let row_id = add(tree, id, NodeKind::Row, &row.attributes, &NodeMeta::default())?;
                    for (column, cell) in row.cells.iter().enumerate() {
                        let kind = NodeKind::Cell { column, width: 0.0 };
                        let cell_id = add(tree, row_id, kind, &cell.attributes, &cell.meta)?;
                        for child in &cell.children {
                            child.build(tree, cell_id)?;
                        }
                    }
                }
                id
            }
            ElementSpec::Image {
                image,
                width,
                height,
                attributes,
                meta,
            } => {
                if *width < 0.0 || *height < 0.0 {
                    return Err(PipelineError::Document(format!(
                        "image '{}' has a negative size",
                        image
                    )));
                }
                let kind = NodeKind::Image {
                    image: image.clone(),
                    size: Size::new(*width, *height),
                };
                add(tree, parent, kind, attributes, meta)?
            }
        };
        Ok(id)
    }
}

fn add(
    tree: &mut DocumentTree,
    parent: NodeId,
    kind: NodeKind,
    attributes: &Attributes,
    meta: &NodeMeta,
) -> Result<NodeId, PipelineError> {
    let id = tree.add_child(parent, kind, attributes.clone())?;
    if *meta != NodeMeta::default() {
        tree.set_meta(id, meta.clone())?;
    }
    Ok(id)
}
