//! Arena-backed document tree.
//!
//! Nodes refer to each other through [`NodeId`] indices, so a line part can
//! point back at its text node and a cell at its table without owning them.

use crate::LayoutError;
use crate::style::Attributes;
use crate::text::Line;
use quire_types::{BookmarkId, Boundary, ImageKey, Size};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Page { size: Size },
    Container,
    Paragraph { lines: Vec<Line> },
    Text { content: String },
    Table { prepared: bool },
    Row,
    Cell { column: usize, width: f32 },
    Image { image: ImageKey, size: Size },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Page { .. } => "Page",
            NodeKind::Container => "Container",
            NodeKind::Paragraph { .. } => "Paragraph",
            NodeKind::Text { .. } => "Text",
            NodeKind::Table { .. } => "Table",
            NodeKind::Row => "Row",
            NodeKind::Cell { .. } => "Cell",
            NodeKind::Image { .. } => "Image",
        }
    }
}

/// Where a link annotation on a node points to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkTarget {
    Uri(String),
    /// The `id` of another node in the document.
    Anchor(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookmarkSpec {
    pub id: BookmarkId,
    pub title: String,
    #[serde(default)]
    pub parent: Option<BookmarkId>,
}

/// Non-style data attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeMeta {
    pub id: Option<String>,
    pub link: Option<LinkTarget>,
    pub bookmark: Option<BookmarkSpec>,
    pub note: Option<String>,
}

/// Position of a line part inside a laid-out paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePartRef {
    pub paragraph: NodeId,
    pub line: usize,
    pub part: usize,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub attributes: Attributes,
    pub meta: NodeMeta,
    pub boundary: Boundary,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    line_parts: Vec<LinePartRef>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl DocumentTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn add_root(&mut self, kind: NodeKind, attributes: Attributes) -> NodeId {
        let id = self.push(kind, attributes, None);
        self.roots.push(id);
        id
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        attributes: Attributes,
    ) -> Result<NodeId, LayoutError> {
        self.node(parent)?;
        let id = self.push(kind, attributes, Some(parent));
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    fn push(&mut self, kind: NodeKind, attributes: Attributes, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            attributes,
            meta: NodeMeta::default(),
            boundary: Boundary::new(),
            parent,
            children: Vec::new(),
            line_parts: Vec::new(),
        });
        id
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, LayoutError> {
        self.nodes.get(id.0).ok_or(LayoutError::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, LayoutError> {
        self.nodes.get_mut(id.0).ok_or(LayoutError::UnknownNode(id))
    }

    pub fn kind(&self, id: NodeId) -> Result<&NodeKind, LayoutError> {
        Ok(&self.node(id)?.kind)
    }

    /// Children of `id`, copied so the caller may mutate the tree while iterating.
    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>, LayoutError> {
        Ok(self.node(id)?.children.clone())
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, LayoutError> {
        Ok(self.node(id)?.parent)
    }

    /// Ancestors from the direct parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.nodes.get(id.0).and_then(|n| n.parent),
        }
    }

    /// The page a node is placed on.
    pub fn page_of(&self, id: NodeId) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|candidate| {
                self.nodes
                    .get(candidate.0)
                    .is_some_and(|node| matches!(node.kind, NodeKind::Page { .. }))
            })
    }

    /// Depth-first, parents-before-children order starting at `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current.0) else {
                continue;
            };
            order.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    pub fn find_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.meta.id.as_deref() == Some(element_id))
            .map(NodeId)
    }

    pub fn set_meta(&mut self, id: NodeId, meta: NodeMeta) -> Result<(), LayoutError> {
        self.node_mut(id)?.meta = meta;
        Ok(())
    }

    pub fn set_boundary(&mut self, id: NodeId, boundary: Boundary) -> Result<(), LayoutError> {
        self.node_mut(id)?.boundary = boundary;
        Ok(())
    }

    /// Records that a line part of `text` was placed at `location`.
    pub fn register_line_part(
        &mut self,
        text: NodeId,
        location: LinePartRef,
    ) -> Result<(), LayoutError> {
        self.node_mut(text)?.line_parts.push(location);
        Ok(())
    }

    /// Forgets earlier registrations before a paragraph is broken again.
    pub fn clear_line_parts(&mut self, text: NodeId) -> Result<(), LayoutError> {
        self.node_mut(text)?.line_parts.clear();
        Ok(())
    }

    pub fn line_parts_of(&self, text: NodeId) -> Result<&[LinePartRef], LayoutError> {
        Ok(&self.node(text)?.line_parts)
    }

    /// Number of distinct lines the text node appears on.
    pub fn text_line_count(&self, text: NodeId) -> Result<usize, LayoutError> {
        Ok(self.distinct_lines(text)?.len())
    }

    /// Summed height of the lines the text node appears on.
    pub fn text_height(&self, text: NodeId) -> Result<f32, LayoutError> {
        let mut height = 0.0;
        for (paragraph, line) in self.distinct_lines(text)? {
            let lines = self.lines(paragraph)?;
            if let Some(line) = lines.get(line) {
                height += line.height();
            }
        }
        Ok(height)
    }

    fn distinct_lines(&self, text: NodeId) -> Result<Vec<(NodeId, usize)>, LayoutError> {
        let mut seen: Vec<(NodeId, usize)> = Vec::new();
        for part in self.line_parts_of(text)? {
            let key = (part.paragraph, part.line);
            if !seen.contains(&key) {
                seen.push(key);
            }
        }
        Ok(seen)
    }

    pub fn lines(&self, paragraph: NodeId) -> Result<&[Line], LayoutError> {
        match &self.node(paragraph)?.kind {
            NodeKind::Paragraph { lines } => Ok(lines),
            other => Err(LayoutError::UnexpectedNodeKind {
                node: paragraph,
                expected: "Paragraph",
                found: other.name(),
            }),
        }
    }

    pub fn set_lines(&mut self, paragraph: NodeId, new_lines: Vec<Line>) -> Result<(), LayoutError> {
        match &mut self.node_mut(paragraph)?.kind {
            NodeKind::Paragraph { lines } => {
                *lines = new_lines;
                Ok(())
            }
            other => Err(LayoutError::UnexpectedNodeKind {
                node: paragraph,
                expected: "Paragraph",
                found: other.name(),
            }),
        }
    }

    /// Shifts a node and everything below it, including laid-out lines.
    pub fn translate_subtree(&mut self, id: NodeId, dx: f32, dy: f32) -> Result<(), LayoutError> {
        self.node(id)?;
        for current in self.descendants(id) {
            let node = &mut self.nodes[current.0];
            node.boundary.translate(dx, dy);
            if let NodeKind::Paragraph { lines } = &mut node.kind {
                for line in lines {
                    line.translate(dx, dy);
                }
            }
        }
        Ok(())
    }
}

pub struct Ancestors<'a> {
    tree: &'a DocumentTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.nodes.get(current.0).and_then(|n| n.parent);
        Some(current)
    }
}
