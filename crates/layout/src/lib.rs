use quire_types::GeometryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Width {width:.2} is negative.")]
    NegativeWidth { width: f32 },
    #[error("Invalid boundary geometry: {0}")]
    Geometry(#[from] GeometryError),
    #[error("Expected widths for {expected} columns, got {got}.")]
    ColumnCountMismatch { expected: usize, got: usize },
    #[error("Node {0} does not exist in this tree.")]
    UnknownNode(tree::NodeId),
    #[error("Node #{0} is not reachable from any page.")]
    DetachedNode(usize),
    #[error("Node {node} mismatch: Expected {expected} node, got {found}.")]
    UnexpectedNodeKind {
        node: tree::NodeId,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Link target '{0}' does not name a node on any page.")]
    UnknownAnchor(String),
}

pub mod config;
pub mod engine;
pub mod nodes;
pub mod painting;
pub mod style;
pub mod text;
pub mod tree;

pub use self::config::{DecorationConfig, LayoutConfig};
pub use self::engine::LayoutEngine;
pub use self::painting::{DrawingTask, PageTasks, Painter, paint_tree};
pub use self::style::{Attributes, ResolvedAttributes, StyleMap};
pub use self::text::{FixedAdvanceMetrics, FontMetrics, Line, LineBreaker, LinePart};
pub use self::tree::{DocumentTree, NodeId, NodeKind, NodeMeta};

#[cfg(test)]
mod test_utils;
