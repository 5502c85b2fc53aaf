use crate::error::RenderError;
use quire_types::{BookmarkId, PageIndex};
use std::collections::HashMap;

/// A registered bookmark, before the outline is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub id: BookmarkId,
    pub title: String,
    pub page: PageIndex,
    pub top: f32,
    pub parent: Option<BookmarkId>,
}

/// A resolved outline item with its children in registration order.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineNode {
    pub id: BookmarkId,
    pub title: String,
    pub page: PageIndex,
    pub top: f32,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Number of items in this subtree, this one included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::count).sum::<usize>()
    }
}

/// Collects bookmarks in any order and turns them into a forest.
///
/// Entries may name a parent that is registered later; parents are only
/// looked up in [`OutlineBuilder::resolve`].
#[derive(Debug, Clone, Default)]
pub struct OutlineBuilder {
    entries: Vec<OutlineEntry>,
}

impl OutlineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bookmark(
        &mut self,
        id: BookmarkId,
        title: impl Into<String>,
        page: PageIndex,
        top: f32,
        parent: Option<BookmarkId>,
    ) {
        self.entries.push(OutlineEntry {
            id,
            title: title.into(),
            page,
            top,
            parent,
        });
    }

    pub fn entries(&self) -> &[OutlineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the forest. Roots and siblings keep registration order.
    ///
    /// Fails on duplicate ids, on a parent that was never registered, and on
    /// entries that are their own ancestors.
    pub fn resolve(self) -> Result<Vec<OutlineNode>, RenderError> {
        let mut index: HashMap<&BookmarkId, usize> = HashMap::with_capacity(self.entries.len());
        for (i, entry) in self.entries.iter().enumerate() {
            if index.insert(&entry.id, i).is_some() {
                return Err(RenderError::Configuration(format!(
                    "bookmark '{}' is registered more than once",
                    entry.id
                )));
            }
        }

        let mut roots = Vec::new();
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); self.entries.len()];
        for (i, entry) in self.entries.iter().enumerate() {
            match &entry.parent {
                None => roots.push(i),
                Some(parent) => {
                    let parent_index = index.get(parent).copied().ok_or_else(|| {
                        RenderError::Configuration(format!(
                            "bookmark '{}' refers to unknown parent '{}'",
                            entry.id, parent
                        ))
                    })?;
                    children[parent_index].push(i);
                }
            }
        }

        let mut placed = 0;
        let forest: Vec<OutlineNode> = roots
            .iter()
            .map(|&root| self.build(root, &children, &mut placed))
            .collect();
        if placed != self.entries.len() {
            return Err(RenderError::Configuration(format!(
                "{} bookmarks form a parent cycle and cannot be reached from any root",
                self.entries.len() - placed
            )));
        }
        Ok(forest)
    }

    fn build(&self, at: usize, children: &[Vec<usize>], placed: &mut usize) -> OutlineNode {
        *placed += 1;
        let entry = &self.entries[at];
        OutlineNode {
            id: entry.id.clone(),
            title: entry.title.clone(),
            page: entry.page,
            top: entry.top,
            children: children[at]
                .iter()
                .map(|&child| self.build(child, children, placed))
                .collect(),
        }
    }
}
