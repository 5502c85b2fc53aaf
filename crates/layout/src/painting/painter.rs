use super::box_painter::background_and_border_tasks;
use super::task::DrawingTask;
use crate::LayoutError;
use crate::config::LayoutConfig;
use crate::style::StyleMap;
use crate::tree::{DocumentTree, LinkTarget, NodeId, NodeKind};
use log::debug;
use quire_types::{PageIndex, Size};

/// The drawing tasks of one page, in tree order.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTasks {
    pub page: PageIndex,
    pub size: Size,
    pub tasks: Vec<DrawingTask>,
}

/// Requests the drawing tasks of every node of a laid-out tree.
pub fn paint_tree(
    tree: &DocumentTree,
    styles: &StyleMap,
    config: &LayoutConfig,
) -> Result<Vec<PageTasks>, LayoutError> {
    let mut pages = Vec::with_capacity(tree.roots().len());
    for (index, &root) in tree.roots().iter().enumerate() {
        let size = match tree.kind(root)? {
            NodeKind::Page { size } => *size,
            other => {
                return Err(LayoutError::UnexpectedNodeKind {
                    node: root,
                    expected: "Page",
                    found: other.name(),
                });
            }
        };
        let mut painter = TreePainter {
            tree,
            styles,
            config,
            tasks: Vec::new(),
        };
        painter.paint(root)?;
        debug!("Page {} produced {} drawing tasks.", index + 1, painter.tasks.len());
        pages.push(PageTasks {
            page: PageIndex(index),
            size,
            tasks: painter.tasks,
        });
    }
    Ok(pages)
}

struct TreePainter<'a> {
    tree: &'a DocumentTree,
    styles: &'a StyleMap,
    config: &'a LayoutConfig,
    tasks: Vec<DrawingTask>,
}

impl TreePainter<'_> {
    fn paint(&mut self, id: NodeId) -> Result<(), LayoutError> {
        let node = self.tree.node(id)?;
        let alpha = self.styles.get(id)?.alpha;

        if matches!(
            node.kind,
            NodeKind::Container | NodeKind::Table { .. } | NodeKind::Row | NodeKind::Cell { .. }
        ) {
            self.tasks
                .extend(background_and_border_tasks(&node.boundary, &node.attributes, alpha));
        }

        let clip = node.attributes.clip && !node.boundary.is_empty();
        if clip {
            self.tasks.push(DrawingTask::SaveGs);
            self.tasks.push(DrawingTask::ClipRectangle {
                x1: node.boundary.min_x(),
                y1: node.boundary.min_y(),
                x2: node.boundary.max_x(),
                y2: node.boundary.max_y(),
            });
        }

        match &node.kind {
            NodeKind::Paragraph { lines } => {
                for line in lines {
                    for part in line.parts() {
                        self.tasks
                            .extend(part.drawing_tasks(line, self.styles, self.config)?);
                    }
                }
            }
            NodeKind::Image { image, .. } => {
                self.tasks.push(DrawingTask::SaveGs);
                self.tasks.push(DrawingTask::SetAlpha(alpha));
                self.tasks.push(DrawingTask::DrawImage {
                    image: image.clone(),
                    x1: node.boundary.min_x(),
                    y1: node.boundary.min_y(),
                    x2: node.boundary.max_x(),
                    y2: node.boundary.max_y(),
                });
                self.tasks.push(DrawingTask::RestoreGs);
            }
            _ => {}
        }

        for child in node.children() {
            self.paint(*child)?;
        }

        if clip {
            self.tasks.push(DrawingTask::RestoreGs);
        }
        self.annotations(id)
    }

    fn annotations(&mut self, id: NodeId) -> Result<(), LayoutError> {
        let node = self.tree.node(id)?;
        if node.boundary.is_empty() {
            return Ok(());
        }
        let rect = node.boundary.bounding_rect();

        match &node.meta.link {
            Some(LinkTarget::Uri(uri)) => self.tasks.push(DrawingTask::UriAction {
                rect,
                uri: uri.clone(),
            }),
            Some(LinkTarget::Anchor(anchor)) => {
                let target = self
                    .tree
                    .find_by_id(anchor)
                    .ok_or_else(|| LayoutError::UnknownAnchor(anchor.clone()))?;
                let page = self
                    .tree
                    .page_of(target)
                    .and_then(|page| self.tree.roots().iter().position(|root| *root == page))
                    .ok_or_else(|| LayoutError::UnknownAnchor(anchor.clone()))?;
                self.tasks.push(DrawingTask::GoToAction {
                    rect,
                    target: PageIndex(page),
                    top: self.tree.node(target)?.boundary.max_y(),
                });
            }
            None => {}
        }

        if let Some(note) = &node.meta.note {
            self.tasks.push(DrawingTask::StickyNote {
                rect,
                text: note.clone(),
            });
        }

        if let Some(bookmark) = &node.meta.bookmark {
            self.tasks.push(DrawingTask::Bookmark {
                id: bookmark.id.clone(),
                title: bookmark.title.clone(),
                top: node.boundary.max_y(),
                parent: bookmark.parent.clone(),
            });
        }
        Ok(())
    }
}
