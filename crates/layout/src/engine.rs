//! Vertical block flow over a [`DocumentTree`].
//!
//! Every page lays its children out top to bottom inside its padding box.
//! Tables are handled in two phases: column widths are settled first (with
//! nested tables prepared before their hosts, so a resize of the outer table
//! reaches them), then content is placed row by row.

use crate::LayoutError;
use crate::config::LayoutConfig;
use crate::nodes::table::{self, fit_table_to_width};
use crate::style::StyleMap;
use crate::text::LineBreaker;
use crate::tree::{DocumentTree, NodeId, NodeKind};
use log::{debug, warn};
use quire_types::{Boundary, Point};

pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Assigns a boundary to every node and returns the resolved attributes
    /// used along the way, for painting.
    pub fn layout(&self, tree: &mut DocumentTree) -> Result<StyleMap, LayoutError> {
        let styles = StyleMap::resolve(tree, &self.config)?;
        for root in tree.roots().to_vec() {
            self.layout_page(tree, &styles, root)?;
        }
        debug!("Laid out {} pages ({} nodes).", tree.roots().len(), tree.len());
        Ok(styles)
    }

    fn layout_page(&self, tree: &mut DocumentTree, styles: &StyleMap, page: NodeId) -> Result<(), LayoutError> {
        let size = match tree.kind(page)? {
            NodeKind::Page { size } => *size,
            other => {
                return Err(LayoutError::UnexpectedNodeKind {
                    node: page,
                    expected: "Page",
                    found: other.name(),
                });
            }
        };
        tree.set_boundary(page, Boundary::rectangle(Point::new(0.0, size.height), size.width, size.height))?;

        let padding = tree.node(page)?.attributes.padding.unwrap_or(0.0);
        let content_width = size.width - 2.0 * padding;
        let start = Point::new(padding, size.height - padding);
        let used = self.layout_children(tree, styles, page, start, content_width)?;

        let available = size.height - 2.0 * padding;
        if used > available {
            warn!(
                "Content of {} is {:.2} high but the page only has {:.2}; it will be cut off.",
                page, used, available
            );
        }
        Ok(())
    }

    fn layout_children(
        &self,
        tree: &mut DocumentTree,
        styles: &StyleMap,
        parent: NodeId,
        start: Point,
        width: f32,
    ) -> Result<f32, LayoutError> {
        let mut y = start.y;
        for child in tree.children(parent)? {
            y -= self.layout_block(tree, styles, child, Point::new(start.x, y), width)?;
        }
        Ok(start.y - y)
    }

    /// Lays out one block at `origin` (top-left) and returns the vertical
    /// space it consumes, including its bottom margin.
    fn layout_block(
        &self,
        tree: &mut DocumentTree,
        styles: &StyleMap,
        id: NodeId,
        origin: Point,
        available_width: f32,
    ) -> Result<f32, LayoutError> {
        let attributes = tree.node(id)?.attributes.clone();
        let width = attributes.width.unwrap_or(available_width);
        if width < 0.0 {
            return Err(LayoutError::NegativeWidth { width });
        }

        let height = match tree.kind(id)? {
            NodeKind::Container => {
                let padding = attributes.padding.unwrap_or(0.0);
                let inner = Point::new(origin.x + padding, origin.y - padding);
                let content = self.layout_children(tree, styles, id, inner, width - 2.0 * padding)?;
                let height = attributes.height.unwrap_or(content + 2.0 * padding);
                tree.set_boundary(id, Boundary::rectangle(origin, width, height))?;
                height
            }
            NodeKind::Paragraph { .. } => {
                let breaker = LineBreaker::new(styles, &self.config.metrics);
                breaker.break_paragraph(tree, id, origin, width)?
            }
            NodeKind::Image { size, .. } => {
                let size = *size;
                tree.set_boundary(id, Boundary::rectangle(origin, size.width, size.height))?;
                size.height
            }
            NodeKind::Table { .. } => self.layout_table(tree, styles, id, origin, width)?,
            other => {
                return Err(LayoutError::UnexpectedNodeKind {
                    node: id,
                    expected: "block",
                    found: other.name(),
                });
            }
        };
        Ok(height + attributes.margin_bottom.unwrap_or(0.0))
    }

    /// Settles the column widths of `table` and of every table nested in it.
    ///
    /// Cells get provisional boundaries relative to `origin` so the resize
    /// engine has geometry to work with.
    pub fn prepare_table(
        &self,
        tree: &mut DocumentTree,
        table: NodeId,
        origin: Point,
        available_width: f32,
    ) -> Result<(), LayoutError> {
        let rows = table::rows(tree, table)?;
        let table_width = tree.node(table)?.attributes.width;
        let budget = table_width.unwrap_or(available_width);

        let mut column_count = 0;
        let mut declared: Vec<Option<f32>> = Vec::new();
        for &row in &rows {
            let cells = tree.children(row)?;
            column_count = column_count.max(cells.len());
            declared.resize(column_count, None);
            for (column, cell) in cells.into_iter().enumerate() {
                if let Some(width) = tree.node(cell)?.attributes.width {
                    declared[column] = Some(declared[column].map_or(width, |w: f32| w.max(width)));
                }
            }
        }

        let fixed: f32 = declared.iter().flatten().sum();
        let auto_count = declared.iter().filter(|w| w.is_none()).count();
        let share = if auto_count > 0 {
            (budget - fixed).max(0.0) / auto_count as f32
        } else {
            0.0
        };
        let widths: Vec<f32> = declared.iter().map(|w| w.unwrap_or(share)).collect();
        let total: f32 = widths.iter().sum();

        let y = origin.y;
        for &row in &rows {
            let mut x = origin.x;
            for (column, cell) in tree.children(row)?.into_iter().enumerate() {
                let width = widths[column];
                let node = tree.node_mut(cell)?;
                match &mut node.kind {
                    NodeKind::Cell { column: c, width: w } => {
                        *c = column;
                        *w = width;
                    }
                    other => {
                        return Err(LayoutError::UnexpectedNodeKind {
                            node: cell,
                            expected: "Cell",
                            found: other.name(),
                        });
                    }
                }
                node.boundary = Boundary::rectangle(Point::new(x, y), width, 0.0);

                let padding = node.attributes.padding.unwrap_or(0.0);
                for child in tree.children(cell)? {
                    if matches!(tree.kind(child)?, NodeKind::Table { .. }) {
                        let inner = Point::new(x + padding, y - padding);
                        self.prepare_table(tree, child, inner, width - 2.0 * padding)?;
                    }
                }
                x += width;
            }
            tree.set_boundary(row, Boundary::rectangle(Point::new(origin.x, y), total, 0.0))?;
        }
        tree.set_boundary(table, Boundary::rectangle(origin, total, 0.0))?;
        if let NodeKind::Table { prepared } = &mut tree.node_mut(table)?.kind {
            *prepared = true;
        }

        if let Some(target) = table_width {
            fit_table_to_width(tree, table, target)?;
        }
        debug!("Prepared {} with {} columns.", table, column_count);
        Ok(())
    }

    fn layout_table(
        &self,
        tree: &mut DocumentTree,
        styles: &StyleMap,
        table: NodeId,
        origin: Point,
        available_width: f32,
    ) -> Result<f32, LayoutError> {
        if !matches!(tree.kind(table)?, NodeKind::Table { prepared: true }) {
            self.prepare_table(tree, table, origin, available_width)?;
        }

        let mut y = origin.y;
        let mut table_width: f32 = 0.0;
        for row in table::rows(tree, table)? {
            let mut x = origin.x;
            let mut row_height: f32 = 0.0;
            let mut placed = Vec::new();
            for cell in tree.children(row)? {
                let (width, padding, min_height) = {
                    let node = tree.node(cell)?;
                    let width = match node.kind {
                        NodeKind::Cell { width, .. } => width,
                        _ => node.boundary.width(),
                    };
                    (width, node.attributes.padding.unwrap_or(0.0), node.attributes.height)
                };
                let inner = Point::new(x + padding, y - padding);
                let content = self.layout_children(tree, styles, cell, inner, width - 2.0 * padding)?;
                let height = (content + 2.0 * padding).max(min_height.unwrap_or(0.0));
                row_height = row_height.max(height);
                placed.push((cell, x, width));
                x += width;
            }
            for (cell, cx, width) in placed {
                tree.set_boundary(cell, Boundary::rectangle(Point::new(cx, y), width, row_height))?;
            }
            let row_width = x - origin.x;
            tree.set_boundary(row, Boundary::rectangle(Point::new(origin.x, y), row_width, row_height))?;
            table_width = table_width.max(row_width);
            y -= row_height;
        }

        let height = origin.y - y;
        tree.set_boundary(table, Boundary::rectangle(origin, table_width, height))?;
        Ok(height)
    }
}
