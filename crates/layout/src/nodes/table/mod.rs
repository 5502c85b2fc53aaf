use crate::LayoutError;
use crate::tree::{DocumentTree, NodeId, NodeKind};
use log::debug;

/// What the resize engine needs from a table cell.
///
/// Keeps [`resize_cell`] independent of how cells are stored.
pub trait ResizableCell {
    fn column(&self) -> usize;
    fn width(&self) -> f32;
    fn set_width(&mut self, width: f32) -> Result<(), LayoutError>;
    /// Widens the cell's own geometry and any nested structure by `delta`.
    fn resize(&mut self, delta: f32) -> Result<(), LayoutError>;
    fn translate(&mut self, dx: f32, dy: f32) -> Result<(), LayoutError>;
}

/// Gives `cell` the width `new_width`.
///
/// Nested structure is resized first unless `cascade` is false. Cells outside
/// the first column are then moved right by `translate_x`, the accumulated
/// width change of the columns before them.
pub fn resize_cell<C: ResizableCell + ?Sized>(
    cell: &mut C,
    new_width: f32,
    translate_x: f32,
    cascade: bool,
) -> Result<(), LayoutError> {
    if new_width < 0.0 {
        return Err(LayoutError::NegativeWidth { width: new_width });
    }
    let delta = new_width - cell.width();
    if cascade {
        cell.resize(delta)?;
    }
    cell.set_width(new_width)?;
    if cell.column() > 0 {
        cell.translate(translate_x, 0.0)?;
    }
    Ok(())
}

/// A table cell stored in a [`DocumentTree`].
pub struct CellHandle<'t> {
    tree: &'t mut DocumentTree,
    id: NodeId,
    column: usize,
    width: f32,
}

impl<'t> CellHandle<'t> {
    pub fn new(tree: &'t mut DocumentTree, id: NodeId) -> Result<Self, LayoutError> {
        let (column, width) = cell_info(tree, id)?;
        Ok(Self {
            tree,
            id,
            column,
            width,
        })
    }
}

impl ResizableCell for CellHandle<'_> {
    fn column(&self) -> usize {
        self.column
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn set_width(&mut self, width: f32) -> Result<(), LayoutError> {
        if let NodeKind::Cell { width: stored, .. } = &mut self.tree.node_mut(self.id)?.kind {
            *stored = width;
        }
        self.width = width;
        Ok(())
    }

    fn resize(&mut self, delta: f32) -> Result<(), LayoutError> {
        widen(self.tree, self.id, delta)?;
        for child in self.tree.children(self.id)? {
            if matches!(self.tree.kind(child)?, NodeKind::Table { prepared: true }) {
                distribute_delta(self.tree, child, delta)?;
            }
        }
        Ok(())
    }

    fn translate(&mut self, dx: f32, dy: f32) -> Result<(), LayoutError> {
        self.tree.translate_subtree(self.id, dx, dy)
    }
}

fn cell_info(tree: &DocumentTree, id: NodeId) -> Result<(usize, f32), LayoutError> {
    match tree.kind(id)? {
        NodeKind::Cell { column, width } => Ok((*column, *width)),
        other => Err(LayoutError::UnexpectedNodeKind {
            node: id,
            expected: "Cell",
            found: other.name(),
        }),
    }
}

/// Moves the right edge of a rectangular boundary.
fn widen(tree: &mut DocumentTree, id: NodeId, delta: f32) -> Result<(), LayoutError> {
    let boundary = &mut tree.node_mut(id)?.boundary;
    if boundary.len() == 4 {
        boundary.point_translate(1, delta, 0.0)?;
        boundary.point_translate(2, delta, 0.0)?;
    }
    Ok(())
}

/// Spreads `delta` over the columns of a nested table in proportion to their widths.
fn distribute_delta(tree: &mut DocumentTree, table: NodeId, delta: f32) -> Result<(), LayoutError> {
    let widths = column_widths(tree, table)?;
    if widths.is_empty() {
        return Ok(());
    }
    let total: f32 = widths.iter().sum();
    let count = widths.len() as f32;
    let new_widths: Vec<f32> = widths
        .iter()
        .map(|w| {
            if total > 0.0 {
                w + delta * w / total
            } else {
                w + delta / count
            }
        })
        .collect();
    resize_columns(tree, table, &new_widths)
}

pub fn rows(tree: &DocumentTree, table: NodeId) -> Result<Vec<NodeId>, LayoutError> {
    match tree.kind(table)? {
        NodeKind::Table { .. } => {}
        other => {
            return Err(LayoutError::UnexpectedNodeKind {
                node: table,
                expected: "Table",
                found: other.name(),
            });
        }
    }
    let mut rows = Vec::new();
    for child in tree.children(table)? {
        match tree.kind(child)? {
            NodeKind::Row => rows.push(child),
            other => {
                return Err(LayoutError::UnexpectedNodeKind {
                    node: child,
                    expected: "Row",
                    found: other.name(),
                });
            }
        }
    }
    Ok(rows)
}

/// Current width of every column: the widest cell in it.
pub fn column_widths(tree: &DocumentTree, table: NodeId) -> Result<Vec<f32>, LayoutError> {
    let mut widths: Vec<f32> = Vec::new();
    for row in rows(tree, table)? {
        for cell in tree.children(row)? {
            let (column, width) = cell_info(tree, cell)?;
            if widths.len() <= column {
                widths.resize(column + 1, 0.0);
            }
            widths[column] = widths[column].max(width);
        }
    }
    Ok(widths)
}

/// Resizes every cell to its column's entry in `widths`, shifting later
/// cells of each row by the accumulated change.
pub fn resize_columns(tree: &mut DocumentTree, table: NodeId, widths: &[f32]) -> Result<(), LayoutError> {
    let current = column_widths(tree, table)?;
    if current.len() != widths.len() {
        return Err(LayoutError::ColumnCountMismatch {
            expected: current.len(),
            got: widths.len(),
        });
    }

    let mut row_delta = 0.0;
    for row in rows(tree, table)? {
        let mut offset = 0.0;
        for cell in tree.children(row)? {
            let mut handle = CellHandle::new(tree, cell)?;
            let old = handle.width();
            let new = widths[handle.column()];
            resize_cell(&mut handle, new, offset, true)?;
            offset += new - old;
        }
        widen(tree, row, offset)?;
        row_delta = offset;
    }
    widen(tree, table, row_delta)?;
    debug!(
        "Table {} resized from {:?} to {:?}.",
        table, current, widths
    );
    Ok(())
}

/// Scales the columns of `table` proportionally so they add up to `target`.
pub fn fit_table_to_width(tree: &mut DocumentTree, table: NodeId, target: f32) -> Result<(), LayoutError> {
    if target < 0.0 {
        return Err(LayoutError::NegativeWidth { width: target });
    }
    let widths = column_widths(tree, table)?;
    if widths.is_empty() {
        return Ok(());
    }
    let total: f32 = widths.iter().sum();
    let count = widths.len() as f32;
    let scaled: Vec<f32> = widths
        .iter()
        .map(|w| if total > 0.0 { w * target / total } else { target / count })
        .collect();
    resize_columns(tree, table, &scaled)
}
