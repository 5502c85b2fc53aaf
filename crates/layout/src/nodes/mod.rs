pub mod table;

pub use table::{
    CellHandle, ResizableCell, column_widths, fit_table_to_width, resize_cell, resize_columns,
};
