//! Text output for statistics tables.
//!
//! This module handles:
//! - Width policy (splitting an output width between columns)
//! - Grid rendering (bordered, wrapped plain text)

pub mod grid;
pub mod widths;

// Re-export main types and functions
pub use grid::{render_grid, wrap_cell, Cell, Table};
pub use widths::{compute_column_widths, min_output_width, ColumnWidths};
