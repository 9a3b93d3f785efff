//! Plain-text grid rendering.
//!
//! Turns a rectangular table of cells into a bordered, fixed-width
//! grid. Cells are lowered to strings first, then hard-wrapped to
//! their column width and laid out side by side:
//!
//! ```text
//! ==================
//! | name  | ncalls |
//! ==================
//! | main  | 1      |
//! ------------------
//! ```

use crate::utils::config::{HEADER_DIV_CHAR, ROW_DIV_CHAR, VERT_DIV_CHAR};
use crate::utils::error::RenderError;
use log::debug;
use std::fmt;

/// A single grid cell
///
/// The renderer only ever sees the display string of a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(u64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(value) => write!(f, "{}", value),
            // Whole floats keep a trailing ".0" so they read as timings
            Cell::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{:.1}", value)
            }
            Cell::Float(value) => write!(f, "{}", value),
            Cell::Text(text) => f.write_str(text),
        }
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// Rows of cells with an optional header row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    header: Option<Vec<Cell>>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { header: None, rows }
    }

    pub fn with_header(header: Vec<Cell>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            header: Some(header),
            rows,
        }
    }

    pub fn header(&self) -> Option<&[Cell]> {
        self.header.as_deref()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

/// Render a table as a bordered text grid
///
/// **Public** - main entry point for grid output
///
/// # Arguments
/// * `table` - Table to render, every row as wide as `max_col_widths`
/// * `max_col_widths` - Upper bound on each column's content width
///
/// # Errors
/// * `RenderError::ColumnCountMismatch` - a row's width differs from `max_col_widths`
/// * `RenderError::ZeroWidthColumn` - a column capped at 0 has content to show
///
/// The returned text has no trailing newline and every line has the
/// same length.
pub fn render_grid(table: &Table, max_col_widths: &[usize]) -> Result<String, RenderError> {
    let expected = max_col_widths.len();
    for row in table.header.iter().chain(table.rows.iter()) {
        if row.len() != expected {
            return Err(RenderError::ColumnCountMismatch {
                expected,
                found: row.len(),
            });
        }
    }

    let header = table.header.as_deref().map(lower_row);
    let rows: Vec<Vec<String>> = table.rows.iter().map(|row| lower_row(row)).collect();

    let col_widths = column_widths(header.iter().chain(rows.iter()), max_col_widths);
    check_zero_widths(header.iter().chain(rows.iter()), &col_widths)?;

    let grid_width = col_widths.iter().sum::<usize>() + 3 * expected.saturating_sub(1) + 4;
    debug!(
        "Rendering {} rows into a grid {} chars wide",
        rows.len(),
        grid_width
    );

    let mut grid = match &header {
        Some(header) => {
            let mut grid = divider(HEADER_DIV_CHAR, grid_width);
            push_row(&mut grid, header, &col_widths, HEADER_DIV_CHAR, grid_width);
            grid
        }
        None => divider(ROW_DIV_CHAR, grid_width),
    };

    for row in &rows {
        push_row(&mut grid, row, &col_widths, ROW_DIV_CHAR, grid_width);
    }

    Ok(grid)
}

fn lower_row(row: &[Cell]) -> Vec<String> {
    row.iter().map(Cell::to_string).collect()
}

/// Natural width of each column (longest cell, newlines included),
/// clamped to its cap
fn column_widths<'a>(
    rows: impl Iterator<Item = &'a Vec<String>>,
    max_col_widths: &[usize],
) -> Vec<usize> {
    let mut widths = vec![0; max_col_widths.len()];
    for row in rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    widths
        .into_iter()
        .zip(max_col_widths)
        .map(|(width, &max)| width.min(max))
        .collect()
}

fn check_zero_widths<'a>(
    mut rows: impl Iterator<Item = &'a Vec<String>>,
    col_widths: &[usize],
) -> Result<(), RenderError> {
    let offending = rows.find_map(|row| {
        row.iter()
            .zip(col_widths)
            .position(|(value, &width)| width == 0 && value.split('\n').any(|l| !l.is_empty()))
    });

    match offending {
        Some(column) => Err(RenderError::ZeroWidthColumn { column }),
        None => Ok(()),
    }
}

/// Split a cell on newlines, then cut each line into fixed-width chunks
///
/// Breaks may fall mid-word. An empty line still yields one empty chunk.
pub fn wrap_cell(value: &str, width: usize) -> Vec<String> {
    value
        .split('\n')
        .flat_map(|line| {
            let chars: Vec<char> = line.chars().collect();
            if chars.is_empty() || width == 0 {
                vec![String::new()]
            } else {
                chars
                    .chunks(width)
                    .map(|chunk| chunk.iter().collect())
                    .collect()
            }
        })
        .collect()
}

/// Append one table row (all of its wrapped sub-rows) and its divider
fn push_row(
    grid: &mut String,
    row: &[String],
    col_widths: &[usize],
    div_char: char,
    grid_width: usize,
) {
    let wrapped: Vec<Vec<String>> = row
        .iter()
        .zip(col_widths)
        .map(|(value, &width)| wrap_cell(value, width))
        .collect();

    // Shorter cells are padded with blank lines up to the tallest one
    let height = wrapped.iter().map(Vec::len).max().unwrap_or(0);

    for line in 0..height {
        grid.push('\n');
        grid.push(VERT_DIV_CHAR);
        for (cell, &width) in wrapped.iter().zip(col_widths) {
            let value = cell.get(line).map(String::as_str).unwrap_or("");
            grid.push_str(&format!(" {:<width$} {}", value, VERT_DIV_CHAR, width = width));
        }
    }

    grid.push('\n');
    grid.push_str(&divider(div_char, grid_width));
}

fn divider(div_char: char, grid_width: usize) -> String {
    div_char.to_string().repeat(grid_width)
}
