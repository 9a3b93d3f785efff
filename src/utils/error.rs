//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading profiler samples
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid sample format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur while filtering and sorting statistics
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Invalid column '{name}': {reason}")]
    InvalidColumn { name: String, reason: String },

    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl ProcessError {
    pub(crate) fn invalid_column(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColumn {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while rendering a grid
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error(
        "Number of columns in table ({found}) does not match number of column widths ({expected})"
    )]
    ColumnCountMismatch { expected: usize, found: usize },

    #[error("Column {column} has a width of 0 but non-empty content")]
    ZeroWidthColumn { column: usize },
}
