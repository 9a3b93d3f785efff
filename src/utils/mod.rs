//! Utility modules for configuration, error handling, and diagnostics.

pub mod config;
pub mod diagnostics;
pub mod error;

// Re-export commonly used types for convenience
pub use diagnostics::Warning;
pub use error::{ParseError, ProcessError, RenderError};
