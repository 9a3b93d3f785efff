//! Profiler sample ingestion and schema definitions.
//!
//! This module handles:
//! - The call-graph sample schema handed over by a profiler
//! - Parsing sample documents from JSON
//! - Validating sample invariants

pub mod samples;
pub mod schema;

// Re-export main types
pub use samples::{parse_samples, read_samples, validate_samples};
pub use schema::{CalleeStat, CodeIdentity, RawSample};
