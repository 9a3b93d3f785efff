//! Processing of raw profiler samples into a statistics table.
//!
//! This module turns a call-graph snapshot into:
//! - Derived per-call timings and multi-line labels
//! - A sorted, thresholded and truncated row set
//! - A grid-ready table

pub mod columns;
pub mod filter;
pub mod processor;

// Re-export main types and functions
pub use columns::Column;
pub use filter::PathFilter;
pub use processor::{process, round_to, ProcessOptions, StatRow, StatsTable};
