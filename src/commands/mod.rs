//! Report commands.
//!
//! Commands orchestrate parsing, processing and rendering to perform
//! user tasks.

pub mod models;
pub mod report;
pub mod wrap;

// Re-export main command functions
pub use models::ProfileConfig;
pub use report::{build_report, format_results, validate_config, Report};
pub use wrap::{profile_call, CallSite, SampleSource};
