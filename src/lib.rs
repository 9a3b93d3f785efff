//! Get Profile
//!
//! Turns call-graph profiling statistics into a readable,
//! column-aligned text grid.
//!
//! This crate provides the core implementation for the
//! `get-profile` CLI tool.
//!
//! ## Getting Started
//!
//! ```ignore
//! use get_profile::commands::{build_report, ProfileConfig};
//! use get_profile::parser::read_samples;
//!
//! let samples = read_samples("samples.json")?;
//! let report = build_report(&samples, &ProfileConfig::default().with_top_n(15))?;
//! if let Some(table) = report.table {
//!     println!("{}", table);
//! }
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
