//! Invocation wrapper.
//!
//! Runs a unit of work under an external profiler, then writes the
//! resulting statistics grid to an output channel. The work's return
//! value is handed back unchanged.

use super::models::ProfileConfig;
use super::report::{build_report, format_results, Report};
use crate::parser::schema::RawSample;
use anyhow::{Context, Result};
use log::debug;
use std::io::Write;
use std::time::Instant;

/// A profiler that collects call-graph samples between `start` and `finish`
pub trait SampleSource {
    /// Begin collection
    fn start(&mut self);

    /// End collection and return the samples gathered since `start`
    fn finish(&mut self) -> Vec<RawSample>;
}

/// Description of the wrapped call, used in the report heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Name of the wrapped callable
    pub name: String,

    /// Rendering of the arguments it was called with
    pub args: String,
}

impl CallSite {
    pub fn new(name: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
        }
    }
}

/// Profile a call and write its statistics grid to `out`
///
/// **Public** - main entry point for wrapping a unit of work
///
/// Nothing is written when no statistics survive filtering. The
/// report is returned alongside the call's own output so callers can
/// inspect warnings.
pub fn profile_call<S, W, F, R>(
    config: &ProfileConfig,
    source: &mut S,
    call_site: &CallSite,
    out: &mut W,
    work: F,
) -> Result<(R, Report)>
where
    S: SampleSource + ?Sized,
    W: Write,
    F: FnOnce() -> R,
{
    let start_time = Instant::now();

    source.start();
    let output = work();
    let samples = source.finish();

    debug!(
        "Profiled {}() in {:.3}s, {} samples collected",
        call_site.name,
        start_time.elapsed().as_secs_f64(),
        samples.len()
    );

    let report = build_report(&samples, config)
        .with_context(|| format!("Failed to build profile for {}()", call_site.name))?;

    if let Some(table) = &report.table {
        out.write_all(format_results(&call_site.name, &call_site.args, table).as_bytes())
            .context("Failed to write profiling results")?;
    }

    Ok((output, report))
}
