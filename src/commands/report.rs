//! Report pipeline.
//!
//! The report:
//! 1. Processes raw samples into a statistics table
//! 2. Computes column caps from the output width
//! 3. Renders the table as a text grid

use super::models::ProfileConfig;
use crate::aggregator::process;
use crate::output::{compute_column_widths, render_grid};
use crate::parser::schema::RawSample;
use crate::utils::config::MAX_TOP_N;
use crate::utils::diagnostics::Warning;
use anyhow::{Context, Result};
use log::debug;

/// Outcome of one report
#[derive(Debug, Clone)]
pub struct Report {
    /// Rendered grid, or None when no statistics survived filtering
    pub table: Option<String>,

    /// Number of data rows in the grid
    pub rows: usize,

    pub warnings: Vec<Warning>,
}

/// Build a report from one snapshot of samples
///
/// **Public** - main entry point for the processing and rendering pipeline
///
/// # Errors
/// * Invalid configuration (unknown column, bad exclusion pattern)
/// * Column count disagreement between processing and rendering
pub fn build_report(samples: &[RawSample], config: &ProfileConfig) -> Result<Report> {
    let options = config
        .to_options()
        .context("Invalid profile configuration")?;

    debug!("Step 1/3: Processing {} samples...", samples.len());
    let stats = process(samples, &options).context("Failed to process profiling statistics")?;
    let mut warnings = stats.warnings.clone();

    if stats.is_empty() {
        debug!("No statistics above the threshold, nothing to render");
        return Ok(Report {
            table: None,
            rows: 0,
            warnings,
        });
    }

    debug!("Step 2/3: Computing column widths...");
    let widths = compute_column_widths(config.output_width, config.include_callees);
    warnings.extend(widths.warning);

    debug!("Step 3/3: Rendering {} rows...", stats.len());
    let table = render_grid(&stats.to_table(), &widths.widths)
        .context("Failed to render statistics grid")?;

    Ok(Report {
        table: Some(table),
        rows: stats.len(),
        warnings,
    })
}

/// Heading and grid as written by the invocation wrapper
pub fn format_results(name: &str, args: &str, table: &str) -> String {
    format!(
        "\nProfiling results for \"{}()\" called with {}:\n\n{}\n",
        name, args, table
    )
}

/// Validate a profile configuration
///
/// **Public** - can be called before profiling for early validation
pub fn validate_config(config: &ProfileConfig) -> Result<()> {
    if config.top_n == 0 {
        anyhow::bail!("top_n must be greater than 0");
    }

    if config.top_n > MAX_TOP_N {
        anyhow::bail!("top_n is too large (max {})", MAX_TOP_N);
    }

    if !config.min_val.is_finite() {
        anyhow::bail!("min_val must be a finite number");
    }

    config
        .to_options()
        .context("Invalid profile configuration")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::CodeIdentity;

    fn samples() -> Vec<RawSample> {
        vec![
            RawSample::new(CodeIdentity::code("slow", 5, "/app/slow.py"), 1, 2.0, 2.0),
            RawSample::new(CodeIdentity::code("fast", 9, "/app/fast.py"), 4, 0.5, 0.5),
        ]
    }

    #[test]
    fn test_build_report_renders_rows() {
        let report = build_report(&samples(), &ProfileConfig::default()).unwrap();
        assert_eq!(report.rows, 2);
        let table = report.table.unwrap();
        assert!(table.contains("CALLABLE: slow"));
        assert!(table.contains("tottime -r"));
    }

    #[test]
    fn test_build_report_empty() {
        let report = build_report(&[], &ProfileConfig::default()).unwrap();
        assert!(report.table.is_none());
        assert_eq!(report.rows, 0);
    }

    #[test]
    fn test_build_report_collects_width_warning() {
        let config = ProfileConfig::default().with_output_width(20);
        let report = build_report(&samples(), &config).unwrap();
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::WidthTooNarrow { minimum: 73, .. })));
    }

    #[test]
    fn test_build_report_unknown_column() {
        let config = ProfileConfig::default().with_sort_by("cumtime");
        assert!(build_report(&samples(), &config).is_err());
    }

    #[test]
    fn test_format_results() {
        let text = format_results("work", "args (1,) and kwargs {}", "GRID");
        assert_eq!(
            text,
            "\nProfiling results for \"work()\" called with args (1,) and kwargs {}:\n\nGRID\n"
        );
    }

    #[test]
    fn test_validate_config() {
        assert!(validate_config(&ProfileConfig::default()).is_ok());
        assert!(validate_config(&ProfileConfig::default().with_top_n(0)).is_err());
        assert!(validate_config(&ProfileConfig::default().with_top_n(MAX_TOP_N + 1)).is_err());
        assert!(validate_config(&ProfileConfig::default().with_min("tottime", f64::NAN)).is_err());
        assert!(validate_config(&ProfileConfig::default().with_exclude_pattern("[")).is_err());
    }
}
