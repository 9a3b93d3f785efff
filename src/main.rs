//! Get Profile CLI
//!
//! Renders call-graph profiling statistics as a readable text grid.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use get_profile::aggregator::Column;
use get_profile::commands::{build_report, format_results, validate_config, ProfileConfig};
use get_profile::output::compute_column_widths;
use get_profile::parser::read_samples;
use get_profile::utils::config::{
    DEFAULT_EXCLUDE_PATTERN, DEFAULT_MIN_COL, DEFAULT_MIN_VAL, DEFAULT_OUTPUT_WIDTH,
    DEFAULT_SORT_BY, DEFAULT_TOP_N,
};

/// Get Profile - readable call-graph profiling statistics
#[derive(Parser, Debug)]
#[command(name = "get-profile")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a sample document as a statistics grid
    Render {
        /// Path to the JSON sample document
        #[arg(short, long)]
        input: PathBuf,

        /// Name shown in the results heading
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        tunables: Tunables,
    },

    /// Print the column width caps for an output width
    Widths {
        /// Total width of the grid, in characters
        #[arg(long, env = "GET_PROFILE_OUTPUT_WIDTH", default_value_t = DEFAULT_OUTPUT_WIDTH)]
        output_width: usize,

        /// Leave out the callee column
        #[arg(long)]
        no_callees: bool,
    },

    /// List the column names accepted by --sort-by and --min-col
    Columns,

    /// Display version information
    Version,
}

/// Processing and layout options shared with the library's ProfileConfig
#[derive(Args, Debug)]
struct Tunables {
    /// Number of rows to show
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// Hide callables from the runtime and installed packages
    #[arg(long)]
    only_my_functions: bool,

    /// Column to sort on, descending
    #[arg(long, default_value = DEFAULT_SORT_BY)]
    sort_by: String,

    /// Column compared against --min-val
    #[arg(long, default_value = DEFAULT_MIN_COL)]
    min_col: String,

    /// Keep rows strictly above this value on --min-col
    #[arg(long, default_value_t = DEFAULT_MIN_VAL)]
    min_val: f64,

    /// Total width of the grid, in characters
    #[arg(long, env = "GET_PROFILE_OUTPUT_WIDTH", default_value_t = DEFAULT_OUTPUT_WIDTH)]
    output_width: usize,

    /// Leave out the callee column
    #[arg(long)]
    no_callees: bool,

    /// Regex matched against source paths by --only-my-functions
    #[arg(long, default_value = DEFAULT_EXCLUDE_PATTERN)]
    exclude_pattern: String,
}

impl From<Tunables> for ProfileConfig {
    fn from(tunables: Tunables) -> Self {
        ProfileConfig::new()
            .with_top_n(tunables.top_n)
            .with_only_my_functions(tunables.only_my_functions)
            .with_sort_by(tunables.sort_by)
            .with_min(tunables.min_col, tunables.min_val)
            .with_output_width(tunables.output_width)
            .with_callees(!tunables.no_callees)
            .with_exclude_pattern(tunables.exclude_pattern)
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Render {
            input,
            name,
            tunables,
        } => {
            let config = ProfileConfig::from(tunables);
            validate_config(&config)?;
            render_samples(input, name, &config)?;
        }

        Commands::Widths {
            output_width,
            no_callees,
        } => {
            display_widths(output_width, !no_callees);
        }

        Commands::Columns => {
            display_columns();
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Render a sample document to stdout
///
/// **Private** - internal command implementation
fn render_samples(input: PathBuf, name: Option<String>, config: &ProfileConfig) -> Result<()> {
    info!("Reading samples from: {}", input.display());

    let samples = read_samples(&input)
        .with_context(|| format!("Failed to read samples from {}", input.display()))?;

    let report = build_report(&samples, config)?;

    match report.table {
        Some(table) => {
            let name = name.unwrap_or_else(|| {
                input
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "profile".to_string())
            });
            let args = format!("samples from {}", input.display());
            print!("{}", format_results(&name, &args, &table));
        }
        None => {
            println!("No statistics above {} on '{}'", config.min_val, config.min_col);
        }
    }

    info!("Rendered {} rows", report.rows);
    Ok(())
}

/// Display the column caps for an output width
///
/// **Private** - internal command implementation
fn display_widths(output_width: usize, include_callees: bool) {
    let result = compute_column_widths(output_width, include_callees);

    println!("Output width: {}", result.output_width);
    for (column, width) in Column::table_columns(include_callees)
        .iter()
        .zip(&result.widths)
    {
        println!("  {:<12} {}", column.label(), width);
    }
}

/// Display the accepted column names
///
/// **Private** - internal command implementation
fn display_columns() {
    println!("Columns:");
    for column in Column::ALL {
        let kind = if column.is_numeric() { "numeric" } else { "text" };
        println!("  {:<12} {}", column.label(), kind);
    }
    println!();
    println!("'tottime' holds cumulative time, 'tottime -r' exclusive time.");
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Get Profile v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Readable call-graph profiling statistics.");
}
