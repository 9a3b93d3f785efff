use crate::aggregator::{Column, PathFilter, ProcessOptions};
use crate::utils::config::{
    DEFAULT_EXCLUDE_PATTERN, DEFAULT_INCLUDE_CALLEES, DEFAULT_MIN_COL, DEFAULT_MIN_VAL,
    DEFAULT_ONLY_MY_FUNCTIONS, DEFAULT_OUTPUT_WIDTH, DEFAULT_SORT_BY, DEFAULT_TOP_N,
};
use crate::utils::error::ProcessError;

/// Tunables of a profiling report
///
/// **Public** - used by main.rs and the invocation wrapper
///
/// Column names stay as strings here and are checked when converted
/// into `ProcessOptions`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileConfig {
    /// Maximum number of rows shown
    pub top_n: usize,

    /// Hide callables from the runtime and installed packages
    pub only_my_functions: bool,

    /// Column to sort on, descending
    pub sort_by: String,

    /// Column compared against `min_val`
    pub min_col: String,

    /// Rows must be strictly above this value on `min_col`
    pub min_val: f64,

    /// Total width of the rendered grid, in characters
    pub output_width: usize,

    /// Show the callee column
    pub include_callees: bool,

    /// Regex matched against source paths by `only_my_functions`
    pub exclude_pattern: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            only_my_functions: DEFAULT_ONLY_MY_FUNCTIONS,
            sort_by: DEFAULT_SORT_BY.to_string(),
            min_col: DEFAULT_MIN_COL.to_string(),
            min_val: DEFAULT_MIN_VAL,
            output_width: DEFAULT_OUTPUT_WIDTH,
            include_callees: DEFAULT_INCLUDE_CALLEES,
            exclude_pattern: DEFAULT_EXCLUDE_PATTERN.to_string(),
        }
    }
}

impl ProfileConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_only_my_functions(mut self, only_my_functions: bool) -> Self {
        self.only_my_functions = only_my_functions;
        self
    }

    pub fn with_sort_by(mut self, column: impl Into<String>) -> Self {
        self.sort_by = column.into();
        self
    }

    pub fn with_min(mut self, column: impl Into<String>, value: f64) -> Self {
        self.min_col = column.into();
        self.min_val = value;
        self
    }

    pub fn with_output_width(mut self, output_width: usize) -> Self {
        self.output_width = output_width;
        self
    }

    pub fn with_callees(mut self, include_callees: bool) -> Self {
        self.include_callees = include_callees;
        self
    }

    pub fn with_exclude_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_pattern = pattern.into();
        self
    }

    /// Resolve column names and the exclusion pattern
    pub fn to_options(&self) -> Result<ProcessOptions, ProcessError> {
        Ok(ProcessOptions {
            top_n: self.top_n,
            only_my_functions: self.only_my_functions,
            sort_by: self.sort_by.parse::<Column>()?,
            min_col: self.min_col.parse::<Column>()?,
            min_val: self.min_val,
            include_callees: self.include_callees,
            exclude: PathFilter::new(&self.exclude_pattern)?,
        })
    }
}
