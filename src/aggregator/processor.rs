//! Turn raw profiler samples into a filtered, sorted statistics table.
//!
//! The steps run in a fixed order because later steps read the
//! columns derived by earlier ones:
//! 1. Derive per-call and label columns from every sample
//! 2. Sort descending on the sort column (stable)
//! 3. Keep rows strictly above the threshold on the threshold column
//! 4. Round the timing columns (comparisons above use full precision)
//! 5. Optionally drop callables that are not user code
//! 6. Keep the first `top_n` rows

use super::columns::Column;
use super::filter::PathFilter;
use crate::output::{Cell, Table};
use crate::parser::schema::{CodeIdentity, RawSample};
use crate::utils::config::{
    DEFAULT_INCLUDE_CALLEES, DEFAULT_MIN_VAL, DEFAULT_ONLY_MY_FUNCTIONS, DEFAULT_TOP_N,
    ROUND_DECIMALS,
};
use crate::utils::diagnostics::Warning;
use crate::utils::error::ProcessError;
use log::debug;

/// Options controlling which statistics are kept and how they are ordered
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Maximum number of rows returned
    pub top_n: usize,

    /// Drop callables matched by `exclude`
    pub only_my_functions: bool,

    /// Column sorted on, descending
    pub sort_by: Column,

    /// Column compared against `min_val`
    pub min_col: Column,

    /// Rows must be strictly above this value on `min_col`
    pub min_val: f64,

    /// Compute and keep the callee column
    pub include_callees: bool,

    pub exclude: PathFilter,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            only_my_functions: DEFAULT_ONLY_MY_FUNCTIONS,
            sort_by: Column::TottimeR,
            min_col: Column::TottimeR,
            min_val: DEFAULT_MIN_VAL,
            include_callees: DEFAULT_INCLUDE_CALLEES,
            exclude: PathFilter::default(),
        }
    }
}

/// Statistics of one callable
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub code: CodeIdentity,

    pub function_label: String,

    pub ncalls: u64,

    /// Exclusive time
    pub tottime_raw: f64,

    /// Exclusive time per call
    pub percall_raw: f64,

    /// Cumulative time
    pub tottime: f64,

    /// Cumulative time per call
    pub percall: f64,

    /// Labels of the callees, separated by blank lines
    pub callees_label: Option<String>,
}

impl StatRow {
    /// Derive a row from a sample, before sorting and rounding
    pub(crate) fn from_sample(sample: &RawSample, include_callees: bool) -> Self {
        let callees_label = include_callees.then(|| {
            sample
                .callees
                .iter()
                .map(|callee| callee.code.label())
                .collect::<Vec<_>>()
                .join("\n\n")
        });

        Self {
            code: sample.code.clone(),
            function_label: sample.code.label(),
            ncalls: sample.call_count,
            tottime_raw: sample.exclusive_time,
            percall_raw: per_call(sample.exclusive_time, sample.call_count),
            tottime: sample.cumulative_time,
            percall: per_call(sample.cumulative_time, sample.call_count),
            callees_label,
        }
    }

    fn round_timings(&mut self) {
        self.tottime_raw = round_to(self.tottime_raw, ROUND_DECIMALS);
        self.percall_raw = round_to(self.percall_raw, ROUND_DECIMALS);
        self.tottime = round_to(self.tottime, ROUND_DECIMALS);
        self.percall = round_to(self.percall, ROUND_DECIMALS);
    }

    /// Cells of this row for the given columns
    pub fn cells(&self, columns: &[Column]) -> Vec<Cell> {
        columns
            .iter()
            .map(|column| column.value(self).unwrap_or_else(|| Cell::from("")))
            .collect()
    }
}

/// Processed statistics, ready to be rendered
#[derive(Debug, Clone)]
pub struct StatsTable {
    pub columns: Vec<Column>,
    pub rows: Vec<StatRow>,
    pub warnings: Vec<Warning>,
}

impl StatsTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lower to a grid table with a header row of column labels
    pub fn to_table(&self) -> Table {
        let header = self.columns.iter().map(|c| Cell::from(c.label())).collect();
        let rows = self.rows.iter().map(|row| row.cells(&self.columns)).collect();
        Table::with_header(header, rows)
    }
}

/// Process raw samples into a statistics table
///
/// **Public** - main entry point for statistics processing
///
/// # Arguments
/// * `samples` - Samples from one profiled invocation, in profiler order
/// * `options` - Filtering, sorting and truncation options
///
/// # Errors
/// * `ProcessError::InvalidColumn` - `sort_by` names the callee column while
///   callee detail is off, or `min_col` is not a numeric column
pub fn process(samples: &[RawSample], options: &ProcessOptions) -> Result<StatsTable, ProcessError> {
    check_columns(options)?;

    debug!("Processing {} samples", samples.len());

    let mut rows: Vec<StatRow> = samples
        .iter()
        .map(|sample| StatRow::from_sample(sample, options.include_callees))
        .collect();

    // sort_by is stable, so ties keep profiler order
    rows.sort_by(|a, b| options.sort_by.compare(b, a));

    rows.retain(|row| {
        options
            .min_col
            .numeric_value(row)
            .is_some_and(|value| value > options.min_val)
    });
    debug!(
        "{} rows above {} on '{}'",
        rows.len(),
        options.min_val,
        options.min_col
    );

    rows.iter_mut().for_each(StatRow::round_timings);

    let mut warnings = Vec::new();
    if options.only_my_functions {
        let (kept, warning) = keep_user_code(rows, &options.exclude);
        rows = kept;
        warnings.extend(warning);
    }

    rows.truncate(options.top_n);

    Ok(StatsTable {
        columns: Column::table_columns(options.include_callees),
        rows,
        warnings,
    })
}

fn check_columns(options: &ProcessOptions) -> Result<(), ProcessError> {
    for column in [options.sort_by, options.min_col] {
        if column == Column::Callees && !options.include_callees {
            return Err(ProcessError::invalid_column(
                column.label(),
                "column is only present when callee detail is included",
            ));
        }
    }

    if !options.min_col.is_numeric() {
        return Err(ProcessError::invalid_column(
            options.min_col.label(),
            "threshold column must be numeric",
        ));
    }

    Ok(())
}

/// Drop rows that are not user code, unless that would drop them all
fn keep_user_code(rows: Vec<StatRow>, exclude: &PathFilter) -> (Vec<StatRow>, Option<Warning>) {
    if rows.is_empty() {
        return (rows, None);
    }

    let kept: Vec<StatRow> = rows
        .iter()
        .filter(|row| !exclude.excludes(&row.code))
        .cloned()
        .collect();

    if kept.is_empty() {
        let warning = Warning::DegenerateFilter {
            pattern: exclude.pattern().to_string(),
        }
        .emit();
        (rows, Some(warning))
    } else {
        debug!("Kept {} of {} rows as user code", kept.len(), rows.len());
        (kept, None)
    }
}

fn per_call(time: f64, calls: u64) -> f64 {
    if calls == 0 {
        0.0
    } else {
        time / calls as f64
    }
}

/// Round half to even at the given number of decimals
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::CalleeStat;

    fn sample(name: &str, file: &str, exclusive: f64, cumulative: f64) -> RawSample {
        RawSample::new(CodeIdentity::code(name, 1, file), 1, exclusive, cumulative)
    }

    fn names(table: &StatsTable) -> Vec<String> {
        table
            .rows
            .iter()
            .map(|row| match &row.code {
                CodeIdentity::Code { name, .. } => name.clone(),
                CodeIdentity::Native(description) => description.clone(),
            })
            .collect()
    }

    #[test]
    fn test_sorted_descending_and_thresholded() {
        let samples = vec![
            sample("a", "/app/a.py", 0.5, 0.5),
            sample("b", "/app/b.py", 0.001, 3.0),
            sample("c", "/app/c.py", 2.0, 2.0),
        ];
        let table = process(&samples, &ProcessOptions::default()).unwrap();
        assert_eq!(names(&table), vec!["c", "a"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let samples = vec![
            sample("first", "/app/a.py", 1.0, 1.0),
            sample("second", "/app/b.py", 1.0, 1.0),
            sample("third", "/app/c.py", 1.0, 1.0),
        ];
        let table = process(&samples, &ProcessOptions::default()).unwrap();
        assert_eq!(names(&table), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_sort_on_cumulative_time() {
        let samples = vec![
            sample("a", "/app/a.py", 1.0, 1.0),
            sample("b", "/app/b.py", 0.5, 4.0),
        ];
        let options = ProcessOptions {
            sort_by: Column::Tottime,
            ..Default::default()
        };
        let table = process(&samples, &options).unwrap();
        assert_eq!(names(&table), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_on_function_label() {
        let samples = vec![
            sample("b", "/app/x.py", 1.0, 1.0),
            sample("c", "/app/x.py", 0.5, 0.5),
            sample("a", "/app/x.py", 3.0, 3.0),
            sample("b", "/app/x.py", 2.0, 2.0),
        ];
        let options = ProcessOptions {
            sort_by: Column::Func,
            ..Default::default()
        };
        let table = process(&samples, &options).unwrap();
        assert_eq!(names(&table), vec!["c", "b", "b", "a"]);

        // identical labels keep input order
        let tied: Vec<f64> = table.rows[1..3].iter().map(|row| row.tottime_raw).collect();
        assert_eq!(tied, vec![1.0, 2.0]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let samples = vec![sample("edge", "/app/a.py", 0.005, 0.005)];
        let table = process(&samples, &ProcessOptions::default()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_threshold_uses_unrounded_values() {
        // 0.00504 rounds to 0.005 but is compared before rounding
        let samples = vec![sample("a", "/app/a.py", 0.00504, 0.00504)];
        let table = process(&samples, &ProcessOptions::default()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].tottime_raw, 0.005);
    }

    #[test]
    fn test_per_call_and_rounding() {
        let samples = vec![RawSample::new(
            CodeIdentity::code("f", 1, "/app/f.py"),
            3,
            1.0,
            2.0,
        )];
        let table = process(&samples, &ProcessOptions::default()).unwrap();
        let row = &table.rows[0];
        assert_eq!(row.ncalls, 3);
        assert_eq!(row.tottime_raw, 1.0);
        assert_eq!(row.percall_raw, 0.3333);
        assert_eq!(row.tottime, 2.0);
        assert_eq!(row.percall, 0.6667);
    }

    #[test]
    fn test_top_n_truncates() {
        let samples: Vec<RawSample> = (1..=20)
            .map(|i| sample(&format!("f{}", i), "/app/f.py", i as f64, i as f64))
            .collect();
        let options = ProcessOptions {
            top_n: 5,
            ..Default::default()
        };
        let table = process(&samples, &options).unwrap();
        assert_eq!(names(&table), vec!["f20", "f19", "f18", "f17", "f16"]);
    }

    #[test]
    fn test_only_my_functions() {
        let samples = vec![
            sample("A", "/usr/lib/site/python3.9/lib.py", 1.0, 1.0),
            sample("B", "/home/user/mycode.py", 2.0, 2.0),
        ];
        let options = ProcessOptions {
            only_my_functions: true,
            ..Default::default()
        };
        let table = process(&samples, &options).unwrap();
        assert_eq!(names(&table), vec!["B"]);
        assert!(table.warnings.is_empty());
    }

    #[test]
    fn test_only_my_functions_degenerate() {
        let samples = vec![sample("A", "/usr/lib/python3.9/lib.py", 1.0, 1.0)];
        let options = ProcessOptions {
            only_my_functions: true,
            ..Default::default()
        };
        let table = process(&samples, &options).unwrap();
        assert_eq!(names(&table), vec!["A"]);
        assert!(matches!(
            table.warnings.as_slice(),
            [Warning::DegenerateFilter { .. }]
        ));
    }

    #[test]
    fn test_only_my_functions_applied_before_truncation() {
        let samples = vec![
            sample("lib", "/usr/lib/python3.11/x.py", 5.0, 5.0),
            sample("mine", "/home/user/app.py", 1.0, 1.0),
        ];
        let options = ProcessOptions {
            top_n: 1,
            only_my_functions: true,
            ..Default::default()
        };
        let table = process(&samples, &options).unwrap();
        assert_eq!(names(&table), vec!["mine"]);
    }

    #[test]
    fn test_callee_label() {
        let samples = vec![sample("main", "/app/main.py", 1.0, 3.0)
            .with_callee(CalleeStat {
                code: CodeIdentity::code("a", 4, "/app/a.py"),
                call_count: 1,
                exclusive_time: 1.0,
                cumulative_time: 1.0,
            })
            .with_callee(CalleeStat {
                code: CodeIdentity::native("<built-in method time.sleep>"),
                call_count: 2,
                exclusive_time: 1.0,
                cumulative_time: 1.0,
            })];
        let table = process(&samples, &ProcessOptions::default()).unwrap();
        assert_eq!(
            table.rows[0].callees_label.as_deref(),
            Some("CALLABLE: a\nLINENO: 4\nFILE: /app/a.py\n\n<built-in method time.sleep>")
        );
    }

    #[test]
    fn test_no_callee_column_when_disabled() {
        let samples = vec![sample("main", "/app/main.py", 1.0, 3.0)];
        let options = ProcessOptions {
            include_callees: false,
            ..Default::default()
        };
        let table = process(&samples, &options).unwrap();
        assert_eq!(table.columns.len(), 6);
        assert!(table.rows[0].callees_label.is_none());
    }

    #[test]
    fn test_callees_column_rejected_when_disabled() {
        let options = ProcessOptions {
            include_callees: false,
            sort_by: Column::Callees,
            ..Default::default()
        };
        assert!(matches!(
            process(&[], &options),
            Err(ProcessError::InvalidColumn { .. })
        ));
    }

    #[test]
    fn test_text_threshold_column_rejected() {
        let options = ProcessOptions {
            min_col: Column::Func,
            ..Default::default()
        };
        assert!(matches!(
            process(&[], &options),
            Err(ProcessError::InvalidColumn { .. })
        ));
    }

    #[test]
    fn test_callees_threshold_column_rejected() {
        let options = ProcessOptions {
            include_callees: true,
            min_col: Column::Callees,
            ..Default::default()
        };
        assert!(matches!(
            process(&[sample("a", "/app/a.py", 1.0, 1.0)], &options),
            Err(ProcessError::InvalidColumn { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        let table = process(&[], &ProcessOptions::default()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.to_table().header().map(<[Cell]>::len), Some(7));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(2.0, 4), 2.0);
        assert_eq!(round_to(0.00004, 4), 0.0);
    }
}
