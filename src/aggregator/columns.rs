//! Columns of the statistics table.
//!
//! Column names given by the user are parsed here, so an unknown name
//! is rejected before any processing starts.

use super::processor::StatRow;
use crate::output::Cell;
use crate::utils::error::ProcessError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A column of the statistics table
///
/// Note that `Tottime` carries the *cumulative* time of a callable and
/// `TottimeR` its exclusive time. The labels are kept as they are for
/// compatibility with existing sort and threshold settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Func,
    Ncalls,
    TottimeR,
    PercallR,
    Tottime,
    Percall,
    Callees,
}

impl Column {
    /// Every column, in table order
    pub const ALL: [Column; 7] = [
        Column::Func,
        Column::Ncalls,
        Column::TottimeR,
        Column::PercallR,
        Column::Tottime,
        Column::Percall,
        Column::Callees,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Column::Func => "func",
            Column::Ncalls => "ncalls",
            Column::TottimeR => "tottime -r",
            Column::PercallR => "percall -r",
            Column::Tottime => "tottime",
            Column::Percall => "percall",
            Column::Callees => "callees",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Column::Func | Column::Callees)
    }

    /// Columns of the final table
    pub fn table_columns(include_callees: bool) -> Vec<Column> {
        Self::ALL
            .into_iter()
            .filter(|column| include_callees || *column != Column::Callees)
            .collect()
    }

    /// Value of this column in a row
    ///
    /// Returns None for the callee column when callee detail was not
    /// computed.
    pub fn value(self, row: &StatRow) -> Option<Cell> {
        let cell = match self {
            Column::Func => Cell::Text(row.function_label.clone()),
            Column::Ncalls => Cell::Int(row.ncalls),
            Column::TottimeR => Cell::Float(row.tottime_raw),
            Column::PercallR => Cell::Float(row.percall_raw),
            Column::Tottime => Cell::Float(row.tottime),
            Column::Percall => Cell::Float(row.percall),
            Column::Callees => Cell::Text(row.callees_label.clone()?),
        };
        Some(cell)
    }

    /// Numeric value of this column in a row, for threshold filtering
    pub fn numeric_value(self, row: &StatRow) -> Option<f64> {
        match self {
            Column::Ncalls => Some(row.ncalls as f64),
            Column::TottimeR => Some(row.tottime_raw),
            Column::PercallR => Some(row.percall_raw),
            Column::Tottime => Some(row.tottime),
            Column::Percall => Some(row.percall),
            Column::Func | Column::Callees => None,
        }
    }

    /// Ordering of two rows on this column, ascending
    pub fn compare(self, a: &StatRow, b: &StatRow) -> Ordering {
        match self {
            Column::Func => a.function_label.cmp(&b.function_label),
            Column::Callees => a.callees_label.cmp(&b.callees_label),
            Column::Ncalls => a.ncalls.cmp(&b.ncalls),
            _ => {
                let a = self.numeric_value(a).unwrap_or(0.0);
                let b = self.numeric_value(b).unwrap_or(0.0);
                a.total_cmp(&b)
            }
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Column {
    type Err = ProcessError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.label() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|c| c.label()).collect();
                ProcessError::invalid_column(
                    name,
                    format!("unknown column, expected one of: {}", known.join(", ")),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_columns() {
        for column in Column::ALL {
            assert_eq!(column.label().parse::<Column>().unwrap(), column);
        }
    }

    #[test]
    fn test_parse_unknown_column() {
        let err = "cumtime".parse::<Column>().unwrap_err();
        assert!(matches!(err, ProcessError::InvalidColumn { ref name, .. } if name == "cumtime"));
    }

    #[test]
    fn test_table_columns() {
        assert_eq!(Column::table_columns(true).len(), 7);
        assert_eq!(
            Column::table_columns(false),
            vec![
                Column::Func,
                Column::Ncalls,
                Column::TottimeR,
                Column::PercallR,
                Column::Tottime,
                Column::Percall
            ]
        );
    }

    #[test]
    fn test_numeric_columns() {
        assert!(!Column::Func.is_numeric());
        assert!(!Column::Callees.is_numeric());
        assert!(Column::Ncalls.is_numeric());
        assert!(Column::Percall.is_numeric());
    }
}
