//! Column width policy for the statistics grid.
//!
//! Splits a total output width between the function column (and the
//! callee column when present) after the fixed numeric columns and
//! borders have taken their share.

use crate::utils::config::{
    CALLEES_MIN_OUTPUT_WIDTH, CALLEES_SHARE, CALLEES_WIDTH_OVERHEAD, FUNC_SHARE_WITH_CALLEES,
    MIDDLE_COLUMN_CAPS, PLAIN_MIN_OUTPUT_WIDTH, PLAIN_WIDTH_OVERHEAD,
};
use crate::utils::diagnostics::Warning;
use log::debug;

/// Per-column width caps, in table column order
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnWidths {
    pub widths: Vec<usize>,

    /// Output width actually used, after clamping
    pub output_width: usize,

    pub warning: Option<Warning>,
}

/// Narrowest output width the grid can be rendered at
pub fn min_output_width(include_callees: bool) -> usize {
    if include_callees {
        CALLEES_MIN_OUTPUT_WIDTH
    } else {
        PLAIN_MIN_OUTPUT_WIDTH
    }
}

/// Compute per-column caps from a total output width
///
/// **Public** - width policy entry point
///
/// Widths below the minimum are raised to it and a
/// `Warning::WidthTooNarrow` is returned.
pub fn compute_column_widths(output_width: usize, include_callees: bool) -> ColumnWidths {
    let minimum = min_output_width(include_callees);
    let (output_width, warning) = if output_width < minimum {
        let warning = Warning::WidthTooNarrow {
            requested: output_width,
            minimum,
        }
        .emit();
        (minimum, Some(warning))
    } else {
        (output_width, None)
    };

    let widths: Vec<usize> = if include_callees {
        let flexible = (output_width - CALLEES_WIDTH_OVERHEAD) as f64;
        let func = (flexible * FUNC_SHARE_WITH_CALLEES) as usize;
        let callees = (flexible * CALLEES_SHARE) as usize;
        std::iter::once(func)
            .chain(MIDDLE_COLUMN_CAPS)
            .chain(std::iter::once(callees))
            .collect()
    } else {
        std::iter::once(output_width - PLAIN_WIDTH_OVERHEAD)
            .chain(MIDDLE_COLUMN_CAPS)
            .collect()
    };

    debug!("Column widths for {} chars: {:?}", output_width, widths);

    ColumnWidths {
        widths,
        output_width,
        warning,
    }
}
