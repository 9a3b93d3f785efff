//! Configuration and constants for the library and CLI.

/// Default number of rows kept in the statistics table
pub const DEFAULT_TOP_N: usize = 10;
pub const MAX_TOP_N: usize = 10_000;

/// Default sort and threshold columns (exclusive time)
pub const DEFAULT_SORT_BY: &str = "tottime -r";
pub const DEFAULT_MIN_COL: &str = "tottime -r";
pub const DEFAULT_MIN_VAL: f64 = 0.005;

/// Default total width of the rendered grid, in characters
pub const DEFAULT_OUTPUT_WIDTH: usize = 150;
pub const DEFAULT_INCLUDE_CALLEES: bool = true;
pub const DEFAULT_ONLY_MY_FUNCTIONS: bool = false;

/// Matches interpreter install folders (e.g. `/python3.9/`) and
/// pseudo files such as `<frozen importlib._bootstrap>`
pub const DEFAULT_EXCLUDE_PATTERN: &str = r"/python[0-9]+\.[0-9]+/|<.*>";

/// Decimal places kept on the derived timing columns
pub const ROUND_DECIMALS: i32 = 4;

// Width policy constants. The overheads account for borders, padding
// and the fixed-width numeric columns.
pub const MIDDLE_COLUMN_CAPS: [usize; 5] = [6, 10, 10, 7, 7];
pub const CALLEES_WIDTH_OVERHEAD: usize = 61;
pub const CALLEES_MIN_OUTPUT_WIDTH: usize = 73;
pub const FUNC_SHARE_WITH_CALLEES: f64 = 0.35;
pub const CALLEES_SHARE: f64 = 0.65;
pub const PLAIN_WIDTH_OVERHEAD: usize = 59;
pub const PLAIN_MIN_OUTPUT_WIDTH: usize = 63;

// Grid drawing characters
pub const HEADER_DIV_CHAR: char = '=';
pub const ROW_DIV_CHAR: char = '-';
pub const VERT_DIV_CHAR: char = '|';

// Keys under which a sample document may nest its sample array
pub const SAMPLE_FIELD_NAMES: &[&str] = &["samples", "stats", "entries"];
