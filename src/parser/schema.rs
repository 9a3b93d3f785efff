//! Input schema for call-graph samples supplied by a profiler.
//!
//! One `RawSample` per profiled callable, each carrying the callees
//! observed from within it.

use serde::Deserialize;
use std::fmt;

/// Identity of a profiled callable
///
/// In JSON, an object `{ "name", "line", "file" }` is a code identity
/// and a bare string is a native (built-in) callable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CodeIdentity {
    /// Callable defined in source code
    Code {
        name: String,
        #[serde(alias = "lineno")]
        line: u32,
        #[serde(alias = "filename")]
        file: String,
    },

    /// Callable without source, e.g. `<built-in method time.sleep>`
    Native(String),
}

impl CodeIdentity {
    pub fn code(name: impl Into<String>, line: u32, file: impl Into<String>) -> Self {
        Self::Code {
            name: name.into(),
            line,
            file: file.into(),
        }
    }

    pub fn native(description: impl Into<String>) -> Self {
        Self::Native(description.into())
    }

    /// Multi-line label shown in the function and callee columns
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Text the exclusion predicate is matched against
    pub fn source_path(&self) -> &str {
        match self {
            Self::Code { file, .. } => file,
            Self::Native(description) => description,
        }
    }
}

impl fmt::Display for CodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code { name, line, file } => {
                write!(f, "CALLABLE: {}\nLINENO: {}\nFILE: {}", name, line, file)
            }
            Self::Native(description) => f.write_str(description),
        }
    }
}

/// Statistics of a callee as seen from within its caller
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalleeStat {
    pub code: CodeIdentity,

    #[serde(alias = "ncalls")]
    pub call_count: u64,

    #[serde(alias = "tottime")]
    pub exclusive_time: f64,

    #[serde(alias = "cumtime")]
    pub cumulative_time: f64,
}

/// One profiled callable with its aggregated statistics
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSample {
    pub code: CodeIdentity,

    /// Number of direct invocations
    #[serde(alias = "ncalls")]
    pub call_count: u64,

    /// Time spent in the callable itself, in seconds
    #[serde(alias = "tottime")]
    pub exclusive_time: f64,

    /// Time spent in the callable and everything it called, in seconds
    #[serde(alias = "cumtime")]
    pub cumulative_time: f64,

    #[serde(default)]
    pub callees: Vec<CalleeStat>,
}

impl RawSample {
    pub fn new(
        code: CodeIdentity,
        call_count: u64,
        exclusive_time: f64,
        cumulative_time: f64,
    ) -> Self {
        Self {
            code,
            call_count,
            exclusive_time,
            cumulative_time,
            callees: Vec::new(),
        }
    }

    pub fn with_callee(mut self, callee: CalleeStat) -> Self {
        self.callees.push(callee);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_label_format() {
        let code = CodeIdentity::code("work", 12, "/home/user/app.py");
        assert_eq!(
            code.label(),
            "CALLABLE: work\nLINENO: 12\nFILE: /home/user/app.py"
        );
        assert_eq!(code.source_path(), "/home/user/app.py");
    }

    #[test]
    fn test_native_label_is_description() {
        let code = CodeIdentity::native("<built-in method time.sleep>");
        assert_eq!(code.label(), "<built-in method time.sleep>");
        assert_eq!(code.source_path(), "<built-in method time.sleep>");
    }

    #[test]
    fn test_untagged_identity_deserialization() {
        let code: CodeIdentity =
            serde_json::from_str(r#"{"name": "f", "lineno": 3, "filename": "a.py"}"#).unwrap();
        assert_eq!(code, CodeIdentity::code("f", 3, "a.py"));

        let native: CodeIdentity = serde_json::from_str(r#""<built-in>""#).unwrap();
        assert_eq!(native, CodeIdentity::native("<built-in>"));
    }
}
