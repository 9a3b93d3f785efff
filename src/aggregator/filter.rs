//! Only-my-functions predicate.
//!
//! Decides whether a callable belongs to the runtime or an installed
//! package rather than to the user's own code.

use crate::parser::schema::CodeIdentity;
use crate::utils::config::DEFAULT_EXCLUDE_PATTERN;
use crate::utils::error::ProcessError;
use regex::Regex;
use std::sync::OnceLock;

static DEFAULT_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Excludes callables whose source path matches a pattern
#[derive(Debug, Clone)]
pub struct PathFilter {
    pattern: Regex,
}

impl PathFilter {
    pub fn new(pattern: &str) -> Result<Self, ProcessError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// True if the callable is not user code
    pub fn excludes(&self, code: &CodeIdentity) -> bool {
        self.pattern.is_match(code.source_path())
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        // Constant pattern, compiled once and covered by test_default_pattern_compiles
        let pattern = DEFAULT_PATTERN.get_or_init(|| {
            Regex::new(DEFAULT_EXCLUDE_PATTERN).expect("default exclusion pattern is a valid regex")
        });
        Self {
            pattern: pattern.clone(),
        }
    }
}
