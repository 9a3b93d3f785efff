//! Non-fatal warnings raised while processing or rendering.
//!
//! Warnings are handed back to the caller next to the primary result
//! and are also logged once where they arise.

use log::warn;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The only-my-functions filter would have removed every row,
    /// so it was skipped
    DegenerateFilter { pattern: String },

    /// The requested output width was raised to the narrowest
    /// renderable width
    WidthTooNarrow { requested: usize, minimum: usize },
}

impl Warning {
    /// Log the warning and hand it back for collection
    pub(crate) fn emit(self) -> Self {
        warn!("{}", self);
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DegenerateFilter { pattern } => write!(
                f,
                "could not filter out functions from the runtime and installed packages: \
                 the pattern '{}' must have matched the file path of your own code",
                pattern
            ),
            Warning::WidthTooNarrow { requested, minimum } => write!(
                f,
                "output width {} is narrower than the minimum of {} chars, using {}",
                requested, minimum, minimum
            ),
        }
    }
}
