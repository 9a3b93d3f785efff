//! Sample document parser.
//!
//! Reads the JSON snapshot a profiler wrote for one invocation and
//! checks it against the sample invariants before any processing.

use super::schema::RawSample;
use crate::utils::config::SAMPLE_FIELD_NAMES;
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Parse a sample document
///
/// **Public** - main entry point for parsing
///
/// Accepts either a bare JSON array of samples or an object that nests
/// the array under one of `SAMPLE_FIELD_NAMES`.
pub fn parse_samples(raw: &str) -> Result<Vec<RawSample>, ParseError> {
    let document: Value = serde_json::from_str(raw)?;
    let array = extract_sample_array(document)?;
    let samples: Vec<RawSample> = serde_json::from_value(array)?;

    validate_samples(&samples)?;

    debug!("Parsed {} samples", samples.len());
    Ok(samples)
}

/// Read and parse a sample document from disk
pub fn read_samples(path: impl AsRef<Path>) -> Result<Vec<RawSample>, ParseError> {
    let path = path.as_ref();
    debug!("Reading samples from: {}", path.display());

    let raw = fs::read_to_string(path)?;
    parse_samples(&raw)
}

/// Locate the sample array inside a document
///
/// **Private** - internal helper for parse_samples
fn extract_sample_array(document: Value) -> Result<Value, ParseError> {
    match document {
        Value::Array(_) => Ok(document),
        Value::Object(mut fields) => SAMPLE_FIELD_NAMES
            .iter()
            .find_map(|key| fields.remove(*key).filter(Value::is_array))
            .ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "expected a sample array under one of: {}",
                    SAMPLE_FIELD_NAMES.join(", ")
                ))
            }),
        other => Err(ParseError::InvalidFormat(format!(
            "expected an array or object, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Check samples against the profiler invariants
///
/// **Public** - also useful for samples built in memory
///
/// Zero call counts and negative or non-finite times are rejected.
/// A cumulative time slightly below the exclusive time happens with
/// timer jitter, so it is only logged.
pub fn validate_samples(samples: &[RawSample]) -> Result<(), ParseError> {
    for (index, sample) in samples.iter().enumerate() {
        let name = sample.code.source_path();

        if sample.call_count == 0 {
            return Err(ParseError::InvalidFormat(format!(
                "sample {} ({}) has a call count of 0",
                index, name
            )));
        }

        check_time(index, name, "exclusive", sample.exclusive_time)?;
        check_time(index, name, "cumulative", sample.cumulative_time)?;

        for callee in &sample.callees {
            check_time(index, name, "callee exclusive", callee.exclusive_time)?;
            check_time(index, name, "callee cumulative", callee.cumulative_time)?;
        }

        if sample.cumulative_time < sample.exclusive_time {
            warn!(
                "Sample {} ({}) has cumulative time {} below exclusive time {}",
                index, name, sample.cumulative_time, sample.exclusive_time
            );
        }
    }

    Ok(())
}

fn check_time(index: usize, name: &str, which: &str, value: f64) -> Result<(), ParseError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ParseError::InvalidFormat(format!(
            "sample {} ({}) has an invalid {} time: {}",
            index, name, which, value
        )));
    }
    Ok(())
}
