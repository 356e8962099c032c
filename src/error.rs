//! Typed analysis errors.
//!
//! Most failures travel as `anyhow::Error`. The variants below are the ones
//! the binary maps to a dedicated exit code, so they keep a concrete type.

use std::path::PathBuf;

use thiserror::Error;

use crate::rate::GroupKey;

fn group_name(key: &GroupKey) -> String {
    match key {
        Some(n) => format!("group n = {}", n),
        None => "run".to_string(),
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("input file {} contains no events", .path.display())]
    EmptyInput { path: PathBuf },

    #[error("line {line}: field {index} is missing")]
    MissingField { line: usize, index: usize },

    #[error("line {line}: field {index} is not an integer: {value:?}")]
    InvalidField {
        line: usize,
        index: usize,
        value: String,
    },

    #[error("line {line}: group size (field 4) is required for a sweep")]
    MissingGroup { line: usize },

    #[error("line {line}: group size must be positive")]
    InvalidGroupSize { line: usize },

    #[error("{}: needs at least 2 events to form a bin, found {found}", group_name(.key))]
    TooFewEvents { key: GroupKey, found: usize },

    #[error("{}: timestamp {ts} at position {position} goes back in time", group_name(.key))]
    UnorderedTimestamps {
        key: GroupKey,
        position: usize,
        ts: i64,
    },

    #[error(
        "{}: events from {first} to {last} span more than {max} windows",
        group_name(.key)
    )]
    SpanTooLarge {
        key: GroupKey,
        first: i64,
        last: i64,
        max: u64,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AnalysisError {
    /// True for violations of the analysis preconditions, as opposed to
    /// malformed input.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AnalysisError::TooFewEvents { .. }
                | AnalysisError::UnorderedTimestamps { .. }
                | AnalysisError::SpanTooLarge { .. }
                | AnalysisError::InvalidGroupSize { .. }
        )
    }
}
