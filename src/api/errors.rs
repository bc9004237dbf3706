use crate::api::enums::partition::Partition;
use crate::records::group_key::GroupKey;
use std::path::PathBuf;
use thiserror::Error;

/// Represents a record that could not be converted into an observation.
///
/// Line numbers are 1-based and count every line handed to the aggregator,
/// across all concatenated source files.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseError {
    #[error("Line {line}: expected {expected} comma separated fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: field {index} is not a valid integer: '{text}'")]
    InvalidInteger {
        line: usize,
        index: usize,
        text: String,
    },

    #[error("Line {line}: field {index} is not a valid float: '{text}'")]
    InvalidFloat {
        line: usize,
        index: usize,
        text: String,
    },

    /// Keys must be finite so they can be hashed and ordered.
    #[error("Line {line}: key field {index} is not finite: '{text}'")]
    NonFiniteKey {
        line: usize,
        index: usize,
        text: String,
    },
}

/// Errors that can occur while aggregating and summarizing sweep results.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Missing directory or file, or a failed read/write.
    #[error("Failed to access '{path}': {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Group {key} in partition {partition} has no values")]
    EmptyGroup { partition: Partition, key: GroupKey },

    #[error("Group {key} in partition {partition} produced a non-finite statistic")]
    NonFiniteStatistic { partition: Partition, key: GroupKey },

    #[error("Invalid record schema: {0}")]
    InvalidSchema(String),

    #[error("Invalid trial count {0} for the requested confidence method")]
    InvalidTrialCount(u32),

    #[error("Failed to build Student-t distribution: {0}")]
    Quantile(String),

    /// Error emitted by a renderer implementation.
    #[error("Renderer error: {0}")]
    Render(String),
}

impl AnalysisError {
    /// Wraps an [`std::io::Error`] together with the path that caused it.
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::FileAccess {
            path: path.into(),
            source,
        }
    }
}
