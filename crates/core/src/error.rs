//! Error types raised while turning payloads into samples.

use thiserror::Error;

/// Failure to encode a single payload record.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A backup carried a timestamp that is not RFC 3339.
    #[error("failed to parse time {value:?} of backup {backup:?}: {source}")]
    TimeParse {
        backup: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Misuse of a metric descriptor.
#[derive(Debug, Error)]
pub enum MetricError {
    #[error("metric {metric} expects {expected} label values, got {actual}")]
    LabelArity {
        metric: String,
        expected: usize,
        actual: usize,
    },
}
