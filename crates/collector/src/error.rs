use arrgauge_client::ClientError;
use arrgauge_core::{EncodeError, MetricError};

/// Result type for collection steps.
pub type CollectResult<T> = Result<T, CollectError>;

/// Anything that can go wrong while collecting one resource.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// Client construction, transport, status or decode failure.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A single record could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// A sample did not fit its descriptor.
    #[error(transparent)]
    Metric(#[from] MetricError),
}

impl CollectError {
    /// True for errors confined to one record; siblings keep being encoded.
    pub fn is_record_scoped(&self) -> bool {
        matches!(self, Self::Encode(EncodeError::TimeParse { .. }))
    }
}
