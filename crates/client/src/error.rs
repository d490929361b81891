//! Error types for the request client.

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Every way a request against the monitored application can fail.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The client could not be built (bad URL, bad header, TLS setup).
    #[error("failed to construct client: {0}")]
    Construction(String),

    /// The request never produced a response, or its body could not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The application answered with a non-2xx status.
    #[error("request to {url} returned status {status}: {body}")]
    Status { status: u16, url: String, body: String },

    /// The response body did not match the expected JSON shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Cut a response body down to `max` characters for error reporting.
pub(crate) fn truncate_body(body: &str, max: usize) -> String {
    match body.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
