use reqwest::StatusCode;
use thiserror::Error;

/// Failure modes of a single calendar API call. The client never retries;
/// callers decide whether another attempt is worth a sleep cycle.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("upstream returned {0}")]
    Upstream(StatusCode),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
