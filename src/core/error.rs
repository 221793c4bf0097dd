//! Error types for the search pipeline

use thiserror::Error;

/// Errors raised while validating options or talking to the search API.
///
/// Every variant is fatal for the current run: the driver never retries
/// and no partial output is rendered.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Mutually exclusive options were combined.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The transport could not complete the request (connect error, timeout).
    #[error("request failed: {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("HTTP {status} {url}")]
    Api { status: u16, url: String },

    /// The API answered 2xx but the body does not match the expected schema.
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },
}

impl SearchError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        SearchError::InvalidArgument(message.into())
    }

    pub fn malformed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        SearchError::MalformedResponse {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
