//! Errors raised while talking to the Siege API.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur during an upstream call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status.
    #[error("API returned {}", .0.as_u16())]
    Status(StatusCode),

    /// Connection, TLS, redirect or body transfer failure.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not valid JSON.
    #[error("invalid upstream JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL or header values in the configuration are unusable.
    #[error("invalid upstream configuration: {0}")]
    InvalidConfig(String),

    /// An id that cannot be sent as a single path segment (`.` or `..`).
    #[error("invalid id '{0}'")]
    InvalidId(String),
}

impl UpstreamError {
    /// True when the caller supplied the bad input, not the upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(self, UpstreamError::InvalidId(_))
    }

    /// Status code the upstream returned, if it got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status(status) => Some(*status),
            _ => None,
        }
    }

    /// Short reason recorded inline on a project that failed to load.
    pub fn marker(&self) -> String {
        match self {
            UpstreamError::Status(status) => format!("HTTP {}", status.as_u16()),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_and_marker() {
        let err = UpstreamError::Status(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "API returned 404");
        assert_eq!(err.marker(), "HTTP 404");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_decode_marker_carries_message() {
        let err: UpstreamError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(err.marker().starts_with("invalid upstream JSON payload"));
        assert_eq!(err.status(), None);
    }
}
