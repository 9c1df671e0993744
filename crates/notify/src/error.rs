//! Error types for message delivery.

use thiserror::Error;

/// Errors that stop a dispatch run.
///
/// Each message names the stage that failed so a single stderr line is
/// enough to tell encoding, input and delivery problems apart.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport-level failure talking to the webhook
    #[error("post failed")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with something other than 200 OK
    #[error("post failed: webhook returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The message could not be encoded as JSON
    #[error("could not encode message")]
    Serialization(#[from] serde_json::Error),

    /// Standard input could not be read
    #[error("error reading input")]
    Input(#[from] std::io::Error),

    /// The proxy could not be applied to the HTTP client
    #[error("invalid proxy {url}")]
    InvalidProxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl NotifyError {
    /// Whether the failure happened while talking to the webhook.
    #[must_use]
    pub const fn is_delivery(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    /// Join the error chain the way `{:#}` does for `anyhow`.
    fn chain(err: &dyn std::error::Error) -> String {
        let mut parts = vec![err.to_string()];
        let mut source = err.source();
        while let Some(cause) = source {
            parts.push(cause.to_string());
            source = cause.source();
        }
        parts.join(": ")
    }

    #[test]
    fn test_input_error_names_stage_once() {
        let err = NotifyError::from(std::io::Error::other("stream fault"));
        assert_eq!(chain(&err), "error reading input: stream fault");
    }

    #[test]
    fn test_encode_error_names_stage_once() {
        let source = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let cause = source.to_string();
        let err = NotifyError::from(source);

        assert_eq!(err.to_string(), "could not encode message");
        assert_eq!(chain(&err), format!("could not encode message: {cause}"));
    }

    #[test]
    fn test_status_error_is_self_contained() {
        let err = NotifyError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "server_error".to_string(),
        };
        assert!(err.source().is_none());
        assert_eq!(
            err.to_string(),
            "post failed: webhook returned 500 Internal Server Error: server_error"
        );
    }
}
