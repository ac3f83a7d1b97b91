//! Error types for the Qobuz API client.

use thiserror::Error;

/// Errors that can occur when signing requests or talking to the Qobuz API.
///
/// Every failure is returned to the immediate caller; nothing is retried.
#[derive(Debug, Error)]
pub enum QobuzError {
    /// Missing or invalid app credentials for the requested operation
    /// (no app id registered, empty app id, or no app secret for a signed
    /// endpoint).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Login was rejected or the login response was malformed.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Transport-level failure: unreachable host, TLS failure, timeout.
    #[error("network error on {endpoint}: {source}")]
    Network {
        /// Endpoint name, e.g. `track/get`.
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status or an error payload.
    ///
    /// Common statuses:
    /// - `400`: invalid or missing request signature
    /// - `401`: invalid app id or expired user token
    /// - `404`: unknown object id
    #[error("remote error on {endpoint} (status {}): {message}", display_status(.status.as_ref().copied()))]
    Remote {
        /// Endpoint name, e.g. `track/getFileUrl`.
        endpoint: String,
        /// HTTP status code, if a response was received.
        status: Option<u16>,
        /// Message from the error payload, or a description of the failure.
        message: String,
    },

    /// The operation needs a user session. Call `login` first.
    #[error("not logged in")]
    NotLoggedIn,

    /// Failed to map a JSON payload onto a typed result.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// HTTP status for messages, `-` when there is none.
pub(crate) fn display_status(status: Option<u16>) -> String {
    status.map_or_else(|| "-".to_owned(), |s| s.to_string())
}

/// Convenience alias for `Result<T, QobuzError>`.
pub type Result<T> = std::result::Result<T, QobuzError>;

impl QobuzError {
    /// HTTP status carried by a [`QobuzError::Remote`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_display_includes_endpoint_and_status() {
        let err = QobuzError::Remote {
            endpoint: "track/get".into(),
            status: Some(404),
            message: "No result matching given argument".into(),
        };
        let text = err.to_string();
        assert!(text.contains("track/get"));
        assert!(text.contains("404"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn remote_display_without_status() {
        let err = QobuzError::Remote {
            endpoint: "album/get".into(),
            status: None,
            message: "bad".into(),
        };
        assert!(err.to_string().contains("status -"));
        assert_eq!(QobuzError::NotLoggedIn.status(), None);
    }
}
