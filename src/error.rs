// Error taxonomy for calls against the external Arena API.
//
// Connectivity failures, API rejections, not-found and stale-token cases are
// distinct variants because the UI surfaces each one differently.

use thiserror::Error;

/// Failures reading or writing the token stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access token store: {0}")]
    Io(#[from] std::io::Error),

    #[error("token mirror is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Failures of a single API operation. No operation is retried
/// automatically; every failure is terminal for that user action.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Could not reach the backend at all (refused, DNS, timeout). The
    /// message names the configured endpoint so the fix is actionable.
    #[error("cannot reach the server at {url} - check that the Arena API is running")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend rejected the request. `message` is the error body's
    /// `message` field verbatim when present, otherwise a generic
    /// per-operation fallback.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Player lookup by nickname came back 404.
    #[error("jogador \"{0}\" not found")]
    JogadorNotFound(String),

    /// The stored token failed validation. Handled silently by resetting
    /// the session; only shown when it blocks an explicit action.
    #[error("session token is invalid or expired")]
    InvalidToken,

    /// The backend answered 2xx but the body did not parse.
    #[error("unexpected response from server: {0}")]
    Decode(#[source] reqwest::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// True when the failure means "the server is unreachable" rather than
    /// "the server said no".
    pub fn is_connection(&self) -> bool {
        matches!(self, ApiError::Connection { .. })
    }
}
