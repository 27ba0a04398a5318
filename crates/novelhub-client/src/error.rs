//! Client error types.

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from server.
        message: String,
    },

    /// Login was rejected or returned no token.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The server rejected the request as unauthenticated; the session has
    /// been cleared.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A refresh was requested without a stored refresh token.
    #[error("No refresh token available")]
    NoRefreshToken,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Session state could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] novelhub_session::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_)) || matches!(self, Error::Api { status: 404, .. })
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::Auth(_) | Error::Unauthorized(_) | Error::NoRefreshToken
        ) || matches!(self, Error::Api { status: 401, .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error body returned by the server.
///
/// The backend is not consistent about the field name.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(alias = "msg", alias = "error", alias = "detail")]
    pub message: String,
}
