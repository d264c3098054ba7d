//! Error types for telematics client operations

use thiserror::Error;

/// Result type alias for telematics client operations
pub type Result<T> = std::result::Result<T, RenaultClientError>;

/// Errors that can occur during telematics client operations
///
/// Only `UnknownLocale`, `MissingPrecondition`, and `Auth` are expected to
/// reach callers of the per-vehicle operations; feature-gap and transport
/// failures are folded into [`crate::OperationResult`] instead.
#[derive(Error, Debug)]
pub enum RenaultClientError {
    /// No endpoint configuration exists for the requested locale
    #[error("no configuration found for locale: {0}")]
    UnknownLocale(String),

    /// A vehicle-scoped call was made before its inputs were set
    #[error("{0} must be set before vehicle-scoped calls")]
    MissingPrecondition(&'static str),

    /// An identity handshake step reported a non-success body status,
    /// or no compatible account is attached to the person
    #[error("authentication failed: {0}")]
    Auth(String),

    /// HTTP request failed (includes timeouts)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error (binding the test server, mainly)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a response body
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Telematics backend returned a non-success HTTP status
    ///
    /// `kind` carries the body-level `type` discriminator when present
    /// (`FUNCTIONAL` marks a permanent per-model feature gap).
    #[error("server error {status}: {message}")]
    Server {
        status: u16,
        kind: Option<String>,
        message: String,
    },
}

impl RenaultClientError {
    /// Create a server error from status code and message
    pub fn server_error(status: u16, kind: Option<String>, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            kind,
            message: message.into(),
        }
    }

    /// Whether this error must propagate to the caller instead of being
    /// converted into an operation result value
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::UnknownLocale(_) | Self::MissingPrecondition(_) | Self::Auth(_)
        )
    }
}
