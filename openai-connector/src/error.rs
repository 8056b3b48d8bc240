//! Error types for the connector.
//!
//! Three failure classes exist:
//! - configuration that fails shape validation at construction time,
//! - multipart payloads that cannot be encoded,
//! - transport failures (network, non-success status, undecodable body).
//!
//! Nothing is retried or recovered internally; every error surfaces to the
//! caller as a typed failure.

use std::fmt;

/// Result type alias for connector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the connector.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An optional configuration sub-object did not match its expected shape.
    #[error("invalid `{field}` configuration: {reason}")]
    ConfigValidation {
        /// The configuration field that failed validation.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A multipart payload could not be serialized into body parts.
    #[error("multipart encoding failed: {0}")]
    BodyEncoding(String),

    /// A transport-level failure, surfaced unchanged.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl Error {
    /// Create a configuration validation error for the given field.
    #[must_use]
    pub fn config_validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field,
            reason: reason.into(),
        }
    }

    /// Create a body encoding error.
    #[must_use]
    pub fn body_encoding(msg: impl Into<String>) -> Self {
        Self::BodyEncoding(msg.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.into())
    }
}

/// Transport failures: network errors, non-success HTTP statuses, and
/// response bodies that fail to deserialize into the declared shape.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The HTTP exchange itself failed (connect, timeout, protocol).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{0}")]
    Status(ApiFailure),

    /// The response body did not deserialize into the declared shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl TransportError {
    /// Create a decode error.
    #[must_use]
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

/// A non-success HTTP answer, with whatever the server said about it.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ApiFailure {
    /// The HTTP status code.
    pub status: u16,
    /// Error message, parsed from the OpenAI error body when possible.
    pub message: String,
    /// Error type reported by the API, if any.
    pub error_type: Option<String>,
    /// Error code reported by the API, if any.
    pub code: Option<String>,
}

impl ApiFailure {
    /// Create a failure from a raw, unparseable body.
    #[must_use]
    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            message: body.into(),
            error_type: None,
            code: None,
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)?;
        if let Some(code) = &self.code {
            write!(f, " (code: {code})")?;
        }
        Ok(())
    }
}
