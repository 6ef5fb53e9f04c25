//! Error types for portico.
//!
//! Every variant is recoverable: the caller can retry with a corrected
//! endpoint or corrected credentials.

use thiserror::Error;

/// The unified error type for portico operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A login was attempted before any client had been created.
    #[error("no API client has been created")]
    NoClient,

    /// The endpoint could not be reached or answered with something unusable.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The endpoint answered and said no.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),
}

impl Error {
    /// Returns true if this is a transport or protocol fault.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

/// Network and protocol faults raised while talking to an endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint string is not a usable URL.
    #[error("invalid endpoint '{value}': {reason}")]
    InvalidEndpoint { value: String, reason: String },

    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    /// The response could not be interpreted.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The endpoint rejected the identifier/secret pair.
    #[error("rejected credentials")]
    RejectedCredentials,
}
