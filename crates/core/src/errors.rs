//! Core error types for the TradeLedger application.
//!
//! This module defines transport-agnostic error types. HTTP-specific failures
//! (from reqwest, serde decoding, etc.) are converted to these types by the
//! client crate.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Trade lifecycle error: {0}")]
    Trade(#[from] TradeError),

    #[error("API request failed: {0}")]
    Api(#[from] ApiError),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    Field { field: String, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

impl ValidationError {
    pub fn field(field: &str, message: &str) -> Self {
        ValidationError::Field {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Name of the offending field, when the error is tied to one.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            ValidationError::Field { field, .. } => Some(field),
            ValidationError::MissingField(field) => Some(field),
            _ => None,
        }
    }
}

/// Errors raised by the open/closed trade state machine.
#[derive(Error, Debug, PartialEq)]
pub enum TradeError {
    #[error("Trade {0} is already closed")]
    AlreadyClosed(String),

    #[error("Closing action {close} cannot close a {open} position")]
    UnpairedActions { open: String, close: String },
}

/// Errors returned by the remote API or the transport beneath it.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl Error {
    /// True when the error is a 404 from the API.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api(ApiError::NotFound(_)))
    }

    /// True when the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Api(ApiError::Transport(_)))
    }
}

// === From implementations for common error types ===

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Session(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Api(ApiError::Decode(err.to_string()))
    }
}
