//! Result and error types for the core library

use thiserror::Error;

use super::validation::FieldErrors;

/// Core library error type
///
/// Every variant is terminal for the operation that produced it. Nothing is
/// retried automatically; callers surface transport and server failures
/// through the toast channel and validation failures inline on the form.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (unreachable host, timeout, ...)
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Client-side field violations, one message per invalid field
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a server error
    pub fn server(status: u16, msg: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: msg.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Field errors, when this is a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Whether the failure belongs on the toast channel rather than inline
    pub fn is_toast(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
