//! Defines the application's primary error type `AppError` and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition and provides `From`
//! implementations to convert common external errors into `AppError` variants.
//! Errors that do not implement `Clone` are wrapped in `Arc` to allow `AppError` to be cloneable.

use reqwest::StatusCode;
use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Wrong invocation: missing input file, bad arguments.
    #[error("{0}")]
    Usage(String),

    /// The requested subcommand is not in the command registry.
    #[error("Wrong command: {name}\nAvailable commands: {available:?}")]
    CommandNotFound {
        name: String,
        available: Vec<String>,
    },

    /// The server answered with a non-2xx status.
    #[error("Http Error: {status} for url {url}\n{body}")]
    HttpStatus {
        status: StatusCode,
        url: String,
        body: String,
    },

    /// The server could not be reached.
    #[error("Error Connecting: {0}")]
    Connection(Arc<reqwest::Error>),

    /// The request did not complete within the client timeout.
    #[error("Timeout Error: {0}")]
    Timeout(Arc<reqwest::Error>),

    /// Any other failure reported by the HTTP client.
    #[error("Error: {0}")]
    Request(Arc<reqwest::Error>),

    /// Error during JSON parsing (`serde_json`). Wrapped in Arc as serde_json::Error is not Clone.
    #[error("JSON Parsing Error: {0}")]
    JsonParse(Arc<serde_json::Error>),

    /// Error while reading a YAML input file (`serde_yaml`).
    #[error("YAML Parsing Error: {0}")]
    YamlParse(Arc<serde_yaml::Error>),

    /// Error related to standard I/O operations.
    #[error("I/O Error: {0}")]
    Io(Arc<std::io::Error>),
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

// --- From implementations ---
// These allow easy conversion from external error types into AppError
// using the `?` operator. Arc is used for non-Clone error types.

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // A connect timeout reports both flags; it belongs to the timeout class.
        if err.is_timeout() {
            AppError::Timeout(Arc::new(err))
        } else if err.is_connect() {
            AppError::Connection(Arc::new(err))
        } else {
            AppError::Request(Arc::new(err))
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonParse(Arc::new(err))
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::YamlParse(Arc::new(err))
    }
}

impl From<clap::Error> for AppError {
    fn from(err: clap::Error) -> Self {
        AppError::Usage(err.to_string())
    }
}
