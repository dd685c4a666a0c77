//! Error types for the shelf library.
//!
//! This module provides a unified error type with explicit variants for
//! remote transport/protocol failures, input validation, and preference
//! storage failures.

use thiserror::Error;

/// The unified error type for shelf operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Failures talking to the remote book service.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Input validation errors (missing fields, out-of-range values).
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Preference storage failures.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failures from the remote book service: transport, HTTP status, or
/// payload decoding. The client performs no retries, so a single network
/// failure surfaces immediately as one of these.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}{}", status_suffix(.message))]
    Status { status: u16, message: Option<String> },

    /// The response body could not be decoded as the expected shape.
    #[error("malformed response payload: {message}")]
    Payload { message: String },

    /// Any other HTTP-level error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

fn status_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {m}"),
        None => String::new(),
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteError::Timeout
        } else if err.is_connect() {
            RemoteError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            RemoteError::Payload {
                message: err.to_string(),
            }
        } else {
            RemoteError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Remote(RemoteError::from(err))
    }
}

/// Input validation errors, caught at the form boundary before any
/// network call is made.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Published year outside the accepted range.
    #[error("publishedYear {value} must be between {min} and {max}")]
    YearOutOfRange { value: i32, min: i32, max: i32 },

    /// Rating outside [0, 5].
    #[error("rating {value} must be between 0 and 5")]
    RatingOutOfRange { value: f64 },

    /// Pages must be a positive integer.
    #[error("pages must be at least 1")]
    PagesNotPositive,

    /// Invalid service base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Unrecognized sort option, scope, or status value.
    #[error("unrecognized {what} '{value}'")]
    Unrecognized { what: &'static str, value: String },
}

/// Preference storage failures.
///
/// These are always recoverable: the view-mode default applies and the
/// failure is logged, never propagated into another flow.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be read or written.
    #[error("preference storage unavailable: {message}")]
    Unavailable { message: String },
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Unavailable {
            message: err.to_string(),
        }
    }
}
