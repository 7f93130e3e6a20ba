//! Error handling for the fetchpack library.
//!
//! Every failure of a run is described by an [`Error`]. The task never lets an
//! [`Error`] escape: it classifies it with [`Error::kind`] and reports it to the
//! progress sink as a single `Failed` event. Callers that render errors for
//! humans should key their messages on [`ErrorKind`], which is stable, rather
//! than on the `Display` output of [`Error`].

use reqwest::StatusCode;
use std::fmt;
use std::io;
use thiserror::Error;

/// Errors that can happen while downloading or extracting.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Typically a worker that panicked or was aborted before it could
    /// produce a summary.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The source string is not an absolute HTTP(S) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered that the resource does not exist.
    #[error("Resource not found: {url} ({status})")]
    NotFound { url: String, status: StatusCode },

    /// The server answered with a non-success status other than "not found".
    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: StatusCode },

    /// I/O Error.
    ///
    /// Raised by file operations on the downloaded file, outside extraction.
    #[error("I/O error: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the middleware stack (retries, tracing) wrapping Reqwest.
    #[error("HTTP middleware error: {source}")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// Failure while reading the archive or writing one of its entries.
    #[error("Archive error: {message}")]
    Archive {
        message: String,
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The run observed its cancellation token.
    #[error("Download cancelled")]
    Cancelled,
}

impl Error {
    /// Build an [`Error::Archive`] wrapping the underlying cause.
    pub(crate) fn archive<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Archive {
            message: format!("{}: {}", message.into(), cause),
            cause: Some(Box::new(cause)),
        }
    }

    /// Classify the error for the progress sink.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Error::NotFound { .. } => ErrorKind::ResourceNotFound,
            Error::Archive { .. } => ErrorKind::ExtractError,
            Error::Cancelled => ErrorKind::Cancelled,
            Error::Reqwest { source } if source.is_builder() => ErrorKind::InvalidUrl,
            Error::Reqwest { source } if source.status() == Some(StatusCode::NOT_FOUND) => {
                ErrorKind::ResourceNotFound
            }
            Error::Internal(_)
            | Error::HttpStatus { .. }
            | Error::IOError { .. }
            | Error::Reqwest { .. }
            | Error::Middleware { .. } => ErrorKind::TransferError,
        }
    }
}

/// Coarse classification of a failed run.
///
/// `Cancelled` is never reported through a `Failed` event; it only shows up
/// in a run's [`Status`](crate::Status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidUrl,
    ResourceNotFound,
    TransferError,
    ExtractError,
    Cancelled,
}

impl ErrorKind {
    /// English message the UI may show (or localize) for this kind.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::InvalidUrl => "The download URL is not valid.",
            ErrorKind::ResourceNotFound => "The requested file could not be found.",
            ErrorKind::TransferError => "An error occurred while downloading the file.",
            ErrorKind::ExtractError => "The downloaded archive could not be extracted.",
            ErrorKind::Cancelled => "The download was cancelled.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidUrl => "invalid-url",
            ErrorKind::ResourceNotFound => "resource-not-found",
            ErrorKind::TransferError => "transfer-error",
            ErrorKind::ExtractError => "extract-error",
            ErrorKind::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Result type alias for operations that can fail with a fetchpack error.
pub type Result<T> = std::result::Result<T, Error>;
