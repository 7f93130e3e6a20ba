//! Run summary functionality.
//!
//! Every run ends with a [`Summary`]. Its [`Status`] mirrors the terminal
//! event the progress sink received (`Completed` or `Failed`), or is
//! [`Status::Cancelled`] for a run that stopped on its cancellation token
//! without emitting one.
//!
//! ```rust
//! use fetchpack::download::{DownloadRequest, Status, Summary};
//!
//! let request = DownloadRequest::new("https://example.com/a.zip", "vision", "/data");
//! let summary = Summary::new(request, Status::Cancelled);
//! assert_eq!(summary.status(), &Status::Cancelled);
//! assert!(!summary.is_success());
//! ```

use super::request::DownloadRequest;
use super::state::DownloadedFile;
use crate::error::{Error, ErrorKind};

use std::path::{Path, PathBuf};

/// Terminal status of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Downloaded and extracted
    Completed,
    /// Failed with a classified error
    Failed { kind: ErrorKind, message: String },
    /// Stopped on the cancellation token
    Cancelled,
}

/// Represents the outcome of a run.
#[derive(Debug, Clone)]
pub struct Summary {
    request: DownloadRequest,
    status: Status,
    /// Bytes written to the local file.
    size: u64,
    /// The downloaded archive, when the transfer finished.
    file: Option<DownloadedFile>,
    /// Where the archive was extracted, when it was.
    extracted_to: Option<PathBuf>,
    /// Number of archive entries written.
    entries: usize,
}

impl Summary {
    /// Create a new [`Summary`] of a run of `request` that ended with `status`.
    pub fn new(request: DownloadRequest, status: Status) -> Self {
        Self {
            request,
            status,
            size: 0,
            file: None,
            extracted_to: None,
            entries: 0,
        }
    }

    /// Create the [`Summary`] of a run that failed with `error`.
    pub fn failed(request: DownloadRequest, error: &Error) -> Self {
        Self::new(
            request,
            Status::Failed {
                kind: error.kind(),
                message: error.to_string(),
            },
        )
    }

    /// Record the number of bytes written.
    pub fn with_size(self, size: u64) -> Self {
        Self { size, ..self }
    }

    /// Record the downloaded file.
    pub fn with_file(self, file: DownloadedFile) -> Self {
        Self {
            size: file.size_bytes,
            file: Some(file),
            ..self
        }
    }

    /// Record where the archive was extracted and how many entries were written.
    pub fn with_extraction(self, extracted_to: PathBuf, entries: usize) -> Self {
        Self {
            extracted_to: Some(extracted_to),
            entries,
            ..self
        }
    }

    /// Get a reference to the request.
    pub fn request(&self) -> &DownloadRequest {
        &self.request
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Get the number of bytes written.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get the downloaded file, if the transfer finished.
    pub fn file(&self) -> Option<&DownloadedFile> {
        self.file.as_ref()
    }

    /// Get the extraction directory, if extraction succeeded.
    pub fn extracted_to(&self) -> Option<&Path> {
        self.extracted_to.as_deref()
    }

    /// Get the number of archive entries written.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Whether the run completed.
    pub fn is_success(&self) -> bool {
        self.status == Status::Completed
    }

    /// The failure kind, if the run failed.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match &self.status {
            Status::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
