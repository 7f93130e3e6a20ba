//! Lifecycle and progress events emitted by a download run.

use crate::download::TransferState;
use crate::error::ErrorKind;

/// An event emitted by a run to its [`ProgressReporter`](super::ProgressReporter).
///
/// A run emits, in order: one `Connecting`, at most one `Started`, any number
/// of `Progress` with non-decreasing counts, then at most one terminal event
/// (`Completed` or `Failed`). A cancelled run stops without a terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// About to open a connection to `url`.
    Connecting { url: String },
    /// The response headers were received and the local file is about to be
    /// written.
    Started {
        file_name: String,
        /// Advertised size in whole KB, `None` when the server did not say.
        total_size_kb: Option<u64>,
        /// Advertised size in bytes, `None` when the server did not say.
        total_bytes: Option<u64>,
    },
    /// A chunk was written to the local file.
    Progress {
        read_so_far_kb: u64,
        bytes_transferred: u64,
    },
    /// The file was downloaded and extracted.
    Completed,
    /// The run failed.
    Failed { kind: ErrorKind, message: String },
}

impl ProgressEvent {
    pub(crate) fn started(file_name: &str, state: &TransferState) -> Self {
        ProgressEvent::Started {
            file_name: file_name.to_string(),
            total_size_kb: state.total_size_kb(),
            total_bytes: state.total_bytes,
        }
    }

    pub(crate) fn progress(state: &TransferState) -> Self {
        ProgressEvent::Progress {
            read_so_far_kb: state.read_so_far_kb(),
            bytes_transferred: state.bytes_transferred,
        }
    }

    /// Whether this event ends the run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProgressEvent::Completed | ProgressEvent::Failed { .. })
    }
}
