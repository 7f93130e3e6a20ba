//! Per-run transfer bookkeeping.

use crate::utils::to_kb;

use std::path::PathBuf;

/// Byte accounting of a running transfer.
///
/// Owned by the run; events carry copies of its values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferState {
    /// Advertised size, `None` when unknown.
    pub total_bytes: Option<u64>,
    /// Bytes written to the local file so far.
    pub bytes_transferred: u64,
}

impl TransferState {
    /// Creates the state of a transfer of `total_bytes` (if known).
    pub fn new(total_bytes: Option<u64>) -> Self {
        Self {
            total_bytes,
            bytes_transferred: 0,
        }
    }

    /// Account for `len` more bytes and return the new total.
    pub fn advance(&mut self, len: usize) -> u64 {
        self.bytes_transferred += len as u64;
        self.bytes_transferred
    }

    /// Bytes transferred, in whole KB.
    pub fn read_so_far_kb(&self) -> u64 {
        to_kb(self.bytes_transferred)
    }

    /// Advertised size, in whole KB.
    pub fn total_size_kb(&self) -> Option<u64> {
        self.total_bytes.map(to_kb)
    }
}

/// A fully transferred file, ready for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    /// Where the file was written.
    pub local_path: PathBuf,
    /// Size of the file in bytes.
    pub size_bytes: u64,
}
