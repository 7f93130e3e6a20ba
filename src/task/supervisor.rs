//! Running a task in the background.
//!
//! [`TaskSupervisor::spawn`] moves a run onto its own tokio task and returns a
//! [`TaskHandle`] the caller keeps on its side. The handle's [`CancelToken`]
//! and the progress reporter are the only state shared with the worker.
//!
//! ```rust,no_run
//! use fetchpack::download::DownloadRequest;
//! use fetchpack::progress::ProgressEvent;
//! use fetchpack::task::{DownloadTaskBuilder, TaskSupervisor};
//!
//! # async fn example() -> fetchpack::Result<()> {
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ProgressEvent>();
//! let request = DownloadRequest::new("https://example.com/a.zip", "vision", "/data");
//! let handle = TaskSupervisor::spawn(DownloadTaskBuilder::new().build(), request, tx);
//!
//! while let Some(event) = rx.recv().await {
//!     println!("{event:?}");
//! }
//! let summary = handle.join().await?;
//! # Ok(())
//! # }
//! ```

use super::task::DownloadTask;
use crate::download::{DownloadRequest, Summary};
use crate::error::{Error, Result};
use crate::progress::ProgressReporter;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Cooperative cancellation flag.
///
/// Clones share the same flag. Setting it never blocks, and the worker polls
/// it between chunks, so a run stops within one chunk of I/O.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// `Err(Error::Cancelled)` once cancellation was requested.
    pub(crate) fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }
}

/// Spawns download runs on the tokio runtime.
pub struct TaskSupervisor;

impl TaskSupervisor {
    /// Start a run of `task` for `request`, reporting to `sink`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<R>(task: DownloadTask, request: DownloadRequest, sink: R) -> TaskHandle
    where
        R: ProgressReporter + 'static,
    {
        Self::spawn_with_token(task, request, sink, CancelToken::new())
    }

    /// Start a run that observes an existing `cancel` token.
    pub fn spawn_with_token<R>(
        task: DownloadTask,
        request: DownloadRequest,
        sink: R,
        cancel: CancelToken,
    ) -> TaskHandle
    where
        R: ProgressReporter + 'static,
    {
        debug!("Spawning download of {}", request.source_url());
        let token = cancel.clone();
        let handle = tokio::spawn(async move { task.run(&request, &sink, &token).await });
        TaskHandle { cancel, handle }
    }
}

/// The caller's side of a spawned run.
#[derive(Debug)]
pub struct TaskHandle {
    cancel: CancelToken,
    handle: JoinHandle<Summary>,
}

impl TaskHandle {
    /// Request cancellation of the run.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Get a clone of the run's cancellation token.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Whether the run has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the run to finish.
    ///
    /// Fails only if the worker panicked or was aborted.
    pub async fn join(self) -> Result<Summary> {
        self.handle
            .await
            .map_err(|e| Error::Internal(format!("Download worker failed: {}", e)))
    }
}
