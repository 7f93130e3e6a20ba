//! Fetchpack downloads a remote archive over HTTP(S), streams it to disk
//! while reporting progress, then unpacks it into a category folder.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fetchpack::{DownloadRequest, DownloadTaskBuilder, ProgressEvent, TaskSupervisor};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), fetchpack::Error> {
//! let request = DownloadRequest::new(
//!     "https://example.com/packs/vision.zip",
//!     "vision",
//!     "./data",
//! );
//! let task = DownloadTaskBuilder::new().build();
//! let sink = |event: ProgressEvent| println!("{event:?}");
//!
//! let handle = TaskSupervisor::spawn(task, request, sink);
//! let summary = handle.join().await?;
//! // ./data/vision.zip and ./data/models/vision/...
//! println!("{:?}", summary.status());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`archive`] - Zip extraction
//! - [`download`] - Request, transfer state and run summary
//! - [`error`] - The `Error` enum and its `ErrorKind` classification
//! - [`http`] - HTTP client with retry and tracing middleware
//! - [`progress`] - Progress events, reporters and progress bar styles
//! - [`task`] - The download task, its builder and the background supervisor
//! - [`utils`] - Shared utility functions

pub mod archive;
pub mod download;
pub mod error;
pub mod http;
pub mod progress;
pub mod task;
pub mod utils;

pub use archive::{ArchiveEntry, ArchiveExtractor};
pub use download::{DownloadRequest, DownloadedFile, Status, Summary, TransferState};
pub use error::{Error, ErrorKind, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::{BarReporter, ProgressBarOpts, ProgressEvent, ProgressReporter, StyleOptions};
pub use task::{CancelToken, DownloadTask, DownloadTaskBuilder, TaskHandle, TaskSupervisor};
