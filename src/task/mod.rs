//! Task module containing the download pipeline, its builder and
//! configuration, and the background supervisor.
//!
//! # Overview
//!
//! - `task` - [`DownloadTask`], the download-then-extract pipeline
//! - `builder` - [`DownloadTaskBuilder`] for configuring a task
//! - `config` - [`TaskConfig`] and defaults
//! - `supervisor` - [`TaskSupervisor`], [`TaskHandle`] and [`CancelToken`]
//!
//! # Example
//!
//! ```rust,no_run
//! use fetchpack::download::DownloadRequest;
//! use fetchpack::progress::BarReporter;
//! use fetchpack::task::{DownloadTaskBuilder, TaskSupervisor};
//!
//! # async fn example() -> fetchpack::Result<()> {
//! let task = DownloadTaskBuilder::new().retries(2).build();
//! let request = DownloadRequest::new("https://example.com/packs/vision.zip", "vision", "./data");
//!
//! let handle = TaskSupervisor::spawn(task, request, BarReporter::default());
//! let summary = handle.join().await?;
//! println!("{:?}", summary.status());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod supervisor;
#[allow(clippy::module_inception)]
pub mod task;

pub use builder::DownloadTaskBuilder;
pub use config::{TaskConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MODELS_DIR};
pub use supervisor::{CancelToken, TaskHandle, TaskSupervisor};
pub use task::DownloadTask;
