//! Download module containing the data model of a run.
//!
//! # Overview
//!
//! - [`request`] - [`DownloadRequest`] and file name derivation
//! - [`state`] - [`TransferState`] and [`DownloadedFile`]
//! - [`summary`] - [`Summary`] and [`Status`] returned by a run
//!
//! # Examples
//!
//! ```rust
//! use fetchpack::download::{derive_file_name, DEFAULT_FILE_NAME};
//! use reqwest::Url;
//!
//! let url = Url::parse("https://example.com/packs/")?;
//! assert_eq!(derive_file_name(&url, DEFAULT_FILE_NAME), "file.bin");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod request;
pub mod state;
pub mod summary;

pub use request::{derive_file_name, DownloadRequest, DEFAULT_FILE_NAME};
pub use state::{DownloadedFile, TransferState};
pub use summary::{Status, Summary};
