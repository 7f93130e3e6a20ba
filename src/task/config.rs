//! Configuration structures and defaults for the download task.
//!
//! # Example
//!
//! ```rust
//! use fetchpack::task::TaskConfig;
//!
//! let config = TaskConfig::default();
//! assert_eq!(config.chunk_size, 4096);
//! assert_eq!(config.models_dir, "models");
//! assert!(config.keep_archive);
//! ```

use crate::archive::DEFAULT_EXTRACT_BUFFER_SIZE;
use crate::download::DEFAULT_FILE_NAME;
use crate::http::HttpClientConfig;

use reqwest::header::HeaderMap;
use std::time::Duration;

/// Size of the chunks written to the local file.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;
/// Directory, below the destination root, holding the extracted categories.
pub const DEFAULT_MODELS_DIR: &str = "models";

/// Configuration structure for the download task.
#[derive(Clone, Debug)]
pub struct TaskConfig {
    /// Number of retries for transient HTTP failures.
    pub retries: u32,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Optional proxy.
    pub proxy: Option<reqwest::Proxy>,
    /// Connect timeout. No timeout by default.
    pub connect_timeout: Option<Duration>,
    /// Size of the chunks written to disk, and the granularity of
    /// cancellation and progress events.
    pub chunk_size: usize,
    /// Copy buffer used while extracting entries.
    pub extract_buffer_size: usize,
    /// File name used when the URL does not provide one.
    pub default_file_name: String,
    /// Name of the directory, below the destination root, that receives
    /// `<category>/` folders.
    pub models_dir: String,
    /// Keep the downloaded archive once it has been extracted.
    pub keep_archive: bool,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            headers: None,
            proxy: None,
            connect_timeout: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            extract_buffer_size: DEFAULT_EXTRACT_BUFFER_SIZE,
            default_file_name: DEFAULT_FILE_NAME.to_string(),
            models_dir: DEFAULT_MODELS_DIR.to_string(),
            keep_archive: true,
        }
    }
}

impl TaskConfig {
    /// HTTP client settings derived from this configuration.
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            retries: self.retries,
            proxy: self.proxy.clone(),
            headers: self.headers.clone(),
            connect_timeout: self.connect_timeout,
        }
    }
}
