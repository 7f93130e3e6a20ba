//! Builder pattern implementation for creating [`DownloadTask`] instances.
//!
//! # Examples
//!
//! ```rust
//! use fetchpack::task::DownloadTaskBuilder;
//! use reqwest::header::{HeaderValue, USER_AGENT};
//!
//! let task = DownloadTaskBuilder::new()
//!     .retries(1)
//!     .chunk_size(8192)
//!     .header(USER_AGENT, HeaderValue::from_static("MyApp/1.0"))
//!     .keep_archive(false)
//!     .build();
//!
//! assert_eq!(task.chunk_size(), 8192);
//! assert!(!task.keep_archive());
//! ```

use super::{config::TaskConfig, task::DownloadTask};
use crate::archive::MIN_EXTRACT_BUFFER_SIZE;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::time::Duration;

/// A builder used to create a [`DownloadTask`].
#[derive(Default)]
pub struct DownloadTaskBuilder {
    config: TaskConfig,
}

impl DownloadTaskBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloadTaskBuilder::default()
    }

    /// Set the number of retries for transient HTTP failures.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Route requests through a proxy.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Give up connecting after `timeout`.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Set the size of the chunks written to disk.
    ///
    /// A size of zero is raised to one byte.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size.max(1);
        self
    }

    /// Set the copy buffer used while extracting.
    ///
    /// Sizes below 1024 bytes are raised to 1024.
    pub fn extract_buffer_size(mut self, size: usize) -> Self {
        self.config.extract_buffer_size = size.max(MIN_EXTRACT_BUFFER_SIZE);
        self
    }

    /// Set the file name used when the URL does not provide one.
    pub fn default_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.default_file_name = name.into();
        self
    }

    /// Set the directory, below the destination root, receiving the
    /// extracted categories.
    pub fn models_dir(mut self, models_dir: impl Into<String>) -> Self {
        self.config.models_dir = models_dir.into();
        self
    }

    /// Keep (default) or delete the downloaded archive after extraction.
    pub fn keep_archive(mut self, keep: bool) -> Self {
        self.config.keep_archive = keep;
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// Can be called multiple times; all maps are merged into one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add a single http header.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`DownloadTask`] with the specified options.
    pub fn build(self) -> DownloadTask {
        DownloadTask::new(self.config)
    }
}
