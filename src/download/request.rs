//! The immutable description of a run.
//!
//! # Examples
//!
//! ```rust
//! use fetchpack::download::DownloadRequest;
//! use std::path::Path;
//!
//! let request = DownloadRequest::new("https://example.com/packs/vision.zip", "vision", "/data");
//! let url = request.parse_url()?;
//! assert_eq!(request.file_name_for(&url, "file.bin"), "vision.zip");
//! assert_eq!(request.extraction_dir("models"), Path::new("/data/models/vision"));
//! # Ok::<(), fetchpack::Error>(())
//! ```

use crate::error::Error;

use percent_encoding::percent_decode_str;
use reqwest::Url;
use std::path::{Path, PathBuf};

/// File name used when the URL has no usable final path segment.
pub const DEFAULT_FILE_NAME: &str = "file.bin";

/// What to download, and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    source_url: String,
    category: String,
    destination_root: PathBuf,
}

impl DownloadRequest {
    /// Creates a new [`DownloadRequest`].
    ///
    /// The URL is not checked here; the run parses it and reports an
    /// `InvalidUrl` failure through the progress sink if it is malformed.
    ///
    /// The category is used verbatim as a path segment below
    /// `<destination_root>/models`.
    pub fn new(
        source_url: impl Into<String>,
        category: impl Into<String>,
        destination_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            category: category.into(),
            destination_root: destination_root.into(),
        }
    }

    /// Get the source URL as given.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Get the category (destination subfolder name).
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Get the directory receiving the downloaded file.
    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    /// Parse the source URL.
    ///
    /// Only absolute `http` and `https` URLs are accepted.
    pub fn parse_url(&self) -> Result<Url, Error> {
        let url = Url::parse(&self.source_url).map_err(|e| {
            Error::InvalidUrl(format!(
                "The url \"{}\" cannot be parsed: {}",
                self.source_url, e
            ))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(Error::InvalidUrl(format!(
                "The url \"{}\" uses the unsupported scheme \"{}\"",
                self.source_url, scheme
            ))),
        }
    }

    /// Local file name for the downloaded resource.
    pub fn file_name_for(&self, url: &Url, default_name: &str) -> String {
        derive_file_name(url, default_name)
    }

    /// Path of the downloaded file.
    pub fn archive_path(&self, file_name: &str) -> PathBuf {
        self.destination_root.join(file_name)
    }

    /// Directory the archive is extracted into.
    pub fn extraction_dir(&self, models_dir: &str) -> PathBuf {
        self.destination_root.join(models_dir).join(&self.category)
    }
}

/// Derive a file name from the final path segment of `url`.
///
/// The segment is percent-decoded. An empty segment (URL ending in `/`),
/// a URL without path segments, or a segment that decodes to `.`/`..`
/// yields `default_name`. Separators that appear after decoding are
/// replaced so the name always stays a single path component.
pub fn derive_file_name(url: &Url, default_name: &str) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .map(decode_segment)
        .filter(|name| !name.is_empty() && name != "." && name != "..")
        .unwrap_or_else(|| default_name.to_string())
}

fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment)
        .decode_utf8_lossy()
        .replace(['/', '\\'], "_")
}
