//! The download-then-extract pipeline.
//!
//! [`DownloadTask::run`] connects to the source URL, streams the body to
//! `<destination_root>/<file name>` one chunk at a time, then unpacks the
//! file into `<destination_root>/<models dir>/<category>`. It reports every
//! step to a [`ProgressReporter`] and polls a [`CancelToken`] before
//! connecting and before every chunk.
//!
//! # Example
//!
//! ```rust,no_run
//! use fetchpack::download::DownloadRequest;
//! use fetchpack::progress::ProgressEvent;
//! use fetchpack::task::{CancelToken, DownloadTaskBuilder};
//!
//! # async fn example() {
//! let task = DownloadTaskBuilder::new().build();
//! let request = DownloadRequest::new("https://example.com/packs/vision.zip", "vision", "/data");
//! let sink = |event: ProgressEvent| println!("{event:?}");
//!
//! let summary = task.run(&request, &sink, &CancelToken::new()).await;
//! println!("{:?}", summary.status());
//! # }
//! ```

use super::config::TaskConfig;
use super::supervisor::CancelToken;
use crate::archive::ArchiveExtractor;
use crate::download::{DownloadRequest, DownloadedFile, Status, Summary, TransferState};
use crate::error::{Error, Result};
use crate::http::create_http_client;
use crate::progress::{ProgressEvent, ProgressReporter};
use crate::utils::advertised_length;

use futures::stream::StreamExt;
use reqwest::{Response, StatusCode, Url};
use std::fmt;
use std::fmt::Debug;
use std::io;
use std::path::{Path, PathBuf};
use tokio::{fs, fs::File, io::AsyncWriteExt};
use tracing::{debug, info, warn};

/// What a successful run produced.
struct Extracted {
    file: DownloadedFile,
    directory: PathBuf,
    entries: usize,
}

/// Downloads a resource and extracts it.
///
/// A task holds configuration only; every [`run`](DownloadTask::run) owns its
/// own HTTP client, response stream and file handles. A task can be shared
/// and run several times.
///
/// ```rust
/// use fetchpack::task::DownloadTaskBuilder;
///
/// let task = DownloadTaskBuilder::new().build();
/// assert_eq!(task.retries(), 3);
/// ```
#[derive(Clone)]
pub struct DownloadTask {
    config: TaskConfig,
}

impl Debug for DownloadTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadTask")
            .field("config", &self.config)
            .finish()
    }
}

impl DownloadTask {
    /// Creates a new task with the given configuration.
    pub(crate) fn new(config: TaskConfig) -> Self {
        Self { config }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Gets the number of retries for transient HTTP failures.
    pub fn retries(&self) -> u32 {
        self.config.retries
    }

    /// Gets the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size
    }

    /// Gets whether the archive is kept after extraction.
    pub fn keep_archive(&self) -> bool {
        self.config.keep_archive
    }

    /// Gets the name of the extraction parent directory.
    pub fn models_dir(&self) -> &str {
        &self.config.models_dir
    }

    /// Run the pipeline for `request`.
    ///
    /// Never fails: errors are reported to `sink` as a single
    /// [`ProgressEvent::Failed`] and recorded in the returned [`Summary`].
    /// A cancelled run deletes its partial file and emits no terminal event.
    pub async fn run(
        &self,
        request: &DownloadRequest,
        sink: &dyn ProgressReporter,
        cancel: &CancelToken,
    ) -> Summary {
        sink.report(ProgressEvent::Connecting {
            url: request.source_url().to_string(),
        });

        let mut state = TransferState::default();
        match self.execute(request, sink, cancel, &mut state).await {
            Ok(extracted) => {
                sink.report(ProgressEvent::Completed);
                info!(
                    "Completed {} ({} bytes, {} entries)",
                    request.source_url(),
                    extracted.file.size_bytes,
                    extracted.entries
                );
                Summary::new(request.clone(), Status::Completed)
                    .with_file(extracted.file)
                    .with_extraction(extracted.directory, extracted.entries)
            }
            Err(Error::Cancelled) => {
                info!(
                    "Cancelled {} after {} bytes",
                    request.source_url(),
                    state.bytes_transferred
                );
                Summary::new(request.clone(), Status::Cancelled).with_size(state.bytes_transferred)
            }
            Err(e) => {
                warn!("Download of {} failed: {}", request.source_url(), e);
                sink.report(ProgressEvent::Failed {
                    kind: e.kind(),
                    message: e.to_string(),
                });
                Summary::failed(request.clone(), &e).with_size(state.bytes_transferred)
            }
        }
    }

    async fn execute(
        &self,
        request: &DownloadRequest,
        sink: &dyn ProgressReporter,
        cancel: &CancelToken,
        state: &mut TransferState,
    ) -> Result<Extracted> {
        let url = request.parse_url()?;
        cancel.check()?;

        let client = create_http_client(self.config.http_config())
            .map_err(|e| Error::Internal(format!("Failed to build the HTTP client: {}", e)))?;

        debug!("Fetching {}", url);
        let res = client.get(url.clone()).send().await?;
        check_status(&url, res.status())?;

        *state = TransferState::new(advertised_length(res.headers()));
        let file_name = request.file_name_for(&url, &self.config.default_file_name);
        let output = request.archive_path(&file_name);

        debug!("Creating destination directory {:?}", request.destination_root());
        fs::create_dir_all(request.destination_root()).await?;

        sink.report(ProgressEvent::started(&file_name, state));

        let file = match self.transfer(res, &output, sink, cancel, state).await {
            Ok(file) => file,
            Err(e) => {
                remove_partial(&output).await;
                return Err(e);
            }
        };

        if let Err(e) = cancel.check() {
            remove_partial(&output).await;
            return Err(e);
        }

        let directory = request.extraction_dir(&self.config.models_dir);
        let entries = self.extract(&file.local_path, &directory).await?;

        if !self.config.keep_archive {
            debug!("Removing archive {:?}", file.local_path);
            if let Err(e) = fs::remove_file(&file.local_path).await {
                warn!("Failed to remove archive {:?}: {}", file.local_path, e);
            }
        }

        Ok(Extracted {
            file,
            directory,
            entries,
        })
    }

    /// Stream the response body into `output`.
    async fn transfer(
        &self,
        res: Response,
        output: &Path,
        sink: &dyn ProgressReporter,
        cancel: &CancelToken,
        state: &mut TransferState,
    ) -> Result<DownloadedFile> {
        debug!("Creating destination file {:?}", output);
        let mut file = File::create(output).await?;

        debug!("Retrieving chunks...");
        let mut stream = res.bytes_stream();
        loop {
            cancel.check()?;
            let Some(item) = stream.next().await else {
                break;
            };
            let chunk = item?;

            for piece in chunk.chunks(self.config.chunk_size) {
                cancel.check()?;
                file.write_all(piece).await?;
                state.advance(piece.len());
                sink.report(ProgressEvent::progress(state));
            }
        }

        file.flush().await?;
        drop(file);

        if state.bytes_transferred == 0 {
            sink.report(ProgressEvent::progress(state));
        }

        Ok(DownloadedFile {
            local_path: output.to_path_buf(),
            size_bytes: state.bytes_transferred,
        })
    }

    /// Extract on the blocking pool; the run waits for it.
    async fn extract(&self, archive: &Path, directory: &Path) -> Result<usize> {
        let extractor = ArchiveExtractor::with_buffer_size(self.config.extract_buffer_size);
        let archive = archive.to_path_buf();
        let directory = directory.to_path_buf();

        info!("Extracting {:?} into {:?}", archive, directory);
        tokio::task::spawn_blocking(move || extractor.extract(&archive, &directory))
            .await
            .map_err(|e| Error::archive("Extraction worker failed", e))?
    }
}

/// Map the response status onto the error taxonomy.
fn check_status(url: &Url, status: StatusCode) -> Result<()> {
    if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
        return Err(Error::NotFound {
            url: url.to_string(),
            status,
        });
    }
    if !status.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status,
        });
    }
    Ok(())
}

/// Delete a partially written file.
async fn remove_partial(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!("Removed partial file {:?}", path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove partial file {:?}: {}", path, e),
    }
}
