//! ZIP extraction.
//!
//! The archive is opened through its central directory, so entries whose
//! sizes only appear in a trailing data descriptor (as written by streaming
//! zip writers) extract like any other. Entries are written in directory
//! order, which need not list parents first: a file such as `a/b/c/file.txt`
//! can precede (or entirely lack) the directory markers for `a/`, `a/b/` and
//! `a/b/c/`, so the parent chain of every output path is created recursively
//! before it is written.
//!
//! Extraction does not roll back. If an entry fails, everything written before
//! it stays on disk.

use crate::error::{Error, Result};

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::ZipArchive;

/// Default size of the buffer used to copy entry content.
pub const DEFAULT_EXTRACT_BUFFER_SIZE: usize = 8192;
/// Smallest accepted copy buffer.
pub const MIN_EXTRACT_BUFFER_SIZE: usize = 1024;

/// One entry of an archive, as seen while reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path of the entry relative to the extraction directory.
    pub relative_path: PathBuf,
    /// Whether the entry only marks a directory.
    pub is_directory: bool,
}

/// Extracts zip archives into a directory.
///
/// ```rust,no_run
/// use fetchpack::archive::ArchiveExtractor;
/// use std::path::Path;
///
/// # fn main() -> fetchpack::Result<()> {
/// let written = ArchiveExtractor::new()
///     .extract(Path::new("models.zip"), Path::new("models/vision"))?;
/// println!("{written} entries extracted");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveExtractor {
    buffer_size: usize,
}

impl Default for ArchiveExtractor {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_EXTRACT_BUFFER_SIZE,
        }
    }
}

impl ArchiveExtractor {
    /// Creates an extractor with the default buffer size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor copying entries with the given buffer size.
    ///
    /// Sizes below [`MIN_EXTRACT_BUFFER_SIZE`] are raised to it.
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(MIN_EXTRACT_BUFFER_SIZE),
        }
    }

    /// Gets the copy buffer size.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Extract every entry of `archive_path` under `destination_dir`.
    ///
    /// Returns the number of entries written (files and directory markers).
    /// Existing files at an entry's output path are overwritten. A zero-byte
    /// archive holds no entries and extracts to an empty directory.
    pub fn extract(&self, archive_path: &Path, destination_dir: &Path) -> Result<usize> {
        debug!("Creating extraction directory {:?}", destination_dir);
        fs::create_dir_all(destination_dir).map_err(|e| {
            Error::archive(
                format!("Failed to create directory {}", destination_dir.display()),
                e,
            )
        })?;

        let file = File::open(archive_path).map_err(|e| {
            Error::archive(
                format!("Failed to open archive {}", archive_path.display()),
                e,
            )
        })?;

        let archive_len = file
            .metadata()
            .map_err(|e| Error::archive("Failed to read archive metadata", e))?
            .len();
        if archive_len == 0 {
            info!("Archive {:?} is empty, nothing to extract", archive_path);
            return Ok(0);
        }

        let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| {
            Error::archive(
                format!("Failed to read archive {}", archive_path.display()),
                e,
            )
        })?;

        let mut buffer = vec![0u8; self.buffer_size];
        let mut written = 0;

        for i in 0..archive.len() {
            let mut zip_file = archive
                .by_index(i)
                .map_err(|e| Error::archive(format!("Failed to read archive entry {}", i), e))?;

            let Some(relative_path) = zip_file.enclosed_name() else {
                warn!(
                    "Skipping entry {:?}: it resolves outside the extraction directory",
                    zip_file.name()
                );
                continue;
            };
            let entry = ArchiveEntry {
                relative_path,
                is_directory: zip_file.is_dir(),
            };

            self.write_entry(&entry, &mut zip_file, destination_dir, &mut buffer)?;
            written += 1;
        }

        info!(
            "Extracted {} entries from {:?} into {:?}",
            written, archive_path, destination_dir
        );
        Ok(written)
    }

    /// Write a single entry below `destination_dir`.
    fn write_entry<R: Read>(
        &self,
        entry: &ArchiveEntry,
        content: &mut R,
        destination_dir: &Path,
        buffer: &mut [u8],
    ) -> Result<()> {
        let output = destination_dir.join(&entry.relative_path);

        if entry.is_directory {
            debug!("Creating directory {:?}", output);
            return fs::create_dir_all(&output).map_err(|e| {
                Error::archive(format!("Failed to create directory {}", output.display()), e)
            });
        }

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::archive(format!("Failed to create directory {}", parent.display()), e)
            })?;
        }

        debug!("Extracting {:?}", output);
        let mut out = File::create(&output).map_err(|e| {
            Error::archive(format!("Failed to create file {}", output.display()), e)
        })?;
        copy_chunked(content, &mut out, buffer).map_err(|e| {
            Error::archive(format!("Failed to extract {}", entry.relative_path.display()), e)
        })?;

        Ok(())
    }
}

/// Copy `reader` into `writer` one buffer at a time.
fn copy_chunked<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut [u8],
) -> io::Result<u64> {
    let mut total = 0;
    loop {
        let read = match reader.read(buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buffer[..read])?;
        total += read as u64;
    }
    writer.flush()?;
    Ok(total)
}
