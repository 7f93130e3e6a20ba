#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use fetchpack::progress::{ProgressBarOpts, StyleOptions};
use fetchpack::{DownloadTask, DownloadTaskBuilder, HttpClientConfig, ProgressEvent, ProgressReporter};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

// Common test constants
pub const TEST_DOMAIN: &str = "http://domain.com/file.zip";
pub const TEST_USER_AGENT: &str = "fetchpack-test-agent";
pub const TEST_CATEGORY: &str = "vision";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

/// Asserts that a file has the expected size
pub fn assert_file_size(path: &Path, expected_size: u64) {
    let metadata = fs::metadata(path).expect("Failed to get file metadata");
    assert_eq!(
        metadata.len(),
        expected_size,
        "File size mismatch at path: {:?}",
        path
    );
}

/// Asserts that a directory holds no entries at all
pub fn assert_dir_empty(path: &Path) {
    let entries: Vec<_> = fs::read_dir(path)
        .expect("Failed to read directory")
        .collect();
    assert!(entries.is_empty(), "Directory should be empty: {:?}", path);
}

// === Archive Helpers ===

/// Builds a zip archive in memory, file entries only, in the given order
pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("Failed to start zip entry");
        writer.write_all(content).expect("Failed to write zip entry");
    }
    writer.finish().expect("Failed to finish zip").into_inner()
}

/// Builds a zip archive with explicit directory markers before the files
pub fn build_zip_with_dirs(dirs: &[&str], entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for dir in dirs {
        writer
            .add_directory(*dir, SimpleFileOptions::default())
            .expect("Failed to add zip directory");
    }
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("Failed to start zip entry");
        writer.write_all(content).expect("Failed to write zip entry");
    }
    writer.finish().expect("Failed to finish zip").into_inner()
}

/// Builds a zip archive whose entries are stored without compression
pub fn build_stored_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, options)
            .expect("Failed to start zip entry");
        writer.write_all(content).expect("Failed to write zip entry");
    }
    writer.finish().expect("Failed to finish zip").into_inner()
}

/// CRC-32 (IEEE) of `data`.
fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for byte in data {
        crc ^= *byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

/// Builds a stored zip archive the way streaming writers do: the local
/// headers carry zero sizes and CRC (general purpose flag bit 3), and the
/// real values follow each entry in a data descriptor.
pub fn build_data_descriptor_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    const FLAG_DATA_DESCRIPTOR: u16 = 0x0008;
    let mut out: Vec<u8> = Vec::new();
    let mut central: Vec<u8> = Vec::new();

    for (name, content) in entries {
        let offset = out.len() as u32;
        let crc = crc32(content);
        let size = content.len() as u32;

        // Local file header
        out.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
        out.extend_from_slice(&20u16.to_le_bytes());
        out.extend_from_slice(&FLAG_DATA_DESCRIPTOR.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes()); // stored
        out.extend_from_slice(&0u16.to_le_bytes()); // time
        out.extend_from_slice(&0x0021u16.to_le_bytes()); // date 1980-01-01
        out.extend_from_slice(&0u32.to_le_bytes()); // crc
        out.extend_from_slice(&0u32.to_le_bytes()); // compressed size
        out.extend_from_slice(&0u32.to_le_bytes()); // uncompressed size
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(name.as_bytes());
        out.extend_from_slice(content);

        // Data descriptor
        out.extend_from_slice(&0x0807_4b50u32.to_le_bytes());
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(&size.to_le_bytes());

        // Central directory header
        central.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
        central.extend_from_slice(&20u16.to_le_bytes());
        central.extend_from_slice(&20u16.to_le_bytes());
        central.extend_from_slice(&FLAG_DATA_DESCRIPTOR.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&0x0021u16.to_le_bytes());
        central.extend_from_slice(&crc.to_le_bytes());
        central.extend_from_slice(&size.to_le_bytes());
        central.extend_from_slice(&size.to_le_bytes());
        central.extend_from_slice(&(name.len() as u16).to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes()); // extra
        central.extend_from_slice(&0u16.to_le_bytes()); // comment
        central.extend_from_slice(&0u16.to_le_bytes()); // disk
        central.extend_from_slice(&0u16.to_le_bytes()); // internal attributes
        central.extend_from_slice(&0u32.to_le_bytes()); // external attributes
        central.extend_from_slice(&offset.to_le_bytes());
        central.extend_from_slice(name.as_bytes());
    }

    let central_offset = out.len() as u32;
    let central_size = central.len() as u32;
    out.extend_from_slice(&central);

    // End of central directory
    out.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&central_size.to_le_bytes());
    out.extend_from_slice(&central_offset.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out
}

/// A small archive used by end-to-end tests
pub fn sample_archive() -> Vec<u8> {
    build_zip(&[
        ("weights/model.bin", &create_test_content(10_000)),
        ("labels.txt", b"cat\ndog\n"),
    ])
}

// === Reporter Helpers ===

/// Reporter recording every event it receives
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn count_connecting(events: &[ProgressEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, ProgressEvent::Connecting { .. }))
        .count()
}

pub fn count_started(events: &[ProgressEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, ProgressEvent::Started { .. }))
        .count()
}

pub fn count_terminal(events: &[ProgressEvent]) -> usize {
    events.iter().filter(|e| e.is_terminal()).count()
}

/// Byte counts of every `Progress` event, in order
pub fn progress_bytes(events: &[ProgressEvent]) -> Vec<u64> {
    events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::Progress {
                bytes_transferred, ..
            } => Some(*bytes_transferred),
            _ => None,
        })
        .collect()
}

/// Asserts the lifecycle ordering every run must respect
pub fn assert_event_order(events: &[ProgressEvent]) {
    assert!(
        matches!(events.first(), Some(ProgressEvent::Connecting { .. })),
        "First event should be Connecting: {:?}",
        events
    );
    assert_eq!(count_connecting(events), 1);
    assert!(count_started(events) <= 1);
    assert!(count_terminal(events) <= 1);

    if let Some(started_at) = events
        .iter()
        .position(|e| matches!(e, ProgressEvent::Started { .. }))
    {
        let first_progress = events
            .iter()
            .position(|e| matches!(e, ProgressEvent::Progress { .. }));
        if let Some(first_progress) = first_progress {
            assert!(started_at < first_progress, "Started must precede Progress");
        }
    }

    let bytes = progress_bytes(events);
    assert!(
        bytes.windows(2).all(|w| w[0] <= w[1]),
        "Progress must be non-decreasing: {:?}",
        bytes
    );

    if let Some(terminal_at) = events.iter().position(|e| e.is_terminal()) {
        assert_eq!(terminal_at, events.len() - 1, "Terminal event must be last");
    }
}

// === Mock Server Helpers ===

/// Serves `body` at `route` with status 200
pub async fn serve_bytes(server: &MockServer, route: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(server)
        .await;
}

/// Answers `route` with the given status and an empty body
pub async fn serve_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

// === HTTP Configuration Helpers ===

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

/// Creates test headers with custom user agent
pub fn create_test_headers_with_agent(agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_str(agent).expect("Invalid header value"));
    headers
}

/// Creates a test HTTP client configuration
pub fn create_test_http_config() -> HttpClientConfig {
    HttpClientConfig {
        retries: 3,
        headers: Some(create_test_headers()),
        ..HttpClientConfig::default()
    }
}

/// Creates a test HTTP client configuration with custom retries
pub fn create_test_http_config_with_retries(retries: u32) -> HttpClientConfig {
    HttpClientConfig {
        retries,
        headers: Some(create_test_headers()),
        ..HttpClientConfig::default()
    }
}

// === Task Helpers ===

/// Creates a task that does not retry, so error tests stay fast
pub fn create_test_task() -> DownloadTask {
    create_test_task_builder().build()
}

/// Creates a task builder with test defaults
pub fn create_test_task_builder() -> DownloadTaskBuilder {
    DownloadTaskBuilder::new()
        .retries(0)
        .headers(create_test_headers())
}

// === Progress Bar Helpers ===

/// Creates hidden progress bar options for testing
pub fn create_hidden_progress_opts() -> ProgressBarOpts {
    ProgressBarOpts::hidden()
}

/// Creates pip-style progress bar options for testing
pub fn create_pip_style_progress_opts() -> ProgressBarOpts {
    ProgressBarOpts::with_pip_style()
}

/// Creates custom progress bar options with template and chars
pub fn create_custom_progress_opts(template: &str, chars: &str) -> ProgressBarOpts {
    ProgressBarOpts::new(
        Some(template.to_string()),
        Some(chars.to_string()),
        true,
        false
    )
}

/// Creates disabled style options for testing
pub fn create_disabled_style_options() -> StyleOptions {
    StyleOptions::new(create_hidden_progress_opts(), create_hidden_progress_opts())
}

/// Asserts that progress bar options are disabled
pub fn assert_progress_opts_disabled(opts: &ProgressBarOpts) {
    let pb = opts.clone().to_progress_bar(100);
    assert!(pb.is_hidden(), "Progress bar should be disabled");
}
