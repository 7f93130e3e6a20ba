//! Terminal progress display.
//!
//! [`BarReporter`] turns the events of a run into a single `indicatif` bar:
//! a spinner while connecting (and for the whole transfer when the size is
//! unknown), a sized bar once the server advertised a length.
//!
//! ```rust
//! use fetchpack::progress::{BarReporter, ProgressEvent, ProgressReporter, StyleOptions};
//!
//! let reporter = BarReporter::new(StyleOptions::hidden());
//! reporter.report(ProgressEvent::Connecting { url: "https://example.com/a.zip".into() });
//! reporter.report(ProgressEvent::Completed);
//! ```

use super::{ProgressEvent, ProgressReporter, StyleOptions};

use indicatif::ProgressBar;
use std::sync::Mutex;

/// Progress reporter drawing on the terminal.
pub struct BarReporter {
    style_options: StyleOptions,
    bar: Mutex<Option<ProgressBar>>,
}

impl Default for BarReporter {
    fn default() -> Self {
        Self::new(StyleOptions::default())
    }
}

impl BarReporter {
    /// Create a reporter with the given styles.
    pub fn new(style_options: StyleOptions) -> Self {
        Self {
            style_options,
            bar: Mutex::new(None),
        }
    }

    /// Create a reporter that never draws.
    pub fn hidden() -> Self {
        Self::new(StyleOptions::hidden())
    }

    /// Get the bar of the current run, once the run started connecting.
    pub fn bar(&self) -> Option<ProgressBar> {
        self.bar.lock().ok().and_then(|slot| slot.clone())
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(slot) = self.bar.lock() {
            if let Some(bar) = slot.as_ref() {
                f(bar);
            }
        }
    }

    fn connecting(&self, url: &str) {
        let opts = if self.style_options.unsized_().enabled {
            self.style_options.unsized_()
        } else {
            self.style_options.sized()
        };
        let bar = opts.clone().to_progress_bar(0);
        bar.set_message(format!("Connecting to {url}"));
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn started(&self, file_name: &str, total_bytes: Option<u64>) {
        let sized = self.style_options.sized().clone();
        self.with_bar(|bar| {
            if let Some(total) = total_bytes.filter(|total| *total > 0) {
                if sized.enabled {
                    bar.set_style(sized.to_progress_style());
                }
                bar.set_length(total);
            }
            bar.set_message(file_name.to_string());
        });
    }

    fn finish(&self, message: Option<String>) {
        let clear = self.style_options.sized().clear || self.style_options.unsized_().clear;
        self.with_bar(|bar| match message {
            Some(message) => bar.abandon_with_message(message),
            None if clear => bar.finish_and_clear(),
            None => bar.finish(),
        });
    }
}

impl ProgressReporter for BarReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Connecting { url } => self.connecting(&url),
            ProgressEvent::Started {
                file_name,
                total_bytes,
                ..
            } => self.started(&file_name, total_bytes),
            ProgressEvent::Progress {
                bytes_transferred, ..
            } => self.with_bar(|bar| bar.set_position(bytes_transferred)),
            ProgressEvent::Completed => self.finish(None),
            ProgressEvent::Failed { kind, message } => {
                self.finish(Some(format!("{}: {}", kind.default_message(), message)))
            }
        }
    }
}
