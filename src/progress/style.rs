//! Progress bar styling and configuration options.
//!
//! [`BarReporter`](super::BarReporter) draws one of two bars: a sized bar when
//! the server advertised a length, and a spinner when it did not (or when it
//! advertised zero bytes).
//!
//! # Examples
//!
//! ```rust
//! use fetchpack::progress::{ProgressBarOpts, StyleOptions};
//!
//! let style = StyleOptions::new(
//!     ProgressBarOpts::new(
//!         Some("[{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}".to_string()),
//!         Some(ProgressBarOpts::CHARS_FINE.to_string()),
//!         true,
//!         false,
//!     ),
//!     ProgressBarOpts::spinner(),
//! );
//! assert!(style.is_enabled());
//! ```

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::warn;

/// Define the style options for the sized and the unsized bar.
///
/// By default both bars stay on the screen once the run ends.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    /// Style of the bar used when the total size is known.
    pub(crate) sized: ProgressBarOpts,
    /// Style of the spinner used when the total size is unknown.
    pub(crate) unsized_: ProgressBarOpts,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            sized: ProgressBarOpts::with_pip_style(),
            unsized_: ProgressBarOpts::spinner(),
        }
    }
}

impl StyleOptions {
    /// Create new [`StyleOptions`].
    pub fn new(sized: ProgressBarOpts, unsized_: ProgressBarOpts) -> Self {
        Self { sized, unsized_ }
    }

    /// Style options with both bars hidden.
    pub fn hidden() -> Self {
        Self::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden())
    }

    /// Return `false` if neither bar is enabled.
    pub fn is_enabled(&self) -> bool {
        self.sized.enabled || self.unsized_.enabled
    }

    /// Get a reference to the sized bar options.
    pub fn sized(&self) -> &ProgressBarOpts {
        &self.sized
    }

    /// Get a reference to the spinner options.
    pub fn unsized_(&self) -> &ProgressBarOpts {
        &self.unsized_
    }
}

/// Define the options for a progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// Progress bar template string.
    template: Option<String>,
    /// Progression characters set.
    ///
    /// There must be at least 3 characters for the following states:
    /// "filled", "current", and "to do".
    progress_chars: Option<String>,
    /// Enable or disable the progress bar.
    pub(crate) enabled: bool,
    /// Clear the progress bar once completed.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: None,
            progress_chars: None,
            enabled: true,
            clear: false,
        }
    }
}

impl ProgressBarOpts {
    /// Template which looks like the Python package installer pip.
    ///
    /// `━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━ 211.23 KiB/211.23 KiB 1008.31 KiB/s eta 0s`
    pub const TEMPLATE_PIP: &'static str =
        "{msg} {bar:40.green/black} {bytes:>11.green}/{total_bytes:<11.green} {bytes_per_sec:>13.red} eta {eta:.blue}";
    /// Spinner with the byte count, for transfers of unknown size.
    pub const TEMPLATE_SPINNER: &'static str =
        "{spinner:.green} {msg} {bytes:>11.green} {bytes_per_sec:>13.red}";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// Use a line as progress characters: `"━╾─"`.
    pub const CHARS_LINE: &'static str = "━╾╴─";

    /// Create a new [`ProgressBarOpts`].
    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    ///
    /// An invalid template falls back to the indicatif default.
    pub fn to_progress_style(self) -> ProgressStyle {
        let mut style = ProgressStyle::default_bar();
        if let Some(template) = self.template {
            style = match ProgressStyle::default_bar().template(&template) {
                Ok(style) => style,
                Err(e) => {
                    warn!("Ignoring invalid progress template {:?}: {}", template, e);
                    style
                }
            };
        }
        if let Some(progress_chars) = self.progress_chars {
            style = style.progress_chars(&progress_chars);
        }
        style
    }

    /// Create a [`ProgressBar`] of length `len` based on the provided options.
    ///
    /// A disabled bar still tracks length and position but never draws.
    pub fn to_progress_bar(self, len: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::hidden());
        }

        let style = self.to_progress_style();
        ProgressBar::new(len).with_style(style)
    }

    /// Create a new [`ProgressBarOpts`] which looks like Python pip.
    pub fn with_pip_style() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_PIP.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_LINE.into()),
            enabled: true,
            clear: false,
        }
    }

    /// Create a new [`ProgressBarOpts`] for a spinner.
    pub fn spinner() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_SPINNER.into()),
            progress_chars: None,
            enabled: true,
            clear: false,
        }
    }

    /// Set to `true` to clear the progress bar upon completion.
    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Create a new [`ProgressBarOpts`] which hides the progress bars.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }
}
