//! Progress reporting.
//!
//! A run talks to the outside world through a [`ProgressReporter`], the only
//! piece of state (with the cancellation token) shared between the worker and
//! the code that started it. Reporters are called from the worker, so they
//! must be `Send + Sync`; how events reach a human is up to them.
//!
//! # Overview
//!
//! - `event` - The [`ProgressEvent`] enum
//! - `style` - Progress bar styling options and templates
//! - `display` - [`BarReporter`], a terminal progress bar reporter
//!
//! Closures and `tokio` unbounded senders are reporters too:
//!
//! ```rust
//! use fetchpack::progress::{ProgressEvent, ProgressReporter};
//!
//! let printer = |event: ProgressEvent| println!("{event:?}");
//! printer.report(ProgressEvent::Completed);
//!
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ProgressEvent>();
//! tx.report(ProgressEvent::Completed);
//! assert_eq!(rx.try_recv().unwrap(), ProgressEvent::Completed);
//! ```

pub(crate) mod display;
pub(crate) mod event;
pub(crate) mod style;

pub use display::BarReporter;
pub use event::ProgressEvent;
pub use style::{ProgressBarOpts, StyleOptions};

use tokio::sync::mpsc::UnboundedSender;

/// Receives the events of a run.
pub trait ProgressReporter: Send + Sync {
    /// Handle one event. Must not block for long: the worker waits for it.
    fn report(&self, event: ProgressEvent);
}

impl<F> ProgressReporter for F
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn report(&self, event: ProgressEvent) {
        self(event)
    }
}

/// Events are dropped once the receiving side is gone.
impl ProgressReporter for UnboundedSender<ProgressEvent> {
    fn report(&self, event: ProgressEvent) {
        let _ = self.send(event);
    }
}
