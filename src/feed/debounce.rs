//! Trailing-edge debouncer for viewport resize events.

use std::time::{Duration, Instant};

/// Default quiet window before a resize is applied.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(200);

/// Collapses a burst of resize events into the last width, released once
/// no new event has arrived for `window`.
///
/// Time is passed in explicitly so the caller's event loop owns the clock.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    window: Duration,
    pending: Option<(u32, Instant)>,
}

impl ResizeDebouncer {
    /// Debouncer that waits `window` after the last event.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Quiet window length.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Records a resize event, restarting the quiet window.
    pub fn observe(&mut self, width: u32, now: Instant) {
        self.pending = Some((width, now));
    }

    /// Releases the pending width if the quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<u32> {
        match self.pending {
            Some((width, at)) if now.saturating_duration_since(at) >= self.window => {
                self.pending = None;
                Some(width)
            }
            _ => None,
        }
    }

    /// Releases the pending width immediately.
    pub fn flush(&mut self) -> Option<u32> {
        self.pending.take().map(|(width, _)| width)
    }

    /// Whether a width is waiting to be released.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_DEBOUNCE)
    }
}
