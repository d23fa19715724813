#![forbid(unsafe_code)]

//! Resize debouncing: no rebuild work until resize input has been quiet
//! for the settle window.
//!
//! Raw resize events arrive in bursts during a drag. The debouncer keeps
//! only the latest viewport (latest wins) and reports it exactly once,
//! after [`settle`](ResizeDebouncer::new) of quiet time has elapsed on
//! the frame clock. Another event during the wait restarts the window.

use std::time::Duration;

use tracing::trace;
use vitrine_core::geometry::Viewport;

/// Default settle window.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(150);

/// Debounces raw resize events into settled viewport changes.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    settle: Duration,
    pending: Option<Viewport>,
    quiet: Duration,
}

impl ResizeDebouncer {
    /// Create a debouncer with the given settle window.
    #[must_use]
    pub fn new(settle: Duration) -> Self {
        Self {
            settle,
            pending: None,
            quiet: Duration::ZERO,
        }
    }

    /// Record a raw resize event. Latest viewport wins; the settle
    /// window restarts.
    pub fn push(&mut self, viewport: Viewport) {
        trace!(width = viewport.width, height = viewport.height, "resize");
        self.pending = Some(viewport);
        self.quiet = Duration::ZERO;
    }

    /// Advance the frame clock. Returns the settled viewport once the
    /// window has elapsed with no further events.
    pub fn tick(&mut self, dt: Duration) -> Option<Viewport> {
        self.pending?;
        self.quiet = self.quiet.saturating_add(dt);
        if self.quiet >= self.settle {
            self.quiet = Duration::ZERO;
            self.pending.take()
        } else {
            None
        }
    }

    /// Whether a resize is waiting to settle.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_50: Duration = Duration::from_millis(50);
    const MS_150: Duration = Duration::from_millis(150);

    #[test]
    fn settles_after_quiet_window() {
        let mut d = ResizeDebouncer::default();
        d.push(Viewport::new(1200.0, 800.0));

        assert_eq!(d.tick(MS_50), None);
        assert_eq!(d.tick(MS_50), None);
        let settled = d.tick(MS_50);
        assert_eq!(settled, Some(Viewport::new(1200.0, 800.0)));
        assert!(!d.is_pending());
    }

    #[test]
    fn new_event_restarts_the_window() {
        let mut d = ResizeDebouncer::default();
        d.push(Viewport::new(1200.0, 800.0));
        assert_eq!(d.tick(MS_50), None);

        // Burst continues; window restarts, latest wins.
        d.push(Viewport::new(900.0, 800.0));
        assert_eq!(d.tick(MS_50), None);
        assert_eq!(d.tick(MS_50), None);
        assert_eq!(d.tick(MS_50), Some(Viewport::new(900.0, 800.0)));
    }

    #[test]
    fn idle_ticks_report_nothing() {
        let mut d = ResizeDebouncer::default();
        assert_eq!(d.tick(MS_150), None);
        assert_eq!(d.tick(MS_150), None);
    }

    #[test]
    fn settles_exactly_once_per_burst() {
        let mut d = ResizeDebouncer::default();
        d.push(Viewport::new(1200.0, 800.0));
        assert!(d.tick(MS_150).is_some());
        assert_eq!(d.tick(MS_150), None);
    }
}
