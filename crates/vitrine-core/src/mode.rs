#![forbid(unsafe_code)]

//! Responsive mode: the single source of truth for mobile vs desktop.
//!
//! Controllers never look at the raw viewport width; they ask the
//! [`ModeTracker`], which recomputes on each settled resize and reports
//! whether the breakpoint was crossed since the previous tick.

use crate::geometry::Viewport;

/// Width below which the page runs in mobile mode, in logical pixels.
pub const MOBILE_BREAKPOINT: f32 = 1000.0;

/// Responsive layout mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Full scroll-linked animation, hover previews enabled.
    Desktop,
    /// Static tiles, hover previews disabled.
    Mobile,
}

impl Mode {
    /// Mode for a viewport width.
    #[inline]
    #[must_use]
    pub fn of(viewport: Viewport) -> Self {
        if viewport.width < MOBILE_BREAKPOINT {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// Whether this is [`Mode::Mobile`].
    #[inline]
    #[must_use]
    pub fn is_mobile(self) -> bool {
        self == Self::Mobile
    }
}

/// Tracks the current mode and detects breakpoint crossings.
#[derive(Debug, Clone, Copy)]
pub struct ModeTracker {
    mode: Mode,
}

impl ModeTracker {
    /// Create a tracker for an initial viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            mode: Mode::of(viewport),
        }
    }

    /// Current mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Recompute for a new viewport. Returns `true` if the breakpoint was
    /// crossed relative to the previous tick.
    pub fn update(&mut self, viewport: Viewport) -> bool {
        let next = Mode::of(viewport);
        let crossed = next != self.mode;
        self.mode = next;
        crossed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(Mode::of(Viewport::new(999.9, 800.0)), Mode::Mobile);
        assert_eq!(Mode::of(Viewport::new(1000.0, 800.0)), Mode::Desktop);
        assert_eq!(Mode::of(Viewport::new(1400.0, 900.0)), Mode::Desktop);
    }

    #[test]
    fn crossing_detection() {
        let mut tracker = ModeTracker::new(Viewport::new(1400.0, 900.0));
        assert_eq!(tracker.mode(), Mode::Desktop);

        // Same side of the breakpoint: no crossing.
        assert!(!tracker.update(Viewport::new(1200.0, 900.0)));

        // Desktop -> mobile.
        assert!(tracker.update(Viewport::new(800.0, 900.0)));
        assert_eq!(tracker.mode(), Mode::Mobile);

        // Mobile -> mobile: no crossing.
        assert!(!tracker.update(Viewport::new(700.0, 900.0)));

        // Back to desktop.
        assert!(tracker.update(Viewport::new(1100.0, 900.0)));
        assert_eq!(tracker.mode(), Mode::Desktop);
    }
}
