#![forbid(unsafe_code)]

//! Scroll spans: scroll ranges derived from edge-pair specs.
//!
//! A [`SpanSpec`] names the moment a trigger rectangle's edge meets a
//! viewport edge, in the `"<trigger-edge> <viewport-edge>[-=N%|+=N%]"`
//! notation (`"top bottom"`, `"bottom bottom-=10%"`, ...). Two resolved
//! specs bracket a [`ScrollSpan`], which reports normalized progress for
//! a scroll position.
//!
//! # Invariants
//!
//! 1. `progress()` is clamped to [0.0, 1.0] and is monotonically
//!    non-decreasing in the scroll position.
//! 2. A degenerate span (`end <= start`) reports progress 0.0 below
//!    `start` and 1.0 at or above it.
//! 3. Resolution is pure: the same rect/viewport always yields the same
//!    span. Spans are re-resolved after any geometry change; they never
//!    self-update.
//!
//! # Failure Modes
//!
//! - A malformed spec string fails at parse time with
//!   [`SpanParseError`]; nothing is resolved from a bad spec.

use crate::geometry::{Rect, Viewport};

// ---------------------------------------------------------------------------
// Spec parsing
// ---------------------------------------------------------------------------

/// A vertical edge of a rectangle or the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
}

/// Error produced when parsing an edge-pair spec string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed span spec {spec:?}: {reason}")]
pub struct SpanParseError {
    /// The offending spec string.
    pub spec: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

/// One endpoint of a scroll span: "trigger edge meets viewport edge".
///
/// The viewport edge may carry a percentage offset: `bottom-=10%` means
/// 10% of the viewport height above the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanSpec {
    /// Which edge of the trigger rectangle.
    pub trigger: Edge,
    /// Which edge of the viewport.
    pub viewport: Edge,
    /// Offset as a signed fraction of viewport height. `-=10%` is -0.10.
    pub offset: f32,
}

impl SpanSpec {
    /// Construct a spec directly.
    #[inline]
    #[must_use]
    pub const fn new(trigger: Edge, viewport: Edge, offset: f32) -> Self {
        Self {
            trigger,
            viewport,
            offset,
        }
    }

    /// Parse a spec string such as `"top bottom"` or `"bottom bottom-=10%"`.
    pub fn parse(spec: &str) -> Result<Self, SpanParseError> {
        let err = |reason| SpanParseError {
            spec: spec.to_string(),
            reason,
        };

        let mut parts = spec.split_whitespace();
        let trigger = match parts.next() {
            Some("top") => Edge::Top,
            Some("bottom") => Edge::Bottom,
            Some(_) => return Err(err("unknown trigger edge")),
            None => return Err(err("empty spec")),
        };
        let viewport_part = parts.next().ok_or_else(|| err("missing viewport edge"))?;
        if parts.next().is_some() {
            return Err(err("trailing tokens"));
        }

        let (edge_str, offset) = if let Some((edge, off)) = viewport_part.split_once("-=") {
            (edge, -Self::parse_pct(off).ok_or_else(|| err("bad offset"))?)
        } else if let Some((edge, off)) = viewport_part.split_once("+=") {
            (edge, Self::parse_pct(off).ok_or_else(|| err("bad offset"))?)
        } else {
            (viewport_part, 0.0)
        };

        let viewport = match edge_str {
            "top" => Edge::Top,
            "bottom" => Edge::Bottom,
            _ => return Err(err("unknown viewport edge")),
        };

        Ok(Self {
            trigger,
            viewport,
            offset,
        })
    }

    fn parse_pct(s: &str) -> Option<f32> {
        let digits = s.strip_suffix('%')?;
        digits.parse::<f32>().ok().map(|v| v / 100.0)
    }

    /// Scroll position at which this spec's condition holds for `rect`.
    ///
    /// The condition is `trigger_edge_doc == scroll + viewport_ref` where
    /// `viewport_ref` is the viewport edge position plus the offset.
    #[must_use]
    pub fn resolve(&self, rect: &Rect, viewport: Viewport) -> f32 {
        let trigger_doc = match self.trigger {
            Edge::Top => rect.top(),
            Edge::Bottom => rect.bottom(),
        };
        let viewport_ref = match self.viewport {
            Edge::Top => 0.0,
            Edge::Bottom => viewport.height,
        } + self.offset * viewport.height;
        trigger_doc - viewport_ref
    }
}

// ---------------------------------------------------------------------------
// Resolved spans
// ---------------------------------------------------------------------------

/// A resolved scroll range `[start, end]` in document scroll positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSpan {
    /// Scroll position where the span begins.
    pub start: f32,
    /// Scroll position where the span ends.
    pub end: f32,
}

impl ScrollSpan {
    /// Resolve a span from two endpoint specs against a rect and viewport.
    #[must_use]
    pub fn resolve(start: &SpanSpec, end: &SpanSpec, rect: &Rect, viewport: Viewport) -> Self {
        Self {
            start: start.resolve(rect, viewport),
            end: end.resolve(rect, viewport),
        }
    }

    /// Normalized progress of `scroll` through the span, clamped to [0, 1].
    #[must_use]
    pub fn progress(&self, scroll: f32) -> f32 {
        let len = self.end - self.start;
        if len <= f32::EPSILON {
            return if scroll >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll - self.start) / len).clamp(0.0, 1.0)
    }

    /// Whether `scroll` lies strictly inside the span.
    #[inline]
    #[must_use]
    pub fn contains(&self, scroll: f32) -> bool {
        scroll >= self.start && scroll < self.end
    }
}
