#![forbid(unsafe_code)]

//! Header pin: holds the grid header fixed while the grid section
//! occupies the viewport.
//!
//! The pin span runs from the section top meeting the viewport top until
//! the section bottom meets the viewport bottom, and consumes no extra
//! scroll-space. Stateless beyond the bind/rebuild lifecycle it shares
//! with the grid animator: a resize tears it down and re-resolves the
//! span against the new geometry.

use tracing::debug;
use vitrine_core::geometry::{Rect, Viewport};
use vitrine_core::scroll::{Edge, ScrollSpan, SpanSpec};

use crate::stage::{NodeId, Stage};

/// Pins a header node over the grid section's scroll extent.
#[derive(Debug, Clone, Copy)]
pub struct HeaderPin {
    node: NodeId,
    span: ScrollSpan,
}

impl HeaderPin {
    /// Bind the pin for a header node against the grid section rect.
    ///
    /// Returns `None` for a degenerate section (no grid on this page
    /// variant); the caller simply skips the controller.
    #[must_use]
    pub fn bind(node: NodeId, section: &Rect, viewport: Viewport) -> Option<Self> {
        if section.height <= 0.0 {
            return None;
        }
        let span = ScrollSpan::resolve(
            &SpanSpec::new(Edge::Top, Edge::Top, 0.0),
            &SpanSpec::new(Edge::Bottom, Edge::Bottom, 0.0),
            section,
            viewport,
        );
        debug!(start = span.start, end = span.end, "header pin bound");
        Some(Self { node, span })
    }

    /// Evaluate for the current scroll position.
    pub fn on_frame(&self, scroll: f32, stage: &mut Stage) {
        if self.span.contains(scroll) {
            stage.set_pin_offset(self.node, scroll - self.span.start);
        } else {
            stage.clear_pin_offset(self.node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(1400.0, 900.0);

    fn fixture() -> (Stage, NodeId, HeaderPin) {
        let mut stage = Stage::new();
        let node = stage.alloc();
        // Section from 900 to 5100 in document space.
        let section = Rect::new(0.0, 900.0, 1400.0, 4200.0);
        let pin = HeaderPin::bind(node, &section, VP).unwrap();
        (stage, node, pin)
    }

    #[test]
    fn span_matches_section_extent() {
        let (_, _, pin) = fixture();
        // Start: section top meets viewport top.
        assert_eq!(pin.span.start, 900.0);
        // End: section bottom meets viewport bottom.
        assert_eq!(pin.span.end, 5100.0 - 900.0);
    }

    #[test]
    fn pins_only_inside_span() {
        let (mut stage, node, pin) = fixture();

        pin.on_frame(0.0, &mut stage);
        assert_eq!(stage.pin_offset(node), None);

        pin.on_frame(1000.0, &mut stage);
        assert_eq!(stage.pin_offset(node), Some(100.0));

        pin.on_frame(9999.0, &mut stage);
        assert_eq!(stage.pin_offset(node), None);
    }

    #[test]
    fn degenerate_section_binds_nothing() {
        let mut stage = Stage::new();
        let node = stage.alloc();
        assert!(HeaderPin::bind(node, &Rect::default(), VP).is_none());
    }
}
