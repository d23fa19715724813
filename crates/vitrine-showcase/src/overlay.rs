#![forbid(unsafe_code)]

//! Tile detail overlay: a full-viewport panel over the grid with the
//! clicked tile's record, scroll suspended underneath.
//!
//! Opening populates the panel nodes from the catalog record, stops the
//! host's scroll through the [`ScrollLock`] seam, and reveals the panel
//! with a downward clip. Closing retracts the clip toward the bottom
//! edge, snaps it back to the resting closed-top shape, and resumes
//! scroll. `Escape` closes; every other key passes through.
//!
//! # Invariants
//!
//! 1. `stop`/`start` calls on the lock are balanced: exactly one `stop`
//!    per open and one `start` per close, regardless of repeated calls.
//! 2. Opening while open swaps the record without touching the lock.
//!
//! # Failure Modes
//!
//! - A tile index past the catalog is logged and dropped; the overlay
//!   state does not change.

use std::time::Duration;

use tracing::{debug, warn};
use vitrine_core::catalog::Catalog;
use vitrine_core::easing::power4_out;
use vitrine_core::tween::{ClipShape, Tween, TweenBank};

use crate::stage::{NodeId, Stage};

// ---------------------------------------------------------------------------
// Scroll lock seam
// ---------------------------------------------------------------------------

/// Host hook for suspending and resuming page scroll.
///
/// The smooth-scroll driver lives on the host side; the overlay only
/// needs to halt it while open.
pub trait ScrollLock {
    /// Suspend scrolling.
    fn stop(&mut self);
    /// Resume scrolling.
    fn start(&mut self);
}

/// No-op lock for hosts without a scroll driver (and for tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopScrollLock;

impl ScrollLock for NoopScrollLock {
    fn stop(&mut self) {}
    fn start(&mut self) {}
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Keyboard input relevant to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Escape: closes the overlay when open.
    Escape,
    /// Any other key.
    Char(char),
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

/// Timing for the panel clip transitions.
#[derive(Debug, Clone, Copy)]
pub struct OverlayConfig {
    /// Panel reveal duration.
    pub reveal: Duration,
    /// Panel conceal duration.
    pub conceal: Duration,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            reveal: Duration::from_millis(500),
            conceal: Duration::from_millis(400),
        }
    }
}

/// The overlay panel and its content nodes.
#[derive(Debug)]
pub struct Overlay {
    config: OverlayConfig,
    panel: NodeId,
    image: NodeId,
    title: NodeId,
    description: NodeId,
    category: NodeId,
    field: NodeId,
    date: NodeId,
    link: NodeId,
    open: Option<usize>,
}

impl Overlay {
    /// Allocate the panel nodes in their resting state.
    #[must_use]
    pub fn build(config: OverlayConfig, stage: &mut Stage) -> Self {
        let panel = stage.alloc();
        stage.set_clip(panel, ClipShape::CLOSED_TOP);
        Self {
            config,
            panel,
            image: stage.alloc(),
            title: stage.alloc(),
            description: stage.alloc(),
            category: stage.alloc(),
            field: stage.alloc(),
            date: stage.alloc(),
            link: stage.alloc(),
            open: None,
        }
    }

    /// Open the overlay on a tile record.
    ///
    /// While already open this swaps the displayed record in place; the
    /// scroll lock is only engaged on the closed-to-open transition.
    pub fn open(
        &mut self,
        tile_index: usize,
        catalog: &Catalog,
        stage: &mut Stage,
        clip_tweens: &mut TweenBank<NodeId, ClipShape>,
        lock: &mut dyn ScrollLock,
    ) {
        let Some(tile) = catalog.tiles.get(tile_index) else {
            warn!(tile_index, tiles = catalog.tiles.len(), "overlay open out of range");
            return;
        };

        stage.set_image(self.image, tile.image.clone());
        stage.set_text(self.title, tile.title.clone());
        stage.set_text(self.description, tile.description.clone());
        stage.set_text(self.category, format!("Type. {}", tile.category));
        stage.set_text(self.field, format!("Domaine. {}", tile.field));
        stage.set_text(self.date, format!("Date. {}", tile.date));
        stage.set_text(self.link, tile.route.clone());

        if self.open.is_none() {
            lock.stop();
            let from = stage.clip(self.panel).unwrap_or(ClipShape::CLOSED_TOP);
            clip_tweens.start(
                self.panel,
                Tween::new(from, ClipShape::OPEN, self.config.reveal).easing(power4_out),
            );
        }
        debug!(tile_index, "overlay open");
        self.open = Some(tile_index);
    }

    /// Close the overlay. No-op while closed.
    pub fn close(
        &mut self,
        stage: &mut Stage,
        clip_tweens: &mut TweenBank<NodeId, ClipShape>,
        lock: &mut dyn ScrollLock,
    ) {
        if self.open.take().is_none() {
            return;
        }
        lock.start();
        let from = stage.clip(self.panel).unwrap_or(ClipShape::OPEN);
        clip_tweens.start(
            self.panel,
            Tween::new(from, ClipShape::CLOSED_BOTTOM, self.config.conceal)
                .easing(power4_out)
                .then_set(ClipShape::CLOSED_TOP),
        );
        debug!("overlay closed");
    }

    /// Route a key press. Returns `true` if the overlay consumed it.
    pub fn handle_key(
        &mut self,
        key: Key,
        stage: &mut Stage,
        clip_tweens: &mut TweenBank<NodeId, ClipShape>,
        lock: &mut dyn ScrollLock,
    ) -> bool {
        if key == Key::Escape && self.open.is_some() {
            self.close(stage, clip_tweens, lock);
            true
        } else {
            false
        }
    }

    /// Whether the overlay is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Index of the displayed tile record, while open.
    #[must_use]
    pub fn open_tile(&self) -> Option<usize> {
        self.open
    }

    /// The panel's stage node.
    #[must_use]
    pub fn panel_node(&self) -> NodeId {
        self.panel
    }

    /// Content nodes: `(image, title, description, category, field,
    /// date, link)`, for hosts laying out the panel.
    #[must_use]
    pub fn content_nodes(&self) -> (NodeId, NodeId, NodeId, NodeId, NodeId, NodeId, NodeId) {
        (
            self.image,
            self.title,
            self.description,
            self.category,
            self.field,
            self.date,
            self.link,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    /// Counting lock so balance is observable.
    #[derive(Default)]
    struct CountingLock {
        stops: u32,
        starts: u32,
    }

    impl ScrollLock for CountingLock {
        fn stop(&mut self) {
            self.stops += 1;
        }
        fn start(&mut self) {
            self.starts += 1;
        }
    }

    struct Fixture {
        stage: Stage,
        overlay: Overlay,
        clips: TweenBank<NodeId, ClipShape>,
        lock: CountingLock,
        catalog: Catalog,
    }

    impl Fixture {
        fn new() -> Self {
            let mut stage = Stage::new();
            let overlay = Overlay::build(OverlayConfig::default(), &mut stage);
            Self {
                stage,
                overlay,
                clips: TweenBank::new(),
                lock: CountingLock::default(),
                catalog: Catalog::default(),
            }
        }

        fn open(&mut self, index: usize) {
            self.overlay.open(
                index,
                &self.catalog,
                &mut self.stage,
                &mut self.clips,
                &mut self.lock,
            );
        }

        fn close(&mut self) {
            self.overlay
                .close(&mut self.stage, &mut self.clips, &mut self.lock);
        }

        fn run(&mut self, frames: usize) {
            for _ in 0..frames {
                for w in self.clips.tick(FRAME) {
                    self.stage.set_clip(w.key, w.value);
                }
            }
        }
    }

    #[test]
    fn open_populates_prefixed_fields() {
        let mut f = Fixture::new();
        f.open(0);

        let (image, title, _, category, field, date, _) = f.overlay.content_nodes();
        assert_eq!(f.stage.image(image), Some("/work/work-1.jpg"));
        assert_eq!(f.stage.text(title), Some("Éclat Doré"));
        assert!(f.stage.text(category).unwrap().starts_with("Type. "));
        assert!(f.stage.text(field).unwrap().starts_with("Domaine. "));
        assert!(f.stage.text(date).unwrap().starts_with("Date. "));
    }

    #[test]
    fn open_stops_scroll_and_reveals_panel() {
        let mut f = Fixture::new();
        f.open(1);
        assert_eq!(f.lock.stops, 1);
        assert!(f.overlay.is_open());

        f.run(60);
        assert_eq!(f.stage.clip(f.overlay.panel_node()), Some(ClipShape::OPEN));
    }

    #[test]
    fn close_resumes_scroll_and_rests_closed_top() {
        let mut f = Fixture::new();
        f.open(1);
        f.run(60);
        f.close();
        assert_eq!(f.lock.starts, 1);
        assert!(!f.overlay.is_open());

        f.run(60);
        assert_eq!(
            f.stage.clip(f.overlay.panel_node()),
            Some(ClipShape::CLOSED_TOP)
        );
    }

    #[test]
    fn reopen_while_open_swaps_record_without_relocking() {
        let mut f = Fixture::new();
        f.open(0);
        f.open(2);
        assert_eq!(f.lock.stops, 1);
        assert_eq!(f.overlay.open_tile(), Some(2));

        let (_, title, ..) = f.overlay.content_nodes();
        assert_eq!(f.stage.text(title), Some(f.catalog.tiles[2].title.as_str()));
    }

    #[test]
    fn close_while_closed_is_a_noop() {
        let mut f = Fixture::new();
        f.close();
        assert_eq!(f.lock.starts, 0);
        assert!(f.clips.is_empty());
    }

    #[test]
    fn escape_closes_only_while_open() {
        let mut f = Fixture::new();

        let consumed = f.overlay.handle_key(
            Key::Escape,
            &mut f.stage,
            &mut f.clips,
            &mut f.lock,
        );
        assert!(!consumed);

        f.open(0);
        let consumed = f.overlay.handle_key(
            Key::Escape,
            &mut f.stage,
            &mut f.clips,
            &mut f.lock,
        );
        assert!(consumed);
        assert!(!f.overlay.is_open());
    }

    #[test]
    fn other_keys_pass_through() {
        let mut f = Fixture::new();
        f.open(0);
        let consumed = f.overlay.handle_key(
            Key::Char('x'),
            &mut f.stage,
            &mut f.clips,
            &mut f.lock,
        );
        assert!(!consumed);
        assert!(f.overlay.is_open());
    }

    #[test]
    fn out_of_range_tile_is_dropped() {
        let mut f = Fixture::new();
        f.open(99);
        assert!(!f.overlay.is_open());
        assert_eq!(f.lock.stops, 0);
    }

    #[test]
    fn rapid_close_replaces_reveal_tween() {
        let mut f = Fixture::new();
        f.open(0);
        f.run(2);
        f.close();
        assert_eq!(f.clips.len(), 1);

        f.run(60);
        assert_eq!(
            f.stage.clip(f.overlay.panel_node()),
            Some(ClipShape::CLOSED_TOP)
        );
    }
}
