#![forbid(unsafe_code)]

//! Hover preview controller for the profile list.
//!
//! Per item the machine is `idle → active → idle`. Pointer-enter
//! scrambles the label, recolors it, and reveals the preview image with
//! a clip transition paired with an oversized-to-natural image scale.
//! Pointer-leave restores the cached label text/color and retracts the
//! clip toward the bottom edge, snapping it back to the closed-top
//! resting shape on completion.
//!
//! # Invariants
//!
//! 1. Enter on an active item and leave on an idle item are no-ops.
//! 2. Original label text and resolved color are cached on the first
//!    activation only, and restored byte-identical on leave.
//! 3. The image's scale has one writer at a time: any in-flight image
//!    tween is killed (bank replacement) before its counterpart starts.
//! 4. In mobile mode the controller is unbound: no pointer handling, all
//!    preview styling cleared back to neutral.
//!
//! # Failure Modes
//!
//! - Pointer events for an unknown item index are dropped.

use std::time::Duration;

use tracing::{debug, trace};
use vitrine_core::catalog::Catalog;
use vitrine_core::easing::power4_out;
use vitrine_core::mode::Mode;
use vitrine_core::scramble::{Scramble, ScrambleBank, ScrambleConfig};
use vitrine_core::tween::{ClipShape, Tween, TweenBank};

use crate::stage::{NodeId, Stage};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Timing and styling for the hover transitions.
#[derive(Debug, Clone)]
pub struct HoverConfig {
    /// Clip reveal duration on enter.
    pub reveal: Duration,
    /// Clip retract duration on leave.
    pub retract: Duration,
    /// Image scale-down duration on enter (enlarged to natural).
    pub image_settle: Duration,
    /// Image scale-up duration on leave (back to enlarged).
    pub image_enlarge: Duration,
    /// Resting/enlarged image scale.
    pub enlarged_scale: f32,
    /// Label color while hovered.
    pub highlight_color: String,
    /// Scramble parameters for the label.
    pub scramble: ScrambleConfig,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            reveal: Duration::from_millis(500),
            retract: Duration::from_millis(400),
            image_settle: Duration::from_millis(750),
            image_enlarge: Duration::from_millis(400),
            enlarged_scale: 1.2,
            highlight_color: "tone-500".to_string(),
            scramble: ScrambleConfig::hover_label(),
        }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Original label state captured on first activation.
#[derive(Debug, Clone)]
struct LabelCache {
    text: String,
    color: Option<String>,
}

/// One profile row: label, preview panel, preview image.
#[derive(Debug)]
struct HoverItem {
    label: NodeId,
    preview: NodeId,
    image: NodeId,
    cache: Option<LabelCache>,
    active: bool,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Hover state machine over every profile item.
#[derive(Debug)]
pub struct HoverController {
    config: HoverConfig,
    items: Vec<HoverItem>,
    bound: bool,
    seed: u64,
}

impl HoverController {
    /// Materialize one item per profile record and set static content.
    ///
    /// An empty profile collection yields a controller with no items;
    /// every operation on it is a no-op.
    #[must_use]
    pub fn build(catalog: &Catalog, config: HoverConfig, seed: u64, stage: &mut Stage) -> Self {
        let items = catalog
            .profiles
            .iter()
            .map(|profile| {
                let label = stage.alloc();
                let preview = stage.alloc();
                let image = stage.alloc();
                stage.set_text(label, profile.name.clone());
                stage.set_image(image, profile.preview_image.clone());
                HoverItem {
                    label,
                    preview,
                    image,
                    cache: None,
                    active: false,
                }
            })
            .collect();
        Self {
            config,
            items,
            bound: false,
            seed,
        }
    }

    /// Bind pointer handling for the current mode.
    ///
    /// Desktop applies the closed-top resting clip and activates the
    /// handlers; rebinding while already bound is a no-op, so a direct
    /// reattachment after a breakpoint crossing never duplicates
    /// bindings. Mobile unbinds entirely.
    pub fn bind(
        &mut self,
        mode: Mode,
        stage: &mut Stage,
        clip_tweens: &mut TweenBank<NodeId, ClipShape>,
        scale_tweens: &mut TweenBank<NodeId, f32>,
        scrambles: &mut ScrambleBank<NodeId>,
    ) {
        if mode.is_mobile() {
            self.unbind(stage, clip_tweens, scale_tweens, scrambles);
            return;
        }
        if self.bound {
            return;
        }
        for item in &self.items {
            stage.set_clip(item.preview, ClipShape::CLOSED_TOP);
        }
        self.bound = true;
        debug!(items = self.items.len(), "hover bound");
    }

    /// Unbind: restore labels, clear styling, kill in-flight effects.
    pub fn unbind(
        &mut self,
        stage: &mut Stage,
        clip_tweens: &mut TweenBank<NodeId, ClipShape>,
        scale_tweens: &mut TweenBank<NodeId, f32>,
        scrambles: &mut ScrambleBank<NodeId>,
    ) {
        for item in &mut self.items {
            clip_tweens.kill(item.preview);
            scale_tweens.kill(item.image);
            scrambles.kill(item.label);

            if item.active {
                restore_label(item, stage);
                item.active = false;
            }
            stage.clear_clip(item.preview);
            stage.clear_scale(item.image);
        }
        if self.bound {
            debug!("hover unbound");
        }
        self.bound = false;
    }

    /// Pointer entered an item.
    pub fn pointer_enter(
        &mut self,
        index: usize,
        stage: &mut Stage,
        clip_tweens: &mut TweenBank<NodeId, ClipShape>,
        scale_tweens: &mut TweenBank<NodeId, f32>,
        scrambles: &mut ScrambleBank<NodeId>,
    ) {
        if !self.bound {
            return;
        }
        let seed = self.seed;
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        if item.active {
            // Nested pointer events: already active, nothing to do.
            return;
        }
        item.active = true;
        trace!(index, "hover enter");

        // First-ever activation caches the original label state.
        if item.cache.is_none() {
            item.cache = Some(LabelCache {
                text: stage.text(item.label).unwrap_or_default().to_string(),
                color: stage.color(item.label).map(str::to_string),
            });
        }

        let original = item
            .cache
            .as_ref()
            .map(|c| c.text.clone())
            .unwrap_or_default();
        stage.set_color(item.label, self.config.highlight_color.clone());
        scrambles.start(
            item.label,
            Scramble::new(
                &original,
                0.0,
                self.config.scramble,
                seed ^ (index as u64).wrapping_mul(0x517C_C1B7_2722_0A95),
            ),
        );

        // Directional reveal: clip opens downward while the image eases
        // from enlarged to natural, masking its edges into view.
        let from = stage.clip(item.preview).unwrap_or(ClipShape::CLOSED_TOP);
        clip_tweens.start(
            item.preview,
            Tween::new(from, ClipShape::OPEN, self.config.reveal).easing(power4_out),
        );
        scale_tweens.start(
            item.image,
            Tween::new(self.config.enlarged_scale, 1.0, self.config.image_settle)
                .easing(power4_out),
        );
    }

    /// Pointer left an item.
    pub fn pointer_leave(
        &mut self,
        index: usize,
        stage: &mut Stage,
        clip_tweens: &mut TweenBank<NodeId, ClipShape>,
        scale_tweens: &mut TweenBank<NodeId, f32>,
        scrambles: &mut ScrambleBank<NodeId>,
    ) {
        if !self.bound {
            return;
        }
        let enlarged = self.config.enlarged_scale;
        let retract = self.config.retract;
        let image_enlarge = self.config.image_enlarge;
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        if !item.active {
            return;
        }
        item.active = false;
        trace!(index, "hover leave");

        scrambles.kill(item.label);
        restore_label(item, stage);

        // Retract toward the bottom edge, then snap back to the resting
        // closed-top shape so the next reveal opens downward again.
        let from = stage.clip(item.preview).unwrap_or(ClipShape::OPEN);
        clip_tweens.start(
            item.preview,
            Tween::new(from, ClipShape::CLOSED_BOTTOM, retract)
                .easing(power4_out)
                .then_set(ClipShape::CLOSED_TOP),
        );

        let current = stage.scale(item.image).unwrap_or(enlarged);
        scale_tweens.start(
            item.image,
            Tween::new(current, enlarged, image_enlarge).easing(power4_out),
        );
    }

    /// Whether pointer handling is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Number of currently active (hovered) items.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|i| i.active).count()
    }

    /// Stage nodes of an item, for hosts wiring hit areas:
    /// `(label, preview, image)`.
    #[must_use]
    pub fn item_nodes(&self, index: usize) -> Option<(NodeId, NodeId, NodeId)> {
        self.items
            .get(index)
            .map(|i| (i.label, i.preview, i.image))
    }
}

/// Put the cached original text and color back on the label.
fn restore_label(item: &HoverItem, stage: &mut Stage) {
    if let Some(cache) = &item.cache {
        stage.set_text(item.label, cache.text.clone());
        match &cache.color {
            Some(color) => stage.set_color(item.label, color.clone()),
            None => stage.clear_color(item.label),
        }
    }
}
