#![forbid(unsafe_code)]

//! The showcase page: owns the stage, the effect banks, and every
//! section controller, and sequences them per frame.
//!
//! The host drives three entry points: [`ShowcasePage::on_ready`] once
//! after construction, [`ShowcasePage::on_frame`] each animation frame
//! with the elapsed time and current scroll position, and
//! [`ShowcasePage::on_resize`] for raw resize events. Pointer and key
//! input are forwarded through the `pointer_*`, `tile_click`, and
//! `key` methods. After each frame the host reads node state back from
//! [`ShowcasePage::stage`].
//!
//! # Frame order
//!
//! 1. Resize debouncer tick; a settled viewport triggers the rebuild.
//! 2. Effect banks (scale, clip, scramble) tick and write to the stage.
//! 3. Grid machines evaluate the scroll position (single write site).
//! 4. Header pin evaluates the scroll position.
//!
//! Bank writes land before the machines so a scroll-linked value always
//! wins the frame over a time-based one on the same node; the two sets
//! of targets are disjoint by construction, this just keeps the order
//! deterministic.
//!
//! # Invariants
//!
//! 1. Geometry-dependent state is rebuilt only from a settled resize,
//!    never per raw event.
//! 2. A breakpoint crossing rebinds each section exactly once.

use std::time::Duration;

use tracing::info;
use vitrine_core::catalog::{Catalog, CatalogError};
use vitrine_core::geometry::Viewport;
use vitrine_core::mode::{Mode, ModeTracker};
use vitrine_core::scramble::{Scramble, ScrambleBank, ScrambleConfig};
use vitrine_core::tween::{ClipShape, TweenBank};

use crate::grid::{GridConfig, GridLayout};
use crate::header::HeaderPin;
use crate::hover::{HoverConfig, HoverController};
use crate::overlay::{Key, Overlay, OverlayConfig, ScrollLock};
use crate::resize::ResizeDebouncer;
use crate::reveal::{GridAnimator, RevealConfig, RowState};
use crate::stage::{NodeId, Stage};

/// Fraction of the hero heading shown as-is; the tail scrambles in.
const HERO_REVEAL_FRACTION: f32 = 0.75;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Which sections this page variant carries.
#[derive(Debug, Clone, Copy)]
pub struct SectionToggles {
    /// Hero heading with the scramble-in.
    pub hero: bool,
    /// The tile grid and its reveal machines.
    pub grid: bool,
    /// The pinned grid header.
    pub header: bool,
    /// The hover profile list.
    pub profiles: bool,
    /// The tile detail overlay.
    pub overlay: bool,
}

impl Default for SectionToggles {
    fn default() -> Self {
        Self {
            hero: true,
            grid: true,
            header: true,
            profiles: true,
            overlay: true,
        }
    }
}

/// Page-level configuration.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Initial viewport.
    pub viewport: Viewport,
    /// Sections present on this variant.
    pub sections: SectionToggles,
    /// Hero heading text.
    pub hero_text: String,
    /// Seed for the scramble effects.
    pub scramble_seed: u64,
    /// Grid geometry.
    pub grid: GridConfig,
    /// Reveal machine spans and curve.
    pub reveal: RevealConfig,
    /// Hover transition timing.
    pub hover: HoverConfig,
    /// Overlay transition timing.
    pub overlay: OverlayConfig,
    /// Resize settle window.
    pub settle: Duration,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(1400.0, 900.0),
            sections: SectionToggles::default(),
            hero_text: "Atelier Vitrine".to_string(),
            scramble_seed: 0x5eed,
            grid: GridConfig::default(),
            reveal: RevealConfig::default(),
            hover: HoverConfig::default(),
            overlay: OverlayConfig::default(),
            settle: crate::resize::DEFAULT_SETTLE,
        }
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// The assembled page.
pub struct ShowcasePage {
    config: PageConfig,
    catalog: Catalog,
    stage: Stage,
    mode: ModeTracker,
    debouncer: ResizeDebouncer,
    viewport: Viewport,
    scroll: f32,

    layout: GridLayout,
    animator: GridAnimator,
    header_node: Option<NodeId>,
    header: Option<HeaderPin>,
    hero_node: Option<NodeId>,
    hover: Option<HoverController>,
    overlay: Option<Overlay>,

    scale_tweens: TweenBank<NodeId, f32>,
    clip_tweens: TweenBank<NodeId, ClipShape>,
    scrambles: ScrambleBank<NodeId>,
    lock: Box<dyn ScrollLock>,
}

impl ShowcasePage {
    /// Assemble the page. Fails if the catalog is inconsistent.
    pub fn new(
        catalog: Catalog,
        config: PageConfig,
        lock: Box<dyn ScrollLock>,
    ) -> Result<Self, CatalogError> {
        catalog.validate()?;
        let viewport = config.viewport;
        let mut page = Self {
            mode: ModeTracker::new(viewport),
            debouncer: ResizeDebouncer::new(config.settle),
            viewport,
            scroll: 0.0,
            catalog,
            stage: Stage::new(),
            layout: GridLayout::default(),
            animator: GridAnimator::new(config.reveal),
            header_node: None,
            header: None,
            hero_node: None,
            hover: None,
            overlay: None,
            scale_tweens: TweenBank::new(),
            clip_tweens: TweenBank::new(),
            scrambles: ScrambleBank::new(),
            lock,
            config,
        };
        page.build_sections();
        Ok(page)
    }

    /// Allocate the static per-section nodes and controllers.
    fn build_sections(&mut self) {
        let sections = self.config.sections;
        if sections.hero {
            let node = self.stage.alloc();
            self.stage.set_text(node, self.config.hero_text.clone());
            self.hero_node = Some(node);
        }
        if sections.header {
            self.header_node = Some(self.stage.alloc());
        }
        if sections.profiles {
            self.hover = Some(HoverController::build(
                &self.catalog,
                self.config.hover.clone(),
                self.config.scramble_seed,
                &mut self.stage,
            ));
        }
        if sections.overlay {
            self.overlay = Some(Overlay::build(self.config.overlay, &mut self.stage));
        }
    }

    /// First-paint setup: bind the geometry-dependent controllers and
    /// start the hero scramble.
    pub fn on_ready(&mut self) {
        info!(
            width = self.viewport.width,
            mode = ?self.mode.mode(),
            "page ready"
        );
        self.rebind_geometry();
        if let Some(hero) = self.hero_node {
            self.scrambles.start(
                hero,
                Scramble::new(
                    &self.config.hero_text,
                    HERO_REVEAL_FRACTION,
                    ScrambleConfig::hero(),
                    self.config.scramble_seed,
                ),
            );
        }
        if let Some(hover) = &mut self.hover {
            hover.bind(
                self.mode.mode(),
                &mut self.stage,
                &mut self.clip_tweens,
                &mut self.scale_tweens,
                &mut self.scrambles,
            );
        }
    }

    /// Tear down and rebuild everything derived from the viewport.
    fn rebind_geometry(&mut self) {
        self.animator.teardown(&mut self.stage);
        self.layout.release(&mut self.stage);
        self.header = None;

        if self.config.sections.grid {
            self.layout = GridLayout::build(
                &self.catalog,
                self.config.grid,
                self.viewport,
                &mut self.stage,
            );
            self.animator.bind(
                &self.layout,
                self.mode.mode(),
                self.viewport,
                self.scroll,
                &mut self.stage,
            );
            if let Some(node) = self.header_node {
                self.header = HeaderPin::bind(node, &self.layout.section, self.viewport);
            }
        }
    }

    /// Record a raw resize event. Rebuild happens once it settles.
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.debouncer.push(viewport);
    }

    fn apply_resize(&mut self, viewport: Viewport) {
        let crossed = self.mode.update(viewport);
        self.viewport = viewport;
        info!(
            width = viewport.width,
            height = viewport.height,
            crossed,
            mode = ?self.mode.mode(),
            "resize settled"
        );

        self.rebind_geometry();
        // Hover binding is idempotent per mode, so calling it on every
        // settled resize rebinds exactly once per crossing.
        if let Some(hover) = &mut self.hover {
            hover.bind(
                self.mode.mode(),
                &mut self.stage,
                &mut self.clip_tweens,
                &mut self.scale_tweens,
                &mut self.scrambles,
            );
        }
    }

    /// Advance one animation frame.
    pub fn on_frame(&mut self, dt: Duration, scroll: f32) {
        self.scroll = scroll;

        if let Some(viewport) = self.debouncer.tick(dt) {
            self.apply_resize(viewport);
        }

        for w in self.scale_tweens.tick(dt) {
            self.stage.set_scale(w.key, w.value);
        }
        for w in self.clip_tweens.tick(dt) {
            self.stage.set_clip(w.key, w.value);
        }
        for w in self.scrambles.tick(dt) {
            self.stage.set_text(w.key, w.text);
        }

        self.animator.on_frame(scroll, &mut self.stage);
        if let Some(header) = &self.header {
            header.on_frame(scroll, &mut self.stage);
        }
    }

    // -- input ---------------------------------------------------------

    /// Pointer entered a profile item.
    pub fn pointer_enter(&mut self, index: usize) {
        if let Some(hover) = &mut self.hover {
            hover.pointer_enter(
                index,
                &mut self.stage,
                &mut self.clip_tweens,
                &mut self.scale_tweens,
                &mut self.scrambles,
            );
        }
    }

    /// Pointer left a profile item.
    pub fn pointer_leave(&mut self, index: usize) {
        if let Some(hover) = &mut self.hover {
            hover.pointer_leave(
                index,
                &mut self.stage,
                &mut self.clip_tweens,
                &mut self.scale_tweens,
                &mut self.scrambles,
            );
        }
    }

    /// A tile node was clicked: open its record in the overlay.
    pub fn tile_click(&mut self, node: NodeId) {
        let Some(tile_index) = self.layout.route_for(node) else {
            return;
        };
        if let Some(overlay) = &mut self.overlay {
            overlay.open(
                tile_index,
                &self.catalog,
                &mut self.stage,
                &mut self.clip_tweens,
                self.lock.as_mut(),
            );
        }
    }

    /// Close the overlay (backdrop or close-button click).
    pub fn overlay_dismiss(&mut self) {
        if let Some(overlay) = &mut self.overlay {
            overlay.close(&mut self.stage, &mut self.clip_tweens, self.lock.as_mut());
        }
    }

    /// Route a key press. Returns `true` if the page consumed it.
    pub fn key(&mut self, key: Key) -> bool {
        if let Some(overlay) = &mut self.overlay {
            overlay.handle_key(key, &mut self.stage, &mut self.clip_tweens, self.lock.as_mut())
        } else {
            false
        }
    }

    // -- readback ------------------------------------------------------

    /// The node state the host renders from.
    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Current responsive mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    /// Current viewport (post-settle).
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Observable state of the grid row machines.
    pub fn row_states(&self) -> impl Iterator<Item = &RowState> + '_ {
        self.animator.row_states()
    }

    /// The built grid layout.
    #[must_use]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Hero heading node, when the section is present.
    #[must_use]
    pub fn hero_node(&self) -> Option<NodeId> {
        self.hero_node
    }

    /// Grid header node, when the section is present.
    #[must_use]
    pub fn header_node(&self) -> Option<NodeId> {
        self.header_node
    }

    /// Hover controller, when the profiles section is present.
    #[must_use]
    pub fn hover(&self) -> Option<&HoverController> {
        self.hover.as_ref()
    }

    /// Overlay controller, when the section is present.
    #[must_use]
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }
}

impl std::fmt::Debug for ShowcasePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShowcasePage")
            .field("mode", &self.mode.mode())
            .field("viewport", &self.viewport)
            .field("scroll", &self.scroll)
            .field("rows", &self.layout.rows.len())
            .finish_non_exhaustive()
    }
}
