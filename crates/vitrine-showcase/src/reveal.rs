#![forbid(unsafe_code)]

//! Row reveal/pin state machine.
//!
//! For each grid row containing at least one tile, a [`RowMachine`]
//! drives the row's tile scale from 0 (hidden) through 1 (shown) and
//! back to 0 as the row is pinned at the viewport top and scrolled past.
//!
//! An observer-per-span design (one for reveal, one for pin, plus a
//! corrective resync span patching their ordering races) is the obvious
//! shape here and the wrong one. The row is ONE state machine whose
//! phase and scale are a pure function of the scroll position, evaluated
//! once per frame at a single write site, so there is no observer
//! ordering to race and no resync to perform.
//!
//! # Phases
//!
//! `Hidden → Revealing → Shown → PinnedShrinking → Passed`, with every
//! transition reversible under backward scroll.
//!
//! - **Revealing**: row top travels from the viewport bottom until the
//!   row bottom sits 10% above it. Scale is `min(1, 1.2·p)`, force-set to
//!   exactly 1 for `p > 0.95` to kill boundary flicker.
//! - **Shown**: between the reveal and pin spans. Scale 1. This also
//!   restores full visibility when the user scrolls back up out of a
//!   partially shrunk pin span.
//! - **PinnedShrinking**: row top is pinned at the viewport top (no
//!   scroll-space consumed) while scale falls linearly `1 − p`.
//! - **Passed**: the pin span completed; the scale override is cleared
//!   to neutral.
//!
//! # Invariants
//!
//! 1. A row whose top edge is above the viewport bottom at bind time is
//!    force-set to scale 1 immediately; it never first paints unrevealed.
//! 2. Scale writes only happen when the scroll position changed since
//!    the previous frame; re-evaluating the same position is a no-op.
//! 3. In mobile mode no machines are bound and every tile is force-set
//!    to scale 1.
//! 4. Teardown clears every scale override to neutral; a machine never
//!    writes after teardown.
//!
//! # Failure Modes
//!
//! - Rows with no tiles are skipped entirely (no machine, no writes).

use tracing::{debug, trace};
use vitrine_core::geometry::{Rect, Viewport};
use vitrine_core::mode::Mode;
use vitrine_core::scroll::{Edge, ScrollSpan, SpanSpec};

use crate::grid::GridLayout;
use crate::stage::{NodeId, Stage};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Span endpoints and curve constants for the reveal machine.
#[derive(Debug, Clone, Copy)]
pub struct RevealConfig {
    /// Reveal span start: row top meets viewport bottom.
    pub reveal_start: SpanSpec,
    /// Reveal span end: row bottom meets 10% above viewport bottom.
    pub reveal_end: SpanSpec,
    /// Pin span start: row top meets viewport top.
    pub pin_start: SpanSpec,
    /// Pin span end: row bottom meets viewport top.
    pub pin_end: SpanSpec,
    /// Reveal curve steepness: scale = min(1, overshoot · p).
    pub overshoot: f32,
    /// Reveal progress above which scale is force-set to exactly 1.
    pub saturation: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            reveal_start: SpanSpec::new(Edge::Top, Edge::Bottom, 0.0),
            reveal_end: SpanSpec::new(Edge::Bottom, Edge::Bottom, -0.10),
            pin_start: SpanSpec::new(Edge::Top, Edge::Top, 0.0),
            pin_end: SpanSpec::new(Edge::Bottom, Edge::Top, 0.0),
            overshoot: 1.2,
            saturation: 0.95,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-row state
// ---------------------------------------------------------------------------

/// Phase of one row's machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPhase {
    /// Below the fold, scale 0.
    Hidden,
    /// Inside the reveal span, scale growing.
    Revealing,
    /// Fully shown, traversing the viewport.
    Shown,
    /// Pinned at the viewport top, scale shrinking.
    PinnedShrinking,
    /// Scrolled past; scale override cleared to neutral.
    Passed,
}

/// Observable state of one row's machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowState {
    /// Index of the row in the grid.
    pub row_id: usize,
    /// Reveal span progress in [0, 1].
    pub scale_in_progress: f32,
    /// Pin span progress in [0, 1].
    pub scale_out_progress: f32,
    /// Current scale override; `None` is neutral (no override).
    pub current_scale: Option<f32>,
    /// Whether the row is currently pinned.
    pub pinned: bool,
    /// Current phase.
    pub phase: RowPhase,
}

/// One row's machine: resolved spans plus current state.
#[derive(Debug, Clone)]
struct RowMachine {
    state: RowState,
    reveal: ScrollSpan,
    pin: ScrollSpan,
    row_node: NodeId,
    tiles: Vec<NodeId>,
}

impl RowMachine {
    /// Compute the next state for a scroll position. Pure.
    fn next_state(&self, scroll: f32, config: &RevealConfig) -> RowState {
        let rp = self.reveal.progress(scroll);
        let pp = self.pin.progress(scroll);
        let mut state = self.state;
        state.scale_in_progress = rp;
        state.scale_out_progress = pp;

        if scroll >= self.pin.start {
            if pp >= 1.0 {
                state.phase = RowPhase::Passed;
                state.current_scale = None;
                state.pinned = false;
            } else {
                state.phase = RowPhase::PinnedShrinking;
                state.current_scale = Some(1.0 - pp);
                state.pinned = true;
            }
        } else {
            state.pinned = false;
            if rp >= 1.0 {
                state.phase = RowPhase::Shown;
                state.current_scale = Some(1.0);
            } else if rp > 0.0 {
                state.phase = RowPhase::Revealing;
                state.current_scale = Some(if rp > config.saturation {
                    1.0
                } else {
                    (config.overshoot * rp).min(1.0)
                });
            } else {
                state.phase = RowPhase::Hidden;
                state.current_scale = Some(0.0);
            }
        }
        state
    }

    /// Apply a state: the single write site for this row's visuals.
    fn apply(&mut self, state: RowState, scroll: f32, stage: &mut Stage) {
        if state.phase != self.state.phase {
            trace!(
                row = state.row_id,
                from = ?self.state.phase,
                to = ?state.phase,
                "row phase change"
            );
        }
        self.state = state;

        match state.current_scale {
            Some(scale) => {
                for &tile in &self.tiles {
                    stage.set_scale(tile, scale);
                }
            }
            None => {
                for &tile in &self.tiles {
                    stage.clear_scale(tile);
                }
            }
        }

        if state.pinned {
            stage.set_pin_offset(self.row_node, scroll - self.pin.start);
        } else {
            stage.clear_pin_offset(self.row_node);
        }
    }
}

// ---------------------------------------------------------------------------
// Animator
// ---------------------------------------------------------------------------

/// Owns every bound row machine for the grid section.
#[derive(Debug, Default)]
pub struct GridAnimator {
    config: RevealConfig,
    machines: Vec<RowMachine>,
    /// Every tile node touched by bind, for teardown's neutral-clear.
    bound_tiles: Vec<NodeId>,
    last_scroll: Option<f32>,
}

impl GridAnimator {
    /// Create an animator with the given span configuration.
    #[must_use]
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Bind machines for every populated row.
    ///
    /// Desktop: one machine per row with tiles, initial scale by
    /// bind-time visibility. Mobile: no machines; every tile is
    /// force-set to scale 1. Any previous binding is torn down first, so
    /// rebinding never accumulates duplicate machines.
    pub fn bind(
        &mut self,
        layout: &GridLayout,
        mode: Mode,
        viewport: Viewport,
        scroll: f32,
        stage: &mut Stage,
    ) {
        self.teardown(stage);

        if mode.is_mobile() {
            for node in layout.tile_nodes() {
                stage.set_scale(node, 1.0);
                self.bound_tiles.push(node);
            }
            debug!(tiles = self.bound_tiles.len(), "grid static (mobile)");
            return;
        }

        for (row_id, row) in layout.rows.iter().enumerate() {
            if row.tiles.is_empty() {
                continue;
            }

            let reveal = ScrollSpan::resolve(
                &self.config.reveal_start,
                &self.config.reveal_end,
                &row.rect,
                viewport,
            );
            let pin = ScrollSpan::resolve(
                &self.config.pin_start,
                &self.config.pin_end,
                &row.rect,
                viewport,
            );

            // First paint must never show an unrevealed row that is
            // already on screen.
            let visible = row.rect.top() < scroll + viewport.height;
            let initial = if visible { 1.0 } else { 0.0 };

            let tiles: Vec<NodeId> = row.tiles.iter().map(|t| t.node).collect();
            for &tile in &tiles {
                stage.set_scale(tile, initial);
                self.bound_tiles.push(tile);
            }

            self.machines.push(RowMachine {
                state: RowState {
                    row_id,
                    scale_in_progress: 0.0,
                    scale_out_progress: 0.0,
                    current_scale: Some(initial),
                    pinned: false,
                    phase: if visible {
                        RowPhase::Shown
                    } else {
                        RowPhase::Hidden
                    },
                },
                reveal,
                pin,
                row_node: row.node,
                tiles,
            });
        }

        self.last_scroll = Some(scroll);
        debug!(rows = self.machines.len(), scroll, "grid machines bound");
    }

    /// Destroy all machines and clear every scale override to neutral.
    pub fn teardown(&mut self, stage: &mut Stage) {
        for &tile in &self.bound_tiles {
            stage.clear_scale(tile);
        }
        for machine in &self.machines {
            stage.clear_pin_offset(machine.row_node);
        }
        self.bound_tiles.clear();
        self.machines.clear();
        self.last_scroll = None;
    }

    /// Evaluate every machine for the current scroll position.
    ///
    /// Machines run in row order; each row's state is computed by one
    /// pure function and applied at one write site. Re-evaluating an
    /// unchanged scroll position writes nothing.
    pub fn on_frame(&mut self, scroll: f32, stage: &mut Stage) {
        if self.machines.is_empty() || self.last_scroll == Some(scroll) {
            return;
        }
        self.last_scroll = Some(scroll);

        for machine in &mut self.machines {
            let next = machine.next_state(scroll, &self.config);
            machine.apply(next, scroll, stage);
        }
    }

    /// Observable state of every bound machine, in row order.
    pub fn row_states(&self) -> impl Iterator<Item = &RowState> + '_ {
        self.machines.iter().map(|m| &m.state)
    }

    /// Whether any machines are bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        !self.machines.is_empty() || !self.bound_tiles.is_empty()
    }
}
