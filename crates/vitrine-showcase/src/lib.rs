#![forbid(unsafe_code)]

//! Scroll-linked controllers for the Vitrine showcase page.
//!
//! # Role in Vitrine
//! `vitrine-showcase` turns the primitives in `vitrine-core` into a
//! headless page: a stage of visual nodes, per-row reveal/pin state
//! machines over the tile grid, the hover preview controller, the
//! pinned header, the tile overlay, and the resize/breakpoint
//! orchestration that ties them together.
//!
//! # Primary responsibilities
//! - **Stage**: the arena of visual nodes hosts render from; `None`
//!   properties mean no override.
//! - **Grid + reveal**: materialize the sparse matrix and drive each
//!   row's scale as a pure function of scroll position.
//! - **Hover / overlay**: pointer- and click-driven transitions built
//!   on the core tween and scramble banks.
//! - **Page**: frame sequencing, debounced resize, input routing.
//!
//! # How it fits in the system
//! A host embeds [`ShowcasePage`], feeds it frames, resizes, and input,
//! and reads node state back from the stage after each frame. Nothing
//! here renders.

pub mod grid;
pub mod header;
pub mod hover;
pub mod overlay;
pub mod page;
pub mod resize;
pub mod reveal;
pub mod stage;

pub use grid::{GridConfig, GridLayout};
pub use header::HeaderPin;
pub use hover::{HoverConfig, HoverController};
pub use overlay::{Key, NoopScrollLock, Overlay, OverlayConfig, ScrollLock};
pub use page::{PageConfig, SectionToggles, ShowcasePage};
pub use resize::ResizeDebouncer;
pub use reveal::{GridAnimator, RevealConfig, RowPhase, RowState};
pub use stage::{NodeId, Stage, VisualNode};
