#![forbid(unsafe_code)]

//! Core primitives for the Vitrine showcase engine.
//!
//! # Role in Vitrine
//! `vitrine-core` is the leaf layer. It owns scroll-span math, easing
//! curves, the tween and scramble effects, responsive-mode tracking, and
//! the static catalog records. It knows nothing about controllers or the
//! stage; everything here is a pure value type or a tick-driven effect.
//!
//! # Primary responsibilities
//! - **Geometry**: f32 rectangles and viewport metrics for span resolution.
//! - **Scroll spans**: edge-pair span specs resolved against document
//!   positions, reporting normalized progress.
//! - **Tween/Scramble**: tick-driven animation effects with per-target
//!   banks that guarantee a single writer per animated property.
//! - **Catalog**: tile and profile records, the sparse grid matrix, and
//!   the reveal-origin table, with configuration validation.
//!
//! # How it fits in the system
//! `vitrine-showcase` consumes these primitives to drive per-row reveal
//! state machines and the hover preview controller. The host renderer
//! never touches this crate directly.

pub mod catalog;
pub mod easing;
pub mod geometry;
pub mod mode;
pub mod scramble;
pub mod scroll;
pub mod tween;

pub use catalog::{Catalog, CatalogError, GridMatrix, ProfileRecord, RevealOrigin, TileRecord};
pub use easing::{EasingFn, linear, power4_out};
pub use geometry::{Rect, Viewport};
pub use mode::{Mode, ModeTracker};
pub use scroll::{ScrollSpan, SpanSpec};
pub use tween::{ClipShape, Tween, TweenBank};
