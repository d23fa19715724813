#![forbid(unsafe_code)]

//! Easing curves for tweened values.
//!
//! Every curve maps normalized time `t ∈ [0, 1]` to an eased fraction in
//! [0, 1] with `f(0) = 0` and `f(1) = 1`. The hover and overlay
//! transitions use [`power4_out`], a quartic deceleration.

/// An easing function: normalized time in, eased fraction out.
pub type EasingFn = fn(f32) -> f32;

/// Identity easing.
#[inline]
#[must_use]
pub fn linear(t: f32) -> f32 {
    t
}

/// Quadratic ease-out: fast start, gentle stop.
#[inline]
#[must_use]
pub fn power2_out(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv
}

/// Quartic ease-out: very fast start, long deceleration tail.
#[inline]
#[must_use]
pub fn power4_out(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv
}
