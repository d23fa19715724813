#![forbid(unsafe_code)]

//! Tweens: tick-driven interpolation of visual properties.
//!
//! A [`Tween`] drives one value from `from` to `to` over a duration with
//! an easing curve. A [`TweenBank`] owns the in-flight tweens for a set
//! of (target, property) keys and guarantees that each key has at most
//! one writer: starting a tween on a key kills any tween already running
//! there.
//!
//! # Invariants
//!
//! 1. One tween per key. `start()` on an occupied key replaces the
//!    in-flight tween before the next tick; the replaced tween never
//!    writes again.
//! 2. `tick()` emits at most one write per key per tick, in bind order.
//! 3. A completed tween emits its final value exactly once (the
//!    `then_set` override if present, otherwise `to`) and leaves the bank.
//!
//! # Failure Modes
//!
//! - Zero duration: clamped to 1ns; the first tick completes the tween.

use std::time::Duration;

use crate::easing::{EasingFn, linear};

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

/// Values a tween can interpolate.
pub trait Lerp: Copy {
    /// Linear interpolation between `a` and `b` at fraction `t`.
    fn lerp(a: Self, b: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }
}

/// A rectangular clip as two horizontal cut lines, in percent of the
/// target's height. `top` and `bottom` are the y positions of the upper
/// and lower clip edges; equal edges mean a fully closed (zero-area) clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipShape {
    /// Upper clip edge, 0.0 = top of the target, 100.0 = bottom.
    pub top: f32,
    /// Lower clip edge.
    pub bottom: f32,
}

impl ClipShape {
    /// Fully closed, collapsed against the top edge.
    pub const CLOSED_TOP: Self = Self {
        top: 0.0,
        bottom: 0.0,
    };

    /// Fully open rectangle.
    pub const OPEN: Self = Self {
        top: 0.0,
        bottom: 100.0,
    };

    /// Fully closed, collapsed against the bottom edge.
    pub const CLOSED_BOTTOM: Self = Self {
        top: 100.0,
        bottom: 100.0,
    };

    /// Visible height of the clip in percent.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f32 {
        (self.bottom - self.top).max(0.0)
    }
}

impl Lerp for ClipShape {
    #[inline]
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        Self {
            top: f32::lerp(a.top, b.top, t),
            bottom: f32::lerp(a.bottom, b.bottom, t),
        }
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// One value animated from `from` to `to` over a duration.
#[derive(Debug, Clone)]
pub struct Tween<V: Lerp> {
    from: V,
    to: V,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
    /// Value force-set on completion instead of `to`.
    final_override: Option<V>,
}

impl<V: Lerp> Tween<V> {
    /// Create a tween. A zero duration is clamped to 1ns.
    #[must_use]
    pub fn new(from: V, to: V, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            elapsed: Duration::ZERO,
            easing: linear,
            final_override: None,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Force-set `value` when the tween completes, instead of landing on
    /// `to` (builder pattern). Used to snap a retracted clip back to its
    /// resting shape.
    #[must_use]
    pub fn then_set(mut self, value: V) -> Self {
        self.final_override = Some(value);
        self
    }

    /// Advance by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    /// Current interpolated value.
    #[must_use]
    pub fn value(&self) -> V {
        if self.is_complete() {
            return self.final_override.unwrap_or(self.to);
        }
        let t = (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()) as f32;
        V::lerp(self.from, self.to, (self.easing)(t.clamp(0.0, 1.0)))
    }

    /// Whether the tween has reached its duration.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

// ---------------------------------------------------------------------------
// Bank
// ---------------------------------------------------------------------------

/// A write emitted by [`TweenBank::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenWrite<K, V> {
    /// The key the write targets.
    pub key: K,
    /// The interpolated (or final) value.
    pub value: V,
    /// True on the tween's last write.
    pub done: bool,
}

/// In-flight tweens keyed by animation target.
///
/// Iteration order is bind order, so writes within one tick are
/// deterministic. The bank is the only component that reads tween
/// values; callers apply the emitted writes at a single call site.
#[derive(Debug)]
pub struct TweenBank<K: PartialEq + Copy, V: Lerp> {
    active: Vec<(K, Tween<V>)>,
}

impl<K: PartialEq + Copy, V: Lerp> TweenBank<K, V> {
    /// Create an empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self { active: Vec::new() }
    }

    /// Start a tween on `key`, killing any in-flight tween on the same key.
    pub fn start(&mut self, key: K, tween: Tween<V>) {
        self.kill(key);
        self.active.push((key, tween));
    }

    /// Kill the in-flight tween on `key`, if any. Returns whether one existed.
    pub fn kill(&mut self, key: K) -> bool {
        let before = self.active.len();
        self.active.retain(|(k, _)| *k != key);
        self.active.len() != before
    }

    /// Kill every in-flight tween.
    pub fn kill_all(&mut self) {
        self.active.clear();
    }

    /// Whether a tween is running on `key`.
    #[must_use]
    pub fn is_active(&self, key: K) -> bool {
        self.active.iter().any(|(k, _)| *k == key)
    }

    /// Number of in-flight tweens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no tweens are in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Advance all tweens by `dt` and collect their writes.
    ///
    /// Completed tweens emit their final value and are removed.
    pub fn tick(&mut self, dt: Duration) -> Vec<TweenWrite<K, V>> {
        let mut writes = Vec::with_capacity(self.active.len());
        for (key, tween) in &mut self.active {
            tween.tick(dt);
            writes.push(TweenWrite {
                key: *key,
                value: tween.value(),
                done: tween.is_complete(),
            });
        }
        self.active.retain(|(_, t)| !t.is_complete());
        writes
    }
}

impl<K: PartialEq + Copy, V: Lerp> Default for TweenBank<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::power4_out;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_200: Duration = Duration::from_millis(200);
    const MS_500: Duration = Duration::from_millis(500);

    #[test]
    fn linear_tween_hits_midpoint() {
        let mut t = Tween::new(0.0f32, 10.0, MS_200);
        t.tick(MS_100);
        assert!((t.value() - 5.0).abs() < 0.01);
        assert!(!t.is_complete());
    }

    #[test]
    fn completes_and_lands_on_target() {
        let mut t = Tween::new(0.0f32, 10.0, MS_200);
        t.tick(MS_500);
        assert!(t.is_complete());
        assert_eq!(t.value(), 10.0);
    }

    #[test]
    fn eased_tween_front_loads() {
        let mut t = Tween::new(0.0f32, 1.0, MS_200).easing(power4_out);
        t.tick(MS_100);
        assert!(t.value() > 0.9);
    }

    #[test]
    fn then_set_overrides_final_value() {
        let mut t = Tween::new(ClipShape::OPEN, ClipShape::CLOSED_BOTTOM, MS_100)
            .then_set(ClipShape::CLOSED_TOP);
        t.tick(MS_100);
        assert!(t.is_complete());
        assert_eq!(t.value(), ClipShape::CLOSED_TOP);
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut t = Tween::new(0.0f32, 1.0, Duration::ZERO);
        t.tick(Duration::from_nanos(1));
        assert!(t.is_complete());
        assert_eq!(t.value(), 1.0);
    }

    #[test]
    fn clip_shape_lerp_moves_both_edges() {
        let mid = ClipShape::lerp(ClipShape::CLOSED_TOP, ClipShape::OPEN, 0.5);
        assert_eq!(mid.top, 0.0);
        assert!((mid.bottom - 50.0).abs() < 0.01);
        assert!((mid.area() - 50.0).abs() < 0.01);
    }

    #[test]
    fn closed_shapes_have_zero_area() {
        assert_eq!(ClipShape::CLOSED_TOP.area(), 0.0);
        assert_eq!(ClipShape::CLOSED_BOTTOM.area(), 0.0);
        assert_eq!(ClipShape::OPEN.area(), 100.0);
    }

    #[test]
    fn bank_start_replaces_in_flight() {
        let mut bank: TweenBank<u32, f32> = TweenBank::new();
        bank.start(7, Tween::new(0.0, 1.0, MS_500));
        bank.start(7, Tween::new(5.0, 6.0, MS_200));
        assert_eq!(bank.len(), 1);

        let writes = bank.tick(MS_100);
        assert_eq!(writes.len(), 1);
        // Value comes from the replacement, never the killed tween.
        assert!((writes[0].value - 5.5).abs() < 0.01);
    }

    #[test]
    fn bank_kill_prevents_further_writes() {
        let mut bank: TweenBank<u32, f32> = TweenBank::new();
        bank.start(1, Tween::new(0.0, 1.0, MS_500));
        assert!(bank.kill(1));
        assert!(!bank.kill(1));
        assert!(bank.tick(MS_100).is_empty());
    }

    #[test]
    fn bank_emits_final_write_once() {
        let mut bank: TweenBank<u32, f32> = TweenBank::new();
        bank.start(1, Tween::new(0.0, 1.0, MS_100));

        let writes = bank.tick(MS_200);
        assert_eq!(writes.len(), 1);
        assert!(writes[0].done);
        assert_eq!(writes[0].value, 1.0);

        // Completed tween left the bank; no further writes.
        assert!(bank.is_empty());
        assert!(bank.tick(MS_100).is_empty());
    }

    #[test]
    fn bank_writes_in_bind_order() {
        let mut bank: TweenBank<u32, f32> = TweenBank::new();
        bank.start(3, Tween::new(0.0, 1.0, MS_500));
        bank.start(1, Tween::new(0.0, 1.0, MS_500));
        bank.start(2, Tween::new(0.0, 1.0, MS_500));

        let keys: Vec<u32> = bank.tick(MS_100).iter().map(|w| w.key).collect();
        assert_eq!(keys, vec![3, 1, 2]);
    }

    #[test]
    fn bank_kill_all() {
        let mut bank: TweenBank<u32, f32> = TweenBank::new();
        bank.start(1, Tween::new(0.0, 1.0, MS_500));
        bank.start(2, Tween::new(0.0, 1.0, MS_500));
        bank.kill_all();
        assert!(bank.is_empty());
        assert!(!bank.is_active(1));
    }
}
