#![forbid(unsafe_code)]

//! Character scramble: a text node resolves to its real content through
//! a burst of random glyphs.
//!
//! [`Scramble`] is a tick-driven effect over one string. Characters
//! resolve left to right with a per-character stagger; an unresolved
//! character cycles through random glyphs, swapping every `char_delay`,
//! for at most `max_iterations` swaps. A leading fraction of the text
//! (`reveal_fraction`) plus the first `skip_chars` characters are shown
//! as-is and never scramble.
//!
//! [`ScrambleBank`] owns the in-flight scrambles per target and kills an
//! in-flight run when the same target is restarted, so a scramble is
//! always safely re-invocable mid-flight.
//!
//! # Invariants
//!
//! 1. Output for a given (seed, config, elapsed) is deterministic; glyphs
//!    are derived, not sampled statefully, so `text()` is read-only.
//! 2. After completion the output equals the original string exactly.
//! 3. Skipped and pre-revealed characters display their original glyph at
//!    every tick.
//!
//! # Failure Modes
//!
//! - Empty input: immediately complete, output is the empty string.
//! - Zero `char_delay`: clamped to 1ms so the swap cadence stays finite.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Glyph pool unresolved characters cycle through.
const CHARSET: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '7', '8', '9', '#', '%', '&', '*', '+',
];

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Timing parameters for a scramble run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrambleConfig {
    /// Upper bound on each character's scramble window.
    pub duration: Duration,
    /// Interval between glyph swaps for one character.
    pub char_delay: Duration,
    /// Delay between successive characters starting to resolve.
    pub stagger: Duration,
    /// Leading characters that never scramble.
    pub skip_chars: usize,
    /// Cap on glyph swaps per character.
    pub max_iterations: u32,
}

impl ScrambleConfig {
    /// Parameters used for the hero heading reveal.
    #[must_use]
    pub const fn hero() -> Self {
        Self {
            duration: Duration::from_millis(400),
            char_delay: Duration::from_millis(40),
            stagger: Duration::from_millis(80),
            skip_chars: 0,
            max_iterations: 5,
        }
    }

    /// Parameters used for the hover label scramble.
    #[must_use]
    pub const fn hover_label() -> Self {
        Self {
            duration: Duration::from_millis(100),
            char_delay: Duration::from_millis(25),
            stagger: Duration::from_millis(25),
            skip_chars: 1,
            max_iterations: 5,
        }
    }

    /// Per-character scramble window: `duration` capped by the swap budget.
    fn window(&self) -> Duration {
        let delay = self.char_delay.max(Duration::from_millis(1));
        self.duration.min(delay * self.max_iterations)
    }
}

// ---------------------------------------------------------------------------
// Scramble
// ---------------------------------------------------------------------------

/// One in-flight scramble over a single string.
#[derive(Debug, Clone)]
pub struct Scramble {
    original: Vec<char>,
    config: ScrambleConfig,
    /// Leading fraction of the text revealed immediately.
    reveal_fraction: f32,
    seed: u64,
    elapsed: Duration,
}

impl Scramble {
    /// Start a scramble over `text`.
    ///
    /// `reveal_fraction` in [0, 1] is the leading portion of the text that
    /// is shown as-is from the first tick; the remainder scrambles in with
    /// the configured stagger. `seed` fixes the glyph sequence.
    #[must_use]
    pub fn new(text: &str, reveal_fraction: f32, config: ScrambleConfig, seed: u64) -> Self {
        Self {
            original: text.chars().collect(),
            config,
            reveal_fraction: reveal_fraction.clamp(0.0, 1.0),
            seed,
            elapsed: Duration::ZERO,
        }
    }

    /// Index of the first character that participates in scrambling.
    fn scramble_start(&self) -> usize {
        let len = self.original.len();
        let skip = self.config.skip_chars.min(len);
        let pre_revealed = ((len - skip) as f32 * self.reveal_fraction).floor() as usize;
        skip + pre_revealed
    }

    /// Advance by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Whether every character has resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let count = self.original.len().saturating_sub(self.scramble_start());
        if count == 0 {
            return true;
        }
        let last_start = self.config.stagger * (count as u32 - 1);
        self.elapsed >= last_start + self.config.window()
    }

    /// Current display text.
    #[must_use]
    pub fn text(&self) -> String {
        let start = self.scramble_start();
        let window = self.config.window();
        let delay = self.config.char_delay.max(Duration::from_millis(1));

        let mut out = String::with_capacity(self.original.len());
        for (i, &ch) in self.original.iter().enumerate() {
            if i < start || ch.is_whitespace() {
                out.push(ch);
                continue;
            }
            let char_start = self.config.stagger * ((i - start) as u32);
            if self.elapsed >= char_start + window {
                out.push(ch);
            } else if self.elapsed >= char_start {
                let iteration = (self.elapsed - char_start).as_millis() / delay.as_millis();
                out.push(self.glyph(i, iteration as u64));
            } else {
                // Not yet started: hold the original glyph.
                out.push(ch);
            }
        }
        out
    }

    /// Deterministic glyph for (character index, swap iteration).
    fn glyph(&self, index: usize, iteration: u64) -> char {
        let mix = self
            .seed
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .wrapping_add((index as u64) << 32)
            .wrapping_add(iteration);
        let mut rng = SmallRng::seed_from_u64(mix);
        CHARSET[rng.random_range(0..CHARSET.len())]
    }
}

// ---------------------------------------------------------------------------
// Bank
// ---------------------------------------------------------------------------

/// A text write emitted by [`ScrambleBank::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScrambleWrite<K> {
    /// The target the write belongs to.
    pub key: K,
    /// Text to display this tick.
    pub text: String,
    /// True on the final write (text equals the original).
    pub done: bool,
}

/// In-flight scrambles keyed by target. Restarting a key kills the
/// previous run; writes are emitted in bind order.
#[derive(Debug, Default)]
pub struct ScrambleBank<K: PartialEq + Copy> {
    active: Vec<(K, Scramble)>,
}

impl<K: PartialEq + Copy> ScrambleBank<K> {
    /// Create an empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self { active: Vec::new() }
    }

    /// Start a scramble on `key`, killing any in-flight run there.
    pub fn start(&mut self, key: K, scramble: Scramble) {
        self.kill(key);
        self.active.push((key, scramble));
    }

    /// Kill the in-flight run on `key`, if any.
    pub fn kill(&mut self, key: K) -> bool {
        let before = self.active.len();
        self.active.retain(|(k, _)| *k != key);
        self.active.len() != before
    }

    /// Kill every in-flight run.
    pub fn kill_all(&mut self) {
        self.active.clear();
    }

    /// Whether a run is in flight on `key`.
    #[must_use]
    pub fn is_active(&self, key: K) -> bool {
        self.active.iter().any(|(k, _)| *k == key)
    }

    /// Advance all runs by `dt` and collect the text writes.
    pub fn tick(&mut self, dt: Duration) -> Vec<ScrambleWrite<K>> {
        let mut writes = Vec::with_capacity(self.active.len());
        for (key, scramble) in &mut self.active {
            scramble.tick(dt);
            writes.push(ScrambleWrite {
                key: *key,
                text: scramble.text(),
                done: scramble.is_complete(),
            });
        }
        self.active.retain(|(_, s)| !s.is_complete());
        writes
    }
}
