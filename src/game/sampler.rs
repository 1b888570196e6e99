//! Word Sampling Engine
//!
//! Produces the seen/unseen word sequence a live game displays, mixing fresh
//! draws with already-seen draws at a tunable rate. One sampler owns one
//! [`DeterministicRng`]; given the same seed, threshold, and pool order it
//! reproduces the exact same sequence, which is what makes replay possible.
//!
//! All probability comparisons are done with integer draws against a scaled
//! threshold. Floats never touch the RNG path, so there is no cross-platform
//! consumption drift.

use thiserror::Error;

use crate::core::rng::DeterministicRng;

/// Integer resolution of the seen probability. A threshold of
/// `THRESHOLD_MAX` means "always draw seen when possible".
pub const THRESHOLD_MAX: u32 = 1_000_000_000;

// =============================================================================
// SEEN THRESHOLD
// =============================================================================

/// Probability of drawing an already-seen word, scaled to
/// `[0, THRESHOLD_MAX]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeenThreshold(u32);

/// Rejected threshold values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThresholdError {
    /// Ratio form must lie within `[0.0, 1.0]`.
    #[error("seen threshold ratio must be within [0.0, 1.0]")]
    RatioOutOfRange,

    /// Pre-scaled form must not exceed [`THRESHOLD_MAX`].
    #[error("scaled seen threshold must not exceed {THRESHOLD_MAX}")]
    ScaledOutOfRange,
}

impl SeenThreshold {
    /// Accept a pre-scaled threshold, e.g. from a decoded payload.
    pub fn from_scaled(scaled: u32) -> Result<SeenThreshold, ThresholdError> {
        if scaled > THRESHOLD_MAX {
            Err(ThresholdError::ScaledOutOfRange)
        } else {
            Ok(SeenThreshold(scaled))
        }
    }

    /// The scaled integer value.
    pub fn scaled(&self) -> u32 {
        self.0
    }
}

impl TryFrom<f64> for SeenThreshold {
    type Error = ThresholdError;

    fn try_from(ratio: f64) -> Result<SeenThreshold, ThresholdError> {
        if !(0.0..=1.0).contains(&ratio) {
            Err(ThresholdError::RatioOutOfRange)
        } else {
            Ok(SeenThreshold((THRESHOLD_MAX as f64 * ratio) as u32))
        }
    }
}

// =============================================================================
// WORD SAMPLER
// =============================================================================

/// Deterministic seen/unseen word sampler.
///
/// Words start in the unseen pool; once produced and superseded they migrate
/// into the seen pool and never return. Unseen draws are destructive
/// (swap-and-pop, pool order carries no meaning); seen draws are not.
///
/// # Degenerate pools
///
/// A pool of size 1 exhausts immediately and then repeats its single word
/// forever: no "never repeat" guarantee can hold with one candidate. This is
/// accepted behavior, not a bug.
#[derive(Clone, Debug)]
pub struct WordSampler {
    rng: DeterministicRng,
    unseen: Vec<String>,
    seen: Vec<String>,
    threshold: u32,
    current: Option<String>,
}

impl WordSampler {
    /// Create a sampler over `unseen`, drawing seen words at the rate given
    /// by `threshold`.
    pub fn new(seed: u64, threshold: SeenThreshold, unseen: Vec<String>) -> WordSampler {
        WordSampler {
            rng: DeterministicRng::new(seed),
            unseen,
            seen: Vec::new(),
            threshold: threshold.scaled(),
            current: None,
        }
    }

    /// Produce the next word, or `None` once an initially-empty pool is asked
    /// for a word (a non-empty pool never runs dry: unseen exhaustion falls
    /// back to seen draws).
    ///
    /// The previous word is retired into the seen pool first; two consecutive
    /// calls never return the same word while at least two candidates exist.
    pub fn next(&mut self) -> Option<String> {
        let previous = self.current.take();
        if let Some(prev) = &previous {
            if !self.seen.iter().any(|w| w == prev) {
                self.seen.push(prev.clone());
            }
        }

        // The seen branch requires two distinct seen words; below that no
        // threshold draw is consumed at all.
        let element = if self.seen.len() < 2
            || self.rng.next_bounded(THRESHOLD_MAX) > self.threshold
        {
            self.draw_unseen(previous.as_deref())
        } else {
            self.draw_seen(previous.as_deref())
        }?;

        self.current = Some(element.clone());
        Some(element)
    }

    /// Destructive draw from the unseen pool, falling back to the seen pool
    /// when exhausted.
    fn draw_unseen(&mut self, previous: Option<&str>) -> Option<String> {
        if self.unseen.is_empty() {
            return self.draw_seen(previous);
        }
        let i = self.rng.next_bounded(self.unseen.len() as u32) as usize;
        Some(self.unseen.swap_remove(i))
    }

    /// Non-destructive draw from the seen pool, redrawing until the result
    /// differs from the word just retired.
    fn draw_seen(&mut self, previous: Option<&str>) -> Option<String> {
        if self.seen.is_empty() {
            return None;
        }
        if self.seen.len() == 1 {
            // Single candidate: the no-repeat rule cannot hold, return it.
            return Some(self.seen[0].clone());
        }
        loop {
            let i = self.rng.next_bounded(self.seen.len() as u32) as usize;
            if previous.map_or(true, |p| self.seen[i] != p) {
                return Some(self.seen[i].clone());
            }
        }
    }

    /// The most recently produced word, absent before the first draw.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Pure membership test: has `word` already been retired into the seen
    /// pool? The current word counts only once it is superseded.
    pub fn has_seen(&self, word: &str) -> bool {
        self.seen.iter().any(|w| w == word)
    }
}

// =============================================================================
// TESTS
// =============================================================================
