//! # Dice
//!
//! Injectable random sources. Every roll the simulation makes goes through
//! [`RandomSource`], so a run can be replayed from a seed and a test can pin
//! an exact sequence of rolls with [`ScriptedRolls`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of uniformly distributed integers.
///
/// Only [`RandomSource::roll_range`] is required; the other rolls are built
/// on top of it so a scripted source controls all of them.
pub trait RandomSource {
    /// Rolls a uniform integer in `[low, high]` (both inclusive).
    fn roll_range(&mut self, low: i32, high: i32) -> i32;

    /// Rolls a twenty-sided die.
    fn d20(&mut self) -> i32 {
        self.roll_range(1, 20)
    }

    /// Percentile check. Probabilities of 0 or 1 are decided without drawing.
    fn chance(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        let threshold = (probability * 100.0).round() as i32;
        self.roll_range(1, 100) <= threshold
    }

    /// Picks an index into a collection of `len` elements.
    ///
    /// Returns 0 without drawing when there is at most one element.
    fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.roll_range(0, len as i32 - 1) as usize
    }
}

/// Seeded random source backed by [`StdRng`].
///
/// # Examples
///
/// ```
/// use void_reckoning::{RandomSource, SeededRng};
///
/// let mut a = SeededRng::new(7);
/// let mut b = SeededRng::new(7);
/// assert_eq!(a.roll_range(1, 100), b.roll_range(1, 100));
/// ```
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: StdRng,
}

impl SeededRng {
    /// Creates a random source from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a random source seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this source was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRng {
    fn roll_range(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Replays a fixed sequence of rolls, then falls back to a seeded source.
///
/// Scripted values are clamped into the requested range, so a script of
/// `[5, 10]` means "the next d20 shows 5, the next damage roll shows 10".
///
/// # Examples
///
/// ```
/// use void_reckoning::{RandomSource, ScriptedRolls};
///
/// let mut rolls = ScriptedRolls::new([5, 40]);
/// assert_eq!(rolls.d20(), 5);
/// assert_eq!(rolls.roll_range(8, 19), 19);
/// assert_eq!(rolls.remaining(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    script: VecDeque<i32>,
    fallback: SeededRng,
}

impl ScriptedRolls {
    /// Creates a scripted source whose fallback is seeded with 0.
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self::with_fallback_seed(values, 0)
    }

    /// Creates a scripted source with an explicit fallback seed.
    pub fn with_fallback_seed(values: impl IntoIterator<Item = i32>, seed: u64) -> Self {
        Self {
            script: values.into_iter().collect(),
            fallback: SeededRng::new(seed),
        }
    }

    /// Appends more scripted rolls.
    pub fn push(&mut self, values: impl IntoIterator<Item = i32>) {
        self.script.extend(values);
    }

    /// Number of scripted rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for ScriptedRolls {
    fn roll_range(&mut self, low: i32, high: i32) -> i32 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        match self.script.pop_front() {
            Some(value) => value.clamp(low, high),
            None => self.fallback.roll_range(low, high),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = SeededRng::new(99);
        let mut b = SeededRng::new(99);
        let first: Vec<i32> = (0..20).map(|_| a.roll_range(0, 1000)).collect();
        let second: Vec<i32> = (0..20).map(|_| b.roll_range(0, 1000)).collect();
        assert_eq!(first, second);
        assert_eq!(a.seed(), 99);
    }

    #[test]
    fn test_seeded_rng_stays_in_range() {
        let mut rng = SeededRng::new(3);
        for _ in 0..500 {
            let roll = rng.d20();
            assert!((1..=20).contains(&roll));
        }
        assert_eq!(rng.roll_range(4, 4), 4);
    }

    #[test]
    fn test_scripted_rolls_clamp_and_fall_back() {
        let mut rolls = ScriptedRolls::new([25, -3, 7]);
        assert_eq!(rolls.d20(), 20);
        assert_eq!(rolls.d20(), 1);
        assert_eq!(rolls.roll_range(8, 19), 8);
        assert_eq!(rolls.remaining(), 0);

        let fallback = rolls.roll_range(1, 6);
        assert!((1..=6).contains(&fallback));
    }

    #[test]
    fn test_chance_edges_do_not_draw() {
        let mut rolls = ScriptedRolls::new([100]);
        assert!(!rolls.chance(0.0));
        assert!(rolls.chance(1.0));
        assert_eq!(rolls.remaining(), 1);
        assert!(!rolls.chance(0.6));
        assert_eq!(rolls.remaining(), 0);
    }

    #[test]
    fn test_pick_index() {
        let mut rolls = ScriptedRolls::new([2]);
        assert_eq!(rolls.pick_index(1), 0);
        assert_eq!(rolls.pick_index(5), 2);
    }
}
