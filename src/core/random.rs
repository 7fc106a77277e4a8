//! Injectable randomness.
//!
//! Every stochastic function in the crate takes a `&mut impl RandomSource`
//! instead of reaching for a thread-local generator. Any `rand::Rng` works as a
//! source (production code seeds a `StdRng`, tests seed a `ChaCha8Rng`), and
//! [`ScriptedRandom`] replays fixed values for scenario tests.

use rand::Rng;
use std::collections::VecDeque;

/// A source of random numbers.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `[min, max]` (inclusive on both ends).
    fn range_inclusive(&mut self, min: u32, max: u32) -> u32;

    /// Uniform float in `[min, max)`.
    fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns true with the given probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Picks an index into a slice of length `len`. Returns `None` when empty.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.range_inclusive(0, (len - 1) as u32) as usize)
        }
    }
}

impl<R: Rng> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.gen_range(min..=max)
    }
}

/// Replays scripted values in order.
///
/// Integer draws and float draws come from separate queues. Scripted integers
/// are clamped into the requested range. When a queue runs dry, integers fall
/// back to the midpoint of the requested range and floats to `0.5`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    ints: VecDeque<u32>,
    floats: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ints(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.ints.extend(values);
        self
    }

    pub fn with_floats(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.floats.extend(values);
        self
    }

    /// Number of scripted integers not yet consumed.
    pub fn remaining_ints(&self) -> usize {
        self.ints.len()
    }

    /// Number of scripted floats not yet consumed.
    pub fn remaining_floats(&self) -> usize {
        self.floats.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        self.floats.pop_front().unwrap_or(0.5)
    }

    fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        match self.ints.pop_front() {
            Some(value) => value.clamp(min, max.max(min)),
            None => min + (max.saturating_sub(min)) / 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_scripted_replays_in_order() {
        let mut rng = ScriptedRandom::new()
            .with_ints([3, 7])
            .with_floats([0.25, 0.75]);

        assert_eq!(rng.range_inclusive(1, 21), 3);
        assert_eq!(rng.next_f64(), 0.25);
        assert_eq!(rng.range_inclusive(1, 21), 7);
        assert_eq!(rng.next_f64(), 0.75);
        assert_eq!(rng.remaining_ints(), 0);
        assert_eq!(rng.remaining_floats(), 0);
    }

    #[test]
    fn test_scripted_clamps_into_range() {
        let mut rng = ScriptedRandom::new().with_ints([99, 0]);
        assert_eq!(rng.range_inclusive(1, 21), 21);
        assert_eq!(rng.range_inclusive(1, 21), 1);
    }

    #[test]
    fn test_scripted_fallbacks() {
        let mut rng = ScriptedRandom::new();
        assert_eq!(rng.range_inclusive(30, 60), 45);
        assert_eq!(rng.next_f64(), 0.5);
        assert!(!rng.chance(0.5));
        assert!(rng.chance(0.51));
    }

    #[test]
    fn test_rng_range_inclusive_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..1000 {
            let v = rng.range_inclusive(5, 15);
            assert!((5..=15).contains(&v));
        }
        assert_eq!(rng.range_inclusive(7, 7), 7);
    }

    #[test]
    fn test_pick_index_empty_is_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(rng.pick_index(0), None);
        assert!(rng.pick_index(3).unwrap() < 3);
    }
}
