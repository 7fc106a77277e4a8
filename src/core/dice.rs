//! The d21 dice mechanic.
//!
//! A roll is uniform over 1..=21. A natural 21 always succeeds, a natural 1
//! always fails unless luck grants a single reroll, and everything in between
//! is compared against `difficulty - stat`.

use super::constants::*;
use super::random::RandomSource;
use serde::{Deserialize, Serialize};

/// Outcome of a single skill check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCheck {
    /// The roll that decided the check (the second roll when rerolled).
    pub roll: u32,
    pub succeeded: bool,
    pub is_critical_success: bool,
    pub is_critical_failure: bool,
    pub was_rerolled: bool,
}

/// Rolls a d21.
pub fn roll(rng: &mut impl RandomSource) -> u32 {
    rng.range_inclusive(1, DIE_SIDES)
}

/// Rolls `n` dice and keeps the highest. `n == 0` rolls once.
pub fn roll_with_advantage(n: u32, rng: &mut impl RandomSource) -> u32 {
    (0..n.max(1)).map(|_| roll(rng)).max().unwrap_or(1)
}

/// Rolls `n` dice and keeps the lowest. `n == 0` rolls once.
pub fn roll_with_disadvantage(n: u32, rng: &mut impl RandomSource) -> u32 {
    (0..n.max(1)).map(|_| roll(rng)).min().unwrap_or(1)
}

/// Probability that a natural 1 is rerolled at the given luck.
pub fn reroll_chance(luck: i32) -> f64 {
    if luck < LUCK_REROLL_THRESHOLD {
        return 0.0;
    }
    let points = (luck - LUCK_REROLL_THRESHOLD) as f64;
    (points * LUCK_REROLL_CHANCE_PER_POINT).clamp(0.0, LUCK_REROLL_CHANCE_CAP)
}

/// Lowest roll that counts as a critical success at the given luck.
///
/// 21 below the expansion threshold, 18 at the threshold, then one lower for
/// every further step of luck, never below the floor.
pub fn critical_threshold(luck: i32) -> u32 {
    if luck < LUCK_CRIT_EXPANSION_THRESHOLD {
        return NATURAL_CRITICAL_SUCCESS;
    }
    let steps = ((luck - LUCK_CRIT_EXPANSION_THRESHOLD) / LUCK_CRIT_EXPANSION_STEP) as u32;
    EXPANDED_CRIT_BASE_THRESHOLD
        .saturating_sub(steps)
        .max(EXPANDED_CRIT_FLOOR)
}

/// Pure success rule for a roll in 2..=20.
pub fn beats_difficulty(stat: i32, difficulty: i32, roll: u32) -> bool {
    difficulty - stat - roll as i32 <= 0
}

/// Performs a skill check of `stat` against `difficulty`.
pub fn skill_check(
    stat: i32,
    difficulty: i32,
    luck: i32,
    rng: &mut impl RandomSource,
) -> SkillCheck {
    let mut result = roll(rng);
    let mut was_rerolled = false;

    if result == NATURAL_CRITICAL_FAILURE && rng.chance(reroll_chance(luck)) {
        was_rerolled = true;
        result = roll(rng);
    }

    evaluate(result, stat, difficulty, luck, was_rerolled)
}

/// Applies the check rules to an already-rolled value.
pub fn evaluate(
    roll: u32,
    stat: i32,
    difficulty: i32,
    luck: i32,
    was_rerolled: bool,
) -> SkillCheck {
    if roll >= NATURAL_CRITICAL_SUCCESS {
        return SkillCheck {
            roll,
            succeeded: true,
            is_critical_success: true,
            is_critical_failure: false,
            was_rerolled,
        };
    }

    if roll <= NATURAL_CRITICAL_FAILURE {
        return SkillCheck {
            roll,
            succeeded: false,
            is_critical_success: false,
            is_critical_failure: true,
            was_rerolled,
        };
    }

    let succeeded = beats_difficulty(stat, difficulty, roll);
    SkillCheck {
        roll,
        succeeded,
        is_critical_success: succeeded && roll >= critical_threshold(luck),
        is_critical_failure: false,
        was_rerolled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_roll_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..5000 {
            let r = roll(&mut rng);
            assert!((1..=21).contains(&r));
            seen_min |= r == 1;
            seen_max |= r == 21;
        }
        assert!(seen_min && seen_max, "both extremes should appear in 5000 rolls");
    }

    #[test]
    fn test_natural_21_always_succeeds() {
        let mut rng = ScriptedRandom::new().with_ints([21]);
        let check = skill_check(0, 1000, 0, &mut rng);
        assert!(check.succeeded);
        assert!(check.is_critical_success);
        assert!(!check.was_rerolled);
    }

    #[test]
    fn test_natural_1_fails_without_luck() {
        let mut rng = ScriptedRandom::new().with_ints([1]).with_floats([0.0]);
        let check = skill_check(1000, 0, 5, &mut rng);
        assert!(!check.succeeded);
        assert!(check.is_critical_failure);
        assert!(!check.was_rerolled);
    }

    #[test]
    fn test_lucky_reroll_uses_second_roll() {
        // luck 20 -> 30% reroll chance; 0.1 triggers it
        let mut rng = ScriptedRandom::new().with_ints([1, 15]).with_floats([0.1]);
        let check = skill_check(10, 20, 20, &mut rng);
        assert!(check.was_rerolled);
        assert_eq!(check.roll, 15);
        assert!(check.succeeded);
        assert!(!check.is_critical_failure);
    }

    #[test]
    fn test_second_natural_1_still_fails() {
        let mut rng = ScriptedRandom::new().with_ints([1, 1]).with_floats([0.0]);
        let check = skill_check(1000, 0, 30, &mut rng);
        assert!(check.was_rerolled);
        assert_eq!(check.roll, 1);
        assert!(!check.succeeded);
        assert!(check.is_critical_failure);
    }

    #[test]
    fn test_missed_reroll_roll_stands() {
        let mut rng = ScriptedRandom::new().with_ints([1]).with_floats([0.9]);
        let check = skill_check(10, 5, 20, &mut rng);
        assert!(!check.was_rerolled);
        assert!(!check.succeeded);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        // difficulty - stat - roll == 0 succeeds
        let check = evaluate(10, 5, 15, 0, false);
        assert!(check.succeeded);
        // one short fails
        let check = evaluate(9, 5, 15, 0, false);
        assert!(!check.succeeded);
    }

    #[test]
    fn test_middle_rolls_follow_formula() {
        for r in 2..=20u32 {
            for stat in 0..15 {
                for difficulty in 0..40 {
                    let check = evaluate(r, stat, difficulty, 0, false);
                    assert_eq!(check.succeeded, difficulty - stat - r as i32 <= 0);
                }
            }
        }
    }

    #[test]
    fn test_reroll_chance_scales_with_luck() {
        assert_eq!(reroll_chance(0), 0.0);
        assert_eq!(reroll_chance(9), 0.0);
        assert_eq!(reroll_chance(10), 0.0);
        assert!((reroll_chance(20) - 0.3).abs() < 1e-9);
        assert_eq!(reroll_chance(100), 0.5);

        let mut previous = 0.0;
        for luck in 0..60 {
            let chance = reroll_chance(luck);
            assert!(chance >= previous);
            assert!((0.0..=1.0).contains(&chance));
            previous = chance;
        }
    }

    #[test]
    fn test_critical_threshold_expands_with_luck() {
        assert_eq!(critical_threshold(0), 21);
        assert_eq!(critical_threshold(14), 21);
        assert_eq!(critical_threshold(15), 18);
        assert_eq!(critical_threshold(19), 18);
        assert_eq!(critical_threshold(20), 17);
        assert_eq!(critical_threshold(25), 16);
        assert_eq!(critical_threshold(200), 15);
    }

    #[test]
    fn test_expanded_crit_requires_success() {
        let lucky_hit = evaluate(18, 10, 20, 15, false);
        assert!(lucky_hit.succeeded);
        assert!(lucky_hit.is_critical_success);

        let lucky_miss = evaluate(18, 0, 40, 15, false);
        assert!(!lucky_miss.succeeded);
        assert!(!lucky_miss.is_critical_success);

        let unlucky_hit = evaluate(18, 10, 20, 5, false);
        assert!(unlucky_hit.succeeded);
        assert!(!unlucky_hit.is_critical_success);
    }

    #[test]
    fn test_advantage_and_disadvantage() {
        let mut rng = ScriptedRandom::new().with_ints([4, 17, 9]);
        assert_eq!(roll_with_advantage(3, &mut rng), 17);

        let mut rng = ScriptedRandom::new().with_ints([4, 17, 9]);
        assert_eq!(roll_with_disadvantage(3, &mut rng), 4);

        let mut rng = ScriptedRandom::new().with_ints([12]);
        assert_eq!(roll_with_advantage(0, &mut rng), 12);
    }

    #[test]
    fn test_advantage_is_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(roll_with_advantage(2, &mut a), roll_with_advantage(2, &mut b));
        }
    }
}
