//! Lifetime-token progression: the level ladder and the rank milestones.
//!
//! Everything here is a pure function of the lifetime claimed-token total.
//! The caller owns that total; nothing in this module stores state.

use std::fmt;
use std::sync::LazyLock;

use crate::constants::{LEVEL_BASE_TOKENS, LEVEL_EXPONENT, MAX_LEVEL};

static DEFAULT_CURVE: LazyLock<LevelCurve> =
    LazyLock::new(|| LevelCurve::new(LEVEL_BASE_TOKENS, LEVEL_EXPONENT, MAX_LEVEL));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressionError {
    InvalidArgument { what: &'static str, value: i64 },
}

impl fmt::Display for ProgressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressionError::InvalidArgument { what, value } => {
                write!(f, "invalid argument: {what} cannot be {value}")
            }
        }
    }
}

impl std::error::Error for ProgressionError {}

/// Accept a signed token total from an untyped source, rejecting negatives.
pub fn checked_tokens(tokens: i64) -> Result<u64, ProgressionError> {
    u64::try_from(tokens).map_err(|_| ProgressionError::InvalidArgument {
        what: "token total",
        value: tokens,
    })
}

/// Polynomial level ladder.
///
/// Going from level `i - 1` to level `i` costs `floor(base * (i - 1)^exponent)`
/// tokens; the threshold for a level is the running sum of those steps, so
/// level 1 is free and every later level costs strictly more than the last.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelCurve {
    base: f64,
    exponent: f64,
    max_level: u32,
    ladder: Vec<u64>, // ladder[level - 1] is the threshold for `level`.
}

impl LevelCurve {
    pub fn new(base: f64, exponent: f64, max_level: u32) -> Self {
        assert!(max_level >= 1, "a ladder needs at least one level");
        assert!(base >= 1.0, "every step must cost at least one token");

        let mut ladder = Vec::with_capacity(max_level as usize);
        let mut total = 0u64;
        ladder.push(total);
        for level in 2..=max_level {
            let step = (base * f64::from(level - 1).powf(exponent)).floor() as u64;
            total = total.saturating_add(step);
            ladder.push(total);
        }

        Self {
            base,
            exponent,
            max_level,
            ladder,
        }
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn thresholds(&self) -> &[u64] {
        &self.ladder
    }

    pub fn tokens_required(&self, level: u32) -> Result<u64, ProgressionError> {
        if level == 0 || level > self.max_level {
            return Err(ProgressionError::InvalidArgument {
                what: "level",
                value: i64::from(level),
            });
        }
        Ok(self.threshold(level))
    }

    fn threshold(&self, level: u32) -> u64 {
        self.ladder[level as usize - 1]
    }

    /// Highest level whose threshold `tokens` has reached.
    pub fn user_level(&self, tokens: u64) -> u32 {
        // The first threshold is zero, so at least one entry always passes.
        self.ladder.partition_point(|&threshold| threshold <= tokens) as u32
    }

    /// Threshold of the next level, or zero once the top level is reached.
    pub fn next_level_tokens(&self, tokens: u64) -> u64 {
        let level = self.user_level(tokens);
        if level >= self.max_level {
            0
        } else {
            self.threshold(level + 1)
        }
    }

    /// Percent of the way from the current level to the next, in `[0, 100]`.
    pub fn level_progress(&self, tokens: u64) -> f64 {
        let level = self.user_level(tokens);
        if level >= self.max_level {
            return 100.0;
        }

        let current = self.threshold(level);
        let next = self.threshold(level + 1);
        let earned = tokens.saturating_sub(current) as f64;
        let span = (next - current) as f64;

        (earned / span * 100.0).clamp(0.0, 100.0)
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        DEFAULT_CURVE.clone()
    }
}

pub fn tokens_required(level: u32) -> Result<u64, ProgressionError> {
    DEFAULT_CURVE.tokens_required(level)
}

pub fn user_level(tokens: u64) -> u32 {
    DEFAULT_CURVE.user_level(tokens)
}

pub fn next_level_tokens(tokens: u64) -> u64 {
    DEFAULT_CURVE.next_level_tokens(tokens)
}

pub fn level_progress(tokens: u64) -> f64 {
    DEFAULT_CURVE.level_progress(tokens)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneTier {
    pub threshold: u64,
    pub rank: &'static str,
    pub emoji: &'static str,
}

/// Rank tiers in ascending threshold order. The last one has no successor.
pub const MILESTONES: &[MilestoneTier] = &[
    MilestoneTier { threshold: 0, rank: "Rookie", emoji: "🌱" },
    MilestoneTier { threshold: 50_000, rank: "Bronze", emoji: "🥉" },
    MilestoneTier { threshold: 200_000, rank: "Silver", emoji: "🥈" },
    MilestoneTier { threshold: 500_000, rank: "Gold", emoji: "🥇" },
    MilestoneTier { threshold: 1_000_000, rank: "Platinum", emoji: "💎" },
    MilestoneTier { threshold: 2_500_000, rank: "Diamond", emoji: "💠" },
    MilestoneTier { threshold: 5_000_000, rank: "Master", emoji: "👑" },
    MilestoneTier { threshold: 10_000_000, rank: "Grandmaster", emoji: "🏆" },
    MilestoneTier { threshold: 25_000_000, rank: "Champion", emoji: "⭐" },
    MilestoneTier { threshold: 50_000_000, rank: "Legend", emoji: "🌟" },
    MilestoneTier { threshold: 100_000_000, rank: "Mythic", emoji: "🔥" },
    MilestoneTier { threshold: 250_000_000, rank: "Divine", emoji: "✨" },
    MilestoneTier { threshold: 500_000_000, rank: "Cosmic", emoji: "🌌" },
    MilestoneTier { threshold: 1_000_000_000, rank: "Transcendent", emoji: "🚀" },
    MilestoneTier { threshold: 2_500_000_000, rank: "Omnipotent", emoji: "🌠" },
    MilestoneTier { threshold: 5_000_000_000, rank: "Infinite", emoji: "♾️" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub rank: &'static str,
    pub emoji: &'static str,
    pub next_rank: Option<&'static str>,
    pub tokens_needed: u64,
}

pub fn milestone(tokens: u64) -> Milestone {
    let index = MILESTONES
        .partition_point(|tier| tier.threshold <= tokens)
        .saturating_sub(1);
    let current = &MILESTONES[index];
    let next = MILESTONES.get(index + 1);

    Milestone {
        rank: current.rank,
        emoji: current.emoji,
        next_rank: next.map(|tier| tier.rank),
        tokens_needed: next.map_or(0, |tier| tier.threshold - tokens),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(level: u32) -> u64 {
        tokens_required(level).expect("level should be in range")
    }

    #[test]
    fn level_one_is_free() {
        assert_eq!(required(1), 0);
        assert_eq!(user_level(0), 1);
    }

    #[test]
    fn first_steps_match_the_curve() {
        assert_eq!(required(2), 25_000);
        // 25000 * 2^1.8 = 87_055.6...
        assert_eq!(required(3), 25_000 + 87_055);
    }

    #[test]
    fn ladder_is_strictly_increasing() {
        for level in 1..MAX_LEVEL {
            assert!(
                required(level + 1) > required(level),
                "level {} should cost more than level {level}",
                level + 1
            );
        }
    }

    #[test]
    fn top_of_the_ladder_fits_comfortably_in_u64() {
        let top = required(MAX_LEVEL);
        assert!(top > 1_000_000_000, "got {top}");
        assert!(top < 10_000_000_000, "got {top}");
    }

    #[test]
    fn out_of_range_levels_are_rejected() {
        assert_eq!(
            tokens_required(0),
            Err(ProgressionError::InvalidArgument {
                what: "level",
                value: 0
            })
        );
        assert!(tokens_required(MAX_LEVEL + 1).is_err());
    }

    #[test]
    fn negative_token_totals_are_rejected() {
        assert_eq!(checked_tokens(42), Ok(42));
        assert_eq!(
            checked_tokens(-1),
            Err(ProgressionError::InvalidArgument {
                what: "token total",
                value: -1
            })
        );
    }

    #[test]
    fn reaching_a_threshold_exactly_grants_the_level() {
        for level in 1..=MAX_LEVEL {
            assert_eq!(user_level(required(level)), level);
        }
    }

    #[test]
    fn one_token_short_does_not_grant_the_level() {
        for level in 2..=MAX_LEVEL {
            assert!(user_level(required(level) - 1) < level);
        }
    }

    #[test]
    fn user_level_saturates_at_max() {
        assert_eq!(user_level(u64::MAX), MAX_LEVEL);
        assert_eq!(level_progress(u64::MAX), 100.0);
        assert_eq!(next_level_tokens(u64::MAX), 0);
    }

    #[test]
    fn progress_runs_from_zero_to_nearly_one_hundred() {
        for level in 1..MAX_LEVEL {
            assert_eq!(level_progress(required(level)), 0.0);

            let almost = level_progress(required(level + 1) - 1);
            assert!(almost > 99.9 && almost < 100.0, "level {level}: {almost}");
        }
    }

    #[test]
    fn progress_halfway_through_level_one() {
        assert_eq!(level_progress(12_500), 50.0);
    }

    #[test]
    fn next_level_tokens_points_at_the_following_threshold() {
        assert_eq!(next_level_tokens(0), 25_000);
        assert_eq!(next_level_tokens(25_000), required(3));
    }

    #[test]
    fn custom_curve_uses_its_own_constants() {
        let curve = LevelCurve::new(10.0, 1.0, 5);

        assert_eq!(curve.thresholds(), &[0, 10, 30, 60, 100]);
        assert_eq!(curve.user_level(59), 3);
        assert_eq!(curve.level_progress(45), 50.0);
        assert!(curve.tokens_required(6).is_err());
    }

    #[test]
    fn milestone_at_zero_is_the_lowest_rank() {
        let m = milestone(0);

        assert_eq!(m.rank, MILESTONES[0].rank);
        assert_eq!(m.next_rank, Some("Bronze"));
        assert_eq!(m.tokens_needed, 50_000);
    }

    #[test]
    fn milestone_boundaries() {
        assert_eq!(milestone(49_999).rank, "Rookie");
        assert_eq!(milestone(50_000).rank, "Bronze");
        assert_eq!(milestone(1_200_000).rank, "Platinum");
        assert_eq!(milestone(1_200_000).tokens_needed, 1_300_000);
    }

    #[test]
    fn milestone_table_is_strictly_increasing() {
        for pair in MILESTONES.windows(2) {
            assert!(pair[0].threshold < pair[1].threshold);
        }
    }

    #[test]
    fn very_large_totals_reach_the_terminal_rank() {
        let m = milestone(u64::MAX);

        assert_eq!(m.rank, "Infinite");
        assert_eq!(m.next_rank, None);
        assert_eq!(m.tokens_needed, 0);
    }
}
