//! A player's persisted state: the maze run, claimed tokens and game history.
//!
//! [`Profile`] is owned by whoever drives the game and saved through
//! [`crate::storage::Store`]. The progression helpers on it forward the
//! lifetime claimed total to [`crate::progression`] as a plain value.

use log::info;
use serde::{Deserialize, Serialize};

use crate::game::MazeRun;
use crate::progression::{self, Milestone};
use crate::rewards::{Difficulty, GameType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub game_type: GameType,
    pub score: u32,
    pub tokens_earned: u64,
    pub completed_at: u64,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub amount: u64,
    pub game_type: GameType,
    pub timestamp: u64,
}

/// Stored shape of the claimed-tokens record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimLedger {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub history: Vec<Claim>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub amount: u64,
    pub previous_level: u32,
    pub new_level: u32,
}

impl ClaimReceipt {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.previous_level
    }
}

#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub run: MazeRun,
    pub current_game: GameType,
    pub claims: ClaimLedger,
    pub last_claimed: u64,
    pub sessions: Vec<GameSession>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_claimed_tokens(&self) -> u64 {
        self.claims.total
    }

    pub fn unclaimed_tokens(&self) -> u64 {
        self.run.tokens
    }

    pub fn switch_game(&mut self, game_type: GameType) {
        self.current_game = game_type;
    }

    /// Record a finished game; its tokens wait in the run until claimed.
    pub fn add_game_session(&mut self, session: GameSession) {
        self.run.tokens += session.tokens_earned;
        self.sessions.push(session);
    }

    /// Log a cleared maze level. The run already credited `reward` when the
    /// player reached the exit, so only the history grows here.
    pub fn record_maze_completion(&mut self, reward: u64, now_ms: u64) {
        self.sessions.push(GameSession {
            game_type: GameType::Maze,
            score: u32::try_from(reward).unwrap_or(u32::MAX),
            tokens_earned: reward,
            completed_at: now_ms,
            difficulty: Difficulty::Normal,
            level: Some(self.run.level),
        });
    }

    /// Highest level recorded for `game_type`, or 0 if none has been completed.
    pub fn max_completed_level(&self, game_type: GameType) -> u32 {
        self.sessions
            .iter()
            .filter(|session| session.game_type == game_type)
            .filter_map(|session| session.level)
            .max()
            .unwrap_or(0)
    }

    /// Move the run's unclaimed tokens into the lifetime total.
    pub fn claim_rewards(&mut self, now_ms: u64) -> ClaimReceipt {
        let amount = self.run.tokens;
        let previous_level = self.level();

        self.claims.total = self.claims.total.saturating_add(amount);
        self.last_claimed = amount;
        self.claims.history.push(Claim {
            amount,
            game_type: self.current_game,
            timestamp: now_ms,
        });
        self.run.tokens = 0;
        self.run.is_completed = false;

        let receipt = ClaimReceipt {
            amount,
            previous_level,
            new_level: self.level(),
        };
        if receipt.leveled_up() {
            info!(
                "claim of {amount} tokens raised level {} -> {}",
                receipt.previous_level, receipt.new_level
            );
        }
        receipt
    }

    pub fn level(&self) -> u32 {
        progression::user_level(self.claims.total)
    }

    pub fn level_progress(&self) -> f64 {
        progression::level_progress(self.claims.total)
    }

    pub fn next_level_tokens(&self) -> u64 {
        progression::next_level_tokens(self.claims.total)
    }

    pub fn milestone(&self) -> Milestone {
        progression::milestone(self.claims.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(game_type: GameType, tokens: u64, level: Option<u32>) -> GameSession {
        GameSession {
            game_type,
            score: 1,
            tokens_earned: tokens,
            completed_at: 0,
            difficulty: Difficulty::Normal,
            level,
        }
    }

    #[test]
    fn sessions_accumulate_unclaimed_tokens() {
        let mut profile = Profile::new();

        profile.add_game_session(session(GameType::Dice, 30_000, None));
        profile.add_game_session(session(GameType::Memory, 180_000, None));

        assert_eq!(profile.unclaimed_tokens(), 210_000);
        assert_eq!(profile.total_claimed_tokens(), 0);
        assert_eq!(profile.sessions.len(), 2);
    }

    #[test]
    fn claiming_moves_tokens_into_lifetime_total() {
        let mut profile = Profile::new();
        profile.switch_game(GameType::Dice);
        profile.add_game_session(session(GameType::Dice, 30_000, None));
        profile.run.is_completed = true;

        let receipt = profile.claim_rewards(1_700_000_000_000);

        assert_eq!(receipt.amount, 30_000);
        assert_eq!(profile.total_claimed_tokens(), 30_000);
        assert_eq!(profile.last_claimed, 30_000);
        assert_eq!(profile.unclaimed_tokens(), 0);
        assert!(!profile.run.is_completed);
        assert_eq!(
            profile.claims.history,
            vec![Claim {
                amount: 30_000,
                game_type: GameType::Dice,
                timestamp: 1_700_000_000_000
            }]
        );
    }

    #[test]
    fn claim_reports_level_ups() {
        let mut profile = Profile::new();
        profile.add_game_session(session(GameType::Maze, 24_999, None));
        let receipt = profile.claim_rewards(0);
        assert!(!receipt.leveled_up());

        profile.add_game_session(session(GameType::Maze, 1, None));
        let receipt = profile.claim_rewards(0);
        assert_eq!((receipt.previous_level, receipt.new_level), (1, 2));
        assert!(receipt.leveled_up());
    }

    #[test]
    fn empty_claims_are_still_recorded() {
        let mut profile = Profile::new();

        let receipt = profile.claim_rewards(5);

        assert_eq!(receipt.amount, 0);
        assert_eq!(profile.claims.history.len(), 1);
    }

    #[test]
    fn max_completed_level_is_per_game() {
        let mut profile = Profile::new();
        assert_eq!(profile.max_completed_level(GameType::Maze), 0);

        profile.add_game_session(session(GameType::Maze, 0, Some(3)));
        profile.add_game_session(session(GameType::Maze, 0, Some(7)));
        profile.add_game_session(session(GameType::Snake, 0, Some(12)));
        profile.add_game_session(session(GameType::Maze, 0, None));

        assert_eq!(profile.max_completed_level(GameType::Maze), 7);
        assert_eq!(profile.max_completed_level(GameType::Snake), 12);
        assert_eq!(profile.max_completed_level(GameType::Dice), 0);
    }

    #[test]
    fn maze_completions_are_logged_without_double_crediting() {
        let mut profile = Profile::new();
        profile.run.level = 4;
        profile.run.tokens = 40_000;

        profile.record_maze_completion(40_000, 9);

        assert_eq!(profile.unclaimed_tokens(), 40_000);
        assert_eq!(profile.max_completed_level(GameType::Maze), 4);
        assert_eq!(profile.sessions[0].tokens_earned, 40_000);
    }

    #[test]
    fn progression_follows_claimed_total_only() {
        let mut profile = Profile::new();
        profile.add_game_session(session(GameType::Maze, 5_000_000, None));
        assert_eq!(profile.level(), 1);
        assert_eq!(profile.milestone().rank, "Rookie");

        profile.claim_rewards(0);

        assert_eq!(profile.level(), progression::user_level(5_000_000));
        assert_eq!(profile.milestone().rank, "Master");
        assert!(profile.next_level_tokens() > 5_000_000);
    }
}
