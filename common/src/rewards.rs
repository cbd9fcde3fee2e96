use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::constants::{MAZE_BASE_REWARD, MAZE_REWARD_PER_LEVEL, MAZE_TIME_BONUS_WINDOW_MS};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameType {
    #[default]
    Maze,
    GuessNumber,
    TicTacToe,
    Hangman,
    Memory,
    Reaction,
    Snake,
    Dice,
}

impl GameType {
    /// Tokens per point of score before the difficulty multiplier.
    pub fn base_reward(self) -> u64 {
        match self {
            GameType::Maze => 10_000,
            GameType::GuessNumber => 50_000,
            GameType::TicTacToe => 150_000,
            GameType::Hangman => 80_000,
            GameType::Memory => 120_000,
            GameType::Reaction => 30_000,
            GameType::Snake => 10_000,
            GameType::Dice => 20_000,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Normal => 1.5,
            Difficulty::Medium => 2.0,
            Difficulty::Hard => 3.0,
            Difficulty::Expert => 5.0,
        }
    }
}

/// Reward for clearing a maze level: a base amount, a bonus per level, and
/// one token for every millisecond under a minute.
pub fn calculate_token_reward(level: u32, elapsed_ms: u64) -> u64 {
    let time_bonus = MAZE_TIME_BONUS_WINDOW_MS.saturating_sub(elapsed_ms);
    MAZE_BASE_REWARD + MAZE_REWARD_PER_LEVEL * u64::from(level) + time_bonus
}

pub fn calculate_game_token_reward(game_type: GameType, score: u32, difficulty: Difficulty) -> u64 {
    (game_type.base_reward() as f64 * f64::from(score) * difficulty.multiplier()).floor() as u64
}
