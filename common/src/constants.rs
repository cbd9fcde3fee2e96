// Maze:
pub const BASE_MAZE_SIZE: usize = 11;
pub const MAX_MAZE_SIZE: usize = 21; // Reached at level 6; must stay odd.
pub const MAX_EXTRA_PASSAGES: usize = 10;
pub const EXTRA_PASSAGES_PER_LEVEL: usize = 2;

// Progression:
pub const MAX_LEVEL: u32 = 100;
pub const LEVEL_BASE_TOKENS: f64 = 25_000.0;
pub const LEVEL_EXPONENT: f64 = 1.8;

// Rewards:
pub const MAZE_BASE_REWARD: u64 = 10_000;
pub const MAZE_REWARD_PER_LEVEL: u64 = 5_000;
pub const MAZE_TIME_BONUS_WINDOW_MS: u64 = 60_000; // One token per millisecond under a minute.

// Leaderboard:
pub const LEADERBOARD_LENGTH: usize = 100;
