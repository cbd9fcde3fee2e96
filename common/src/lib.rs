pub mod config;
pub mod constants;
pub mod format;
pub mod game;
pub mod leaderboard;
pub mod maze;
pub mod profile;
pub mod progression;
pub mod rewards;
pub mod storage;
pub mod time;
