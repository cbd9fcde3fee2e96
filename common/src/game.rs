//! The maze run: one player's walk through consecutive maze levels.

use std::collections::BTreeMap;

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::maze::{Maze, MazeError, Position};
use crate::rewards::calculate_token_reward;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No maze loaded, or the level is already complete.
    Ignored,
    /// Wall or grid edge in the way.
    Blocked,
    Moved(Position),
    Completed { reward: u64, elapsed_ms: u64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeRun {
    pub player_position: Position,
    pub maze: Option<Maze>,
    pub level: u32,
    pub score: u32, // Levels cleared with `next_level`.
    pub tokens: u64, // Earned but not yet claimed.
    pub is_completed: bool,
    pub time_started: u64,
    pub best_times: BTreeMap<u32, u64>,
}

impl Default for MazeRun {
    fn default() -> Self {
        Self {
            player_position: Position::new(1, 1),
            maze: None,
            level: 1,
            score: 0,
            tokens: 0,
            is_completed: false,
            time_started: 0,
            best_times: BTreeMap::new(),
        }
    }
}

impl MazeRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh maze for the current level and put the player on its start.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R, now_ms: u64) -> Result<(), MazeError> {
        self.begin_level(self.level, rng, now_ms)
    }

    fn begin_level<R: Rng + ?Sized>(
        &mut self,
        level: u32,
        rng: &mut R,
        now_ms: u64,
    ) -> Result<(), MazeError> {
        let maze = Maze::generate(level, rng)?;
        debug!("starting level {level}\n{maze}");

        self.level = level;
        self.player_position = maze.start();
        self.maze = Some(maze);
        self.is_completed = false;
        self.time_started = now_ms;
        Ok(())
    }

    pub fn move_player(&mut self, direction: Direction, now_ms: u64) -> MoveOutcome {
        let (target, end) = match &self.maze {
            Some(maze) if !self.is_completed => {
                let (dx, dy) = direction.delta();
                match self.player_position.offset(dx, dy) {
                    Some(target) if maze.is_open(target) => (target, maze.end()),
                    _ => return MoveOutcome::Blocked,
                }
            }
            _ => return MoveOutcome::Ignored,
        };

        self.player_position = target;
        if target != end {
            return MoveOutcome::Moved(target);
        }

        let elapsed_ms = now_ms.saturating_sub(self.time_started);
        let reward = calculate_token_reward(self.level, elapsed_ms);
        self.tokens += reward;
        self.is_completed = true;

        let best = self.best_times.entry(self.level).or_insert(elapsed_ms);
        *best = (*best).min(elapsed_ms);

        info!(
            "level {} cleared in {elapsed_ms}ms for {reward} tokens",
            self.level
        );
        MoveOutcome::Completed { reward, elapsed_ms }
    }

    pub fn next_level<R: Rng + ?Sized>(&mut self, rng: &mut R, now_ms: u64) -> Result<(), MazeError> {
        self.begin_level(self.level.saturating_add(1), rng, now_ms)?;
        self.score += 1;
        Ok(())
    }

    /// Highest level the player may pick: one past the levels cleared, or the
    /// current level if that is higher.
    pub fn max_unlocked_level(&self) -> u32 {
        self.score.saturating_add(1).max(self.level)
    }

    /// Jump to `level`, capped at the highest unlocked level. Returns the level actually started.
    pub fn select_level<R: Rng + ?Sized>(
        &mut self,
        level: u32,
        rng: &mut R,
        now_ms: u64,
    ) -> Result<u32, MazeError> {
        if level == 0 {
            return Err(MazeError::InvalidLevel(level));
        }

        let target = level.min(self.max_unlocked_level());
        self.begin_level(target, rng, now_ms)?;
        Ok(target)
    }

    pub fn finish(&mut self) {
        self.is_completed = true;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn best_time(&self, level: u32) -> Option<u64> {
        self.best_times.get(&level).copied()
    }
}
