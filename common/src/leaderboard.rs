use serde::{Deserialize, Serialize};

use crate::constants::LEADERBOARD_LENGTH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub address: String,
    pub level: u32,
    pub time: u64,
    pub tokens: u64,
    pub timestamp: u64,
}

/// Best runs, highest level first and fastest first within a level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, entry: LeaderboardEntry) {
        self.entries.push(entry);
        // Stable, so equal entries keep their arrival order.
        self.entries
            .sort_by(|a, b| b.level.cmp(&a.level).then(a.time.cmp(&b.time)));
        self.entries.truncate(LEADERBOARD_LENGTH);
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
