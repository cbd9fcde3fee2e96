//! Save and restore profiles and the leaderboard as JSON files.
//!
//! Every record lives in its own `<key>.json` file under the data directory.
//! Per-player records are keyed by wallet address when one is known, so
//! several wallets can share a machine; the leaderboard is shared by all.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Serialize, de::DeserializeOwned};

use crate::config;
use crate::game::MazeRun;
use crate::leaderboard::Leaderboard;
use crate::profile::{ClaimLedger, GameSession, Profile};

pub const GAME_STATE_KEY: &str = "logiplay_game_state";
pub const CLAIMED_TOKENS_KEY: &str = "logiplay_claimed_tokens";
pub const GAME_SESSIONS_KEY: &str = "logiplay_game_sessions";
pub const LEADERBOARD_KEY: &str = "logiplay_leaderboard";

/// `base` alone, or `base_<address>` with the address lower-cased.
pub fn wallet_storage_key(base: &str, wallet: Option<&str>) -> String {
    match wallet.map(str::trim).filter(|address| !address.is_empty()) {
        Some(address) => format!("{base}_{}", address.to_lowercase()),
        None => base.to_string(),
    }
}

#[derive(Debug)]
pub enum StorageError {
    Io { path: PathBuf, source: io::Error },
    Serialize { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io { path, source } => {
                write!(f, "cannot access {}: {source}", path.display())
            }
            StorageError::Serialize { path, source } => {
                write!(f, "cannot encode data for {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io { source, .. } => Some(source),
            StorageError::Serialize { source, .. } => Some(source),
        }
    }
}

pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: PathBuf) -> Self {
        debug!("data directory: {dir:?}");
        Self { dir }
    }

    /// Store rooted at the configured data directory.
    pub fn open_default() -> Self {
        Self::new(config::data_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Missing and malformed files both read as the default value.
    fn read<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, StorageError> {
        let path = self.path_for(key);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("{path:?} does not exist yet");
                return Ok(T::default());
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(value) => Ok(value),
            Err(source) if source.is_io() => Err(StorageError::Io {
                path,
                source: source.into(),
            }),
            Err(error) => {
                warn!("ignoring malformed {path:?}: {error}");
                Ok(T::default())
            }
        }
    }

    /// Write to `<key>.json.tmp`, then rename over `<key>.json`, so an
    /// interrupted save leaves the previous file intact.
    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        let file = File::create(&tmp_path).map_err(|source| StorageError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer(&mut writer, value).map_err(|source| StorageError::Serialize {
            path: tmp_path.clone(),
            source,
        })?;
        writer
            .flush()
            .and_then(|()| writer.get_ref().sync_all())
            .map_err(|source| StorageError::Io {
                path: tmp_path.clone(),
                source,
            })?;
        drop(writer);

        fs::rename(&tmp_path, &path).map_err(|source| StorageError::Io { path, source })
    }

    pub fn load_profile(&self, wallet: Option<&str>) -> Result<Profile, StorageError> {
        let run: MazeRun = self.read(&wallet_storage_key(GAME_STATE_KEY, wallet))?;
        let claims: ClaimLedger = self.read(&wallet_storage_key(CLAIMED_TOKENS_KEY, wallet))?;
        let sessions: Vec<GameSession> =
            self.read(&wallet_storage_key(GAME_SESSIONS_KEY, wallet))?;

        let last_claimed = claims.history.last().map_or(0, |claim| claim.amount);
        let current_game = claims
            .history
            .last()
            .map(|claim| claim.game_type)
            .unwrap_or_default();

        Ok(Profile {
            run,
            current_game,
            claims,
            last_claimed,
            sessions,
        })
    }

    pub fn save_profile(&self, wallet: Option<&str>, profile: &Profile) -> Result<(), StorageError> {
        self.write(&wallet_storage_key(GAME_STATE_KEY, wallet), &profile.run)?;
        self.write(&wallet_storage_key(CLAIMED_TOKENS_KEY, wallet), &profile.claims)?;
        self.write(&wallet_storage_key(GAME_SESSIONS_KEY, wallet), &profile.sessions)
    }

    pub fn load_leaderboard(&self) -> Result<Leaderboard, StorageError> {
        self.read(LEADERBOARD_KEY)
    }

    pub fn save_leaderboard(&self, leaderboard: &Leaderboard) -> Result<(), StorageError> {
        self.write(LEADERBOARD_KEY, leaderboard)
    }
}
