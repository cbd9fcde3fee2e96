use std::{env, path::PathBuf};

pub const DATA_DIR_VAR: &str = "LOGIPLAY_DATA_DIR";
const APP_DIR_NAME: &str = "logiplay";
const FALLBACK_DATA_DIR: &str = ".logiplay";

/// Where profiles and the leaderboard live: `LOGIPLAY_DATA_DIR` (from the
/// environment or a `.env` file), else the platform data directory.
pub fn data_dir() -> PathBuf {
    dotenvy::dotenv().ok();

    resolve_data_dir(env::var(DATA_DIR_VAR).ok(), dirs::data_dir())
}

fn resolve_data_dir(configured: Option<String>, platform: Option<PathBuf>) -> PathBuf {
    match configured.filter(|dir| !dir.trim().is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => platform
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR)),
    }
}
