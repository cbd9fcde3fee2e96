//! Command-line options.
//!
//! # Examples
//!
//! Print a level 3 maze with its shortest route:
//!
//! ```text
//! $ logiplay maze --level 3 --solve
//! ```
//!
//! Record a won tic-tac-toe game, claim it, and show the resulting rank:
//!
//! ```text
//! $ logiplay session --game tic-tac-toe --score 1 --wallet 0xAbC...
//! $ logiplay claim --wallet 0xAbC...
//! $ logiplay status --wallet 0xAbC...
//! ```

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use logiplay_common::constants::MAX_LEVEL;
use logiplay_common::rewards::{Difficulty, GameType};

/// Maze runs, token rewards and ranks for LogiPlay.
#[derive(Parser)]
#[command(about, long_about = None, version)]
pub struct Args {
    /// Enable debug messages
    #[arg(short, long, default_value_t = false, global = true)]
    pub debug: bool,

    /// Directory holding profiles and the leaderboard
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a generated maze
    Maze {
        /// Difficulty level; the grid grows with it
        #[arg(short, long, default_value_t = 1)]
        level: u32,

        /// Seed for a reproducible maze
        #[arg(long)]
        seed: Option<u64>,

        /// Overlay the shortest route from start to end
        #[arg(long, default_value_t = false)]
        solve: bool,
    },

    /// Play a maze run with the arrow keys or WASD
    Play {
        /// Jump to this level, capped at the highest unlocked one
        #[arg(short, long)]
        level: Option<u32>,

        /// Wallet address the progress is saved under
        #[arg(short, long)]
        wallet: Option<String>,
    },

    /// Record a finished game of another kind
    Session {
        #[arg(short, long)]
        game: GameType,

        #[arg(short, long)]
        score: u32,

        #[arg(short = 'f', long, default_value_t = Difficulty::Normal)]
        difficulty: Difficulty,

        /// Level reached, for games that have levels
        #[arg(short, long)]
        level: Option<u32>,

        #[arg(short, long)]
        wallet: Option<String>,
    },

    /// Claim the tokens waiting in a profile
    Claim {
        /// Claiming needs a connected wallet
        #[arg(short, long)]
        wallet: String,
    },

    /// Show level, progress and rank
    Status {
        #[arg(short, long)]
        wallet: Option<String>,

        /// Use this lifetime token total instead of a saved profile
        #[arg(short, long, allow_negative_numbers = true, conflicts_with = "wallet")]
        tokens: Option<i64>,
    },

    /// Print the tokens required for each level
    Ladder {
        #[arg(long, default_value_t = 1)]
        from: u32,

        #[arg(long, default_value_t = MAX_LEVEL)]
        to: u32,
    },

    /// Show the best maze runs
    Leaderboard {
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },
}

/// Parse the command line and set up logging.
pub fn parse() -> Args {
    let args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    args
}
