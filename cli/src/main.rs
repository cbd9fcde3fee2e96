mod cli_options;
mod commands;
mod play;
mod ui;

use std::process::ExitCode;

use cli_options::Command;
use logiplay_common::storage::Store;

fn main() -> ExitCode {
    let args = cli_options::parse();
    let store = match args.data_dir {
        Some(dir) => Store::new(dir),
        None => Store::open_default(),
    };

    let result = match args.command {
        Command::Maze { level, seed, solve } => commands::maze(level, seed, solve),
        Command::Play { level, wallet } => play::play(&store, wallet.as_deref(), level),
        Command::Session {
            game,
            score,
            difficulty,
            level,
            wallet,
        } => commands::session(&store, wallet.as_deref(), game, score, difficulty, level),
        Command::Claim { wallet } => commands::claim(&store, &wallet),
        Command::Status { wallet, tokens } => commands::status(&store, wallet.as_deref(), tokens),
        Command::Ladder { from, to } => commands::ladder(from, to),
        Command::Leaderboard { limit } => commands::leaderboard(&store, limit),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
