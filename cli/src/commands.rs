//! Non-interactive subcommands. Each one prints its report to stdout.

use std::error::Error;

use log::debug;
use rand::{SeedableRng, rngs::StdRng};

use logiplay_common::constants::MAX_LEVEL;
use logiplay_common::format::{format_time, format_tokens, group_thousands, shorten_address};
use logiplay_common::leaderboard::Leaderboard;
use logiplay_common::maze::Maze;
use logiplay_common::profile::GameSession;
use logiplay_common::progression::{self, checked_tokens};
use logiplay_common::rewards::{Difficulty, GameType, calculate_game_token_reward};
use logiplay_common::storage::Store;
use logiplay_common::time::now_millis;

use crate::ui::maze_lines;

pub type CommandResult = Result<(), Box<dyn Error>>;

const PROGRESS_BAR_WIDTH: usize = 30;

pub fn maze(level: u32, seed: Option<u64>, solve: bool) -> CommandResult {
    let maze = match seed {
        Some(seed) => Maze::generate(level, &mut StdRng::seed_from_u64(seed))?,
        None => Maze::random(level)?,
    };

    let route = if solve { maze.solve() } else { None };
    for line in maze_lines(&maze, route.as_deref().unwrap_or_default(), None) {
        println!("{line}");
    }

    println!(
        "{}x{} maze, start {} end {}",
        maze.width(),
        maze.height(),
        maze.start(),
        maze.end()
    );
    if let Some(route) = route {
        println!("Shortest route: {} steps", route.len() - 1);
    }
    Ok(())
}

pub fn session(
    store: &Store,
    wallet: Option<&str>,
    game_type: GameType,
    score: u32,
    difficulty: Difficulty,
    level: Option<u32>,
) -> CommandResult {
    let mut profile = store.load_profile(wallet)?;

    let tokens_earned = calculate_game_token_reward(game_type, score, difficulty);
    profile.switch_game(game_type);
    profile.add_game_session(GameSession {
        game_type,
        score,
        tokens_earned,
        completed_at: now_millis(),
        difficulty,
        level,
    });
    store.save_profile(wallet, &profile)?;

    println!(
        "Recorded {game_type} ({difficulty}): +{} tokens, {} waiting to be claimed",
        format_tokens(tokens_earned),
        format_tokens(profile.unclaimed_tokens())
    );
    Ok(())
}

pub fn claim(store: &Store, wallet: &str) -> CommandResult {
    let mut profile = store.load_profile(Some(wallet))?;
    if profile.unclaimed_tokens() == 0 {
        println!("Nothing to claim.");
        return Ok(());
    }

    let receipt = profile.claim_rewards(now_millis());
    store.save_profile(Some(wallet), &profile)?;

    println!(
        "Claimed {} tokens, lifetime total {}",
        format_tokens(receipt.amount),
        group_thousands(profile.total_claimed_tokens())
    );
    if receipt.leveled_up() {
        println!(
            "Level up! {} -> {}",
            receipt.previous_level, receipt.new_level
        );
    }
    Ok(())
}

pub fn status(store: &Store, wallet: Option<&str>, tokens: Option<i64>) -> CommandResult {
    let total = match tokens {
        Some(tokens) => checked_tokens(tokens)?,
        None => {
            let profile = store.load_profile(wallet)?;
            if profile.unclaimed_tokens() > 0 {
                println!(
                    "Unclaimed: {} tokens",
                    format_tokens(profile.unclaimed_tokens())
                );
            }
            profile.total_claimed_tokens()
        }
    };

    for line in status_report(total) {
        println!("{line}");
    }
    Ok(())
}

fn status_report(total: u64) -> Vec<String> {
    let level = progression::user_level(total);
    let progress = progression::level_progress(total);
    let milestone = progression::milestone(total);

    let mut lines = vec![
        format!("Tokens: {} ({})", group_thousands(total), format_tokens(total)),
        format!(
            "Level {level} [{}] {progress:.1}%",
            progress_bar(progress, PROGRESS_BAR_WIDTH)
        ),
        format!("Rank: {} {}", milestone.emoji, milestone.rank),
    ];

    if level < MAX_LEVEL {
        lines.push(format!(
            "Next level at {} tokens",
            group_thousands(progression::next_level_tokens(total))
        ));
    }
    if let Some(next_rank) = milestone.next_rank {
        lines.push(format!(
            "{} more tokens to {next_rank}",
            group_thousands(milestone.tokens_needed)
        ));
    }
    lines
}

fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn ladder(from: u32, to: u32) -> CommandResult {
    for line in ladder_rows(from, to)? {
        println!("{line}");
    }
    Ok(())
}

fn ladder_rows(from: u32, to: u32) -> Result<Vec<String>, Box<dyn Error>> {
    debug!("ladder from level {from} to {to}");
    (from..=to)
        .map(|level| -> Result<String, Box<dyn Error>> {
            let required = progression::tokens_required(level)?;
            Ok(format!(
                "{level:>3}  {:>20}  {:>8}",
                group_thousands(required),
                format_tokens(required)
            ))
        })
        .collect()
}

pub fn leaderboard(store: &Store, limit: usize) -> CommandResult {
    let board = store.load_leaderboard()?;
    if board.is_empty() {
        println!("No runs recorded yet.");
        return Ok(());
    }

    for line in leaderboard_rows(&board, limit) {
        println!("{line}");
    }
    Ok(())
}

fn leaderboard_rows(board: &Leaderboard, limit: usize) -> Vec<String> {
    board
        .entries()
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{:>3}. {:<14} level {:>3}  {:>6}  {:>8} tokens",
                i + 1,
                shorten_address(&entry.address, 4),
                entry.level,
                format_time(entry.time),
                format_tokens(entry.tokens)
            )
        })
        .collect()
}
