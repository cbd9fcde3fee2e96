//! Interactive maze run in the terminal.

use log::{info, warn};
use rand::Rng;

use logiplay_common::format::{format_time, format_tokens};
use logiplay_common::game::MoveOutcome;
use logiplay_common::leaderboard::{Leaderboard, LeaderboardEntry};
use logiplay_common::profile::Profile;
use logiplay_common::rewards::GameType;
use logiplay_common::storage::Store;
use logiplay_common::time::now_millis;

use crate::commands::CommandResult;
use crate::ui::{PlayerAction, TerminalUi};

const ANONYMOUS: &str = "anonymous";

pub fn play(store: &Store, wallet: Option<&str>, level: Option<u32>) -> CommandResult {
    let mut profile = store.load_profile(wallet)?;
    let mut leaderboard = store.load_leaderboard()?;
    let mut rng = rand::rng();

    profile.switch_game(GameType::Maze);
    match level {
        Some(level) => {
            let started = profile.run.select_level(level, &mut rng, now_millis())?;
            if started != level {
                warn!("level {level} is locked, starting level {started}");
            }
        }
        None if profile.run.maze.is_none() || profile.run.is_completed => {
            profile.run.start(&mut rng, now_millis())?;
        }
        None => info!("resuming level {}", profile.run.level),
    }

    let result = {
        let mut ui = TerminalUi::new()?;
        let mut session = PlaySession {
            profile: &mut profile,
            leaderboard: &mut leaderboard,
            wallet,
            message: String::new(),
        };
        session.run(&mut ui, &mut rng)
    };

    store.save_profile(wallet, &profile)?;
    store.save_leaderboard(&leaderboard)?;
    result
}

struct PlaySession<'a> {
    profile: &'a mut Profile,
    leaderboard: &'a mut Leaderboard,
    wallet: Option<&'a str>,
    message: String,
}

impl PlaySession<'_> {
    fn run<W: std::io::Write, R: Rng + ?Sized>(
        &mut self,
        ui: &mut TerminalUi<W>,
        rng: &mut R,
    ) -> CommandResult {
        ui.draw(&self.profile.run, &self.message)?;

        loop {
            let Some(action) = ui.poll_action()? else {
                continue;
            };
            if action == PlayerAction::Quit {
                return Ok(());
            }

            self.apply(action, rng, now_millis())?;
            ui.draw(&self.profile.run, &self.message)?;
        }
    }

    fn apply<R: Rng + ?Sized>(&mut self, action: PlayerAction, rng: &mut R, now_ms: u64) -> CommandResult {
        match action {
            PlayerAction::Move(direction) => {
                if let MoveOutcome::Completed { reward, elapsed_ms } =
                    self.profile.run.move_player(direction, now_ms)
                {
                    self.complete_level(reward, elapsed_ms, now_ms);
                }
            }
            PlayerAction::NextLevel if self.profile.run.is_completed => {
                self.profile.run.next_level(rng, now_ms)?;
                self.message.clear();
            }
            PlayerAction::NextLevel => {
                self.message = "Reach the exit first.".to_string();
            }
            PlayerAction::Restart => {
                self.profile.run.start(rng, now_ms)?;
                self.message.clear();
            }
            PlayerAction::Claim => self.claim(rng, now_ms)?,
            PlayerAction::Quit => {}
        }
        Ok(())
    }

    fn complete_level(&mut self, reward: u64, elapsed_ms: u64, now_ms: u64) {
        let level = self.profile.run.level;
        self.profile.record_maze_completion(reward, now_ms);
        self.leaderboard.add_entry(LeaderboardEntry {
            address: self.wallet.unwrap_or(ANONYMOUS).to_string(),
            level,
            time: elapsed_ms,
            tokens: reward,
            timestamp: now_ms,
        });

        self.message = format!(
            "Level {level} cleared in {}! +{} tokens. [n] next level, [c] claim",
            format_time(elapsed_ms),
            format_tokens(reward)
        );
    }

    fn claim<R: Rng + ?Sized>(&mut self, rng: &mut R, now_ms: u64) -> CommandResult {
        if self.wallet.is_none() {
            self.message = "Connect a wallet with --wallet to claim rewards.".to_string();
            return Ok(());
        }
        if self.profile.unclaimed_tokens() == 0 {
            self.message = "Nothing to claim yet.".to_string();
            return Ok(());
        }

        // Claiming reopens the run, so a cleared maze must not be walked again.
        let cleared = self.profile.run.is_completed;
        let receipt = self.profile.claim_rewards(now_ms);
        if cleared {
            self.profile.run.next_level(rng, now_ms)?;
        }

        self.message = format!("Claimed {} tokens.", format_tokens(receipt.amount));
        if receipt.leveled_up() {
            self.message
                .push_str(&format!(" Level up! {} -> {}", receipt.previous_level, receipt.new_level));
        }
        Ok(())
    }
}
