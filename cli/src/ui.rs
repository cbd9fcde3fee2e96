use std::collections::HashSet;
use std::fmt;
use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Print, Stylize},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use logiplay_common::format::{format_time, format_tokens};
use logiplay_common::game::{Direction, MazeRun};
use logiplay_common::maze::{Maze, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiInputError {
    Disconnected,
}

impl fmt::Display for UiInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiInputError::Disconnected => write!(f, "Input source disconnected"),
        }
    }
}

impl std::error::Error for UiInputError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Move(Direction),
    NextLevel,
    Restart,
    Claim,
    Quit,
}

/// One string per maze row. `route` cells are marked, and `player` is drawn over everything.
pub fn maze_lines(maze: &Maze, route: &[Position], player: Option<Position>) -> Vec<String> {
    let route: HashSet<Position> = route.iter().copied().collect();

    maze.cells()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    let position = cell.position();
                    if player == Some(position) {
                        "@@".yellow().bold().to_string()
                    } else if cell.is_start {
                        "S ".cyan().to_string()
                    } else if cell.is_end {
                        "E ".green().bold().to_string()
                    } else if cell.is_wall {
                        "██".dark_grey().to_string()
                    } else if route.contains(&position) {
                        "··".green().to_string()
                    } else {
                        "  ".to_string()
                    }
                })
                .collect::<String>()
        })
        .collect()
}

pub struct TerminalUi<W: Write> {
    stdout: W,
    is_raw_mode_owner: bool, // True except in tests.
}

impl TerminalUi<Stdout> {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(Self {
            stdout,
            is_raw_mode_owner: true,
        })
    }
}

impl<W: Write> TerminalUi<W> {
    pub fn draw(&mut self, run: &MazeRun, message: &str) -> io::Result<()> {
        queue!(self.stdout, MoveTo(0, 0), Clear(ClearType::All))?;

        if let Some(maze) = &run.maze {
            for line in maze_lines(maze, &[], Some(run.player_position)) {
                queue!(self.stdout, Print(line), Print("\r\n"))?;
            }
        }

        let best = run
            .best_time(run.level)
            .map_or_else(|| "-".to_string(), format_time);
        queue!(
            self.stdout,
            Print(format!(
                "Level {}  Cleared {}  Unclaimed {}  Best {best}\r\n",
                run.level,
                run.score,
                format_tokens(run.tokens)
            )),
            Print("arrows/wasd move  [n] next  [r] restart  [c] claim  [q] quit\r\n"),
            Print(message),
        )?;

        self.stdout.flush()
    }

    pub fn poll_action(&mut self) -> Result<Option<PlayerAction>, UiInputError> {
        if !event::poll(Duration::from_millis(50)).unwrap_or(false) {
            return Ok(None);
        }

        match event::read() {
            Ok(event) => Ok(self.handle_event(event)),
            Err(_) => Err(UiInputError::Disconnected),
        }
    }

    fn handle_event(&self, event: Event) -> Option<PlayerAction> {
        let Event::Key(key_event) = event else {
            return None;
        };
        if key_event.kind == KeyEventKind::Release {
            return None;
        }

        if key_event.modifiers == KeyModifiers::CONTROL {
            return match key_event.code {
                KeyCode::Char('c') | KeyCode::Char('d') => Some(PlayerAction::Quit),
                _ => None,
            };
        }

        match key_event.code {
            KeyCode::Up | KeyCode::Char('w') => Some(PlayerAction::Move(Direction::Up)),
            KeyCode::Down | KeyCode::Char('s') => Some(PlayerAction::Move(Direction::Down)),
            KeyCode::Left | KeyCode::Char('a') => Some(PlayerAction::Move(Direction::Left)),
            KeyCode::Right | KeyCode::Char('d') => Some(PlayerAction::Move(Direction::Right)),
            KeyCode::Char('n') => Some(PlayerAction::NextLevel),
            KeyCode::Char('r') => Some(PlayerAction::Restart),
            KeyCode::Char('c') => Some(PlayerAction::Claim),
            KeyCode::Char('q') | KeyCode::Esc => Some(PlayerAction::Quit),
            _ => None,
        }
    }
}

impl<W: Write> Drop for TerminalUi<W> {
    fn drop(&mut self) {
        if self.is_raw_mode_owner {
            // Only the instance that enabled raw mode may disable it.
            execute!(self.stdout, Show, LeaveAlternateScreen).ok();
            if let Err(error) = terminal::disable_raw_mode() {
                eprintln!("Failed to disable raw mode: {error}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn setup_test_ui() -> TerminalUi<Vec<u8>> {
        TerminalUi {
            stdout: Vec::new(),
            is_raw_mode_owner: false, // Don't touch global raw mode.
        }
    }

    fn key_event(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn arrows_and_wasd_move_the_player() {
        let ui = setup_test_ui();

        assert_eq!(
            ui.handle_event(key_event(KeyCode::Up)),
            Some(PlayerAction::Move(Direction::Up))
        );
        assert_eq!(
            ui.handle_event(key_event(KeyCode::Char('a'))),
            Some(PlayerAction::Move(Direction::Left))
        );
        assert_eq!(
            ui.handle_event(key_event(KeyCode::Char('s'))),
            Some(PlayerAction::Move(Direction::Down))
        );
        assert_eq!(
            ui.handle_event(key_event(KeyCode::Right)),
            Some(PlayerAction::Move(Direction::Right))
        );
    }

    #[test]
    fn command_keys_map_to_actions() {
        let ui = setup_test_ui();

        assert_eq!(
            ui.handle_event(key_event(KeyCode::Char('n'))),
            Some(PlayerAction::NextLevel)
        );
        assert_eq!(
            ui.handle_event(key_event(KeyCode::Char('c'))),
            Some(PlayerAction::Claim)
        );
        assert_eq!(
            ui.handle_event(key_event(KeyCode::Esc)),
            Some(PlayerAction::Quit)
        );
        assert_eq!(ui.handle_event(key_event(KeyCode::Char('x'))), None);
        assert_eq!(ui.handle_event(Event::Resize(80, 24)), None);
    }

    #[test]
    fn control_c_quits_instead_of_claiming() {
        let ui = setup_test_ui();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert_eq!(ui.handle_event(event), Some(PlayerAction::Quit));
    }

    #[test]
    fn maze_lines_mark_route_and_player() {
        let maze = Maze::generate(1, &mut StdRng::seed_from_u64(3)).expect("valid level");
        let route = maze.solve().expect("solvable");
        let player = route[1];

        let lines = maze_lines(&maze, &route, Some(player));

        assert_eq!(lines.len(), maze.height());
        let joined = lines.join("\n");
        assert_eq!(joined.matches("@@").count(), 1);
        // Start, player and end are drawn with their own markers.
        assert_eq!(joined.matches("··").count(), route.len() - 3);
    }

    #[test]
    fn draw_writes_maze_and_status() {
        let mut ui = setup_test_ui();
        let mut run = MazeRun::new();
        run.start(&mut StdRng::seed_from_u64(8), 0)
            .expect("level 1 is valid");

        ui.draw(&run, "hello").expect("drawing to a Vec cannot fail");

        let output = String::from_utf8_lossy(&ui.stdout);
        assert!(output.contains("@@"));
        assert!(output.contains("Level 1"));
        assert!(output.ends_with("hello"));
    }
}
