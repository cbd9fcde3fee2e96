pub mod maker;
pub mod path;

use std::fmt;

use log::{debug, error};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BASE_MAZE_SIZE, EXTRA_PASSAGES_PER_LEVEL, MAX_EXTRA_PASSAGES, MAX_MAZE_SIZE,
};
use maker::{
    MazeMaker,
    algorithms::{backtrack::Backtrack, passages::ExtraPassages},
};

pub use path::find_path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The position `(dx, dy)` away, or `None` if that would leave the first quadrant.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Position> {
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub is_wall: bool,
    pub is_visited: bool, // Only meaningful while carving.
    pub is_path: bool,
    pub is_start: bool,
    pub is_end: bool,
}

impl Cell {
    fn wall(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            is_wall: true,
            is_visited: false,
            is_path: false,
            is_start: false,
            is_end: false,
        }
    }

    fn carve(&mut self) {
        self.is_wall = false;
        self.is_path = true;
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    InvalidLevel(u32),
    Malformed(&'static str),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidLevel(level) => {
                write!(f, "invalid maze level {level}; levels start at 1")
            }
            MazeError::Malformed(reason) => write!(f, "malformed maze: {reason}"),
        }
    }
}

impl std::error::Error for MazeError {}

/// Side length of the square grid for `level`: 11 at level 1, growing by two
/// per level up to 21.
pub fn size_for_level(level: u32) -> usize {
    let max_steps = (MAX_MAZE_SIZE - BASE_MAZE_SIZE) / 2;
    let steps = (level.saturating_sub(1) as usize).min(max_steps);
    BASE_MAZE_SIZE + 2 * steps
}

pub fn extra_passages_for_level(level: u32) -> usize {
    (level as usize)
        .saturating_mul(EXTRA_PASSAGES_PER_LEVEL)
        .min(MAX_EXTRA_PASSAGES)
}

/// A carved grid with one start and one end cell.
///
/// A `Maze` is read-only once built: every cell reachable through the
/// accessors is borrowed immutably. Both `generate` and deserialization check
/// that the grid is well formed and that `end` can be reached from `start`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "StoredMaze")]
pub struct Maze {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
    start: Position,
    end: Position,
}

#[derive(Deserialize)]
struct StoredMaze {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
    start: Position,
    end: Position,
}

impl TryFrom<StoredMaze> for Maze {
    type Error = MazeError;

    fn try_from(stored: StoredMaze) -> Result<Self, Self::Error> {
        let StoredMaze {
            cells,
            width,
            height,
            start,
            end,
        } = stored;

        if height == 0 || cells.len() != height || cells.iter().any(|row| row.len() != width) {
            return Err(MazeError::Malformed("grid does not match its stored size"));
        }
        let misplaced = cells.iter().enumerate().any(|(y, row)| {
            row.iter()
                .enumerate()
                .any(|(x, cell)| cell.position() != Position::new(x, y))
        });
        if misplaced {
            return Err(MazeError::Malformed("cell coordinates out of place"));
        }

        let maze = Self {
            cells,
            width,
            height,
            start,
            end,
        };
        if !maze.cell(start).is_some_and(|cell| cell.is_start)
            || !maze.cell(end).is_some_and(|cell| cell.is_end)
        {
            return Err(MazeError::Malformed("start or end is not marked"));
        }
        if maze.solve().is_none() {
            return Err(MazeError::Malformed("no path from start to end"));
        }

        Ok(maze)
    }
}

impl Maze {
    pub fn generate<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Result<Self, MazeError> {
        if level == 0 {
            return Err(MazeError::InvalidLevel(level));
        }

        let maze = Self::carve(level, rng);
        if maze.solve().is_some() {
            return Ok(maze);
        }

        error!(
            "level {level} maze has no path from {} to {}; regenerating\n{}",
            maze.start,
            maze.end,
            maze.log()
        );

        let maze = Self::carve(level, rng);
        assert!(
            maze.solve().is_some(),
            "regenerated level {level} maze is still unsolvable:\n{}",
            maze.log()
        );

        Ok(maze)
    }

    /// Generate with the thread-local RNG.
    pub fn random(level: u32) -> Result<Self, MazeError> {
        Self::generate(level, &mut rand::rng())
    }

    fn carve<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Self {
        let size = size_for_level(level);
        let mut maker = MazeMaker::new(size, size, rng);

        maker.backtrack();
        let start = maker.mark_start();
        let end = maker.mark_end();
        let carved = maker.extra_passages(extra_passages_for_level(level));
        debug!("level {level}: {size}x{size} maze, {carved} extra passages");

        Self {
            cells: maker.grid,
            width: size,
            height: size,
            start,
            end,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.cells.get(position.y)?.get(position.x)
    }

    /// True if `position` is inside the grid and not a wall.
    pub fn is_open(&self, position: Position) -> bool {
        self.cell(position).is_some_and(|cell| !cell.is_wall)
    }

    pub fn open_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten().filter(|cell| !cell.is_wall)
    }

    /// Shortest route from start to end.
    pub fn solve(&self) -> Option<Vec<Position>> {
        find_path(self, self.start, self.end)
    }

    pub fn log(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if cell.is_start {
                            "S "
                        } else if cell.is_end {
                            "E "
                        } else if cell.is_wall {
                            "██"
                        } else {
                            "  "
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

#[cfg(test)]
impl Maze {
    /// Build a maze from rows of `#` (wall), `.` (path), `S` (start) and `E` (end).
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let mut start = Position::default();
        let mut end = Position::default();

        let cells: Vec<Vec<Cell>> = rows
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.chars()
                    .enumerate()
                    .map(|(x, ch)| {
                        let mut cell = Cell::wall(x, y);
                        match ch {
                            '#' => {}
                            'S' => {
                                cell.carve();
                                cell.is_start = true;
                                start = Position::new(x, y);
                            }
                            'E' => {
                                cell.carve();
                                cell.is_end = true;
                                end = Position::new(x, y);
                            }
                            _ => cell.carve(),
                        }
                        cell
                    })
                    .collect()
            })
            .collect();

        Self {
            width: cells[0].len(),
            height: cells.len(),
            cells,
            start,
            end,
        }
    }
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log())
    }
}
