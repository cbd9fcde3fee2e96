pub mod algorithms;

use rand::prelude::{IndexedRandom, Rng};

use super::{Cell, Position};

const DIRECTIONS: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)]; // Up, right, down, left.

/// Carves a maze out of a solid grid.
///
/// Rooms sit on odd coordinates and the cells between them are walls until
/// an algorithm knocks them through, so corridors stay one cell wide and the
/// outer ring is never carved.
pub struct MazeMaker<'a, R: Rng + ?Sized> {
    pub grid: Vec<Vec<Cell>>,
    pub rng: &'a mut R,
    width: usize,
    height: usize,
}

impl<'a, R: Rng + ?Sized> MazeMaker<'a, R> {
    pub fn new(width: usize, height: usize, rng: &'a mut R) -> Self {
        debug_assert!(
            width % 2 == 1 && height % 2 == 1 && width >= 3 && height >= 3,
            "maze dimensions must be odd and at least 3"
        );

        let grid = (0..height)
            .map(|y| (0..width).map(|x| Cell::wall(x, y)).collect())
            .collect();

        MazeMaker {
            grid,
            rng,
            width,
            height,
        }
    }

    pub fn start(&self) -> Position {
        Position::new(1, 1)
    }

    pub fn end(&self) -> Position {
        Position::new(self.width - 2, self.height - 2)
    }

    pub fn mark_start(&mut self) -> Position {
        let start = self.start();
        let cell = self.cell_mut(start);
        cell.carve();
        cell.is_start = true;
        start
    }

    /// Flag the far interior corner as the end, carving it if backtracking
    /// somehow left it untouched.
    pub fn mark_end(&mut self) -> Position {
        let end = self.end();
        let cell = self.cell_mut(end);
        cell.carve();
        cell.is_end = true;
        end
    }

    fn cell(&self, position: Position) -> &Cell {
        &self.grid[position.y][position.x]
    }

    fn cell_mut(&mut self, position: Position) -> &mut Cell {
        &mut self.grid[position.y][position.x]
    }

    fn is_interior(&self, position: Position) -> bool {
        position.x > 0
            && position.y > 0
            && position.x < self.width - 1
            && position.y < self.height - 1
    }

    fn get_neighbors(&self, position: Position, only_if_unvisited: bool) -> Vec<Position> {
        let mut valid_neighbors = Vec::new();

        for &(dx, dy) in &DIRECTIONS {
            let Some(neighbor) = position.offset(2 * dx, 2 * dy) else {
                continue;
            };
            if !self.is_interior(neighbor) {
                continue;
            }

            if !only_if_unvisited || !self.is_visited(neighbor) {
                valid_neighbors.push(neighbor);
            }
        }

        valid_neighbors
    }

    fn pick_neighbor(&mut self, position: Position, only_if_unvisited: bool) -> Option<Position> {
        let neighbors = self.get_neighbors(position, only_if_unvisited);
        neighbors.choose(&mut *self.rng).copied()
    }

    fn visit_cell(&mut self, position: Position) {
        let cell = self.cell_mut(position);
        cell.carve();
        cell.is_visited = true;
    }

    fn is_visited(&self, position: Position) -> bool {
        self.cell(position).is_visited
    }

    fn is_wall(&self, position: Position) -> bool {
        self.cell(position).is_wall
    }

    fn remove_wall_between(&mut self, cell_1: Position, cell_2: Position) {
        let x = (cell_1.x + cell_2.x) / 2;
        let y = (cell_1.y + cell_2.y) / 2;
        self.cell_mut(Position::new(x, y)).carve();
    }

    fn has_path_neighbor(&self, position: Position) -> bool {
        DIRECTIONS.iter().any(|&(dx, dy)| {
            position
                .offset(dx, dy)
                .filter(|neighbor| neighbor.x < self.width && neighbor.y < self.height)
                .is_some_and(|neighbor| self.cell(neighbor).is_path)
        })
    }
}
