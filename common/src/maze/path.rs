use std::collections::VecDeque;

use super::{Maze, Position};

const DIRECTIONS: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Breadth-first search over the open cells of `maze`.
///
/// Returns the shortest route from `start` to `end`, both included, or `None`
/// if either end is a wall, lies outside the grid, or cannot be reached.
pub fn find_path(maze: &Maze, start: Position, end: Position) -> Option<Vec<Position>> {
    if !maze.is_open(start) || !maze.is_open(end) {
        return None;
    }

    let width = maze.width();
    let height = maze.height();

    let mut visited = vec![vec![false; width]; height];
    let mut prev: Vec<Vec<Option<Position>>> = vec![vec![None; width]; height];
    let mut queue = VecDeque::new();

    visited[start.y][start.x] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == end {
            return Some(trace_back(&prev, start, end));
        }

        for (dx, dy) in DIRECTIONS {
            let Some(next) = current.offset(dx, dy) else {
                continue;
            };
            if !maze.is_open(next) || visited[next.y][next.x] {
                continue;
            }
            visited[next.y][next.x] = true;
            prev[next.y][next.x] = Some(current);
            queue.push_back(next);
        }
    }

    None
}

fn trace_back(prev: &[Vec<Option<Position>>], start: Position, end: Position) -> Vec<Position> {
    let mut path = vec![end];
    let mut current = end;

    while current != start {
        match prev[current.y][current.x] {
            Some(p) => {
                path.push(p);
                current = p;
            }
            None => break,
        }
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn assert_is_walk(maze: &Maze, path: &[Position]) {
        for position in path {
            assert!(maze.is_open(*position), "path crosses wall at {position}");
        }
        for pair in path.windows(2) {
            let dx = pair[0].x.abs_diff(pair[1].x);
            let dy = pair[0].y.abs_diff(pair[1].y);
            assert_eq!(dx + dy, 1, "{} -> {} is not one step", pair[0], pair[1]);
        }
    }

    #[test]
    fn finds_shortest_route_around_a_wall() {
        let maze = Maze::from_rows(&[
            "#######", //
            "#S#...#", //
            "#.#.#.#", //
            "#...#E#", //
            "#######",
        ]);

        let path = find_path(&maze, maze.start(), maze.end()).expect("route exists");

        assert_eq!(path.first(), Some(&Position::new(1, 1)));
        assert_eq!(path.last(), Some(&Position::new(5, 3)));
        assert_eq!(path.len(), 11);
        assert_is_walk(&maze, &path);
    }

    #[test]
    fn prefers_the_shorter_of_two_routes() {
        let maze = Maze::from_rows(&[
            "#######", //
            "#S...E#", //
            "#.###.#", //
            "#.....#", //
            "#######",
        ]);

        let path = maze.solve().expect("route exists");

        assert_eq!(path.len(), 5);
        assert!(path.iter().all(|p| p.y == 1));
    }

    #[test]
    fn returns_none_when_end_is_sealed_off() {
        let maze = Maze::from_rows(&[
            "#######", //
            "#S..#E#", //
            "#######",
        ]);

        assert_eq!(find_path(&maze, maze.start(), maze.end()), None);
    }

    #[test]
    fn returns_none_for_walls_and_out_of_bounds_endpoints() {
        let maze = Maze::from_rows(&["#####", "#S.E#", "#####"]);

        assert_eq!(find_path(&maze, Position::new(0, 0), maze.end()), None);
        assert_eq!(find_path(&maze, maze.start(), Position::new(2, 0)), None);
        assert_eq!(find_path(&maze, maze.start(), Position::new(99, 1)), None);
    }

    #[test]
    fn start_equal_to_end_is_a_single_step_path() {
        let maze = Maze::from_rows(&["#####", "#S.E#", "#####"]);

        assert_eq!(
            find_path(&maze, maze.start(), maze.start()),
            Some(vec![maze.start()])
        );
    }

    #[test]
    fn every_generated_maze_is_solvable_without_crossing_walls() {
        for level in 1..=15 {
            for seed in 0..8 {
                let mut rng = StdRng::seed_from_u64(seed ^ (level as u64) << 8);
                let maze = Maze::generate(level, &mut rng).expect("valid level");

                let path = find_path(&maze, maze.start(), maze.end())
                    .unwrap_or_else(|| panic!("level {level} maze is unsolvable:\n{maze}"));

                assert!(!path.is_empty());
                assert_eq!(path.first(), Some(&maze.start()));
                assert_eq!(path.last(), Some(&maze.end()));
                assert_is_walk(&maze, &path);
            }
        }
    }

    #[test]
    fn search_is_deterministic() {
        let maze = Maze::generate(5, &mut StdRng::seed_from_u64(17)).expect("valid level");

        assert_eq!(maze.solve(), maze.solve());
    }
}
