use rand::Rng;

use super::super::MazeMaker;
use crate::maze::Position;

pub trait ExtraPassages {
    /// Sample `attempts` interior cells and open the walls among them that
    /// already touch a path. Returns how many walls were opened.
    fn extra_passages(&mut self, attempts: usize) -> usize;
}

impl<R: Rng + ?Sized> ExtraPassages for MazeMaker<'_, R> {
    fn extra_passages(&mut self, attempts: usize) -> usize {
        let mut carved = 0;

        for _ in 0..attempts {
            let x = self.rng.random_range(1..self.width - 1);
            let y = self.rng.random_range(1..self.height - 1);
            let candidate = Position::new(x, y);

            // Opening a wall only ever adds edges, and a candidate next to a
            // path joins that path's component, so no island can form.
            if self.is_wall(candidate) && self.has_path_neighbor(candidate) {
                self.cell_mut(candidate).carve();
                carved += 1;
            }
        }

        carved
    }
}
