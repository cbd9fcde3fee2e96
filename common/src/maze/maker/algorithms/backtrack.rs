use rand::Rng;

use super::super::MazeMaker;

pub trait Backtrack {
    fn backtrack(&mut self);
}

impl<R: Rng + ?Sized> Backtrack for MazeMaker<'_, R> {
    /// Randomized depth-first carving from the start room. Every room on the
    /// odd lattice ends up visited, so the far corner is always reached.
    fn backtrack(&mut self) {
        let initial_cell = self.start();
        self.visit_cell(initial_cell);

        let mut stack = vec![initial_cell];

        while let Some(curr) = stack.pop() {
            if let Some(next) = self.pick_neighbor(curr, true) {
                stack.push(curr);
                self.remove_wall_between(curr, next);
                self.visit_cell(next);
                stack.push(next);
            }
        }
    }
}
