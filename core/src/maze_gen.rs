//! Maze generation using the Recursive Backtracker algorithm
//!
//! Algorithm: Recursive Backtracker (DFS with backtracking), run with an
//! explicit stack so large grids never risk the call stack:
//! 1. Start at (0, 0), mark as visited, push it
//! 2. While stack is not empty:
//!    - Look at the cell on top of the stack
//!    - Collect its unvisited in-bounds neighbours
//!    - If neighbours exist:
//!      * Choose one uniformly at random
//!      * Remove the wall between the two cells
//!      * Mark the neighbour visited, push it
//!    - Else: backtrack (pop)
//!
//! Each cell is visited exactly once and every push carves one passage,
//! so the result is a spanning tree: `width * height - 1` passages, fully
//! connected, no cycles.

use alloc::vec::Vec;

use crate::grid::{Direction, Grid, Position};
use crate::rng::{RandomSource, SimpleLCG};

/// Generate a perfect maze of `width` x `height` cells
///
/// Deterministic for a given random source. Panics if either dimension is
/// zero.
pub fn generate<R: RandomSource + ?Sized>(width: usize, height: usize, rng: &mut R) -> Grid {
    let mut grid = Grid::blank(width, height);
    carve(&mut grid, rng);
    debug_assert!(grid.is_perfect(), "carving produced an imperfect maze");
    grid
}

/// Generate a maze from a seed using [`SimpleLCG`]
///
/// Same `(width, height, seed)` always yields the same maze.
pub fn generate_seeded(width: usize, height: usize, seed: u32) -> Grid {
    let mut rng = SimpleLCG::new(seed);
    generate(width, height, &mut rng)
}

fn carve<R: RandomSource + ?Sized>(grid: &mut Grid, rng: &mut R) {
    // The stack never holds more than every cell once
    let mut stack: Vec<Position> = Vec::with_capacity(grid.cell_count());

    let start = Position::new(0, 0);
    grid.mark_visited(start);
    stack.push(start);

    while let Some(&current) = stack.last() {
        let mut candidates = [(Direction::Up, start); 4];
        let mut count = 0;
        for (dir, next) in grid.neighbors_of(current) {
            if !grid.is_visited(next) {
                candidates[count] = (dir, next);
                count += 1;
            }
        }

        if count > 0 {
            let (dir, next) = candidates[rng.choice_index(count)];
            grid.remove_wall_between(current, next, dir);
            grid.mark_visited(next);
            stack.push(next);
        } else {
            stack.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always picks the first candidate, in direction order
    struct FirstChoice;

    impl RandomSource for FirstChoice {
        fn choice_index(&mut self, _len: usize) -> usize {
            0
        }
    }

    /// Records how many candidates were offered at each choice
    struct Recording {
        offered: Vec<usize>,
    }

    impl RandomSource for Recording {
        fn choice_index(&mut self, len: usize) -> usize {
            self.offered.push(len);
            len - 1
        }
    }

    #[test]
    fn test_maze_generation_is_perfect() {
        for (w, h, seed) in [(5, 5, 12345), (10, 10, 99999), (20, 20, 2918957128), (7, 3, 42)] {
            let grid = generate_seeded(w, h, seed);
            assert_eq!(grid.width(), w);
            assert_eq!(grid.height(), h);
            assert_eq!(grid.carved_edges(), w * h - 1, "wrong edge count for {}x{}", w, h);
            assert_eq!(grid.reachable_from(Position::new(0, 0)), w * h);
            assert!(grid.walls_consistent());
            assert!(grid.is_perfect());
        }
    }

    #[test]
    fn test_every_cell_visited() {
        let grid = generate_seeded(12, 9, 777);
        assert!(grid.cells().iter().all(|cell| cell.visited));
    }

    #[test]
    fn test_determinism() {
        let grid1 = generate_seeded(10, 10, 99999);
        let grid2 = generate_seeded(10, 10, 99999);

        // Same seed should produce identical mazes
        assert_eq!(grid1, grid2);
    }

    #[test]
    fn test_different_seeds() {
        let grid1 = generate_seeded(10, 10, 11111);
        let grid2 = generate_seeded(10, 10, 22222);

        // Different seeds should (almost certainly) produce different mazes
        assert_ne!(grid1, grid2);
    }

    #[test]
    fn test_single_cell() {
        let grid = generate_seeded(1, 1, 5);
        assert_eq!(grid.carved_edges(), 0);
        assert!(grid.is_perfect());
        assert_eq!(grid.cell(Position::new(0, 0)).walls, crate::grid::Walls::ALL);
    }

    #[test]
    fn test_single_row_is_a_corridor() {
        let grid = generate_seeded(6, 1, 3);
        for x in 0..5 {
            assert!(!grid.has_wall(Position::new(x, 0), Direction::Right));
        }
        assert!(grid.is_perfect());
    }

    #[test]
    fn test_first_choice_source() {
        // Up is never in bounds from row 0 and Right comes first, so the
        // first row is carved as a corridor before anything turns down
        let grid = generate(3, 2, &mut FirstChoice);
        assert!(!grid.has_wall(Position::new(0, 0), Direction::Right));
        assert!(!grid.has_wall(Position::new(1, 0), Direction::Right));
        assert!(!grid.has_wall(Position::new(2, 0), Direction::Down));
        assert!(grid.is_perfect());
    }

    #[test]
    fn test_only_unvisited_neighbors_are_offered() {
        let mut source = Recording { offered: Vec::new() };
        let grid = generate(4, 4, &mut source);
        assert!(grid.is_perfect());

        // One choice per carved passage, never more than four candidates,
        // and never more than two from the start corner
        assert_eq!(source.offered.len(), 15);
        assert!(source.offered.iter().all(|&n| (1..=4).contains(&n)));
        assert!(source.offered[0] <= 2);
    }

    #[test]
    fn test_large_grid_does_not_recurse() {
        let grid = generate_seeded(100, 100, 1);
        assert_eq!(grid.carved_edges(), 100 * 100 - 1);
    }

    #[test]
    fn test_binary_grid_20x20() {
        let grid = generate_seeded(20, 20, 2918957128);
        let binary = grid.to_binary_grid();

        // Grid should be 20*2+1 = 41 x 41
        assert_eq!(binary.len(), 41);
        assert_eq!(binary[0].len(), 41);

        // Corners should be walls
        assert_eq!(binary[0][0], 0);
        assert_eq!(binary[0][40], 0);
        assert_eq!(binary[40][0], 0);
        assert_eq!(binary[40][40], 0);

        // Start and end should be paths
        assert_eq!(binary[1][1], 1);
        assert_eq!(binary[39][39], 1);
    }
}
