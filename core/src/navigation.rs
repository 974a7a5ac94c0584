//! Player movement against the maze walls
//!
//! A move is either applied (one cell in the requested direction) or
//! blocked by a wall. Blocked is a normal outcome, not an error.

use crate::grid::{Direction, Grid, Position};

/// Outcome of a single move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "result", rename_all = "lowercase"))]
pub enum MoveResult {
    Moved(Position),
    Blocked,
}

/// Try to move from `from` one cell in `dir`
///
/// `from` must be a cell of `grid`. The outer boundary is always walled,
/// so a move that is not blocked always lands inside the grid.
pub fn attempt_move(grid: &Grid, from: Position, dir: Direction) -> MoveResult {
    if grid.has_wall(from, dir) {
        return MoveResult::Blocked;
    }

    match grid.step(from, dir) {
        Some(position) => MoveResult::Moved(position),
        // Only reachable if a boundary wall was removed, which carving never does
        None => MoveResult::Blocked,
    }
}

/// True only when both coordinates match
pub fn check_win(position: Position, goal: Position) -> bool {
    position == goal
}

/// Replay a submitted move list from `start`
///
/// The path is valid when every move is unblocked and the goal is
/// reached. Moves after the first arrival at the goal are ignored.
pub fn replay_moves(grid: &Grid, start: Position, goal: Position, moves: &[Direction]) -> bool {
    let mut position = start;

    if check_win(position, goal) {
        return true;
    }

    for &dir in moves {
        match attempt_move(grid, position, dir) {
            MoveResult::Moved(next) => position = next,
            MoveResult::Blocked => return false,
        }

        // Early termination once the goal is reached
        if check_win(position, goal) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze_gen::generate_seeded;
    use alloc::vec;

    /// 2x2 maze shaped like a U: (0,0) -> (0,1) -> (1,1) -> (1,0)
    fn u_maze() -> Grid {
        let mut grid = Grid::blank(2, 2);
        grid.remove_wall_between(Position::new(0, 0), Position::new(0, 1), Direction::Down);
        grid.remove_wall_between(Position::new(0, 1), Position::new(1, 1), Direction::Right);
        grid.remove_wall_between(Position::new(1, 1), Position::new(1, 0), Direction::Up);
        grid
    }

    #[test]
    fn test_blocked_by_wall() {
        let grid = u_maze();
        let start = Position::new(0, 0);
        assert_eq!(attempt_move(&grid, start, Direction::Right), MoveResult::Blocked);
        assert_eq!(attempt_move(&grid, start, Direction::Up), MoveResult::Blocked);
        assert_eq!(attempt_move(&grid, start, Direction::Left), MoveResult::Blocked);
    }

    #[test]
    fn test_moved_through_passage() {
        let grid = u_maze();
        assert_eq!(
            attempt_move(&grid, Position::new(0, 0), Direction::Down),
            MoveResult::Moved(Position::new(0, 1))
        );
        assert_eq!(
            attempt_move(&grid, Position::new(1, 1), Direction::Up),
            MoveResult::Moved(Position::new(1, 0))
        );
    }

    #[test]
    fn test_moves_are_single_steps_and_deterministic() {
        let grid = generate_seeded(10, 10, 4242);
        for cell in grid.cells() {
            let from = cell.position();
            for dir in Direction::ALL {
                let first = attempt_move(&grid, from, dir);
                assert_eq!(first, attempt_move(&grid, from, dir));
                match first {
                    MoveResult::Moved(position) => {
                        assert!(!cell.has_wall(dir));
                        assert_eq!(grid.step(from, dir), Some(position));
                        assert_eq!(position.x.abs_diff(from.x) + position.y.abs_diff(from.y), 1);
                    }
                    MoveResult::Blocked => assert!(cell.has_wall(dir)),
                }
            }
        }
    }

    #[test]
    fn test_check_win_is_exact() {
        let goal = Position::new(9, 9);
        assert!(check_win(Position::new(9, 9), goal));
        assert!(!check_win(Position::new(8, 9), goal));
        assert!(!check_win(Position::new(9, 8), goal));
        assert!(!check_win(Position::new(0, 0), goal));
    }

    #[test]
    fn test_replay_valid_path() {
        let grid = u_maze();
        let moves = [Direction::Down, Direction::Right, Direction::Up];
        assert!(replay_moves(&grid, Position::new(0, 0), Position::new(1, 0), &moves));
    }

    #[test]
    fn test_replay_partial_path() {
        let grid = u_maze();
        let moves = [Direction::Down, Direction::Right];
        assert!(!replay_moves(&grid, Position::new(0, 0), Position::new(1, 0), &moves));
    }

    #[test]
    fn test_replay_stops_at_goal() {
        let grid = u_maze();
        // The trailing Right would hit the boundary, but the goal came first
        let moves = vec![Direction::Down, Direction::Right, Direction::Up, Direction::Right];
        assert!(replay_moves(&grid, Position::new(0, 0), Position::new(1, 0), &moves));
    }

    #[test]
    fn test_replay_rejects_wall_crossing() {
        let grid = u_maze();
        assert!(!replay_moves(&grid, Position::new(0, 0), Position::new(1, 0), &[Direction::Right]));
    }

    #[test]
    fn test_replay_empty_moves() {
        let grid = u_maze();
        assert!(!replay_moves(&grid, Position::new(0, 0), Position::new(1, 1), &[]));
        assert!(replay_moves(&grid, Position::new(1, 1), Position::new(1, 1), &[]));
    }
}
