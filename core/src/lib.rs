//! Shared types, constants, and logic for the maze puzzle
//!
//! This crate provides the maze data model, the recursive backtracker
//! generator and the move validation used by the session layer and by
//! any front-end that renders a maze.
//!
//! The crate is no_std compatible (it only needs `alloc`), with an
//! optional `serde` feature for snapshot serialization.

#![no_std]

extern crate alloc;

pub mod grid;
pub mod maze_gen;
pub mod navigation;
pub mod rng;

// Re-export commonly used types for convenience
pub use grid::{Cell, Direction, Grid, Position, Walls};
pub use maze_gen::{generate, generate_seeded};
pub use navigation::{attempt_move, check_win, replay_moves, MoveResult};
pub use rng::{RandomSource, SimpleLCG};

use alloc::format;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

/// Side length of an EASY maze (cells)
pub const EASY_SIZE: usize = 10;

/// Side length of a HARD maze (cells)
pub const HARD_SIZE: usize = 20;

/// Points awarded for solving an EASY maze
pub const EASY_POINTS: u32 = 2;

/// Points awarded for solving a HARD maze
pub const HARD_POINTS: u32 = 5;

/// The player always starts in the top-left cell
pub const START: Position = Position { x: 0, y: 0 };

/// Maze difficulty, fixing both the grid size and the reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    /// 10x10 grid, 2 points
    #[default]
    Easy,
    /// 20x20 grid, 5 points
    Hard,
}

impl Difficulty {
    /// Grid dimensions as `(width, height)`
    pub fn dimensions(self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (EASY_SIZE, EASY_SIZE),
            Difficulty::Hard => (HARD_SIZE, HARD_SIZE),
        }
    }

    /// Points awarded when a maze of this difficulty is solved
    pub fn points(self) -> u32 {
        match self {
            Difficulty::Easy => EASY_POINTS,
            Difficulty::Hard => HARD_POINTS,
        }
    }

    /// Goal cell for a maze of this difficulty (bottom-right corner)
    pub fn goal(self) -> Position {
        let (width, height) = self.dimensions();
        Position::new(width - 1, height - 1)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Invalid difficulty: '{}'. Must be 'easy' or 'hard'", s)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_dimensions() {
        assert_eq!(Difficulty::Easy.dimensions(), (10, 10));
        assert_eq!(Difficulty::Hard.dimensions(), (20, 20));
    }

    #[test]
    fn test_difficulty_points() {
        assert_eq!(Difficulty::Easy.points(), 2);
        assert_eq!(Difficulty::Hard.points(), 5);
    }

    #[test]
    fn test_difficulty_goal() {
        assert_eq!(Difficulty::Easy.goal(), Position::new(9, 9));
        assert_eq!(Difficulty::Hard.goal(), Position::new(19, 19));
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("medium".parse::<Difficulty>().is_err());
    }
}
