//! Read-only view of a session handed to renderers
//!
//! Serialized as JSON by the CLI (`generate`/`show`) and the HTTP API.

use maze_core::{Difficulty, Direction, Grid, Position};
use serde::{Deserialize, Serialize};

use crate::clock::format_elapsed;
use crate::session::SessionPhase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeSnapshot {
    pub session_id: u64,
    /// Seed the grid was generated from
    pub seed: u32,
    pub difficulty: Difficulty,
    pub phase: SessionPhase,
    pub width: usize,
    pub height: usize,
    pub grid: Grid,
    pub player_position: Position,
    pub goal_position: Position,
    pub elapsed_seconds: u64,
    pub is_running: bool,
    pub is_won: bool,
}

impl MazeSnapshot {
    /// Elapsed time as `MM:SS`
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    /// Check a snapshot loaded from outside before rendering it
    ///
    /// Rejects grids whose dimensions, cell coordinates or walls disagree,
    /// and positions outside the grid.
    pub fn validate(&self) -> Result<(), String> {
        let grid = &self.grid;
        if grid.width() == 0 || grid.height() == 0 {
            return Err("Grid has zero width or height".to_string());
        }
        if grid.width() != self.width || grid.height() != self.height {
            return Err(format!(
                "Grid is {}x{} but snapshot says {}x{}",
                grid.width(),
                grid.height(),
                self.width,
                self.height
            ));
        }
        let expected_cells = self
            .width
            .checked_mul(self.height)
            .ok_or_else(|| format!("Grid size {}x{} overflows", self.width, self.height))?;
        if grid.cell_count() != expected_cells {
            return Err(format!(
                "Expected {} cells, found {}",
                expected_cells,
                grid.cell_count()
            ));
        }
        for (i, cell) in grid.cells().iter().enumerate() {
            let expected = Position::new(i % self.width, i / self.width);
            if cell.position() != expected {
                return Err(format!("Cell {} is stored at {}", cell.position(), expected));
            }
        }
        if !grid.walls_consistent() {
            return Err("Walls between adjacent cells disagree".to_string());
        }
        for (name, pos) in [("Player", self.player_position), ("Goal", self.goal_position)] {
            if !grid.contains(pos) {
                return Err(format!("{} position {} outside the grid", name, pos));
            }
        }
        Ok(())
    }

    /// Render the maze as text
    ///
    /// `#` is a wall, `@` the player and `G` the goal. The player hides the
    /// goal once they share a cell.
    pub fn render_ascii(&self) -> String {
        let binary = self.grid.to_binary_grid();
        let player = (self.player_position.y * 2 + 1, self.player_position.x * 2 + 1);
        let goal = (self.goal_position.y * 2 + 1, self.goal_position.x * 2 + 1);

        let mut out = String::with_capacity(binary.len() * (binary[0].len() + 1));
        for (r, row) in binary.iter().enumerate() {
            for (c, &open) in row.iter().enumerate() {
                let ch = if (r, c) == player {
                    '@'
                } else if (r, c) == goal {
                    'G'
                } else if open == 1 {
                    ' '
                } else {
                    '#'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }

    /// Directions open from the player's cell, for hints in text front-ends
    pub fn open_directions(&self) -> Vec<Direction> {
        let cell = self.grid.cell(self.player_position);
        Direction::ALL
            .into_iter()
            .filter(|&dir| !cell.has_wall(dir))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::generate_seeded;

    fn corridor_snapshot() -> MazeSnapshot {
        let grid = generate_seeded(3, 1, 1);
        MazeSnapshot {
            session_id: 1,
            seed: 1,
            difficulty: Difficulty::Easy,
            phase: SessionPhase::Running,
            width: 3,
            height: 1,
            grid,
            player_position: Position::new(0, 0),
            goal_position: Position::new(2, 0),
            elapsed_seconds: 65,
            is_running: true,
            is_won: false,
        }
    }

    #[test]
    fn test_render_corridor() {
        let snap = corridor_snapshot();
        assert_eq!(snap.render_ascii(), "#######\n#@   G#\n#######\n");
    }

    #[test]
    fn test_player_hides_goal() {
        let mut snap = corridor_snapshot();
        snap.player_position = Position::new(2, 0);
        assert_eq!(snap.render_ascii(), "#######\n#    @#\n#######\n");
    }

    #[test]
    fn test_elapsed_display() {
        assert_eq!(corridor_snapshot().elapsed_display(), "01:05");
    }

    #[test]
    fn test_open_directions() {
        let snap = corridor_snapshot();
        assert_eq!(snap.open_directions(), vec![Direction::Right]);
    }

    #[test]
    fn test_json_round_trip_validates() {
        let snap = corridor_snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let loaded: MazeSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, snap);
        assert!(loaded.validate().is_ok());

        let value = serde_json::to_value(&snap).unwrap();
        assert_eq!(value["difficulty"], "easy");
        assert_eq!(value["phase"], "running");
        assert_eq!(value["grid"]["cells"][0]["walls"]["right"], false);
    }

    #[test]
    fn test_validate_rejects_mismatched_size() {
        let mut snap = corridor_snapshot();
        snap.width = 4;
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_position_outside() {
        let mut snap = corridor_snapshot();
        snap.goal_position = Position::new(3, 0);
        assert!(snap.validate().unwrap_err().contains("Goal"));
    }

    #[test]
    fn test_validate_rejects_overflowing_dimensions() {
        let huge = 1usize << (usize::BITS / 2);
        let mut value = serde_json::to_value(corridor_snapshot()).unwrap();
        value["width"] = huge.into();
        value["height"] = huge.into();
        value["grid"]["width"] = huge.into();
        value["grid"]["height"] = huge.into();
        value["grid"]["cells"] = serde_json::json!([]);

        let snap: MazeSnapshot = serde_json::from_value(value).unwrap();
        let err = snap.validate().unwrap_err();
        assert!(err.contains("overflows"), "unexpected error: {}", err);
    }
}
