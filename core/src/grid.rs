//! Maze grid: cells, walls and the wall-symmetry invariant
//!
//! Every cell starts with all four walls. The generator removes walls in
//! pairs through [`Grid::remove_wall_between`], so the wall between two
//! adjacent cells is always one logical edge: A's wall toward B is absent
//! iff B's wall toward A is absent.
//!
//! Coordinates outside the grid are a programming error and panic.

use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// One of the four cardinal directions
///
/// Numeric codes (see [`Direction::code`]) are `0=Up, 1=Right, 2=Down, 3=Left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions, in code order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// Decode a numeric move code; anything outside `0..=3` is rejected
    pub fn from_code(code: u8) -> Option<Direction> {
        match code {
            0 => Some(Direction::Up),
            1 => Some(Direction::Right),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            _ => None,
        }
    }

    /// Map a keyboard key name to a direction
    ///
    /// Only the four arrow keys are recognised; every other key yields `None`.
    pub fn from_key(key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowRight" => Some(Direction::Right),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "right" => Ok(Direction::Right),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            _ => Err(format!(
                "Invalid direction: '{}'. Must be 'up', 'right', 'down', or 'left'",
                s
            )),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell coordinate: `x` is the column, `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Wall flags of a cell; `true` means the wall is present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    pub const ALL: Walls = Walls {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };

    pub fn get(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.top,
            Direction::Right => self.right,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
        }
    }

    fn clear(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.top = false,
            Direction::Right => self.right = false,
            Direction::Down => self.bottom = false,
            Direction::Left => self.left = false,
        }
    }
}

/// A cell in the maze with walls in four directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub walls: Walls,
    /// Generation bookkeeping only; meaningless once carving is done
    pub visited: bool,
}

impl Cell {
    fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            walls: Walls::ALL,
            visited: false,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls.get(dir)
    }
}

/// A `width` x `height` maze, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every wall present and no cell visited
    ///
    /// Panics if either dimension is zero.
    pub fn blank(width: usize, height: usize) -> Self {
        assert!(width >= 1 && height >= 1, "Maze dimensions must be at least 1x1");

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(x, y));
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[self.index(pos)]
    }

    pub fn has_wall(&self, pos: Position, dir: Direction) -> bool {
        self.cell(pos).has_wall(dir)
    }

    /// The in-bounds neighbour of `pos` in `dir`, if any
    pub fn step(&self, pos: Position, dir: Direction) -> Option<Position> {
        // wrapping_sub turns an underflow into a huge coordinate that fails the bounds check
        let next = match dir {
            Direction::Up => Position::new(pos.x, pos.y.wrapping_sub(1)),
            Direction::Right => Position::new(pos.x + 1, pos.y),
            Direction::Down => Position::new(pos.x, pos.y + 1),
            Direction::Left => Position::new(pos.x.wrapping_sub(1), pos.y),
        };
        self.contains(next).then_some(next)
    }

    /// In-bounds neighbours of `pos`, in direction order
    pub fn neighbors_of(&self, pos: Position) -> impl Iterator<Item = (Direction, Position)> + '_ {
        assert!(self.contains(pos), "Cell {} outside {}x{} maze", pos, self.width, self.height);
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.step(pos, dir).map(|next| (dir, next)))
    }

    /// Clear the wall of `a` facing `dir` and the mirrored wall of `b`
    ///
    /// `b` must be the neighbour of `a` in `dir`.
    pub fn remove_wall_between(&mut self, a: Position, b: Position, dir: Direction) {
        assert_eq!(
            self.step(a, dir),
            Some(b),
            "Cell {} is not the {} neighbour of {}",
            b,
            dir,
            a
        );

        let ia = self.index(a);
        let ib = self.index(b);
        self.cells[ia].walls.clear(dir);
        self.cells[ib].walls.clear(dir.opposite());
    }

    pub(crate) fn is_visited(&self, pos: Position) -> bool {
        self.cell(pos).visited
    }

    pub(crate) fn mark_visited(&mut self, pos: Position) {
        let i = self.index(pos);
        self.cells[i].visited = true;
    }

    /// Number of open passages between adjacent cells
    pub fn carved_edges(&self) -> usize {
        // Count each edge once, from its top/left side
        self.cells
            .iter()
            .map(|cell| usize::from(!cell.walls.right) + usize::from(!cell.walls.bottom))
            .sum()
    }

    /// Check that every internal wall agrees with its mirror and that the
    /// outer boundary is closed
    pub fn walls_consistent(&self) -> bool {
        self.cells.iter().all(|cell| {
            let pos = cell.position();
            Direction::ALL.into_iter().all(|dir| match self.step(pos, dir) {
                Some(next) => cell.has_wall(dir) == self.has_wall(next, dir.opposite()),
                None => cell.has_wall(dir),
            })
        })
    }

    /// Number of cells reachable from `from` through open passages
    pub fn reachable_from(&self, from: Position) -> usize {
        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        seen[self.index(from)] = true;
        queue.push_back(from);
        let mut count = 0;

        while let Some(pos) = queue.pop_front() {
            count += 1;
            for dir in Direction::ALL {
                if self.has_wall(pos, dir) {
                    continue;
                }
                if let Some(next) = self.step(pos, dir) {
                    let i = self.index(next);
                    if !seen[i] {
                        seen[i] = true;
                        queue.push_back(next);
                    }
                }
            }
        }

        count
    }

    /// A perfect maze is a spanning tree over the cells: fully connected
    /// with exactly `cells - 1` passages, hence no cycles
    pub fn is_perfect(&self) -> bool {
        self.walls_consistent()
            && self.carved_edges() == self.cells.len() - 1
            && self.reachable_from(Position::new(0, 0)) == self.cells.len()
    }

    /// Binary grid representation
    ///
    /// - 0 = wall
    /// - 1 = path (cell or open passage)
    ///
    /// The result is `(height*2 + 1)` rows by `(width*2 + 1)` columns and
    /// cell `(x, y)` sits at `[y*2 + 1][x*2 + 1]`.
    pub fn to_binary_grid(&self) -> Vec<Vec<u8>> {
        let rows = self.height * 2 + 1;
        let cols = self.width * 2 + 1;
        let mut grid = vec![vec![0u8; cols]; rows];

        for cell in &self.cells {
            let gr = cell.y * 2 + 1;
            let gc = cell.x * 2 + 1;

            grid[gr][gc] = 1;

            if !cell.walls.top {
                grid[gr - 1][gc] = 1;
            }
            if !cell.walls.bottom {
                grid[gr + 1][gc] = 1;
            }
            if !cell.walls.right {
                grid[gr][gc + 1] = 1;
            }
            if !cell.walls.left {
                grid[gr][gc - 1] = 1;
            }
        }

        grid
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            self.contains(pos),
            "Cell {} outside {}x{} maze",
            pos,
            self.width,
            self.height
        );
        pos.y * self.width + pos.x
    }
}
