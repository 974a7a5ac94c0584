//! Maze play sessions
//!
//! A [`MazeSession`] drives one play-through at a time: it asks the core
//! generator for a maze, validates moves, counts seconds through a
//! [`SessionClock`] and awards points through a [`ScoreSink`] when the
//! goal is reached. Renderers read a [`MazeSnapshot`].
//!
//! The session never schedules anything itself. Callers serialize input
//! events and clock ticks onto one thread of control and pass each tick
//! the [`ClockToken`] returned when the session started.
//!
//! # Example
//! ```
//! use maze_session::{Difficulty, Direction, MazeSession, ScoreLedger};
//!
//! let mut session = MazeSession::new(Difficulty::Easy, 2918957128, ScoreLedger::new());
//! let token = session.clock_token().unwrap();
//! session.move_player(Direction::Up); // boundary wall, blocked
//! session.tick(token);
//! assert_eq!(session.elapsed_seconds(), 1);
//! ```

pub mod clock;
pub mod score;
pub mod session;
pub mod snapshot;

pub use clock::{format_elapsed, ClockToken, SessionClock};
pub use score::{ScoreLedger, ScoreSink};
pub use session::{MazeSession, MoveOutcome, SessionPhase};
pub use snapshot::MazeSnapshot;

// Core types that appear in this crate's public API
pub use maze_core::{Difficulty, Direction, Grid, Position};

/// Seed derived from the system clock, for callers that do not pick one
pub fn seed_from_time() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    // Fold the high bits in so consecutive calls differ
    (nanos ^ (nanos >> 32)) as u32
}
