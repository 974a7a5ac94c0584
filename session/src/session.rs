//! Maze session state machine
//!
//! `Generating -> Running -> Won`. A session owns the current grid, the
//! player position, the clock and the scoring collaborator. Starting a new
//! session replaces all of them at once; nothing from the previous run
//! survives (its clock token is invalidated along with it).

use maze_core::{
    attempt_move, check_win, generate_seeded, replay_moves, Difficulty, Direction, Grid,
    MoveResult, Position, SimpleLCG, START,
};
use serde::{Deserialize, Serialize};

use crate::clock::{ClockToken, SessionClock};
use crate::score::ScoreSink;
use crate::snapshot::MazeSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Generating,
    Running,
    Won,
}

/// What a move request did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum MoveOutcome {
    /// The session is not running (already won), nothing happened
    Ignored,
    /// A wall is in the way, nothing happened
    Blocked,
    /// The player moved to a new cell
    Moved { position: Position },
    /// The player reached the goal; `points` were awarded
    Won { position: Position, points: u32 },
}

pub struct MazeSession<S: ScoreSink> {
    session_id: u64,
    difficulty: Difficulty,
    seed: u32,
    grid: Grid,
    player: Position,
    goal: Position,
    phase: SessionPhase,
    is_won: bool,
    clock: SessionClock,
    seeds: SimpleLCG,
    scores: S,
}

impl<S: ScoreSink> MazeSession<S> {
    /// Start the first session
    ///
    /// The first maze is generated from `seed` itself; later sessions draw
    /// fresh seeds from a stream seeded with it, so `reset()` yields a new
    /// maze while the whole sequence stays reproducible.
    pub fn new(difficulty: Difficulty, seed: u32, scores: S) -> Self {
        let mut session = Self {
            session_id: 0,
            difficulty,
            seed,
            grid: Grid::blank(1, 1),
            player: START,
            goal: START,
            phase: SessionPhase::Generating,
            is_won: false,
            clock: SessionClock::new(),
            seeds: SimpleLCG::new(seed),
            scores,
        };
        session.start(difficulty, seed);
        session
    }

    /// Replace the current session with a fresh maze of `difficulty`
    ///
    /// Returns the token the clock driver must present with each tick.
    pub fn new_session(&mut self, difficulty: Difficulty) -> ClockToken {
        let seed = self.seeds.next_u32();
        self.start(difficulty, seed)
    }

    /// New maze with the current difficulty
    pub fn reset(&mut self) -> ClockToken {
        self.new_session(self.difficulty)
    }

    fn start(&mut self, difficulty: Difficulty, seed: u32) -> ClockToken {
        // Stop first: a tick racing with regeneration must not land on the new run
        self.clock.stop();
        self.phase = SessionPhase::Generating;

        let (width, height) = difficulty.dimensions();
        self.grid = generate_seeded(width, height, seed);
        self.difficulty = difficulty;
        self.seed = seed;
        self.player = START;
        self.goal = difficulty.goal();
        self.is_won = false;
        self.session_id += 1;

        let token = self.clock.start();
        self.phase = SessionPhase::Running;

        tracing::info!(
            "Started maze session {} ({}, {}x{}, seed {})",
            self.session_id,
            difficulty,
            width,
            height,
            seed
        );
        token
    }

    /// Move the player one cell
    ///
    /// Ignored unless the session is running. On reaching the goal the
    /// clock stops and the difficulty's points go to the score sink,
    /// exactly once per session.
    pub fn move_player(&mut self, dir: Direction) -> MoveOutcome {
        if self.phase != SessionPhase::Running {
            tracing::debug!("Ignoring move {} in phase {:?}", dir, self.phase);
            return MoveOutcome::Ignored;
        }

        let position = match attempt_move(&self.grid, self.player, dir) {
            MoveResult::Blocked => {
                tracing::debug!("Move {} from {} blocked", dir, self.player);
                return MoveOutcome::Blocked;
            }
            MoveResult::Moved(position) => position,
        };

        self.player = position;

        if !check_win(position, self.goal) {
            return MoveOutcome::Moved { position };
        }

        self.clock.stop();
        self.is_won = true;
        self.phase = SessionPhase::Won;

        let points = self.difficulty.points();
        tracing::info!(
            "Maze session {} solved in {}s, awarding {} points",
            self.session_id,
            self.clock.elapsed_seconds(),
            points
        );
        self.scores.award_points(points);

        MoveOutcome::Won { position, points }
    }

    /// Keyboard input: the four arrow keys move, every other key is ignored
    pub fn handle_key(&mut self, key: &str) -> MoveOutcome {
        match Direction::from_key(key) {
            Some(dir) => self.move_player(dir),
            None => MoveOutcome::Ignored,
        }
    }

    /// Deliver one clock second
    ///
    /// Returns `false` once the token is stale or the clock stopped; the
    /// caller should cancel the interval that produced it.
    pub fn tick(&mut self, token: ClockToken) -> bool {
        let counted = self.clock.tick(token);
        if !counted {
            tracing::debug!("Dropped stale tick for session {}", self.session_id);
        }
        counted
    }

    /// Check a move list against the current maze without touching the
    /// player position
    pub fn verify_path(&self, moves: &[Direction]) -> bool {
        replay_moves(&self.grid, START, self.goal, moves)
    }

    pub fn snapshot(&self) -> MazeSnapshot {
        MazeSnapshot {
            session_id: self.session_id,
            seed: self.seed,
            difficulty: self.difficulty,
            phase: self.phase,
            width: self.grid.width(),
            height: self.grid.height(),
            grid: self.grid.clone(),
            player_position: self.player,
            goal_position: self.goal,
            elapsed_seconds: self.clock.elapsed_seconds(),
            is_running: self.clock.is_running(),
            is_won: self.is_won,
        }
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player_position(&self) -> Position {
        self.player
    }

    pub fn goal_position(&self) -> Position {
        self.goal
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.clock.elapsed_seconds()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn is_won(&self) -> bool {
        self.is_won
    }

    /// Token for the running clock, `None` once the session is won
    pub fn clock_token(&self) -> Option<ClockToken> {
        self.clock.token()
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }
}
