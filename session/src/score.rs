//! Scoring collaborator
//!
//! A session reports each solved maze through [`ScoreSink::award_points`]
//! and never looks at the result.

use serde::{Deserialize, Serialize};

/// Receiver of score awards
pub trait ScoreSink {
    fn award_points(&mut self, points: u32);
}

impl<S: ScoreSink + ?Sized> ScoreSink for &mut S {
    fn award_points(&mut self, points: u32) {
        (**self).award_points(points)
    }
}

impl<S: ScoreSink + ?Sized> ScoreSink for Box<S> {
    fn award_points(&mut self, points: u32) {
        (**self).award_points(points)
    }
}

/// In-memory running total of awarded points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    total: u64,
    awards: Vec<u32>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Every award, oldest first
    pub fn awards(&self) -> &[u32] {
        &self.awards
    }
}

impl ScoreSink for ScoreLedger {
    fn award_points(&mut self, points: u32) {
        self.total += u64::from(points);
        self.awards.push(points);
        tracing::info!("Awarded {} points (total {})", points, self.total);
    }
}
