//! Distance arbiter
//!
//! Owns the target ball. Each side reports once when its ball stops; the
//! first report per side is kept and later ones are ignored. When both sides
//! are in, the round is decided exactly once: the strictly closer ball wins,
//! equal distances are a tie.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::Side;

/// Result of a decided round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Winner(Side),
    Tie,
}

/// The announced outcome of a round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub verdict: Verdict,
    pub local_distance: f32,
    pub opponent_distance: f32,
}

impl RoundOutcome {
    pub fn new(local_distance: f32, opponent_distance: f32) -> Self {
        Self {
            verdict: judge(local_distance, opponent_distance),
            local_distance,
            opponent_distance,
        }
    }

    pub fn distance(&self, side: Side) -> f32 {
        match side {
            Side::Local => self.local_distance,
            Side::Opponent => self.opponent_distance,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self.verdict {
            Verdict::Winner(side) => Some(side),
            Verdict::Tie => None,
        }
    }

    pub fn is_victorious(&self, side: Side) -> bool {
        self.winner() == Some(side)
    }
}

/// Strictly closer wins; equal is a tie
pub fn judge(local_distance: f32, opponent_distance: f32) -> Verdict {
    if local_distance < opponent_distance {
        Verdict::Winner(Side::Local)
    } else if opponent_distance < local_distance {
        Verdict::Winner(Side::Opponent)
    } else {
        Verdict::Tie
    }
}

/// What a settle report did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ruling {
    /// First report for this side; the other side is still rolling
    Recorded { side: Side, distance: f32 },
    /// This side had already reported; nothing changed
    Duplicate { side: Side },
    /// Second side in: the round is decided
    Decided(RoundOutcome),
}

/// Scores settled balls against the target point
#[derive(Debug, Clone)]
pub struct DistanceArbiter {
    target: Vec3,
    distances: [Option<f32>; 2],
    outcome: Option<RoundOutcome>,
}

impl DistanceArbiter {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            distances: [None; 2],
            outcome: None,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Forget the previous round
    pub fn clear(&mut self) {
        self.distances = [None; 2];
        self.outcome = None;
    }

    pub fn distance(&self, side: Side) -> Option<f32> {
        self.distances[side.index()]
    }

    /// Number of sides that have reported
    pub fn recorded(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }

    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    /// False until the round is decided, and for both sides on a tie
    pub fn is_victorious(&self, side: Side) -> bool {
        self.outcome.is_some_and(|o| o.is_victorious(side))
    }

    /// Record a settled ball
    pub fn on_settled(&mut self, side: Side, position: Vec3) -> Ruling {
        let slot = &mut self.distances[side.index()];
        if let Some(kept) = *slot {
            log::warn!(
                "Ignoring repeated settle for {} ball (kept {:.3}, got {:.3})",
                side,
                kept,
                position.distance(self.target)
            );
            return Ruling::Duplicate { side };
        }

        let distance = position.distance(self.target);
        *slot = Some(distance);
        log::info!("{} ball settled {:.2} from the target", side, distance);

        match (self.distances[0], self.distances[1], self.outcome) {
            (Some(local), Some(opponent), None) => {
                let outcome = RoundOutcome::new(local, opponent);
                self.outcome = Some(outcome);
                log::info!("Round decided: {:?}", outcome.verdict);
                Ruling::Decided(outcome)
            }
            _ => Ruling::Recorded { side, distance },
        }
    }
}
