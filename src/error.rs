//! Round errors

use thiserror::Error;

use crate::sim::{BallPhase, MotionStep, Side};

#[derive(Error, Debug)]
pub enum RoundError {
    #[error("No physics body for the {side} ball")]
    MissingBody { side: Side },

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("Tuning parse error: {0}")]
    TuningParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{side} ball got {step:?} while {phase:?}")]
    UnexpectedTimer {
        side: Side,
        step: MotionStep,
        phase: BallPhase,
    },

    #[error("{step:?} queued for the {side} ball, which is not in play")]
    OrphanTimer { side: Side, step: MotionStep },

    #[error("Round not decided after {ticks} ticks")]
    Undecided { ticks: u64 },
}

impl RoundError {
    /// Setup failures abort the round; the host has to fix wiring or tuning first.
    pub fn is_setup_failure(&self) -> bool {
        match self {
            RoundError::MissingBody { .. } => true,
            RoundError::InvalidTuning(_) => true,
            RoundError::TuningParse(_) => true,
            RoundError::Io(_) => true,
            RoundError::UnexpectedTimer { .. } => false,
            RoundError::OrphanTimer { .. } => false,
            RoundError::Undecided { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RoundError>;
