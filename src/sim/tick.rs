//! Fixed timestep simulation tick
//!
//! Host-facing game loop step: handles the restart key, then advances the round.

use serde::{Deserialize, Serialize};

use super::body::BodyProvider;
use super::policy::{Axis, InputSource};
use super::round::Round;
use crate::error::Result;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Horizontal axis (left/right)
    pub horizontal: f32,
    /// Vertical axis (toward the target)
    pub vertical: f32,
    /// Restart key (escape), one-shot
    pub restart: bool,
}

impl TickInput {
    pub fn axes(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
            restart: false,
        }
    }
}

impl InputSource for TickInput {
    fn axis(&self, axis: Axis) -> f32 {
        let value = match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        };
        value.clamp(-1.0, 1.0)
    }
}

/// Advance the round by one fixed timestep
pub fn tick<P: BodyProvider>(round: &mut Round<P>, input: &TickInput, dt: f32) -> Result<()> {
    if input.restart {
        if round.accepts_restart() {
            return round.restart_round();
        }
        log::debug!("Restart ignored during the drive window");
    }

    round.step(input, dt)
}
