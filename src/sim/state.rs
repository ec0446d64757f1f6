//! Core simulation types
//!
//! Plain data shared by the motion state machine, the arbiter and round control.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::clock::SimTime;
use crate::ground_force;

/// Which competitor a ball (and its distance) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// The player's ball
    Local,
    /// The rival's ball
    Opponent,
}

impl Side {
    /// Both sides in spawn order
    pub const ALL: [Side; 2] = [Side::Local, Side::Opponent];

    /// Stable slot index for per-side tables
    pub fn index(self) -> usize {
        match self {
            Side::Local => 0,
            Side::Opponent => 1,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::Local => Side::Opponent,
            Side::Opponent => Side::Local,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Local => "local",
            Side::Opponent => "opponent",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle phase of a thrown ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallPhase {
    /// Drive window: policy input turns into force every tick
    Active,
    /// Decay: rolling friction, then free roll, then hard stop
    Decelerating,
    /// At rest, distance reported
    Stopped,
}

/// Per-tick drive direction
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DriveAxes {
    /// Sideways component (x), in [-1, 1]
    pub lateral: f32,
    /// Toward-the-target component (z), in [-1, 1]
    pub forward: f32,
}

impl DriveAxes {
    pub const ZERO: Self = Self {
        lateral: 0.0,
        forward: 0.0,
    };

    pub fn new(lateral: f32, forward: f32) -> Self {
        Self { lateral, forward }
    }

    /// Force vector `(lateral, 0, forward) * speed`
    pub fn force(&self, speed: f32) -> Vec3 {
        ground_force(self.lateral, self.forward, speed)
    }
}

/// Emitted once when a ball reaches `Stopped`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettleEvent {
    pub side: Side,
    pub position: Vec3,
}

/// One entry of a ball's phase history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseChange {
    pub phase: BallPhase,
    /// Simulation time the phase began (the continuation's due time)
    pub at: SimTime,
}
