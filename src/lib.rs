//! Bocce - two balls, one target, closest wins
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball motion, timers, distance arbiter, round control)
//! - `tuning`: Data-driven round configuration
//! - `presentation`: Bridge to camera, result text and music
//! - `audio`: Victory track selection

pub mod audio;
pub mod error;
pub mod presentation;
pub mod sim;
pub mod tuning;

pub use error::{Result, RoundError};
pub use tuning::{Controller, Lineup, SpawnRange, Tuning};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz physics clock)
    pub const SIM_DT: f32 = 1.0 / 50.0;

    /// Drive magnitude shared by both balls
    pub const BALL_SPEED: f32 = 5.5;
    /// Mass of the built-in point-mass body
    pub const BALL_MASS: f32 = 1.0;

    /// Drive phase length (seconds)
    pub const DRIVE_SECS: f32 = 3.0;
    /// Rolling friction applied on entering the decay phase
    pub const FRICTION_DRAG: f32 = 0.05;
    /// How long rolling friction is held (seconds)
    pub const FRICTION_SECS: f32 = 3.0;
    /// Free roll before the hard stop (seconds)
    pub const FREE_ROLL_SECS: f32 = 30.0;

    /// Local ball spawn x range
    pub const LOCAL_SPAWN_X: (f32, f32) = (0.0, 4.5);
    /// Opponent ball spawn x range
    pub const OPPONENT_SPAWN_X: (f32, f32) = (-6.5, 0.0);
}

/// Force for a drive direction on the ground plane: `(x, 0, z) * speed`
#[inline]
pub fn ground_force(x: f32, z: f32, speed: f32) -> Vec3 {
    Vec3::new(x, 0.0, z) * speed
}

/// True if two points differ on the ground plane (x/z); height is ignored
#[inline]
pub fn moved_on_ground(from: Vec3, to: Vec3) -> bool {
    from.x != to.x || from.z != to.z
}
