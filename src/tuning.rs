//! Data-driven round configuration
//!
//! Defaults come from `consts`; any field can be overridden from JSON.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, RoundError};
use crate::sim::{MotionProfile, Side, SimTime};

/// Who drives a ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Controller {
    /// Input axes
    #[default]
    Player,
    /// Randomized rival
    Rival,
}

impl Controller {
    pub fn as_str(&self) -> &'static str {
        match self {
            Controller::Player => "Player",
            Controller::Rival => "Rival",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "player" | "human" => Some(Controller::Player),
            "rival" | "ai" | "cpu" => Some(Controller::Rival),
            _ => None,
        }
    }
}

/// Controller per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub local: Controller,
    pub opponent: Controller,
}

impl Default for Lineup {
    fn default() -> Self {
        Self {
            local: Controller::Player,
            opponent: Controller::Rival,
        }
    }
}

impl Lineup {
    /// Attract mode: both balls thrown by the rival policy
    pub fn demo() -> Self {
        Self {
            local: Controller::Rival,
            opponent: Controller::Rival,
        }
    }

    pub fn controller(&self, side: Side) -> Controller {
        match side {
            Side::Local => self.local,
            Side::Opponent => self.opponent,
        }
    }
}

/// Closed x range a ball spawns in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub min: f32,
    pub max: f32,
}

impl SpawnRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, x: f32) -> bool {
        x >= self.min && x <= self.max
    }
}

/// Round tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fixed step the host ticks at (seconds)
    pub sim_dt: f32,

    // === Throw ===
    pub ball_speed: f32,
    pub ball_mass: f32,
    pub drive_secs: f32,
    pub friction_drag: f32,
    pub friction_secs: f32,
    pub free_roll_secs: f32,

    // === Field ===
    pub local_spawn_x: SpawnRange,
    pub opponent_spawn_x: SpawnRange,
    /// Spawn y/z for both balls (x comes from the side's range)
    pub spawn_base: Vec3,
    /// The bocce
    pub target: Vec3,

    pub lineup: Lineup,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sim_dt: SIM_DT,

            ball_speed: BALL_SPEED,
            ball_mass: BALL_MASS,
            drive_secs: DRIVE_SECS,
            friction_drag: FRICTION_DRAG,
            friction_secs: FRICTION_SECS,
            free_roll_secs: FREE_ROLL_SECS,

            local_spawn_x: SpawnRange::new(LOCAL_SPAWN_X.0, LOCAL_SPAWN_X.1),
            opponent_spawn_x: SpawnRange::new(OPPONENT_SPAWN_X.0, OPPONENT_SPAWN_X.1),
            spawn_base: Vec3::new(0.0, 0.5, -8.0),
            target: Vec3::new(0.0, 0.5, 10.0),

            lineup: Lineup::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("sim_dt", self.sim_dt),
            ("ball_mass", self.ball_mass),
            ("drive_secs", self.drive_secs),
            ("friction_secs", self.friction_secs),
            ("free_roll_secs", self.free_roll_secs),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(RoundError::InvalidTuning(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [("ball_speed", self.ball_speed), ("friction_drag", self.friction_drag)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(RoundError::InvalidTuning(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        for (name, range) in [
            ("local_spawn_x", self.local_spawn_x),
            ("opponent_spawn_x", self.opponent_spawn_x),
        ] {
            if !(range.min.is_finite() && range.max.is_finite() && range.min <= range.max) {
                return Err(RoundError::InvalidTuning(format!(
                    "{} is not an ordered range: [{}, {}]",
                    name, range.min, range.max
                )));
            }
        }

        if !(self.spawn_base.is_finite() && self.target.is_finite()) {
            return Err(RoundError::InvalidTuning("field positions must be finite".into()));
        }

        Ok(())
    }

    pub fn spawn_range(&self, side: Side) -> SpawnRange {
        match side {
            Side::Local => self.local_spawn_x,
            Side::Opponent => self.opponent_spawn_x,
        }
    }

    /// Throw timings on the simulation clock
    pub fn motion_profile(&self) -> MotionProfile {
        MotionProfile {
            speed: self.ball_speed,
            drive: SimTime::from_secs(self.drive_secs),
            friction_drag: self.friction_drag,
            friction_hold: SimTime::from_secs(self.friction_secs),
            free_roll: SimTime::from_secs(self.free_roll_secs),
        }
    }

    /// Ticks needed at `sim_dt` to cover a whole throw
    pub fn ticks_per_throw(&self) -> u64 {
        let total = self.drive_secs + self.friction_secs + self.free_roll_secs;
        (total / self.sim_dt).ceil() as u64 + 1
    }
}
