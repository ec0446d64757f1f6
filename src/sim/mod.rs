//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Timed transitions run off the simulation clock, never wall time
//! - No rendering or platform dependencies

pub mod arbiter;
pub mod body;
pub mod clock;
pub mod motion;
pub mod policy;
pub mod round;
pub mod state;
pub mod tick;

pub use arbiter::{DistanceArbiter, RoundOutcome, Ruling, Verdict, judge};
pub use body::{BodyProvider, PhysicsBody, PointMass, PointMassProvider};
pub use clock::{Scheduler, SimTime};
pub use motion::{BallMotion, MotionProfile, MotionStep, MotionTimer};
pub use policy::{Axis, InputSource, MovementPolicy, PlayerPolicy, RivalPolicy, UniformSource};
pub use round::{Round, RoundEvent};
pub use state::{BallPhase, DriveAxes, PhaseChange, SettleEvent, Side};
pub use tick::{TickInput, tick};
