//! Ball motion state machine
//!
//! A ball runs one throw per round:
//!
//! ```text
//! Active --(drive timer)--> Decelerating --(friction timer)--> free roll --(stop timer)--> Stopped
//! ```
//!
//! The drive timer is armed at round start and runs alongside the per-tick
//! force loop. The decay phase is three steps in sequence, each one a
//! continuation on the round scheduler. Reaching `Stopped` yields the single
//! settle event for the ball.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::body::PhysicsBody;
use super::clock::{Scheduler, SimTime};
use super::policy::{InputSource, MovementPolicy};
use super::state::{BallPhase, DriveAxes, PhaseChange, SettleEvent, Side};
use crate::error::{Result, RoundError};
use crate::moved_on_ground;

/// Timed steps of the throw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionStep {
    /// Drive window over: clear input, start rolling friction
    EndDrive,
    /// Friction off, ball rolls freely
    ReleaseFriction,
    /// Zero the velocity and report
    HardStop,
}

/// A continuation addressed to one ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionTimer {
    pub side: Side,
    pub step: MotionStep,
}

/// Timings and magnitudes of a throw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    pub speed: f32,
    pub drive: SimTime,
    pub friction_drag: f32,
    pub friction_hold: SimTime,
    pub free_roll: SimTime,
}

impl Default for MotionProfile {
    fn default() -> Self {
        use crate::consts::*;
        Self {
            speed: BALL_SPEED,
            drive: SimTime::from_secs(DRIVE_SECS),
            friction_drag: FRICTION_DRAG,
            friction_hold: SimTime::from_secs(FRICTION_SECS),
            free_roll: SimTime::from_secs(FREE_ROLL_SECS),
        }
    }
}

/// One side's ball and its throw
#[derive(Debug)]
pub struct BallMotion {
    side: Side,
    phase: BallPhase,
    speed: f32,
    axes: DriveAxes,
    initial_position: Vec3,
    history: Vec<PhaseChange>,
    profile: MotionProfile,
    policy: Box<dyn MovementPolicy>,
    body: Box<dyn PhysicsBody>,
}

impl BallMotion {
    pub fn new(
        side: Side,
        policy: Box<dyn MovementPolicy>,
        body: Box<dyn PhysicsBody>,
        profile: MotionProfile,
    ) -> Self {
        let initial_position = body.position();
        Self {
            side,
            phase: BallPhase::Active,
            speed: 0.0,
            axes: DriveAxes::ZERO,
            initial_position,
            history: vec![PhaseChange {
                phase: BallPhase::Active,
                at: SimTime::ZERO,
            }],
            profile,
            policy,
            body,
        }
    }

    /// Schedule the end of the drive window. Call once, at round start.
    pub fn arm(&self, scheduler: &mut Scheduler<MotionTimer>) {
        let due = scheduler.schedule_after(self.profile.drive, self.timer(MotionStep::EndDrive));
        log::debug!("{} ball armed, drive ends at {:.3}s", self.side, due.as_secs());
    }

    /// Per-tick drive: sample the policy and push the body while Active
    pub fn drive(&mut self, input: &dyn InputSource) {
        if self.phase != BallPhase::Active {
            return;
        }
        self.axes = self.policy.sample(input);
        self.speed = self.profile.speed;
        self.body.apply_force(self.axes.force(self.speed));
    }

    /// Integrate the body by one step
    pub fn integrate(&mut self, dt: f32) {
        self.body.step(dt);
    }

    /// Run a due continuation. Returns the settle event when the ball stops.
    pub fn on_timer(
        &mut self,
        step: MotionStep,
        at: SimTime,
        scheduler: &mut Scheduler<MotionTimer>,
    ) -> Result<Option<SettleEvent>> {
        match (step, self.phase) {
            (MotionStep::EndDrive, BallPhase::Active) => {
                self.speed = 0.0;
                self.axes = DriveAxes::ZERO;
                self.enter(BallPhase::Decelerating, at);
                self.body.set_damping(self.profile.friction_drag);
                // Chained off the due time, not the tick that ran it
                scheduler.schedule_at(
                    at + self.profile.friction_hold,
                    self.timer(MotionStep::ReleaseFriction),
                );
                Ok(None)
            }
            (MotionStep::ReleaseFriction, BallPhase::Decelerating) => {
                self.body.set_damping(0.0);
                log::debug!("{} ball rolling free at {:.3}s", self.side, at.as_secs());
                scheduler.schedule_at(
                    at + self.profile.free_roll,
                    self.timer(MotionStep::HardStop),
                );
                Ok(None)
            }
            (MotionStep::HardStop, BallPhase::Decelerating) => {
                self.body.set_velocity(Vec3::ZERO);
                self.enter(BallPhase::Stopped, at);
                Ok(Some(SettleEvent {
                    side: self.side,
                    position: self.body.position(),
                }))
            }
            (step, phase) => Err(RoundError::UnexpectedTimer {
                side: self.side,
                step,
                phase,
            }),
        }
    }

    fn enter(&mut self, phase: BallPhase, at: SimTime) {
        log::debug!(
            "{} ball {:?} -> {:?} at {:.3}s",
            self.side,
            self.phase,
            phase,
            at.as_secs()
        );
        self.phase = phase;
        self.history.push(PhaseChange { phase, at });
    }

    fn timer(&self, step: MotionStep) -> MotionTimer {
        MotionTimer {
            side: self.side,
            step,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn phase(&self) -> BallPhase {
        self.phase
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn axes(&self) -> DriveAxes {
        self.axes
    }

    pub fn position(&self) -> Vec3 {
        self.body.position()
    }

    pub fn velocity(&self) -> Vec3 {
        self.body.velocity()
    }

    pub fn initial_position(&self) -> Vec3 {
        self.initial_position
    }

    /// True once the ball has left its spawn point on the ground plane
    pub fn has_moved(&self) -> bool {
        moved_on_ground(self.initial_position, self.body.position())
    }

    /// Phases entered so far, oldest first
    pub fn history(&self) -> &[PhaseChange] {
        &self.history
    }
}
