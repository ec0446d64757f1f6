//! Physics body seam
//!
//! The motion core only pushes on a body: force every drive tick, damping on
//! phase changes and a hard velocity reset at the end. `PointMass` is the
//! minimal body used headless; a real engine plugs in through `PhysicsBody`.

use std::fmt;

use glam::Vec3;

use super::state::Side;

/// A rigid body the motion core drives
pub trait PhysicsBody: fmt::Debug {
    /// Accumulate a force for the next integration step
    fn apply_force(&mut self, force: Vec3);
    /// Linear drag coefficient (0 = free roll)
    fn set_damping(&mut self, damping: f32);
    fn set_velocity(&mut self, velocity: Vec3);
    fn position(&self) -> Vec3;
    fn velocity(&self) -> Vec3;
    /// Advance the body by one fixed step
    fn step(&mut self, dt: f32);
}

/// Creates bodies at round start. `None` means the body is unavailable.
pub trait BodyProvider {
    fn spawn_body(&mut self, side: Side, position: Vec3) -> Option<Box<dyn PhysicsBody>>;
}

impl<F> BodyProvider for F
where
    F: FnMut(Side, Vec3) -> Option<Box<dyn PhysicsBody>>,
{
    fn spawn_body(&mut self, side: Side, position: Vec3) -> Option<Box<dyn PhysicsBody>> {
        self(side, position)
    }
}

/// Ground-plane point mass with linear damping
#[derive(Debug, Clone)]
pub struct PointMass {
    pub pos: Vec3,
    pub vel: Vec3,
    mass: f32,
    damping: f32,
    /// Forces accumulated since the last step
    force: Vec3,
}

impl PointMass {
    pub fn new(pos: Vec3, mass: f32) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
            mass,
            damping: 0.0,
            force: Vec3::ZERO,
        }
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }
}

impl PhysicsBody for PointMass {
    fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    fn set_damping(&mut self, damping: f32) {
        self.damping = damping.max(0.0);
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.vel = velocity;
    }

    fn position(&self) -> Vec3 {
        self.pos
    }

    fn velocity(&self) -> Vec3 {
        self.vel
    }

    fn step(&mut self, dt: f32) {
        // Semi-implicit Euler, constrained to the ground plane
        let accel = self.force / self.mass;
        self.vel += Vec3::new(accel.x, 0.0, accel.z) * dt;
        self.vel *= 1.0 / (1.0 + self.damping * dt);
        self.pos += self.vel * dt;
        self.force = Vec3::ZERO;
    }
}

/// Hands out a fresh `PointMass` per ball
#[derive(Debug, Clone, Copy)]
pub struct PointMassProvider {
    mass: f32,
}

impl PointMassProvider {
    pub fn new(mass: f32) -> Self {
        Self { mass }
    }
}

impl Default for PointMassProvider {
    fn default() -> Self {
        Self::new(crate::consts::BALL_MASS)
    }
}

impl BodyProvider for PointMassProvider {
    fn spawn_body(&mut self, _side: Side, position: Vec3) -> Option<Box<dyn PhysicsBody>> {
        Some(Box::new(PointMass::new(position, self.mass)))
    }
}
