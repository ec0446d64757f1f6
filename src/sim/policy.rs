//! Movement policies: where a ball wants to go this tick

use std::fmt;

use rand::Rng;

use super::state::DriveAxes;

/// Named input axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Per-tick input axes, each in [-1, 1]
pub trait InputSource {
    fn axis(&self, axis: Axis) -> f32;
}

/// Uniform float draws for the rival
pub trait UniformSource {
    fn uniform(&mut self, min: f32, max: f32) -> f32;
}

impl<R: Rng> UniformSource for R {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        self.random_range(min..=max)
    }
}

/// Produces a drive direction once per tick while the ball is in its drive phase
pub trait MovementPolicy: fmt::Debug {
    fn sample(&mut self, input: &dyn InputSource) -> DriveAxes;
}

/// Player control: input axes straight through
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerPolicy;

impl MovementPolicy for PlayerPolicy {
    fn sample(&mut self, input: &dyn InputSource) -> DriveAxes {
        DriveAxes::new(input.axis(Axis::Horizontal), input.axis(Axis::Vertical))
    }
}

/// Rival lateral range
pub const RIVAL_LATERAL: (f32, f32) = (-1.0, 1.0);
/// Rival forward range; never backs up
pub const RIVAL_FORWARD: (f32, f32) = (0.1, 1.0);

/// Autonomous rival: fresh random direction every tick (jittery on purpose)
#[derive(Debug, Clone)]
pub struct RivalPolicy<R> {
    rng: R,
}

impl<R: UniformSource> RivalPolicy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: UniformSource + fmt::Debug> MovementPolicy for RivalPolicy<R> {
    fn sample(&mut self, _input: &dyn InputSource) -> DriveAxes {
        let lateral = self.rng.uniform(RIVAL_LATERAL.0, RIVAL_LATERAL.1);
        let forward = self.rng.uniform(RIVAL_FORWARD.0, RIVAL_FORWARD.1);
        DriveAxes::new(lateral, forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Axes(f32, f32);

    impl InputSource for Axes {
        fn axis(&self, axis: Axis) -> f32 {
            match axis {
                Axis::Horizontal => self.0,
                Axis::Vertical => self.1,
            }
        }
    }

    #[test]
    fn test_player_passthrough_boundaries() {
        let mut policy = PlayerPolicy;
        for (h, v) in [(-1.0, 1.0), (0.0, 0.0), (1.0, -1.0), (0.25, -0.75)] {
            assert_eq!(policy.sample(&Axes(h, v)), DriveAxes::new(h, v));
        }
    }

    #[test]
    fn test_rival_resamples_every_tick() {
        let mut policy = RivalPolicy::new(Pcg32::seed_from_u64(7));
        let first = policy.sample(&Axes(0.0, 0.0));
        let second = policy.sample(&Axes(0.0, 0.0));
        assert_ne!(first, second);
    }

    #[test]
    fn test_rival_ignores_input() {
        let mut a = RivalPolicy::new(Pcg32::seed_from_u64(3));
        let mut b = RivalPolicy::new(Pcg32::seed_from_u64(3));
        assert_eq!(a.sample(&Axes(1.0, 1.0)), b.sample(&Axes(-1.0, -1.0)));
    }
}
