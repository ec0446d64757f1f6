//! Round control
//!
//! A round owns both balls, the continuation queue and the arbiter. Starting
//! (or restarting) a round throws away everything from the previous one in a
//! single step: pending continuations, balls and recorded distances.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arbiter::{DistanceArbiter, RoundOutcome, Ruling};
use super::body::BodyProvider;
use super::clock::{Scheduler, SimTime};
use super::motion::{BallMotion, MotionTimer};
use super::policy::{InputSource, MovementPolicy, PlayerPolicy, RivalPolicy};
use super::state::{BallPhase, SettleEvent, Side};
use crate::error::{Result, RoundError};
use crate::tuning::{Controller, Tuning};

/// Things a round reports to its host, in order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// Both balls spawned and armed
    Started { generation: u32 },
    PhaseChanged {
        side: Side,
        phase: BallPhase,
        at: SimTime,
    },
    Settled(SettleEvent),
    /// Fired once per round
    Decided(RoundOutcome),
}

/// One bocce round
#[derive(Debug)]
pub struct Round<P: BodyProvider> {
    tuning: Tuning,
    seed: u64,
    rng: Pcg32,
    provider: P,
    scheduler: Scheduler<MotionTimer>,
    /// Sorted by side
    balls: Vec<BallMotion>,
    arbiter: DistanceArbiter,
    events: Vec<RoundEvent>,
}

impl<P: BodyProvider> Round<P> {
    /// Create an idle round; call `start_round` to throw
    pub fn new(seed: u64, tuning: Tuning, provider: P) -> Result<Self> {
        tuning.validate()?;
        let arbiter = DistanceArbiter::new(tuning.target);
        Ok(Self {
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            provider,
            scheduler: Scheduler::new(),
            balls: Vec::with_capacity(2),
            arbiter,
            events: Vec::new(),
        })
    }

    /// Spawn both balls in their ranges and arm their drive timers
    pub fn start_round(&mut self) -> Result<()> {
        self.scheduler.reset();
        self.arbiter.clear();
        self.balls.clear();

        let profile = self.tuning.motion_profile();
        let mut balls = Vec::with_capacity(2);
        for side in Side::ALL {
            let range = self.tuning.spawn_range(side);
            let x = self.rng.random_range(range.min..=range.max);
            let spawn = Vec3::new(x, self.tuning.spawn_base.y, self.tuning.spawn_base.z);

            let body = self
                .provider
                .spawn_body(side, spawn)
                .ok_or(RoundError::MissingBody { side })?;
            let policy = self.policy_for(self.tuning.lineup.controller(side));
            balls.push(BallMotion::new(side, policy, body, profile));
        }

        for ball in &balls {
            ball.arm(&mut self.scheduler);
        }
        self.balls = balls;

        let generation = self.scheduler.generation();
        log::info!(
            "Round {} started (seed {}): local x={:.2}, opponent x={:.2}",
            generation,
            self.seed,
            self.balls[0].position().x,
            self.balls[1].position().x
        );
        self.events.push(RoundEvent::Started { generation });
        Ok(())
    }

    /// Drop the current round and start a fresh one
    pub fn restart_round(&mut self) -> Result<()> {
        log::info!("Restarting round {}", self.scheduler.generation());
        self.start_round()
    }

    fn policy_for(&mut self, controller: Controller) -> Box<dyn MovementPolicy> {
        match controller {
            Controller::Player => Box::new(PlayerPolicy),
            Controller::Rival => Box::new(RivalPolicy::new(Pcg32::seed_from_u64(self.rng.random()))),
        }
    }

    /// One fixed step: due continuations, then drive, then integration
    pub fn step(&mut self, input: &dyn InputSource, dt: f32) -> Result<()> {
        if self.balls.is_empty() {
            return Ok(());
        }

        while let Some((at, timer)) = self.scheduler.pop_due() {
            let Some(ball) = self.balls.iter_mut().find(|b| b.side() == timer.side) else {
                return Err(RoundError::OrphanTimer {
                    side: timer.side,
                    step: timer.step,
                });
            };
            let before = ball.phase();
            let settled = ball.on_timer(timer.step, at, &mut self.scheduler)?;
            if ball.phase() != before {
                self.events.push(RoundEvent::PhaseChanged {
                    side: timer.side,
                    phase: ball.phase(),
                    at,
                });
            }
            if let Some(settle) = settled {
                self.events.push(RoundEvent::Settled(settle));
                if let Ruling::Decided(outcome) = self.arbiter.on_settled(settle.side, settle.position) {
                    self.events.push(RoundEvent::Decided(outcome));
                }
            }
        }

        for ball in &mut self.balls {
            ball.drive(input);
        }
        for ball in &mut self.balls {
            ball.integrate(dt);
        }

        self.scheduler.advance(SimTime::from_secs(dt));
        Ok(())
    }

    /// Restart is accepted once the local drive window is over
    pub fn accepts_restart(&self) -> bool {
        self.ball(Side::Local)
            .is_none_or(|ball| ball.phase() != BallPhase::Active)
    }

    /// Take the events reported since the last drain
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn ball(&self, side: Side) -> Option<&BallMotion> {
        self.balls.iter().find(|b| b.side() == side)
    }

    pub fn balls(&self) -> &[BallMotion] {
        &self.balls
    }

    /// Current ball positions, for camera follow
    pub fn ball_positions(&self) -> impl Iterator<Item = (Side, Vec3)> + '_ {
        self.balls.iter().map(|b| (b.side(), b.position()))
    }

    pub fn arbiter(&self) -> &DistanceArbiter {
        &self.arbiter
    }

    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.arbiter.outcome()
    }

    pub fn is_decided(&self) -> bool {
        self.arbiter.outcome().is_some()
    }

    pub fn is_started(&self) -> bool {
        !self.balls.is_empty()
    }

    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn generation(&self) -> u32 {
        self.scheduler.generation()
    }

    /// Continuations still queued for this round
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
