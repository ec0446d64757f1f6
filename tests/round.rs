//! Full-round behavior through the public API

use bocce::presentation::{HeadlessBridge, present};
use bocce::sim::{
    BallPhase, PhysicsBody, PointMassProvider, Round, RoundEvent, SimTime, TickInput, Verdict,
    tick,
};
use bocce::{Lineup, SpawnRange, Tuning};
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

/// A body that never moves; forces and velocity commands are recorded only
#[derive(Debug)]
struct Anchored {
    pos: Vec3,
    damping_log: Rc<RefCell<Vec<f32>>>,
}

impl PhysicsBody for Anchored {
    fn apply_force(&mut self, _force: Vec3) {}

    fn set_damping(&mut self, damping: f32) {
        self.damping_log.borrow_mut().push(damping);
    }

    fn set_velocity(&mut self, _velocity: Vec3) {}

    fn position(&self) -> Vec3 {
        self.pos
    }

    fn velocity(&self) -> Vec3 {
        Vec3::ZERO
    }

    fn step(&mut self, _dt: f32) {}
}

fn anchored(_side: bocce::sim::Side, pos: Vec3) -> Option<Box<dyn PhysicsBody>> {
    Some(Box::new(Anchored {
        pos,
        damping_log: Rc::default(),
    }))
}

/// Tick until decided (or a generous cap), collecting every event
fn play_out<P: bocce::sim::BodyProvider>(
    round: &mut Round<P>,
    input: &TickInput,
    dt: f32,
) -> Vec<RoundEvent> {
    let mut events = round.drain_events();
    let cap = (40.0 / dt) as usize + 10;
    for _ in 0..cap {
        tick(round, input, dt).unwrap();
        events.extend(round.drain_events());
        if round.is_decided() {
            break;
        }
    }
    events
}

#[test]
fn test_full_round_emits_one_settle_per_ball_and_one_decision() {
    let mut round = Round::new(7, Tuning::default(), PointMassProvider::default()).unwrap();
    round.start_round().unwrap();
    let events = play_out(&mut round, &TickInput::axes(0.0, 1.0), 0.02);

    let settles: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            RoundEvent::Settled(s) => Some(s.side),
            _ => None,
        })
        .collect();
    assert_eq!(settles.len(), 2);
    assert!(settles.contains(&bocce::sim::Side::Local));
    assert!(settles.contains(&bocce::sim::Side::Opponent));

    let decisions = events
        .iter()
        .filter(|e| matches!(e, RoundEvent::Decided(_)))
        .count();
    assert_eq!(decisions, 1);

    // The decision is the last thing that happens
    assert!(matches!(events.last(), Some(RoundEvent::Decided(_))));

    // Nothing more after the round is decided
    for _ in 0..500 {
        tick(&mut round, &TickInput::default(), 0.02).unwrap();
    }
    assert!(round.drain_events().is_empty());
    assert_eq!(round.pending_timers(), 0);
}

#[test]
fn test_phase_times_do_not_depend_on_step_size() {
    for dt in [0.02, 1.0 / 60.0, 0.05, 0.1, 0.25, 0.7] {
        let mut round = Round::new(11, Tuning::default(), PointMassProvider::default()).unwrap();
        round.start_round().unwrap();
        play_out(&mut round, &TickInput::axes(0.3, 0.9), dt);
        assert!(round.is_decided(), "dt={dt}");

        for ball in round.balls() {
            let phases: Vec<_> = ball.history().iter().map(|c| (c.phase, c.at)).collect();
            assert_eq!(
                phases,
                vec![
                    (BallPhase::Active, SimTime::ZERO),
                    (BallPhase::Decelerating, SimTime::from_secs(3.0)),
                    (BallPhase::Stopped, SimTime::from_secs(36.0)),
                ],
                "dt={dt} side={}",
                ball.side()
            );
            assert_eq!(ball.velocity(), Vec3::ZERO);
        }
    }
}

#[test]
fn test_drive_applies_for_the_whole_window_only() {
    let mut round = Round::new(3, Tuning::default(), PointMassProvider::default()).unwrap();
    round.start_round().unwrap();
    let push = TickInput::axes(0.0, 1.0);

    // 150 ticks fill the drive window exactly
    for _ in 0..150 {
        tick(&mut round, &push, 0.02).unwrap();
    }
    let local = round.ball(bocce::sim::Side::Local).unwrap();
    assert_eq!(local.phase(), BallPhase::Active);
    assert!(local.has_moved());
    let speed_at_end = local.velocity().z;
    assert!(speed_at_end > 0.0);

    // Tick 150 closes the window before any force is applied
    tick(&mut round, &push, 0.02).unwrap();
    let local = round.ball(bocce::sim::Side::Local).unwrap();
    assert_eq!(local.phase(), BallPhase::Decelerating);
    assert_eq!(local.speed(), 0.0);
    assert!(local.velocity().z < speed_at_end);
}

#[test]
fn test_decay_sets_friction_then_free_roll() {
    let logs: Rc<RefCell<Vec<(bocce::sim::Side, Rc<RefCell<Vec<f32>>>)>>> = Rc::default();
    let provider = {
        let logs = Rc::clone(&logs);
        move |side: bocce::sim::Side, pos: Vec3| -> Option<Box<dyn PhysicsBody>> {
            let damping_log = Rc::<RefCell<Vec<f32>>>::default();
            logs.borrow_mut().push((side, Rc::clone(&damping_log)));
            Some(Box::new(Anchored { pos, damping_log }))
        }
    };
    let mut round = Round::new(3, Tuning::default(), provider).unwrap();
    round.start_round().unwrap();
    play_out(&mut round, &TickInput::default(), 0.02);
    for ball in round.balls() {
        assert_eq!(ball.phase(), BallPhase::Stopped);
    }

    let logs = logs.borrow();
    assert_eq!(logs.len(), 2);
    for (side, damping_log) in logs.iter() {
        assert_eq!(*damping_log.borrow(), vec![0.05, 0.0], "side={side}");
    }
}

#[test]
fn test_equal_distances_tie() {
    let tuning = Tuning {
        local_spawn_x: SpawnRange::new(2.0, 2.0),
        opponent_spawn_x: SpawnRange::new(-2.0, -2.0),
        spawn_base: Vec3::new(0.0, 0.5, 0.0),
        target: Vec3::new(0.0, 0.5, 0.0),
        ..Default::default()
    };
    let mut round = Round::new(1, tuning, anchored).unwrap();
    round.start_round().unwrap();
    play_out(&mut round, &TickInput::default(), 0.02);

    let outcome = round.outcome().copied().unwrap();
    assert_eq!(outcome.verdict, Verdict::Tie);
    assert_eq!(outcome.local_distance, 2.0);
    assert_eq!(outcome.opponent_distance, 2.0);
    assert!(!round.arbiter().is_victorious(bocce::sim::Side::Local));
    assert!(!round.arbiter().is_victorious(bocce::sim::Side::Opponent));
}

#[test]
fn test_ball_resting_on_target_still_counts() {
    let tuning = Tuning {
        local_spawn_x: SpawnRange::new(0.0, 0.0),
        opponent_spawn_x: SpawnRange::new(-3.0, -3.0),
        spawn_base: Vec3::new(0.0, 0.5, -8.0),
        target: Vec3::new(0.0, 0.5, -8.0),
        ..Default::default()
    };
    let mut round = Round::new(1, tuning, anchored).unwrap();
    round.start_round().unwrap();
    play_out(&mut round, &TickInput::default(), 0.02);

    let outcome = round.outcome().copied().expect("a zero distance still decides the round");
    assert_eq!(outcome.local_distance, 0.0);
    assert_eq!(outcome.verdict, Verdict::Winner(bocce::sim::Side::Local));
}

#[test]
fn test_restart_discards_everything() {
    let tuning = Tuning::default();
    let mut round = Round::new(21, tuning.clone(), PointMassProvider::default()).unwrap();
    round.start_round().unwrap();

    // Part way into the decay phase: pending continuations for both balls
    for _ in 0..200 {
        tick(&mut round, &TickInput::axes(0.0, 1.0), 0.02).unwrap();
    }
    let generation = round.generation();
    round.restart_round().unwrap();

    assert_eq!(round.generation(), generation + 1);
    assert_eq!(round.now(), SimTime::ZERO);
    assert_eq!(round.arbiter().recorded(), 0);
    assert!(round.outcome().is_none());
    assert_eq!(round.pending_timers(), 2);
    for ball in round.balls() {
        assert_eq!(ball.phase(), BallPhase::Active);
        assert_eq!(ball.history().len(), 1);
        assert!(tuning.spawn_range(ball.side()).contains(ball.position().x));
        assert!(!ball.has_moved());
    }

    // The old round's friction timers (due at 6.0s) must not fire early
    for _ in 0..150 {
        tick(&mut round, &TickInput::default(), 0.02).unwrap();
    }
    for ball in round.balls() {
        assert_eq!(ball.phase(), BallPhase::Active);
    }
    let events = play_out(&mut round, &TickInput::default(), 0.02);
    let settles = events
        .iter()
        .filter(|e| matches!(e, RoundEvent::Settled(_)))
        .count();
    assert_eq!(settles, 2);
}

#[test]
fn test_restart_after_decision_allows_a_new_decision() {
    let mut round = Round::new(4, Tuning::default(), PointMassProvider::default()).unwrap();
    round.start_round().unwrap();
    play_out(&mut round, &TickInput::default(), 0.05);
    assert!(round.is_decided());

    let restart = TickInput {
        restart: true,
        ..Default::default()
    };
    tick(&mut round, &restart, 0.05).unwrap();
    assert!(!round.is_decided());

    let events = play_out(&mut round, &TickInput::default(), 0.05);
    assert!(round.is_decided());
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, RoundEvent::Decided(_)))
            .count(),
        1
    );
}

#[test]
fn test_demo_lineup_is_reproducible() {
    let tuning = Tuning {
        lineup: Lineup::demo(),
        ..Default::default()
    };
    let outcome = |seed| {
        let mut round = Round::new(seed, tuning.clone(), PointMassProvider::default()).unwrap();
        round.start_round().unwrap();
        play_out(&mut round, &TickInput::axes(-1.0, -1.0), 0.02);
        round.outcome().copied().unwrap()
    };
    assert_eq!(outcome(1234), outcome(1234));
}

#[test]
fn test_bridge_sees_decision_once_and_follows_local_ball() {
    let mut round = Round::new(8, Tuning::default(), PointMassProvider::default()).unwrap();
    round.start_round().unwrap();
    let mut bridge = HeadlessBridge::default();

    let cap = (40.0 / 0.02) as usize;
    for _ in 0..cap {
        tick(&mut round, &TickInput::axes(0.2, 1.0), 0.02).unwrap();
        present(&mut round, &mut bridge);
    }

    assert_eq!(bridge.rounds_decided, 1);
    assert!(bridge.jukebox.is_playing());
    let board = bridge.board.as_ref().unwrap();
    let outcome = round.outcome().unwrap();
    assert_eq!(board.local_value, format!("{:.2}", outcome.local_distance));

    let local = round.ball(bocce::sim::Side::Local).unwrap().position();
    assert_eq!(bridge.camera.position, local + bridge.camera.offset());
}
