//! Presentation bridge
//!
//! The simulation never touches cameras, text or music directly. The host
//! feeds round output through `present` into a `PresentationBridge`.

pub mod camera;
pub mod text;

pub use camera::FollowCamera;
pub use text::{ResultBoard, Rgba};

use glam::Vec3;

use crate::audio::{Jukebox, Track};
use crate::sim::{BodyProvider, Round, RoundEvent, RoundOutcome, Side};

/// Receives round output
pub trait PresentationBridge {
    /// Called once per decided round
    fn on_round_decided(&mut self, outcome: &RoundOutcome);

    /// Called every presented tick for each ball
    fn on_ball_moved(&mut self, _side: Side, _position: Vec3) {}

    /// Called when a new round spawns its balls
    fn on_round_started(&mut self, _generation: u32) {}
}

/// Push ball positions and pending events to the bridge; returns the events
pub fn present<P: BodyProvider>(
    round: &mut Round<P>,
    bridge: &mut dyn PresentationBridge,
) -> Vec<RoundEvent> {
    let events = round.drain_events();
    for event in &events {
        match event {
            RoundEvent::Started { generation } => bridge.on_round_started(*generation),
            RoundEvent::Decided(outcome) => bridge.on_round_decided(outcome),
            RoundEvent::PhaseChanged { .. } | RoundEvent::Settled(_) => {}
        }
    }
    for (side, position) in round.ball_positions() {
        bridge.on_ball_moved(side, position);
    }
    events
}

/// Headless bridge: tracks the camera, fills the result board, picks the music
#[derive(Debug, Clone)]
pub struct HeadlessBridge {
    pub camera: FollowCamera,
    pub jukebox: Jukebox,
    pub board: Option<ResultBoard>,
    /// Decided rounds seen so far
    pub rounds_decided: u32,
}

impl HeadlessBridge {
    pub fn new(camera_position: Vec3, volume: f32) -> Self {
        Self {
            camera: FollowCamera::new(camera_position),
            jukebox: Jukebox::new(volume),
            board: None,
            rounds_decided: 0,
        }
    }
}

impl Default for HeadlessBridge {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 5.0, -14.0), 0.8)
    }
}

impl PresentationBridge for HeadlessBridge {
    fn on_round_started(&mut self, generation: u32) {
        self.camera.unbind();
        self.jukebox.reset();
        self.board = None;
        log::debug!("Presenting round {}", generation);
    }

    fn on_ball_moved(&mut self, side: Side, position: Vec3) {
        if side != Side::Local {
            return;
        }
        if self.camera.subject().is_none() {
            self.camera.bind(side, position);
        } else {
            self.camera.follow(side, position);
        }
    }

    fn on_round_decided(&mut self, outcome: &RoundOutcome) {
        let board = ResultBoard::from_outcome(outcome);
        log::info!(
            "{} {}{} | {}{}",
            board.headline,
            board.local_label,
            board.local_value,
            board.opponent_label,
            board.opponent_value
        );
        self.board = Some(board);

        self.jukebox.set_clip(Track::for_outcome(outcome));
        self.jukebox.play();
        self.rounds_decided += 1;
    }
}
