//! Victory music
//!
//! The round picks a track from its outcome; the host's audio backend only
//! sees clip paths.

use serde::{Deserialize, Serialize};

use crate::sim::{RoundOutcome, Side};

/// Music clip prefix
const MUSIC: &str = "Music/";

/// End-of-round tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Track {
    /// Local ball won
    PlayerVictory,
    /// Anything else, ties included
    RivalVictory,
}

impl Track {
    pub fn for_outcome(outcome: &RoundOutcome) -> Self {
        if outcome.is_victorious(Side::Local) {
            Track::PlayerVictory
        } else {
            Track::RivalVictory
        }
    }

    pub fn clip_path(&self) -> String {
        let name = match self {
            Track::PlayerVictory => "ACaminoDeLaVereda",
            Track::RivalVictory => "ChanChan",
        };
        format!("{}{}", MUSIC, name)
    }
}

/// One music source: a clip slot and a play state
#[derive(Debug, Clone, Default)]
pub struct Jukebox {
    clip: Option<Track>,
    playing: bool,
    volume: f32,
}

impl Jukebox {
    pub fn new(volume: f32) -> Self {
        Self {
            clip: None,
            playing: false,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn has_clip(&self) -> bool {
        self.clip.is_some()
    }

    pub fn clip(&self) -> Option<Track> {
        self.clip
    }

    /// Load a clip into an empty slot. An occupied slot keeps its clip.
    pub fn set_clip(&mut self, track: Track) -> bool {
        if self.has_clip() {
            return false;
        }
        log::debug!("Loaded clip {}", track.clip_path());
        self.clip = Some(track);
        true
    }

    /// Start the clip unless it is already playing
    pub fn play(&mut self) {
        if self.playing {
            return;
        }
        if let Some(track) = self.clip {
            log::info!("Playing {} at volume {:.2}", track.clip_path(), self.volume);
            self.playing = true;
        }
    }

    pub fn stop(&mut self) {
        if self.playing {
            self.playing = false;
        }
    }

    /// Empty the slot for the next round
    pub fn reset(&mut self) {
        self.stop();
        self.clip = None;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_choice() {
        assert_eq!(Track::for_outcome(&RoundOutcome::new(1.0, 2.0)), Track::PlayerVictory);
        assert_eq!(Track::for_outcome(&RoundOutcome::new(2.0, 1.0)), Track::RivalVictory);
        // A tie is not a player victory
        assert_eq!(Track::for_outcome(&RoundOutcome::new(2.0, 2.0)), Track::RivalVictory);
        assert_eq!(Track::PlayerVictory.clip_path(), "Music/ACaminoDeLaVereda");
        assert_eq!(Track::RivalVictory.clip_path(), "Music/ChanChan");
    }

    #[test]
    fn test_jukebox_keeps_first_clip() {
        let mut jukebox = Jukebox::new(0.8);
        assert!(jukebox.set_clip(Track::RivalVictory));
        assert!(!jukebox.set_clip(Track::PlayerVictory));
        assert_eq!(jukebox.clip(), Some(Track::RivalVictory));

        jukebox.play();
        jukebox.play();
        assert!(jukebox.is_playing());

        jukebox.reset();
        assert!(!jukebox.is_playing());
        assert!(!jukebox.has_clip());
    }

    #[test]
    fn test_play_without_clip_is_silent() {
        let mut jukebox = Jukebox::default();
        jukebox.play();
        assert!(!jukebox.is_playing());
    }
}
