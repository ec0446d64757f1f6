//! End-of-round text and colors

use serde::{Deserialize, Serialize};

use crate::sim::{RoundOutcome, Side};

/// RGBA color, 0-1 per channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// From 0-255 channels, fully opaque
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }
}

pub mod palette {
    use super::Rgba;

    pub const DEFAULT_TEXT: Rgba = Rgba::from_rgb8(50, 50, 50);
    pub const PLAYER: Rgba = Rgba::from_rgb8(57, 148, 245);
    pub const PLAYER_WIN_TEXT: Rgba = Rgba::from_rgb8(74, 168, 72);
    pub const RIVAL: Rgba = Rgba::from_rgb8(255, 107, 193);
    pub const RIVAL_WIN_TEXT: Rgba = Rgba::from_rgb8(217, 53, 53);
}

pub const PLAYER_VICTORY_TEXT: &str = "Ganhou!";
pub const RIVAL_VICTORY_TEXT: &str = "Perdeu!";
pub const PLAYER_DISTANCE_LABEL: &str = "Sua Distância: ";
pub const RIVAL_DISTANCE_LABEL: &str = "Distância Rival: ";

/// Ball color for a side
pub fn side_color(side: Side) -> Rgba {
    match side {
        Side::Local => palette::PLAYER,
        Side::Opponent => palette::RIVAL,
    }
}

/// Distance as shown on the board (two decimals)
pub fn format_distance(distance: f32) -> String {
    format!("{:.2}", distance)
}

/// Filled-in end-of-round text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultBoard {
    pub headline: &'static str,
    pub headline_color: Rgba,
    pub local_label: &'static str,
    pub local_value: String,
    pub local_color: Rgba,
    pub opponent_label: &'static str,
    pub opponent_value: String,
    pub opponent_color: Rgba,
    /// Color for the labels
    pub label_color: Rgba,
}

impl ResultBoard {
    pub fn from_outcome(outcome: &RoundOutcome) -> Self {
        // Only a local win counts as a win on the board; ties read as a loss
        let won = outcome.is_victorious(Side::Local);
        Self {
            headline: if won { PLAYER_VICTORY_TEXT } else { RIVAL_VICTORY_TEXT },
            headline_color: if won {
                palette::PLAYER_WIN_TEXT
            } else {
                palette::RIVAL_WIN_TEXT
            },
            local_label: PLAYER_DISTANCE_LABEL,
            local_value: format_distance(outcome.local_distance),
            local_color: side_color(Side::Local),
            opponent_label: RIVAL_DISTANCE_LABEL,
            opponent_value: format_distance(outcome.opponent_distance),
            opponent_color: side_color(Side::Opponent),
            label_color: palette::DEFAULT_TEXT,
        }
    }
}
