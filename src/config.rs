//! Game configuration
//!
//! Read from a `key=value&key=value` query string: the browser passes
//! `location.search`, the native demo passes its command-line arguments.

use serde::{Deserialize, Serialize};

use crate::Track;
use crate::consts::{OBSTACLE_HEIGHT, PLAYER_SIZE, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::sim::Difficulty;

/// Logical playfield size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    /// Shortest playfield that fits the player below an obstacle band
    pub const MIN_HEIGHT: f32 = PLAYER_SIZE + OBSTACLE_HEIGHT;

    /// The track is at least one player wide and the field one band plus one player tall
    pub fn fits_player(&self) -> bool {
        let track = Track::for_playfield(*self);
        let half = PLAYER_SIZE / 2.0;
        track.x_start + half <= track.x_end - half && self.height >= Self::MIN_HEIGHT
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

/// Startup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub playfield: Playfield,
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    /// Let the built-in pilot steer
    pub autopilot: bool,
    /// Length of a headless native run
    pub demo_ticks: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Low,
            playfield: Playfield::default(),
            seed: None,
            autopilot: false,
            demo_ticks: 60 * 60,
        }
    }
}

impl GameConfig {
    /// Parse a query string, keeping defaults for anything missing or invalid
    pub fn from_query(query: &str) -> Self {
        let mut config = Self::default();
        let query = query.trim_start_matches('?');

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if !config.apply(key.trim(), value.trim()) {
                log::warn!("Ignoring config entry '{}'", pair);
            }
        }
        config
    }

    /// Apply one entry; false if the key or value was not understood
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "difficulty" | "tier" => match Difficulty::from_str(value) {
                Some(d) => self.difficulty = d,
                None => return false,
            },
            "seed" => match value.parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => return false,
            },
            "autopilot" | "demo" => self.autopilot = matches!(value, "" | "1" | "true" | "on"),
            "ticks" => match value.parse() {
                Ok(ticks) => self.demo_ticks = ticks,
                Err(_) => return false,
            },
            "width" | "height" => {
                let Ok(size) = value.parse::<f32>() else {
                    return false;
                };
                let mut playfield = self.playfield;
                if key == "width" {
                    playfield.width = size;
                } else {
                    playfield.height = size;
                }
                // Anything smaller would leave the player no room to move
                if !size.is_finite() || !playfield.fits_player() {
                    return false;
                }
                self.playfield = playfield;
            }
            _ => return false,
        }
        true
    }
}
