//! Difficulty tiers and their tuning table
//!
//! Profiles are immutable. Switching tiers mid-session only affects the
//! speed ramp and obstacles spawned afterwards.

use serde::{Deserialize, Serialize};

/// Difficulty tier selected by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Low,
    Medium,
    High,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Low, Difficulty::Medium, Difficulty::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Low => "low",
            Difficulty::Medium => "medium",
            Difficulty::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "easy" => Some(Difficulty::Low),
            "medium" | "med" | "normal" => Some(Difficulty::Medium),
            "high" | "hard" => Some(Difficulty::High),
            _ => None,
        }
    }

    /// Tuning table for this tier
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Low => DifficultyProfile {
                initial_speed: 3.0,
                score_multiplier: 0.001,
                spawn_interval: 160,
                min_gap_ratio: 0.35,
                max_gap_ratio: 0.5,
                max_complexity: 1,
            },
            Difficulty::Medium => DifficultyProfile {
                initial_speed: 4.0,
                score_multiplier: 0.002,
                spawn_interval: 120,
                min_gap_ratio: 0.25,
                max_gap_ratio: 0.4,
                max_complexity: 3,
            },
            Difficulty::High => DifficultyProfile {
                initial_speed: 5.0,
                score_multiplier: 0.003,
                spawn_interval: 90,
                min_gap_ratio: 0.2,
                max_gap_ratio: 0.3,
                max_complexity: 5,
            },
        }
    }
}

/// Per-tier tuning parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Scroll speed at tick 0 (pixels/tick)
    pub initial_speed: f32,
    /// Speed gained per elapsed tick
    pub score_multiplier: f32,
    /// Ticks that must pass before the next spawn
    pub spawn_interval: u64,
    /// Sampled gap width bounds, as fractions of track width
    pub min_gap_ratio: f32,
    pub max_gap_ratio: f32,
    /// Highest obstacle archetype this tier may spawn (1..=5)
    pub max_complexity: u8,
}

impl DifficultyProfile {
    /// Scroll speed after `frame_count` ticks
    #[inline]
    pub fn speed_at(&self, frame_count: u64) -> f32 {
        self.initial_speed + frame_count as f32 * self.score_multiplier
    }
}
