//! Gap Dash - A reflex arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, kinematics, collisions, scoring)
//! - `session`: Drives the simulation from a fixed-step clock, owns the high score store
//! - `platform`: Browser/native platform abstraction (time, storage)
//! - `persistence`: High score store port
//! - `config`: Difficulty / playfield / seed selection
//! - `renderer`: Canvas 2D presentation (wasm only)

pub mod config;
pub mod persistence;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod session;
pub mod sim;

pub use config::{GameConfig, Playfield};
pub use session::{FrameReport, Session};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f64 = 1.0 / TICKS_PER_SECOND as f64;
    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default playfield size (logical pixels)
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Fraction of the playfield width covered by the track
    pub const TRACK_WIDTH_RATIO: f32 = 0.6;

    /// Player square side length
    pub const PLAYER_SIZE: f32 = 20.0;
    /// Distance of the player centre above the bottom edge, in player sizes
    pub const PLAYER_BOTTOM_OFFSET: f32 = 3.0;
    /// Fraction of the remaining distance to the target covered each tick
    pub const PLAYER_SMOOTHING: f32 = 0.25;

    /// Obstacle band height
    pub const OBSTACLE_HEIGHT: f32 = 30.0;
    /// Narrow gap width as a fraction of obstacle width
    pub const NARROW_GAP_RATIO: f32 = 0.1;
    /// Moving gap oscillation amplitude as a fraction of track width
    pub const MOVING_GAP_AMPLITUDE_RATIO: f32 = 0.2;
    /// Moving gap angular frequency range (radians/tick)
    pub const MOVING_GAP_MIN_FREQUENCY: f32 = 0.02;
    pub const MOVING_GAP_MAX_FREQUENCY: f32 = 0.05;
    /// Spinning core rotation per tick (radians)
    pub const SPIN_STEP: f32 = 0.07;
    /// Spinning core bar thickness as a fraction of obstacle width
    pub const SPIN_BAR_RATIO: f32 = 0.2;
    /// Full walls scroll faster than the current speed
    pub const WALL_SPEED_FACTOR: f32 = 2.5;

    /// Score is awarded once every this many ticks
    pub const SCORE_INTERVAL_TICKS: u64 = 10;
}

/// The vertical strip the player and obstacles live in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    /// Left edge (playfield x)
    pub x_start: f32,
    /// Right edge (playfield x)
    pub x_end: f32,
    /// Full playfield height
    pub height: f32,
}

impl Track {
    /// Centered strip covering `TRACK_WIDTH_RATIO` of the playfield width
    pub fn for_playfield(playfield: Playfield) -> Self {
        let width = playfield.width * consts::TRACK_WIDTH_RATIO;
        let x_start = (playfield.width - width) / 2.0;
        Self {
            x_start,
            x_end: x_start + width,
            height: playfield.height,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x_end - self.x_start
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.x_start + self.x_end) / 2.0
    }

    /// Clamp a horizontal centre so a body of `half` half-width stays inside
    #[inline]
    pub fn clamp_x(&self, x: f32, half: f32) -> f32 {
        x.clamp(self.x_start + half, self.x_end - half)
    }
}

/// Rotate a point into a frame rotated by `angle` about `origin`
#[inline]
pub fn to_local_frame(point: Vec2, origin: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(-angle).rotate(point - origin)
}
