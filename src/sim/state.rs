//! Game state and core simulation types
//!
//! Everything a session mutates lives here. The high score is the only value
//! that survives a restart.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, DifficultyProfile};
use crate::config::Playfield;
use crate::consts::*;
use crate::Track;

/// The player's marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Centre of the square
    pub pos: Vec2,
    /// Where input wants the centre to be
    pub target: Vec2,
    /// Side length
    pub size: f32,
}

impl Player {
    /// Spawn at track centre, near the bottom
    pub fn spawn(track: &Track) -> Self {
        let pos = Vec2::new(
            track.center_x(),
            track.height - PLAYER_SIZE * PLAYER_BOTTOM_OFFSET,
        );
        Self {
            pos,
            target: pos,
            size: PLAYER_SIZE,
        }
    }

    #[inline]
    pub fn half(&self) -> f32 {
        self.size / 2.0
    }

    /// Bounding box as (min, max) corners
    #[inline]
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let h = Vec2::splat(self.half());
        (self.pos - h, self.pos + h)
    }

    /// Ease toward the target and keep the square inside the track
    pub fn move_toward_target(&mut self, track: &Track) {
        self.pos += (self.target - self.pos) * PLAYER_SMOOTHING;
        self.pos.x = track.clamp_x(self.pos.x, self.half());
        self.pos.y = self.pos.y.clamp(self.half(), track.height - self.half());
    }
}

/// Obstacle archetypes, each carrying only the state its shape needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Archetype 1: centered gap
    FixedGap {
        /// Width drawn by the factory. Collision sizes the gap from the
        /// profile's maximum ratio instead.
        sampled_gap: f32,
    },
    /// Archetype 2: centered gap at `NARROW_GAP_RATIO` of the width
    NarrowGap,
    /// Archetype 3: the whole band slides sideways on a sinusoid
    MovingGap { amplitude: f32, frequency: f32 },
    /// Archetype 4: rotating cross
    SpinningCore { rotation: f32 },
    /// Archetype 5: no safe region
    Wall,
}

impl ObstacleKind {
    /// 1-based archetype number
    pub fn archetype(&self) -> u8 {
        match self {
            ObstacleKind::FixedGap { .. } => 1,
            ObstacleKind::NarrowGap => 2,
            ObstacleKind::MovingGap { .. } => 3,
            ObstacleKind::SpinningCore { .. } => 4,
            ObstacleKind::Wall => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ObstacleKind::FixedGap { .. } => "fixed-gap",
            ObstacleKind::NarrowGap => "narrow-gap",
            ObstacleKind::MovingGap { .. } => "moving-gap",
            ObstacleKind::SpinningCore { .. } => "spinning-core",
            ObstacleKind::Wall => "wall",
        }
    }
}

/// A scrolling obstacle band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner; x is the track's left edge unless the band oscillates
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Scroll speed when spawned
    pub speed: f32,
    /// Tick the obstacle was spawned on
    pub spawned_at: u64,
}

impl Obstacle {
    #[inline]
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.pos, self.pos + Vec2::new(self.width, self.height))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) / 2.0
    }

    /// True once the top edge has scrolled past the bottom of the playfield
    #[inline]
    pub fn is_off_screen(&self, track: &Track) -> bool {
        self.pos.y > track.height
    }

    /// Advance one tick at the session's current scroll speed
    pub fn advance(&mut self, speed: f32, frame_count: u64, track: &Track) {
        match &mut self.kind {
            ObstacleKind::Wall => {
                self.pos.y += speed * WALL_SPEED_FACTOR;
            }
            ObstacleKind::MovingGap {
                amplitude,
                frequency,
            } => {
                self.pos.y += speed;
                self.pos.x = moving_gap_x(track, *amplitude, *frequency, frame_count);
            }
            ObstacleKind::SpinningCore { rotation } => {
                self.pos.y += speed;
                *rotation += SPIN_STEP;
            }
            ObstacleKind::FixedGap { .. } | ObstacleKind::NarrowGap => {
                self.pos.y += speed;
            }
        }
    }
}

/// Left edge of an oscillating band so its centre swings about the track centre
#[inline]
pub fn moving_gap_x(track: &Track, amplitude: f32, frequency: f32, frame_count: u64) -> f32 {
    track.x_start + amplitude * (frame_count as f32 * frequency).sin()
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub track: Track,
    pub difficulty: Difficulty,
    pub profile: DifficultyProfile,
    /// Ticks since (re)start
    pub frame_count: u64,
    /// Current scroll speed (pixels/tick)
    pub speed: f32,
    /// Tick of the most recent spawn
    pub last_spawn_tick: u64,
    pub score: u64,
    pub game_over: bool,
    /// Best score across all finished sessions
    pub high_score: u64,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Obstacles created this session
    pub spawned_total: u32,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, playfield: Playfield, difficulty: Difficulty) -> Self {
        let track = Track::for_playfield(playfield);
        let profile = difficulty.profile();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            track,
            difficulty,
            profile,
            frame_count: 0,
            speed: profile.initial_speed,
            last_spawn_tick: 0,
            score: 0,
            game_over: false,
            high_score: 0,
            player: Player::spawn(&track),
            obstacles: Vec::new(),
            spawned_total: 0,
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Switch tier; in-flight obstacles are left untouched
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.profile = difficulty.profile();
    }

    /// Set where input wants the player to go (track-local playfield coordinates)
    pub fn set_target(&mut self, target: Vec2) {
        self.player.target = target;
    }

    /// Full reset of per-session state. Keeps tier, RNG stream and high score.
    pub fn restart(&mut self) {
        self.frame_count = 0;
        self.speed = self.profile.initial_speed;
        self.last_spawn_tick = 0;
        self.score = 0;
        self.game_over = false;
        self.player = Player::spawn(&self.track);
        self.obstacles.clear();
        self.spawned_total = 0;
    }

    /// Mark the session finished and fold the score into the high score
    pub fn end_session(&mut self) {
        self.game_over = true;
        self.high_score = self.high_score.max(self.score);
    }
}
