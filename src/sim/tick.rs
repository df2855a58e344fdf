//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session by one step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::first_collision;
use super::spawn::{spawn_due, spawn_into};
use super::state::{GameState, ObstacleKind};
use crate::consts::SCORE_INTERVAL_TICKS;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest pointer/touch position in playfield coordinates
    pub target: Option<Vec2>,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TickOutcome {
    pub score: u64,
    pub game_over: bool,
    /// Obstacle that ended the session on this tick
    pub collided_with: Option<u32>,
    /// Obstacle spawned on this tick
    pub spawned: Option<u32>,
}

impl TickOutcome {
    fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            game_over: state.game_over,
            ..Default::default()
        }
    }
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    // Halted until restart
    if state.game_over {
        return TickOutcome::from_state(state);
    }

    if let Some(target) = input.target {
        state.set_target(target);
    }

    state.frame_count += 1;
    state.speed = state.profile.speed_at(state.frame_count);

    state.player.move_toward_target(&state.track);

    let mut spawned = None;
    if spawn_due(state) {
        spawn_into(state);
        spawned = state.obstacles.last().map(|o| o.id);
    }

    let track = state.track;
    state.obstacles.retain(|o| !o.is_off_screen(&track));

    let (speed, frame_count) = (state.speed, state.frame_count);
    for obstacle in &mut state.obstacles {
        obstacle.advance(speed, frame_count, &track);
    }

    if let Some(hit) = first_collision(&state.player, &state.obstacles, &state.profile) {
        let hit_id = hit.id;
        log::info!(
            "Game over at tick {}: hit {} obstacle {}, score {}",
            state.frame_count,
            hit.kind.name(),
            hit_id,
            state.score
        );
        state.end_session();
        return TickOutcome {
            collided_with: Some(hit_id),
            spawned,
            ..TickOutcome::from_state(state)
        };
    }

    if state.frame_count % SCORE_INTERVAL_TICKS == 0 {
        state.score += 1;
    }

    TickOutcome {
        spawned,
        ..TickOutcome::from_state(state)
    }
}

/// Pick a target that steers through the nearest obstacle still ahead
///
/// Best effort: walls have no safe region, and spinning cores are dodged by
/// hugging a track edge.
pub fn autopilot_target(state: &GameState) -> Vec2 {
    let player = &state.player;
    let track = &state.track;
    let player_top = player.pos.y - player.half();

    let ahead = state
        .obstacles
        .iter()
        .filter(|o| o.pos.y < player_top + player.size)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let x = match ahead {
        Some(o) => match o.kind {
            ObstacleKind::FixedGap { .. }
            | ObstacleKind::NarrowGap
            | ObstacleKind::MovingGap { .. } => o.center().x,
            ObstacleKind::SpinningCore { .. } => {
                if o.id % 2 == 0 {
                    track.x_start
                } else {
                    track.x_end
                }
            }
            ObstacleKind::Wall => track.center_x(),
        },
        None => track.center_x(),
    };

    Vec2::new(track.clamp_x(x, player.half()), player.pos.y)
}
