//! Obstacle factory
//!
//! Archetypes are unlocked by the profile's `max_complexity`; low tiers only
//! ever see centered gaps.

use glam::Vec2;
use rand::Rng;

use super::difficulty::DifficultyProfile;
use super::state::{GameState, Obstacle, ObstacleKind, moving_gap_x};
use crate::consts::*;
use crate::Track;

/// Build a new obstacle entering at the top of the track
pub fn spawn<R: Rng>(
    rng: &mut R,
    id: u32,
    track: &Track,
    current_speed: f32,
    profile: &DifficultyProfile,
    tick_count: u64,
) -> Obstacle {
    let max_archetype = profile.max_complexity.clamp(1, 5);
    let archetype = rng.random_range(1..=max_archetype);
    let width = track.width();

    let kind = match archetype {
        1 => {
            let ratio = rng.random_range(profile.min_gap_ratio..=profile.max_gap_ratio);
            ObstacleKind::FixedGap {
                sampled_gap: ratio * width,
            }
        }
        2 => ObstacleKind::NarrowGap,
        3 => ObstacleKind::MovingGap {
            amplitude: MOVING_GAP_AMPLITUDE_RATIO * width,
            frequency: rng.random_range(MOVING_GAP_MIN_FREQUENCY..=MOVING_GAP_MAX_FREQUENCY),
        },
        4 => ObstacleKind::SpinningCore { rotation: 0.0 },
        _ => ObstacleKind::Wall,
    };

    // Oscillating bands enter already in phase with the tick counter
    let x = match kind {
        ObstacleKind::MovingGap {
            amplitude,
            frequency,
        } => moving_gap_x(track, amplitude, frequency, tick_count),
        _ => track.x_start,
    };

    Obstacle {
        id,
        kind,
        pos: Vec2::new(x, -OBSTACLE_HEIGHT),
        width,
        height: OBSTACLE_HEIGHT,
        speed: current_speed,
        spawned_at: tick_count,
    }
}

/// Spawn the next obstacle into the session and restart the spawn timer
pub fn spawn_into(state: &mut GameState) {
    let id = state.next_entity_id();
    let track = state.track;
    let profile = state.profile;
    let speed = state.speed;
    let tick = state.frame_count;
    let obstacle = spawn(state.rng_mut(), id, &track, speed, &profile, tick);

    log::debug!(
        "Spawned obstacle {} ({}) at tick {}, speed {:.2}",
        obstacle.id,
        obstacle.kind.name(),
        tick,
        speed
    );

    state.obstacles.push(obstacle);
    state.spawned_total += 1;
    state.last_spawn_tick = tick;
}

/// True when enough ticks have passed since the last spawn
#[inline]
pub fn spawn_due(state: &GameState) -> bool {
    state.frame_count.saturating_sub(state.last_spawn_tick) > state.profile.spawn_interval
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Playfield;
    use crate::sim::Difficulty;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn track() -> Track {
        Track::for_playfield(Playfield::default())
    }

    #[test]
    fn test_low_tier_only_fixed_gaps() {
        let mut rng = Pcg32::seed_from_u64(1);
        let profile = Difficulty::Low.profile();
        let track = track();
        for i in 0..200 {
            let o = spawn(&mut rng, i, &track, 3.0, &profile, 0);
            match o.kind {
                ObstacleKind::FixedGap { sampled_gap } => {
                    assert!(sampled_gap >= profile.min_gap_ratio * track.width() - 1e-3);
                    assert!(sampled_gap <= profile.max_gap_ratio * track.width() + 1e-3);
                }
                other => panic!("unexpected archetype {:?}", other),
            }
        }
    }

    #[test]
    fn test_high_tier_unlocks_all_archetypes() {
        let mut rng = Pcg32::seed_from_u64(2);
        let profile = Difficulty::High.profile();
        let track = track();
        let mut seen = [false; 5];
        for i in 0..500 {
            let o = spawn(&mut rng, i, &track, 5.0, &profile, i as u64);
            seen[(o.kind.archetype() - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "seen: {:?}", seen);
    }

    #[test]
    fn test_spawn_enters_above_track() {
        let mut rng = Pcg32::seed_from_u64(3);
        let track = track();
        let o = spawn(&mut rng, 9, &track, 4.5, &Difficulty::Low.profile(), 17);
        assert_eq!(o.id, 9);
        assert_eq!(o.pos, Vec2::new(track.x_start, -OBSTACLE_HEIGHT));
        assert_eq!(o.width, track.width());
        assert_eq!(o.speed, 4.5);
        assert_eq!(o.spawned_at, 17);
    }

    #[test]
    fn test_moving_gap_parameters() {
        let mut rng = Pcg32::seed_from_u64(4);
        let profile = Difficulty::Medium.profile();
        let track = track();
        let mut found = false;
        for i in 0..300 {
            let o = spawn(&mut rng, i, &track, 4.0, &profile, 0);
            if let ObstacleKind::MovingGap {
                amplitude,
                frequency,
            } = o.kind
            {
                assert!((amplitude - 0.2 * track.width()).abs() < 1e-3);
                assert!((MOVING_GAP_MIN_FREQUENCY..=MOVING_GAP_MAX_FREQUENCY).contains(&frequency));
                // Tick 0 is phase 0: band starts at the track edge
                assert!((o.pos.x - track.x_start).abs() < 1e-3);
                found = true;
            }
            if let ObstacleKind::SpinningCore { .. } | ObstacleKind::Wall = o.kind {
                panic!("medium tier spawned {}", o.kind.name());
            }
        }
        assert!(found);
    }

    #[test]
    fn test_spawn_into_resets_timer() {
        let mut state = GameState::new(5, Playfield::default(), Difficulty::Low);
        state.frame_count = 161;
        assert!(spawn_due(&state));
        spawn_into(&mut state);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.spawned_total, 1);
        assert_eq!(state.last_spawn_tick, 161);
        assert!(!spawn_due(&state));
    }

    #[test]
    fn test_spawn_due_is_strict() {
        let mut state = GameState::new(5, Playfield::default(), Difficulty::Low);
        state.frame_count = 160;
        assert!(!spawn_due(&state));
        state.frame_count = 161;
        assert!(spawn_due(&state));
    }
}
