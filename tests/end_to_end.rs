//! Whole-session scenarios driven through the public API

use gap_dash::consts::OBSTACLE_HEIGHT;
use gap_dash::persistence::MemoryStore;
use gap_dash::sim::{Difficulty, Obstacle, ObstacleKind};
use gap_dash::{GameConfig, Session};
use glam::Vec2;

fn session(difficulty: Difficulty, store: MemoryStore) -> Session<MemoryStore> {
    let config = GameConfig {
        difficulty,
        seed: Some(2024),
        ..Default::default()
    };
    Session::new(&config, 0, store)
}

/// Push a full-width wall straddling the player's row
fn drop_wall_on_player(session: &mut Session<MemoryStore>) {
    let state = session.state_mut();
    let id = state.next_entity_id();
    let wall = Obstacle {
        id,
        kind: ObstacleKind::Wall,
        pos: Vec2::new(state.track.x_start, state.player.pos.y - OBSTACLE_HEIGHT / 2.0),
        width: state.track.width(),
        height: OBSTACLE_HEIGHT,
        speed: state.speed,
        spawned_at: state.frame_count,
    };
    state.obstacles.push(wall);
}

#[test]
fn low_tier_centered_player_survives_1000_ticks() {
    let mut session = session(Difficulty::Low, MemoryStore::new());
    let center = session.state().track.center_x();
    let y = session.state().player.pos.y;
    session.set_target(center, y);

    for _ in 0..1000 {
        let outcome = session.step();
        assert!(!outcome.game_over, "collided at tick {}", session.state().frame_count);
    }

    let state = session.state();
    assert!((state.player.pos.x - center).abs() < 0.01);
    assert!(state.spawned_total >= 6, "spawned {}", state.spawned_total);
    assert_eq!(state.score, 100);
    assert!(!state.game_over);
}

#[test]
fn player_converges_from_offset_start() {
    let mut session = session(Difficulty::Low, MemoryStore::new());
    let center = session.state().track.center_x();
    let y = session.state().player.pos.y;
    session.state_mut().player.pos.x = center - 80.0;
    session.set_target(center, y);

    for _ in 0..40 {
        session.step();
    }
    assert!((session.state().player.pos.x - center).abs() < 0.1);
}

#[test]
fn high_tier_wall_over_player_ends_session() {
    let mut session = session(Difficulty::High, MemoryStore::with_score(7));
    drop_wall_on_player(&mut session);

    let outcome = session.step();
    assert!(outcome.game_over);
    assert!(outcome.collided_with.is_some());
    assert_eq!(session.high_score(), 7);
    assert_eq!(session.store().value(), Some(7));
}

#[test]
fn restart_resets_session_but_not_high_score() {
    let mut session = session(Difficulty::Medium, MemoryStore::new());
    // Nothing spawns on medium before tick 121
    for _ in 0..40 {
        session.step();
    }
    assert_eq!(session.state().score, 4);

    drop_wall_on_player(&mut session);
    let outcome = session.step();
    assert!(outcome.game_over);
    assert_eq!(session.high_score(), 4);
    assert_eq!(session.store().value(), Some(4));
    assert!(session.report().new_high_score);

    session.restart();
    let state = session.state();
    assert_eq!(state.score, 0);
    assert_eq!(state.frame_count, 0);
    assert!(state.obstacles.is_empty());
    assert!(!state.game_over);
    assert_eq!(state.speed, Difficulty::Medium.profile().initial_speed);
    assert_eq!(session.high_score(), 4);
    assert_eq!(session.store().value(), Some(4));
    assert!(!session.report().new_high_score);
}

#[test]
fn autopilot_survives_medium_tier() {
    let config = GameConfig {
        difficulty: Difficulty::Medium,
        seed: Some(11),
        autopilot: true,
        ..Default::default()
    };
    let mut session = Session::new(&config, 0, MemoryStore::new());
    for _ in 0..600 {
        session.step();
    }
    // Medium has no walls or cores, and every gap fits the player
    assert!(!session.is_game_over(), "score {}", session.state().score);
    assert_eq!(session.state().score, 60);
}

#[test]
fn difficulty_change_applies_to_next_spawn_only() {
    let mut session = session(Difficulty::Low, MemoryStore::new());
    for _ in 0..161 {
        session.step();
    }
    assert_eq!(session.state().obstacles.len(), 1);
    let first = session.state().obstacles[0].clone();

    session.set_difficulty(Difficulty::High);
    session.step();
    // Speed picks up the new ramp immediately
    assert_eq!(
        session.state().speed,
        Difficulty::High.profile().speed_at(162)
    );
    // The in-flight obstacle keeps its archetype and spawn snapshot
    let same = &session.state().obstacles[0];
    assert_eq!(same.id, first.id);
    assert_eq!(same.kind, first.kind);
    assert_eq!(same.speed, first.speed);
}
