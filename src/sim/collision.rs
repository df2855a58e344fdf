//! Collision detection between the player square and obstacle shapes
//!
//! Every check starts with an axis-aligned box rejection. Overlapping boxes
//! are then resolved per archetype: a gap is only safe when the player's box
//! sits entirely inside it, so clipping a gap edge is lethal.

use glam::Vec2;

use super::difficulty::DifficultyProfile;
use super::state::{Obstacle, ObstacleKind, Player};
use crate::consts::{NARROW_GAP_RATIO, SPIN_BAR_RATIO};
use crate::to_local_frame;

/// Strict overlap of two (min, max) boxes; touching edges do not overlap
#[inline]
pub fn boxes_overlap(a: (Vec2, Vec2), b: (Vec2, Vec2)) -> bool {
    a.0.x < b.1.x && a.1.x > b.0.x && a.0.y < b.1.y && a.1.y > b.0.y
}

/// Horizontal extent of a gap of `ratio * width` centered on `center_x`
#[inline]
pub fn centered_gap(center_x: f32, width: f32, ratio: f32) -> (f32, f32) {
    let half = ratio * width / 2.0;
    (center_x - half, center_x + half)
}

/// True when the player's box lies fully within `[gap.0, gap.1]`
#[inline]
fn inside_gap(player: &Player, gap: (f32, f32)) -> bool {
    let (min, max) = player.bounds();
    min.x >= gap.0 && max.x <= gap.1
}

/// Rotated cross test: is `point` on either bar?
pub fn point_in_cross(point: Vec2, center: Vec2, arm: f32, bar: f32, rotation: f32) -> bool {
    let local = to_local_frame(point, center, rotation);
    let (ax, ay) = (local.x.abs(), local.y.abs());
    let half_bar = bar / 2.0;
    (ax <= arm && ay <= half_bar) || (ax <= half_bar && ay <= arm)
}

/// Check the player against one obstacle
///
/// `profile` is the session's current tuning; fixed and moving gaps are
/// sized from its maximum gap ratio.
pub fn player_hits_obstacle(player: &Player, obstacle: &Obstacle, profile: &DifficultyProfile) -> bool {
    if !boxes_overlap(player.bounds(), obstacle.bounds()) {
        return false;
    }

    let center = obstacle.center();
    match obstacle.kind {
        ObstacleKind::FixedGap { .. } | ObstacleKind::MovingGap { .. } => {
            let gap = centered_gap(center.x, obstacle.width, profile.max_gap_ratio);
            !inside_gap(player, gap)
        }
        ObstacleKind::NarrowGap => {
            let gap = centered_gap(center.x, obstacle.width, NARROW_GAP_RATIO);
            !inside_gap(player, gap)
        }
        ObstacleKind::SpinningCore { rotation } => {
            let arm = obstacle.width / 2.0;
            let bar = obstacle.width * SPIN_BAR_RATIO;
            point_in_cross(player.pos, center, arm, bar, rotation)
        }
        ObstacleKind::Wall => true,
    }
}

/// First obstacle the player collides with, if any
pub fn first_collision<'a>(
    player: &Player,
    obstacles: &'a [Obstacle],
    profile: &DifficultyProfile,
) -> Option<&'a Obstacle> {
    obstacles
        .iter()
        .find(|o| player_hits_obstacle(player, o, profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::OBSTACLE_HEIGHT;
    use crate::sim::Difficulty;
    use std::f32::consts::FRAC_PI_4;

    const TRACK_X: f32 = 80.0;
    const TRACK_W: f32 = 240.0;

    fn player_at(x: f32, y: f32) -> Player {
        Player {
            pos: Vec2::new(x, y),
            target: Vec2::new(x, y),
            size: 20.0,
        }
    }

    fn obstacle(kind: ObstacleKind, y: f32) -> Obstacle {
        Obstacle {
            id: 1,
            kind,
            pos: Vec2::new(TRACK_X, y),
            width: TRACK_W,
            height: OBSTACLE_HEIGHT,
            speed: 3.0,
            spawned_at: 0,
        }
    }

    #[test]
    fn test_no_overlap_no_collision() {
        let profile = Difficulty::High.profile();
        let wall = obstacle(ObstacleKind::Wall, 0.0);
        // Player well below the band
        assert!(!player_hits_obstacle(&player_at(200.0, 300.0), &wall, &profile));
        // Touching edges is not an overlap
        assert!(!player_hits_obstacle(&player_at(200.0, 40.0), &wall, &profile));
    }

    #[test]
    fn test_wall_any_overlap_collides() {
        let profile = Difficulty::High.profile();
        let wall = obstacle(ObstacleKind::Wall, 0.0);
        assert!(player_hits_obstacle(&player_at(200.0, 15.0), &wall, &profile));
        // Barely clipping the bottom edge
        assert!(player_hits_obstacle(&player_at(200.0, 39.0), &wall, &profile));
    }

    #[test]
    fn test_fixed_gap_containment() {
        let profile = Difficulty::Low.profile(); // max ratio 0.5 -> gap [140, 260]
        let band = obstacle(ObstacleKind::FixedGap { sampled_gap: 90.0 }, 0.0);
        assert!(!player_hits_obstacle(&player_at(200.0, 15.0), &band, &profile));
        // Box [140, 160] sits exactly on the gap edge: still inside
        assert!(!player_hits_obstacle(&player_at(150.0, 15.0), &band, &profile));
        // Box [139, 159] straddles the edge by one unit
        assert!(player_hits_obstacle(&player_at(149.0, 15.0), &band, &profile));
    }

    #[test]
    fn test_fixed_gap_ignores_sampled_width() {
        // The factory samples a width, but collision uses the profile's max ratio.
        // A 30px sampled gap would reject this player; the 120px profile gap admits it.
        let profile = Difficulty::Low.profile();
        let band = obstacle(ObstacleKind::FixedGap { sampled_gap: 30.0 }, 0.0);
        assert!(!player_hits_obstacle(&player_at(230.0, 15.0), &band, &profile));
    }

    #[test]
    fn test_narrow_gap_too_small_for_player() {
        // 10% of 240 = 24px gap, player is 20px wide
        let profile = Difficulty::Medium.profile();
        let band = obstacle(ObstacleKind::NarrowGap, 0.0);
        assert!(!player_hits_obstacle(&player_at(200.0, 15.0), &band, &profile));
        assert!(player_hits_obstacle(&player_at(203.0, 15.0), &band, &profile));
    }

    #[test]
    fn test_moving_gap_follows_band_position() {
        let profile = Difficulty::Medium.profile(); // max ratio 0.4 -> 96px gap
        let mut band = obstacle(
            ObstacleKind::MovingGap {
                amplitude: 48.0,
                frequency: 0.03,
            },
            0.0,
        );
        band.pos.x = TRACK_X + 40.0; // band centre at 240
        assert!(!player_hits_obstacle(&player_at(240.0, 15.0), &band, &profile));
        // The old centre is now outside the shifted gap [192, 288]
        assert!(player_hits_obstacle(&player_at(190.0, 15.0), &band, &profile));
    }

    #[test]
    fn test_spinning_core_uses_player_center() {
        let profile = Difficulty::High.profile();
        let core = obstacle(ObstacleKind::SpinningCore { rotation: 0.0 }, 0.0);
        // Centre (200, 15); horizontal bar spans the full width at rotation 0
        assert!(player_hits_obstacle(&player_at(100.0, 15.0), &core, &profile));

        // Turned 45°, a point left of centre on the band's midline is between arms
        let core = obstacle(ObstacleKind::SpinningCore { rotation: FRAC_PI_4 }, 0.0);
        assert!(!player_hits_obstacle(&player_at(120.0, 15.0), &core, &profile));
        // The centre itself is always on the cross
        assert!(player_hits_obstacle(&player_at(200.0, 15.0), &core, &profile));
    }

    #[test]
    fn test_point_in_cross_vertical_bar() {
        // Unrotated cross: vertical bar is 48 wide, 240 tall
        let c = Vec2::ZERO;
        assert!(point_in_cross(Vec2::new(0.0, 100.0), c, 120.0, 48.0, 0.0));
        assert!(!point_in_cross(Vec2::new(30.0, 100.0), c, 120.0, 48.0, 0.0));
    }

    #[test]
    fn test_first_collision_picks_lethal_obstacle() {
        let profile = Difficulty::High.profile();
        let mut safe = obstacle(ObstacleKind::FixedGap { sampled_gap: 60.0 }, 0.0);
        safe.id = 1;
        let mut lethal = obstacle(ObstacleKind::Wall, 0.0);
        lethal.id = 2;
        let list = [safe, lethal];
        let hit = first_collision(&player_at(200.0, 15.0), &list, &profile);
        assert_eq!(hit.map(|o| o.id), Some(2));
    }
}
