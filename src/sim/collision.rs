//! Geometric wall collision
//!
//! Closed-form polar test against the rotating ring walls. This is the
//! canonical strategy: exactly reproducible, no rendering dependency. The
//! pixel strategy in [`crate::raster`] rasterizes with the same
//! classification, so the two agree up to pixel quantization.

use glam::Vec2;

use super::ring::RingWall;
use super::state::{MazeConfig, MazeState};
use crate::cartesian_to_polar;

/// Whether any ring wall covers the point.
///
/// A point is on a wall when it falls inside a ring's radial band and its
/// angle relative to that ring's rotation lands outside the gap. Points
/// beyond `maze_radius + outer_tolerance` are always clear.
pub fn wall_at(walls: &[RingWall], cfg: &MazeConfig, point: Vec2) -> bool {
    let (d, theta) = cartesian_to_polar(point);

    // Free movement outside the maze
    if d > cfg.maze_radius + cfg.outer_tolerance {
        return false;
    }

    walls
        .iter()
        .any(|wall| wall.in_band(d, cfg.wall_thickness) && !wall.in_gap(theta, cfg.gap_size))
}

/// Full collision predicate for the probe: solved sessions collide with
/// nothing (the probe must be free to leave).
pub fn point_blocked(state: &MazeState, point: Vec2) -> bool {
    if state.solved {
        return false;
    }
    wall_at(&state.walls, &state.config, point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar_to_cartesian;
    use std::f32::consts::PI;

    /// One ring at radius 100, gap starting at angle 0
    fn single_ring_state() -> MazeState {
        let mut state = MazeState::new(1);
        state.walls = vec![RingWall::new(100.0, 0.0, 0.0)];
        state
    }

    #[test]
    fn test_gap_is_passable_on_the_ring() {
        let state = single_ring_state();
        let gap = state.config.gap_size;

        // At the exact ring radius, strictly inside the gap span
        let p = polar_to_cartesian(100.0, gap / 2.0);
        assert!(!point_blocked(&state, p));

        // Same radius, outside the gap
        let p = polar_to_cartesian(100.0, gap + 0.1);
        assert!(point_blocked(&state, p));
        let p = polar_to_cartesian(100.0, PI);
        assert!(point_blocked(&state, p));
    }

    #[test]
    fn test_band_extent() {
        let state = single_ring_state();
        let half = state.config.wall_thickness / 2.0;

        // Inside the band, opposite the gap
        assert!(point_blocked(&state, polar_to_cartesian(100.0 + half - 0.5, PI)));
        assert!(point_blocked(&state, polar_to_cartesian(100.0 - half + 0.5, PI)));
        // Just beyond the band on either side
        assert!(!point_blocked(&state, polar_to_cartesian(100.0 + half + 0.5, PI)));
        assert!(!point_blocked(&state, polar_to_cartesian(100.0 - half - 0.5, PI)));
    }

    #[test]
    fn test_free_zone_outside_maze() {
        let state = MazeState::new(5);
        let cfg = &state.config;
        let r = cfg.maze_radius + cfg.outer_tolerance + 1.0;

        // Every angle is clear outside the bounding radius
        for i in 0..16 {
            let theta = i as f32 / 16.0 * std::f32::consts::TAU;
            assert!(!point_blocked(&state, polar_to_cartesian(r, theta)));
        }
    }

    #[test]
    fn test_solved_disables_collision() {
        let mut state = single_ring_state();
        let p = polar_to_cartesian(100.0, PI);
        assert!(point_blocked(&state, p));

        state.solved = true;
        assert!(!point_blocked(&state, p));
        // Wall classification itself is unaffected by solved state
        assert!(wall_at(&state.walls, &state.config, p));
    }

    #[test]
    fn test_rotated_wall_moves_gap() {
        let mut state = single_ring_state();
        state.walls[0].angle = PI;

        assert!(!point_blocked(&state, polar_to_cartesian(100.0, PI + 0.3)));
        assert!(point_blocked(&state, polar_to_cartesian(100.0, 0.3)));
    }

    #[test]
    fn test_center_is_clear() {
        let state = MazeState::new(42);
        assert!(!point_blocked(&state, Vec2::ZERO));
    }
}
