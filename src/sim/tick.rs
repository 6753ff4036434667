//! Maze simulation tick
//!
//! One tick advances wall rotation, moves the probe toward its target in
//! unit sub-steps, and runs the solved/unsolved transition. The host calls
//! this at a fixed cadence; nothing here depends on wall-clock time.

use glam::Vec2;

use super::collision;
use super::state::{CollisionMode, MazeEvent, MazeState, WinPolicy};
use crate::raster::MazeRaster;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Desired probe destination (pointer position in maze coordinates)
    pub target: Option<Vec2>,
}

/// Per-tick output for the presentation layer
#[derive(Debug, Clone, Copy)]
pub struct TickOutput {
    pub probe: Vec2,
    pub solved: bool,
    pub event: Option<MazeEvent>,
}

/// Advance the maze by one tick.
///
/// `raster` is redrawn from the rotated walls before any movement, so that
/// pixel-sampled collision reads this tick's rendering, never the previous
/// one. Callers running headless pass `None`; with `CollisionMode::
/// PixelSampled` and no raster the geometric predicate stands in (the two
/// strategies classify identically).
pub fn tick(
    state: &mut MazeState,
    input: &TickInput,
    raster: Option<&mut MazeRaster>,
) -> TickOutput {
    state.time_ticks += 1;

    // Walls freeze while solved
    if !state.solved {
        for wall in &mut state.walls {
            wall.rotate();
        }
    }

    let raster: Option<&MazeRaster> = match raster {
        Some(r) => {
            r.redraw(&state.walls, &state.config);
            Some(r)
        }
        None => None,
    };
    let use_pixels = state.config.collision == CollisionMode::PixelSampled;

    if let Some(target) = input.target {
        let cfg = &state.config;
        let pos = state.probe.pos;
        state.probe.pos = if state.solved {
            // Collision is off while solved; the probe roams freely
            step_toward(pos, target, cfg.max_probe_speed, |_| false)
        } else if let (true, Some(r)) = (use_pixels, raster) {
            step_toward(pos, target, cfg.max_probe_speed, |p| r.sample(p))
        } else {
            step_toward(pos, target, cfg.max_probe_speed, |p| {
                collision::wall_at(&state.walls, cfg, p)
            })
        };
    }

    let event = transition(state);

    TickOutput {
        probe: state.probe.pos,
        solved: state.solved,
        event,
    }
}

/// Move from `from` toward `target`, at most `max_speed` total, committing
/// one unit at a time and halting at the last clear position before the
/// first blocked candidate. The probe never slides or deflects.
pub fn step_toward<F>(from: Vec2, target: Vec2, max_speed: f32, is_blocked: F) -> Vec2
where
    F: Fn(Vec2) -> bool,
{
    let delta = target - from;
    let dist = delta.length();
    // Dead zone against rest jitter; also guards the zero-vector normalize
    if dist < 1.0 {
        return from;
    }

    let move_dist = dist.min(max_speed);
    let dir = delta / dist;

    let mut pos = from;
    let mut traveled = 0.0;
    while traveled < move_dist {
        // Final step is the exact fractional remainder
        let step = (move_dist - traveled).min(1.0);
        let next = pos + dir * step;
        if is_blocked(next) {
            break;
        }
        pos = next;
        traveled += step;
    }
    pos
}

/// Solved/unsolved state machine, evaluated after movement
fn transition(state: &mut MazeState) -> Option<MazeEvent> {
    let d = state.distance_to_center();
    let cfg = &state.config;

    if !state.solved && d < cfg.win_radius {
        state.solved = true;
        return Some(MazeEvent::Solved);
    }

    if state.solved
        && cfg.win_policy == WinPolicy::Rearm
        && d > cfg.maze_radius + cfg.rearm_margin
    {
        state.solved = false;
        return Some(MazeEvent::Rearmed);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar_to_cartesian;
    use crate::sim::ring::RingWall;
    use crate::sim::state::MazeConfig;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    /// Maze with a single static ring at radius 100, gap at angle 0
    fn single_ring_state() -> MazeState {
        let mut state = MazeState::new(1);
        state.walls = vec![RingWall::new(100.0, 0.0, 0.0)];
        state
    }

    fn drive(state: &mut MazeState, target: Vec2, ticks: u32) -> Vec<MazeEvent> {
        let input = TickInput {
            target: Some(target),
        };
        (0..ticks)
            .filter_map(|_| tick(state, &input, None).event)
            .collect()
    }

    #[test]
    fn test_probe_passes_through_gap_center() {
        let mut state = single_ring_state();
        // Approach from outside straight along the gap's center angle
        let gap_mid = state.config.gap_size / 2.0;
        state.probe.pos = polar_to_cartesian(150.0, gap_mid);

        let events = drive(&mut state, Vec2::ZERO, 10);
        assert!(state.distance_to_center() < 100.0);
        assert!(state.solved);
        assert_eq!(events, vec![MazeEvent::Solved]);
    }

    #[test]
    fn test_probe_halts_on_wall() {
        let mut state = single_ring_state();
        // Approach opposite the gap
        state.probe.pos = polar_to_cartesian(150.0, PI);

        drive(&mut state, Vec2::ZERO, 10);
        // Outer band edge is 100 + thickness/2 = 107
        assert!((state.distance_to_center() - 107.0).abs() < 1.0);
        assert!(!state.solved);
    }

    #[test]
    fn test_solved_on_exact_tick() {
        let mut state = MazeState::new(3);
        state.walls.clear();
        state.probe.pos = Vec2::new(0.0, 40.0);

        let input = TickInput {
            target: Some(Vec2::ZERO),
        };
        let out = tick(&mut state, &input, None);
        assert_eq!(state.distance_to_center(), 20.0);
        assert!(!out.solved);
        assert!(out.event.is_none());

        let out = tick(&mut state, &input, None);
        assert!(out.solved);
        assert_eq!(out.event, Some(MazeEvent::Solved));
    }

    #[test]
    fn test_rearm_only_beyond_margin() {
        let mut state = MazeState::new(4);
        state.walls.clear();
        state.probe.pos = Vec2::new(0.0, 10.0);

        // Solve
        let out = tick(&mut state, &TickInput { target: None }, None);
        assert_eq!(out.event, Some(MazeEvent::Solved));

        // Head straight out; solved must hold until past radius + margin
        let exit = Vec2::new(0.0, 400.0);
        let boundary = state.config.maze_radius + state.config.rearm_margin;
        let input = TickInput { target: Some(exit) };
        loop {
            let out = tick(&mut state, &input, None);
            if state.distance_to_center() <= boundary {
                assert!(out.solved);
                assert!(out.event.is_none());
            } else {
                assert!(!out.solved);
                assert_eq!(out.event, Some(MazeEvent::Rearmed));
                break;
            }
        }
    }

    #[test]
    fn test_one_shot_is_terminal() {
        let mut config = MazeConfig::default();
        config.win_policy = WinPolicy::OneShot;
        let mut state = MazeState::with_config(5, config);
        state.walls.clear();
        state.probe.pos = Vec2::new(0.0, 10.0);

        let out = tick(&mut state, &TickInput { target: None }, None);
        assert_eq!(out.event, Some(MazeEvent::Solved));

        let events = drive(&mut state, Vec2::new(0.0, 400.0), 40);
        assert!(state.distance_to_center() > state.config.maze_radius + state.config.rearm_margin);
        assert!(state.solved);
        assert!(events.is_empty());
    }

    #[test]
    fn test_tick_idempotent_at_rest() {
        let mut state = MazeState::new(6);
        let rest = state.probe.pos;

        let input = TickInput { target: Some(rest) };
        for _ in 0..30 {
            let out = tick(&mut state, &input, None);
            assert_eq!(state.probe.pos, rest);
            assert!(out.event.is_none());
        }
        // Walls keep rotating regardless
        let fresh = MazeState::new(6);
        assert!(state.walls[0].angle != fresh.walls[0].angle);
    }

    #[test]
    fn test_walls_freeze_while_solved() {
        let mut state = MazeState::new(7);
        state.probe.pos = Vec2::new(0.0, 5.0);
        tick(&mut state, &TickInput::default(), None);
        assert!(state.solved);

        let angles: Vec<f32> = state.walls.iter().map(|w| w.angle).collect();
        tick(&mut state, &TickInput::default(), None);
        let after: Vec<f32> = state.walls.iter().map(|w| w.angle).collect();
        assert_eq!(angles, after);
    }

    #[test]
    fn test_determinism() {
        let mut a = MazeState::new(99999);
        let mut b = MazeState::new(99999);

        let targets = [
            Vec2::new(0.0, 120.0),
            Vec2::new(-80.0, 30.0),
            Vec2::new(50.0, -200.0),
            Vec2::ZERO,
        ];
        for target in targets {
            for _ in 0..20 {
                let input = TickInput {
                    target: Some(target),
                };
                tick(&mut a, &input, None);
                tick(&mut b, &input, None);
            }
        }

        assert_eq!(a.probe.pos, b.probe.pos);
        assert_eq!(a.solved, b.solved);
        for (wa, wb) in a.walls.iter().zip(&b.walls) {
            assert_eq!(wa.angle, wb.angle);
        }
    }

    proptest! {
        /// From an unblocked start, the mover never commits a blocked position
        #[test]
        fn prop_mover_never_ends_blocked(
            seed in 0u64..1000,
            start_r in 0.0f32..300.0,
            start_theta in 0.0f32..std::f32::consts::TAU,
            target_x in -300.0f32..300.0,
            target_y in -300.0f32..300.0,
        ) {
            let state = MazeState::new(seed);
            let start = polar_to_cartesian(start_r, start_theta);
            prop_assume!(!collision::point_blocked(&state, start));

            let end = step_toward(start, Vec2::new(target_x, target_y), state.config.max_probe_speed, |p| {
                collision::point_blocked(&state, p)
            });
            prop_assert!(!collision::point_blocked(&state, end));
        }
    }
}
