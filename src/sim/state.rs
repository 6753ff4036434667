//! Maze session state
//!
//! One `MazeState` per maze instance, constructed from a seed so the wall
//! layout is reproducible. The state is mutated only through
//! [`tick`](super::tick::tick).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::ring::RingWall;
use crate::consts::*;

/// What winning does to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WinPolicy {
    /// Solved is terminal for the session
    OneShot,
    /// Solved until the probe leaves the maze area, then armed again
    #[default]
    Rearm,
}

/// Which collision strategy classifies walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CollisionMode {
    /// Closed-form polar test, no rendering dependency
    #[default]
    Geometric,
    /// Sample the rasterized wall mask
    PixelSampled,
}

impl CollisionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionMode::Geometric => "Geometric",
            CollisionMode::PixelSampled => "PixelSampled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "geometric" | "geo" => Some(CollisionMode::Geometric),
            "pixelsampled" | "pixel" => Some(CollisionMode::PixelSampled),
            _ => None,
        }
    }
}

/// Maze tuning, defaults from the crate constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeConfig {
    pub ring_count: u32,
    pub maze_radius: f32,
    /// Radial offset added to every ring's grid position
    pub inner_margin: f32,
    /// Shared wall stroke width / collision band
    pub wall_thickness: f32,
    /// Base rotation magnitude per tick
    pub rotation_speed: f32,
    /// Upper bound of the per-ring rotation jitter
    pub speed_jitter: f32,
    /// Angular width of each ring's gap
    pub gap_size: f32,
    pub max_probe_speed: f32,
    pub win_radius: f32,
    pub rearm_margin: f32,
    pub outer_tolerance: f32,
    pub win_policy: WinPolicy,
    pub collision: CollisionMode,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            ring_count: RING_COUNT,
            maze_radius: MAZE_RADIUS,
            inner_margin: INNER_MARGIN,
            wall_thickness: WALL_THICKNESS,
            rotation_speed: ROTATION_SPEED,
            speed_jitter: SPEED_JITTER,
            gap_size: GAP_SIZE,
            max_probe_speed: MAX_PROBE_SPEED,
            win_radius: WIN_RADIUS,
            rearm_margin: REARM_MARGIN,
            outer_tolerance: OUTER_TOLERANCE,
            win_policy: WinPolicy::default(),
            collision: CollisionMode::default(),
        }
    }
}

/// The pointer-driven point whose movement the walls constrain
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Probe {
    pub pos: Vec2,
}

impl Default for Probe {
    fn default() -> Self {
        // Below the maze, outside the bounding radius (the original parks
        // the dot under the bottom edge of the canvas)
        Self {
            pos: Vec2::new(0.0, CANVAS_SIZE as f32 / 2.0 + 100.0),
        }
    }
}

/// State transitions reported by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeEvent {
    /// Probe reached the center region
    Solved,
    /// Probe left the maze area, collision re-enabled (Rearm policy only)
    Rearmed,
}

/// Complete maze session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub config: MazeConfig,
    /// Ring walls, innermost first
    pub walls: Vec<RingWall>,
    pub probe: Probe,
    pub solved: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl MazeState {
    /// Create a maze with the default config
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, MazeConfig::default())
    }

    /// Create a maze with explicit tuning
    pub fn with_config(seed: u64, config: MazeConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let step = config.maze_radius / (config.ring_count + 1) as f32;

        let walls = (1..=config.ring_count)
            .map(|i| {
                let radius = i as f32 * step + config.inner_margin;
                let angle = rng.random_range(0.0..TAU);
                // Alternate direction by ring parity for counter-rotation
                let dir = if i % 2 == 0 { 1.0 } else { -1.0 };
                let jitter = if config.speed_jitter > 0.0 {
                    rng.random_range(0.0..config.speed_jitter)
                } else {
                    0.0
                };
                RingWall::new(radius, angle, dir * (config.rotation_speed + jitter))
            })
            .collect();

        Self {
            seed,
            config,
            walls,
            probe: Probe::default(),
            solved: false,
            time_ticks: 0,
        }
    }

    /// Distance from the probe to the maze center
    #[inline]
    pub fn distance_to_center(&self) -> f32 {
        self.probe.pos.length()
    }
}
