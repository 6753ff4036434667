//! Torch Maze - small interactive cursor toys
//!
//! Core modules:
//! - `sim`: Deterministic maze simulation (rotating walls, sub-stepped probe)
//! - `raster`: CPU rasterization of the maze (pixel collision + frame source)
//! - `letters`: Word-shooting toy simulation (springs, bursts, aim)
//! - `settings`: Persisted preferences

pub mod letters;
pub mod raster;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Toy configuration constants
pub mod consts {
    /// Fixed simulation tick rate (one tick per rendered frame at 60 Hz)
    pub const TICK_HZ: f32 = 60.0;
    /// Fixed tick duration in seconds
    pub const TICK_DT: f32 = 1.0 / TICK_HZ;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 4;

    /// Logical canvas size (square, CSS pixels)
    pub const CANVAS_SIZE: u32 = 500;

    /// Maze defaults
    pub const RING_COUNT: u32 = 6;
    pub const MAZE_RADIUS: f32 = 230.0;
    /// Radial offset of the innermost ring from the spacing grid
    pub const INNER_MARGIN: f32 = 25.0;
    /// Wall stroke width, doubles as the collision tolerance band
    pub const WALL_THICKNESS: f32 = 14.0;
    /// Base wall rotation per tick (radians)
    pub const ROTATION_SPEED: f32 = 0.004;
    /// Extra per-ring rotation jitter, uniform in [0, SPEED_JITTER)
    pub const SPEED_JITTER: f32 = 0.003;
    /// Angular width of each ring's passable gap (radians)
    pub const GAP_SIZE: f32 = 0.65;

    /// Probe movement cap per tick (distance units)
    pub const MAX_PROBE_SPEED: f32 = 20.0;
    /// Distance-to-center below which the maze counts as solved
    pub const WIN_RADIUS: f32 = 15.0;
    /// Distance beyond the maze radius at which a solved maze re-arms
    pub const REARM_MARGIN: f32 = 20.0;
    /// Band outside the maze radius where movement is always free
    pub const OUTER_TOLERANCE: f32 = 10.0;

    /// Letter toy defaults
    pub const LETTER_FONT_SIZE: f32 = 200.0;
    pub const LETTER_SPACING: f32 = LETTER_FONT_SIZE * 0.65;
    /// Letters stay this far inside the window edges
    pub const LETTER_MARGIN: f32 = LETTER_FONT_SIZE * 0.3;
    pub const REPULSION_RADIUS: f32 = 350.0;
    pub const REPULSION_FORCE: f32 = 10.0;
    pub const HOME_PULL: f32 = 0.08;
    pub const FRICTION: f32 = 0.92;
    pub const HITBOX_SIZE: f32 = 150.0;
    /// Particles spawned per blasted letter
    pub const BURST_COUNT: u32 = 100;
}

/// Wrap an angle into [0, 2π), robust to negative and large inputs
#[inline]
pub fn wrap_tau(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
