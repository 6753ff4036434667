//! Deterministic maze simulation
//!
//! All maze logic lives here. This module must be pure and deterministic:
//! - Fixed tick cadence only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The pixel-sampled collision strategy reads a [`crate::raster::MazeRaster`]
//! the caller owns; the geometric strategy needs nothing beyond this module.

pub mod collision;
pub mod ring;
pub mod state;
pub mod tick;

pub use collision::{point_blocked, wall_at};
pub use ring::RingWall;
pub use state::{CollisionMode, MazeConfig, MazeEvent, MazeState, Probe, WinPolicy};
pub use tick::{TickInput, TickOutput, step_toward, tick};
