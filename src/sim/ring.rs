//! Ring wall geometry
//!
//! In polar coordinates, a ring wall is an annular band at a fixed radius
//! that blocks every angle except one gap. The gap starts at the wall's
//! current rotation and spans a fixed angular width, so rotating the wall
//! moves the gap around the ring.

use serde::{Deserialize, Serialize};

use crate::wrap_tau;

/// One rotating annular wall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingWall {
    /// Centerline radius from maze center (immutable after construction)
    pub radius: f32,
    /// Current rotation offset (radians, accumulates without wrapping)
    pub angle: f32,
    /// Signed rotation per tick (radians, immutable after construction)
    pub angular_speed: f32,
}

impl RingWall {
    pub fn new(radius: f32, angle: f32, angular_speed: f32) -> Self {
        Self {
            radius,
            angle,
            angular_speed,
        }
    }

    /// Advance the wall by one tick of rotation
    #[inline]
    pub fn rotate(&mut self) {
        self.angle += self.angular_speed;
    }

    /// Whether a distance from center falls inside this wall's radial band
    #[inline]
    pub fn in_band(&self, dist: f32, thickness: f32) -> bool {
        (dist - self.radius).abs() < thickness / 2.0
    }

    /// Whether an absolute angle falls inside the passable gap.
    ///
    /// The gap covers relative angles in [0, gap_size); everything else on
    /// the ring blocks. `angle` may be any accumulated value.
    pub fn in_gap(&self, theta: f32, gap_size: f32) -> bool {
        let rel = wrap_tau(theta - self.angle);
        rel < gap_size
    }
}
