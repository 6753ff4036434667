//! Maze rasterization
//!
//! Draws the ring walls into a device-pixel coverage mask. The mask has two
//! consumers: the pixel-sampled collision strategy, and the wasm front-end,
//! which expands it to the RGBA frame blitted onto the 2D canvas.
//!
//! A covered pixel stores [`WALL_SENTINEL`] in the single-channel mask and
//! [`sample`](MazeRaster::sample) classifies anything above
//! [`WALL_THRESHOLD`] as wall. The solved-state fade exists only in
//! [`to_rgba`](MazeRaster::to_rgba), never in the mask, so collision
//! sampling cannot be confused by the faded rendering.
//!
//! Coverage is evaluated per pixel with the same closed-form polar test the
//! geometric strategy uses, so the two strategies agree by construction up
//! to pixel quantization.

use glam::Vec2;

use crate::sim::{MazeConfig, RingWall, wall_at};

/// Mask value of a wall-covered pixel
pub const WALL_SENTINEL: u8 = 255;
/// Coverage above this classifies as wall when sampling
pub const WALL_THRESHOLD: u8 = 100;

/// Device-pixel wall mask for one maze
pub struct MazeRaster {
    /// Logical (CSS pixel) square side
    size: u32,
    /// Device pixel ratio
    scale: f32,
    /// Device-pixel square side
    px: u32,
    mask: Vec<u8>,
}

impl MazeRaster {
    pub fn new(size: u32, scale: f32) -> Self {
        let px = (size as f32 * scale).ceil() as u32;
        Self {
            size,
            scale,
            px,
            mask: vec![0; (px * px) as usize],
        }
    }

    /// Side length in device pixels
    #[inline]
    pub fn device_size(&self) -> u32 {
        self.px
    }

    /// Rasterize the current wall configuration into the mask
    pub fn redraw(&mut self, walls: &[RingWall], cfg: &MazeConfig) {
        let half = self.size as f32 / 2.0;
        for py in 0..self.px {
            for px in 0..self.px {
                // Pixel center in logical, center-origin coordinates
                let x = (px as f32 + 0.5) / self.scale - half;
                let y = (py as f32 + 0.5) / self.scale - half;
                let covered = wall_at(walls, cfg, Vec2::new(x, y));
                self.mask[(py * self.px + px) as usize] =
                    if covered { WALL_SENTINEL } else { 0 };
            }
        }
    }

    /// Sample the mask at a point in maze coordinates.
    ///
    /// Out-of-bounds samples are clear, never a fault.
    pub fn sample(&self, point: Vec2) -> bool {
        let half = self.size as f32 / 2.0;
        let px = ((point.x + half) * self.scale).floor();
        let py = ((point.y + half) * self.scale).floor();
        if px < 0.0 || py < 0.0 || px >= self.px as f32 || py >= self.px as f32 {
            return false;
        }
        self.mask[(py as u32 * self.px + px as u32) as usize] > WALL_THRESHOLD
    }

    /// Expand the mask into an RGBA frame.
    ///
    /// Unsolved: black walls and a pale goal disc on white. Solved: the
    /// palette swaps to the "lights on" scheme and the walls fade to a
    /// faint shadow.
    pub fn to_rgba(&self, solved: bool, goal_radius: f32) -> Vec<u8> {
        let (bg, goal_color, wall_alpha) = if solved {
            ([0xcc, 0xff, 0xcc], [0x00, 0xaa, 0x00], 0.3f32)
        } else {
            ([0xff, 0xff, 0xff], [0xdd, 0xdd, 0xdd], 1.0f32)
        };

        let half = self.size as f32 / 2.0;
        let goal_sq = (goal_radius * self.scale) * (goal_radius * self.scale);
        let mut out = vec![0xffu8; (self.px * self.px * 4) as usize];

        for py in 0..self.px {
            for px in 0..self.px {
                let cx = px as f32 + 0.5 - half * self.scale;
                let cy = py as f32 + 0.5 - half * self.scale;
                let mut c = if cx * cx + cy * cy <= goal_sq {
                    goal_color
                } else {
                    bg
                };
                if self.mask[(py * self.px + px) as usize] > WALL_THRESHOLD {
                    // Walls are black; blend toward the background when faded
                    for ch in &mut c {
                        *ch = ((1.0 - wall_alpha) * *ch as f32) as u8;
                    }
                }
                let idx = ((py * self.px + px) * 4) as usize;
                out[idx..idx + 3].copy_from_slice(&c);
            }
        }
        out
    }
}
