//! Word-shooting toy simulation
//!
//! Floating bubble letters are repelled by the aim point, spring back to
//! their home positions when left alone, and burst into particles when
//! shot. Fonts, the gun sprite, and glow effects belong to the host page;
//! this module owns only the per-tick arithmetic.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A floating bubble letter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Letter {
    pub ch: char,
    /// Anchor the letter springs back to
    pub home: Vec2,
    pub pos: Vec2,
    pub vel: Vec2,
    acc: Vec2,
    pub blasted: bool,
    /// Visual tilt, eased toward the horizontal drift
    pub rotation: f32,
    /// Phase offset for the presentation layer's breathing animation
    pub idle_offset: f32,
}

impl Letter {
    fn new(ch: char, pos: Vec2, idle_offset: f32) -> Self {
        Self {
            ch,
            home: pos,
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            blasted: false,
            rotation: 0.0,
            idle_offset,
        }
    }

    #[inline]
    fn apply_force(&mut self, force: Vec2) {
        self.acc += force;
    }

    /// One tick of spring/repulsion physics
    pub fn update(&mut self, aim: Vec2, bounds: Vec2) {
        if self.blasted {
            return;
        }

        // Repulsion from the aim point, falling off linearly to zero
        let dir = self.pos - aim;
        let dist = dir.length();
        let pushed = dist < REPULSION_RADIUS;
        if pushed && dist > 0.0 {
            let strength = REPULSION_FORCE * (1.0 - dist / REPULSION_RADIUS);
            self.apply_force(dir / dist * strength);
        }

        // Home spring only when not being pushed
        if !pushed {
            let home_dir = self.home - self.pos;
            let home_dist = home_dir.length();
            if home_dist > 1.0 {
                self.apply_force(home_dir / home_dist * HOME_PULL);
            }
        }

        self.vel += self.acc;
        self.pos += self.vel;
        self.vel *= FRICTION;
        self.acc = Vec2::ZERO;

        // Elastic bounce keeps the glyph inside the window
        let margin = LETTER_MARGIN;
        if self.pos.x < margin {
            self.pos.x = margin;
            self.vel.x = -self.vel.x;
        }
        if self.pos.x > bounds.x - margin {
            self.pos.x = bounds.x - margin;
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < margin {
            self.pos.y = margin;
            self.vel.y = -self.vel.y;
        }
        if self.pos.y > bounds.y - margin {
            self.pos.y = bounds.y - margin;
            self.vel.y = -self.vel.y;
        }

        self.rotation += (self.vel.x * 0.05 - self.rotation) * 0.1;
    }

    /// Whether a point falls inside this letter's hitbox
    #[inline]
    pub fn hit_by(&self, aim: Vec2) -> bool {
        self.pos.distance(aim) < HITBOX_SIZE
    }
}

/// A burst particle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life on a 0-255 alpha scale
    pub life: f32,
    /// Palette index for the presentation layer
    pub color: u32,
}

impl Particle {
    /// One tick of drift and decay
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life -= 6.0;
        self.vel *= FRICTION;
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct LettersInput {
    /// Aim point (offset above the pointer, supplied by the host)
    pub aim: Vec2,
    /// Shoot this tick
    pub fire: bool,
}

/// Per-tick output for the presentation layer
#[derive(Debug, Clone, Copy)]
pub struct LettersOutput {
    /// The aim indicator should show its "locked on" state
    pub aiming: bool,
    /// Every letter has been blasted (stage clear)
    pub all_blasted: bool,
}

/// Complete word-shooting session state
#[derive(Debug, Clone)]
pub struct LettersState {
    pub letters: Vec<Letter>,
    pub particles: Vec<Particle>,
    /// Window size letters bounce inside
    pub bounds: Vec2,
    pub time_ticks: u64,
    rng: Pcg32,
}

impl LettersState {
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        Self {
            letters: Vec::new(),
            particles: Vec::new(),
            bounds,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Lay out a word one letter at a time from `start`
    pub fn spawn_word(&mut self, word: &str, start: Vec2) {
        for (i, ch) in word.chars().enumerate() {
            let pos = start + Vec2::new(i as f32 * LETTER_SPACING, 0.0);
            let idle_offset = self.rng.random_range(0.0..1000.0);
            self.letters.push(Letter::new(ch, pos, idle_offset));
        }
    }

    /// Whether the aim point is over any letter still standing
    pub fn aiming_at(&self, aim: Vec2) -> bool {
        self.letters.iter().any(|l| !l.blasted && l.hit_by(aim))
    }

    /// Advance the toy by one tick
    pub fn tick(&mut self, input: &LettersInput) -> LettersOutput {
        self.time_ticks += 1;

        if input.fire {
            let mut bursts = Vec::new();
            for letter in &mut self.letters {
                if !letter.blasted && letter.hit_by(input.aim) {
                    letter.blasted = true;
                    bursts.push(letter.pos);
                }
            }
            for pos in bursts {
                self.spawn_burst(pos);
            }
        }

        for letter in &mut self.letters {
            letter.update(input.aim, self.bounds);
        }

        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(Particle::alive);

        LettersOutput {
            aiming: self.aiming_at(input.aim),
            all_blasted: self.letters.iter().all(|l| l.blasted),
        }
    }

    fn spawn_burst(&mut self, pos: Vec2) {
        for _ in 0..BURST_COUNT {
            let theta = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(5.0..30.0);
            let color = self.rng.random_range(0..3u32);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(theta.cos(), theta.sin()) * speed,
                life: 255.0,
                color,
            });
        }
    }
}
