use rand::Rng;

use crate::graphics::{Color, Surface};
use crate::math::{rng, F2};

pub const PARTICLE_GRAVITY: f32 = 0.1;
pub const PARTICLE_FADE: f32 = 0.02;
pub const PARTICLE_SPREAD: f32 = 8.0;

/// Ticks from full opacity to zero: `1.0 / PARTICLE_FADE`.
pub const PARTICLE_LIFETIME: u32 = 50;

/// One spark of an exploded firework.
///
/// Opacity is derived from a tick counter rather than accumulated,
/// so a particle reaches exactly zero after `PARTICLE_LIFETIME` ticks.
#[derive(Debug, Clone)]
pub struct Particle {
    pos: F2,
    vel: F2,
    size: f32,
    ticks: u32,
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(pos: F2, rng: &mut R) -> Self {
        let size = rng::unit(rng) * 3.0 + 2.0;
        let vel = F2::new(
            rng::spread(rng, PARTICLE_SPREAD),
            rng::spread(rng, PARTICLE_SPREAD),
        );

        Self::with_velocity(pos, vel, size)
    }

    pub fn with_velocity(pos: F2, vel: F2, size: f32) -> Self {
        Self {
            pos,
            vel,
            size,
            ticks: 0,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.ticks = self.ticks.saturating_add(1);
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_circle(self.pos, self.size, Color::white_alpha(self.alpha()));
    }

    /// Keeps falling below zero once dead, like the fade it models.
    pub fn alpha(&self) -> f32 {
        1.0 - self.ticks as f32 * PARTICLE_FADE
    }

    pub fn is_dead(&self) -> bool {
        self.ticks >= PARTICLE_LIFETIME
    }

    pub fn pos(&self) -> F2 {
        self.pos
    }

    pub fn vel(&self) -> F2 {
        self.vel
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}
