use rand::Rng;

use super::particle::Particle;
use crate::graphics::{Color, Surface};
use crate::math::{rng, F2};

pub const FIREWORK_SIZE: f32 = 8.0;
pub const FIREWORK_SHRINK: f32 = 0.1;
pub const FIREWORK_GRAVITY: f32 = 0.05;
pub const BURST_PARTICLES: usize = 250;

/// Rising ticks before the burst: `FIREWORK_SIZE / FIREWORK_SHRINK`.
pub const FUSE_TICKS: u32 = 80;

#[derive(Debug, Clone)]
pub struct Firework {
    pos: F2,
    vel: F2,
    fuse: u32,
    exploded: bool,
    particles: Vec<Particle>,
}

impl Firework {
    /// Launches with a small sideways drift and a strong upward kick
    /// that gravity slowly takes back.
    pub fn new<R: Rng + ?Sized>(pos: F2, rng: &mut R) -> Self {
        let vel = F2::new(
            rng::unit(rng) * 2.0 - 1.0,
            rng::unit(rng) * -4.0 - 2.0,
        );

        Self::with_velocity(pos, vel)
    }

    pub fn with_velocity(pos: F2, vel: F2) -> Self {
        Self {
            pos,
            vel,
            fuse: FUSE_TICKS,
            exploded: false,
            particles: Vec::new(),
        }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.exploded {
            // Dead particles included; pruning is the scene's call.
            self.particles.iter_mut().for_each(Particle::update);
            return;
        }

        self.fuse = self.fuse.saturating_sub(1);
        self.pos += self.vel;
        self.vel.y += FIREWORK_GRAVITY;

        if self.fuse == 0 {
            self.explode(rng);
        }
    }

    fn explode<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        debug_assert!(!self.exploded, "firework exploded twice");
        debug_assert!(self.particles.is_empty());

        self.exploded = true;
        self.particles.reserve_exact(BURST_PARTICLES);

        for _ in 0..BURST_PARTICLES {
            self.particles.push(Particle::new(self.pos, rng));
        }

        log::trace!("firework exploded at ({:.1}, {:.1})", self.pos.x, self.pos.y);
    }

    /// While rising the hue is rolled again on every call, so the
    /// shell flickers. Nothing about the color is stored.
    pub fn draw<S: Surface + ?Sized, R: Rng + ?Sized>(&self, surface: &mut S, rng: &mut R) {
        if self.exploded {
            self.particles.iter().for_each(|p| p.draw(surface));
            return;
        }

        surface.fill_circle(self.pos, self.size(), Color::random_hue(rng));
    }

    pub fn prune_dead_particles(&mut self) {
        self.particles.retain(|p| !p.is_dead());
    }

    /// Exploded with nothing left to show.
    pub fn is_finished(&self) -> bool {
        self.exploded && self.particles.is_empty()
    }

    pub fn is_exploded(&self) -> bool {
        self.exploded
    }

    pub fn size(&self) -> f32 {
        self.fuse as f32 * FIREWORK_SHRINK
    }

    pub fn pos(&self) -> F2 {
        self.pos
    }

    pub fn vel(&self) -> F2 {
        self.vel
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
