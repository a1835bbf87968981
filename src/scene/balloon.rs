use rand::Rng;

use crate::graphics::{Color, Surface};
use crate::math::{rng, F2};

pub const BALLOON_SIZE: f32 = 15.0;
pub const STRING_WIDTH: f32 = 2.0;
pub const STRING_LENGTH: f32 = 10.0;

// Must stay visible over the sky background and over black terminal cells.
pub const STRING_COLOR: Color = Color::SILVER;

#[derive(Debug, Clone)]
pub struct Balloon {
    pos: F2,
    vel: F2,
}

impl Balloon {
    /// Drift in `[-1, 1)`, climb rate in `(-3, -1]`, both fixed for life.
    pub fn new<R: Rng + ?Sized>(pos: F2, rng: &mut R) -> Self {
        let vel = F2::new(
            rng::spread(rng, 2.0),
            -1.0 - rng::unit(rng) * 2.0,
        );

        Self::with_velocity(pos, vel)
    }

    pub fn with_velocity(pos: F2, vel: F2) -> Self {
        Self { pos, vel }
    }

    /// Moves one step. Returns true once the balloon has left the top
    /// of the viewport.
    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.pos.y < 0.0
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_circle(self.pos, BALLOON_SIZE, Color::LIGHT_BLUE);
        surface.fill_rect(
            F2::new(self.pos.x - STRING_WIDTH / 2.0, self.pos.y),
            STRING_WIDTH,
            STRING_LENGTH,
            STRING_COLOR,
        );
    }

    pub fn pos(&self) -> F2 {
        self.pos
    }

    pub fn vel(&self) -> F2 {
        self.vel
    }
}
