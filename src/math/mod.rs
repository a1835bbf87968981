pub mod rng;
mod vec2;

/// A 2D point or velocity. Simulation code uses `Vec2<f32>`,
/// rasterization uses `Vec2<i32>` (see `graphics::P2`).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

pub type F2 = Vec2<f32>;

