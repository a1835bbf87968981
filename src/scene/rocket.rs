use crate::graphics::{Color, Surface};
use crate::math::F2;

pub const ROCKET_SIZE: f32 = 5.0;
pub const ROCKET_VELOCITY: F2 = F2::new(0.0, -6.0);

/// A straight climber. Once it passes the middle of the viewport the
/// scene swaps it for a firework at the same spot.
#[derive(Debug, Clone)]
pub struct Rocket {
    pos: F2,
    vel: F2,
}

impl Rocket {
    pub fn new(pos: F2) -> Self {
        Self::with_velocity(pos, ROCKET_VELOCITY)
    }

    pub fn with_velocity(pos: F2, vel: F2) -> Self {
        Self { pos, vel }
    }

    /// Climbs one step. Returns true once the rocket is above `ceiling`,
    /// meaning it is due to become a firework.
    pub fn update(&mut self, ceiling: f32) -> bool {
        self.pos.y += self.vel.y;
        self.pos.y < ceiling
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let F2 { x, y } = self.pos;

        surface.fill_triangle(
            self.pos,
            F2::new(x - ROCKET_SIZE, y + ROCKET_SIZE * 2.0),
            F2::new(x + ROCKET_SIZE, y + ROCKET_SIZE * 2.0),
            Color::RED,
        );
    }

    pub fn pos(&self) -> F2 {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn climbs_straight_up_without_gravity() {
        let mut r = Rocket::with_velocity(F2::new(100.0, 600.0), F2::new(3.0, -6.0));

        for i in 1..=10 {
            r.update(0.0);
            assert_eq!(r.pos(), F2::new(100.0, 600.0 - 6.0 * i as f32));
        }
    }

    #[test]
    fn crossing_is_strictly_above_ceiling() {
        let mut r = Rocket::new(F2::new(100.0, 600.0));

        for _ in 0..50 {
            assert!(!r.update(300.0));
        }
        assert_eq!(r.pos().y, 300.0);

        assert!(r.update(300.0));
        assert_eq!(r.pos().y, 294.0);
    }

    #[derive(Default)]
    struct Triangles(Vec<[F2; 3]>, Vec<Color>);

    impl Surface for Triangles {
        fn clear(&mut self) {}
        fn fill_circle(&mut self, _: F2, _: f32, _: Color) {}
        fn fill_triangle(&mut self, a: F2, b: F2, c: F2, color: Color) {
            self.0.push([a, b, c]);
            self.1.push(color);
        }
        fn fill_rect(&mut self, _: F2, _: f32, _: f32, _: Color) {}
    }

    #[test]
    fn draws_red_triangle_nose_up() {
        let r = Rocket::new(F2::new(100.0, 200.0));
        let mut rec = Triangles::default();

        r.draw(&mut rec);

        assert_eq!(
            rec.0,
            [[F2::new(100.0, 200.0), F2::new(95.0, 210.0), F2::new(105.0, 210.0)]]
        );
        assert_eq!(rec.1, [Color::RED]);
    }
}
