use std::ops::{Add, AddAssign};

use super::Vec2;

impl<T> Add for Vec2<T>
where
    T: Add<Output = T> + Copy,
{
    type Output = Vec2<T>;
    fn add(self, other: Vec2<T>) -> Vec2<T> {
        Vec2::<T> {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl<T> AddAssign for Vec2<T>
where
    T: AddAssign + Copy,
{
    fn add_assign(&mut self, other: Vec2<T>) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Vec2<f32> {
    pub const fn new(x: f32, y: f32) -> Vec2<f32> {
        Vec2::<f32> { x, y }
    }

    pub const fn zero() -> Vec2<f32> {
        Vec2::<f32> { x: 0.0, y: 0.0 }
    }

    pub fn to_p2(self) -> Vec2<i32> {
        Vec2::<i32> {
            x: self.x.round() as i32,
            y: self.y.round() as i32,
        }
    }
}

impl Vec2<i32> {
    pub const fn new(x: i32, y: i32) -> Vec2<i32> {
        Vec2::<i32> { x, y }
    }
}
