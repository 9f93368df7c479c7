use core::ops::{Add, Mul, Sub};

/// 2D point or offset in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Rotates the offset clockwise on screen (+Y down) by `degrees`.
    #[inline]
    pub fn rotated(self, degrees: f32) -> Vec2 {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Rotates this point about `pivot`, clockwise on screen by `degrees`.
    #[inline]
    pub fn rotated_about(self, pivot: Vec2, degrees: f32) -> Vec2 {
        pivot + (self - pivot).rotated(degrees)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn quarter_turn_points_up_vector_to_the_right() {
        // "Up" on screen is -Y; a clockwise quarter turn lands on +X.
        let up = Vec2::new(0.0, -10.0);
        assert!(close(up.rotated(90.0), Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn half_turn_flips_the_offset() {
        let up = Vec2::new(0.0, -10.0);
        assert!(close(up.rotated(180.0), Vec2::new(0.0, 10.0)));
    }

    #[test]
    fn rotation_about_pivot_keeps_distance() {
        let pivot = Vec2::new(50.0, 50.0);
        let p = Vec2::new(50.0, 10.0);
        let r = p.rotated_about(pivot, 33.0);
        assert!((r.distance(pivot) - 40.0).abs() < 1e-4);
    }
}
