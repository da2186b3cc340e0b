/// 2D vector (positions, sizes and per-axis scale factors).
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

    /// True when either component is zero (or negative): nothing can be drawn.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        !(self.x > 0.0 && self.y > 0.0)
    }

    /// Component-wise product.
    #[inline]
    pub fn scale(self, s: Vec2) -> Vec2 {
        Vec2::new(self.x * s.x, self.y * s.y)
    }
}
