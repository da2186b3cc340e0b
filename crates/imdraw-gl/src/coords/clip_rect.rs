use super::Vec2;

/// Clip rectangle as emitted by the GUI: `(x0, y0)` top-left, `(x1, y1)`
/// bottom-right, top-left origin.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClipRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// GL scissor box: bottom-left origin, framebuffer pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ScissorRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ClipRect {
    #[inline]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.y1 - self.y0
    }

    /// True when the rect covers no pixels: zero-sized or inverted.
    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.x1 > self.x0 && self.y1 > self.y0)
    }

    /// Returns the rect multiplied by a per-axis framebuffer scale.
    #[inline]
    pub fn scaled(self, scale: Vec2) -> Self {
        Self {
            x0: self.x0 * scale.x,
            y0: self.y0 * scale.y,
            x1: self.x1 * scale.x,
            y1: self.y1 * scale.y,
        }
    }

    /// Converts a framebuffer-space clip rect into a GL scissor box.
    ///
    /// GL counts rows from the bottom, so `y = fb_height - y1`.
    #[inline]
    pub fn to_scissor(self, fb_height: f32) -> ScissorRect {
        ScissorRect {
            x: self.x0 as i32,
            y: (fb_height - self.y1) as i32,
            width: self.width() as i32,
            height: self.height() as i32,
        }
    }
}
