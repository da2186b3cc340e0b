use crate::coords::Vec2;

/// Logical and physical extents of the drawing surface for one frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DisplayMetrics {
    /// Logical (CSS / window) pixels.
    pub display_size: Vec2,
    /// Physical pixels per logical pixel, per axis.
    pub framebuffer_scale: Vec2,
}

impl DisplayMetrics {
    /// Resolves metrics from the host's reported sizes.
    ///
    /// A zero logical size falls back to `fallback`; a zero drawing-buffer size
    /// falls back to the logical size (scale 1).
    pub fn resolve(logical: Vec2, drawing_buffer: Vec2, fallback: Vec2) -> Self {
        let w = if logical.x > 0.0 { logical.x } else { fallback.x };
        let h = if logical.y > 0.0 { logical.y } else { fallback.y };
        let display_w = if drawing_buffer.x > 0.0 { drawing_buffer.x } else { w };
        let display_h = if drawing_buffer.y > 0.0 { drawing_buffer.y } else { h };

        let display_size = Vec2::new(w, h);
        Self {
            display_size,
            framebuffer_scale: framebuffer_scale(display_size, Vec2::new(display_w, display_h)),
        }
    }
}

/// Physical / logical per axis; 0 on an axis whose logical extent is 0.
pub fn framebuffer_scale(logical: Vec2, physical: Vec2) -> Vec2 {
    let axis = |l: f32, p: f32| if l > 0.0 { p / l } else { 0.0 };
    Vec2::new(axis(logical.x, physical.x), axis(logical.y, physical.y))
}
