use crate::coords::Vec2;

/// Column-major orthographic projection taking logical pixels
/// `[0, w] x [0, h]` (top-left origin) to clip space, Y flipped.
pub fn ortho_projection(display_size: Vec2) -> [f32; 16] {
    let (w, h) = (display_size.x, display_size.y);
    #[rustfmt::skip]
    let m = [
        2.0 / w, 0.0,      0.0,  0.0,
        0.0,     -2.0 / h, 0.0,  0.0,
        0.0,     0.0,      -1.0, 0.0,
        -1.0,    1.0,      0.0,  1.0,
    ];
    m
}
