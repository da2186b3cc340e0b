//! Coordinate types shared by the input and render paths.
//!
//! Two spaces are in play:
//! - logical pixels: top-left origin, +Y down (GUI and host events)
//! - framebuffer pixels: logical × framebuffer scale; scissor rects use a
//!   bottom-left origin as GL expects

mod clip_rect;
mod vec2;

pub use clip_rect::{ClipRect, ScissorRect};
pub use vec2::Vec2;
