//! Time and display subsystem.
//!
//! Intended usage:
//! - one `FrameClock` per backend; call `tick()` once per presented frame
//! - resolve `DisplayMetrics` from the host's surface sizes each frame

mod display;
mod frame_clock;

pub use display::{framebuffer_scale, DisplayMetrics};
pub use frame_clock::{FrameClock, FrameTime};
