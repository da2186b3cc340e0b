//! imdraw-gl.
//!
//! Platform backend for an immediate-mode GUI library on a GL-family
//! rasterization API. The crate owns two paths:
//! - host input events -> the GUI's normalized input snapshot (`input`)
//! - the GUI's per-frame draw data -> ordered, scissored GL draw calls (`render`)
//!
//! Everything is driven through an explicit [`Backend`] context object owned by
//! the host. All calls are synchronous and must come from one thread.

pub mod backend;
pub mod config;
pub mod coords;
pub mod device;
pub mod error;
pub mod gl;
pub mod gui;
pub mod input;
pub mod logging;
pub mod platform;
pub mod render;
pub mod time;

pub use backend::{Backend, FrameInput, FrameOutput};
pub use config::BackendConfig;
pub use error::{BackendError, ConfigError, Result};
