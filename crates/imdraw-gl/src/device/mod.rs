//! GPU-side resources of the backend.
//!
//! This module is responsible for:
//! - compiling the GUI shader program and allocating its buffers and font texture
//! - capturing and restoring the host's GL state around a render
//! - mapping draw-command texture ids to GPU textures

mod objects;
pub mod shaders;
mod state;
mod textures;

pub use objects::DeviceObjects;
pub use state::{GlStateBackup, StateGuard};
pub use textures::TextureRegistry;
