//! GL-family rasterization API, as seen by the backend.
//!
//! [`Gl`] models the mutable GL/WebGL state machine: objects are created and
//! bound, and draw calls consume whatever is bound. Handles are associated types
//! so the same pipeline runs on a real context ([`GlowContext`]) and on the
//! in-memory [`RecordingGl`].
//!
//! All methods take `&self`; GL contexts are single-threaded and the
//! implementations keep their own interior state.

#[cfg(not(target_arch = "wasm32"))]
mod glow_ctx;
mod recording;
mod types;

use std::fmt::Debug;

use crate::coords::ScissorRect;

#[cfg(not(target_arch = "wasm32"))]
pub use glow_ctx::GlowContext;
pub use recording::{
    Bindings, GlCall, ObjectKind, RecordedDraw, RecordingGl, COLOR_LOCATION, POSITION_LOCATION,
    PROJ_MTX_UNIFORM_LOCATION, TEXTURE_UNIFORM_LOCATION, UV_LOCATION,
};
pub use types::{
    AttribType, BlendEquation, BlendFactor, BufferTarget, Capability, IndexType, ShaderStage,
    TextureFilter, VertexAttrib,
};

/// GL state machine operations used by the backend.
pub trait Gl {
    type Program: Copy + Eq + Debug;
    type Shader: Copy + Eq + Debug;
    type Buffer: Copy + Eq + Debug;
    type Texture: Copy + Eq + Debug;
    type UniformLocation: Clone + Debug;

    // shaders and programs
    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn use_program(&self, program: Option<Self::Program>);
    fn uniform_1_i32(&self, location: &Self::UniformLocation, value: i32);
    fn uniform_matrix_4_f32(&self, location: &Self::UniformLocation, matrix: &[f32; 16]);

    // buffers and vertex streams
    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn delete_buffer(&self, buffer: Self::Buffer);
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>);
    /// Replaces the whole store of the bound buffer with stream-draw usage.
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn disable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer(&self, index: u32, attrib: VertexAttrib);

    // 2D textures
    fn create_texture(&self) -> Result<Self::Texture, String>;
    fn delete_texture(&self, texture: Self::Texture);
    /// Selects texture unit `unit` (0-based).
    fn active_texture(&self, unit: u32);
    fn bind_texture(&self, texture: Option<Self::Texture>);
    fn texture_filter(&self, min: TextureFilter, mag: TextureFilter);
    fn tex_image_2d_rgba8(&self, width: u32, height: u32, pixels: &[u8]);

    // fixed-function state and drawing
    fn enable(&self, cap: Capability);
    fn disable(&self, cap: Capability);
    fn is_enabled(&self, cap: Capability) -> bool;
    fn blend_equation(&self, equation: BlendEquation);
    fn blend_func(&self, src: BlendFactor, dst: BlendFactor);
    fn scissor(&self, rect: ScissorRect);
    /// Indexed triangle list from the bound element buffer.
    fn draw_elements(&self, count: u32, index_type: IndexType, byte_offset: usize);

    // binding queries
    fn current_program(&self) -> Option<Self::Program>;
    /// 2D texture bound on the active unit.
    fn bound_texture(&self) -> Option<Self::Texture>;
    /// Active texture unit, counted from `TEXTURE0`.
    fn active_texture_unit(&self) -> u32;
    fn bound_buffer(&self, target: BufferTarget) -> Option<Self::Buffer>;

    /// Sets `cap` to `enabled` with one call.
    fn set_enabled(&self, cap: Capability, enabled: bool) {
        if enabled {
            self.enable(cap);
        } else {
            self.disable(cap);
        }
    }
}
