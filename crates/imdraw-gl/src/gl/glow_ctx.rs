use std::num::NonZeroU32;

use glow::HasContext;

use crate::coords::ScissorRect;

use super::{
    AttribType, BlendEquation, BlendFactor, BufferTarget, Capability, Gl, IndexType, ShaderStage,
    TextureFilter, VertexAttrib,
};

/// [`Gl`] on a native OpenGL (ES) context through `glow`.
///
/// # Safety contract
///
/// The wrapped context must stay current on the calling thread for as long as
/// this value is used. That is the only precondition of the raw GL calls made
/// below; it is established once in [`GlowContext::new`].
pub struct GlowContext {
    gl: glow::Context,
}

impl GlowContext {
    /// Wraps an existing `glow` context.
    ///
    /// # Safety
    /// `gl` must be current on this thread whenever a method of the returned
    /// value is called.
    pub unsafe fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    /// Loads GL entry points with `loader` (e.g. from a windowing library).
    ///
    /// # Safety
    /// Same contract as [`GlowContext::new`]; `loader` must return valid
    /// function pointers for the current context.
    pub unsafe fn from_loader_function<F>(loader: F) -> Self
    where
        F: FnMut(&str) -> *const std::os::raw::c_void,
    {
        Self {
            gl: unsafe { glow::Context::from_loader_function(loader) },
        }
    }

    /// Returns the wrapped context for host-side rendering.
    pub fn raw(&self) -> &glow::Context {
        &self.gl
    }

    fn binding(&self, pname: u32) -> Option<NonZeroU32> {
        // SAFETY: context is current (type invariant); binding queries have no
        // other preconditions.
        let raw = unsafe { self.gl.get_parameter_i32(pname) };
        NonZeroU32::new(raw as u32)
    }
}

fn shader_kind(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn buffer_binding(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER_BINDING,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER_BINDING,
    }
}

fn capability(cap: Capability) -> u32 {
    match cap {
        Capability::Blend => glow::BLEND,
        Capability::CullFace => glow::CULL_FACE,
        Capability::DepthTest => glow::DEPTH_TEST,
        Capability::ScissorTest => glow::SCISSOR_TEST,
    }
}

fn blend_factor(f: BlendFactor) -> u32 {
    match f {
        BlendFactor::One => glow::ONE,
        BlendFactor::SrcAlpha => glow::SRC_ALPHA,
        BlendFactor::OneMinusSrcAlpha => glow::ONE_MINUS_SRC_ALPHA,
    }
}

fn filter(f: TextureFilter) -> i32 {
    match f {
        TextureFilter::Nearest => glow::NEAREST as i32,
        TextureFilter::Linear => glow::LINEAR as i32,
    }
}

fn attrib_type(ty: AttribType) -> u32 {
    match ty {
        AttribType::Float => glow::FLOAT,
        AttribType::UnsignedByte => glow::UNSIGNED_BYTE,
    }
}

fn index_type(ty: IndexType) -> u32 {
    match ty {
        IndexType::UnsignedShort => glow::UNSIGNED_SHORT,
        IndexType::UnsignedInt => glow::UNSIGNED_INT,
    }
}

// SAFETY (all blocks below): the context is current on this thread per the
// `GlowContext` construction contract, and every handle passed in was created
// by this same context.
impl Gl for GlowContext {
    type Program = glow::NativeProgram;
    type Shader = glow::NativeShader;
    type Buffer = glow::NativeBuffer;
    type Texture = glow::NativeTexture;
    type UniformLocation = glow::NativeUniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { self.gl.create_shader(shader_kind(stage)) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.detach_shader(program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn uniform_1_i32(&self, location: &Self::UniformLocation, value: i32) {
        unsafe { self.gl.uniform_1_i32(Some(location), value) }
    }

    fn uniform_matrix_4_f32(&self, location: &Self::UniformLocation, matrix: &[f32; 16]) {
        unsafe { self.gl.uniform_matrix_4_f32_slice(Some(location), false, matrix) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { self.gl.create_buffer() }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>) {
        unsafe { self.gl.bind_buffer(buffer_target(target), buffer) }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(buffer_target(target), data, glow::STREAM_DRAW)
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_pointer(&self, index: u32, attrib: VertexAttrib) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                index,
                attrib.size as i32,
                attrib_type(attrib.ty),
                attrib.normalized,
                attrib.stride as i32,
                attrib.offset as i32,
            )
        }
    }

    fn create_texture(&self) -> Result<Self::Texture, String> {
        unsafe { self.gl.create_texture() }
    }

    fn delete_texture(&self, texture: Self::Texture) {
        unsafe { self.gl.delete_texture(texture) }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    fn bind_texture(&self, texture: Option<Self::Texture>) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, texture) }
    }

    fn texture_filter(&self, min: TextureFilter, mag: TextureFilter) {
        unsafe {
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, filter(min));
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, filter(mag));
        }
    }

    fn tex_image_2d_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        unsafe {
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            )
        }
    }

    fn enable(&self, cap: Capability) {
        unsafe { self.gl.enable(capability(cap)) }
    }

    fn disable(&self, cap: Capability) {
        unsafe { self.gl.disable(capability(cap)) }
    }

    fn is_enabled(&self, cap: Capability) -> bool {
        unsafe { self.gl.is_enabled(capability(cap)) }
    }

    fn blend_equation(&self, equation: BlendEquation) {
        let mode = match equation {
            BlendEquation::FuncAdd => glow::FUNC_ADD,
        };
        unsafe { self.gl.blend_equation(mode) }
    }

    fn blend_func(&self, src: BlendFactor, dst: BlendFactor) {
        unsafe { self.gl.blend_func(blend_factor(src), blend_factor(dst)) }
    }

    fn scissor(&self, rect: ScissorRect) {
        unsafe { self.gl.scissor(rect.x, rect.y, rect.width, rect.height) }
    }

    fn draw_elements(&self, count: u32, ty: IndexType, byte_offset: usize) {
        unsafe {
            self.gl.draw_elements(
                glow::TRIANGLES,
                count as i32,
                index_type(ty),
                byte_offset as i32,
            )
        }
    }

    fn current_program(&self) -> Option<Self::Program> {
        self.binding(glow::CURRENT_PROGRAM).map(glow::NativeProgram)
    }

    fn bound_texture(&self) -> Option<Self::Texture> {
        self.binding(glow::TEXTURE_BINDING_2D).map(glow::NativeTexture)
    }

    fn active_texture_unit(&self) -> u32 {
        let raw = unsafe { self.gl.get_parameter_i32(glow::ACTIVE_TEXTURE) };
        (raw as u32).saturating_sub(glow::TEXTURE0)
    }

    fn bound_buffer(&self, target: BufferTarget) -> Option<Self::Buffer> {
        self.binding(buffer_binding(target)).map(glow::NativeBuffer)
    }
}
