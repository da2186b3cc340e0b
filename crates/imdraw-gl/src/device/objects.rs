use crate::error::{ConfigError, Result};
use crate::gl::{BufferTarget, Gl, ShaderStage, TextureFilter};
use crate::gui::FontAtlas;

use super::shaders::{
    FRAGMENT_SHADER, UNIFORM_PROJ_MTX, UNIFORM_TEXTURE, VERTEX_LAYOUT, VERTEX_SHADER,
};

/// GPU objects owned by an initialized backend.
///
/// Created as a unit by [`DeviceObjects::create`] and released as a unit by
/// [`DeviceObjects::destroy`]; there is no partially initialized state.
pub struct DeviceObjects<G: Gl> {
    pub(crate) program: G::Program,
    vert: G::Shader,
    frag: G::Shader,
    pub(crate) vbo: G::Buffer,
    pub(crate) ebo: G::Buffer,
    pub(crate) font_texture: G::Texture,
    pub(crate) u_texture: G::UniformLocation,
    pub(crate) u_proj_mtx: G::UniformLocation,
    /// Resolved locations, in `VERTEX_LAYOUT` order.
    pub(crate) attribs: [u32; 3],
}

/// Objects created so far; released on drop unless disarmed.
struct Partial<'g, G: Gl> {
    gl: &'g G,
    armed: bool,
    program: Option<G::Program>,
    vert: Option<G::Shader>,
    frag: Option<G::Shader>,
    vbo: Option<G::Buffer>,
    ebo: Option<G::Buffer>,
    texture: Option<G::Texture>,
}

impl<'g, G: Gl> Partial<'g, G> {
    fn new(gl: &'g G) -> Self {
        Self {
            gl,
            armed: true,
            program: None,
            vert: None,
            frag: None,
            vbo: None,
            ebo: None,
            texture: None,
        }
    }
}

impl<G: Gl> Drop for Partial<'_, G> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        log::debug!("releasing partially created device objects");
        let gl = self.gl;
        if let Some(t) = self.texture.take() {
            gl.delete_texture(t);
        }
        if let Some(b) = self.ebo.take() {
            gl.delete_buffer(b);
        }
        if let Some(b) = self.vbo.take() {
            gl.delete_buffer(b);
        }
        if let Some(p) = self.program.take() {
            gl.delete_program(p);
        }
        if let Some(s) = self.vert.take() {
            gl.delete_shader(s);
        }
        if let Some(s) = self.frag.take() {
            gl.delete_shader(s);
        }
    }
}

fn created<T>(what: &'static str, r: std::result::Result<T, String>) -> Result<T> {
    r.map_err(|reason| ConfigError::ResourceCreation { what, reason }.into())
}

fn check_compiled<G: Gl>(gl: &G, shader: G::Shader, stage: ShaderStage) -> Result<()> {
    let info = gl.shader_info_log(shader);
    if !gl.shader_compile_status(shader) {
        return Err(ConfigError::ShaderCompile { stage, log: info }.into());
    }
    if !info.trim().is_empty() {
        log::warn!("{stage:?} shader compiled with warnings: {info}");
    }
    Ok(())
}

impl<G: Gl> DeviceObjects<G> {
    /// Compiles and links the GUI program, resolves its inputs, allocates the
    /// streaming vertex/index buffers and uploads `atlas` as the font texture.
    ///
    /// The texture and array-buffer bindings are restored before returning.
    /// On failure every object created so far is deleted.
    pub fn create(gl: &G, atlas: &FontAtlas) -> Result<Self> {
        if atlas.pixels.len() != atlas.expected_len() {
            return Err(ConfigError::InvalidFontAtlas {
                width: atlas.width,
                height: atlas.height,
                len: atlas.pixels.len(),
            }
            .into());
        }

        let last_texture = gl.bound_texture();
        let last_array_buffer = gl.bound_buffer(BufferTarget::Array);

        let mut partial = Partial::new(gl);

        let program = created("shader program", gl.create_program())?;
        partial.program = Some(program);
        let vert = created("vertex shader", gl.create_shader(ShaderStage::Vertex))?;
        partial.vert = Some(vert);
        let frag = created("fragment shader", gl.create_shader(ShaderStage::Fragment))?;
        partial.frag = Some(frag);

        gl.shader_source(vert, VERTEX_SHADER);
        gl.shader_source(frag, FRAGMENT_SHADER);
        gl.compile_shader(vert);
        gl.compile_shader(frag);
        check_compiled(gl, vert, ShaderStage::Vertex)?;
        check_compiled(gl, frag, ShaderStage::Fragment)?;

        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);
        let link_log = gl.program_info_log(program);
        if !gl.program_link_status(program) {
            return Err(ConfigError::ProgramLink { log: link_log }.into());
        }
        if !link_log.trim().is_empty() {
            log::warn!("shader program linked with warnings: {link_log}");
        }

        let u_texture = gl
            .uniform_location(program, UNIFORM_TEXTURE)
            .ok_or(ConfigError::MissingUniform(UNIFORM_TEXTURE))?;
        let u_proj_mtx = gl
            .uniform_location(program, UNIFORM_PROJ_MTX)
            .ok_or(ConfigError::MissingUniform(UNIFORM_PROJ_MTX))?;

        let mut attribs = [0u32; 3];
        for (slot, binding) in attribs.iter_mut().zip(VERTEX_LAYOUT.iter()) {
            *slot = gl
                .attrib_location(program, binding.name)
                .ok_or(ConfigError::MissingAttribute(binding.name))?;
        }

        let vbo = created("vertex buffer", gl.create_buffer())?;
        partial.vbo = Some(vbo);
        let ebo = created("index buffer", gl.create_buffer())?;
        partial.ebo = Some(ebo);

        let font_texture = created("font texture", gl.create_texture())?;
        partial.texture = Some(font_texture);
        gl.bind_texture(Some(font_texture));
        gl.texture_filter(TextureFilter::Linear, TextureFilter::Linear);
        gl.tex_image_2d_rgba8(atlas.width, atlas.height, &atlas.pixels);

        gl.bind_texture(last_texture);
        gl.bind_buffer(BufferTarget::Array, last_array_buffer);

        partial.armed = false;
        log::debug!(
            "device objects created (font atlas {}x{})",
            atlas.width,
            atlas.height
        );

        Ok(Self {
            program,
            vert,
            frag,
            vbo,
            ebo,
            font_texture,
            u_texture,
            u_proj_mtx,
            attribs,
        })
    }

    /// Deletes every object. Consumes `self`, so double release is impossible.
    pub fn destroy(self, gl: &G) {
        gl.delete_texture(self.font_texture);
        gl.delete_buffer(self.vbo);
        gl.delete_buffer(self.ebo);
        gl.detach_shader(self.program, self.vert);
        gl.detach_shader(self.program, self.frag);
        gl.delete_program(self.program);
        gl.delete_shader(self.vert);
        gl.delete_shader(self.frag);
        log::debug!("device objects destroyed");
    }
}
