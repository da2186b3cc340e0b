use crate::gl::{BufferTarget, Capability, Gl};

/// GL state the render pipeline overwrites, captured so it can be put back.
pub struct GlStateBackup<G: Gl> {
    pub program: Option<G::Program>,
    /// Host's active unit, counted from `TEXTURE0`.
    pub active_texture: u32,
    /// 2D binding of unit 0, the only unit the pipeline draws with.
    pub texture: Option<G::Texture>,
    pub array_buffer: Option<G::Buffer>,
    pub element_buffer: Option<G::Buffer>,
    /// Enable flags in `Capability::ALL` order.
    pub enabled: [bool; 4],
}

impl<G: Gl> GlStateBackup<G> {
    /// Captures the host state. Leaves texture unit 0 active.
    pub fn capture(gl: &G) -> Self {
        let active_texture = gl.active_texture_unit();
        gl.active_texture(0);
        Self {
            program: gl.current_program(),
            active_texture,
            texture: gl.bound_texture(),
            array_buffer: gl.bound_buffer(BufferTarget::Array),
            element_buffer: gl.bound_buffer(BufferTarget::ElementArray),
            enabled: Capability::ALL.map(|cap| gl.is_enabled(cap)),
        }
    }

    /// Rebinds everything captured, including "nothing bound", and turns off
    /// the vertex streams in `attribs`.
    pub fn restore(&self, gl: &G, attribs: &[u32]) {
        for &index in attribs {
            gl.disable_vertex_attrib_array(index);
        }
        gl.use_program(self.program);
        gl.active_texture(0);
        gl.bind_texture(self.texture);
        gl.active_texture(self.active_texture);
        gl.bind_buffer(BufferTarget::Array, self.array_buffer);
        gl.bind_buffer(BufferTarget::ElementArray, self.element_buffer);

        gl.disable(Capability::ScissorTest);
        for (cap, was_enabled) in Capability::ALL.into_iter().zip(self.enabled) {
            match cap {
                Capability::ScissorTest if was_enabled => gl.enable(cap),
                Capability::ScissorTest => {}
                _ => gl.set_enabled(cap, was_enabled),
            }
        }
    }
}

/// Restores a [`GlStateBackup`] when dropped.
///
/// Held across the draw loop so early returns and panics unwinding out of
/// user callbacks leave the host's bindings intact.
pub struct StateGuard<'g, G: Gl> {
    gl: &'g G,
    backup: GlStateBackup<G>,
    attribs: [u32; 3],
}

impl<'g, G: Gl> StateGuard<'g, G> {
    pub fn new(gl: &'g G, attribs: [u32; 3]) -> Self {
        Self {
            gl,
            backup: GlStateBackup::capture(gl),
            attribs,
        }
    }
}

impl<G: Gl> Drop for StateGuard<'_, G> {
    fn drop(&mut self) {
        self.backup.restore(self.gl, &self.attribs);
    }
}
