use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use crate::coords::ScissorRect;

use super::{
    BlendEquation, BlendFactor, BufferTarget, Capability, Gl, IndexType, ShaderStage,
    TextureFilter, VertexAttrib,
};

/// A state-changing call observed by [`RecordingGl`]. Queries are not recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateShader { stage: ShaderStage, shader: u32 },
    ShaderSource { shader: u32 },
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    DetachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    Uniform1i { location: u32, value: i32 },
    UniformMatrix4 { location: u32, matrix: [f32; 16] },
    CreateBuffer(u32),
    DeleteBuffer(u32),
    BindBuffer { target: BufferTarget, buffer: Option<u32> },
    BufferData { target: BufferTarget, data: Vec<u8> },
    EnableVertexAttribArray(u32),
    DisableVertexAttribArray(u32),
    VertexAttribPointer { index: u32, attrib: VertexAttrib },
    CreateTexture(u32),
    DeleteTexture(u32),
    ActiveTexture(u32),
    BindTexture(Option<u32>),
    TextureFilter { min: TextureFilter, mag: TextureFilter },
    TexImage2D { width: u32, height: u32, len: usize },
    Enable(Capability),
    Disable(Capability),
    BlendEquation(BlendEquation),
    BlendFunc { src: BlendFactor, dst: BlendFactor },
    Scissor(ScissorRect),
    DrawElements { count: u32, index_type: IndexType, byte_offset: usize },
}

/// GL object namespaces. Each kind allocates ids independently.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Shader,
    Program,
    Buffer,
    Texture,
}

/// Snapshot of the bindings the render pipeline touches.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Bindings {
    pub program: Option<u32>,
    /// Active texture unit, counted from `TEXTURE0`.
    pub active_texture: u32,
    /// 2D texture bound on the active unit.
    pub texture: Option<u32>,
    pub array_buffer: Option<u32>,
    pub element_buffer: Option<u32>,
}

/// One `DrawElements` together with the texture and scissor it ran under.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RecordedDraw {
    pub texture: Option<u32>,
    pub scissor: Option<ScissorRect>,
    pub count: u32,
    pub index_type: IndexType,
    pub byte_offset: usize,
}

pub const POSITION_LOCATION: u32 = 0;
pub const UV_LOCATION: u32 = 1;
pub const COLOR_LOCATION: u32 = 2;
pub const TEXTURE_UNIFORM_LOCATION: u32 = 0;
pub const PROJ_MTX_UNIFORM_LOCATION: u32 = 1;

#[derive(Debug, Default)]
struct State {
    calls: Vec<GlCall>,

    bindings: Bindings,
    /// 2D bindings of the inactive units.
    unit_textures: BTreeMap<u32, u32>,
    enabled: BTreeSet<Capability>,
    enabled_attribs: BTreeSet<u32>,

    live: BTreeMap<ObjectKind, BTreeSet<u32>>,
    linked: BTreeSet<u32>,

    fail_compile: Option<ShaderStage>,
    fail_link: bool,
    fail_create: Option<ObjectKind>,
    hidden_names: BTreeSet<String>,
}

impl State {
    fn record(&mut self, call: GlCall) {
        match &call {
            GlCall::BufferData { target, data } => {
                log::trace!(target: "imdraw_gl::gl", "BufferData {{ {target:?}, {} bytes }}", data.len());
            }
            other => log::trace!(target: "imdraw_gl::gl", "{other:?}"),
        }
        self.calls.push(call);
    }

    /// Lowest id >= 1 not currently live for `kind`.
    fn alloc(&mut self, kind: ObjectKind) -> Result<u32, String> {
        if self.fail_create == Some(kind) {
            return Err(format!("out of {kind:?} handles"));
        }
        let live = self.live.entry(kind).or_default();
        let id = (1..).find(|id| !live.contains(id)).unwrap_or(u32::MAX);
        live.insert(id);
        Ok(id)
    }

    fn release(&mut self, kind: ObjectKind, id: u32) {
        if let Some(live) = self.live.get_mut(&kind) {
            live.remove(&id);
        }
    }

    fn is_live(&self, kind: ObjectKind, id: u32) -> bool {
        self.live.get(&kind).is_some_and(|s| s.contains(&id))
    }
}

/// In-memory [`Gl`] that tracks bindings and records every state change.
///
/// Handles are plain `u32`s. Freed ids are reused lowest-first, so two
/// identical sequences of creates and deletes yield identical recordings.
/// Attribute and uniform locations are fixed: `Position` 0, `UV` 1, `Color` 2,
/// `Texture` 0, `ProjMtx` 1.
///
/// Failures can be injected to exercise error paths: see
/// [`RecordingGl::fail_shader_compile`], [`RecordingGl::fail_link`],
/// [`RecordingGl::fail_create`] and [`RecordingGl::hide_name`].
#[derive(Debug, Default)]
pub struct RecordingGl {
    state: RefCell<State>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_shader_compile(&self, stage: ShaderStage) {
        self.state.borrow_mut().fail_compile = Some(stage);
    }

    pub fn fail_link(&self) {
        self.state.borrow_mut().fail_link = true;
    }

    /// Makes every creation of `kind` fail until [`RecordingGl::clear_failures`].
    pub fn fail_create(&self, kind: ObjectKind) {
        self.state.borrow_mut().fail_create = Some(kind);
    }

    /// Makes attribute/uniform lookups for `name` come back empty.
    pub fn hide_name(&self, name: &str) {
        self.state.borrow_mut().hidden_names.insert(name.to_string());
    }

    pub fn clear_failures(&self) {
        let mut s = self.state.borrow_mut();
        s.fail_compile = None;
        s.fail_link = false;
        s.fail_create = None;
        s.hidden_names.clear();
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    pub fn take_calls(&self) -> Vec<GlCall> {
        std::mem::take(&mut self.state.borrow_mut().calls)
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn bindings(&self) -> Bindings {
        self.state.borrow().bindings
    }

    pub fn enabled(&self, cap: Capability) -> bool {
        self.state.borrow().enabled.contains(&cap)
    }

    /// 2D texture bound on `unit`, whether or not it is the active unit.
    pub fn texture_on_unit(&self, unit: u32) -> Option<u32> {
        let s = self.state.borrow();
        if unit == s.bindings.active_texture {
            s.bindings.texture
        } else {
            s.unit_textures.get(&unit).copied()
        }
    }

    /// Vertex attribute arrays currently enabled.
    pub fn enabled_attribs(&self) -> Vec<u32> {
        self.state.borrow().enabled_attribs.iter().copied().collect()
    }

    /// Number of shaders, programs, buffers and textures not yet deleted.
    pub fn live_object_count(&self) -> usize {
        self.state.borrow().live.values().map(BTreeSet::len).sum()
    }

    /// Draw calls in submission order with the texture and scissor last set
    /// before each.
    pub fn draw_calls(&self) -> Vec<RecordedDraw> {
        let s = self.state.borrow();
        let mut texture = None;
        let mut scissor = None;
        let mut out = Vec::new();
        for call in &s.calls {
            match *call {
                GlCall::BindTexture(t) => texture = t,
                GlCall::Scissor(r) => scissor = Some(r),
                GlCall::DrawElements {
                    count,
                    index_type,
                    byte_offset,
                } => out.push(RecordedDraw {
                    texture,
                    scissor,
                    count,
                    index_type,
                    byte_offset,
                }),
                _ => {}
            }
        }
        out
    }
}

impl Gl for RecordingGl {
    type Program = u32;
    type Shader = u32;
    type Buffer = u32;
    type Texture = u32;
    type UniformLocation = u32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        let shader = s.alloc(ObjectKind::Shader)?;
        s.record(GlCall::CreateShader { stage, shader });
        Ok(shader)
    }

    fn shader_source(&self, shader: u32, _source: &str) {
        self.state.borrow_mut().record(GlCall::ShaderSource { shader });
    }

    fn compile_shader(&self, shader: u32) {
        self.state.borrow_mut().record(GlCall::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let s = self.state.borrow();
        let stage = s.calls.iter().rev().find_map(|c| match c {
            GlCall::CreateShader { stage, shader: id } if *id == shader => Some(*stage),
            _ => None,
        });
        s.is_live(ObjectKind::Shader, shader) && (s.fail_compile.is_none() || stage != s.fail_compile)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            format!("ERROR: 0:1: shader {shader} rejected")
        }
    }

    fn delete_shader(&self, shader: u32) {
        let mut s = self.state.borrow_mut();
        s.release(ObjectKind::Shader, shader);
        s.record(GlCall::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        let program = s.alloc(ObjectKind::Program)?;
        s.record(GlCall::CreateProgram(program));
        Ok(program)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.state
            .borrow_mut()
            .record(GlCall::AttachShader { program, shader });
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.state
            .borrow_mut()
            .record(GlCall::DetachShader { program, shader });
    }

    fn link_program(&self, program: u32) {
        let mut s = self.state.borrow_mut();
        if !s.fail_link && s.is_live(ObjectKind::Program, program) {
            s.linked.insert(program);
        }
        s.record(GlCall::LinkProgram(program));
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state.borrow().linked.contains(&program)
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.program_link_status(program) {
            String::new()
        } else {
            format!("ERROR: program {program} failed to link")
        }
    }

    fn delete_program(&self, program: u32) {
        let mut s = self.state.borrow_mut();
        s.release(ObjectKind::Program, program);
        s.linked.remove(&program);
        s.record(GlCall::DeleteProgram(program));
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<u32> {
        let s = self.state.borrow();
        if !s.linked.contains(&program) || s.hidden_names.contains(name) {
            return None;
        }
        match name {
            "Texture" => Some(TEXTURE_UNIFORM_LOCATION),
            "ProjMtx" => Some(PROJ_MTX_UNIFORM_LOCATION),
            _ => None,
        }
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        let s = self.state.borrow();
        if !s.linked.contains(&program) || s.hidden_names.contains(name) {
            return None;
        }
        match name {
            "Position" => Some(POSITION_LOCATION),
            "UV" => Some(UV_LOCATION),
            "Color" => Some(COLOR_LOCATION),
            _ => None,
        }
    }

    fn use_program(&self, program: Option<u32>) {
        let mut s = self.state.borrow_mut();
        s.bindings.program = program;
        s.record(GlCall::UseProgram(program));
    }

    fn uniform_1_i32(&self, location: &u32, value: i32) {
        self.state.borrow_mut().record(GlCall::Uniform1i {
            location: *location,
            value,
        });
    }

    fn uniform_matrix_4_f32(&self, location: &u32, matrix: &[f32; 16]) {
        self.state.borrow_mut().record(GlCall::UniformMatrix4 {
            location: *location,
            matrix: *matrix,
        });
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        let buffer = s.alloc(ObjectKind::Buffer)?;
        s.record(GlCall::CreateBuffer(buffer));
        Ok(buffer)
    }

    fn delete_buffer(&self, buffer: u32) {
        let mut s = self.state.borrow_mut();
        s.release(ObjectKind::Buffer, buffer);
        // GL unbinds a deleted buffer from the current context.
        if s.bindings.array_buffer == Some(buffer) {
            s.bindings.array_buffer = None;
        }
        if s.bindings.element_buffer == Some(buffer) {
            s.bindings.element_buffer = None;
        }
        s.record(GlCall::DeleteBuffer(buffer));
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<u32>) {
        let mut s = self.state.borrow_mut();
        match target {
            BufferTarget::Array => s.bindings.array_buffer = buffer,
            BufferTarget::ElementArray => s.bindings.element_buffer = buffer,
        }
        s.record(GlCall::BindBuffer { target, buffer });
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.state.borrow_mut().record(GlCall::BufferData {
            target,
            data: data.to_vec(),
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        let mut s = self.state.borrow_mut();
        s.enabled_attribs.insert(index);
        s.record(GlCall::EnableVertexAttribArray(index));
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        let mut s = self.state.borrow_mut();
        s.enabled_attribs.remove(&index);
        s.record(GlCall::DisableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer(&self, index: u32, attrib: VertexAttrib) {
        self.state
            .borrow_mut()
            .record(GlCall::VertexAttribPointer { index, attrib });
    }

    fn create_texture(&self) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        let texture = s.alloc(ObjectKind::Texture)?;
        s.record(GlCall::CreateTexture(texture));
        Ok(texture)
    }

    fn delete_texture(&self, texture: u32) {
        let mut s = self.state.borrow_mut();
        s.release(ObjectKind::Texture, texture);
        // GL unbinds a deleted texture from every unit.
        if s.bindings.texture == Some(texture) {
            s.bindings.texture = None;
        }
        s.unit_textures.retain(|_, t| *t != texture);
        s.record(GlCall::DeleteTexture(texture));
    }

    fn active_texture(&self, unit: u32) {
        let mut s = self.state.borrow_mut();
        let previous = s.bindings.active_texture;
        if let Some(t) = s.bindings.texture {
            s.unit_textures.insert(previous, t);
        }
        s.bindings.texture = s.unit_textures.remove(&unit);
        s.bindings.active_texture = unit;
        s.record(GlCall::ActiveTexture(unit));
    }

    fn bind_texture(&self, texture: Option<u32>) {
        let mut s = self.state.borrow_mut();
        s.bindings.texture = texture;
        s.record(GlCall::BindTexture(texture));
    }

    fn texture_filter(&self, min: TextureFilter, mag: TextureFilter) {
        self.state
            .borrow_mut()
            .record(GlCall::TextureFilter { min, mag });
    }

    fn tex_image_2d_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        self.state.borrow_mut().record(GlCall::TexImage2D {
            width,
            height,
            len: pixels.len(),
        });
    }

    fn enable(&self, cap: Capability) {
        let mut s = self.state.borrow_mut();
        s.enabled.insert(cap);
        s.record(GlCall::Enable(cap));
    }

    fn disable(&self, cap: Capability) {
        let mut s = self.state.borrow_mut();
        s.enabled.remove(&cap);
        s.record(GlCall::Disable(cap));
    }

    fn is_enabled(&self, cap: Capability) -> bool {
        self.enabled(cap)
    }

    fn blend_equation(&self, equation: BlendEquation) {
        self.state
            .borrow_mut()
            .record(GlCall::BlendEquation(equation));
    }

    fn blend_func(&self, src: BlendFactor, dst: BlendFactor) {
        self.state
            .borrow_mut()
            .record(GlCall::BlendFunc { src, dst });
    }

    fn scissor(&self, rect: ScissorRect) {
        self.state.borrow_mut().record(GlCall::Scissor(rect));
    }

    fn draw_elements(&self, count: u32, index_type: IndexType, byte_offset: usize) {
        self.state.borrow_mut().record(GlCall::DrawElements {
            count,
            index_type,
            byte_offset,
        });
    }

    fn current_program(&self) -> Option<u32> {
        self.state.borrow().bindings.program
    }

    fn bound_texture(&self) -> Option<u32> {
        self.state.borrow().bindings.texture
    }

    fn active_texture_unit(&self) -> u32 {
        self.state.borrow().bindings.active_texture
    }

    fn bound_buffer(&self, target: BufferTarget) -> Option<u32> {
        let b = self.state.borrow().bindings;
        match target {
            BufferTarget::Array => b.array_buffer,
            BufferTarget::ElementArray => b.element_buffer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freed_ids_are_reused_lowest_first() {
        let gl = RecordingGl::new();
        let a = gl.create_buffer().unwrap();
        let b = gl.create_buffer().unwrap();
        assert_eq!((a, b), (1, 2));
        gl.delete_buffer(a);
        assert_eq!(gl.create_buffer().unwrap(), 1);
        assert_eq!(gl.create_buffer().unwrap(), 3);
        // Kinds have separate namespaces.
        assert_eq!(gl.create_texture().unwrap(), 1);
    }

    #[test]
    fn texture_bindings_are_per_unit() {
        let gl = RecordingGl::new();
        let a = gl.create_texture().unwrap();
        let b = gl.create_texture().unwrap();
        gl.bind_texture(Some(a));
        gl.active_texture(2);
        assert_eq!(gl.bound_texture(), None);
        gl.bind_texture(Some(b));
        gl.active_texture(0);
        assert_eq!(gl.bound_texture(), Some(a));
        assert_eq!(gl.texture_on_unit(2), Some(b));

        gl.delete_texture(b);
        assert_eq!(gl.texture_on_unit(2), None);
    }

    #[test]
    fn bindings_track_binds_and_deletes() {
        let gl = RecordingGl::new();
        let buf = gl.create_buffer().unwrap();
        let tex = gl.create_texture().unwrap();
        gl.bind_buffer(BufferTarget::Array, Some(buf));
        gl.bind_texture(Some(tex));
        assert_eq!(gl.bindings().array_buffer, Some(buf));
        assert_eq!(gl.bound_texture(), Some(tex));

        gl.delete_buffer(buf);
        gl.delete_texture(tex);
        assert_eq!(gl.bindings(), Bindings::default());
    }

    #[test]
    fn queries_are_not_recorded() {
        let gl = RecordingGl::new();
        gl.enable(Capability::Blend);
        let _ = gl.is_enabled(Capability::Blend);
        let _ = gl.current_program();
        assert_eq!(gl.calls(), vec![GlCall::Enable(Capability::Blend)]);
    }

    #[test]
    fn injected_compile_failure_only_hits_that_stage() {
        let gl = RecordingGl::new();
        gl.fail_shader_compile(ShaderStage::Fragment);
        let vs = gl.create_shader(ShaderStage::Vertex).unwrap();
        let fs = gl.create_shader(ShaderStage::Fragment).unwrap();
        assert!(gl.shader_compile_status(vs));
        assert!(!gl.shader_compile_status(fs));
        assert!(!gl.shader_info_log(fs).is_empty());
    }

    #[test]
    fn locations_require_a_linked_program() {
        let gl = RecordingGl::new();
        let p = gl.create_program().unwrap();
        assert_eq!(gl.attrib_location(p, "UV"), None);
        gl.link_program(p);
        assert_eq!(gl.attrib_location(p, "UV"), Some(UV_LOCATION));
        assert_eq!(gl.uniform_location(p, "ProjMtx"), Some(PROJ_MTX_UNIFORM_LOCATION));
        gl.hide_name("ProjMtx");
        assert_eq!(gl.uniform_location(p, "ProjMtx"), None);
    }

    #[test]
    fn draw_calls_pair_with_last_texture_and_scissor() {
        let gl = RecordingGl::new();
        let rect = ScissorRect { x: 1, y: 2, width: 3, height: 4 };
        gl.bind_texture(Some(7));
        gl.scissor(rect);
        gl.draw_elements(6, IndexType::UnsignedShort, 0);
        gl.bind_texture(Some(8));
        gl.draw_elements(3, IndexType::UnsignedShort, 12);

        let draws = gl.draw_calls();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].texture, Some(7));
        assert_eq!(draws[1].texture, Some(8));
        assert_eq!(draws[1].scissor, Some(rect));
        assert_eq!(draws[1].byte_offset, 12);
    }

    #[test]
    fn fail_create_reports_error_and_allocates_nothing() {
        let gl = RecordingGl::new();
        gl.fail_create(ObjectKind::Texture);
        assert!(gl.create_texture().is_err());
        assert_eq!(gl.live_object_count(), 0);
        gl.clear_failures();
        assert!(gl.create_texture().is_ok());
    }
}
