use crate::device::shaders::VERTEX_LAYOUT;
use crate::device::{DeviceObjects, StateGuard, TextureRegistry};
use crate::error::{BackendError, Result};
use crate::gl::{BlendEquation, BlendFactor, BufferTarget, Capability, Gl, IndexType};
use crate::gui::{DrawCmdKind, DrawData, Io};

use super::ortho_projection;

/// Checks everything that could make the draw loop submit garbage: index
/// width agreement, command ranges and texture ids.
///
/// Runs before any GL call so a rejected frame touches no state.
pub fn validate_draw_data<T: Copy>(
    draw_data: &DrawData,
    index_type: IndexType,
    textures: &TextureRegistry<T>,
) -> Result<()> {
    for (li, list) in draw_data.draw_lists.iter().enumerate() {
        if list.idx_buffer.width() != index_type.size_bytes() {
            return Err(BackendError::invalid(format!(
                "draw list {li}: {}-byte indices but io.draw_idx_size is {}",
                list.idx_buffer.width(),
                index_type.size_bytes()
            )));
        }

        let idx_len = list.idx_buffer.len() as u64;
        let mut offset = 0u64;
        for (ci, cmd) in list.cmd_buffer.iter().enumerate() {
            let end = offset + u64::from(cmd.elem_count);
            if end > idx_len {
                return Err(BackendError::invalid(format!(
                    "draw list {li} command {ci}: indices {offset}..{end} exceed index buffer of {idx_len}"
                )));
            }
            if matches!(cmd.kind, DrawCmdKind::Standard) && !textures.contains(cmd.texture_id) {
                return Err(BackendError::invalid(format!(
                    "draw list {li} command {ci}: unknown texture id {}",
                    cmd.texture_id.raw()
                )));
            }
            offset = end;
        }
    }
    Ok(())
}

fn setup_render_state<G: Gl>(gl: &G, objects: &DeviceObjects<G>, draw_data: &DrawData) {
    gl.enable(Capability::Blend);
    gl.blend_equation(BlendEquation::FuncAdd);
    gl.blend_func(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
    gl.disable(Capability::CullFace);
    gl.disable(Capability::DepthTest);
    gl.enable(Capability::ScissorTest);
    gl.active_texture(0);

    let projection = ortho_projection(draw_data.display_size);
    gl.use_program(Some(objects.program));
    gl.uniform_1_i32(&objects.u_texture, 0);
    gl.uniform_matrix_4_f32(&objects.u_proj_mtx, &projection);

    gl.bind_buffer(BufferTarget::Array, Some(objects.vbo));
    for &location in &objects.attribs {
        gl.enable_vertex_attrib_array(location);
    }
    for (&location, binding) in objects.attribs.iter().zip(VERTEX_LAYOUT.iter()) {
        gl.vertex_attrib_pointer(location, binding.layout);
    }
}

/// Submits one frame of draw data.
///
/// Lists are drawn in order; within a list each command consumes the next
/// `elem_count` indices. Callback commands run their hook in place of a draw;
/// commands whose clip rect is empty are skipped.
/// The host's program, texture, buffer bindings and enable flags are restored
/// on return, including when a callback panics.
///
/// Nothing is touched when the framebuffer is empty on either axis.
pub fn render_draw_data<G: Gl>(
    gl: &G,
    objects: &DeviceObjects<G>,
    textures: &TextureRegistry<G::Texture>,
    io: &Io,
    draw_data: &DrawData,
) -> Result<()> {
    let fb_size = draw_data.framebuffer_size();
    if fb_size.is_degenerate() {
        log::trace!("framebuffer {}x{} is empty; skipping render", fb_size.x, fb_size.y);
        return Ok(());
    }

    let index_type = IndexType::from_size(io.draw_idx_size)?;
    validate_draw_data(draw_data, index_type, textures)?;

    let _guard = StateGuard::new(gl, objects.attribs);
    setup_render_state(gl, objects, draw_data);

    let index_width = index_type.size_bytes();
    for list in &draw_data.draw_lists {
        gl.bind_buffer(BufferTarget::Array, Some(objects.vbo));
        gl.buffer_data(BufferTarget::Array, list.vtx_bytes());
        gl.bind_buffer(BufferTarget::ElementArray, Some(objects.ebo));
        gl.buffer_data(BufferTarget::ElementArray, list.idx_buffer.as_bytes());

        let mut elem_start = 0usize;
        for cmd in &list.cmd_buffer {
            match &cmd.kind {
                DrawCmdKind::Callback(callback) => callback.invoke(list, cmd),
                DrawCmdKind::Standard => {
                    let clip = cmd.clip_rect.scaled(draw_data.framebuffer_scale);
                    if clip.is_empty() {
                        log::trace!("skipping command with empty clip rect {clip:?}");
                    } else {
                        gl.bind_texture(textures.get(cmd.texture_id));
                        gl.scissor(clip.to_scissor(fb_size.y));
                        gl.draw_elements(cmd.elem_count, index_type, elem_start * index_width);
                    }
                }
            }
            elem_start += cmd.elem_count as usize;
        }
    }

    log::trace!(
        "rendered {} lists ({} vertices, {} indices)",
        draw_data.draw_lists.len(),
        draw_data.total_vtx_count(),
        draw_data.total_idx_count()
    );
    Ok(())
}
