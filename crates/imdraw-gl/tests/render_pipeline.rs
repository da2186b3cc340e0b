use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use imdraw_gl::coords::{ClipRect, ScissorRect, Vec2};
use imdraw_gl::gl::{BufferTarget, Capability, Gl, GlCall, IndexType, RecordingGl};
use imdraw_gl::gui::{DrawCmd, DrawData, DrawList, DrawVert, FontAtlas, IndexBuffer, Io, TextureId};
use imdraw_gl::{Backend, BackendConfig, BackendError, ConfigError};

fn setup() -> (Backend<RecordingGl>, Io, TextureId) {
    let mut backend = Backend::new(RecordingGl::new(), BackendConfig::default());
    let mut io = Io::new();
    io.fonts = FontAtlas::new_rgba32(2, 2, vec![255; 16]);
    backend.initialize(&mut io).unwrap();
    let font = io.fonts.tex_id.unwrap();
    backend.gl().clear_calls();
    (backend, io, font)
}

fn one_list(indices: IndexBuffer, cmds: Vec<DrawCmd>) -> DrawData {
    DrawData::new(
        Vec2::new(640.0, 480.0),
        Vec2::new(1.0, 1.0),
        vec![DrawList::new(vec![DrawVert::default(); 4], indices, cmds)],
    )
}

fn full_clip() -> ClipRect {
    ClipRect::new(0.0, 0.0, 640.0, 480.0)
}

#[test]
fn test_draws_each_command_with_its_texture_and_scissor() {
    let (backend, io, font) = setup();
    let dd = one_list(
        IndexBuffer::U16(vec![0, 1, 2, 0, 2, 3]),
        vec![
            DrawCmd::new(3, full_clip(), font),
            DrawCmd::new(3, ClipRect::new(10.0, 20.0, 50.0, 60.0), font),
        ],
    );

    backend.render_draw_data(&io, Some(&dd)).unwrap();

    let draws = backend.gl().draw_calls();
    assert_eq!(draws.len(), 2);
    let font_gl = backend.texture(font);
    assert!(draws.iter().all(|d| d.texture == font_gl));
    assert_eq!(draws[0].byte_offset, 0);
    assert_eq!(draws[1].byte_offset, 6);
    assert_eq!(draws[1].index_type, IndexType::UnsignedShort);
    assert_eq!(
        draws[1].scissor,
        Some(ScissorRect {
            x: 10,
            y: 420,
            width: 40,
            height: 40
        })
    );
}

#[test]
fn test_uploads_vertices_and_indices_per_list() {
    let (backend, io, font) = setup();
    let dd = one_list(
        IndexBuffer::U16(vec![0, 1, 2]),
        vec![DrawCmd::new(3, full_clip(), font)],
    );
    backend.render_draw_data(&io, Some(&dd)).unwrap();

    let uploads: Vec<(BufferTarget, usize)> = backend
        .gl()
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            GlCall::BufferData { target, data } => Some((target, data.len())),
            _ => None,
        })
        .collect();
    assert_eq!(
        uploads,
        vec![(BufferTarget::Array, 4 * 20), (BufferTarget::ElementArray, 6)]
    );
}

#[test]
fn test_sets_blend_and_disables_depth_and_cull_while_drawing() {
    let (backend, io, font) = setup();
    let dd = one_list(
        IndexBuffer::U16(vec![0, 1, 2]),
        vec![DrawCmd::new(3, full_clip(), font)],
    );
    backend.render_draw_data(&io, Some(&dd)).unwrap();

    let calls = backend.gl().calls();
    let first_draw = calls
        .iter()
        .position(|c| matches!(c, GlCall::DrawElements { .. }))
        .unwrap();
    let before = &calls[..first_draw];
    assert!(before.contains(&GlCall::Enable(Capability::Blend)));
    assert!(before.contains(&GlCall::Enable(Capability::ScissorTest)));
    assert!(before.contains(&GlCall::Disable(Capability::DepthTest)));
    assert!(before.contains(&GlCall::Disable(Capability::CullFace)));
}

#[test]
fn test_host_state_is_restored_after_render() {
    let (backend, io, font) = setup();
    let gl = backend.gl();
    let host_tex = gl.create_texture().unwrap();
    let host_buf = gl.create_buffer().unwrap();
    gl.bind_texture(Some(host_tex));
    gl.bind_buffer(BufferTarget::Array, Some(host_buf));
    gl.enable(Capability::DepthTest);
    let before = gl.bindings();

    let dd = one_list(
        IndexBuffer::U16(vec![0, 1, 2]),
        vec![DrawCmd::new(3, full_clip(), font)],
    );
    backend.render_draw_data(&io, Some(&dd)).unwrap();

    assert_eq!(gl.bindings(), before);
    assert!(gl.enabled(Capability::DepthTest));
    assert!(!gl.enabled(Capability::Blend));
    assert!(!gl.enabled(Capability::ScissorTest));
    assert!(gl.enabled_attribs().is_empty());
}

#[test]
fn test_empty_draw_data_still_restores_state() {
    let (backend, io, _) = setup();
    let before = backend.gl().bindings();
    let dd = DrawData::new(Vec2::new(640.0, 480.0), Vec2::new(1.0, 1.0), Vec::new());
    backend.render_draw_data(&io, Some(&dd)).unwrap();
    assert_eq!(backend.gl().bindings(), before);
    assert!(backend.gl().draw_calls().is_empty());
}

#[test]
fn test_zero_framebuffer_touches_nothing() {
    let (backend, io, font) = setup();
    let dd = DrawData::new(
        Vec2::new(0.0, 480.0),
        Vec2::new(1.0, 1.0),
        one_list(IndexBuffer::U16(vec![0, 1, 2]), vec![DrawCmd::new(3, full_clip(), font)]).draw_lists,
    );
    backend.render_draw_data(&io, Some(&dd)).unwrap();
    assert!(backend.gl().calls().is_empty());
}

#[test]
fn test_u32_indices_follow_io_index_size() {
    let (backend, mut io, font) = setup();
    io.draw_idx_size = 4;
    let dd = one_list(
        IndexBuffer::U32(vec![0, 1, 2, 2, 3, 0]),
        vec![DrawCmd::new(3, full_clip(), font), DrawCmd::new(3, full_clip(), font)],
    );
    backend.render_draw_data(&io, Some(&dd)).unwrap();

    let draws = backend.gl().draw_calls();
    assert_eq!(draws.len(), 2);
    assert!(draws.iter().all(|d| d.index_type == IndexType::UnsignedInt));
    assert_eq!(draws[1].byte_offset, 12);
}

#[test]
fn test_callback_runs_instead_of_draw_and_offsets_advance() {
    let (backend, io, font) = setup();
    let seen = Rc::new(Cell::new(0u32));
    let hook = Rc::clone(&seen);
    let dd = one_list(
        IndexBuffer::U16(vec![0; 9]),
        vec![
            DrawCmd::new(3, full_clip(), font),
            DrawCmd::callback(3, full_clip(), font, move |_, cmd| hook.set(cmd.elem_count)),
            DrawCmd::new(3, full_clip(), font),
        ],
    );
    backend.render_draw_data(&io, Some(&dd)).unwrap();

    assert_eq!(seen.get(), 3);
    let offsets: Vec<usize> = backend.gl().draw_calls().iter().map(|d| d.byte_offset).collect();
    assert_eq!(offsets, vec![0, 12]);
}

#[test]
fn test_state_restored_when_callback_panics() {
    let (backend, io, font) = setup();
    let before = backend.gl().bindings();
    let dd = one_list(
        IndexBuffer::U16(vec![0, 1, 2]),
        vec![DrawCmd::callback(3, full_clip(), font, |_, _| panic!("hook failed"))],
    );

    let result = catch_unwind(AssertUnwindSafe(|| backend.render_draw_data(&io, Some(&dd))));
    assert!(result.is_err());
    assert_eq!(backend.gl().bindings(), before);
    assert!(!backend.gl().enabled(Capability::Blend));
}

#[test]
fn test_missing_draw_data_is_invalid_argument() {
    let (backend, io, _) = setup();
    let err = backend.render_draw_data(&io, None).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(backend.gl().calls().is_empty());
}

#[test]
fn test_render_before_initialize_fails() {
    let backend = Backend::new(RecordingGl::new(), BackendConfig::default());
    let io = Io::new();
    let dd = DrawData::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0), Vec::new());
    let err = backend.render_draw_data(&io, Some(&dd)).unwrap_err();
    assert!(matches!(err, BackendError::Config(ConfigError::NotInitialized)));
}

#[test]
fn test_unknown_texture_rejected_before_any_gl_call() {
    let (backend, io, _) = setup();
    let dd = one_list(
        IndexBuffer::U16(vec![0, 1, 2]),
        vec![DrawCmd::new(3, full_clip(), TextureId(4242))],
    );
    let err = backend.render_draw_data(&io, Some(&dd)).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(backend.gl().calls().is_empty());
}

#[test]
fn test_command_past_index_buffer_rejected() {
    let (backend, io, font) = setup();
    let dd = one_list(
        IndexBuffer::U16(vec![0, 1, 2]),
        vec![DrawCmd::new(6, full_clip(), font)],
    );
    assert!(backend
        .render_draw_data(&io, Some(&dd))
        .unwrap_err()
        .is_invalid_argument());
    assert!(backend.gl().calls().is_empty());
}

#[test]
fn test_registered_host_texture_is_drawable() {
    let (mut backend, io, _) = setup();
    let host_tex = backend.gl().create_texture().unwrap();
    let id = backend.register_texture(host_tex);
    let dd = one_list(
        IndexBuffer::U16(vec![0, 1, 2]),
        vec![DrawCmd::new(3, full_clip(), id)],
    );
    backend.render_draw_data(&io, Some(&dd)).unwrap();
    assert_eq!(backend.gl().draw_calls()[0].texture, Some(host_tex));

    assert_eq!(backend.unregister_texture(id), Some(host_tex));
    assert!(backend
        .render_draw_data(&io, Some(&dd))
        .unwrap_err()
        .is_invalid_argument());
}

#[test]
fn test_host_active_texture_unit_is_restored() {
    let (backend, io, font) = setup();
    let gl = backend.gl();
    let host_unit0 = gl.create_texture().unwrap();
    let host_unit3 = gl.create_texture().unwrap();
    gl.bind_texture(Some(host_unit0));
    gl.active_texture(3);
    gl.bind_texture(Some(host_unit3));
    let before = gl.bindings();
    gl.clear_calls();

    let dd = one_list(
        IndexBuffer::U16(vec![0, 1, 2]),
        vec![DrawCmd::new(3, full_clip(), font)],
    );
    backend.render_draw_data(&io, Some(&dd)).unwrap();

    let last_unit = gl.calls().iter().rev().find_map(|c| match c {
        GlCall::ActiveTexture(unit) => Some(*unit),
        _ => None,
    });
    assert_eq!(last_unit, Some(3));
    assert_eq!(gl.bindings(), before);
    assert_eq!(gl.texture_on_unit(0), Some(host_unit0));
    assert_eq!(gl.texture_on_unit(3), Some(host_unit3));
}

#[test]
fn test_lists_draw_in_order_with_per_list_offsets_and_scaled_scissors() {
    let (backend, io, font) = setup();
    let cmds = || {
        vec![
            DrawCmd::new(3, ClipRect::new(0.0, 0.0, 10.0, 10.0), font),
            DrawCmd::new(3, ClipRect::new(2.0, 3.0, 6.0, 8.0), font),
        ]
    };
    let dd = DrawData::new(
        Vec2::new(10.0, 10.0),
        Vec2::new(2.0, 2.0),
        vec![
            DrawList::new(vec![DrawVert::default(); 4], IndexBuffer::U16(vec![0; 6]), cmds()),
            DrawList::new(vec![DrawVert::default(); 3], IndexBuffer::U16(vec![0; 6]), cmds()),
        ],
    );
    backend.render_draw_data(&io, Some(&dd)).unwrap();

    let draws = backend.gl().draw_calls();
    let offsets: Vec<usize> = draws.iter().map(|d| d.byte_offset).collect();
    assert_eq!(offsets, vec![0, 6, 0, 6]);

    let full = ScissorRect {
        x: 0,
        y: 0,
        width: 20,
        height: 20,
    };
    let inner = ScissorRect {
        x: 4,
        y: 4,
        width: 8,
        height: 10,
    };
    let scissors: Vec<Option<ScissorRect>> = draws.iter().map(|d| d.scissor).collect();
    assert_eq!(scissors, vec![Some(full), Some(inner), Some(full), Some(inner)]);

    let uploads: Vec<(BufferTarget, usize)> = backend
        .gl()
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            GlCall::BufferData { target, data } => Some((target, data.len())),
            _ => None,
        })
        .collect();
    assert_eq!(
        uploads,
        vec![
            (BufferTarget::Array, 4 * 20),
            (BufferTarget::ElementArray, 12),
            (BufferTarget::Array, 3 * 20),
            (BufferTarget::ElementArray, 12),
        ]
    );
}

#[test]
fn test_command_with_inverted_clip_is_skipped() {
    let (backend, io, font) = setup();
    let dd = one_list(
        IndexBuffer::U16(vec![0; 6]),
        vec![
            DrawCmd::new(3, ClipRect::new(50.0, 20.0, 10.0, 60.0), font),
            DrawCmd::new(3, full_clip(), font),
        ],
    );
    backend.render_draw_data(&io, Some(&dd)).unwrap();

    let draws = backend.gl().draw_calls();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].byte_offset, 6);
    assert!(!backend
        .gl()
        .calls()
        .iter()
        .any(|c| matches!(c, GlCall::Scissor(r) if r.width < 0 || r.height < 0)));
}
