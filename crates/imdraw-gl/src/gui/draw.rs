use std::fmt;
use std::mem::{offset_of, size_of};
use std::rc::Rc;

use bytemuck::{Pod, Zeroable};

use crate::coords::{ClipRect, Vec2};

use super::TextureId;

/// One GUI vertex: position, UV and packed RGBA8 color.
///
/// The byte layout is part of the contract with the vertex shader; see
/// `device::shaders::VERTEX_LAYOUT`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct DrawVert {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    /// Little-endian RGBA bytes, consumed as four normalized unsigned bytes.
    pub col: u32,
}

impl DrawVert {
    pub const SIZE: usize = size_of::<DrawVert>();
    pub const POS_OFFSET: usize = offset_of!(DrawVert, pos);
    pub const UV_OFFSET: usize = offset_of!(DrawVert, uv);
    pub const COL_OFFSET: usize = offset_of!(DrawVert, col);

    #[inline]
    pub const fn new(pos: [f32; 2], uv: [f32; 2], col: u32) -> Self {
        Self { pos, uv, col }
    }
}

const _: () = assert!(DrawVert::SIZE == 20);
const _: () = assert!(DrawVert::POS_OFFSET == 0);
const _: () = assert!(DrawVert::UV_OFFSET == 8);
const _: () = assert!(DrawVert::COL_OFFSET == 16);

/// Index storage of a draw list. The GUI is built for one width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexBuffer {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl Default for IndexBuffer {
    fn default() -> Self {
        IndexBuffer::U16(Vec::new())
    }
}

impl IndexBuffer {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            IndexBuffer::U16(v) => v.len(),
            IndexBuffer::U32(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes per index.
    #[inline]
    pub fn width(&self) -> usize {
        match self {
            IndexBuffer::U16(_) => 2,
            IndexBuffer::U32(_) => 4,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexBuffer::U16(v) => bytemuck::cast_slice(v),
            IndexBuffer::U32(v) => bytemuck::cast_slice(v),
        }
    }
}

/// Custom rendering hook embedded in the draw stream.
///
/// Invoked with the owning list and the command in place of the default draw.
#[derive(Clone)]
pub struct UserCallback(Rc<dyn Fn(&DrawList, &DrawCmd)>);

impl UserCallback {
    pub fn new(f: impl Fn(&DrawList, &DrawCmd) + 'static) -> Self {
        Self(Rc::new(f))
    }

    #[inline]
    pub fn invoke(&self, list: &DrawList, cmd: &DrawCmd) {
        (self.0)(list, cmd)
    }
}

impl fmt::Debug for UserCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserCallback(..)")
    }
}

/// What the backend does with a command.
#[derive(Debug, Clone, Default)]
pub enum DrawCmdKind {
    /// Bind texture, set scissor, draw `elem_count` indices.
    #[default]
    Standard,
    /// Call the hook instead; nothing is submitted for this command.
    Callback(UserCallback),
}

/// One texture + clip rect + index range unit within a draw list.
#[derive(Debug, Clone)]
pub struct DrawCmd {
    /// Number of indices consumed by this command.
    pub elem_count: u32,
    /// Logical-pixel clip rect (scaled to framebuffer pixels at render time).
    pub clip_rect: ClipRect,
    pub texture_id: TextureId,
    pub kind: DrawCmdKind,
}

impl DrawCmd {
    pub fn new(elem_count: u32, clip_rect: ClipRect, texture_id: TextureId) -> Self {
        Self {
            elem_count,
            clip_rect,
            texture_id,
            kind: DrawCmdKind::Standard,
        }
    }

    pub fn callback(
        elem_count: u32,
        clip_rect: ClipRect,
        texture_id: TextureId,
        f: impl Fn(&DrawList, &DrawCmd) + 'static,
    ) -> Self {
        Self {
            elem_count,
            clip_rect,
            texture_id,
            kind: DrawCmdKind::Callback(UserCallback::new(f)),
        }
    }
}

/// One GUI-generated batch: vertices, indices and the commands that consume
/// the indices front to back.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub vtx_buffer: Vec<DrawVert>,
    pub idx_buffer: IndexBuffer,
    pub cmd_buffer: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new(vtx_buffer: Vec<DrawVert>, idx_buffer: IndexBuffer, cmd_buffer: Vec<DrawCmd>) -> Self {
        Self {
            vtx_buffer,
            idx_buffer,
            cmd_buffer,
        }
    }

    #[inline]
    pub fn vtx_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vtx_buffer)
    }
}

/// Per-frame output of the GUI library.
#[derive(Debug, Clone, Default)]
pub struct DrawData {
    /// Logical display size.
    pub display_size: Vec2,
    /// Physical pixels per logical pixel, per axis.
    pub framebuffer_scale: Vec2,
    /// Lists in paint order (back to front).
    pub draw_lists: Vec<DrawList>,
}

impl DrawData {
    pub fn new(display_size: Vec2, framebuffer_scale: Vec2, draw_lists: Vec<DrawList>) -> Self {
        Self {
            display_size,
            framebuffer_scale,
            draw_lists,
        }
    }

    /// Display size in framebuffer pixels.
    #[inline]
    pub fn framebuffer_size(&self) -> Vec2 {
        self.display_size.scale(self.framebuffer_scale)
    }

    pub fn total_vtx_count(&self) -> usize {
        self.draw_lists.iter().map(|l| l.vtx_buffer.len()).sum()
    }

    pub fn total_idx_count(&self) -> usize {
        self.draw_lists.iter().map(|l| l.idx_buffer.len()).sum()
    }
}
