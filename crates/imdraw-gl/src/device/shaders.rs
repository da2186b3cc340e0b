use crate::gl::{AttribType, VertexAttrib};
use crate::gui::DrawVert;

/// GLSL ES 1.00 vertex stage. Attribute names and types must agree with
/// [`VERTEX_LAYOUT`].
pub const VERTEX_SHADER: &str = include_str!("shaders/gui.vert");

/// GLSL ES 1.00 fragment stage: vertex color times the bound texture.
pub const FRAGMENT_SHADER: &str = include_str!("shaders/gui.frag");

pub const ATTRIB_POSITION: &str = "Position";
pub const ATTRIB_UV: &str = "UV";
pub const ATTRIB_COLOR: &str = "Color";

pub const UNIFORM_TEXTURE: &str = "Texture";
pub const UNIFORM_PROJ_MTX: &str = "ProjMtx";

/// One vertex stream: shader attribute name plus its layout in [`DrawVert`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttribBinding {
    pub name: &'static str,
    pub layout: VertexAttrib,
}

const STRIDE: u32 = DrawVert::SIZE as u32;

/// Vertex streams in location-resolution order.
pub const VERTEX_LAYOUT: [AttribBinding; 3] = [
    AttribBinding {
        name: ATTRIB_POSITION,
        layout: VertexAttrib {
            size: 2,
            ty: AttribType::Float,
            normalized: false,
            stride: STRIDE,
            offset: DrawVert::POS_OFFSET as u32,
        },
    },
    AttribBinding {
        name: ATTRIB_UV,
        layout: VertexAttrib {
            size: 2,
            ty: AttribType::Float,
            normalized: false,
            stride: STRIDE,
            offset: DrawVert::UV_OFFSET as u32,
        },
    },
    AttribBinding {
        name: ATTRIB_COLOR,
        layout: VertexAttrib {
            size: 4,
            ty: AttribType::UnsignedByte,
            normalized: true,
            stride: STRIDE,
            offset: DrawVert::COL_OFFSET as u32,
        },
    },
];
