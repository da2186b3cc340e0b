use crate::error::{BackendError, Result};

/// Shader pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Buffer binding point.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    /// Vertex data (`ARRAY_BUFFER`).
    Array,
    /// Index data (`ELEMENT_ARRAY_BUFFER`).
    ElementArray,
}

/// Toggleable fixed-function state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Capability {
    Blend,
    CullFace,
    DepthTest,
    ScissorTest,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::Blend,
        Capability::CullFace,
        Capability::DepthTest,
        Capability::ScissorTest,
    ];
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BlendEquation {
    FuncAdd,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BlendFactor {
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

/// Component type of a vertex attribute.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AttribType {
    Float,
    UnsignedByte,
}

impl AttribType {
    #[inline]
    pub const fn size_bytes(self) -> usize {
        match self {
            AttribType::Float => 4,
            AttribType::UnsignedByte => 1,
        }
    }
}

/// Layout of one vertex attribute inside the bound array buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct VertexAttrib {
    /// Number of components (1..=4).
    pub size: u32,
    pub ty: AttribType,
    pub normalized: bool,
    pub stride: u32,
    pub offset: u32,
}

/// Element type of the bound index buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IndexType {
    UnsignedShort,
    UnsignedInt,
}

impl IndexType {
    /// Picks the element type for an index width in bytes.
    ///
    /// Only 2 and 4 are meaningful; anything else would make the GPU read the
    /// index buffer with the wrong stride.
    pub fn from_size(bytes: usize) -> Result<Self> {
        match bytes {
            2 => Ok(IndexType::UnsignedShort),
            4 => Ok(IndexType::UnsignedInt),
            other => Err(BackendError::InvalidArgument(format!(
                "unsupported draw index width {other} (expected 2 or 4)"
            ))),
        }
    }

    #[inline]
    pub const fn size_bytes(self) -> usize {
        match self {
            IndexType::UnsignedShort => 2,
            IndexType::UnsignedInt => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_type_accepts_two_and_four() {
        assert_eq!(IndexType::from_size(2).unwrap(), IndexType::UnsignedShort);
        assert_eq!(IndexType::from_size(4).unwrap(), IndexType::UnsignedInt);
        assert_eq!(IndexType::UnsignedInt.size_bytes(), 4);
    }

    #[test]
    fn index_type_rejects_other_widths() {
        for bad in [0, 1, 3, 8] {
            assert!(matches!(IndexType::from_size(bad), Err(BackendError::InvalidArgument(_))));
        }
    }
}
