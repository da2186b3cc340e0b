/// Opaque texture reference carried by draw commands.
///
/// The GUI library never interprets it; the backend maps it to a GPU texture
/// through its texture registry.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

impl TextureId {
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}
