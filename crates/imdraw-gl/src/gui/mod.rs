//! Data exchanged with the immediate-mode GUI library.
//!
//! The GUI library itself is an external collaborator: it fills `DrawData`
//! each frame and reads `Io` each frame. This module only fixes the shape of
//! those structures as this backend consumes and writes them.

mod cursor;
mod draw;
mod io;
mod keys;
mod nav;
mod texture;

pub use cursor::MouseCursor;
pub use draw::{DrawCmd, DrawCmdKind, DrawData, DrawList, DrawVert, IndexBuffer, UserCallback};
pub use io::{
    BackendFlags, ConfigFlags, FontAtlas, GetClipboardFn, Io, SetClipboardFn, KEYS_DOWN_LEN,
    MOUSE_BUTTON_COUNT,
};
pub use keys::{Key, KeyMap};
pub use nav::NavInput;
pub use texture::TextureId;
