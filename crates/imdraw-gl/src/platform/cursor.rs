use crate::gui::{ConfigFlags, Io, MouseCursor};

/// Cursor shape the host should show over the drawing surface.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum HostCursor {
    Hidden,
    #[default]
    Default,
    Text,
    Move,
    NsResize,
    EwResize,
    NeswResize,
    NwseResize,
}

impl HostCursor {
    /// CSS `cursor` property value.
    pub fn css_name(self) -> &'static str {
        match self {
            HostCursor::Hidden => "none",
            HostCursor::Default => "default",
            HostCursor::Text => "text",
            HostCursor::Move => "move",
            HostCursor::NsResize => "ns-resize",
            HostCursor::EwResize => "ew-resize",
            HostCursor::NeswResize => "nesw-resize",
            HostCursor::NwseResize => "nwse-resize",
        }
    }
}

impl From<MouseCursor> for HostCursor {
    fn from(cursor: MouseCursor) -> Self {
        match cursor {
            MouseCursor::None => HostCursor::Hidden,
            MouseCursor::Arrow => HostCursor::Default,
            MouseCursor::TextInput => HostCursor::Text,
            MouseCursor::ResizeAll => HostCursor::Move,
            MouseCursor::ResizeNS => HostCursor::NsResize,
            MouseCursor::ResizeEW => HostCursor::EwResize,
            MouseCursor::ResizeNESW => HostCursor::NeswResize,
            MouseCursor::ResizeNWSE => HostCursor::NwseResize,
        }
    }
}

/// Host cursor for the GUI's current request.
///
/// `None` when the application opted out of cursor changes.
pub fn resolve_cursor(io: &Io) -> Option<HostCursor> {
    if io.config_flags.contains(ConfigFlags::NO_MOUSE_CURSOR_CHANGE) {
        return None;
    }
    if io.mouse_draw_cursor {
        return Some(HostCursor::Hidden);
    }
    Some(io.mouse_cursor.into())
}
