use std::fmt;

use bitflags::bitflags;

use crate::coords::Vec2;

use super::{Key, KeyMap, MouseCursor, NavInput, TextureId};

/// Size of the key-state table. Host key codes index into it directly.
pub const KEYS_DOWN_LEN: usize = 512;

/// Mouse button slots in library convention: primary, secondary, middle,
/// back, forward.
pub const MOUSE_BUTTON_COUNT: usize = 5;

bitflags! {
    /// Features the application enables on the GUI.
    #[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
    pub struct ConfigFlags: u32 {
        const NAV_ENABLE_KEYBOARD = 1 << 0;
        const NAV_ENABLE_GAMEPAD = 1 << 1;
        const NO_MOUSE = 1 << 4;
        const NO_MOUSE_CURSOR_CHANGE = 1 << 5;
    }
}

bitflags! {
    /// Capabilities the backend advertises to the GUI.
    #[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
    pub struct BackendFlags: u32 {
        const HAS_GAMEPAD = 1 << 0;
        const HAS_MOUSE_CURSORS = 1 << 1;
        const HAS_SET_MOUSE_POS = 1 << 2;
    }
}

pub type SetClipboardFn = Box<dyn FnMut(&str)>;
pub type GetClipboardFn = Box<dyn FnMut() -> String>;

/// Font atlas bitmap as the GUI library rasterized it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontAtlas {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
    /// Written by the backend once the atlas lives on the GPU.
    pub tex_id: Option<TextureId>,
}

impl FontAtlas {
    pub fn new_rgba32(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
            tex_id: None,
        }
    }

    /// Expected pixel buffer length for the declared dimensions.
    #[inline]
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Input/output snapshot shared with the GUI library.
///
/// The backend writes the input side (display, time, mouse, keys, nav) and
/// reads the output side (`want_capture_*`, `mouse_cursor`, ...).
pub struct Io {
    pub display_size: Vec2,
    pub display_framebuffer_scale: Vec2,
    /// Seconds since the previous frame.
    pub delta_time: f32,

    pub config_flags: ConfigFlags,
    pub backend_flags: BackendFlags,
    pub opt_mac_osx_behaviors: bool,

    /// Pointer position in logical pixels.
    pub mouse_pos: Vec2,
    pub mouse_down: [bool; MOUSE_BUTTON_COUNT],
    /// Vertical wheel; positive scrolls content up.
    pub mouse_wheel: f32,
    pub mouse_wheel_h: f32,

    pub key_ctrl: bool,
    pub key_shift: bool,
    pub key_alt: bool,
    pub key_super: bool,
    pub keys_down: [bool; KEYS_DOWN_LEN],
    pub key_map: KeyMap,
    pub input_queue_characters: Vec<char>,

    pub nav_inputs: [f32; NavInput::COUNT],

    /// Bytes per draw index the GUI was built with (2 or 4).
    pub draw_idx_size: usize,

    pub fonts: FontAtlas,

    pub set_clipboard_text_fn: Option<SetClipboardFn>,
    pub get_clipboard_text_fn: Option<GetClipboardFn>,

    // Outputs written by the GUI during its frame.
    pub want_capture_mouse: bool,
    pub want_capture_keyboard: bool,
    pub want_set_mouse_pos: bool,
    pub mouse_draw_cursor: bool,
    pub mouse_cursor: MouseCursor,
}

impl Default for Io {
    fn default() -> Self {
        Self {
            display_size: Vec2::new(-1.0, -1.0),
            display_framebuffer_scale: Vec2::new(1.0, 1.0),
            delta_time: 1.0 / 60.0,
            config_flags: ConfigFlags::empty(),
            backend_flags: BackendFlags::empty(),
            opt_mac_osx_behaviors: false,
            mouse_pos: Vec2::new(-f32::MAX, -f32::MAX),
            mouse_down: [false; MOUSE_BUTTON_COUNT],
            mouse_wheel: 0.0,
            mouse_wheel_h: 0.0,
            key_ctrl: false,
            key_shift: false,
            key_alt: false,
            key_super: false,
            keys_down: [false; KEYS_DOWN_LEN],
            key_map: KeyMap::default(),
            input_queue_characters: Vec::new(),
            nav_inputs: [0.0; NavInput::COUNT],
            draw_idx_size: 2,
            fonts: FontAtlas::default(),
            set_clipboard_text_fn: None,
            get_clipboard_text_fn: None,
            want_capture_mouse: false,
            want_capture_keyboard: false,
            want_set_mouse_pos: false,
            mouse_draw_cursor: false,
            mouse_cursor: MouseCursor::Arrow,
        }
    }
}

impl Io {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one character of text input.
    #[inline]
    pub fn add_input_character(&mut self, c: char) {
        self.input_queue_characters.push(c);
    }

    #[inline]
    pub fn nav_input(&self, nav: NavInput) -> f32 {
        self.nav_inputs[nav.index()]
    }

    /// Whether the named key's mapped code is currently held.
    pub fn is_key_down(&self, key: Key) -> bool {
        self.key_map
            .get(key)
            .and_then(|code| self.keys_down.get(code).copied())
            .unwrap_or(false)
    }

    /// Asks the installed clipboard bridge for its text.
    pub fn clipboard_text(&mut self) -> Option<String> {
        self.get_clipboard_text_fn.as_mut().map(|f| f())
    }

    /// Hands text to the installed clipboard bridge.
    pub fn set_clipboard_text(&mut self, text: &str) {
        if let Some(f) = self.set_clipboard_text_fn.as_mut() {
            f(text);
        }
    }
}

impl fmt::Debug for Io {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys_held = self.keys_down.iter().filter(|d| **d).count();
        f.debug_struct("Io")
            .field("display_size", &self.display_size)
            .field("display_framebuffer_scale", &self.display_framebuffer_scale)
            .field("delta_time", &self.delta_time)
            .field("config_flags", &self.config_flags)
            .field("backend_flags", &self.backend_flags)
            .field("mouse_pos", &self.mouse_pos)
            .field("mouse_down", &self.mouse_down)
            .field("mouse_wheel", &self.mouse_wheel)
            .field("mouse_wheel_h", &self.mouse_wheel_h)
            .field("keys_held", &keys_held)
            .field("input_queue_characters", &self.input_queue_characters)
            .field("nav_inputs", &self.nav_inputs)
            .field("draw_idx_size", &self.draw_idx_size)
            .field("font_tex_id", &self.fonts.tex_id)
            .field("has_clipboard", &self.get_clipboard_text_fn.is_some())
            .field("mouse_cursor", &self.mouse_cursor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_lookup_goes_through_map() {
        let mut io = Io::new();
        assert!(!io.is_key_down(Key::Tab));
        io.key_map.set(Key::Tab, 9);
        io.keys_down[9] = true;
        assert!(io.is_key_down(Key::Tab));
    }

    #[test]
    fn clipboard_without_bridge_is_none() {
        let mut io = Io::new();
        io.set_clipboard_text("ignored");
        assert_eq!(io.clipboard_text(), None);
    }

    #[test]
    fn atlas_len_matches_rgba32() {
        let atlas = FontAtlas::new_rgba32(4, 2, vec![0; 32]);
        assert_eq!(atlas.expected_len(), 32);
    }
}
