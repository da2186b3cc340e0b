/// Modifier keys held while an event fired.
///
/// Stored as booleans rather than bitflags to match host event metadata.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Command on macOS, Windows key elsewhere.
    pub meta: bool,
}

/// Keyboard down/up payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
    /// Host key code; indexes `Io::keys_down` directly.
    pub key_code: i32,
    /// Host key name ("Tab", "a", ...).
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key_code: i32, key: impl Into<String>) -> Self {
        Self {
            key_code,
            key: key.into(),
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Pointer payload, logical pixels relative to the drawing surface.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    /// Host button index: 0 primary, 1 middle, 2 secondary, 3 back, 4 forward.
    pub button: u16,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32, button: u16) -> Self {
        Self { x, y, button }
    }
}

/// Unit of wheel deltas.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    /// Factor turning host deltas into GUI wheel units (one unit is about five
    /// lines of text).
    #[inline]
    pub fn scale(self) -> f32 {
        match self {
            DeltaMode::Pixel => 0.01,
            DeltaMode::Line => 0.2,
            DeltaMode::Page => 1.0,
        }
    }
}

/// Wheel payload. Positive `dy` scrolls content down (host convention).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct WheelEvent {
    pub mode: DeltaMode,
    pub dx: f32,
    pub dy: f32,
}

impl WheelEvent {
    pub fn new(mode: DeltaMode, dx: f32, dy: f32) -> Self {
        Self { mode, dx, dy }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardEvent {
    Copy,
    Cut,
    /// Text the host is pasting.
    Paste(String),
}

/// Raw host events, in the shape browsers and windowing layers deliver them.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    /// Text input: one character code.
    KeyPress { char_code: u32 },
    PointerMove(PointerEvent),
    PointerDown(PointerEvent),
    PointerUp(PointerEvent),
    ContextMenu,
    Wheel(WheelEvent),
    /// The drawing surface lost focus.
    Blur,
    Clipboard(ClipboardEvent),
}

/// What the host should do after an event was applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDisposition {
    /// Suppress the host's default action for the event.
    pub prevent_default: bool,
    /// Text to place on the system clipboard (copy/cut).
    pub clipboard_write: Option<String>,
}

impl EventDisposition {
    pub(crate) fn prevent(prevent_default: bool) -> Self {
        Self {
            prevent_default,
            clipboard_write: None,
        }
    }
}
