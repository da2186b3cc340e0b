//! Input subsystem.
//!
//! Host events (DOM-shaped: key codes, pointer button indices, wheel delta
//! modes) are applied to the GUI's `Io` snapshot in delivery order. Gamepads
//! are polled once per frame instead of evented.

mod clipboard;
mod gamepad;
mod source;
mod translate;
mod types;

pub use clipboard::ClipboardCache;
pub use gamepad::{
    mapping_for, parse_device_id, poll_gamepads, DeviceId, Gamepad, GamepadButton, NavMapping,
    NavSource, STANDARD_MAPPING,
};
pub use source::{bind_translator, EventHandler, InputSource, SubscriptionId, SyntheticInputSource};
pub use translate::{clear_on_focus_loss, translate_event, MOUSE_BUTTON_MAP};
pub use types::{
    ClipboardEvent, DeltaMode, EventDisposition, HostEvent, KeyEvent, Modifiers, PointerEvent,
    WheelEvent,
};
