use crate::coords::Vec2;
use crate::error::{BackendError, Result};
use crate::gui::{Io, KEYS_DOWN_LEN, MOUSE_BUTTON_COUNT};

use super::clipboard::ClipboardCache;
use super::types::{
    ClipboardEvent, EventDisposition, HostEvent, KeyEvent, Modifiers, PointerEvent, WheelEvent,
};

/// Host button index -> GUI button slot.
///
/// Hosts number buttons primary, middle, secondary, back, forward; the GUI
/// wants primary, secondary, middle, back, forward.
pub const MOUSE_BUTTON_MAP: [usize; MOUSE_BUTTON_COUNT] = [0, 2, 1, 3, 4];

/// Applies one host event to `io` and reports what the host should do with it.
///
/// Events must be fed in delivery order. Only an out-of-range key code is an
/// error; it leaves `io` untouched.
pub fn translate_event(
    io: &mut Io,
    clipboard: &ClipboardCache,
    event: &HostEvent,
) -> Result<EventDisposition> {
    log::trace!("host event: {event:?}");

    let disposition = match event {
        HostEvent::KeyDown(key) => {
            set_key(io, key, true)?;
            EventDisposition::prevent(key.key == "Tab")
        }
        HostEvent::KeyUp(key) => {
            set_key(io, key, false)?;
            EventDisposition::prevent(io.want_capture_keyboard)
        }
        HostEvent::KeyPress { char_code } => {
            match char::from_u32(*char_code) {
                Some('\0') => {}
                Some(c) => io.add_input_character(c),
                None => log::debug!("ignoring invalid char code {char_code:#x}"),
            }
            EventDisposition::prevent(io.want_capture_keyboard)
        }
        HostEvent::PointerMove(p) => {
            io.mouse_pos = Vec2::new(p.x, p.y);
            EventDisposition::prevent(io.want_capture_mouse)
        }
        HostEvent::PointerDown(p) => {
            io.mouse_pos = Vec2::new(p.x, p.y);
            set_button(io, p, true);
            EventDisposition::prevent(false)
        }
        HostEvent::PointerUp(p) => {
            set_button(io, p, false);
            EventDisposition::prevent(io.want_capture_mouse)
        }
        HostEvent::ContextMenu => EventDisposition::prevent(io.want_capture_mouse),
        HostEvent::Wheel(w) => {
            apply_wheel(io, w);
            EventDisposition::prevent(io.want_capture_mouse)
        }
        HostEvent::Blur => {
            clear_on_focus_loss(io);
            EventDisposition::prevent(false)
        }
        HostEvent::Clipboard(ev) => clipboard_event(clipboard, ev),
    };
    Ok(disposition)
}

fn set_key(io: &mut Io, key: &KeyEvent, down: bool) -> Result<()> {
    let code = usize::try_from(key.key_code)
        .ok()
        .filter(|&c| c < KEYS_DOWN_LEN)
        .ok_or_else(|| {
            BackendError::invalid(format!(
                "key code {} outside 0..{KEYS_DOWN_LEN}",
                key.key_code
            ))
        })?;

    apply_modifiers(io, key.modifiers);
    io.keys_down[code] = down;
    Ok(())
}

fn apply_modifiers(io: &mut Io, m: Modifiers) {
    io.key_ctrl = m.ctrl;
    io.key_shift = m.shift;
    io.key_alt = m.alt;
    io.key_super = m.meta;
}

fn set_button(io: &mut Io, p: &PointerEvent, down: bool) {
    match MOUSE_BUTTON_MAP.get(usize::from(p.button)) {
        Some(&slot) => io.mouse_down[slot] = down,
        None => log::debug!("ignoring host mouse button {}", p.button),
    }
}

fn apply_wheel(io: &mut Io, w: &WheelEvent) {
    let scale = w.mode.scale();
    io.mouse_wheel_h = w.dx * scale;
    io.mouse_wheel = -w.dy * scale;
}

/// Drops every held modifier, key and button so nothing sticks while the
/// surface is not receiving release events.
pub fn clear_on_focus_loss(io: &mut Io) {
    apply_modifiers(io, Modifiers::default());
    io.keys_down.fill(false);
    io.mouse_down.fill(false);
}

fn clipboard_event(clipboard: &ClipboardCache, ev: &ClipboardEvent) -> EventDisposition {
    match ev {
        ClipboardEvent::Copy | ClipboardEvent::Cut => EventDisposition {
            prevent_default: true,
            clipboard_write: Some(clipboard.text()),
        },
        ClipboardEvent::Paste(text) => {
            clipboard.set_text(text);
            EventDisposition::prevent(true)
        }
    }
}
