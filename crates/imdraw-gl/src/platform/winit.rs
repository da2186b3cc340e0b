use anyhow::Context;
use winit::dpi::{LogicalPosition, PhysicalPosition};
use winit::event::{ElementState, Ime, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key as LogicalKey, KeyCode, ModifiersState, NamedKey, PhysicalKey};
use winit::window::{CursorIcon, Window};

use crate::coords::Vec2;
use crate::input::{DeltaMode, HostEvent, KeyEvent, Modifiers, PointerEvent, WheelEvent};

use super::HostCursor;

/// Turns winit window events into [`HostEvent`]s.
///
/// winit reports modifiers and pointer position as separate events, so both
/// are tracked here and attached to the events that need them.
#[derive(Debug, Default)]
pub struct WinitEventTranslator {
    modifiers: Modifiers,
    pointer: (f32, f32),
}

impl WinitEventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns zero or more host events for `event`, in delivery order.
    pub fn translate(&mut self, window: &Window, event: &WindowEvent) -> Vec<HostEvent> {
        self.translate_scaled(window.scale_factor(), event)
    }

    /// Same as [`WinitEventTranslator::translate`] with an explicit scale factor.
    pub fn translate_scaled(&mut self, scale_factor: f64, event: &WindowEvent) -> Vec<HostEvent> {
        match event {
            WindowEvent::ModifiersChanged(m) => {
                self.modifiers = map_modifiers(m.state());
                Vec::new()
            }

            WindowEvent::Focused(false) => vec![HostEvent::Blur],

            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = to_logical_f32(scale_factor, *position);
                let (x, y) = self.pointer;
                vec![HostEvent::PointerMove(PointerEvent::new(x, y, 0))]
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = map_mouse_button(*button) else {
                    log::debug!("unmapped winit mouse button {button:?}");
                    return Vec::new();
                };
                let (x, y) = self.pointer;
                let p = PointerEvent::new(x, y, button);
                match state {
                    ElementState::Pressed => vec![HostEvent::PointerDown(p)],
                    ElementState::Released => vec![HostEvent::PointerUp(p)],
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                vec![HostEvent::Wheel(wheel_from_delta(scale_factor, *delta))]
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let Some(key_code) = dom_key_code(event.physical_key) else {
                    return Vec::new();
                };
                let key = KeyEvent::new(key_code as i32, dom_key_name(&event.logical_key))
                    .with_modifiers(self.modifiers);
                match event.state {
                    ElementState::Pressed => {
                        let mut out = vec![HostEvent::KeyDown(key)];
                        if let Some(text) = event.text.as_ref() {
                            out.extend(text_events(text));
                        }
                        out
                    }
                    ElementState::Released => vec![HostEvent::KeyUp(key)],
                }
            }

            WindowEvent::Ime(Ime::Commit(text)) => text_events(text).collect(),

            _ => Vec::new(),
        }
    }
}

fn text_events(text: &str) -> impl Iterator<Item = HostEvent> + '_ {
    text.chars()
        .filter(|c| !c.is_control())
        .map(|c| HostEvent::KeyPress { char_code: c as u32 })
}

fn to_logical_f32(scale_factor: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

/// winit button -> host button index (primary, middle, secondary, back, forward).
pub fn map_mouse_button(b: WinitMouseButton) -> Option<u16> {
    match b {
        WinitMouseButton::Left => Some(0),
        WinitMouseButton::Middle => Some(1),
        WinitMouseButton::Right => Some(2),
        WinitMouseButton::Back => Some(3),
        WinitMouseButton::Forward => Some(4),
        WinitMouseButton::Other(_) => None,
    }
}

/// Host wheel event from a winit delta.
///
/// winit's positive directions move content right/down; host wheel deltas are
/// the opposite, so both axes flip.
pub fn wheel_from_delta(scale_factor: f64, delta: MouseScrollDelta) -> WheelEvent {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => WheelEvent::new(DeltaMode::Line, -x, -y),
        MouseScrollDelta::PixelDelta(p) => {
            let (x, y) = to_logical_f32(scale_factor, p);
            WheelEvent::new(DeltaMode::Pixel, -x, -y)
        }
    }
}

/// DOM `keyName` for a logical key ("Tab", "a", " ").
pub fn dom_key_name(key: &LogicalKey) -> String {
    match key {
        LogicalKey::Named(NamedKey::Space) => " ".to_string(),
        LogicalKey::Named(named) => format!("{named:?}"),
        LogicalKey::Character(s) => s.to_string(),
        LogicalKey::Dead(_) => "Dead".to_string(),
        LogicalKey::Unidentified(_) => "Unidentified".to_string(),
    }
}

/// DOM `keyCode` for a physical key, as the default key map expects.
pub fn dom_key_code(pk: PhysicalKey) -> Option<u32> {
    let PhysicalKey::Code(code) = pk else {
        return None;
    };
    let dom = match code {
        KeyCode::Backspace => 8,
        KeyCode::Tab => 9,
        KeyCode::Enter | KeyCode::NumpadEnter => 13,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => 16,
        KeyCode::ControlLeft | KeyCode::ControlRight => 17,
        KeyCode::AltLeft | KeyCode::AltRight => 18,
        KeyCode::Pause => 19,
        KeyCode::CapsLock => 20,
        KeyCode::Escape => 27,
        KeyCode::Space => 32,
        KeyCode::PageUp => 33,
        KeyCode::PageDown => 34,
        KeyCode::End => 35,
        KeyCode::Home => 36,
        KeyCode::ArrowLeft => 37,
        KeyCode::ArrowUp => 38,
        KeyCode::ArrowRight => 39,
        KeyCode::ArrowDown => 40,
        KeyCode::Insert => 45,
        KeyCode::Delete => 46,

        KeyCode::Digit0 => 48,
        KeyCode::Digit1 => 49,
        KeyCode::Digit2 => 50,
        KeyCode::Digit3 => 51,
        KeyCode::Digit4 => 52,
        KeyCode::Digit5 => 53,
        KeyCode::Digit6 => 54,
        KeyCode::Digit7 => 55,
        KeyCode::Digit8 => 56,
        KeyCode::Digit9 => 57,

        KeyCode::KeyA => 65,
        KeyCode::KeyB => 66,
        KeyCode::KeyC => 67,
        KeyCode::KeyD => 68,
        KeyCode::KeyE => 69,
        KeyCode::KeyF => 70,
        KeyCode::KeyG => 71,
        KeyCode::KeyH => 72,
        KeyCode::KeyI => 73,
        KeyCode::KeyJ => 74,
        KeyCode::KeyK => 75,
        KeyCode::KeyL => 76,
        KeyCode::KeyM => 77,
        KeyCode::KeyN => 78,
        KeyCode::KeyO => 79,
        KeyCode::KeyP => 80,
        KeyCode::KeyQ => 81,
        KeyCode::KeyR => 82,
        KeyCode::KeyS => 83,
        KeyCode::KeyT => 84,
        KeyCode::KeyU => 85,
        KeyCode::KeyV => 86,
        KeyCode::KeyW => 87,
        KeyCode::KeyX => 88,
        KeyCode::KeyY => 89,
        KeyCode::KeyZ => 90,

        KeyCode::SuperLeft => 91,
        KeyCode::SuperRight => 92,
        KeyCode::ContextMenu => 93,

        KeyCode::Numpad0 => 96,
        KeyCode::Numpad1 => 97,
        KeyCode::Numpad2 => 98,
        KeyCode::Numpad3 => 99,
        KeyCode::Numpad4 => 100,
        KeyCode::Numpad5 => 101,
        KeyCode::Numpad6 => 102,
        KeyCode::Numpad7 => 103,
        KeyCode::Numpad8 => 104,
        KeyCode::Numpad9 => 105,
        KeyCode::NumpadMultiply => 106,
        KeyCode::NumpadAdd => 107,
        KeyCode::NumpadSubtract => 109,
        KeyCode::NumpadDecimal => 110,
        KeyCode::NumpadDivide => 111,

        KeyCode::F1 => 112,
        KeyCode::F2 => 113,
        KeyCode::F3 => 114,
        KeyCode::F4 => 115,
        KeyCode::F5 => 116,
        KeyCode::F6 => 117,
        KeyCode::F7 => 118,
        KeyCode::F8 => 119,
        KeyCode::F9 => 120,
        KeyCode::F10 => 121,
        KeyCode::F11 => 122,
        KeyCode::F12 => 123,

        KeyCode::NumLock => 144,
        KeyCode::ScrollLock => 145,
        KeyCode::Semicolon => 186,
        KeyCode::Equal => 187,
        KeyCode::Comma => 188,
        KeyCode::Minus => 189,
        KeyCode::Period => 190,
        KeyCode::Slash => 191,
        KeyCode::Backquote => 192,
        KeyCode::BracketLeft => 219,
        KeyCode::Backslash => 220,
        KeyCode::BracketRight => 221,
        KeyCode::Quote => 222,

        _ => return None,
    };
    Some(dom)
}

pub fn cursor_icon(cursor: HostCursor) -> Option<CursorIcon> {
    Some(match cursor {
        HostCursor::Hidden => return None,
        HostCursor::Default => CursorIcon::Default,
        HostCursor::Text => CursorIcon::Text,
        HostCursor::Move => CursorIcon::Move,
        HostCursor::NsResize => CursorIcon::NsResize,
        HostCursor::EwResize => CursorIcon::EwResize,
        HostCursor::NeswResize => CursorIcon::NeswResize,
        HostCursor::NwseResize => CursorIcon::NwseResize,
    })
}

/// Shows `cursor` over `window`.
pub fn apply_cursor(window: &Window, cursor: HostCursor) {
    match cursor_icon(cursor) {
        Some(icon) => {
            window.set_cursor_visible(true);
            window.set_cursor(icon);
        }
        None => window.set_cursor_visible(false),
    }
}

/// Moves the pointer to `pos` (logical pixels), as requested through
/// `Io::want_set_mouse_pos`.
pub fn warp_pointer(window: &Window, pos: Vec2) -> anyhow::Result<()> {
    window
        .set_cursor_position(LogicalPosition::new(f64::from(pos.x), f64::from(pos.y)))
        .context("failed to move the pointer")?;
    Ok(())
}
