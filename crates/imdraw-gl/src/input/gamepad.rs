use std::sync::LazyLock;

use regex::Regex;

use crate::gui::{ConfigFlags, Io, NavInput};

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct GamepadButton {
    pub pressed: bool,
    /// Analog pressure, 0..1.
    pub value: f32,
}

impl GamepadButton {
    pub fn pressed() -> Self {
        Self {
            pressed: true,
            value: 1.0,
        }
    }
}

/// Snapshot of one controller as the host reports it this frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gamepad {
    /// Host id string; vendor/product ids are parsed out of it.
    pub id: String,
    pub connected: bool,
    pub buttons: Vec<GamepadButton>,
    /// Axis values in -1..1.
    pub axes: Vec<f32>,
}

impl Gamepad {
    pub fn new(id: impl Into<String>, buttons: Vec<GamepadButton>, axes: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            connected: true,
            buttons,
            axes,
        }
    }

    fn button_pressed(&self, index: usize) -> bool {
        self.buttons.get(index).is_some_and(|b| b.pressed)
    }
}

/// USB vendor/product pair. Unknown devices report `0000:0000`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct DeviceId {
    pub vendor: u16,
    pub product: u16,
}

// Firefox: "046d-c216-Logitech Dual Action"
static FIREFOX_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9a-f]{4})-([0-9a-f]{4})-.*$").expect("valid regex"));

// Chrome: "Logitech Dual Action (STANDARD GAMEPAD Vendor: 046d Product: c216)"
static CHROME_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*\(.*Vendor: ([0-9a-f]{4}) Product: ([0-9a-f]{4})\).*$").expect("valid regex")
});

/// Extracts vendor/product ids from a host gamepad id string.
pub fn parse_device_id(id: &str) -> DeviceId {
    let caps = FIREFOX_ID.captures(id).or_else(|| CHROME_ID.captures(id));
    let Some(caps) = caps else {
        return DeviceId::default();
    };
    let hex = |i: usize| {
        caps.get(i)
            .and_then(|m| u16::from_str_radix(m.as_str(), 16).ok())
            .unwrap_or(0)
    };
    DeviceId {
        vendor: hex(1),
        product: hex(2),
    }
}

/// Where one nav input reads from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum NavSource {
    /// 1.0 while the button is pressed.
    Button(usize),
    /// Axis rescaled so `v0` reads 0 and `v1` reads 1.
    Analog { axis: usize, v0: f32, v1: f32 },
}

pub type NavMapping = [(NavInput, NavSource); NavInput::COUNT];

use NavInput as N;
use NavSource::{Analog, Button};

const fn neg(axis: usize) -> NavSource {
    Analog {
        axis,
        v0: -0.3,
        v1: -0.9,
    }
}

const fn pos(axis: usize) -> NavSource {
    Analog {
        axis,
        v0: 0.3,
        v1: 0.9,
    }
}

/// W3C "standard" gamepad layout.
pub const STANDARD_MAPPING: NavMapping = [
    (N::Activate, Button(0)),
    (N::Cancel, Button(1)),
    (N::Menu, Button(2)),
    (N::Input, Button(3)),
    (N::DpadLeft, Button(14)),
    (N::DpadRight, Button(15)),
    (N::DpadUp, Button(12)),
    (N::DpadDown, Button(13)),
    (N::FocusPrev, Button(4)),
    (N::FocusNext, Button(5)),
    (N::TweakSlow, Button(6)),
    (N::TweakFast, Button(7)),
    (N::LStickLeft, neg(0)),
    (N::LStickRight, pos(0)),
    (N::LStickUp, neg(1)),
    (N::LStickDown, pos(1)),
];

/// Logitech Dual Action (046d:c216): d-pad on axes 4/5.
const LOGITECH_DUAL_ACTION: NavMapping = [
    (N::Activate, Button(1)),
    (N::Cancel, Button(2)),
    (N::Menu, Button(0)),
    (N::Input, Button(3)),
    (N::DpadLeft, neg(4)),
    (N::DpadRight, pos(4)),
    (N::DpadUp, neg(5)),
    (N::DpadDown, pos(5)),
    (N::FocusPrev, Button(4)),
    (N::FocusNext, Button(5)),
    (N::TweakSlow, Button(6)),
    (N::TweakFast, Button(7)),
    (N::LStickLeft, neg(0)),
    (N::LStickRight, pos(0)),
    (N::LStickUp, neg(1)),
    (N::LStickDown, pos(1)),
];

/// Logitech F310 (046d:c21d): analog triggers on axes 6/7.
const LOGITECH_F310: NavMapping = [
    (N::Activate, Button(0)),
    (N::Cancel, Button(1)),
    (N::Menu, Button(2)),
    (N::Input, Button(3)),
    (N::DpadLeft, Button(14)),
    (N::DpadRight, Button(15)),
    (N::DpadUp, Button(12)),
    (N::DpadDown, Button(13)),
    (N::FocusPrev, Button(4)),
    (N::FocusNext, Button(5)),
    (N::TweakSlow, pos(6)),
    (N::TweakFast, pos(7)),
    (N::LStickLeft, neg(0)),
    (N::LStickRight, pos(0)),
    (N::LStickUp, neg(1)),
    (N::LStickDown, pos(1)),
];

/// 8Bitdo SN30 Pro (2dc8:6001, 2dc8:6101).
const EIGHTBITDO_SN30_PRO: NavMapping = [
    (N::Activate, Button(1)),
    (N::Cancel, Button(0)),
    (N::Menu, Button(4)),
    (N::Input, Button(3)),
    (N::DpadLeft, neg(6)),
    (N::DpadRight, pos(6)),
    (N::DpadUp, neg(7)),
    (N::DpadDown, pos(7)),
    (N::FocusPrev, Button(6)),
    (N::FocusNext, Button(7)),
    (N::TweakSlow, Button(8)),
    (N::TweakFast, Button(9)),
    (N::LStickLeft, neg(0)),
    (N::LStickRight, pos(0)),
    (N::LStickUp, neg(1)),
    (N::LStickDown, pos(1)),
];

pub fn mapping_for(device: DeviceId) -> &'static NavMapping {
    match (device.vendor, device.product) {
        (0x046d, 0xc216) => &LOGITECH_DUAL_ACTION,
        (0x046d, 0xc21d) => &LOGITECH_F310,
        (0x2dc8, 0x6001) | (0x2dc8, 0x6101) => &EIGHTBITDO_SN30_PRO,
        _ => &STANDARD_MAPPING,
    }
}

fn read(pad: &Gamepad, source: NavSource) -> f32 {
    match source {
        Button(i) => {
            if pad.button_pressed(i) {
                1.0
            } else {
                0.0
            }
        }
        Analog { axis, v0, v1 } => {
            // Missing or non-finite axes read as rest.
            let v = pad
                .axes
                .get(axis)
                .copied()
                .filter(|v| v.is_finite())
                .unwrap_or(v0);
            ((v - v0) / (v1 - v0)).min(1.0)
        }
    }
}

/// Writes this frame's nav inputs from the connected gamepads.
///
/// Nav inputs are always reset; they are only filled when gamepad navigation
/// is enabled. With several pads the strongest signal wins.
pub fn poll_gamepads(io: &mut Io, gamepads: &[Option<Gamepad>]) {
    io.nav_inputs.fill(0.0);
    if !io.config_flags.contains(ConfigFlags::NAV_ENABLE_GAMEPAD) {
        return;
    }

    for pad in gamepads.iter().flatten().filter(|p| p.connected) {
        let mapping = mapping_for(parse_device_id(&pad.id));
        for &(nav, source) in mapping {
            let slot = &mut io.nav_inputs[nav.index()];
            *slot = slot.max(read(pad, source));
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn nav_io() -> Io {
        let mut io = Io::new();
        io.config_flags |= ConfigFlags::NAV_ENABLE_GAMEPAD;
        io
    }

    #[test]
    fn parses_both_id_formats() {
        assert_eq!(
            parse_device_id("046d-c21d-Logitech Gamepad F310"),
            DeviceId { vendor: 0x046d, product: 0xc21d }
        );
        assert_eq!(
            parse_device_id("8Bitdo SN30 Pro (Vendor: 2dc8 Product: 6101)"),
            DeviceId { vendor: 0x2dc8, product: 0x6101 }
        );
        assert_eq!(parse_device_id("Xbox 360 Controller (XInput STANDARD GAMEPAD)"), DeviceId::default());
    }

    #[test]
    fn every_table_covers_every_nav_input() {
        for table in [&STANDARD_MAPPING, &LOGITECH_DUAL_ACTION, &LOGITECH_F310, &EIGHTBITDO_SN30_PRO] {
            let mut seen = [false; NavInput::COUNT];
            for (nav, _) in table {
                seen[nav.index()] = true;
            }
            assert!(seen.iter().all(|s| *s));
        }
    }

    #[test]
    fn missing_axis_reads_as_rest() {
        let mut io = nav_io();
        let pad = Gamepad::new("pad", Vec::new(), Vec::new());
        poll_gamepads(&mut io, &[Some(pad)]);
        assert!(io.nav_inputs.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn nan_axis_reads_as_rest() {
        let mut io = nav_io();
        let pad = Gamepad::new("pad", Vec::new(), vec![f32::NAN, f32::INFINITY]);
        poll_gamepads(&mut io, &[Some(pad)]);
        assert_eq!(io.nav_input(NavInput::LStickLeft), 0.0);
        assert_eq!(io.nav_input(NavInput::LStickRight), 0.0);
        assert_eq!(io.nav_input(NavInput::LStickDown), 0.0);
    }

    #[test]
    fn dual_action_dpad_is_analog() {
        let mut io = nav_io();
        let mut axes = vec![0.0; 6];
        axes[4] = -0.6;
        let pad = Gamepad::new("046d-c216-Logitech Dual Action", Vec::new(), axes);
        poll_gamepads(&mut io, &[Some(pad)]);
        assert_relative_eq!(io.nav_input(NavInput::DpadLeft), 0.5, epsilon = 1e-6);
        assert!(io.nav_input(NavInput::DpadRight) <= 0.0);
    }

    #[test]
    fn disabled_nav_still_resets() {
        let mut io = Io::new();
        io.nav_inputs = [0.7; NavInput::COUNT];
        let pad = Gamepad::new("pad", vec![GamepadButton::pressed()], Vec::new());
        poll_gamepads(&mut io, &[Some(pad)]);
        assert!(io.nav_inputs.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn strongest_pad_wins() {
        let mut io = nav_io();
        let idle = Gamepad::new("a", Vec::new(), vec![0.0, 0.0]);
        let pushed = Gamepad::new("b", Vec::new(), vec![0.6, 0.0]);
        poll_gamepads(&mut io, &[Some(pushed), None, Some(idle)]);
        assert_relative_eq!(io.nav_input(NavInput::LStickRight), 0.5, epsilon = 1e-6);
    }
}
