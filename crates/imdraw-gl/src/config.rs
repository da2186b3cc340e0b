use std::time::Duration;

use crate::coords::Vec2;
use crate::gui::{Key, KeyMap};

/// Backend configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Display size used when the host reports a zero logical size.
    pub fallback_display_size: Vec2,

    /// Lower clamp for the per-frame delta.
    pub dt_min: Duration,
    /// Upper clamp for the per-frame delta (debugger pauses, tab switches).
    pub dt_max: Duration,
    /// Delta reported for the very first frame.
    pub first_frame_dt: Duration,

    /// Copied into `Io::opt_mac_osx_behaviors` at initialization.
    pub mac_osx_behaviors: bool,

    /// Host key codes for the GUI's named keys.
    pub key_map: KeyMap,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            fallback_display_size: Vec2::new(640.0, 480.0),
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
            first_frame_dt: Duration::from_secs_f64(1.0 / 60.0),
            mac_osx_behaviors: false,
            key_map: dom_key_map(),
        }
    }
}

/// Key map for DOM `keyCode` values.
pub fn dom_key_map() -> KeyMap {
    const CODES: [(Key, usize); Key::COUNT] = [
        (Key::Tab, 9),
        (Key::LeftArrow, 37),
        (Key::RightArrow, 39),
        (Key::UpArrow, 38),
        (Key::DownArrow, 40),
        (Key::PageUp, 33),
        (Key::PageDown, 34),
        (Key::Home, 36),
        (Key::End, 35),
        (Key::Insert, 45),
        (Key::Delete, 46),
        (Key::Backspace, 8),
        (Key::Space, 32),
        (Key::Enter, 13),
        (Key::Escape, 27),
        (Key::A, 65),
        (Key::C, 67),
        (Key::V, 86),
        (Key::X, 88),
        (Key::Y, 89),
        (Key::Z, 90),
    ];

    let mut map = KeyMap::default();
    for (key, code) in CODES {
        map.set(key, code);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_map_covers_every_key() {
        let map = dom_key_map();
        assert!(map.iter().all(|(_, code)| code.is_some()));
        assert_eq!(map.get(Key::Tab), Some(9));
        assert_eq!(map.get(Key::End), Some(35));
        assert_eq!(map.get(Key::Z), Some(90));
    }

    #[test]
    fn defaults() {
        let cfg = BackendConfig::default();
        assert_eq!(cfg.fallback_display_size, Vec2::new(640.0, 480.0));
        assert!(cfg.dt_min < cfg.first_frame_dt && cfg.first_frame_dt < cfg.dt_max);
    }
}
