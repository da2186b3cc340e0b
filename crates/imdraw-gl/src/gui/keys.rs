/// Named keys the GUI looks up through `Io::key_map`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Tab,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    Backspace,
    Space,
    Enter,
    Escape,
    A,
    C,
    V,
    X,
    Y,
    Z,
}

impl Key {
    pub const COUNT: usize = 21;

    pub const ALL: [Key; Key::COUNT] = [
        Key::Tab,
        Key::LeftArrow,
        Key::RightArrow,
        Key::UpArrow,
        Key::DownArrow,
        Key::PageUp,
        Key::PageDown,
        Key::Home,
        Key::End,
        Key::Insert,
        Key::Delete,
        Key::Backspace,
        Key::Space,
        Key::Enter,
        Key::Escape,
        Key::A,
        Key::C,
        Key::V,
        Key::X,
        Key::Y,
        Key::Z,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Maps each named key to an index into `Io::keys_down`.
///
/// `None` means the key is not mapped; the GUI treats it as never pressed.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct KeyMap([Option<usize>; Key::COUNT]);

impl KeyMap {
    #[inline]
    pub fn get(&self, key: Key) -> Option<usize> {
        self.0[key.index()]
    }

    #[inline]
    pub fn set(&mut self, key: Key, code: usize) {
        self.0[key.index()] = Some(code);
    }

    /// Host key codes for every named key, in `Key::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, Option<usize>)> + '_ {
        Key::ALL.iter().map(|&k| (k, self.get(k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_index_order() {
        for (i, k) in Key::ALL.iter().enumerate() {
            assert_eq!(k.index(), i);
        }
    }

    #[test]
    fn unmapped_by_default() {
        let map = KeyMap::default();
        assert!(map.iter().all(|(_, code)| code.is_none()));
    }
}
