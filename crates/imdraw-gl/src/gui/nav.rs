/// Gamepad/keyboard navigation inputs, each a 0..1 signal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NavInput {
    Activate,
    Cancel,
    Input,
    Menu,
    DpadLeft,
    DpadRight,
    DpadUp,
    DpadDown,
    LStickLeft,
    LStickRight,
    LStickUp,
    LStickDown,
    FocusPrev,
    FocusNext,
    TweakSlow,
    TweakFast,
}

impl NavInput {
    pub const COUNT: usize = 16;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}
