/// Mouse cursor shape requested by the GUI for the current frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum MouseCursor {
    None,
    #[default]
    Arrow,
    TextInput,
    ResizeAll,
    ResizeNS,
    ResizeEW,
    ResizeNESW,
    ResizeNWSE,
}
