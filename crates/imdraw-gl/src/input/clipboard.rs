use std::cell::RefCell;
use std::rc::Rc;

use crate::gui::Io;

/// In-process clipboard text shared by the GUI callbacks and host clipboard
/// events. Clones share the same text.
#[derive(Debug, Clone, Default)]
pub struct ClipboardCache(Rc<RefCell<String>>);

impl ClipboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.0.borrow().clone()
    }

    pub fn set_text(&self, text: &str) {
        log::trace!("clipboard set ({} bytes)", text.len());
        let mut slot = self.0.borrow_mut();
        slot.clear();
        slot.push_str(text);
    }

    /// Points the GUI's clipboard get/set slots at this cache.
    pub fn install(&self, io: &mut Io) {
        let set = self.clone();
        io.set_clipboard_text_fn = Some(Box::new(move |text: &str| set.set_text(text)));
        let get = self.clone();
        io.get_clipboard_text_fn = Some(Box::new(move || {
            let text = get.text();
            log::trace!("clipboard get ({} bytes)", text.len());
            text
        }));
    }
}
