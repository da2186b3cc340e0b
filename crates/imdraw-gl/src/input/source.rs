use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::gui::Io;

use super::clipboard::ClipboardCache;
use super::translate::translate_event;
use super::types::{EventDisposition, HostEvent};

pub type EventHandler = Box<dyn FnMut(&HostEvent) -> Result<EventDisposition>>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SubscriptionId(u64);

/// A stream of host events that handlers can attach to and detach from.
pub trait InputSource {
    fn subscribe(&mut self, handler: EventHandler) -> SubscriptionId;

    /// Returns false if `id` was not subscribed.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// Input source driven by explicit [`SyntheticInputSource::emit`] calls.
#[derive(Default)]
pub struct SyntheticInputSource {
    next_id: u64,
    handlers: Vec<(SubscriptionId, EventHandler)>,
}

impl SyntheticInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    /// Delivers `event` to every handler in subscription order.
    ///
    /// Dispositions are merged: default actions are suppressed if any handler
    /// asks for it, and the last clipboard write wins. The first handler error
    /// stops delivery.
    pub fn emit(&mut self, event: HostEvent) -> Result<EventDisposition> {
        let mut merged = EventDisposition::default();
        for (_, handler) in &mut self.handlers {
            let d = handler(&event)?;
            merged.prevent_default |= d.prevent_default;
            if d.clipboard_write.is_some() {
                merged.clipboard_write = d.clipboard_write;
            }
        }
        Ok(merged)
    }
}

impl InputSource for SyntheticInputSource {
    fn subscribe(&mut self, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, handler));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        self.handlers.len() != before
    }
}

/// Subscribes the input translator to `source`, writing into the shared `io`.
pub fn bind_translator(
    source: &mut impl InputSource,
    io: Rc<RefCell<Io>>,
    clipboard: ClipboardCache,
) -> SubscriptionId {
    source.subscribe(Box::new(move |event: &HostEvent| {
        translate_event(&mut io.borrow_mut(), &clipboard, event)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyEvent, PointerEvent};

    #[test]
    fn unsubscribed_translator_stops_updating_io() {
        let io = Rc::new(RefCell::new(Io::new()));
        let mut source = SyntheticInputSource::new();
        let id = bind_translator(&mut source, io.clone(), ClipboardCache::new());

        source
            .emit(HostEvent::PointerMove(PointerEvent::new(5.0, 6.0, 0)))
            .unwrap();
        assert_eq!(io.borrow().mouse_pos.x, 5.0);

        assert!(source.unsubscribe(id));
        assert!(!source.unsubscribe(id));
        source
            .emit(HostEvent::PointerMove(PointerEvent::new(7.0, 8.0, 0)))
            .unwrap();
        assert_eq!(io.borrow().mouse_pos.x, 5.0);
    }

    #[test]
    fn translator_errors_reach_the_emitter() {
        let io = Rc::new(RefCell::new(Io::new()));
        let mut source = SyntheticInputSource::new();
        bind_translator(&mut source, io, ClipboardCache::new());
        let err = source
            .emit(HostEvent::KeyDown(KeyEvent::new(600, "?")))
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn dispositions_merge_across_handlers() {
        let mut source = SyntheticInputSource::new();
        source.subscribe(Box::new(|_: &HostEvent| Ok(EventDisposition::default())));
        source.subscribe(Box::new(|_: &HostEvent| {
            Ok(EventDisposition {
                prevent_default: true,
                clipboard_write: Some("x".into()),
            })
        }));
        let d = source.emit(HostEvent::ContextMenu).unwrap();
        assert!(d.prevent_default);
        assert_eq!(d.clipboard_write.as_deref(), Some("x"));
    }
}
