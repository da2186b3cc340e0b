use std::collections::BTreeMap;

use crate::gui::TextureId;

/// Maps the opaque ids carried by draw commands to GPU texture handles.
///
/// Ids are never reused within one registry, so a stale id held by the GUI
/// fails lookup instead of silently binding a different texture.
#[derive(Debug)]
pub struct TextureRegistry<T> {
    next: u64,
    entries: BTreeMap<TextureId, T>,
}

impl<T> Default for TextureRegistry<T> {
    fn default() -> Self {
        Self {
            next: 1,
            entries: BTreeMap::new(),
        }
    }
}

impl<T: Copy> TextureRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, texture: T) -> TextureId {
        let id = TextureId(self.next);
        self.next += 1;
        self.entries.insert(id, texture);
        id
    }

    pub fn remove(&mut self, id: TextureId) -> Option<T> {
        self.entries.remove(&id)
    }

    #[inline]
    pub fn get(&self, id: TextureId) -> Option<T> {
        self.entries.get(&id).copied()
    }

    #[inline]
    pub fn contains(&self, id: TextureId) -> bool {
        self.entries.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
