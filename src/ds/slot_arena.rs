//! Slot arena with stable handles.
//!
//! Values are stored in a `Vec<Option<T>>` and addressed by [`SlotId`].
//! Freed slots are recycled through a free list, so handles stay valid until
//! their slot is removed and no pointer ever outlives its owner.

/// Stable handle into a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Vec-backed arena that recycles freed slots.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> SlotId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(value);
            idx
        } else {
            self.slots.push(Some(value));
            self.slots.len() - 1
        };
        self.len += 1;
        SlotId(idx)
    }

    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut arena = SlotArena::new();
        let a = arena.insert("tokyo");
        let b = arena.insert("delhi");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"tokyo"));
        assert_eq!(arena.remove(a), Some("tokyo"));
        assert_eq!(arena.remove(a), None);
        assert!(!arena.contains(a));
        assert!(arena.contains(b));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut arena = SlotArena::with_capacity(4);
        let a = arena.insert(1);
        arena.insert(2);
        arena.remove(a);
        let c = arena.insert(3);
        assert_eq!(c.index(), a.index());
        assert_eq!(arena.get(c), Some(&3));
    }

    #[test]
    fn clear_resets_everything() {
        let mut arena = SlotArena::new();
        let a = arena.insert(1);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(a), None);
    }
}
