//! Doubly linked list backed by a [`SlotArena`].
//!
//! Nodes are stored in the arena and linked by [`SlotId`], giving stable
//! handles and O(1) unlink/relink without raw pointers. The recency and
//! insertion-order caches keep one of these per instance and store the
//! `SlotId` of each resident in their key index.
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//! ```
//!
//! | Operation       | Time |
//! |-----------------|------|
//! | `push_front`    | O(1) |
//! | `pop_back`      | O(1) |
//! | `move_to_front` | O(1) |
//! | `remove`        | O(1) |
//! | `iter`          | O(n) |

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Arena-backed doubly linked list; front is the newest end.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns the value at the back (oldest end) of the list.
    pub fn back(&self) -> Option<&T> {
        self.tail
            .and_then(|id| self.arena.get(id).map(|node| &node.value))
    }

    /// Returns an iterator from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Inserts a new node at the front and returns its `SlotId`.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head.and_then(|head| self.arena.get_mut(head)) {
            Some(old_head) => old_head.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Removes and returns the back value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Removes the node `id` from the list and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves an existing node to the front; returns `false` if `id` is not present.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if Some(id) == self.head {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    /// Clears the list and frees all nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev.and_then(|p| self.arena.get_mut(p)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.arena.get_mut(n)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }

        let node = self.arena.get_mut(id)?;
        node.prev = None;
        node.next = None;
        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        } else {
            return;
        }
        match old_head.and_then(|h| self.arena.get_mut(h)) {
            Some(head_node) => head_node.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    /// Walks the list and checks link symmetry and length.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || !self.is_empty() {
                return Err(InvariantError::new("list head/tail disagree with length"));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;
        while let Some(id) = current {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new("list links to a freed slot"))?;
            if node.prev != prev {
                return Err(InvariantError::new("list prev link is not symmetric"));
            }
            if node.next.is_none() && self.tail != Some(id) {
                return Err(InvariantError::new("list tail does not end the chain"));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("list contains a cycle"));
            }
        }

        if count != self.len() {
            return Err(InvariantError::new(format!(
                "list walk found {} nodes, arena holds {}",
                count,
                self.len()
            )));
        }
        Ok(())
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over list values from front to back.
pub struct Iter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(list: &IntrusiveList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_front_orders_newest_first() {
        let mut list = IntrusiveList::new();
        list.push_front("a");
        list.push_front("b");
        list.push_front("c");
        assert_eq!(order(&list), vec!["c", "b", "a"]);
        assert_eq!(list.back(), Some(&"a"));
        list.check_invariants().unwrap();
    }

    #[test]
    fn pop_back_removes_oldest() {
        let mut list = IntrusiveList::new();
        list.push_front("a");
        list.push_front("b");
        assert_eq!(list.pop_back(), Some("a"));
        assert_eq!(list.pop_back(), Some("b"));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        list.check_invariants().unwrap();
    }

    #[test]
    fn move_to_front_relinks() {
        let mut list = IntrusiveList::new();
        let a = list.push_front("a");
        list.push_front("b");
        list.push_front("c");
        assert!(list.move_to_front(a));
        assert_eq!(order(&list), vec!["a", "c", "b"]);
        assert_eq!(list.back(), Some(&"b"));
        list.check_invariants().unwrap();
    }

    #[test]
    fn move_to_front_of_tail_and_head() {
        let mut list = IntrusiveList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        assert!(list.move_to_front(b));
        assert_eq!(order(&list), vec!["b", "a"]);
        assert!(list.move_to_front(a));
        assert_eq!(order(&list), vec!["a", "b"]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn remove_middle_node() {
        let mut list = IntrusiveList::new();
        list.push_front("a");
        let b = list.push_front("b");
        list.push_front("c");
        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(order(&list), vec!["c", "a"]);
        assert!(!list.move_to_front(b));
        list.check_invariants().unwrap();
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut list = IntrusiveList::new();
        let a = list.push_front(1);
        *list.get_mut(a).unwrap() = 5;
        assert_eq!(list.get(a), Some(&5));
    }

    #[test]
    fn clear_empties_list() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
        list.check_invariants().unwrap();
    }
}
