//! # First In, First Out (FIFO) Cache
//!
//! Evicts the entry that was inserted earliest. Reads never reorder entries
//! and replacing the value of a resident key keeps its original position.
//!
//! ```text
//!   put(a) put(b) put(c)   capacity = 2
//!
//!   front (newest)                 back (oldest, next victim)
//!        [b] ◄──► [a]              after put(b)
//!        [c] ◄──► [b]              put(c) evicts a
//! ```
//!
//! Each entry carries a monotonic insertion sequence number, reported by
//! [`snapshot`](crate::traits::ReadOnlyCache::snapshot) as
//! [`EntryMeta::Insertion`].
//!
//! ## Example Usage
//!
//! ```
//! use citycache::policy::fifo::FifoCache;
//! use citycache::traits::{CoreCache, ReadOnlyCache};
//!
//! let mut cache = FifoCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");   // no effect on order
//! cache.put("c", 3); // evicts "a"
//!
//! assert!(!cache.contains(&"a"));
//! assert_eq!(cache.age_rank(&"b"), Some(0));
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::{ConfigError, InvariantError, check_capacity};
use crate::traits::{CoreCache, EntryMeta, ReadOnlyCache, SnapshotEntry};

struct Entry<K, V> {
    key: K,
    value: V,
    seq: u64,
}

/// Insertion-ordered cache.
pub struct FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    map: FxHashMap<K, SlotId>,
    queue: IntrusiveList<Entry<K, V>>,
    next_seq: u64,
    capacity: usize,
}

impl<K, V> FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a FIFO cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        check_capacity(capacity)?;
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            queue: IntrusiveList::with_capacity(capacity),
            next_seq: 0,
            capacity,
        })
    }

    /// Creates a FIFO cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Returns the oldest entry without removing it.
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        self.queue.back().map(|e| (&e.key, &e.value))
    }

    /// Age rank of `key` (`0` = oldest).
    pub fn age_rank(&self, key: &K) -> Option<usize> {
        if !self.map.contains_key(key) {
            return None;
        }
        let from_front = self.queue.iter().position(|e| &e.key == key)?;
        Some(self.queue.len() - 1 - from_front)
    }

    fn evict_oldest(&mut self) -> Option<(K, V)> {
        let entry = self.queue.pop_back()?;
        self.map.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// Checks index/queue agreement and strictly decreasing sequence numbers
    /// from front to back.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.queue.check_invariants()?;
        if self.map.len() != self.queue.len() {
            return Err(InvariantError::new("index and queue lengths differ"));
        }
        let mut last: Option<u64> = None;
        for entry in self.queue.iter() {
            if last.is_some_and(|seq| seq <= entry.seq) {
                return Err(InvariantError::new("queue is not in insertion order"));
            }
            last = Some(entry.seq);
        }
        Ok(())
    }
}

impl<K, V> ReadOnlyCache<K, V> for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.map.get(key)?;
        self.queue.get(id).map(|e| &e.value)
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn snapshot(&self) -> Vec<SnapshotEntry<'_, K, V>> {
        self.queue
            .iter()
            .map(|e| SnapshotEntry {
                key: &e.key,
                value: &e.value,
                meta: EntryMeta::Insertion { seq: e.seq },
            })
            .collect()
    }
}

impl<K, V> CoreCache<K, V> for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        self.peek(key)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.map.get(&key) {
            return self
                .queue
                .get_mut(id)
                .map(|e| std::mem::replace(&mut e.value, value));
        }

        if self.map.len() >= self.capacity {
            let evicted = self.evict_oldest();
            debug_assert!(evicted.is_some(), "full cache had nothing to evict");
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.queue.push_front(Entry {
            key: key.clone(),
            value,
            seq,
        });
        self.map.insert(key, id);
        None
    }

    fn pop_victim(&mut self) -> Option<(K, V)> {
        self.evict_oldest()
    }

    fn clear(&mut self) {
        self.map.clear();
        self.queue.clear();
    }
}

impl<K, V> fmt::Debug for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifoCache")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(FifoCache::<u8, u8>::try_new(0).is_err());
    }

    #[test]
    fn evicts_in_insertion_order() {
        let mut cache = FifoCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);

        assert!(!cache.contains(&"a"));
        assert!(cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn access_does_not_reorder() {
        let mut cache = FifoCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        for _ in 0..10 {
            assert_eq!(cache.get(&"a"), Some(&1));
        }
        cache.put("c", 3);
        assert!(!cache.contains(&"a"));
    }

    #[test]
    fn update_keeps_position() {
        let mut cache = FifoCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.put("a", 100), Some(1));
        assert_eq!(cache.peek_oldest(), Some((&"a", &100)));

        cache.put("c", 3);
        assert!(!cache.contains(&"a"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn snapshot_reports_sequence_numbers() {
        let mut cache = FifoCache::new(3);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        cache.put("d", 4);

        let snap = cache.snapshot();
        let keys: Vec<_> = snap.iter().map(|e| *e.key).collect();
        assert_eq!(keys, vec!["d", "c", "b"]);
        assert_eq!(snap[0].meta, EntryMeta::Insertion { seq: 3 });
        assert_eq!(snap[2].meta, EntryMeta::Insertion { seq: 1 });
    }

    #[test]
    fn age_rank_counts_from_oldest() {
        let mut cache = FifoCache::new(3);
        cache.put(1, ());
        cache.put(2, ());
        cache.put(3, ());
        assert_eq!(cache.age_rank(&1), Some(0));
        assert_eq!(cache.age_rank(&3), Some(2));
        assert_eq!(cache.age_rank(&9), None);
    }

    #[test]
    fn pop_victim_drains_oldest_first() {
        let mut cache = FifoCache::new(3);
        cache.put(1, "x");
        cache.put(2, "y");
        assert_eq!(cache.pop_victim(), Some((1, "x")));
        assert_eq!(cache.pop_victim(), Some((2, "y")));
        assert_eq!(cache.pop_victim(), None);
        cache.check_invariants().unwrap();
    }
}
