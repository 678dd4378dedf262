//! # Least Recently Used (LRU) Cache
//!
//! Evicts the entry that has gone longest without a `get` or `put`. This is
//! the policy the population service runs with by default.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>                                        │   │
//!   │   │                                                              │   │
//!   │   │  ┌──────────────┬────────┐                                   │   │
//!   │   │  │     Key      │ SlotId │                                   │   │
//!   │   │  ├──────────────┼────────┤                                   │   │
//!   │   │  │ (tokyo, jp)  │  ──────┼──────────────┐                    │   │
//!   │   │  │ (paris, fr)  │  ──────┼────────┐     │                    │   │
//!   │   │  │ (lima, pe)   │  ──────┼──┐     │     │                    │   │
//!   │   │  └──────────────┴────────┘  │     │     │                    │   │
//!   │   └─────────────────────────────┼─────┼─────┼────────────────────┘   │
//!   │                                 ▼     ▼     ▼                        │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  IntrusiveList<(K, V)>  (recency order)                      │   │
//!   │   │                                                              │   │
//!   │   │  head ──► [lima] ◄──► [paris] ◄──► [tokyo] ◄── tail          │   │
//!   │   │   (MRU)                                   (LRU, next victim) │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation    | Time | Notes                                   |
//! |--------------|------|-----------------------------------------|
//! | `get`        | O(1) | Hit moves the entry to the MRU position |
//! | `put`        | O(1) | Update also moves to MRU                |
//! | `pop_victim` | O(1) | Pops the list tail                      |
//! | `snapshot`   | O(n) | MRU first                               |
//!
//! ## Example Usage
//!
//! ```
//! use citycache::policy::lru::LruCache;
//! use citycache::traits::{CoreCache, ReadOnlyCache};
//!
//! let mut cache = LruCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");     // "b" is now least recently used
//! cache.put("c", 3);   // evicts "b"
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! ```
//!
//! ## Thread Safety
//!
//! `LruCache` is single-threaded; see [`SharedCache`](crate::concurrent::SharedCache)
//! behind the `concurrency` feature.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::{ConfigError, InvariantError, check_capacity};
use crate::traits::{CoreCache, EntryMeta, ReadOnlyCache, SnapshotEntry};

/// Recency-ordered cache.
pub struct LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    map: FxHashMap<K, SlotId>,
    list: IntrusiveList<(K, V)>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LRU cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        check_capacity(capacity)?;
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: IntrusiveList::with_capacity(capacity),
            capacity,
        })
    }

    /// Creates an LRU cache holding at most `capacity` entries.
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

    /// Returns the least recently used entry without changing its position.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|(k, v)| (k, v))
    }

    /// Position of `key` in recency order (`0` = most recent).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        if !self.map.contains_key(key) {
            return None;
        }
        self.list.iter().position(|(k, _)| k == key)
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_back()?;
        self.map.remove(&key);
        Some((key, value))
    }

    /// Checks that the key index and the recency list describe the same set.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;
        if self.map.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys, recency list holds {}",
                self.map.len(),
                self.list.len()
            )));
        }
        if self.len() > self.capacity {
            return Err(InvariantError::new("resident count exceeds capacity"));
        }
        for (key, &id) in &self.map {
            match self.list.get(id) {
                Some((k, _)) if k == key => {},
                _ => return Err(InvariantError::new("index points at the wrong list node")),
            }
        }
        Ok(())
    }
}

impl<K, V> ReadOnlyCache<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.map.get(key)?;
        self.list.get(id).map(|(_, v)| v)
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
        self.list
            .iter()
            .enumerate()
            .map(|(rank, (key, value))| SnapshotEntry {
                key,
                value,
                meta: EntryMeta::Recency { rank },
            })
            .collect()
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.map.get(key)?;
        self.list.move_to_front(id);
        self.list.get(id).map(|(_, v)| v)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.map.get(&key) {
            let previous = self
                .list
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.1, value));
            self.list.move_to_front(id);
            return previous;
        }

        if self.map.len() >= self.capacity {
            let evicted = self.evict_lru();
            debug_assert!(evicted.is_some(), "full cache had nothing to evict");
        }

        let id = self.list.push_front((key.clone(), value));
        self.map.insert(key, id);
        None
    }

    fn pop_victim(&mut self) -> Option<(K, V)> {
        self.evict_lru()
    }

    fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .finish_non_exhaustive()
    }
}
