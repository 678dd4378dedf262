//! # LFU (Least Frequently Used) Cache
//!
//! Evicts the entry with the smallest access counter. Ties are broken by
//! insertion sequence: among entries sharing the minimum counter, the one
//! inserted earliest goes first. Eviction is therefore fully deterministic
//! and independent of hash iteration order.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                                  │
//!   │                                                                          │
//!   │   map: FxHashMap<K, Entry<V>>          order: BTreeMap<(count, seq), K>  │
//!   │                                                                          │
//!   │   ┌──────────────┬──────────────────┐  ┌───────────────┬──────────────┐  │
//!   │   │ Key          │ value,count,seq  │  │ (count, seq)  │ Key          │  │
//!   │   ├──────────────┼──────────────────┤  ├───────────────┼──────────────┤  │
//!   │   │ (tokyo, jp)  │ 37400000, 5, 0   │  │ (1, 2)        │ (lima, pe)   │◄─ victim
//!   │   │ (paris, fr)  │ 2148000,  2, 1   │  │ (2, 1)        │ (paris, fr)  │  │
//!   │   │ (lima, pe)   │ 9750000,  1, 2   │  │ (5, 0)        │ (tokyo, jp)  │  │
//!   │   └──────────────┴──────────────────┘  └───────────────┴──────────────┘  │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frequency Lifecycle
//!
//! ```text
//!   put(new key)          count = 1, seq = next insertion number
//!   get(&key) hit         count += 1
//!   put(resident key)     value replaced, count += 1
//!   eviction / clear      entry and its counter are dropped
//! ```
//!
//! ## Operations
//!
//! | Operation    | Time     | Notes                                 |
//! |--------------|----------|---------------------------------------|
//! | `get`        | O(log n) | Re-keys the entry in the ordered set  |
//! | `put`        | O(log n) | May evict the first ordered entry     |
//! | `pop_victim` | O(log n) | `BTreeMap::pop_first`                 |
//! | `snapshot`   | O(n)     | Highest count first                   |
//!
//! ## Example Usage
//!
//! ```
//! use citycache::policy::lfu::LfuCache;
//! use citycache::traits::{CoreCache, ReadOnlyCache};
//!
//! let mut cache = LfuCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.get(&"a");
//! cache.put("c", 3); // "b" has the lower count
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.frequency(&"a"), Some(3));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{ConfigError, InvariantError, check_capacity};
use crate::traits::{CoreCache, EntryMeta, ReadOnlyCache, SnapshotEntry};

#[derive(Debug)]
struct Entry<V> {
    value: V,
    count: u64,
    seq: u64,
}

impl<V> Entry<V> {
    #[inline]
    fn rank(&self) -> (u64, u64) {
        (self.count, self.seq)
    }
}

/// Frequency-ordered cache.
pub struct LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    map: FxHashMap<K, Entry<V>>,
    order: BTreeMap<(u64, u64), K>,
    next_seq: u64,
    capacity: usize,
}

impl<K, V> LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LFU cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        check_capacity(capacity)?;
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: BTreeMap::new(),
            next_seq: 0,
            capacity,
        })
    }

    /// Creates an LFU cache holding at most `capacity` entries.
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

    /// Returns the access counter for `key` without incrementing it.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.map.get(key).map(|e| e.count)
    }

    /// Returns the entry the next eviction would remove.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        let (_, key) = self.order.first_key_value()?;
        self.map.get(key).map(|e| (key, &e.value))
    }

    fn bump(&mut self, key: &K) -> Option<&mut Entry<V>> {
        let entry = self.map.get_mut(key)?;
        let old_rank = entry.rank();
        entry.count = entry.count.saturating_add(1);
        if let Some(k) = self.order.remove(&old_rank) {
            self.order.insert(entry.rank(), k);
        }
        Some(entry)
    }

    fn evict_lfu(&mut self) -> Option<(K, V)> {
        let (_, key) = self.order.pop_first()?;
        let entry = self.map.remove(&key)?;
        Some((key, entry.value))
    }

    /// Checks that every resident has exactly one ordered-set slot matching
    /// its counter and sequence number.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys, frequency order holds {}",
                self.map.len(),
                self.order.len()
            )));
        }
        if self.len() > self.capacity {
            return Err(InvariantError::new("resident count exceeds capacity"));
        }
        for (rank, key) in &self.order {
            match self.map.get(key) {
                Some(entry) if entry.rank() == *rank => {},
                _ => return Err(InvariantError::new("frequency order is stale")),
            }
        }
        Ok(())
    }
}

impl<K, V> ReadOnlyCache<K, V> for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key).map(|e| &e.value)
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
        self.order
            .iter()
            .rev()
            .filter_map(|(&(count, _), key)| {
                self.map.get(key).map(|e| SnapshotEntry {
                    key,
                    value: &e.value,
                    meta: EntryMeta::Frequency { count },
                })
            })
            .collect()
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        self.bump(key).map(|e| &e.value)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(entry) = self.bump(&key) {
            return Some(std::mem::replace(&mut entry.value, value));
        }

        if self.map.len() >= self.capacity {
            let evicted = self.evict_lfu();
            debug_assert!(evicted.is_some(), "full cache had nothing to evict");
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let entry = Entry {
            value,
            count: 1,
            seq,
        };
        self.order.insert(entry.rank(), key.clone());
        self.map.insert(key, entry);
        None
    }

    fn pop_victim(&mut self) -> Option<(K, V)> {
        self.evict_lfu()
    }

    fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .finish_non_exhaustive()
    }
}
