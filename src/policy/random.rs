//! Random cache replacement policy.
//!
//! Victims are drawn uniformly from the current residents whenever an insert
//! finds the cache full. Reads and updates never change the odds.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                      RandomCache<K, V, R> Layout                            │
//! │                                                                             │
//! │   map: FxHashMap<K, (usize, V)>        keys: Vec<K>                         │
//! │        key → (slot, value)                   dense array of keys            │
//! │                                                                             │
//! │   ┌──────────────┬────────────┐          ┌───────┬───────┬───────┐          │
//! │   │     Key      │ (slot, v)  │          │   0   │   1   │   2   │          │
//! │   ├──────────────┼────────────┤          ├───────┼───────┼───────┤          │
//! │   │ (tokyo, jp)  │ (0, ...)   │────┐     │ tokyo │ paris │ lima  │          │
//! │   │ (paris, fr)  │ (1, ...)   │────┼────►└───────┴───────┴───────┘          │
//! │   │ (lima, pe)   │ (2, ...)   │────┘                                        │
//! │   └──────────────┴────────────┘                                             │
//! │                                                                             │
//! │   rng: R   (owned, seedable; SmallRng by default)                           │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! Eviction (O(1))
//! ───────────────
//!
//!   1. i = rng.random_range(0..len)
//!   2. victim = keys.swap_remove(i)
//!   3. if a key moved into slot i, update its slot in map
//!   4. remove victim from map
//! ```
//!
//! ## Randomness
//!
//! The random source is owned by the cache instance; there is no global
//! generator. [`RandomCache::with_seed`] makes every eviction sequence
//! reproducible, and [`RandomCache::try_with_rng`] accepts any [`rand::Rng`].
//!
//! ## Example Usage
//!
//! ```
//! use citycache::policy::random::RandomCache;
//! use citycache::traits::{CoreCache, ReadOnlyCache};
//!
//! let mut cache = RandomCache::with_seed(3, 42);
//! for i in 0..10 {
//!     cache.put(i, i * 10);
//! }
//! assert_eq!(cache.len(), 3);
//! ```

use std::fmt;
use std::hash::Hash;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

use crate::error::{ConfigError, InvariantError, check_capacity};
use crate::traits::{CoreCache, EntryMeta, ReadOnlyCache, SnapshotEntry};

/// Cache that evicts a uniformly random resident.
pub struct RandomCache<K, V, R = SmallRng>
where
    K: Clone + Eq + Hash,
    R: Rng,
{
    /// Maps key to (index in keys vec, value)
    map: FxHashMap<K, (usize, V)>,
    /// Dense array of keys for O(1) random access
    keys: Vec<K>,
    capacity: usize,
    rng: R,
}

impl<K, V> RandomCache<K, V, SmallRng>
where
    K: Clone + Eq + Hash,
{
    /// Creates a random-eviction cache seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_rng(capacity, SmallRng::from_os_rng())
    }

    /// Creates a random-eviction cache seeded from the operating system.
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

    /// Creates a cache whose eviction draws are reproducible from `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        match Self::try_with_rng(capacity, SmallRng::seed_from_u64(seed)) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<K, V, R> RandomCache<K, V, R>
where
    K: Clone + Eq + Hash,
    R: Rng,
{
    /// Creates a cache that draws victims from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_with_rng(capacity: usize, rng: R) -> Result<Self, ConfigError> {
        check_capacity(capacity)?;
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            keys: Vec::with_capacity(capacity),
            capacity,
            rng,
        })
    }

    fn evict_random(&mut self) -> Option<(K, V)> {
        if self.keys.is_empty() {
            return None;
        }

        let random_idx = self.rng.random_range(0..self.keys.len());
        let victim_key = self.keys.swap_remove(random_idx);

        // The former last key now lives at random_idx.
        if let Some(moved_key) = self.keys.get(random_idx)
            && let Some((idx, _)) = self.map.get_mut(moved_key)
        {
            *idx = random_idx;
        }

        let (_, value) = self.map.remove(&victim_key)?;

        #[cfg(debug_assertions)]
        self.validate_invariants();

        Some((victim_key, value))
    }

    /// Checks that the dense key vector and the index agree slot for slot.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() != self.keys.len() {
            return Err(InvariantError::new("map and keys vector have different sizes"));
        }
        if self.len() > self.capacity {
            return Err(InvariantError::new("resident count exceeds capacity"));
        }
        for (i, key) in self.keys.iter().enumerate() {
            match self.map.get(key) {
                Some(&(idx, _)) if idx == i => {},
                Some(_) => {
                    return Err(InvariantError::new(
                        "vector position doesn't match map index",
                    ));
                },
                None => return Err(InvariantError::new("key in vector not found in map")),
            }
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        if let Err(e) = self.check_invariants() {
            panic!("random cache invariant violated: {}", e);
        }
    }
}

impl<K, V, R> ReadOnlyCache<K, V> for RandomCache<K, V, R>
where
    K: Clone + Eq + Hash,
    R: Rng,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key).map(|(_, v)| v)
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
        self.keys
            .iter()
            .enumerate()
            .filter_map(|(slot, key)| {
                self.map.get(key).map(|(_, value)| SnapshotEntry {
                    key,
                    value,
                    meta: EntryMeta::Unordered { slot },
                })
            })
            .collect()
    }
}

impl<K, V, R> CoreCache<K, V> for RandomCache<K, V, R>
where
    K: Clone + Eq + Hash,
    R: Rng,
{
    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        self.peek(key)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some((_, v)) = self.map.get_mut(&key) {
            return Some(std::mem::replace(v, value));
        }

        if self.map.len() >= self.capacity {
            let evicted = self.evict_random();
            debug_assert!(evicted.is_some(), "full cache had nothing to evict");
        }

        let idx = self.keys.len();
        self.keys.push(key.clone());
        self.map.insert(key, (idx, value));
        None
    }

    fn pop_victim(&mut self) -> Option<(K, V)> {
        self.evict_random()
    }

    fn clear(&mut self) {
        self.map.clear();
        self.keys.clear();
    }
}

impl<K, V, R> fmt::Debug for RandomCache<K, V, R>
where
    K: Clone + Eq + Hash,
    R: Rng,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomCache")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==============================================
    // Basic Operations
    // ==============================================

    mod basic_operations {
        use super::*;

        #[test]
        fn new_cache_is_empty() {
            let cache: RandomCache<&str, i32> = RandomCache::new(100);
            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 100);
        }

        #[test]
        fn zero_capacity_is_rejected() {
            assert!(RandomCache::<u8, u8>::try_new(0).is_err());
            assert!(RandomCache::<u8, u8, _>::try_with_rng(0, SmallRng::seed_from_u64(1)).is_err());
        }

        #[test]
        fn update_existing_key() {
            let mut cache = RandomCache::with_seed(4, 7);
            cache.put("key", "initial");
            assert_eq!(cache.put("key", "updated"), Some("initial"));
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&"key"), Some(&"updated"));
        }

        #[test]
        fn get_missing_key_returns_none() {
            let mut cache: RandomCache<&str, i32> = RandomCache::with_seed(4, 7);
            assert_eq!(cache.get(&"missing"), None);
        }
    }

    // ==============================================
    // Eviction Behavior
    // ==============================================

    mod eviction_behavior {
        use super::*;

        #[test]
        fn eviction_maintains_capacity() {
            let mut cache = RandomCache::with_seed(3, 11);
            for i in 0..50 {
                cache.put(i, i * 10);
                assert!(cache.len() <= 3);
            }
            assert_eq!(cache.len(), 3);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn exactly_one_resident_is_replaced() {
            let mut cache = RandomCache::with_seed(5, 3);
            for i in 0..5 {
                cache.put(i, ());
            }
            cache.put(99, ());

            let survivors = (0..5).filter(|i| cache.contains(i)).count();
            assert_eq!(survivors, 4);
            assert!(cache.contains(&99));
        }

        #[test]
        fn same_seed_same_victims() {
            let run = |seed| {
                let mut cache = RandomCache::with_seed(4, seed);
                for i in 0..40u32 {
                    cache.put(i, i);
                }
                let mut keys: Vec<_> = cache.snapshot().iter().map(|e| *e.key).collect();
                keys.sort_unstable();
                keys
            };
            assert_eq!(run(1234), run(1234));
        }

        #[test]
        fn pop_victim_empties_cache() {
            let mut cache = RandomCache::with_seed(3, 5);
            cache.put("a", 1);
            cache.put("b", 2);
            assert!(cache.pop_victim().is_some());
            assert!(cache.pop_victim().is_some());
            assert_eq!(cache.pop_victim(), None);
            assert!(cache.is_empty());
        }

        #[test]
        fn custom_rng_is_accepted() {
            let rng = rand::rngs::StdRng::seed_from_u64(9);
            let mut cache = RandomCache::try_with_rng(2, rng).unwrap();
            cache.put(1, "x");
            cache.put(2, "y");
            cache.put(3, "z");
            assert_eq!(cache.len(), 2);
        }
    }

    // ==============================================
    // Get Does Not Affect Eviction
    // ==============================================

    #[test]
    fn hot_key_is_still_evictable() {
        // Reads never protect an entry; over enough seeded trials key 0 is
        // evicted at least once despite being read every round.
        let mut evicted_hot = false;
        for seed in 0..64 {
            let mut cache = RandomCache::with_seed(2, seed);
            cache.put(0, ());
            cache.put(1, ());
            for _ in 0..10 {
                cache.get(&0);
            }
            cache.put(2, ());
            evicted_hot |= !cache.contains(&0);
        }
        assert!(evicted_hot);
    }

    #[test]
    fn snapshot_uses_slot_order() {
        let mut cache = RandomCache::with_seed(3, 1);
        cache.put("a", 1);
        cache.put("b", 2);
        let snap = cache.snapshot();
        assert_eq!(snap[0].meta, EntryMeta::Unordered { slot: 0 });
        assert_eq!(*snap[1].key, "b");
    }

    #[test]
    fn internal_consistency_after_evictions() {
        let mut cache = RandomCache::with_seed(10, 77);
        for i in 0..100 {
            cache.put(i, i * 10);
        }
        assert_eq!(cache.keys.len(), 10);
        assert_eq!(cache.map.len(), 10);
        for (idx, key) in cache.keys.iter().enumerate() {
            let (stored_idx, _) = cache.map.get(key).unwrap();
            assert_eq!(*stored_idx, idx);
        }
    }
}
