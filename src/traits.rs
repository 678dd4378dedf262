//! # Cache Trait Hierarchy
//!
//! Every eviction policy in [`policy`](crate::policy) satisfies the same two
//! traits, so callers (most importantly [`CityLookup`](crate::lookup::CityLookup))
//! depend only on the shared contract and never on a concrete variant.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │          ReadOnlyCache<K, V>            │
//!   │                                         │
//!   │  contains(&, &K) → bool                 │
//!   │  peek(&, &K) → Option<&V>               │
//!   │  len(&) / is_empty(&) / capacity(&)     │
//!   │  snapshot(&) → Vec<SnapshotEntry>       │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  put(&mut, K, V) → Option<V>            │
//!   │  pop_victim(&mut) → Option<(K, V)>      │
//!   │  clear(&mut)                            │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! ## Policy side effects
//!
//! | Policy | `get` hit            | `put` on resident key | Victim                    |
//! |--------|----------------------|-----------------------|---------------------------|
//! | LRU    | move to MRU          | replace, move to MRU  | least recently used       |
//! | LFU    | counter + 1          | replace, counter + 1  | min counter, oldest seq   |
//! | FIFO   | none                 | replace in place      | oldest inserted           |
//! | Random | none                 | replace in place      | uniform draw              |
//!
//! ## Snapshot order
//!
//! [`ReadOnlyCache::snapshot`] never mutates the cache. For LRU, LFU and FIFO
//! the last element is the entry the next eviction would remove; the random
//! policy lists residents in slot order since no entry is preferred.
//!
//! ## Thread Safety
//!
//! None of the policy types synchronize internally. With the `concurrency`
//! feature, [`SharedCache`](crate::concurrent::SharedCache) serializes
//! `get`/`put` behind one mutex per cache instance.

/// Policy-specific metadata attached to a snapshot entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMeta {
    /// Position in recency order; `0` is the most recently used.
    Recency { rank: usize },
    /// Number of accesses (insert counts as the first).
    Frequency { count: u64 },
    /// Monotonic insertion sequence number; lower is older.
    Insertion { seq: u64 },
    /// Dense slot index; carries no eviction priority.
    Unordered { slot: usize },
}

/// Read-only view of one resident entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotEntry<'a, K, V> {
    pub key: &'a K,
    pub value: &'a V,
    pub meta: EntryMeta,
}

/// Cache operations that never change eviction state.
pub trait ReadOnlyCache<K, V> {
    /// Checks if a key is resident without touching policy metadata.
    fn contains(&self, key: &K) -> bool;

    /// Returns the value for `key` without touching policy metadata.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Returns the current number of resident entries.
    fn len(&self) -> usize;

    /// Returns `true` if no entries are resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fixed maximum number of entries.
    fn capacity(&self) -> usize;

    /// Produces the policy-ordered diagnostic view of all residents.
    ///
    /// # Example
    ///
    /// ```
    /// use citycache::policy::fifo::FifoCache;
    /// use citycache::traits::{CoreCache, ReadOnlyCache};
    ///
    /// let mut cache = FifoCache::new(3);
    /// cache.put("a", 1);
    /// cache.put("b", 2);
    ///
    /// let keys: Vec<_> = cache.snapshot().iter().map(|e| *e.key).collect();
    /// assert_eq!(keys, vec!["b", "a"]); // "a" is evicted next
    /// ```
    fn snapshot(&self) -> Vec<SnapshotEntry<'_, K, V>>;
}

/// The uniform get/put contract every eviction policy implements.
///
/// # Example
///
/// ```
/// use citycache::policy::lru::LruCache;
/// use citycache::traits::{CoreCache, ReadOnlyCache};
///
/// fn warm<C: CoreCache<u32, String>>(cache: &mut C, rows: &[(u32, &str)]) {
///     for (k, v) in rows {
///         cache.put(*k, v.to_string());
///     }
/// }
///
/// let mut cache = LruCache::new(2);
/// warm(&mut cache, &[(1, "one"), (2, "two"), (3, "three")]);
/// assert_eq!(cache.len(), 2);
/// assert!(!cache.contains(&1));
/// ```
pub trait CoreCache<K, V>: ReadOnlyCache<K, V> {
    /// Looks up `key`, applying the policy's access side effect on a hit.
    ///
    /// A miss has no side effect.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Inserts or replaces an entry.
    ///
    /// If `key` is resident its value is replaced (returning the old one) and
    /// the policy's update side effect is applied. Otherwise, when the cache
    /// is full, exactly one entry is evicted by the policy's rule before the
    /// new entry is inserted with initial metadata.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Forces one eviction using the policy's rule.
    ///
    /// Returns `None` only when the cache is empty.
    fn pop_victim(&mut self) -> Option<(K, V)>;

    /// Removes every entry; capacity is unchanged.
    fn clear(&mut self);
}
