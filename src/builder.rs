//! Unified cache builder for all eviction policies.
//!
//! [`Cache`] is a closed tagged variant over the four policy types, so a
//! policy chosen at runtime (from a CLI flag, say) still goes through the
//! same [`CoreCache`] contract without boxing.
//!
//! ## Example
//!
//! ```rust
//! use citycache::builder::{CacheBuilder, CachePolicy};
//! use citycache::traits::{CoreCache, ReadOnlyCache};
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::error::ConfigError;
use crate::policy::fifo::FifoCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::policy::random::RandomCache;
use crate::traits::{CoreCache, ReadOnlyCache, SnapshotEntry};

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// Least Frequently Used eviction, earliest insertion loses ties.
    Lfu,
    /// First In, First Out eviction.
    Fifo,
    /// Uniform random eviction; `seed` makes it reproducible.
    Random { seed: Option<u64> },
}

impl CachePolicy {
    /// Every policy, with an unseeded random variant.
    pub const ALL: [CachePolicy; 4] = [
        CachePolicy::Lru,
        CachePolicy::Lfu,
        CachePolicy::Fifo,
        CachePolicy::Random { seed: None },
    ];

    /// Short lowercase name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            CachePolicy::Lru => "lru",
            CachePolicy::Lfu => "lfu",
            CachePolicy::Fifo => "fifo",
            CachePolicy::Random { .. } => "random",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" | "recency" => Ok(CachePolicy::Lru),
            "lfu" | "frequency" => Ok(CachePolicy::Lfu),
            "fifo" | "insertion" => Ok(CachePolicy::Fifo),
            "random" => Ok(CachePolicy::Random { seed: None }),
            other => Err(ConfigError::new(format!(
                "unknown cache policy '{}' (expected lru, lfu, fifo or random)",
                other
            ))),
        }
    }
}

/// Unified cache wrapper that provides a consistent API regardless of policy.
pub struct Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    policy: CachePolicy,
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V>
where
    K: Clone + Eq + Hash,
{
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
    Fifo(FifoCache<K, V>),
    Random(RandomCache<K, V, SmallRng>),
}

impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// The policy this cache was built with, seed included.
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }
}

impl<K, V> ReadOnlyCache<K, V> for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(c) => c.contains(key),
            CacheInner::Lfu(c) => c.contains(key),
            CacheInner::Fifo(c) => c.contains(key),
            CacheInner::Random(c) => c.contains(key),
        }
    }

    fn peek(&self, key: &K) -> Option<&V> {
        match &self.inner {
            CacheInner::Lru(c) => c.peek(key),
            CacheInner::Lfu(c) => c.peek(key),
            CacheInner::Fifo(c) => c.peek(key),
            CacheInner::Random(c) => c.peek(key),
        }
    }

    fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(c) => c.len(),
            CacheInner::Lfu(c) => c.len(),
            CacheInner::Fifo(c) => c.len(),
            CacheInner::Random(c) => c.len(),
        }
    }

    fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(c) => c.capacity(),
            CacheInner::Lfu(c) => c.capacity(),
            CacheInner::Fifo(c) => c.capacity(),
            CacheInner::Random(c) => c.capacity(),
        }
    }

    fn snapshot(&self) -> Vec<SnapshotEntry<'_, K, V>> {
        match &self.inner {
            CacheInner::Lru(c) => c.snapshot(),
            CacheInner::Lfu(c) => c.snapshot(),
            CacheInner::Fifo(c) => c.snapshot(),
            CacheInner::Random(c) => c.snapshot(),
        }
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Lru(c) => c.get(key),
            CacheInner::Lfu(c) => c.get(key),
            CacheInner::Fifo(c) => c.get(key),
            CacheInner::Random(c) => c.get(key),
        }
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(c) => c.put(key, value),
            CacheInner::Lfu(c) => c.put(key, value),
            CacheInner::Fifo(c) => c.put(key, value),
            CacheInner::Random(c) => c.put(key, value),
        }
    }

    fn pop_victim(&mut self) -> Option<(K, V)> {
        match &mut self.inner {
            CacheInner::Lru(c) => c.pop_victim(),
            CacheInner::Lfu(c) => c.pop_victim(),
            CacheInner::Fifo(c) => c.pop_victim(),
            CacheInner::Random(c) => c.pop_victim(),
        }
    }

    fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(c) => c.clear(),
            CacheInner::Lfu(c) => c.clear(),
            CacheInner::Fifo(c) => c.clear(),
            CacheInner::Random(c) => c.clear(),
        }
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("policy", &self.policy().name())
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Build a cache with the specified policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use citycache::builder::{CacheBuilder, CachePolicy};
    ///
    /// assert!(CacheBuilder::new(0).try_build::<u64, String>(CachePolicy::Fifo).is_err());
    ///
    /// let cache = CacheBuilder::new(8)
    ///     .try_build::<u64, String>(CachePolicy::Random { seed: Some(7) })
    ///     .unwrap();
    /// assert_eq!(cache.policy().name(), "random");
    /// ```
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCache::try_new(self.capacity)?),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::try_new(self.capacity)?),
            CachePolicy::Fifo => CacheInner::Fifo(FifoCache::try_new(self.capacity)?),
            CachePolicy::Random { seed: Some(seed) } => CacheInner::Random(
                RandomCache::try_with_rng(self.capacity, SmallRng::seed_from_u64(seed))?,
            ),
            CachePolicy::Random { seed: None } => {
                CacheInner::Random(RandomCache::try_new(self.capacity)?)
            },
        };

        Ok(Cache { policy, inner })
    }

    /// Build a cache with the specified policy.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero. See [`try_build`](Self::try_build).
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Clone + Eq + Hash,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }
}
