//! Thread-safe wrapper around any [`CoreCache`].
//!
//! Every policy updates metadata on `get`, so reads need exclusive access
//! too; the wrapper therefore uses a `parking_lot::Mutex` rather than an
//! `RwLock`. Values are cloned out, never borrowed across the lock.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use citycache::concurrent::SharedCache;
//! use citycache::policy::lru::LruCache;
//!
//! let cache = Arc::new(SharedCache::new(LruCache::new(64)));
//! let handles: Vec<_> = (0..4u32)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..16u32 {
//!                 cache.put(t * 16 + i, i);
//!             }
//!         })
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//! assert_eq!(cache.len(), 64);
//! ```

use std::fmt;
use std::marker::PhantomData;

use parking_lot::Mutex;

use crate::traits::{CoreCache, EntryMeta};

/// `Send + Sync` cache handle. Share it behind an `Arc`.
pub struct SharedCache<C, K, V> {
    inner: Mutex<C>,
    _marker: PhantomData<fn(K) -> V>,
}

impl<C, K, V> SharedCache<C, K, V>
where
    C: CoreCache<K, V>,
{
    pub fn new(cache: C) -> Self {
        Self {
            inner: Mutex::new(cache),
            _marker: PhantomData,
        }
    }

    /// Looks up `key`, updating policy metadata, and clones the value out.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Like [`get`](Self::get) but without touching policy metadata.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().put(key, value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Owned copy of the policy-ordered snapshot, taken under one lock.
    pub fn snapshot_owned(&self) -> Vec<(K, V, EntryMeta)>
    where
        K: Clone,
        V: Clone,
    {
        self.inner
            .lock()
            .snapshot()
            .into_iter()
            .map(|e| (e.key.clone(), e.value.clone(), e.meta))
            .collect()
    }

    /// Runs `f` with exclusive access to the underlying cache.
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }
}

impl<C, K, V> fmt::Debug for SharedCache<C, K, V>
where
    C: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedCache").field("inner", &self.inner).finish()
    }
}
