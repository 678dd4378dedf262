//! Eviction policies.
//!
//! Each module provides one cache type implementing
//! [`CoreCache`](crate::traits::CoreCache):
//!
//! | Module     | Type          | Evicts                                   |
//! |------------|---------------|------------------------------------------|
//! | [`lru`]    | `LruCache`    | least recently used                      |
//! | [`lfu`]    | `LfuCache`    | lowest access count, earliest inserted   |
//! | [`fifo`]   | `FifoCache`   | earliest inserted                        |
//! | [`random`] | `RandomCache` | uniform random resident                  |

pub mod fifo;
pub mod lfu;
pub mod lru;
pub mod random;
