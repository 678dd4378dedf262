pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
#[cfg(feature = "concurrency")]
pub use crate::concurrent::SharedCache;
pub use crate::dataset::{LoadReport, load_path, load_reader};
pub use crate::ds::{IntrusiveList, SlotArena, SlotId};
pub use crate::error::{ConfigError, DatasetError, InvariantError};
pub use crate::index::{CityIndex, CityTrie, LinearScan};
pub use crate::key::{CityKey, normalize};
pub use crate::lookup::{CityLookup, HitSource, LookupResult, LookupStats, MissHint};
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::random::RandomCache;
pub use crate::traits::{CoreCache, EntryMeta, ReadOnlyCache, SnapshotEntry};
