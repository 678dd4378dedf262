//! Query orchestration: cache first, index second.
//!
//! ```text
//!   (city, country)
//!        │ normalize
//!        ▼
//!   cache.get(key) ── hit ──► LookupResult { source: Cache, .. }
//!        │ miss
//!        ▼
//!   index.search(key) ── hit ──► cache.put(key, population)
//!        │                       LookupResult { source: Index, .. }
//!        │ miss
//!        ▼
//!   LookupResult { source: None, population: None }
//! ```
//!
//! A miss at any stage is a normal outcome, not an error, and nothing is
//! retried: the index is treated as ground truth.

use std::fmt;

use tracing::{debug, trace};

use crate::builder::{Cache, CacheBuilder, CachePolicy};
use crate::error::ConfigError;
use crate::index::CityIndex;
use crate::key::{CityKey, normalize};
use crate::traits::{CoreCache, ReadOnlyCache, SnapshotEntry};

/// Where a query was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitSource {
    Cache,
    Index,
    /// Found in neither; the city is unknown.
    None,
}

impl fmt::Display for HitSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            HitSource::Cache => "cache",
            HitSource::Index => "index",
            HitSource::None => "none",
        })
    }
}

/// Outcome of one query, handed to the result sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub key: CityKey,
    pub source: HitSource,
    /// `None` exactly when `source` is [`HitSource::None`].
    pub population: Option<String>,
}

impl LookupResult {
    pub fn is_found(&self) -> bool {
        self.population.is_some()
    }
}

/// Follow-up for a query that found nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissHint {
    /// The city exists; these are its recorded country codes, sorted.
    Countries(Vec<String>),
    /// Known city names starting with the query.
    Names(Vec<String>),
    Nothing,
}

/// Per-orchestrator outcome counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookupStats {
    pub cache_hits: u64,
    pub index_hits: u64,
    pub misses: u64,
}

impl LookupStats {
    pub fn total(&self) -> u64 {
        self.cache_hits + self.index_hits + self.misses
    }

    /// Fraction of queries answered by the cache; `0.0` before any query.
    pub fn hit_ratio(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.cache_hits as f64 / total as f64,
        }
    }
}

/// Lookup service owning one cache and one index.
///
/// Generic over the cache contract, so any policy (or the runtime-selected
/// [`Cache`] wrapper) plugs in unchanged.
///
/// # Example
///
/// ```
/// use citycache::index::{CityIndex, CityTrie};
/// use citycache::key::normalize;
/// use citycache::lookup::{CityLookup, HitSource};
/// use citycache::policy::lru::LruCache;
///
/// let mut trie = CityTrie::new();
/// trie.insert(normalize("tokyo", "jp"), "37400000".to_string());
///
/// let mut service = CityLookup::new(LruCache::new(2), trie);
/// assert_eq!(service.lookup("Tokyo", "JP").source, HitSource::Index);
/// assert_eq!(service.lookup("Tokyo", "JP").source, HitSource::Cache);
/// ```
#[derive(Debug)]
pub struct CityLookup<C, I> {
    cache: C,
    index: I,
    stats: LookupStats,
}

impl<I: CityIndex> CityLookup<Cache<CityKey, String>, I> {
    /// Builds a lookup service whose cache policy is chosen at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn with_policy(index: I, capacity: usize, policy: CachePolicy) -> Result<Self, ConfigError> {
        let cache = CacheBuilder::new(capacity).try_build(policy)?;
        Ok(Self::new(cache, index))
    }
}

impl<C, I> CityLookup<C, I>
where
    C: CoreCache<CityKey, String>,
    I: CityIndex,
{
    pub fn new(cache: C, index: I) -> Self {
        Self {
            cache,
            index,
            stats: LookupStats::default(),
        }
    }

    /// Normalizes a raw query and resolves it.
    pub fn lookup(&mut self, city_name: &str, country_code: &str) -> LookupResult {
        self.lookup_key(normalize(city_name, country_code))
    }

    /// Resolves an already-normalized key.
    pub fn lookup_key(&mut self, key: CityKey) -> LookupResult {
        if let Some(population) = self.cache.get(&key) {
            let population = population.clone();
            self.stats.cache_hits += 1;
            debug!(city = key.city_name(), country = key.country_code(), "cache hit");
            return LookupResult {
                key,
                source: HitSource::Cache,
                population: Some(population),
            };
        }

        let Some(population) = self.index.search(&key).map(str::to_owned) else {
            self.stats.misses += 1;
            debug!(city = key.city_name(), country = key.country_code(), "not found");
            return LookupResult {
                key,
                source: HitSource::None,
                population: None,
            };
        };

        self.stats.index_hits += 1;
        debug!(city = key.city_name(), country = key.country_code(), "index hit");
        let evicting = self.cache.len() >= self.cache.capacity();
        trace!(
            city = key.city_name(),
            country = key.country_code(),
            evicting,
            "populating cache"
        );
        self.cache.put(key.clone(), population.clone());

        LookupResult {
            key,
            source: HitSource::Index,
            population: Some(population),
        }
    }

    /// Hint to show after a not-found query.
    ///
    /// A city the index knows under other country codes yields those codes;
    /// otherwise up to `limit` name completions of the input.
    pub fn miss_hint(&self, city_name: &str, limit: usize) -> MissHint {
        let countries = self.index.known_countries(city_name);
        if !countries.is_empty() {
            return MissHint::Countries(countries);
        }
        let names = self.index.suggest(city_name, limit);
        if names.is_empty() {
            MissHint::Nothing
        } else {
            MissHint::Names(names)
        }
    }

    /// Policy-ordered view of the cache for display.
    pub fn snapshot(&self) -> Vec<SnapshotEntry<'_, CityKey, String>> {
        self.cache.snapshot()
    }

    pub fn stats(&self) -> LookupStats {
        self.stats
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn into_parts(self) -> (C, I) {
        (self.cache, self.index)
    }
}
