//! Dataset indexes consulted on a cache miss.
//!
//! Two interchangeable variants implement [`CityIndex`]:
//!
//! - [`CityTrie`]: character trie, O(length of city name) per lookup
//!   regardless of dataset size.
//! - [`LinearScan`]: the records in dataset order, scanned on every lookup.
//!
//! Both are built once by the [`dataset`](crate::dataset) loader through
//! repeated [`CityIndex::insert`] calls and never pruned. A later insert of
//! the same `(city, country)` pair overwrites the earlier population.

pub mod scan;
pub mod trie;

pub use scan::LinearScan;
pub use trie::CityTrie;

use crate::key::CityKey;

/// Lookup structure mapping a [`CityKey`] to its population string.
pub trait CityIndex {
    /// Adds or overwrites the population for `key`.
    fn insert(&mut self, key: CityKey, population: String);

    /// Returns the population stored for `key`, if any.
    fn search(&self, key: &CityKey) -> Option<&str>;

    /// Number of records held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted country codes recorded for the complete city name `city_name`
    /// (case-folded like any key). Empty when the name is unknown.
    fn known_countries(&self, city_name: &str) -> Vec<String>;

    /// Up to `limit` known city names starting with `prefix`.
    ///
    /// Indexes without prefix structure return nothing.
    fn suggest(&self, prefix: &str, limit: usize) -> Vec<String> {
        let _ = (prefix, limit);
        Vec::new()
    }
}
