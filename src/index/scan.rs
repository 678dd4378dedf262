//! Linear dataset scan.
//!
//! Keeps every loaded row in dataset order and compares keys one by one on
//! each lookup. This is the baseline the trie replaces: O(rows) per search.
//! Rows are scanned newest first, so a repeated `(city, country)` pair
//! resolves to its last occurrence exactly like [`CityTrie`](super::CityTrie).
//! This differs from a plain top-to-bottom file scan, which stops at the
//! first matching row and so returns the earliest population instead.

use crate::index::CityIndex;
use crate::key::{CityKey, fold};

/// In-memory copy of the dataset rows.
#[derive(Debug, Default)]
pub struct LinearScan {
    rows: Vec<(CityKey, String)>,
}

impl LinearScan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates rows in dataset order.
    pub fn rows(&self) -> impl Iterator<Item = (&CityKey, &str)> {
        self.rows.iter().map(|(k, p)| (k, p.as_str()))
    }
}

impl CityIndex for LinearScan {
    fn insert(&mut self, key: CityKey, population: String) {
        self.rows.push((key, population));
    }

    fn search(&self, key: &CityKey) -> Option<&str> {
        self.rows
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, p)| p.as_str())
    }

    /// Number of rows loaded, duplicates included.
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn known_countries(&self, city_name: &str) -> Vec<String> {
        let city_name = fold(city_name);
        let mut codes: Vec<String> = self
            .rows
            .iter()
            .filter(|(k, _)| k.city_name() == city_name)
            .map(|(k, _)| k.country_code().to_owned())
            .collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::normalize;

    #[test]
    fn finds_rows_case_insensitively() {
        let mut scan = LinearScan::new();
        scan.insert(normalize("Tokyo", "JP"), "37400000".into());
        scan.insert(normalize("Delhi", "IN"), "31000000".into());

        assert_eq!(scan.search(&normalize("TOKYO", "jp")), Some("37400000"));
        assert_eq!(scan.search(&normalize("delhi", "in")), Some("31000000"));
        assert_eq!(scan.search(&normalize("delhi", "pk")), None);
    }

    #[test]
    fn duplicate_rows_resolve_to_last() {
        let mut scan = LinearScan::new();
        scan.insert(normalize("Lima", "PE"), "1".into());
        scan.insert(normalize("Lima", "PE"), "2".into());

        assert_eq!(scan.search(&normalize("lima", "pe")), Some("2"));
        assert_eq!(scan.len(), 2);
        assert_eq!(scan.rows().count(), 2);
    }

    #[test]
    fn no_prefix_suggestions() {
        let mut scan = LinearScan::new();
        scan.insert(normalize("Osaka", "JP"), "1".into());
        assert!(scan.suggest("os", 5).is_empty());
    }
}
