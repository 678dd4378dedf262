//! Canonical city keys.
//!
//! Every lookup, cache entry and index path is keyed by a [`CityKey`] whose
//! fields have already been folded to lowercase, so `("Paris", "FR")` and
//! `("paris", "fr")` name the same entry everywhere.

use std::fmt;

/// Case-folded composite of a city name and a country code.
///
/// Equality and hashing are structural over both fields. The fields are
/// private so a `CityKey` can only be obtained through [`normalize`] (or
/// [`CityKey::new`]), which guarantees the canonical case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CityKey {
    country_code: String,
    city_name: String,
}

impl CityKey {
    /// Builds a key from raw input, folding both parts to lowercase.
    ///
    /// # Example
    ///
    /// ```
    /// use citycache::key::CityKey;
    ///
    /// let key = CityKey::new("Tokyo", "JP");
    /// assert_eq!(key.city_name(), "tokyo");
    /// assert_eq!(key.country_code(), "jp");
    /// ```
    pub fn new(city_name: &str, country_code: &str) -> Self {
        Self {
            country_code: fold(country_code),
            city_name: fold(city_name),
        }
    }

    /// Returns the normalized city name.
    #[inline]
    pub fn city_name(&self) -> &str {
        &self.city_name
    }

    /// Returns the normalized country code.
    #[inline]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Splits the key into `(city_name, country_code)`.
    pub fn into_parts(self) -> (String, String) {
        (self.city_name, self.country_code)
    }
}

impl fmt::Display for CityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city_name, self.country_code)
    }
}

/// Canonicalizes a `(city, country)` pair into a [`CityKey`].
///
/// Total over any input, including empty strings.
///
/// ```
/// use citycache::key::normalize;
///
/// assert_eq!(normalize("Paris", "FR"), normalize("paris", "fr"));
/// ```
#[inline]
pub fn normalize(city_name: &str, country_code: &str) -> CityKey {
    CityKey::new(city_name, country_code)
}

pub(crate) fn fold(s: &str) -> String {
    if s.is_ascii() {
        s.to_ascii_lowercase()
    } else {
        s.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn folds_both_fields() {
        let key = normalize("New York", "US");
        assert_eq!(key.city_name(), "new york");
        assert_eq!(key.country_code(), "us");
    }

    #[test]
    fn mixed_case_inputs_are_equal_and_hash_equal() {
        let mut set = HashSet::new();
        set.insert(normalize("PARIS", "fr"));
        assert!(set.contains(&normalize("paris", "FR")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn non_ascii_names_fold() {
        assert_eq!(normalize("ZÜRICH", "CH"), normalize("zürich", "ch"));
        assert_eq!(normalize("ŁÓDŹ", "pl").city_name(), "łódź");
    }

    #[test]
    fn empty_strings_are_valid() {
        let key = normalize("", "");
        assert_eq!(key.city_name(), "");
        assert_eq!(key.country_code(), "");
    }

    #[test]
    fn same_city_different_country_differs() {
        assert_ne!(normalize("Paris", "FR"), normalize("Paris", "US"));
    }

    #[test]
    fn display_and_parts() {
        let key = normalize("Lima", "PE");
        assert_eq!(key.to_string(), "lima, pe");
        assert_eq!(key.into_parts(), ("lima".to_string(), "pe".to_string()));
    }
}
