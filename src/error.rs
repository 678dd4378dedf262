//! Error types for the citycache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (a capacity of zero). Raised at construction, never at call time.
//! - [`InvariantError`]: Returned by debug-only `check_invariants` methods when
//!   an internal structure disagrees with itself.
//! - [`DatasetError`]: Returned by the dataset loader when the source cannot be
//!   read at all. Malformed rows are skipped, not reported as errors.
//!
//! A query that finds nothing is not an error: see
//! [`HitSource::None`](crate::lookup::HitSource::None).
//!
//! ## Example Usage
//!
//! ```
//! use citycache::error::ConfigError;
//! use citycache::policy::lru::LruCache;
//!
//! let cache: Result<LruCache<String, String>, ConfigError> = LruCache::try_new(10);
//! assert!(cache.is_ok());
//!
//! let bad = LruCache::<String, String>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;
use std::io;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache or index invariants are violated.
///
/// Produced by debug-only `check_invariants` methods (e.g.
/// [`LruCache::check_invariants`](crate::policy::lru::LruCache::check_invariants)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LfuCache::try_new`](crate::policy::lfu::LfuCache::try_new) and
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use citycache::policy::fifo::FifoCache;
///
/// let err = FifoCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }

    /// The error every policy returns for `capacity == 0`.
    pub(crate) fn zero_capacity() -> Self {
        Self::new("cache capacity must be greater than zero")
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Validates a cache capacity, shared by every policy constructor.
#[inline]
pub(crate) fn check_capacity(capacity: usize) -> Result<(), ConfigError> {
    if capacity == 0 {
        return Err(ConfigError::zero_capacity());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// DatasetError
// ---------------------------------------------------------------------------

/// Error returned when a dataset source cannot be loaded.
#[derive(Debug)]
pub enum DatasetError {
    /// The dataset could not be opened or read.
    Io {
        /// Path being read, if the source was a file.
        path: Option<PathBuf>,
        source: io::Error,
    },
    /// The source contained no header line.
    Empty,
}

impl DatasetError {
    pub(crate) fn io(path: Option<PathBuf>, source: io::Error) -> Self {
        Self::Io { path, source }
    }
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io {
                path: Some(path),
                source,
            } => write!(f, "failed to read dataset {}: {}", path.display(), source),
            DatasetError::Io { path: None, source } => {
                write!(f, "failed to read dataset: {}", source)
            },
            DatasetError::Empty => f.write_str("dataset is empty (missing header row)"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io { source, .. } => Some(source),
            DatasetError::Empty => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
