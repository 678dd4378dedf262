//! citycache: city population lookup behind a bounded, policy-driven cache.
//!
//! A query `(city, country)` is normalized into a [`key::CityKey`], answered
//! from a [`traits::CoreCache`] when resident, and otherwise resolved through
//! a [`index::CityIndex`] built from the CSV dataset by [`dataset`]. Index
//! hits are written back to the cache, which evicts by its configured policy
//! (LRU, LFU, FIFO or random) once full.
//!
//! See `DESIGN.md` for the module map.

pub mod builder;
pub mod dataset;
pub mod ds;
pub mod error;
pub mod index;
pub mod key;
pub mod lookup;
pub mod policy;

#[cfg(feature = "concurrency")]
pub mod concurrent;

pub mod prelude;
pub mod traits;
