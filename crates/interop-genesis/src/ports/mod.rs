//! # Ports
//!
//! Seams the pipeline depends on. Production adapters live in
//! [`crate::adapters`]; tests substitute their own.

use crate::domain::{KeyRecord, ValidatorIndex};

/// Read-only, ordered table of validator key records.
///
/// Production: `StaticKeystore::load_json` (shipped 16-validator asset)
/// Testing: `StaticKeystore::from_records`
pub trait Keystore {
    /// Number of records (`N`); valid indices are `[0, N)`.
    fn len(&self) -> usize;

    /// Record for `index`, if present.
    fn lookup(&self, index: ValidatorIndex) -> Option<&KeyRecord>;

    /// Whether the keystore holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Source of the current UNIX time in seconds.
pub trait Clock {
    /// Seconds since the UNIX epoch.
    fn now(&self) -> u64;
}

impl<K: Keystore + ?Sized> Keystore for &K {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn lookup(&self, index: ValidatorIndex) -> Option<&KeyRecord> {
        (**self).lookup(index)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> u64 {
        (**self).now()
    }
}
