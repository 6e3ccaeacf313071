//! Hash map aliases shared across the crate.
//!
//! Every runtime lookup table (function registry, symbol table, metric maps)
//! goes through these aliases so the hashing backend can be swapped in one
//! place.

use rapidhash::{RapidHashMap, RapidHashSet};

/// Make it easier to switch between different hash backends.
pub type KeyMap<K, V> = RapidHashMap<K, V>;
/// Alias for the default hash set.
pub type KeySet<K> = RapidHashSet<K>;
