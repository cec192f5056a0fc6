//! Generic time-series container.
//!
//! `TimeSeries<K, V>` is an ordered map from a key (typically a
//! `chrono::NaiveDate`) to a value, backed by a `BTreeMap`.  Keys are unique:
//! inserting an existing key overwrites, which gives the fixing store its
//! dedup-by-date semantics for free.

use std::collections::BTreeMap;

/// An ordered, key-unique container for dated observations.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<K: Ord + Clone, V: Clone> {
    data: BTreeMap<K, V>,
}

impl<K: Ord + Clone, V: Clone> Default for TimeSeries<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Clone> std::iter::FromIterator<(K, V)> for TimeSeries<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord + Clone, V: Clone> TimeSeries<K, V> {
    /// Create an empty time series.
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Build from an iterator of `(K, V)` pairs.
    ///
    /// Later pairs overwrite earlier ones with the same key.
    pub fn from_pairs(iter: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The earliest key, or `None` if empty.
    pub fn first_key(&self) -> Option<&K> {
        self.data.keys().next()
    }

    /// The latest key, or `None` if empty.
    pub fn last_key(&self) -> Option<&K> {
        self.data.keys().next_back()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.data.get(key)
    }

    /// Insert or overwrite a value.
    pub fn insert(&mut self, key: K, value: V) {
        self.data.insert(key, value);
    }

    /// Whether a key is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.data.contains_key(key)
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<K> {
        self.data.keys().cloned().collect()
    }

    /// All values in key-ascending order.
    pub fn values(&self) -> Vec<V> {
        self.data.values().cloned().collect()
    }

    /// Iterate over `(&K, &V)` in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.data.iter()
    }

    /// Iterate over the sub-range of entries with keys in `[low, high]`,
    /// where either bound may be open.
    pub fn range(&self, low: Option<&K>, high: Option<&K>) -> impl Iterator<Item = (&K, &V)> {
        use std::ops::Bound;
        let lo = match low {
            Some(k) => Bound::Included(k.clone()),
            None => Bound::Unbounded,
        };
        let hi = match high {
            Some(k) => Bound::Included(k.clone()),
            None => Bound::Unbounded,
        };
        self.data.range((lo, hi))
    }

    /// Clear all entries.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
