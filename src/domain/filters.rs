//! Active filter refinements for a section list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key/value query refinements applied to the current section's list.
///
/// Values are always non-empty: setting an empty value removes the key
/// instead, so a filter that was set and then cleared produces the same
/// outgoing query as one that was never set. Iteration order is sorted by
/// key, which keeps queries built from equal filter sets identical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    values: BTreeMap<String, String>,
}

impl FilterSet {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`; an empty value removes the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Returns the value for `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Removes all filters.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of active filters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterates over active filters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
