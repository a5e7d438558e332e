//! Ordered key → count mappings
//!
//! The frequency-style statistics return a [`Distribution`]. Iteration order
//! is part of each statistic's contract, so entries live in a `Vec` rather
//! than a hash map, and serialization emits them as a map in that order.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Borrow;

/// Ordered sequence of `(key, count)` entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution<K> {
    entries: Vec<(K, usize)>,
}

impl<K> Distribution<K> {
    pub(crate) fn from_entries(entries: Vec<(K, usize)>) -> Self {
        Self { entries }
    }

    /// Entries in contract order
    pub fn entries(&self) -> &[(K, usize)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> + '_ {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.values().sum()
    }

    /// Look up the count for a key (linear scan)
    pub fn get<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| *v)
    }

    pub fn into_entries(self) -> Vec<(K, usize)> {
        self.entries
    }
}

impl<K: Clone> Distribution<K> {
    /// The first `n` entries, keeping order
    pub fn top(&self, n: usize) -> Distribution<K> {
        Distribution {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }
}

impl<'a, K> IntoIterator for &'a Distribution<K> {
    type Item = &'a (K, usize);
    type IntoIter = std::slice::Iter<'a, (K, usize)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Serialize> Serialize for Distribution<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Distribution<String> {
        Distribution::from_entries(vec![
            ("a".to_string(), 3),
            ("b".to_string(), 2),
            ("e".to_string(), 1),
        ])
    }

    #[test]
    fn test_lookup_and_total() {
        let dist = sample();
        assert_eq!(dist.get("b"), Some(2));
        assert_eq!(dist.get("z"), None);
        assert_eq!(dist.total(), 6);
        assert_eq!(dist.len(), 3);
    }

    #[test]
    fn test_top_keeps_order() {
        let top = sample().top(2);
        let keys: Vec<&str> = top.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(sample().top(10).len(), 3);
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"a":3,"b":2,"e":1}"#);

        let numeric = Distribution::from_entries(vec![(3usize, 1), (5, 2)]);
        assert_eq!(serde_json::to_string(&numeric).unwrap(), r#"{"3":1,"5":2}"#);
    }
}
