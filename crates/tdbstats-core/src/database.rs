//! The frozen, post-ingestion representation of a temporal database
//!
//! A [`TemporalDatabase`] is only produced by the ingestion functions in
//! [`crate::ingest`]. Its fields are private and there are no mutating
//! methods, so statistics can borrow it freely.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A single transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Database key. Line counter for line-oriented input, the timestamp for tables.
    pub sequence_id: i64,
    /// Timestamp the transaction was recorded at
    pub timestamp: i64,
    /// Item identifiers, duplicates allowed
    pub items: Vec<String>,
}

impl Record {
    /// Number of items in the transaction
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the transaction carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Immutable temporal transactional database
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemporalDatabase {
    records: Vec<Record>,
    timestamp_counts: BTreeMap<i64, usize>,
    lengths: Vec<usize>,
    periods: Vec<i64>,
}

impl TemporalDatabase {
    /// Records in read order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over records in read order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records observed per timestamp
    pub fn timestamp_counts(&self) -> &BTreeMap<i64, usize> {
        &self.timestamp_counts
    }

    /// Transaction lengths in read order
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Gaps between consecutive distinct keys, the first measured from 0
    pub fn periods(&self) -> &[i64] {
        &self.periods
    }
}

impl<'a> IntoIterator for &'a TemporalDatabase {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Accumulates records during a single ingestion pass
#[derive(Debug, Default)]
pub(crate) struct DatabaseBuilder {
    records: Vec<Record>,
    positions: HashMap<i64, usize>,
    timestamp_counts: BTreeMap<i64, usize>,
}

impl DatabaseBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a record, even if its key was seen before
    pub(crate) fn push(&mut self, record: Record) {
        self.positions
            .entry(record.sequence_id)
            .or_insert(self.records.len());
        self.records.push(record);
    }

    /// Insert a record, replacing the items of an existing record with the same
    /// key. The replaced record keeps its original position.
    pub(crate) fn upsert(&mut self, record: Record) -> bool {
        match self.positions.get(&record.sequence_id) {
            Some(&position) => {
                self.records[position] = record;
                true
            }
            None => {
                self.push(record);
                false
            }
        }
    }

    pub(crate) fn timestamp_count(&self, timestamp: i64) -> usize {
        self.timestamp_counts.get(&timestamp).copied().unwrap_or(0)
    }

    pub(crate) fn set_timestamp_count(&mut self, timestamp: i64, count: usize) {
        self.timestamp_counts.insert(timestamp, count);
    }

    pub(crate) fn increment_timestamp(&mut self, timestamp: i64) {
        *self.timestamp_counts.entry(timestamp).or_insert(0) += 1;
    }

    pub(crate) fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Freeze the accumulated state, deriving lengths and periods.
    ///
    /// Fails when the gap between two keys does not fit in an `i64`.
    pub(crate) fn finish(self) -> Result<TemporalDatabase> {
        let lengths = self.records.iter().map(Record::len).collect();

        let keys: BTreeSet<i64> = self.records.iter().map(|r| r.sequence_id).collect();
        let mut periods = Vec::with_capacity(keys.len());
        let mut previous = 0i64;
        for key in keys {
            let period = key.checked_sub(previous).ok_or_else(|| {
                Error::table(format!("period between keys {} and {} overflows", previous, key))
            })?;
            periods.push(period);
            previous = key;
        }

        Ok(TemporalDatabase {
            records: self.records,
            timestamp_counts: self.timestamp_counts,
            lengths,
            periods,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sequence_id: i64, timestamp: i64, items: &[&str]) -> Record {
        Record {
            sequence_id,
            timestamp,
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_finish_derives_lengths_and_periods() {
        let mut builder = DatabaseBuilder::new();
        builder.push(record(1, 1, &["a", "d", "e"]));
        builder.push(record(2, 1, &["b", "a", "f", "g", "h"]));
        builder.push(record(3, 3, &["b", "a", "d", "f"]));

        let db = builder.finish().unwrap();
        assert_eq!(db.len(), 3);
        assert_eq!(db.lengths(), &[3, 5, 4]);
        assert_eq!(db.periods(), &[1, 1, 1]);
    }

    #[test]
    fn test_periods_use_sorted_distinct_keys() {
        let mut builder = DatabaseBuilder::new();
        builder.push(record(7, 7, &["a"]));
        builder.push(record(3, 3, &["b"]));
        builder.push(record(3, 3, &["c"]));
        builder.push(record(4, 4, &[]));

        let db = builder.finish().unwrap();
        assert_eq!(db.periods(), &[3, 1, 3]);
        assert_eq!(db.lengths(), &[1, 1, 1, 0]);
    }

    #[test]
    fn test_upsert_keeps_first_position() {
        let mut builder = DatabaseBuilder::new();
        assert!(!builder.upsert(record(1, 1, &["a"])));
        assert!(!builder.upsert(record(2, 2, &["b"])));
        assert!(builder.upsert(record(1, 1, &["x", "y"])));

        let db = builder.finish().unwrap();
        assert_eq!(db.len(), 2);
        assert_eq!(db.records()[0].items, vec!["x", "y"]);
        assert_eq!(db.records()[1].items, vec!["b"]);
    }

    #[test]
    fn test_timestamp_counting() {
        let mut builder = DatabaseBuilder::new();
        builder.increment_timestamp(5);
        builder.increment_timestamp(5);
        builder.set_timestamp_count(2, 9);
        assert_eq!(builder.timestamp_count(5), 2);
        assert_eq!(builder.timestamp_count(2), 9);
        assert_eq!(builder.timestamp_count(1), 0);

        let db = builder.finish().unwrap();
        assert!(db.is_empty());
        assert!(db.periods().is_empty());
        assert_eq!(db.timestamp_counts().len(), 2);
    }

    #[test]
    fn test_period_overflow_is_table_error() {
        let mut builder = DatabaseBuilder::new();
        builder.push(record(i64::MIN, i64::MIN, &["a"]));
        builder.push(record(i64::MAX, i64::MAX, &["b"]));

        let err = builder.finish().unwrap_err();
        assert!(matches!(err, Error::Table { .. }));
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_extreme_keys_without_overflow() {
        let mut builder = DatabaseBuilder::new();
        builder.push(record(i64::MIN, i64::MIN, &["a"]));
        builder.push(record(-1, -1, &["b"]));

        let db = builder.finish().unwrap();
        assert_eq!(db.periods(), &[i64::MIN, i64::MAX]);
    }
}
