//! Descriptive statistics over a [`TemporalDatabase`]
//!
//! Every function here is a pure read of the frozen database. Nothing is
//! cached: each call recomputes from the database's records, lengths,
//! periods and timestamp counts.

use crate::database::TemporalDatabase;
use crate::distribution::Distribution;
use crate::error::{Error, Result};
use anyhow::Context;
use std::collections::{BTreeMap, HashMap};

/// Number of records
pub fn database_size(db: &TemporalDatabase) -> usize {
    db.len()
}

pub fn min_transaction_length(db: &TemporalDatabase) -> Result<usize> {
    db.lengths()
        .iter()
        .copied()
        .min()
        .ok_or(Error::EmptyDataset {
            statistic: "minimum transaction length",
        })
}

pub fn max_transaction_length(db: &TemporalDatabase) -> Result<usize> {
    db.lengths()
        .iter()
        .copied()
        .max()
        .ok_or(Error::EmptyDataset {
            statistic: "maximum transaction length",
        })
}

/// Total number of items across all records divided by the number of records
pub fn average_transaction_length(db: &TemporalDatabase) -> Result<f64> {
    let size = database_size(db);
    if size == 0 {
        return Err(Error::EmptyDataset {
            statistic: "average transaction length",
        });
    }
    let total: usize = db.lengths().iter().sum();
    Ok(total as f64 / size as f64)
}

/// Population standard deviation of the transaction lengths
pub fn stdev_transaction_length(db: &TemporalDatabase) -> Result<f64> {
    let values = lengths_f64(db);
    population_stdev(&values).ok_or(Error::EmptyDataset {
        statistic: "standard deviation of transaction length",
    })
}

/// Sample variance (n - 1 denominator) of the transaction lengths
pub fn variance_transaction_length(db: &TemporalDatabase) -> Result<f64> {
    const STATISTIC: &str = "variance of transaction length";

    let values = lengths_f64(db);
    match values.len() {
        0 => Err(Error::EmptyDataset { statistic: STATISTIC }),
        1 => Err(Error::InsufficientData {
            statistic: STATISTIC,
            required: 2,
            actual: 1,
        }),
        n => Ok(sum_of_squared_deviations(&values) / (n - 1) as f64),
    }
}

/// Number of distinct items
pub fn total_distinct_items(db: &TemporalDatabase) -> usize {
    item_frequencies(db).len()
}

/// Fraction of the (record × distinct item) matrix that is empty
pub fn sparsity(db: &TemporalDatabase) -> Result<f64> {
    let frequencies = item_frequencies(db);
    let matrix_size = database_size(db) * frequencies.len();
    if matrix_size == 0 {
        return Err(Error::DivisionByZero {
            statistic: "sparsity",
        });
    }
    let occurrences = frequencies.total();
    Ok((matrix_size as f64 - occurrences as f64) / matrix_size as f64)
}

/// Occurrences per item, highest count first.
///
/// Ties keep the order in which items were first seen while scanning the
/// records in read order.
pub fn item_frequencies(db: &TemporalDatabase) -> Distribution<String> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<(String, usize)> = Vec::new();

    for item in db.iter().flat_map(|record| record.items.iter()) {
        match positions.get(item.as_str()) {
            Some(&position) => entries[position].1 += 1,
            None => {
                positions.insert(item.as_str(), entries.len());
                entries.push((item.clone(), 1));
            }
        }
    }

    // stable: equal counts stay in first-seen order
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    Distribution::from_entries(entries)
}

/// Number of records per transaction length, shortest first
pub fn transaction_length_distribution(db: &TemporalDatabase) -> Distribution<usize> {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for &length in db.lengths() {
        *counts.entry(length).or_insert(0) += 1;
    }
    Distribution::from_entries(counts.into_iter().collect())
}

pub fn min_period(db: &TemporalDatabase) -> Result<i64> {
    db.periods().iter().copied().min().ok_or(Error::EmptyDataset {
        statistic: "minimum period",
    })
}

pub fn max_period(db: &TemporalDatabase) -> Result<i64> {
    db.periods().iter().copied().max().ok_or(Error::EmptyDataset {
        statistic: "maximum period",
    })
}

/// Sum of all periods divided by the number of periods
pub fn average_period(db: &TemporalDatabase) -> Result<f64> {
    let values = periods_f64(db);
    mean(&values).ok_or(Error::EmptyDataset {
        statistic: "average period",
    })
}

/// Population standard deviation of the periods
pub fn stdev_period(db: &TemporalDatabase) -> Result<f64> {
    let values = periods_f64(db);
    population_stdev(&values).ok_or(Error::EmptyDataset {
        statistic: "standard deviation of period",
    })
}

/// Record count for every timestamp from 1 to the largest observed timestamp.
///
/// The range always starts at 1, not at the smallest observed timestamp;
/// unobserved timestamps map to 0. The mapping is dense, so a very large
/// timestamp fails with [`Error::Internal`] when the slots cannot be allocated.
pub fn transactions_per_timestamp(db: &TemporalDatabase) -> Result<Distribution<i64>> {
    let counts = db.timestamp_counts();
    let (&max_ts, _) = counts.last_key_value().ok_or(Error::EmptyDataset {
        statistic: "transactions per timestamp",
    })?;

    let slots = usize::try_from(max_ts.max(0))
        .with_context(|| format!("timestamp {} does not fit in memory", max_ts))?;
    let mut entries: Vec<(i64, usize)> = Vec::new();
    entries
        .try_reserve_exact(slots)
        .with_context(|| format!("cannot allocate {} timestamp slots", slots))?;
    entries.extend((1..=max_ts).map(|ts| (ts, counts.get(&ts).copied().unwrap_or(0))));
    Ok(Distribution::from_entries(entries))
}

fn lengths_f64(db: &TemporalDatabase) -> Vec<f64> {
    db.lengths().iter().map(|&l| l as f64).collect()
}

fn periods_f64(db: &TemporalDatabase) -> Vec<f64> {
    db.periods().iter().map(|&p| p as f64).collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn sum_of_squared_deviations(values: &[f64]) -> f64 {
    let Some(m) = mean(values) else {
        return 0.0;
    };
    values.iter().map(|v| (v - m).powi(2)).sum()
}

fn population_stdev(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some((sum_of_squared_deviations(values) / values.len() as f64).sqrt())
}
