//! One-shot summary of every scalar statistic

use crate::database::TemporalDatabase;
use crate::error::Result;
use crate::stats;
use serde::{Deserialize, Serialize};

/// Scalar statistics of a database, as printed by the `summary` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSummary {
    pub database_size: usize,
    pub min_transaction_length: usize,
    pub average_transaction_length: f64,
    pub max_transaction_length: usize,
    pub stdev_transaction_length: f64,
    pub variance_transaction_length: f64,
    pub sparsity: f64,
    pub total_distinct_items: usize,
    pub min_period: i64,
    pub average_period: f64,
    pub max_period: i64,
    pub stdev_period: f64,
}

impl DatabaseSummary {
    /// Compute every statistic. Fails with the first statistic that cannot be computed.
    pub fn compute(db: &TemporalDatabase) -> Result<Self> {
        Ok(Self {
            database_size: stats::database_size(db),
            min_transaction_length: stats::min_transaction_length(db)?,
            average_transaction_length: stats::average_transaction_length(db)?,
            max_transaction_length: stats::max_transaction_length(db)?,
            stdev_transaction_length: stats::stdev_transaction_length(db)?,
            variance_transaction_length: stats::variance_transaction_length(db)?,
            sparsity: stats::sparsity(db)?,
            total_distinct_items: stats::total_distinct_items(db),
            min_period: stats::min_period(db)?,
            average_period: stats::average_period(db)?,
            max_period: stats::max_period(db)?,
            stdev_period: stats::stdev_period(db)?,
        })
    }

    /// Label/value pairs in display order
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Database size", self.database_size.to_string()),
            ("Minimum transaction size", self.min_transaction_length.to_string()),
            ("Average transaction size", self.average_transaction_length.to_string()),
            ("Maximum transaction size", self.max_transaction_length.to_string()),
            ("Standard deviation transaction size", self.stdev_transaction_length.to_string()),
            ("Variance", self.variance_transaction_length.to_string()),
            ("Sparsity", self.sparsity.to_string()),
            ("Number of items", self.total_distinct_items.to_string()),
            ("Minimum period", self.min_period.to_string()),
            ("Average period", self.average_period.to_string()),
            ("Maximum period", self.max_period.to_string()),
            ("Standard deviation period", self.stdev_period.to_string()),
        ]
    }
}
