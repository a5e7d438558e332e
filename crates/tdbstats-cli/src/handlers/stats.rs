//! Statistics command handlers

use super::source::load_database;
use crate::cli::{DistributionArgs, ItemsArgs, SummaryArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use std::fmt::Display;
use std::path::Path;
use tdbstats_core::{export_to_file, stats, DatabaseSummary, Distribution};

/// Handle the summary command
pub fn handle_summary(args: SummaryArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let db = load_database(&args.source, config, output)?;
    let summary = DatabaseSummary::compute(&db)?;

    output.section("Database Summary")?;
    output.summary(&summary)
}

/// Handle the items command
pub fn handle_items(args: ItemsArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let db = load_database(&args.source, config, output)?;
    let frequencies = stats::item_frequencies(&db);

    if let Some(path) = &args.save_to {
        save(&frequencies, path, output)?;
    }

    let shown = match args.top {
        Some(n) => frequencies.top(n),
        None => frequencies,
    };
    output.section("Item Frequencies")?;
    output.distribution(["Item", "Frequency"], &shown)
}

/// Handle the lengths command
pub fn handle_lengths(args: DistributionArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let db = load_database(&args.source, config, output)?;
    let lengths = stats::transaction_length_distribution(&db);

    if let Some(path) = &args.save_to {
        save(&lengths, path, output)?;
    }

    output.section("Transaction Length Distribution")?;
    output.distribution(["Length", "Transactions"], &lengths)
}

/// Handle the timestamps command
pub fn handle_timestamps(args: DistributionArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let db = load_database(&args.source, config, output)?;
    let per_timestamp = stats::transactions_per_timestamp(&db)?;

    if let Some(path) = &args.save_to {
        save(&per_timestamp, path, output)?;
    }

    output.section("Transactions per Timestamp")?;
    output.distribution(["Timestamp", "Transactions"], &per_timestamp)
}

fn save<K: Display>(distribution: &Distribution<K>, path: &Path, output: &mut OutputWriter) -> Result<()> {
    let lines = export_to_file(distribution, path)?;
    output.success(&format!("✓ Saved {} entries to {}", lines, path.display()))
}
