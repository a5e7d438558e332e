//! Export command handler

use super::source::load_database;
use crate::cli::ExportArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tdbstats_core::{export_to_file, stats, TemporalDatabase};

pub const ITEM_FREQUENCY_FILE: &str = "itemFrequency.csv";
pub const TRANSACTION_SIZE_FILE: &str = "transactionSize.csv";
pub const TRANSACTIONS_PER_TIMESTAMP_FILE: &str = "numberOfTransaction.csv";

/// What the export wrote, for machine-readable output
#[derive(Debug, Serialize)]
struct ExportReport {
    directory: PathBuf,
    files: Vec<ExportedFile>,
}

#[derive(Debug, Serialize)]
struct ExportedFile {
    name: &'static str,
    entries: usize,
}

/// Handle the export command
pub fn handle_export(args: ExportArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let db = load_database(&args.source, config, output)?;
    let dir = args.dir.unwrap_or_else(|| config.export.dir.clone());

    let report = export_all(&db, &dir)?;

    if output.format() == crate::cli::OutputFormat::Human {
        for file in &report.files {
            output.success(&format!(
                "✓ Wrote {} entries to {}",
                file.entries,
                dir.join(file.name).display()
            ))?;
        }
        Ok(())
    } else {
        output.data(&report)
    }
}

/// Write the three distributions of `db` into `dir`
fn export_all(db: &TemporalDatabase, dir: &Path) -> Result<ExportReport> {
    std::fs::create_dir_all(dir)?;

    let frequencies = stats::item_frequencies(db);
    let lengths = stats::transaction_length_distribution(db);
    let per_timestamp = stats::transactions_per_timestamp(db)?;

    let files = vec![
        ExportedFile {
            name: ITEM_FREQUENCY_FILE,
            entries: export_to_file(&frequencies, &dir.join(ITEM_FREQUENCY_FILE))?,
        },
        ExportedFile {
            name: TRANSACTION_SIZE_FILE,
            entries: export_to_file(&lengths, &dir.join(TRANSACTION_SIZE_FILE))?,
        },
        ExportedFile {
            name: TRANSACTIONS_PER_TIMESTAMP_FILE,
            entries: export_to_file(&per_timestamp, &dir.join(TRANSACTIONS_PER_TIMESTAMP_FILE))?,
        },
    ];

    tracing::info!(dir = %dir.display(), "Export complete");
    Ok(ExportReport {
        directory: dir.to_path_buf(),
        files,
    })
}
