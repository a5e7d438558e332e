//! Turning `SourceArgs` plus configuration into a loaded database

use crate::cli::SourceArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{redaction, timing::Timer};
use crate::output::OutputWriter;
use std::path::Path;
use std::time::Duration;
use tdbstats_core::{ingest, LoadOptions, Source, TemporalDatabase, TransactionTable};
use tracing::{debug, info};

/// Load options from the config file with command-line flags on top
pub(crate) fn resolve_options(args: &SourceArgs, config: &Config) -> Result<LoadOptions> {
    let mut options = config.load_options();

    if let Some(separator) = &args.separator {
        options.separator = unescape_separator(separator);
    }
    if let Some(seconds) = args.timeout {
        options.timeout = options.timeout.with_request_timeout(Duration::from_secs(seconds));
    }
    if let Some(keying) = args.keying {
        options.timestamp_keying = keying.into();
    }
    if let Some(collision) = args.collision {
        options.collision_policy = collision.into();
    }

    options.validate()?;
    Ok(options)
}

/// Shells make a literal tab awkward to pass, so accept `\t`
fn unescape_separator(separator: &str) -> String {
    match separator {
        "\\t" | "tab" => "\t".to_string(),
        other => other.to_string(),
    }
}

/// Decide what kind of source the argument names
pub(crate) fn resolve_source(args: &SourceArgs) -> Result<Source> {
    if !args.table {
        return Ok(Source::detect(&args.source));
    }

    if ingest::remote::parse_remote(&args.source).is_some() {
        return Err(Error::config("--table expects a local JSON file, not a URL"));
    }
    let table = TransactionTable::from_json_file(Path::new(&args.source))?;
    debug!(rows = table.len(), column = table.column().name(), "Read transaction table");
    Ok(Source::from(table))
}

/// Load the database named by `args`, with a spinner on interactive terminals
pub(crate) fn load_database(
    args: &SourceArgs,
    config: &Config,
    output: &OutputWriter,
) -> Result<TemporalDatabase> {
    let shown = redaction::redact_source(&args.source);
    let _timer = Timer::with_details("load_database", &shown);

    let options = resolve_options(args, config)?;
    let source = resolve_source(args)?;

    let spinner = output.spinner(&format!("Reading {}", shown));
    let result = ingest::load(&source, &options);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let db = result?;
    info!(source = %shown, records = db.len(), "Database ready");
    Ok(db)
}
