//! Ingestion of temporal databases
//!
//! This module turns a raw source into a frozen [`TemporalDatabase`]:
//! - Local files and remote URLs in the line-oriented text format
//! - In-memory [`TransactionTable`]s
//!
//! Each load is one sequential pass. Nothing is retained between loads.

mod line;
pub mod remote;
pub mod table;

pub use remote::TimeoutConfig;
pub use table::{TableRow, TransactionColumn, TransactionTable};

use crate::database::{DatabaseBuilder, Record, TemporalDatabase};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;

/// Default field separator of the line-oriented format
pub const DEFAULT_SEPARATOR: &str = "\t";

/// Where a database is read from
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Local file in the line-oriented format
    Local(PathBuf),
    /// Remote resource in the line-oriented format
    Remote(Url),
    /// In-memory table
    Table(TransactionTable),
}

impl Source {
    /// Classify a user-supplied location: http(s) URLs are remote, anything else a path
    pub fn detect(input: &str) -> Self {
        match remote::parse_remote(input) {
            Some(url) => Source::Remote(url),
            None => Source::Local(PathBuf::from(input)),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Local(path) => write!(f, "{}", path.display()),
            Source::Remote(url) => write!(f, "{}", remote::redact_url(url)),
            Source::Table(table) => write!(f, "<table: {} rows>", table.len()),
        }
    }
}

impl From<TransactionTable> for Source {
    fn from(table: TransactionTable) -> Self {
        Source::Table(table)
    }
}

/// How per-timestamp counts are accumulated for line-oriented input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampKeying {
    /// Increment the count of the parsed timestamp
    #[default]
    Parsed,
    /// `count[ts] = count[first character of the raw line] + 1`.
    /// Reproduces the output of the reference tooling, quirk included.
    LeadingCharacter,
}

/// What happens when table rows share a timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Every row becomes its own record
    #[default]
    KeepAll,
    /// A later row replaces the items of the earlier record
    LastWins,
}

/// Options controlling a load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Field separator for line-oriented input
    pub separator: String,
    /// Timeouts for remote sources
    pub timeout: TimeoutConfig,
    pub timestamp_keying: TimestampKeying,
    pub collision_policy: CollisionPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            timeout: TimeoutConfig::default(),
            timestamp_keying: TimestampKeying::default(),
            collision_policy: CollisionPolicy::default(),
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_timeout(mut self, timeout: TimeoutConfig) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timestamp_keying(mut self, keying: TimestampKeying) -> Self {
        self.timestamp_keying = keying;
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_empty() {
            return Err(Error::Configuration {
                message: "separator cannot be empty".to_string(),
            });
        }
        self.timeout.validate()
    }
}

/// Load a database from any [`Source`]
pub fn load(source: &Source, options: &LoadOptions) -> Result<TemporalDatabase> {
    options.validate()?;
    info!(source = %source, "Loading temporal database");

    let database = match source {
        Source::Local(path) => load_file(path, options)?,
        Source::Remote(url) => load_url(url, options)?,
        Source::Table(table) => load_table(table, options)?,
    };

    info!(
        source = %source,
        records = database.len(),
        timestamps = database.timestamp_counts().len(),
        "Temporal database loaded"
    );
    Ok(database)
}

/// Load a database from a local file. A file that cannot be opened is [`Error::NotFound`].
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<TemporalDatabase> {
    let file = File::open(path).map_err(|source| Error::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    from_reader(BufReader::new(file), options)
}

/// Fetch and load a database from an http(s) URL
pub fn load_url(url: &Url, options: &LoadOptions) -> Result<TemporalDatabase> {
    options.timeout.validate()?;
    let body = remote::fetch(url, &options.timeout)?;
    from_reader(Cursor::new(body), options)
}

/// Load a database from any reader in the line-oriented format
pub fn from_reader<R: BufRead>(reader: R, options: &LoadOptions) -> Result<TemporalDatabase> {
    let mut builder = DatabaseBuilder::new();
    let mut blank_lines = 0usize;

    for (index, chunk) in reader.split(b'\n').enumerate() {
        let line_no = index + 1;
        let bytes = chunk.map_err(|e| Error::io(format!("failed to read line {}", line_no), e))?;
        let raw = std::str::from_utf8(&bytes).map_err(|e| Error::Parse {
            line: line_no,
            message: format!("invalid UTF-8: {}", e),
        })?;

        let Some(parsed) = line::parse_line(raw, &options.separator, line_no)? else {
            blank_lines += 1;
            debug!(line = line_no, "Skipping blank line");
            continue;
        };

        let previous = match options.timestamp_keying {
            TimestampKeying::Parsed => builder.timestamp_count(parsed.timestamp),
            TimestampKeying::LeadingCharacter => {
                builder.timestamp_count(line::leading_digit(raw, line_no)?)
            }
        };
        builder.set_timestamp_count(parsed.timestamp, previous + 1);

        builder.push(Record {
            sequence_id: line_no as i64,
            timestamp: parsed.timestamp,
            items: parsed.items,
        });
    }

    if blank_lines > 0 {
        warn!(blank_lines, "Blank lines skipped while reading database");
    }
    debug!(records = builder.record_count(), "Finished reading lines");

    builder.finish()
}

/// Load a database from an in-memory table.
///
/// Fails with [`Error::Table`] when two `ts` values are too far apart for
/// their period to be represented.
pub fn load_table(table: &TransactionTable, options: &LoadOptions) -> Result<TemporalDatabase> {
    if table.is_empty() {
        warn!("Transaction table is empty");
    }

    let mut builder = DatabaseBuilder::new();
    let mut replaced = 0usize;

    for row in table.rows() {
        builder.increment_timestamp(row.ts);
        let record = Record {
            sequence_id: row.ts,
            timestamp: row.ts,
            items: row.items.clone(),
        };
        match options.collision_policy {
            CollisionPolicy::KeepAll => builder.push(record),
            CollisionPolicy::LastWins => {
                if builder.upsert(record) {
                    replaced += 1;
                }
            }
        }
    }

    if replaced > 0 {
        debug!(replaced, column = table.column().name(), "Rows replaced by later rows with the same ts");
    }

    builder.finish()
}
