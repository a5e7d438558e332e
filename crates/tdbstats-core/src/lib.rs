//! tdbstats Core - statistics for temporal transactional databases
//!
//! A temporal transactional database is a sequence of `(timestamp, items)`
//! records. This crate ingests such a database and derives the descriptive
//! statistics used to judge how dense or sparse a dataset is before running
//! pattern-mining algorithms on it.
//!
//! # Main Components
//!
//! - **Ingestion** ([`ingest`]): local files, http(s) URLs, in-memory tables
//! - **Database** ([`TemporalDatabase`]): the frozen result of one ingestion pass
//! - **Statistics** ([`stats`]): stateless functions over a borrowed database
//! - **Export** ([`export`]): `key<TAB>value` files for plotting tools
//!
//! # Example
//!
//! ```no_run
//! use tdbstats_core::{ingest, stats, LoadOptions, Result, Source};
//!
//! fn example() -> Result<()> {
//!     let source = Source::detect("temporal_T10I4D100K.csv");
//!     let db = ingest::load(&source, &LoadOptions::default())?;
//!
//!     println!("size: {}", stats::database_size(&db));
//!     println!("avg length: {}", stats::average_transaction_length(&db)?);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod distribution;
pub mod error;
pub mod export;
pub mod ingest;
pub mod report;
pub mod stats;

// Re-export main types for convenience
pub use database::{Record, TemporalDatabase};
pub use distribution::Distribution;
pub use error::{Error, ErrorKind, Result};
pub use export::{export_to_file, read_exported};
pub use ingest::{
    load, CollisionPolicy, LoadOptions, Source, TableRow, TimeoutConfig, TimestampKeying,
    TransactionColumn, TransactionTable,
};
pub use report::DatabaseSummary;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
