//! Fuzzing target for line-oriented ingestion
//!
//! Arbitrary bytes must either load or fail with an error, and every
//! statistic over a loaded database must return without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tdbstats_core::ingest::from_reader;
use tdbstats_core::{stats, DatabaseSummary, LoadOptions, TimestampKeying};

fuzz_target!(|data: &[u8]| {
    for keying in [TimestampKeying::Parsed, TimestampKeying::LeadingCharacter] {
        let options = LoadOptions::default().with_timestamp_keying(keying);
        let Ok(db) = from_reader(data, &options) else {
            continue;
        };

        let _ = DatabaseSummary::compute(&db);
        let _ = stats::item_frequencies(&db);
        let _ = stats::transaction_length_distribution(&db);

        // the dense range is unbounded in the timestamp, keep it small
        if db.timestamp_counts().keys().all(|&ts| ts < 100_000) {
            let _ = stats::transactions_per_timestamp(&db);
        }
    }
});
