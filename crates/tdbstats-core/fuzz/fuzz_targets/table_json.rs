//! Fuzzing target for JSON transaction tables

#![no_main]

use libfuzzer_sys::fuzz_target;
use tdbstats_core::{ingest, CollisionPolicy, LoadOptions, TransactionTable};

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    if let Ok(table) = TransactionTable::from_json_str(&input) {
        for policy in [CollisionPolicy::KeepAll, CollisionPolicy::LastWins] {
            let options = LoadOptions::default().with_collision_policy(policy);
            let Ok(db) = ingest::load_table(&table, &options) else {
                continue;
            };
            assert_eq!(db.timestamp_counts().values().sum::<usize>(), table.len());
        }
    }
});
