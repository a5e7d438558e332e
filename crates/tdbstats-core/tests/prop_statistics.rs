//! Property-based tests for the statistics engine
//!
//! These tests check relations that hold for any well-formed database.

use proptest::prelude::*;
use tdbstats_core::ingest::from_reader;
use tdbstats_core::{
    ingest, stats, LoadOptions, TableRow, TemporalDatabase, TransactionColumn, TransactionTable,
};

/// Strategy for one record: a timestamp and up to eight items
fn record_strategy() -> impl Strategy<Value = (i64, Vec<String>)> {
    (
        0i64..=60,
        prop::collection::vec("[a-h]{1,2}", 0..8),
    )
}

/// Strategy for a non-empty database rendered in the tab-separated format
fn database_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(record_strategy(), 1..40).prop_map(|records| {
        records
            .into_iter()
            .map(|(ts, items)| {
                let mut fields = vec![ts.to_string()];
                fields.extend(items);
                fields.join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn load(input: &str) -> TemporalDatabase {
    from_reader(input.as_bytes(), &LoadOptions::default()).unwrap()
}

proptest! {
    #[test]
    fn prop_length_bounds(input in database_strategy()) {
        let db = load(&input);
        let min = stats::min_transaction_length(&db).unwrap() as f64;
        let max = stats::max_transaction_length(&db).unwrap() as f64;
        let avg = stats::average_transaction_length(&db).unwrap();

        prop_assert!(min <= avg + 1e-9);
        prop_assert!(avg <= max + 1e-9);
        prop_assert!(stats::stdev_transaction_length(&db).unwrap() >= 0.0);
    }

    #[test]
    fn prop_distributions_account_for_every_record(input in database_strategy()) {
        let db = load(&input);
        let lengths = stats::transaction_length_distribution(&db);
        prop_assert_eq!(lengths.total(), stats::database_size(&db));

        let total_items: usize = db.lengths().iter().sum();
        prop_assert_eq!(stats::item_frequencies(&db).total(), total_items);
    }

    #[test]
    fn prop_item_frequencies_descending(input in database_strategy()) {
        let db = load(&input);
        let counts: Vec<usize> = stats::item_frequencies(&db).values().collect();
        prop_assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn prop_sparsity_in_unit_interval(input in database_strategy()) {
        let db = load(&input);
        if let Ok(sparsity) = stats::sparsity(&db) {
            prop_assert!((0.0..=1.0).contains(&sparsity));
        }
    }

    #[test]
    fn prop_file_periods_follow_line_numbers(input in database_strategy()) {
        let db = load(&input);
        // every generated line is a record, so keys are 1..=n
        prop_assert_eq!(db.periods().len(), stats::database_size(&db));
        prop_assert!(db.periods().iter().all(|&p| p == 1));
        prop_assert_eq!(stats::average_period(&db).unwrap(), 1.0);
    }

    #[test]
    fn prop_table_periods_telescope(records in prop::collection::vec(record_strategy(), 1..40)) {
        let rows = records
            .into_iter()
            .map(|(ts, items)| TableRow { ts, items })
            .collect();
        let table = TransactionTable::from_rows(TransactionColumn::Transactions, rows);
        let db = ingest::load_table(&table, &LoadOptions::default()).unwrap();

        // table records are keyed by ts; periods start from 0
        prop_assert_eq!(db.periods().len(), db.timestamp_counts().len());
        prop_assert!(db.periods().iter().all(|&p| p >= 0));
        let max_ts = *db.timestamp_counts().keys().last().unwrap();
        prop_assert_eq!(db.periods().iter().sum::<i64>(), max_ts);
    }

    #[test]
    fn prop_transactions_per_timestamp_is_dense(input in database_strategy()) {
        let db = load(&input);
        let max_ts = *db.timestamp_counts().keys().last().unwrap();
        match stats::transactions_per_timestamp(&db) {
            Ok(dist) => {
                let keys: Vec<i64> = dist.keys().copied().collect();
                let expected: Vec<i64> = (1..=max_ts).collect();
                prop_assert_eq!(keys, expected);

                let at_zero = db.timestamp_counts().get(&0).copied().unwrap_or(0);
                prop_assert_eq!(dist.total() + at_zero, stats::database_size(&db));
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }
}
