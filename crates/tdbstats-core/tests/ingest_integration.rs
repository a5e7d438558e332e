//! End-to-end ingestion tests against real files and a loopback HTTP server


use std::time::Duration;
use tdbstats_core::{
    export_to_file, ingest, read_exported, stats, DatabaseSummary, Error, ErrorKind, LoadOptions,
    Source, TimeoutConfig,
};
use tempfile::tempdir;
use test_support::{serve_once, unused_local_url, write_database, SAMPLE_DATABASE};

#[test]
fn test_local_file_statistics() {
    let dir = tempdir().unwrap();
    let path = write_database(dir.path(), "temporal.txt", SAMPLE_DATABASE);

    let source = Source::detect(path.to_str().unwrap());
    assert!(matches!(source, Source::Local(_)));

    let db = ingest::load(&source, &LoadOptions::default()).unwrap();
    assert_eq!(stats::database_size(&db), 7);
    assert_eq!(stats::min_transaction_length(&db).unwrap(), 3);
    assert_eq!(stats::max_transaction_length(&db).unwrap(), 5);
    assert!((stats::average_transaction_length(&db).unwrap() - 29.0 / 7.0).abs() < 1e-12);
    assert_eq!(stats::total_distinct_items(&db), 11);
    // file records are keyed by line number
    assert_eq!(db.periods(), &[1, 1, 1, 1, 1, 1, 1]);
    assert_eq!(stats::max_period(&db).unwrap(), 1);

    let per_ts = stats::transactions_per_timestamp(&db).unwrap();
    assert_eq!(per_ts.len(), 7);
    assert_eq!(per_ts.get(&1), Some(2));
    assert_eq!(per_ts.get(&2), Some(0));
}

#[test]
fn test_custom_separator() {
    let dir = tempdir().unwrap();
    let path = write_database(dir.path(), "comma.csv", "1,a,b\n2,b,c\n");

    let options = LoadOptions::default().with_separator(",");
    let db = ingest::load_file(&path, &options).unwrap();
    assert_eq!(stats::database_size(&db), 2);
    assert_eq!(stats::item_frequencies(&db).get("b"), Some(2));
}

#[test]
fn test_empty_file_loads_empty_database() {
    let dir = tempdir().unwrap();
    let path = write_database(dir.path(), "empty.txt", "");

    let db = ingest::load_file(&path, &LoadOptions::default()).unwrap();
    assert!(db.is_empty());
    assert!(matches!(
        DatabaseSummary::compute(&db),
        Err(Error::EmptyDataset { .. })
    ));
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let source = Source::detect(dir.path().join("absent.txt").to_str().unwrap());

    let err = ingest::load(&source, &LoadOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("absent.txt"));
}

#[test]
fn test_non_numeric_timestamp_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = write_database(dir.path(), "bad.txt", "1\ta\nabc\tb\n");

    let err = ingest::load_file(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Parse { line: 2, .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_json_table_file() {
    let dir = tempdir().unwrap();
    let path = write_database(
        dir.path(),
        "table.json",
        r#"[{"ts": 2, "Patterns": ["x", "y"]}, {"ts": 4, "Patterns": ["y"]}]"#,
    );

    let table = tdbstats_core::TransactionTable::from_json_file(&path).unwrap();
    let db = ingest::load(&Source::from(table), &LoadOptions::default()).unwrap();
    assert_eq!(stats::database_size(&db), 2);
    assert_eq!(db.periods(), &[2, 2]);
    assert_eq!(stats::item_frequencies(&db).get("y"), Some(2));
}

#[test]
fn test_remote_source_is_fetched() {
    let (base, server) = serve_once("200 OK", "1\ta\tb\n2\tb\n");
    let source = Source::detect(&format!("{}/temporal.txt", base));
    assert!(matches!(source, Source::Remote(_)));

    let db = ingest::load(&source, &LoadOptions::default()).unwrap();
    server.join().unwrap();

    assert_eq!(stats::database_size(&db), 2);
    assert_eq!(stats::max_transaction_length(&db).unwrap(), 2);
}

#[test]
fn test_remote_error_status_is_http_error() {
    let (base, server) = serve_once("404 Not Found", "missing");
    let source = Source::detect(&format!("{}/missing.txt", base));

    let err = ingest::load(&source, &LoadOptions::default()).unwrap_err();
    server.join().unwrap();

    assert!(matches!(
        err,
        Error::Http {
            status_code: Some(404),
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_unreachable_remote_is_io_error() {
    let source = Source::detect(&unused_local_url());
    let options = LoadOptions::default()
        .with_timeout(TimeoutConfig::new(Duration::from_secs(2), Duration::from_secs(5)));

    let err = ingest::load(&source, &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_exported_distributions_read_back() {
    let dir = tempdir().unwrap();
    let path = write_database(dir.path(), "temporal.txt", SAMPLE_DATABASE);
    let db = ingest::load_file(&path, &LoadOptions::default()).unwrap();

    let out = dir.path().join("numberOfTransaction.csv");
    let per_ts = stats::transactions_per_timestamp(&db).unwrap();
    assert_eq!(export_to_file(&per_ts, &out).unwrap(), 7);

    let pairs = read_exported(&out).unwrap();
    assert_eq!(pairs[0], ("1".to_string(), "2".to_string()));
    assert_eq!(pairs[1], ("2".to_string(), "0".to_string()));

    let freq_out = dir.path().join("itemFrequency.csv");
    let frequencies = stats::item_frequencies(&db);
    export_to_file(&frequencies, &freq_out).unwrap();

    let expected: Vec<(String, String)> = frequencies
        .iter()
        .map(|(item, count)| (item.to_string(), count.to_string()))
        .collect();
    let read_back = read_exported(&freq_out).unwrap();
    assert_eq!(read_back, expected);
    assert_eq!(read_back[0], ("a".to_string(), "5".to_string()));
}
