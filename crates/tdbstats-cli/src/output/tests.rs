// Tests for output formatting
//
// Distributions come from a small database loaded through the public
// ingestion API.

use super::*;
use std::cell::RefCell;
use std::rc::Rc;
use tdbstats_core::ingest::from_reader;
use tdbstats_core::{stats, LoadOptions, TemporalDatabase};

/// Write sink whose contents can be inspected after the writer is done
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

fn sample_db() -> TemporalDatabase {
    from_reader(
        "1\ta\td\te\n1\tb\ta\tf\tg\th\n3\tb\ta\td\tf\n".as_bytes(),
        &LoadOptions::default(),
    )
    .unwrap()
}

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let out = OutputWriter::with_writer(format, false, quiet, Box::new(buffer.clone()));
    (out, buffer)
}

#[test]
fn test_render_table_alignment() {
    let table = render_table(
        &["Item", "Count"],
        vec![
            vec!["a".to_string(), "3".to_string()],
            vec!["long".to_string(), "12".to_string()],
        ],
    );
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], "Item │ Count");
    assert_eq!(lines[1], "─────┼──────");
    assert_eq!(lines[2], "a    │ 3");
    assert_eq!(lines[3], "long │ 12");
}

#[test]
fn test_summary_human() {
    let summary = DatabaseSummary::compute(&sample_db()).unwrap();
    let formatted = OutputFormat::Human.format_summary(&summary).unwrap();
    assert!(formatted.contains("Database size"));
    assert!(formatted.contains("Average transaction size"));
    assert!(formatted.lines().count() == 14);
}

#[test]
fn test_summary_json() {
    let summary = DatabaseSummary::compute(&sample_db()).unwrap();
    let formatted = OutputFormat::Json.format_summary(&summary).unwrap();
    let value: serde_json::Value = serde_json::from_str(&formatted).unwrap();
    assert_eq!(value["database_size"], 3);
    assert_eq!(value["max_transaction_length"], 5);
}

#[test]
fn test_distribution_json_keeps_order() {
    let freq = stats::item_frequencies(&sample_db());
    let formatted = OutputFormat::Json
        .format_distribution(["Item", "Frequency"], &freq)
        .unwrap();
    assert_eq!(formatted, r#"{"a":3,"d":2,"b":2,"f":2,"e":1,"g":1,"h":1}"#);
}

#[test]
fn test_distribution_yaml() {
    let lengths = stats::transaction_length_distribution(&sample_db());
    let formatted = OutputFormat::Yaml
        .format_distribution(["Length", "Transactions"], &lengths)
        .unwrap();
    assert!(formatted.contains("3: 1"));
    assert!(formatted.contains("5: 1"));
}

#[test]
fn test_writer_human_distribution() {
    let (mut out, buffer) = writer(OutputFormat::Human, false);
    let per_ts = stats::transactions_per_timestamp(&sample_db()).unwrap();
    out.distribution(["Timestamp", "Transactions"], &per_ts).unwrap();

    let text = buffer.contents();
    assert!(text.starts_with("Timestamp │ Transactions"));
    assert!(text.contains("2         │ 0"));
    assert!(text.ends_with('\n'));
}

#[test]
fn test_quiet_suppresses_messages_but_not_results() {
    let (mut out, buffer) = writer(OutputFormat::Human, true);
    out.info("loading").unwrap();
    out.section("Summary").unwrap();
    out.success("done").unwrap();
    assert!(buffer.contents().is_empty());

    let summary = DatabaseSummary::compute(&sample_db()).unwrap();
    out.summary(&summary).unwrap();
    assert!(buffer.contents().contains("Database size"));
}

#[test]
fn test_machine_formats_skip_messages() {
    let (mut out, buffer) = writer(OutputFormat::Json, false);
    out.info("loading").unwrap();
    out.section("Summary").unwrap();
    assert!(buffer.contents().is_empty());
    assert!(out.spinner("loading").is_none());
}
