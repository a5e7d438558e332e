//! Print the summary and the ten most frequent items of a database
//!
//! ```text
//! cargo run -p tdbstats-core --example summarize -- temporal_T10I4D100K.csv
//! ```

use tdbstats_core::{ingest, stats, DatabaseSummary, LoadOptions, Source};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = std::env::args()
        .nth(1)
        .ok_or("usage: summarize <file-or-url>")?;

    let db = ingest::load(&Source::detect(&input), &LoadOptions::default())?;

    for (label, value) in DatabaseSummary::compute(&db)?.rows() {
        println!("{:<36} {}", label, value);
    }

    println!();
    for (item, count) in stats::item_frequencies(&db).top(10).iter() {
        println!("{:<12} {}", item, count);
    }
    Ok(())
}
