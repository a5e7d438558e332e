//! Plain-text export of statistic mappings
//!
//! Output format: one `key<TAB>value` pair per line, no header, written in
//! the iteration order of the mapping.

use crate::distribution::Distribution;
use crate::error::{Error, Result};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Write `(key, value)` pairs to `path`, one `key\tvalue` line each.
/// Returns the number of lines written.
pub fn export_pairs<K, V, I>(pairs: I, path: &Path) -> Result<usize>
where
    K: Display,
    V: Display,
    I: IntoIterator<Item = (K, V)>,
{
    let write_error = |e| Error::io(format!("failed to write {}", path.display()), e);

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    let mut lines = 0usize;
    for (key, value) in pairs {
        writeln!(writer, "{}\t{}", key, value).map_err(write_error)?;
        lines += 1;
    }
    writer.flush().map_err(write_error)?;

    debug!(path = %path.display(), lines, "Exported mapping");
    Ok(lines)
}

/// Write a [`Distribution`] to `path` in its own order
pub fn export_to_file<K: Display>(distribution: &Distribution<K>, path: &Path) -> Result<usize> {
    export_pairs(distribution.iter(), path)
}

/// Read back a file written by [`export_to_file`] as string pairs.
/// Lines without a tab are returned with an empty value.
pub fn read_exported(path: &Path) -> Result<Vec<(String, String)>> {
    let file = File::open(path).map_err(|source| Error::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    BufReader::new(file)
        .lines()
        .map(|line| {
            let line = line.map_err(|e| Error::io(format!("failed to read {}", path.display()), e))?;
            let (key, value) = line.split_once('\t').unwrap_or((line.as_str(), ""));
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}
