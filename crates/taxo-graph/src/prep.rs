//! Offline CSV preparation ahead of a bulk load.
//!
//! - [`extract_categories`] turns an edge list into the one-column node file
//!   a graph database importer expects.
//! - [`strip_quotes`] removes stray double-quote characters left in category
//!   names by upstream exports.

use crate::loader::{locate_columns, open};
use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use taxo_core::{Error, Result};

/// Header written by [`extract_categories`].
pub const NODE_COLUMN: &str = "category";

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| Error::io_with_path(e, path))
}

fn csv_err(e: csv::Error) -> Error {
    Error::csv(e.to_string())
}

/// Write every distinct category of an edge list, one per row, in
/// first-seen order. Returns the number of categories written.
pub fn write_categories<R: Read, W: Write>(input: R, output: W) -> Result<usize> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().map_err(csv_err)?.clone();
    let (parent_col, child_col) = locate_columns(&headers)?;

    let mut writer = csv::Writer::from_writer(output);
    writer.write_record([NODE_COLUMN]).map_err(csv_err)?;

    let mut seen: HashSet<String> = HashSet::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        for col in [parent_col, child_col] {
            let Some(name) = record.get(col) else {
                continue;
            };
            if seen.insert(name.to_string()) {
                writer.write_record([name]).map_err(csv_err)?;
            }
        }
    }
    writer.flush()?;
    Ok(seen.len())
}

/// Copy a CSV, removing every `"` character from every cell.
/// Returns the number of rows written.
pub fn write_without_quotes<R: Read, W: Write>(input: R, output: W) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(output);

    let mut rows = 0;
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let cleaned: Vec<String> = record.iter().map(|cell| cell.replace('"', "")).collect();
        writer.write_record(&cleaned).map_err(csv_err)?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

/// File-to-file form of [`write_categories`].
pub fn extract_categories(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<usize> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let count = write_categories(open(input)?, create(output)?)?;
    log::info!(
        "Wrote {count} categories from {} to {}",
        input.display(),
        output.display()
    );
    Ok(count)
}

/// File-to-file form of [`write_without_quotes`].
pub fn strip_quotes(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<usize> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let rows = write_without_quotes(open(input)?, create(output)?)?;
    log::info!(
        "Stripped quotes from {rows} rows of {} into {}",
        input.display(),
        output.display()
    );
    Ok(rows)
}
