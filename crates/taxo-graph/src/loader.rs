//! Bulk loading of a taxonomy from an edge-list CSV.
//!
//! The input has a header row containing at least `parent_category` and
//! `child_category`; any other columns are ignored. Loading is two-phase:
//!
//! 1. Read every row and register both categories (first-seen order)
//! 2. Add the parent → child edges, collapsing duplicates
//!
//! Rows with a blank category name are skipped and reported in
//! [`LoadStats::skipped_rows`] instead of failing the whole load.

use crate::TaxonomyGraph;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use taxo_core::{Error, Result, clean_name};

/// Header of the parent column.
pub const PARENT_COLUMN: &str = "parent_category";
/// Header of the child column.
pub const CHILD_COLUMN: &str = "child_category";

/// Statistics from a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows read (header excluded).
    pub rows_read: usize,
    /// Distinct categories created.
    pub nodes_created: usize,
    /// Distinct edges created.
    pub edges_created: usize,
    /// Rows repeating an edge that was already present.
    pub deduped_edges: usize,
    /// 1-based data row numbers skipped for a blank category.
    pub skipped_rows: Vec<usize>,
}

/// Positions of the parent and child columns in a header record.
pub(crate) fn locate_columns(headers: &csv::StringRecord) -> Result<(usize, usize)> {
    let find = |column: &str| {
        headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| Error::csv(format!("missing required column '{column}'")))
    };
    Ok((find(PARENT_COLUMN)?, find(CHILD_COLUMN)?))
}

pub(crate) fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::io_with_path(e, path))
}

/// Load a taxonomy from a CSV file on disk.
pub fn load_edges_csv(path: impl AsRef<Path>) -> Result<(TaxonomyGraph, LoadStats)> {
    let path = path.as_ref();
    let (graph, stats) = load_edges_from_reader(open(path)?)?;
    log::info!(
        "Loaded {} categories and {} edges from {} ({} duplicate rows, {} skipped)",
        stats.nodes_created,
        stats.edges_created,
        path.display(),
        stats.deduped_edges,
        stats.skipped_rows.len()
    );
    Ok((graph, stats))
}

/// Load a taxonomy from any CSV source.
pub fn load_edges_from_reader<R: Read>(reader: R) -> Result<(TaxonomyGraph, LoadStats)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|e| Error::csv(e.to_string()))?
        .clone();
    let (parent_col, child_col) = locate_columns(&headers)?;

    let mut stats = LoadStats::default();
    let mut graph = TaxonomyGraph::new();
    let mut pending_edges: Vec<(String, String)> = Vec::new();

    // ================================================================
    // Phase 1: Register all categories
    // ================================================================
    for record in csv_reader.records() {
        let record = record.map_err(|e| Error::csv(e.to_string()))?;
        stats.rows_read += 1;

        let parent = record.get(parent_col).and_then(clean_name);
        let child = record.get(child_col).and_then(clean_name);
        let (Some(parent), Some(child)) = (parent, child) else {
            log::warn!("Skipping row {}: blank category name", stats.rows_read);
            stats.skipped_rows.push(stats.rows_read);
            continue;
        };

        for name in [parent, child] {
            if !graph.contains(name) {
                graph.add_category(name);
                stats.nodes_created += 1;
            }
        }
        pending_edges.push((parent.to_string(), child.to_string()));
    }

    // ================================================================
    // Phase 2: Add edges
    // ================================================================
    for (parent, child) in &pending_edges {
        if graph.add_edge(parent, child)? {
            stats.edges_created += 1;
        } else {
            stats.deduped_edges += 1;
        }
    }

    Ok((graph, stats))
}
