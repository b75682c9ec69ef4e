//! Opening the configured store.

use crate::commands::Goal;
use crate::config::{BackendKind, TaxoConfig};
use std::sync::Arc;
use taxo_core::{Error, Result};
use taxo_graph::{MemoryStore, TaxonomyStore};
use taxo_neo4j::Neo4jStore;

/// Connect to (or load) the store selected by `config.backend`.
pub async fn open_store(config: &TaxoConfig) -> Result<Arc<dyn TaxonomyStore>> {
    let options = config.query.traversal_options();
    match config.backend {
        BackendKind::Neo4j => {
            let store = Neo4jStore::connect(&config.neo4j, options).await?;
            Ok(Arc::new(store))
        }
        BackendKind::Memory => {
            let path = config.memory.edges_csv.as_ref().ok_or_else(|| {
                Error::config("memory backend needs an edge list: set memory.edges_csv or --edges")
            })?;
            let (store, stats) = MemoryStore::from_csv(path, options)?;
            tracing::info!(
                rows = stats.rows_read,
                nodes = stats.nodes_created,
                edges = stats.edges_created,
                deduped = stats.deduped_edges,
                "Loaded taxonomy from {}",
                path.display()
            );
            if !stats.skipped_rows.is_empty() {
                tracing::warn!(
                    "Skipped {} row(s) with a blank category: {:?}",
                    stats.skipped_rows.len(),
                    stats.skipped_rows
                );
            }
            Ok(Arc::new(store))
        }
    }
}

/// Refuse a one-shot goal whose effect would not outlive the process.
///
/// A rename on the memory backend only touches the graph loaded for this
/// run, so under `run` it is rejected; `interactive` keeps the graph for
/// the whole session and allows it.
pub fn check_one_shot(goal: &Goal, config: &TaxoConfig) -> Result<()> {
    if config.backend == BackendKind::Memory && matches!(goal, Goal::Rename { .. }) {
        return Err(Error::InvalidCommand(
            "goal 11 on the memory backend is not saved; rename within `taxo interactive`"
                .to_string(),
        ));
    }
    Ok(())
}

/// Connect to Neo4j directly; maintenance commands need the concrete store.
pub async fn open_neo4j(config: &TaxoConfig) -> Result<Neo4jStore> {
    if config.backend != BackendKind::Neo4j {
        return Err(Error::config(format!(
            "this command needs the neo4j backend, but backend is '{}'",
            config.backend.as_str()
        )));
    }
    Neo4jStore::connect(&config.neo4j, config.query.traversal_options()).await
}
