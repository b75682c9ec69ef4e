//! The taxonomy query contract and its in-memory implementation.
//!
//! [`TaxonomyStore`] is the seam between the CLI and a backing store. Every
//! read is an independent, idempotent unit of work; `rename_node` is the only
//! write. [`MemoryStore`] serves the contract from a [`TaxonomyGraph`] held
//! behind a read/write lock, so a rename is never observed half-applied.

use crate::algorithms::{self, TraversalOptions, dedupe_preserving_order};
use crate::loader::{LoadStats, load_edges_csv};
use crate::TaxonomyGraph;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use taxo_core::Result;
use tokio::sync::RwLock;

/// A simple path, listed from start to end.
pub type CategoryPath = Vec<String>;

/// Operations every taxonomy backend provides.
///
/// Reads of a category that does not exist return an empty sequence (or
/// zero) rather than failing.
#[async_trait]
pub trait TaxonomyStore: Send + Sync {
    /// Short backend name for logs (e.g. "memory", "neo4j").
    fn backend(&self) -> &'static str;

    /// Direct children of `name`.
    async fn children(&self, name: &str) -> Result<Vec<String>>;

    /// Number of direct children of `name`.
    async fn child_count(&self, name: &str) -> Result<u64>;

    /// Categories two hops below `name`.
    async fn grandchildren(&self, name: &str) -> Result<Vec<String>>;

    /// Direct parents of `name`.
    async fn parents(&self, name: &str) -> Result<Vec<String>>;

    /// Number of direct parents of `name`.
    async fn parent_count(&self, name: &str) -> Result<u64>;

    /// Categories two hops above `name`.
    async fn grandparents(&self, name: &str) -> Result<Vec<String>>;

    /// Number of distinctly named categories.
    async fn unique_node_count(&self) -> Result<u64>;

    /// Categories without a parent. There may be more than one.
    async fn root_nodes(&self) -> Result<Vec<String>>;

    /// Every category sharing the largest child count.
    async fn nodes_with_most_children(&self) -> Result<Vec<String>>;

    /// Every category sharing the smallest positive child count.
    async fn nodes_with_least_children(&self) -> Result<Vec<String>>;

    /// Rename a category, returning the new name.
    ///
    /// Fails with `NotFound` if `old_name` is absent and `DuplicateName` if
    /// `new_name` is already taken by another category.
    async fn rename_node(&self, old_name: &str, new_name: &str) -> Result<String>;

    /// All simple directed paths from `start` to `end`.
    async fn paths_between(&self, start: &str, end: &str) -> Result<Vec<CategoryPath>>;
}

// ============================================================================
// MemoryStore
// ============================================================================

/// [`TaxonomyStore`] over an in-process [`TaxonomyGraph`].
#[derive(Clone, Debug)]
pub struct MemoryStore {
    graph: Arc<RwLock<TaxonomyGraph>>,
    options: TraversalOptions,
}

impl MemoryStore {
    /// Wrap an already built graph.
    pub fn new(graph: TaxonomyGraph, options: TraversalOptions) -> Self {
        Self {
            graph: Arc::new(RwLock::new(graph)),
            options,
        }
    }

    /// Load the graph from an edge-list CSV.
    pub fn from_csv(path: impl AsRef<Path>, options: TraversalOptions) -> Result<(Self, LoadStats)> {
        let (graph, stats) = load_edges_csv(path)?;
        Ok((Self::new(graph, options), stats))
    }

    /// Shared handle to the underlying graph.
    pub fn graph(&self) -> Arc<RwLock<TaxonomyGraph>> {
        Arc::clone(&self.graph)
    }

    fn two_hop(&self, names: Vec<String>) -> Vec<String> {
        if self.options.dedupe_two_hop {
            dedupe_preserving_order(names)
        } else {
            names
        }
    }
}

#[async_trait]
impl TaxonomyStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn children(&self, name: &str) -> Result<Vec<String>> {
        Ok(algorithms::children(&*self.graph.read().await, name))
    }

    async fn child_count(&self, name: &str) -> Result<u64> {
        Ok(algorithms::child_count(&*self.graph.read().await, name) as u64)
    }

    async fn grandchildren(&self, name: &str) -> Result<Vec<String>> {
        let names = algorithms::grandchildren(&*self.graph.read().await, name);
        Ok(self.two_hop(names))
    }

    async fn parents(&self, name: &str) -> Result<Vec<String>> {
        Ok(algorithms::parents(&*self.graph.read().await, name))
    }

    async fn parent_count(&self, name: &str) -> Result<u64> {
        Ok(algorithms::parent_count(&*self.graph.read().await, name) as u64)
    }

    async fn grandparents(&self, name: &str) -> Result<Vec<String>> {
        let names = algorithms::grandparents(&*self.graph.read().await, name);
        Ok(self.two_hop(names))
    }

    async fn unique_node_count(&self) -> Result<u64> {
        Ok(algorithms::unique_node_count(&*self.graph.read().await) as u64)
    }

    async fn root_nodes(&self) -> Result<Vec<String>> {
        Ok(algorithms::root_nodes(&*self.graph.read().await))
    }

    async fn nodes_with_most_children(&self) -> Result<Vec<String>> {
        Ok(algorithms::nodes_with_most_children(&*self.graph.read().await))
    }

    async fn nodes_with_least_children(&self) -> Result<Vec<String>> {
        Ok(algorithms::nodes_with_least_children(&*self.graph.read().await))
    }

    async fn rename_node(&self, old_name: &str, new_name: &str) -> Result<String> {
        self.graph.write().await.rename(old_name, new_name)?;
        log::info!("Renamed category '{old_name}' to '{new_name}'");
        Ok(new_name.to_string())
    }

    async fn paths_between(&self, start: &str, end: &str) -> Result<Vec<CategoryPath>> {
        let graph = self.graph.read().await;
        Ok(algorithms::paths_between(
            &graph,
            start,
            end,
            self.options.max_path_hops,
        ))
    }
}
