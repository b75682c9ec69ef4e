//! Core graph types for taxonomies.
//!
//! A taxonomy is a directed graph of uniquely named categories connected by a
//! single parent → child relation. Multiple parents per category are allowed
//! and cycles may occur in loaded data.

use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use taxo_core::{Error, Result};

/// Error kind label used for category lookups.
pub(crate) const CATEGORY: &str = "category";

// ============================================================================
// Category / IsParentOf
// ============================================================================

/// A node in the taxonomy graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Unique name (e.g. "1880s_films").
    pub name: String,
}

impl Category {
    /// Creates a category with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Marker weight for the parent → child relation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IsParentOf;

// ============================================================================
// TaxonomyGraph
// ============================================================================

/// Core taxonomy graph.
///
/// Wraps a petgraph `DiGraph` with a name → index lookup table. Node indices
/// follow insertion order, which is the order ties are reported in.
#[derive(Clone, Debug, Default)]
pub struct TaxonomyGraph {
    pub(crate) graph: DiGraph<Category, IsParentOf>,
    pub(crate) node_indices: HashMap<String, NodeIndex>,
}

impl TaxonomyGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of categories.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of parent → child edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks if a category exists.
    pub fn contains(&self, name: &str) -> bool {
        self.node_indices.contains_key(name)
    }

    /// Gets the petgraph NodeIndex for a category name.
    pub fn get_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_indices.get(name).copied()
    }

    /// Gets the name stored at an index, or `None` if this graph has no
    /// such node.
    pub fn name_at(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|c| c.name.as_str())
    }

    /// Name at an index taken from this graph.
    pub(crate) fn name_of(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].name
    }

    /// Returns category names in definition order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|idx| self.name_of(idx))
    }

    /// Add a category, returning its index.
    ///
    /// If a category with the same name already exists, returns its existing
    /// index.
    pub fn add_category(&mut self, name: impl Into<String>) -> NodeIndex {
        let name = name.into();
        if let Some(&existing_idx) = self.node_indices.get(&name) {
            return existing_idx;
        }
        let idx = self.graph.add_node(Category::new(name.clone()));
        self.node_indices.insert(name, idx);
        idx
    }

    /// Add a parent → child edge between two existing categories.
    ///
    /// Returns `Ok(false)` if the edge already existed (nothing added).
    pub fn add_edge(&mut self, parent: &str, child: &str) -> Result<bool> {
        let from_idx = self
            .get_index(parent)
            .ok_or_else(|| Error::not_found(CATEGORY, parent))?;
        let to_idx = self
            .get_index(child)
            .ok_or_else(|| Error::not_found(CATEGORY, child))?;

        if self.graph.find_edge(from_idx, to_idx).is_some() {
            return Ok(false);
        }
        self.graph.add_edge(from_idx, to_idx, IsParentOf);
        Ok(true)
    }

    /// Rename a category in place.
    ///
    /// Edges are untouched. Renaming a category to its current name is a
    /// no-op.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        let idx = self
            .get_index(old_name)
            .ok_or_else(|| Error::not_found(CATEGORY, old_name))?;
        if new_name.trim().is_empty() {
            return Err(Error::InvalidArguments(
                "new category name must not be blank".to_string(),
            ));
        }
        if old_name == new_name {
            return Ok(());
        }
        if self.node_indices.contains_key(new_name) {
            return Err(Error::duplicate(CATEGORY, new_name));
        }

        self.node_indices.remove(old_name);
        self.graph[idx].name = new_name.to_string();
        self.node_indices.insert(new_name.to_string(), idx);
        Ok(())
    }

    /// Neighbours of `idx` in edge insertion order, with the connecting edge.
    pub(crate) fn adjacent(&self, idx: NodeIndex, dir: Direction) -> Vec<(EdgeIndex, NodeIndex)> {
        // petgraph walks an adjacency list newest-first
        let mut out: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(idx, dir)
            .map(|e| {
                let other = match dir {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (e.id(), other)
            })
            .collect();
        out.reverse();
        out
    }

    /// Number of edges touching `idx` in the given direction.
    pub(crate) fn degree(&self, idx: NodeIndex, dir: Direction) -> usize {
        self.graph.edges_directed(idx, dir).count()
    }
}

// ============================================================================
// Tests
// ============================================================================
