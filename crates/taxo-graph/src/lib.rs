//! Taxonomy graph infrastructure for taxo.
//!
//! This crate provides:
//! - [`TaxonomyGraph`]: uniquely named categories joined by a parent → child
//!   relation, backed by petgraph
//! - [`algorithms`]: children/parents, two-hop lookups, roots, extremal child
//!   counts and simple-path enumeration
//! - [`loader`]: building a graph from an edge-list CSV
//! - [`prep`]: offline CSV preparation for database bulk imports
//! - [`TaxonomyStore`]: the query contract shared by every backend, and
//!   [`MemoryStore`], its in-process implementation
//!
//! # Example
//!
//! ```rust
//! use taxo_graph::{TaxonomyGraph, children, root_nodes};
//!
//! let mut graph = TaxonomyGraph::new();
//! graph.add_category("Root");
//! graph.add_category("A");
//! graph.add_edge("Root", "A").unwrap();
//!
//! assert_eq!(children(&graph, "Root"), vec!["A"]);
//! assert_eq!(root_nodes(&graph), vec!["Root"]);
//! ```

pub mod algorithms;
pub mod loader;
pub mod prep;
pub mod store;
pub mod types;

pub use algorithms::{
    TraversalOptions, child_count, children, dedupe_preserving_order, grandchildren,
    grandparents, nodes_with_least_children, nodes_with_most_children, parent_count, parents,
    paths_between, root_nodes, unique_node_count,
};
pub use loader::{LoadStats, load_edges_csv, load_edges_from_reader};
pub use store::{CategoryPath, MemoryStore, TaxonomyStore};
pub use types::{Category, IsParentOf, TaxonomyGraph};
