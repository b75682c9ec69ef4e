//! Traversal queries over a [`TaxonomyGraph`].
//!
//! Provides:
//! - One- and two-hop lookups in both directions (children, grandchildren,
//!   parents, grandparents)
//! - Whole-graph summaries (unique count, roots, extremal child counts)
//! - Simple-path enumeration between two categories
//!
//! Reads never fail: a name that is not in the graph yields an empty result.

use crate::TaxonomyGraph;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Options
// ============================================================================

/// Knobs shared by every store implementation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalOptions {
    /// Collapse repeated names in grandchildren/grandparents results.
    ///
    /// Off by default: a category reachable through two different
    /// intermediate categories is listed twice.
    pub dedupe_two_hop: bool,
    /// Upper bound on hops for `paths_between`; `None` means unbounded.
    pub max_path_hops: Option<usize>,
}

// ============================================================================
// One and two hops
// ============================================================================

fn one_hop(graph: &TaxonomyGraph, name: &str, dir: Direction) -> Vec<String> {
    let Some(idx) = graph.get_index(name) else {
        return Vec::new();
    };
    graph
        .adjacent(idx, dir)
        .into_iter()
        .map(|(_, other)| graph.name_of(other).to_string())
        .collect()
}

/// Two hops in `dir`; the second hop never reuses the first hop's edge.
fn two_hops(graph: &TaxonomyGraph, name: &str, dir: Direction) -> Vec<String> {
    let Some(idx) = graph.get_index(name) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for (first_edge, middle) in graph.adjacent(idx, dir) {
        for (second_edge, far) in graph.adjacent(middle, dir) {
            if second_edge != first_edge {
                out.push(graph.name_of(far).to_string());
            }
        }
    }
    out
}

/// Direct children of `name`.
pub fn children(graph: &TaxonomyGraph, name: &str) -> Vec<String> {
    one_hop(graph, name, Direction::Outgoing)
}

/// Number of direct children of `name`.
pub fn child_count(graph: &TaxonomyGraph, name: &str) -> usize {
    graph
        .get_index(name)
        .map_or(0, |idx| graph.degree(idx, Direction::Outgoing))
}

/// Categories exactly two hops below `name`, one entry per path.
pub fn grandchildren(graph: &TaxonomyGraph, name: &str) -> Vec<String> {
    two_hops(graph, name, Direction::Outgoing)
}

/// Direct parents of `name`.
pub fn parents(graph: &TaxonomyGraph, name: &str) -> Vec<String> {
    one_hop(graph, name, Direction::Incoming)
}

/// Number of direct parents of `name`.
pub fn parent_count(graph: &TaxonomyGraph, name: &str) -> usize {
    graph
        .get_index(name)
        .map_or(0, |idx| graph.degree(idx, Direction::Incoming))
}

/// Categories exactly two hops above `name`, one entry per path.
pub fn grandparents(graph: &TaxonomyGraph, name: &str) -> Vec<String> {
    two_hops(graph, name, Direction::Incoming)
}

/// Remove repeated names, keeping the first occurrence of each.
pub fn dedupe_preserving_order(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

// ============================================================================
// Whole-graph summaries
// ============================================================================

/// Number of distinctly named categories.
pub fn unique_node_count(graph: &TaxonomyGraph) -> usize {
    graph.node_count()
}

/// Every category with no parent, in definition order.
pub fn root_nodes(graph: &TaxonomyGraph) -> Vec<String> {
    graph
        .graph
        .node_indices()
        .filter(|&idx| graph.degree(idx, Direction::Incoming) == 0)
        .map(|idx| graph.name_of(idx).to_string())
        .collect()
}

/// Child counts of every category that has at least one child.
fn parent_child_counts(graph: &TaxonomyGraph) -> Vec<(NodeIndex, usize)> {
    graph
        .graph
        .node_indices()
        .map(|idx| (idx, graph.degree(idx, Direction::Outgoing)))
        .filter(|&(_, count)| count > 0)
        .collect()
}

fn nodes_with_child_count(
    graph: &TaxonomyGraph,
    counts: &[(NodeIndex, usize)],
    target: usize,
) -> Vec<String> {
    counts
        .iter()
        .filter(|&&(_, count)| count == target)
        .map(|&(idx, _)| graph.name_of(idx).to_string())
        .collect()
}

/// All categories sharing the largest child count.
///
/// Categories without children are not candidates; an edgeless graph
/// yields an empty result.
pub fn nodes_with_most_children(graph: &TaxonomyGraph) -> Vec<String> {
    let counts = parent_child_counts(graph);
    match counts.iter().map(|&(_, count)| count).max() {
        Some(max) => nodes_with_child_count(graph, &counts, max),
        None => Vec::new(),
    }
}

/// All categories sharing the smallest positive child count.
pub fn nodes_with_least_children(graph: &TaxonomyGraph) -> Vec<String> {
    let counts = parent_child_counts(graph);
    match counts.iter().map(|&(_, count)| count).min() {
        Some(min) => nodes_with_child_count(graph, &counts, min),
        None => Vec::new(),
    }
}

// ============================================================================
// Paths
// ============================================================================

/// Every simple directed path from `start` to `end`.
///
/// Paths have at least one hop, so `start == end` yields nothing. With
/// `max_hops` set, longer paths are not explored.
pub fn paths_between(
    graph: &TaxonomyGraph,
    start: &str,
    end: &str,
    max_hops: Option<usize>,
) -> Vec<Vec<String>> {
    let (Some(from), Some(to)) = (graph.get_index(start), graph.get_index(end)) else {
        return Vec::new();
    };
    if from == to {
        return Vec::new();
    }

    let limit = max_hops.unwrap_or(usize::MAX);
    let successors = |idx: NodeIndex| {
        graph
            .adjacent(idx, Direction::Outgoing)
            .into_iter()
            .map(|(_, next)| next)
            .collect::<Vec<_>>()
            .into_iter()
    };

    let mut found: Vec<Vec<String>> = Vec::new();
    let mut path: Vec<NodeIndex> = vec![from];
    let mut on_path: HashSet<NodeIndex> = HashSet::from([from]);
    let mut stack = vec![successors(from)];

    // path.len() nodes means path.len() - 1 hops so far
    while let Some(frontier) = stack.last_mut() {
        match frontier.next() {
            Some(next) if next == to => {
                if path.len() <= limit {
                    let mut names: Vec<String> =
                        path.iter().map(|&idx| graph.name_of(idx).to_string()).collect();
                    names.push(graph.name_of(to).to_string());
                    found.push(names);
                }
            }
            Some(next) => {
                if path.len() < limit && on_path.insert(next) {
                    path.push(next);
                    stack.push(successors(next));
                }
            }
            None => {
                stack.pop();
                if let Some(done) = path.pop() {
                    on_path.remove(&done);
                }
            }
        }
    }

    log::debug!(
        "paths_between({start}, {end}): {} path(s), max_hops={max_hops:?}",
        found.len()
    );
    found
}

// ============================================================================
// Tests
// ============================================================================
