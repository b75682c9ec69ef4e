//! Property tests for the traversal queries.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};
use taxo_graph::*;

/// Edge lists over a small name pool so collisions, fan-in and cycles occur.
fn edge_list() -> impl Strategy<Value = Vec<(u8, u8)>> {
    prop::collection::vec((0u8..12, 0u8..12), 0..40)
}

fn build(edges: &[(u8, u8)]) -> TaxonomyGraph {
    let mut graph = TaxonomyGraph::new();
    for (p, c) in edges {
        let (p, c) = (format!("n{p}"), format!("n{c}"));
        graph.add_category(p.clone());
        graph.add_category(c.clone());
        graph.add_edge(&p, &c).unwrap();
    }
    graph
}

fn names(graph: &TaxonomyGraph) -> Vec<String> {
    graph.category_names().map(String::from).collect()
}

proptest! {
    #[test]
    fn prop_counts_match_lists(edges in edge_list()) {
        let graph = build(&edges);
        for name in names(&graph) {
            prop_assert_eq!(child_count(&graph, &name), children(&graph, &name).len());
            prop_assert_eq!(parent_count(&graph, &name), parents(&graph, &name).len());
        }
    }

    #[test]
    fn prop_unique_count_is_distinct_names(edges in edge_list()) {
        let graph = build(&edges);
        let distinct: HashSet<u8> = edges.iter().flat_map(|&(p, c)| [p, c]).collect();
        prop_assert_eq!(unique_node_count(&graph), distinct.len());
    }

    #[test]
    fn prop_roots_are_exactly_in_degree_zero(edges in edge_list()) {
        let graph = build(&edges);
        let with_parent: HashSet<String> = edges.iter().map(|&(_, c)| format!("n{c}")).collect();
        let expected: BTreeSet<String> = names(&graph)
            .into_iter()
            .filter(|n| !with_parent.contains(n))
            .collect();
        let roots: BTreeSet<String> = root_nodes(&graph).into_iter().collect();
        prop_assert_eq!(roots, expected);
    }

    #[test]
    fn prop_most_children_is_complete(edges in edge_list()) {
        let graph = build(&edges);
        let most = nodes_with_most_children(&graph);
        let max = names(&graph).iter().map(|n| child_count(&graph, n)).max().unwrap_or(0);

        prop_assert_eq!(most.is_empty(), graph.edge_count() == 0);
        for name in &most {
            prop_assert_eq!(child_count(&graph, name), max);
        }
        let expected = names(&graph)
            .into_iter()
            .filter(|n| max > 0 && child_count(&graph, n) == max)
            .count();
        prop_assert_eq!(most.len(), expected);
    }

    #[test]
    fn prop_least_children_is_min_positive(edges in edge_list()) {
        let graph = build(&edges);
        let least = nodes_with_least_children(&graph);
        let min = names(&graph)
            .iter()
            .map(|n| child_count(&graph, n))
            .filter(|&c| c > 0)
            .min();
        match min {
            None => prop_assert!(least.is_empty()),
            Some(min) => {
                prop_assert!(!least.is_empty());
                for name in &least {
                    prop_assert_eq!(child_count(&graph, name), min);
                }
            }
        }
    }

    #[test]
    fn prop_rename_preserves_children(edges in edge_list(), pick in 0usize..12) {
        let mut graph = build(&edges);
        let all = names(&graph);
        prop_assume!(!all.is_empty());
        let old = all[pick % all.len()].clone();
        let before: BTreeSet<String> = children(&graph, &old).into_iter().collect();

        graph.rename(&old, "renamed").unwrap();

        let after: BTreeSet<String> = children(&graph, "renamed")
            .into_iter()
            .collect();
        // A self-loop now points at the new name
        let expected: BTreeSet<String> = before
            .into_iter()
            .map(|c| if c == old { "renamed".to_string() } else { c })
            .collect();
        prop_assert_eq!(after, expected);
        prop_assert!(children(&graph, &old).is_empty());
    }

    #[test]
    fn prop_paths_are_simple_and_connected(edges in prop::collection::vec((0u8..7, 0u8..7), 0..15)) {
        let graph = build(&edges);
        let all = names(&graph);
        prop_assume!(all.len() >= 2);
        let (start, end) = (&all[0], &all[all.len() - 1]);

        for path in paths_between(&graph, start, end, None) {
            prop_assert_eq!(path.first(), Some(start));
            prop_assert_eq!(path.last(), Some(end));
            let unique: HashSet<&String> = path.iter().collect();
            prop_assert_eq!(unique.len(), path.len());
            for pair in path.windows(2) {
                prop_assert!(children(&graph, &pair[0]).contains(&pair[1]));
            }
        }
    }
}
