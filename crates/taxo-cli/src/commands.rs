//! Goal numbers: parsing, execution against a store, and output formatting.

use std::future::Future;
use std::io::Write;
use std::time::{Duration, Instant};
use taxo_core::Error;
use taxo_graph::{CategoryPath, TaxonomyStore};

/// Menu shown by interactive mode.
pub const MENU: &str = "\
COMMANDS:
1. Finds all children of a given node
2. Counts all children of a given node
3. Finds all grandchildren of a given node
4. Finds all parents of a given node
5. Counts all parents of a given node
6. Finds all grandparents of a given node
7. Counts how many uniquely named nodes there are
8. Finds a root node, one which is not a subcategory of any other node
9. Finds nodes with the most children
10. Finds nodes with the least children
11. Renames a given node
12. Finds all paths between two nodes
0. Exit";

/// A parsed goal with its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Goal {
    /// 1: direct children.
    Children(String),
    /// 2: number of direct children.
    ChildCount(String),
    /// 3: categories two levels down.
    Grandchildren(String),
    /// 4: direct parents.
    Parents(String),
    /// 5: number of direct parents.
    ParentCount(String),
    /// 6: categories two levels up.
    Grandparents(String),
    /// 7: distinct category names.
    UniqueNodeCount,
    /// 8: categories without a parent.
    RootNodes,
    /// 9: categories with the largest child count.
    MostChildren,
    /// 10: categories with the smallest positive child count.
    LeastChildren,
    /// 11: rename a category.
    Rename {
        /// Current name.
        old_name: String,
        /// Replacement name.
        new_name: String,
    },
    /// 12: simple paths from `start` down to `end`.
    Paths {
        /// First category of every path.
        start: String,
        /// Last category of every path.
        end: String,
    },
}

/// Parse a goal selector (`"1"` through `"12"`).
pub fn parse_selector(selector: &str) -> taxo_core::Result<u8> {
    let trimmed = selector.trim();
    match trimmed.parse::<u8>() {
        Ok(n @ 1..=12) => Ok(n),
        _ => Err(Error::InvalidCommand(trimmed.to_string())),
    }
}

/// Prompts for the arguments a goal needs, in order.
pub fn prompts(number: u8) -> &'static [&'static str] {
    match number {
        1..=6 => &["Enter the node name: "],
        11 => &["Enter the node's old name: ", "Enter the node's new name: "],
        12 => &["Enter the start node: ", "Enter the end node: "],
        _ => &[],
    }
}

/// Names are passed through as typed; stored names may carry spaces.
fn required_name(raw: &str, what: &str) -> taxo_core::Result<String> {
    if raw.trim().is_empty() {
        return Err(Error::InvalidArguments(format!("{what} must not be blank")));
    }
    Ok(raw.to_string())
}

impl Goal {
    /// Build a goal from its selector and positional arguments.
    ///
    /// An unknown selector is `InvalidCommand`; a wrong number of arguments
    /// or a blank name is `InvalidArguments`.
    pub fn parse(selector: &str, args: &[String]) -> taxo_core::Result<Self> {
        let number = parse_selector(selector)?;
        let expected = prompts(number).len();
        if args.len() != expected {
            return Err(Error::InvalidArguments(format!(
                "goal {number} takes {expected} argument(s), got {}",
                args.len()
            )));
        }

        let name = |i: usize, what: &str| required_name(&args[i], what);
        Ok(match number {
            1 => Goal::Children(name(0, "node name")?),
            2 => Goal::ChildCount(name(0, "node name")?),
            3 => Goal::Grandchildren(name(0, "node name")?),
            4 => Goal::Parents(name(0, "node name")?),
            5 => Goal::ParentCount(name(0, "node name")?),
            6 => Goal::Grandparents(name(0, "node name")?),
            7 => Goal::UniqueNodeCount,
            8 => Goal::RootNodes,
            9 => Goal::MostChildren,
            10 => Goal::LeastChildren,
            11 => Goal::Rename {
                old_name: name(0, "old name")?,
                new_name: name(1, "new name")?,
            },
            12 => Goal::Paths {
                start: name(0, "start node")?,
                end: name(1, "end node")?,
            },
            other => return Err(Error::InvalidCommand(other.to_string())),
        })
    }

    /// The goal's selector number.
    pub fn number(&self) -> u8 {
        match self {
            Goal::Children(_) => 1,
            Goal::ChildCount(_) => 2,
            Goal::Grandchildren(_) => 3,
            Goal::Parents(_) => 4,
            Goal::ParentCount(_) => 5,
            Goal::Grandparents(_) => 6,
            Goal::UniqueNodeCount => 7,
            Goal::RootNodes => 8,
            Goal::MostChildren => 9,
            Goal::LeastChildren => 10,
            Goal::Rename { .. } => 11,
            Goal::Paths { .. } => 12,
        }
    }

    /// Run the goal and return its result line.
    pub async fn execute(&self, store: &dyn TaxonomyStore) -> taxo_core::Result<String> {
        tracing::debug!(goal = self.number(), backend = store.backend(), "Executing goal");
        let line = match self {
            Goal::Children(n) => {
                format!("Children of node {n}: {}", format_list(&store.children(n).await?))
            }
            Goal::ChildCount(n) => {
                format!("Number of children of node {n}: {}", store.child_count(n).await?)
            }
            Goal::Grandchildren(n) => format!(
                "Grandchildren of node {n}: {}",
                format_list(&store.grandchildren(n).await?)
            ),
            Goal::Parents(n) => {
                format!("Parents of node {n}: {}", format_list(&store.parents(n).await?))
            }
            Goal::ParentCount(n) => {
                format!("Number of parents of node {n}: {}", store.parent_count(n).await?)
            }
            Goal::Grandparents(n) => format!(
                "Grandparents of node {n}: {}",
                format_list(&store.grandparents(n).await?)
            ),
            Goal::UniqueNodeCount => format!(
                "Number of uniquely named nodes: {}",
                store.unique_node_count().await?
            ),
            Goal::RootNodes => format_roots(&store.root_nodes().await?),
            Goal::MostChildren => format!(
                "Nodes with the most children: {}",
                format_list(&store.nodes_with_most_children().await?)
            ),
            Goal::LeastChildren => format!(
                "Nodes with the least children: {}",
                format_list(&store.nodes_with_least_children().await?)
            ),
            Goal::Rename { old_name, new_name } => format!(
                "Node renamed. New name: {}",
                store.rename_node(old_name, new_name).await?
            ),
            Goal::Paths { start, end } => format!(
                "Paths between {start} and {end}: {}",
                format_paths(&store.paths_between(start, end).await?)
            ),
        };
        Ok(line)
    }
}

/// Await a store call, failing with `Timeout` once `limit` elapses.
pub async fn with_timeout<T>(
    limit: Option<Duration>,
    fut: impl Future<Output = taxo_core::Result<T>>,
) -> taxo_core::Result<T> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| Error::Timeout {
                seconds: limit.as_secs(),
            })?,
        None => fut.await,
    }
}

/// Execute a goal, then print its result line and the elapsed time.
pub async fn run_goal(
    goal: &Goal,
    store: &dyn TaxonomyStore,
    limit: Option<Duration>,
    out: &mut impl Write,
) -> crate::Result<()> {
    let started = Instant::now();
    let line = with_timeout(limit, goal.execute(store)).await?;
    let elapsed = started.elapsed();

    writeln!(out, "{line}")?;
    writeln!(out, "{}", format_elapsed(elapsed))?;
    Ok(())
}

/// `[a, b, c]`
pub fn format_list(names: &[String]) -> String {
    format!("[{}]", names.join(", "))
}

/// `[[a -> x -> b], [a -> b]]`
pub fn format_paths(paths: &[CategoryPath]) -> String {
    let rendered: Vec<String> = paths
        .iter()
        .map(|path| format!("[{}]", path.join(" -> ")))
        .collect();
    format!("[{}]", rendered.join(", "))
}

fn format_roots(roots: &[String]) -> String {
    match roots {
        [] => "Root node: none".to_string(),
        [root] => format!("Root node: {root}"),
        many => {
            tracing::warn!("Taxonomy has {} root nodes", many.len());
            format!("Root nodes ({}): {}", many.len(), format_list(many))
        }
    }
}

/// `Time taken for the query: 0.001234 seconds`
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("Time taken for the query: {:.6} seconds", elapsed.as_secs_f64())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use taxo_graph::{MemoryStore, TaxonomyGraph, TraversalOptions, load_edges_from_reader};

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn store(csv: &str) -> MemoryStore {
        let (graph, _) = load_edges_from_reader(csv.as_bytes()).unwrap();
        MemoryStore::new(graph, TraversalOptions::default())
    }

    fn small_store() -> MemoryStore {
        store("parent_category,child_category\nRoot,A\nRoot,B\nA,C\n")
    }

    async fn line(goal: &str, args: &[&str], store: &MemoryStore) -> String {
        Goal::parse(goal, &strings(args))
            .unwrap()
            .execute(store)
            .await
            .unwrap()
    }

    // ------------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------------

    #[test]
    fn test_parse_selector_range() {
        assert_eq!(parse_selector("1").unwrap(), 1);
        assert_eq!(parse_selector(" 12 ").unwrap(), 12);
        for bad in ["0", "13", "abc", "", "-1"] {
            let err = parse_selector(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidCommand(_)), "{bad}");
        }
    }

    #[test]
    fn test_parse_goals() {
        assert_eq!(
            Goal::parse("1", &strings(&["Science"])).unwrap(),
            Goal::Children("Science".to_string())
        );
        assert_eq!(Goal::parse("7", &[]).unwrap(), Goal::UniqueNodeCount);
        assert_eq!(
            Goal::parse("11", &strings(&["Old", "New"])).unwrap(),
            Goal::Rename {
                old_name: "Old".to_string(),
                new_name: "New".to_string()
            }
        );
    }

    #[test]
    fn test_parse_keeps_surrounding_spaces() {
        assert_eq!(
            Goal::parse("4", &strings(&["  Physics "])).unwrap(),
            Goal::Parents("  Physics ".to_string())
        );
    }

    #[test]
    fn test_parse_arity_errors() {
        let err = Goal::parse("1", &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
        assert!(err.is_usage_error());

        let err = Goal::parse("7", &strings(&["extra"])).unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));

        let err = Goal::parse("12", &strings(&["only-one"])).unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
    }

    #[test]
    fn test_parse_blank_name_rejected() {
        let err = Goal::parse("11", &strings(&["A", "   "])).unwrap_err();
        assert!(err.to_string().contains("new name must not be blank"));
    }

    #[test]
    fn test_unknown_goal_is_not_usage_error() {
        let err = Goal::parse("99", &[]).unwrap_err();
        assert!(!err.is_usage_error());
    }

    #[test]
    fn test_number_round_trips_selector() {
        for n in 1..=12u8 {
            let args: Vec<String> = prompts(n).iter().map(|_| "x".to_string()).collect();
            assert_eq!(Goal::parse(&n.to_string(), &args).unwrap().number(), n);
        }
    }

    // ------------------------------------------------------------------------
    // Execution and formatting
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_goal_lines_small_taxonomy() {
        let store = small_store();
        assert_eq!(line("1", &["Root"], &store).await, "Children of node Root: [A, B]");
        assert_eq!(line("2", &["Root"], &store).await, "Number of children of node Root: 2");
        assert_eq!(line("3", &["Root"], &store).await, "Grandchildren of node Root: [C]");
        assert_eq!(line("4", &["C"], &store).await, "Parents of node C: [A]");
        assert_eq!(line("5", &["C"], &store).await, "Number of parents of node C: 1");
        assert_eq!(line("6", &["C"], &store).await, "Grandparents of node C: [Root]");
        assert_eq!(line("7", &[], &store).await, "Number of uniquely named nodes: 4");
        assert_eq!(line("8", &[], &store).await, "Root node: Root");
        assert_eq!(line("9", &[], &store).await, "Nodes with the most children: [Root]");
        assert_eq!(line("10", &[], &store).await, "Nodes with the least children: [A]");
    }

    #[tokio::test]
    async fn test_padded_name_matches_stored_name() {
        let mut graph = TaxonomyGraph::new();
        graph.add_category(" Padded ");
        graph.add_category("Inner");
        graph.add_edge(" Padded ", "Inner").unwrap();
        let store = MemoryStore::new(graph, TraversalOptions::default());

        assert_eq!(
            line("1", &[" Padded "], &store).await,
            "Children of node  Padded : [Inner]"
        );
        assert_eq!(line("1", &["Padded"], &store).await, "Children of node Padded: []");
    }

    #[tokio::test]
    async fn test_missing_node_reads_empty() {
        let store = small_store();
        assert_eq!(line("1", &["Ghost"], &store).await, "Children of node Ghost: []");
        assert_eq!(line("5", &["Ghost"], &store).await, "Number of parents of node Ghost: 0");
    }

    #[tokio::test]
    async fn test_rename_line_and_error() {
        let store = small_store();
        assert_eq!(
            line("11", &["Root", "Top"], &store).await,
            "Node renamed. New name: Top"
        );

        let err = Goal::parse("11", &strings(&["Ghost", "X"]))
            .unwrap()
            .execute(&store)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "category not found: Ghost");
    }

    #[tokio::test]
    async fn test_paths_line() {
        let store = store("parent_category,child_category\na,x\nx,b\na,b\n");
        let out = line("12", &["a", "b"], &store).await;
        assert!(out.starts_with("Paths between a and b: [["));
        assert!(out.contains("[a -> x -> b]"));
        assert!(out.contains("[a -> b]"));
    }

    #[tokio::test]
    async fn test_multiple_roots() {
        let store = store("parent_category,child_category\nR1,A\nR2,B\n");
        assert_eq!(line("8", &[], &store).await, "Root nodes (2): [R1, R2]");
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_list(&[]), "[]");
        assert_eq!(format_paths(&[]), "[]");
        assert_eq!(
            format_paths(&[strings(&["a", "x", "b"]), strings(&["a", "b"])]),
            "[[a -> x -> b], [a -> b]]"
        );
        assert_eq!(format_roots(&[]), "Root node: none");
        assert_eq!(
            format_elapsed(Duration::from_millis(1500)),
            "Time taken for the query: 1.500000 seconds"
        );
    }

    #[tokio::test]
    async fn test_run_goal_prints_result_then_time() {
        let store = small_store();
        let goal = Goal::parse("2", &strings(&["Root"])).unwrap();
        let mut out = Vec::new();
        run_goal(&goal, &store, None, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Number of children of node Root: 2");
        assert!(lines[1].starts_with("Time taken for the query: "));
        assert!(lines[1].ends_with(" seconds"));
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, Error>(())
        };
        let err = with_timeout(Some(Duration::from_millis(10)), slow)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_with_timeout_passes_through() {
        let value = with_timeout(Some(Duration::from_secs(5)), async { Ok::<_, Error>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
        assert_eq!(with_timeout(None, async { Ok::<_, Error>(1) }).await.unwrap(), 1);
    }
}
