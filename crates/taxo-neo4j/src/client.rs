//! Neo4j client implementing the taxonomy query contract.

use crate::error::{decode_error, query_error};
use crate::{CypherQueries, Neo4jConfig};
use async_trait::async_trait;
use neo4rs::{Graph, Query, Row, query};
use std::sync::Arc;
use taxo_core::{Error, Result};
use taxo_graph::{CategoryPath, TaxonomyStore, TraversalOptions, dedupe_preserving_order};

const CATEGORY: &str = "category";

/// [`TaxonomyStore`] backed by a Neo4j server.
///
/// Each operation is one auto-commit Cypher statement, so every call is an
/// independent unit of work and isolation is the server's.
#[derive(Clone)]
pub struct Neo4jStore {
    graph: Arc<Graph>,
    queries: CypherQueries,
    options: TraversalOptions,
}

impl Neo4jStore {
    /// Connect and verify connectivity.
    ///
    /// Fails with `Config` for unusable label/relation names and with
    /// `ConnectionFailure` if the server cannot be reached or rejects the
    /// credentials.
    pub async fn connect(config: &Neo4jConfig, options: TraversalOptions) -> Result<Self> {
        let queries = CypherQueries::new(config)?;

        let graph = Graph::new(config.uri.as_str(), config.user.as_str(), config.password.as_str())
            .await
            .map_err(|e| Error::connection(format!("{}: {e}", config.uri)))?;

        let store = Self {
            graph: Arc::new(graph),
            queries,
            options,
        };
        store.verify_connectivity(&config.uri).await?;
        log::info!("Connected to Neo4j at {} as {}", config.uri, config.user);
        Ok(store)
    }

    async fn verify_connectivity(&self, uri: &str) -> Result<()> {
        let mut result = self
            .graph
            .execute(query("RETURN 1 AS ok"))
            .await
            .map_err(|e| Error::connection(format!("{uri}: {e}")))?;
        result
            .next()
            .await
            .map_err(|e| Error::connection(format!("{uri}: {e}")))?;
        Ok(())
    }

    /// Create the index on the category name property if it is missing.
    pub async fn ensure_name_index(&self) -> Result<()> {
        self.graph
            .run(query(&self.queries.name_index))
            .await
            .map_err(query_error)?;
        log::info!("Ensured name index: {}", self.queries.name_index);
        Ok(())
    }

    async fn rows(&self, q: Query) -> Result<Vec<Row>> {
        let mut result = self.graph.execute(q).await.map_err(query_error)?;
        let mut rows = Vec::new();
        while let Some(row) = result.next().await.map_err(query_error)? {
            rows.push(row);
        }
        Ok(rows)
    }

    async fn names(&self, q: Query) -> Result<Vec<String>> {
        self.rows(q)
            .await?
            .iter()
            .map(|row| row.get::<String>("name").map_err(decode_error))
            .collect()
    }

    async fn count(&self, q: Query) -> Result<u64> {
        let rows = self.rows(q).await?;
        let count = match rows.first() {
            Some(row) => Some(row.get::<i64>("count").map_err(decode_error)?),
            None => None,
        };
        count_value(count)
    }

    fn by_name(cypher: &str, name: &str) -> Query {
        query(cypher).param("name", name.to_string())
    }

    fn two_hop(&self, names: Vec<String>) -> Vec<String> {
        if self.options.dedupe_two_hop {
            dedupe_preserving_order(names)
        } else {
            names
        }
    }
}

/// Interpret the `count` column of a counting query; no row means zero.
fn count_value(count: Option<i64>) -> Result<u64> {
    match count {
        None => Ok(0),
        Some(count) => {
            u64::try_from(count).map_err(|_| Error::store(format!("negative count {count}")))
        }
    }
}

/// Interpret the `(found, collisions)` row returned by the rename statement.
fn rename_outcome(row: Option<(bool, i64)>, old_name: &str, new_name: &str) -> Result<String> {
    match row {
        None | Some((false, _)) => Err(Error::not_found(CATEGORY, old_name)),
        Some((true, collisions)) if collisions > 0 => Err(Error::duplicate(CATEGORY, new_name)),
        Some((true, _)) => Ok(new_name.to_string()),
    }
}

#[async_trait]
impl TaxonomyStore for Neo4jStore {
    fn backend(&self) -> &'static str {
        "neo4j"
    }

    async fn children(&self, name: &str) -> Result<Vec<String>> {
        self.names(Self::by_name(&self.queries.children, name)).await
    }

    async fn child_count(&self, name: &str) -> Result<u64> {
        self.count(Self::by_name(&self.queries.child_count, name)).await
    }

    async fn grandchildren(&self, name: &str) -> Result<Vec<String>> {
        let names = self
            .names(Self::by_name(&self.queries.grandchildren, name))
            .await?;
        Ok(self.two_hop(names))
    }

    async fn parents(&self, name: &str) -> Result<Vec<String>> {
        self.names(Self::by_name(&self.queries.parents, name)).await
    }

    async fn parent_count(&self, name: &str) -> Result<u64> {
        self.count(Self::by_name(&self.queries.parent_count, name)).await
    }

    async fn grandparents(&self, name: &str) -> Result<Vec<String>> {
        let names = self
            .names(Self::by_name(&self.queries.grandparents, name))
            .await?;
        Ok(self.two_hop(names))
    }

    async fn unique_node_count(&self) -> Result<u64> {
        self.count(query(&self.queries.unique_node_count)).await
    }

    async fn root_nodes(&self) -> Result<Vec<String>> {
        self.names(query(&self.queries.root_nodes)).await
    }

    async fn nodes_with_most_children(&self) -> Result<Vec<String>> {
        self.names(query(&self.queries.most_children)).await
    }

    async fn nodes_with_least_children(&self) -> Result<Vec<String>> {
        self.names(query(&self.queries.least_children)).await
    }

    async fn rename_node(&self, old_name: &str, new_name: &str) -> Result<String> {
        if new_name.trim().is_empty() {
            return Err(Error::InvalidArguments(
                "new category name must not be blank".to_string(),
            ));
        }

        let q = query(&self.queries.rename)
            .param("old_name", old_name.to_string())
            .param("new_name", new_name.to_string());
        let rows = self.rows(q).await?;
        let outcome = match rows.first() {
            Some(row) => Some((
                row.get::<bool>("found").map_err(decode_error)?,
                row.get::<i64>("collisions").map_err(decode_error)?,
            )),
            None => None,
        };

        let renamed = rename_outcome(outcome, old_name, new_name)?;
        log::info!("Renamed category '{old_name}' to '{new_name}'");
        Ok(renamed)
    }

    async fn paths_between(&self, start: &str, end: &str) -> Result<Vec<CategoryPath>> {
        let max_hops = self.options.max_path_hops;
        if max_hops == Some(0) {
            return Ok(Vec::new());
        }

        let q = query(&self.queries.paths(max_hops))
            .param("start", start.to_string())
            .param("end", end.to_string());
        self.rows(q)
            .await?
            .iter()
            .map(|row| row.get::<Vec<String>>("names").map_err(decode_error))
            .collect()
    }
}
