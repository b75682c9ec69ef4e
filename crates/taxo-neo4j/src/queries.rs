//! Cypher text for each operation of the query contract.
//!
//! Label and relation are spliced in once, at construction; every category
//! name travels as a query parameter (`$name`, `$old_name`, `$new_name`,
//! `$start`, `$end`).

use crate::Neo4jConfig;
use taxo_core::Result;

/// Prepared Cypher statements for one label/relation pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CypherQueries {
    pub children: String,
    pub child_count: String,
    pub grandchildren: String,
    pub parents: String,
    pub parent_count: String,
    pub grandparents: String,
    pub unique_node_count: String,
    pub root_nodes: String,
    pub most_children: String,
    pub least_children: String,
    pub rename: String,
    pub name_index: String,
    label: String,
    relation: String,
}

/// Keeps the rows whose child count equals the aggregate `extreme`.
fn extremal(label: &str, relation: &str, aggregate: &str) -> String {
    format!(
        "MATCH (p:{label})-[:{relation}]->(c:{label}) \
         WITH p, count(c) AS child_count \
         WITH collect({{name: p.name, count: child_count}}) AS rows, {aggregate}(child_count) AS extreme \
         UNWIND rows AS row \
         WITH row, extreme WHERE row.count = extreme \
         RETURN row.name AS name"
    )
}

impl CypherQueries {
    /// Build the statement set, validating the schema names first.
    pub fn new(config: &Neo4jConfig) -> Result<Self> {
        config.validate()?;
        let (l, r) = (config.label.as_str(), config.relation.as_str());

        Ok(Self {
            children: format!(
                "MATCH (c:{l} {{name: $name}})-[:{r}]->(child:{l}) RETURN child.name AS name"
            ),
            child_count: format!(
                "MATCH (c:{l} {{name: $name}})-[:{r}]->(child:{l}) RETURN count(child) AS count"
            ),
            grandchildren: format!(
                "MATCH (p:{l} {{name: $name}})-[:{r}]->(:{l})-[:{r}]->(gc:{l}) RETURN gc.name AS name"
            ),
            parents: format!(
                "MATCH (c:{l} {{name: $name}})<-[:{r}]-(parent:{l}) RETURN parent.name AS name"
            ),
            parent_count: format!(
                "MATCH (c:{l} {{name: $name}})<-[:{r}]-(parent:{l}) RETURN count(parent) AS count"
            ),
            grandparents: format!(
                "MATCH (gp:{l})-[:{r}]->(:{l})-[:{r}]->(c:{l} {{name: $name}}) RETURN gp.name AS name"
            ),
            unique_node_count: format!("MATCH (n:{l}) RETURN count(DISTINCT n.name) AS count"),
            root_nodes: format!(
                "MATCH (c:{l}) WHERE NOT EXISTS {{ MATCH (c)<-[:{r}]-() }} RETURN c.name AS name"
            ),
            most_children: extremal(l, r, "max"),
            least_children: extremal(l, r, "min"),
            rename: format!(
                "OPTIONAL MATCH (n:{l} {{name: $old_name}}) \
                 OPTIONAL MATCH (taken:{l} {{name: $new_name}}) WHERE $new_name <> $old_name \
                 WITH n, count(taken) AS collisions \
                 FOREACH (ignored IN CASE WHEN n IS NOT NULL AND collisions = 0 THEN [1] ELSE [] END | \
                 SET n.name = $new_name) \
                 RETURN n IS NOT NULL AS found, collisions"
            ),
            name_index: format!(
                "CREATE INDEX taxo_{}_name IF NOT EXISTS FOR (n:{l}) ON (n.name)",
                l.to_lowercase()
            ),
            label: l.to_string(),
            relation: r.to_string(),
        })
    }

    /// Simple directed paths from `$start` to `$end`, at most `max_hops` long.
    pub fn paths(&self, max_hops: Option<usize>) -> String {
        let (l, r) = (&self.label, &self.relation);
        let hops = match max_hops {
            Some(max) => format!("*1..{max}"),
            None => "*".to_string(),
        };
        format!(
            "MATCH path = (start:{l} {{name: $start}})-[:{r}{hops}]->(end:{l} {{name: $end}}) \
             WHERE all(n IN nodes(path) WHERE single(m IN nodes(path) WHERE m = n)) \
             RETURN [n IN nodes(path) | n.name] AS names"
        )
    }
}
