//! Connection and schema settings for the Neo4j backend.

use serde::{Deserialize, Serialize};
use taxo_core::{Result, validate_identifier};

/// Default Bolt address.
pub const DEFAULT_URI: &str = "bolt://localhost:7687";
/// Default node label.
pub const DEFAULT_LABEL: &str = "Category";
/// Default relation type.
pub const DEFAULT_RELATION: &str = "IS_PARENT_OF";

/// Settings for [`Neo4jStore`](crate::Neo4jStore).
///
/// `label` and `relation` are spliced into Cypher text, so they are
/// validated as plain identifiers before use.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Neo4jConfig {
    /// Bolt URI, e.g. `bolt://localhost:7687`.
    pub uri: String,
    /// Username.
    pub user: String,
    /// Password.
    pub password: String,
    /// Label carried by category nodes.
    pub label: String,
    /// Relation type pointing from parent to child.
    pub relation: String,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            user: "neo4j".to_string(),
            password: "password".to_string(),
            label: DEFAULT_LABEL.to_string(),
            relation: DEFAULT_RELATION.to_string(),
        }
    }
}

impl Neo4jConfig {
    /// Check that the schema names are safe to splice into queries.
    pub fn validate(&self) -> Result<()> {
        validate_identifier("neo4j.label", &self.label)?;
        validate_identifier("neo4j.relation", &self.relation)
    }
}
