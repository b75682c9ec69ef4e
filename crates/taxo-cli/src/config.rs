//! Configuration for the taxo CLI.
//!
//! Values are resolved in this order, later sources winning:
//!
//! 1. Built-in defaults
//! 2. The TOML config file (`--config`, `TAXO_CONFIG`, or
//!    `<config_dir>/taxo/config.toml`)
//! 3. `TAXO_*` environment variables and command-line flags

use crate::cli::Args;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use taxo_core::{Error, Result};
use taxo_graph::TraversalOptions;
use taxo_neo4j::Neo4jConfig;

/// Project name used for the config directory and env var prefix.
pub const PROJECT_NAME: &str = "taxo";

/// Which store answers queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// A Neo4j server reached over Bolt.
    #[default]
    Neo4j,
    /// An in-process graph loaded from an edge-list CSV.
    Memory,
}

impl BackendKind {
    /// Name as written in config files and env vars.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neo4j => "neo4j",
            Self::Memory => "memory",
        }
    }
}

/// Settings for the in-memory backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Edge-list CSV with `parent_category` and `child_category` columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges_csv: Option<PathBuf>,
}

/// Per-query behaviour shared by both backends.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Abort a query after this many seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Collapse repeated names in grandchildren/grandparents results.
    pub dedupe_two_hop: bool,
    /// Longest path reported by goal 12.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_path_hops: Option<usize>,
}

impl QueryConfig {
    /// Traversal options handed to the store.
    pub fn traversal_options(&self) -> TraversalOptions {
        TraversalOptions {
            dedupe_two_hop: self.dedupe_two_hop,
            max_path_hops: self.max_path_hops,
        }
    }

    /// Per-query time limit. Zero disables it, like leaving it unset.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Top-level configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxoConfig {
    /// Store used to answer queries.
    pub backend: BackendKind,
    /// Neo4j connection and schema.
    pub neo4j: Neo4jConfig,
    /// In-memory backend input.
    pub memory: MemoryConfig,
    /// Query behaviour.
    pub query: QueryConfig,
}

impl TaxoConfig {
    /// Default location: `<config_dir>/taxo/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// The explicit path if given, otherwise the default location.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Load configuration from the resolved path.
    ///
    /// A missing file at the default location yields defaults; a missing
    /// file that was asked for explicitly is an error.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => {
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            Some(path) if explicit.is_some() => Err(Error::config(format!(
                "Config file does not exist at {}",
                path.display()
            ))),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration and layer flag/env overrides on top.
    pub fn load_for(args: &Args) -> Result<Self> {
        let mut config = Self::load(args.config.as_deref())?;
        config.apply_overrides(args);
        Ok(config)
    }

    /// Apply values given on the command line or via `TAXO_*` variables.
    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(backend) = args.backend {
            self.backend = backend;
        }
        if let Some(uri) = &args.uri {
            self.neo4j.uri = uri.clone();
        }
        if let Some(user) = &args.user {
            self.neo4j.user = user.clone();
        }
        if let Some(password) = &args.password {
            self.neo4j.password = password.clone();
        }
        if let Some(label) = &args.label {
            self.neo4j.label = label.clone();
        }
        if let Some(relation) = &args.relation {
            self.neo4j.relation = relation.clone();
        }
        if let Some(edges) = &args.edges {
            self.memory.edges_csv = Some(edges.clone());
        }
        if let Some(timeout) = args.timeout {
            self.query.timeout_secs = Some(timeout);
        }
        if args.dedupe {
            self.query.dedupe_two_hop = true;
        }
        if let Some(max_hops) = args.max_hops {
            self.query.max_path_hops = Some(max_hops);
        }
    }

    /// Serialize as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Environment variables that reproduce this configuration.
    pub fn to_env_vars(&self) -> Vec<(String, String)> {
        let mut vars = vec![
            ("TAXO_BACKEND".to_string(), self.backend.as_str().to_string()),
            ("TAXO_NEO4J_URI".to_string(), self.neo4j.uri.clone()),
            ("TAXO_NEO4J_USER".to_string(), self.neo4j.user.clone()),
            ("TAXO_NEO4J_PASSWORD".to_string(), self.neo4j.password.clone()),
            ("TAXO_NEO4J_LABEL".to_string(), self.neo4j.label.clone()),
            ("TAXO_NEO4J_RELATION".to_string(), self.neo4j.relation.clone()),
            (
                "TAXO_DEDUPE_TWO_HOP".to_string(),
                self.query.dedupe_two_hop.to_string(),
            ),
        ];
        if let Some(edges) = &self.memory.edges_csv {
            vars.push(("TAXO_EDGES_CSV".to_string(), edges.display().to_string()));
        }
        if let Some(timeout) = self.query.timeout_secs {
            vars.push(("TAXO_TIMEOUT_SECS".to_string(), timeout.to_string()));
        }
        if let Some(max_hops) = self.query.max_path_hops {
            vars.push(("TAXO_MAX_PATH_HOPS".to_string(), max_hops.to_string()));
        }
        vars
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["taxo"];
        argv.extend_from_slice(extra);
        argv.extend_from_slice(&["run", "7"]);
        Args::parse_from(argv)
    }

    #[test]
    fn test_default_config() {
        let config = TaxoConfig::default();
        assert_eq!(config.backend, BackendKind::Neo4j);
        assert_eq!(config.neo4j.uri, "bolt://localhost:7687");
        assert!(config.memory.edges_csv.is_none());
        assert!(config.query.timeout_secs.is_none());
        assert!(!config.query.dedupe_two_hop);
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let config = TaxoConfig::default();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("backend = \"neo4j\""));
        assert!(text.contains("[neo4j]"));
        let parsed: TaxoConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file() {
        let config: TaxoConfig = toml::from_str(
            r#"
            backend = "memory"

            [memory]
            edges_csv = "/data/taxonomy.csv"

            [query]
            timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(
            config.memory.edges_csv,
            Some(PathBuf::from("/data/taxonomy.csv"))
        );
        assert_eq!(config.query.timeout_secs, Some(10));
        assert_eq!(config.neo4j, Neo4jConfig::default());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let err = TaxoConfig::load(Some("/nonexistent/taxo.toml")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[neo4j]\nuser = \"reader\"\n").unwrap();

        let config = TaxoConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.neo4j.user, "reader");
        assert_eq!(config.neo4j.password, "password");
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backend = [").unwrap();
        let err = TaxoConfig::load(Some(path.to_str().unwrap())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_flags_override_file() {
        let mut config = TaxoConfig::default();
        config.query.timeout_secs = Some(60);

        config.apply_overrides(&args(&[
            "--backend",
            "memory",
            "--edges",
            "/tmp/edges.csv",
            "--timeout",
            "5",
            "--dedupe",
            "--max-hops",
            "3",
            "--relation",
            "SUBCATEGORY",
        ]));

        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.memory.edges_csv, Some(PathBuf::from("/tmp/edges.csv")));
        assert_eq!(config.query.timeout_secs, Some(5));
        assert!(config.query.dedupe_two_hop);
        assert_eq!(config.query.max_path_hops, Some(3));
        assert_eq!(config.neo4j.relation, "SUBCATEGORY");
    }

    #[test]
    fn test_env_vars_include_optional_values_when_set() {
        let mut config = TaxoConfig::default();
        assert!(!config.to_env_vars().iter().any(|(k, _)| k == "TAXO_TIMEOUT_SECS"));

        assert!(
            config
                .to_env_vars()
                .contains(&("TAXO_DEDUPE_TWO_HOP".to_string(), "false".to_string()))
        );

        config.query.timeout_secs = Some(3);
        config.query.dedupe_two_hop = true;
        let vars = config.to_env_vars();
        assert!(vars.contains(&("TAXO_TIMEOUT_SECS".to_string(), "3".to_string())));
        assert!(vars.contains(&("TAXO_BACKEND".to_string(), "neo4j".to_string())));
        assert!(vars.contains(&("TAXO_DEDUPE_TWO_HOP".to_string(), "true".to_string())));
    }

    #[test]
    fn test_traversal_options_from_query_config() {
        let query = QueryConfig {
            timeout_secs: None,
            dedupe_two_hop: true,
            max_path_hops: Some(2),
        };
        let options = query.traversal_options();
        assert!(options.dedupe_two_hop);
        assert_eq!(options.max_path_hops, Some(2));
    }

    #[test]
    fn test_timeout_zero_disables() {
        let mut query = QueryConfig::default();
        assert_eq!(query.timeout(), None);
        query.timeout_secs = Some(0);
        assert_eq!(query.timeout(), None);
        query.timeout_secs = Some(4);
        assert_eq!(query.timeout(), Some(Duration::from_secs(4)));
    }
}
