//! Command-line argument definitions.

use crate::config::BackendKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Query a category taxonomy stored in Neo4j or loaded from CSV.
#[derive(Parser, Debug)]
#[command(name = "taxo", version)]
#[command(about = "Taxonomy graph query tool", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true, env = "TAXO_CONFIG")]
    pub config: Option<String>,

    /// Store that answers queries
    #[arg(long, global = true, env = "TAXO_BACKEND", value_enum)]
    pub backend: Option<BackendKind>,

    /// Neo4j Bolt URI
    #[arg(long, global = true, env = "TAXO_NEO4J_URI")]
    pub uri: Option<String>,

    /// Neo4j user
    #[arg(long, global = true, env = "TAXO_NEO4J_USER")]
    pub user: Option<String>,

    /// Neo4j password
    #[arg(long, global = true, env = "TAXO_NEO4J_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Node label of category nodes
    #[arg(long, global = true, env = "TAXO_NEO4J_LABEL")]
    pub label: Option<String>,

    /// Relation type from parent to child
    #[arg(long, global = true, env = "TAXO_NEO4J_RELATION")]
    pub relation: Option<String>,

    /// Edge-list CSV for the memory backend
    #[arg(long, global = true, env = "TAXO_EDGES_CSV")]
    pub edges: Option<PathBuf>,

    /// Query timeout in seconds
    #[arg(long, global = true, env = "TAXO_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Remove repeated names from grandchildren/grandparents results
    #[arg(long, global = true, env = "TAXO_DEDUPE_TWO_HOP")]
    pub dedupe: bool,

    /// Longest path, in edges, reported by goal 12
    #[arg(long, global = true, env = "TAXO_MAX_PATH_HOPS")]
    pub max_hops: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a single goal (1-12) and exit
    Run {
        /// Goal number
        goal: String,
        /// Category name(s) the goal needs
        names: Vec<String>,
    },
    /// Show the goal menu and answer queries until 0 is entered
    Interactive,
    /// Create the Neo4j index on category names
    Index,
    /// Prepare CSV input for bulk import
    Prep {
        #[command(subcommand)]
        action: PrepAction,
    },
    /// Inspect or edit the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// CSV preparation steps.
#[derive(Subcommand, Debug)]
pub enum PrepAction {
    /// Write the distinct categories of an edge list as a node list
    Nodes {
        /// Edge-list CSV
        #[arg(short, long)]
        input: PathBuf,
        /// Node-list CSV to write
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Copy a CSV with every double quote removed
    Clean {
        /// Source CSV
        #[arg(short, long)]
        input: PathBuf,
        /// Destination CSV
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print the value of a dotted key, e.g. `neo4j.uri`
    Get { key: String },
    /// Set a dotted key in the config file
    Set { key: String, value: String },
    /// Write a default config file
    Init {
        /// Where to write it (defaults to the standard location)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration as environment variables
    Export {
        /// Format as `--env KEY=VALUE` for docker run
        #[arg(long)]
        docker_env: bool,
    },
}
