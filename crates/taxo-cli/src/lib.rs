//! # taxo-cli
//!
//! Command-line front end for taxonomy graph queries.
//!
//! - `run <goal> [names...]`: answer one goal number (1-12) and exit
//! - `interactive`: the menu-driven loop
//! - `index`: create the Neo4j name index
//! - `prep nodes|clean`: CSV preparation for bulk imports
//! - `config path|get|set|init|export`: configuration management

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod interactive;

pub use cli::{Args, Command, ConfigAction, PrepAction};
pub use config::{BackendKind, TaxoConfig};
pub use error::{Error, Result};

use commands::Goal;
use std::io::{self, Write};
use taxo_graph::prep;

/// Execute the parsed command line, writing results to `out`.
pub async fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    match &args.command {
        Command::Config { action } => {
            config_handlers::handle_config_command(args.config.as_deref(), action, out)
        }
        Command::Prep { action } => run_prep(action, out),
        Command::Run { goal, names } => {
            // Reject a malformed goal before touching the store.
            let goal = Goal::parse(goal, names)?;
            let config = TaxoConfig::load_for(args)?;
            backend::check_one_shot(&goal, &config)?;
            let store = backend::open_store(&config).await?;
            commands::run_goal(&goal, store.as_ref(), config.query.timeout(), out).await
        }
        Command::Interactive => {
            let config = TaxoConfig::load_for(args)?;
            let store = backend::open_store(&config).await?;
            let stdin = io::stdin();
            interactive::run_interactive(store.as_ref(), config.query.timeout(), stdin.lock(), out)
                .await
        }
        Command::Index => {
            let config = TaxoConfig::load_for(args)?;
            let store = backend::open_neo4j(&config).await?;
            commands::with_timeout(config.query.timeout(), store.ensure_name_index()).await?;
            writeln!(out, "Index ready on :{}(name)", config.neo4j.label)?;
            Ok(())
        }
    }
}

fn run_prep(action: &PrepAction, out: &mut impl Write) -> Result<()> {
    match action {
        PrepAction::Nodes { input, output } => {
            let count = prep::extract_categories(input, output)?;
            writeln!(out, "Wrote {count} categories to {}", output.display())?;
        }
        PrepAction::Clean { input, output } => {
            let rows = prep::strip_quotes(input, output)?;
            writeln!(out, "Wrote {rows} rows to {}", output.display())?;
        }
    }
    Ok(())
}
