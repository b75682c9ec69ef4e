//! taxo CLI
//!
//! Taxonomy graph queries by goal number, against Neo4j or an edge-list CSV.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use clap::Parser;
use std::process::ExitCode;
use taxo_cli::Args;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut stdout = std::io::stdout();
    match taxo_cli::run(&args, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {e:?}");
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
