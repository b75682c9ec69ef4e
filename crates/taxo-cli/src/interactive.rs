//! Menu-driven query loop.
//!
//! Each round prints the menu, reads a goal number and the names it needs,
//! and prints the result. Failures are reported on one line and the loop
//! carries on; `0` (or end of input) ends the session.

use crate::commands::{Goal, MENU, parse_selector, prompts, run_goal};
use crate::error::Result;
use std::io::{BufRead, Write};
use std::time::Duration;
use taxo_graph::TaxonomyStore;

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Run the loop until the user exits or input ends.
pub async fn run_interactive<R: BufRead, W: Write>(
    store: &dyn TaxonomyStore,
    limit: Option<Duration>,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    loop {
        writeln!(out, "{MENU}")?;
        let Some(command) = prompt(&mut input, out, "Enter command number: ")? else {
            break;
        };
        if command.trim() == "0" {
            break;
        }

        let number = match parse_selector(&command) {
            Ok(number) => number,
            Err(e) => {
                writeln!(out, "Error: {e}")?;
                continue;
            }
        };

        let mut names = Vec::new();
        for text in prompts(number) {
            match prompt(&mut input, out, text)? {
                Some(name) => names.push(name),
                None => {
                    writeln!(out)?;
                    writeln!(out, "Exiting...")?;
                    return Ok(());
                }
            }
        }

        let outcome = match Goal::parse(&command, &names) {
            Ok(goal) => run_goal(&goal, store, limit, out).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = outcome {
            tracing::debug!("Goal {number} failed: {e}");
            writeln!(out, "Error: {e}")?;
        }
    }

    writeln!(out, "Exiting...")?;
    Ok(())
}
