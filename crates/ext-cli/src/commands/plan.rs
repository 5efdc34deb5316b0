//! `plan`: activate extensions in a session and show the outcome.

use std::path::Path;

use colored::Colorize;
use ext_permissions::ConfigSession;

use super::{load_extensions, print_json, print_order_verdict};
use crate::error::{CliError, Result};

/// Handle `extctl plan <name>... [--json]`
///
/// Activates each named extension with its dependencies. A refused
/// activation prints its conflicts and fails the command.
pub fn run_plan(file: &Path, names: &[String], json: bool) -> Result<()> {
    let mut session = ConfigSession::new(load_extensions(file)?)?;

    for name in names {
        if session.is_active(name) {
            tracing::debug!(extension = %name, "already active, skipping");
            continue;
        }
        let verdict = session.activate_with_dependencies(name)?;
        if !verdict.is_ok() {
            if json {
                print_json(&verdict)?;
            } else {
                println!(
                    "{} Cannot activate '{}'",
                    "=>".blue().bold(),
                    name.cyan()
                );
                print_order_verdict(&verdict);
            }
            return Err(CliError::Conflicts {
                count: verdict.conflicts.len(),
            });
        }
    }

    let snapshot = session.snapshot()?;
    if json {
        return print_json(&snapshot);
    }

    println!("{} Load order", "=>".blue().bold());
    for (i, name) in snapshot.load_order.iter().enumerate() {
        println!("   {} {}", format!("{}.", i + 1).dimmed(), name.cyan());
    }
    if !snapshot.values.is_empty() {
        println!("{} Values", "=>".blue().bold());
        for (url, value) in &snapshot.values {
            println!("   {} = {}", url.bold(), value);
        }
    }
    Ok(())
}
