//! Command implementations for ext-cli

pub mod check;
pub mod plan;
pub mod solve;

pub use check::{run_check_order, run_check_value};
pub use plan::run_plan;
pub use solve::{run_deps, run_rdeps, run_solve};

use std::path::Path;

use colored::Colorize;
use ext_model::{Extension, ManifestSet};
use ext_permissions::OrderVerdict;

use crate::error::{CliError, Result};

/// Load and validate the manifest set at `path`.
pub fn load_extensions(path: &Path) -> Result<Vec<Extension>> {
    if !path.exists() {
        return Err(CliError::user(format!(
            "Manifest file '{}' does not exist. Pass one with --file or EXTCTL_FILE.",
            path.display()
        )));
    }
    let extensions = ManifestSet::from_path(path)?.into_extensions()?;
    tracing::debug!(path = %path.display(), count = extensions.len(), "loaded extensions");
    Ok(extensions)
}

/// Pick `names` out of `extensions`, in the order given.
pub fn select<'a>(extensions: &'a [Extension], names: &[String]) -> Result<Vec<&'a Extension>> {
    names
        .iter()
        .map(|name| {
            extensions
                .iter()
                .find(|ext| &ext.name == name)
                .ok_or_else(|| CliError::user(format!("Unknown extension '{name}'")))
        })
        .collect()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_layers(title: &str, layers: &[Vec<String>]) {
    println!(
        "{} {} ({} layer{})",
        "=>".blue().bold(),
        title,
        layers.len(),
        if layers.len() == 1 { "" } else { "s" }
    );
    for (i, layer) in layers.iter().enumerate() {
        println!("   {} {}", format!("{}:", i + 1).dimmed(), layer.join(", ").cyan());
    }
}

fn print_order_verdict(verdict: &OrderVerdict) {
    if verdict.is_ok() {
        println!("{} {}", "=>".blue().bold(), "OK".green().bold());
        return;
    }
    println!(
        "{} {} ({})",
        "=>".blue().bold(),
        "CONFLICTS".red().bold(),
        verdict.conflicts.len()
    );
    for conflict in &verdict.conflicts {
        println!(
            "   {} {}: {}",
            conflict.extension.cyan(),
            conflict.url.bold(),
            conflict.reason
        );
        println!(
            "     {} {}",
            conflict.verdict.status.to_string().yellow(),
            conflict.verdict.reason.dimmed()
        );
    }
}
