//! Dependency commands: `solve`, `deps` and `rdeps`.

use std::path::Path;

use colored::Colorize;
use ext_resolver::ExtensionDependencySolver;
use serde::Serialize;

use super::{load_extensions, print_json, print_layers};
use crate::error::{CliError, Result};

/// Handle `extctl solve [--extensions-only] [--json]`
pub fn run_solve(file: &Path, extensions_only: bool, json: bool) -> Result<()> {
    let extensions = load_extensions(file)?;
    let solver = ExtensionDependencySolver::new(&extensions)?;
    let layers = if extensions_only {
        solver.solve_extensions_only()?
    } else {
        solver.solve()?
    };

    if json {
        return print_json(&layers);
    }
    print_layers("Activation layers", &layers);
    let virtuals = solver.virtual_dependencies();
    if !virtuals.is_empty() && !extensions_only {
        println!(
            "   {} {}",
            "External:".dimmed(),
            virtuals.join(", ").yellow()
        );
    }
    Ok(())
}

/// Handle `extctl deps <name> [--json]`
pub fn run_deps(file: &Path, name: &str, json: bool) -> Result<()> {
    let extensions = load_extensions(file)?;
    let solver = ExtensionDependencySolver::new(&extensions)?;
    let layers = solver.dependencies_for(name)?;

    if json {
        return print_json(&layers);
    }
    print_layers(&format!("Dependencies of '{}'", name.cyan()), &layers);
    Ok(())
}

#[derive(Serialize)]
struct ReverseDependencies<'a> {
    extension: &'a str,
    transitive: bool,
    dependents: Vec<String>,
}

/// Handle `extctl rdeps <name> [--transitive] [--json]`
pub fn run_rdeps(file: &Path, name: &str, transitive: bool, json: bool) -> Result<()> {
    let extensions = load_extensions(file)?;
    if !extensions.iter().any(|ext| ext.name == name) {
        return Err(CliError::user(format!("Unknown extension '{name}'")));
    }
    let solver = ExtensionDependencySolver::new(&extensions)?;
    let dependents = if transitive {
        solver.reverse_dependencies_closure(name)
    } else {
        solver.reverse_dependencies_for(name)
    };

    if json {
        return print_json(&ReverseDependencies {
            extension: name,
            transitive,
            dependents,
        });
    }

    if dependents.is_empty() {
        println!("{} Nothing depends on '{}'", "=>".blue().bold(), name.cyan());
        return Ok(());
    }
    println!(
        "{} Extensions depending on '{}'{}",
        "=>".blue().bold(),
        name.cyan(),
        if transitive { " (transitively)" } else { "" }
    );
    for dependent in &dependents {
        println!("   {}", dependent);
    }
    Ok(())
}
