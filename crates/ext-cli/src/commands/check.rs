//! Configuration checks: `check-order` and `check-value`.

use std::path::Path;

use colored::Colorize;
use ext_model::{Extension, OptionValue};
use ext_permissions::{
    PermissionStatus, PermissionVerdict, collect_violations, find_spec,
    is_all_valid_extension_config_order, is_value_permitted,
};

use super::{load_extensions, print_json, print_order_verdict, select};
use crate::error::{CliError, Result};

/// Handle `extctl check-order [<name>...] [--json]`
///
/// Fails with [`CliError::Conflicts`] after printing when the order has
/// conflicts, so the process exits with status 1.
pub fn run_check_order(file: &Path, names: &[String], json: bool) -> Result<()> {
    let extensions = load_extensions(file)?;
    let order: Vec<&Extension> = if names.is_empty() {
        extensions.iter().collect()
    } else {
        select(&extensions, names)?
    };

    let verdict = is_all_valid_extension_config_order(&order)?;
    if json {
        print_json(&verdict)?;
    } else {
        print_order_verdict(&verdict);
    }

    if verdict.is_ok() {
        Ok(())
    } else {
        Err(CliError::Conflicts {
            count: verdict.conflicts.len(),
        })
    }
}

fn print_verdict(verdict: &PermissionVerdict) {
    let status = match verdict.status {
        PermissionStatus::Ok => verdict.status.to_string().green().bold(),
        PermissionStatus::Warning => verdict.status.to_string().yellow().bold(),
        PermissionStatus::Illegal | PermissionStatus::Error => {
            verdict.status.to_string().red().bold()
        }
    };
    if verdict.is_ok() {
        println!("{} {}", "=>".blue().bold(), status);
    } else {
        println!(
            "{} {} {} {}",
            "=>".blue().bold(),
            status,
            format!("[{}]", verdict.by).dimmed(),
            verdict.reason
        );
    }
}

/// Handle `extctl check-value <url> <value> [--active <name>...] [--all] [--json]`
pub fn run_check_value(
    file: &Path,
    url: &str,
    raw_value: &str,
    active: &[String],
    all: bool,
    json: bool,
) -> Result<()> {
    let extensions = load_extensions(file)?;
    let spec = find_spec(url, &extensions)
        .ok_or_else(|| CliError::user(format!("No extension publishes option '{url}'")))?;
    let configs: Vec<&Extension> = if active.is_empty() {
        extensions.iter().collect()
    } else {
        select(&extensions, active)?
    };
    let value = OptionValue::parse_literal(raw_value);
    tracing::debug!(url, %value, kind = value.kind(), "checking value");

    if all {
        let violations = collect_violations(&value, spec, &configs);
        if json {
            return print_json(&violations);
        }
        if violations.is_empty() {
            print_verdict(&PermissionVerdict::ok());
        }
        for verdict in &violations {
            print_verdict(verdict);
        }
        return Ok(());
    }

    let verdict = is_value_permitted(&value, spec, &configs);
    if json {
        return print_json(&verdict);
    }
    print_verdict(&verdict);
    Ok(())
}
