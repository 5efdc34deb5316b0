//! Extension Manager CLI
//!
//! Orders extensions by their dependencies and checks configuration values
//! against the demands of active extensions.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(&cli.file, cmd),
        None => {
            println!("{} Extension Manager CLI", "extctl".green().bold());
            println!();
            println!("Run {} for available commands.", "extctl --help".cyan());
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn execute_command(file: &std::path::Path, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Solve {
            extensions_only,
            json,
        } => commands::run_solve(file, extensions_only, json),
        Commands::Deps { name, json } => commands::run_deps(file, &name, json),
        Commands::Rdeps {
            name,
            transitive,
            json,
        } => commands::run_rdeps(file, &name, transitive, json),
        Commands::CheckOrder { names, json } => commands::run_check_order(file, &names, json),
        Commands::CheckValue {
            url,
            value,
            active,
            all,
            json,
        } => commands::run_check_value(file, &url, &value, &active, all, json),
        Commands::Plan { names, json } => commands::run_plan(file, &names, json),
    }
}
