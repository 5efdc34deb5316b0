//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Extension manager - order extensions and check their configuration demands
#[derive(Parser, Debug)]
#[command(name = "extctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Manifest set describing the extensions (.toml, .yaml, .yml or .json)
    #[arg(
        short,
        long,
        global = true,
        env = "EXTCTL_FILE",
        default_value = "extensions.toml"
    )]
    pub file: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the activation layers of the whole set
    Solve {
        /// Leave out dependencies that are not extensions of the set
        #[arg(long)]
        extensions_only: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the activation layers of one extension and its dependencies
    Deps {
        /// Extension name
        name: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List the extensions that depend on an extension
    Rdeps {
        /// Extension name
        name: String,

        /// Include indirect dependents
        #[arg(short, long)]
        transitive: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Check that extensions can be active together, in order
    ///
    /// Exits with status 1 when conflicts are found.
    ///
    /// Examples:
    ///   extctl check-order             # every extension, in file order
    ///   extctl check-order mod1 mod2   # only these, in this order
    CheckOrder {
        /// Extensions to check, in activation order (default: all, in file order)
        names: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Classify a value for an option against active extensions
    ///
    /// The value is read as a JSON literal (30, true, ["a","b"]); anything
    /// else is taken as a plain string.
    CheckValue {
        /// Option url, e.g. mod1.feature1
        url: String,

        /// Candidate value
        value: String,

        /// Extensions considered active (default: all, in file order)
        #[arg(short, long = "active")]
        active: Vec<String>,

        /// Report every violation instead of the first
        #[arg(long)]
        all: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Activate extensions with their dependencies and print the result
    Plan {
        /// Extensions to activate, in order
        #[arg(required = true)]
        names: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
