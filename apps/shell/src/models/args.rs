//! # CLI Argument Definitions
//!
//! Command-line structure of the `pmark` binary, built with `clap`'s derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "pmark")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect and instantiate Plotmark annotation models")]
pub struct Cli {
    /// Configuration file (TOML, JSON or YAML); `PMARK__*` variables override it
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// The main subcommand to execute.
    #[command(subcommand)]
    pub command: AppCommands,
}

/// Enumeration of available application subcommands.
#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// List registered models in registration order
    Models {},
    /// Print the resolved property table of a model
    Describe {
        /// Model name (e.g. `HTMLLabel`)
        model: String,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Construct an instance and print its snapshot as JSON
    Construct {
        /// Model name (e.g. `HTMLTitle`)
        model: String,
        #[command(flatten)]
        values: ValueArgs,
    },
    /// Build an `HTMLText` glyph renderer through the deprecated label-set path
    LabelSet {
        #[command(flatten)]
        values: ValueArgs,
    },
}

/// Property assignments shared by the constructing subcommands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ValueArgs {
    /// Assignment `name=value`; the value is parsed as JSON, falling back to a plain string
    #[arg(long = "set", short = 's', value_name = "NAME=VALUE")]
    pub assignments: Vec<String>,

    /// JSON object file with property values, applied before `--set`
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,
}
