#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod handlers;
pub mod models;
pub mod services;

use crate::handlers::{construct, inspect};
use crate::models::args::{AppCommands, Cli};

use anyhow::Result;
use clap::Parser;
use pmark_kernel::config::load_plotmark_config;
use pmark_logger::Logger;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_plotmark_config(cli.config.as_deref())?;
    let _logger = Logger::from_settings(env!("CARGO_PKG_NAME"), &config.logging)?;
    let catalog = pmark::init(&config)?;
    debug!(command = ?cli.command, "Dispatching command");

    match cli.command {
        AppCommands::Models {} => inspect::list_models(&catalog)?,
        AppCommands::Describe { model, json } => inspect::describe_model(&catalog, &model, json)?,
        AppCommands::Construct { model, values } => {
            construct::construct_model(&catalog, &model, &values)?;
        },
        AppCommands::LabelSet { values } => construct::label_set(&catalog, &values)?,
    }

    Ok(())
}
