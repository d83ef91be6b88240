// SPDX-License-Identifier: Apache-2.0

//! Moderator - rule-based triage for issue trackers.
//!
//! Fetches GitHub issues, decides whether they meet the repository's
//! standards, previews the closing comment, and closes them on request.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;
mod provider;

pub use provider::CliTokenProvider;

use anyhow::{Context, Result};
use clap::Parser;
use moderator_core::config;
use tracing::debug;

use crate::cli::{Cli, OutputContext};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", errors::format_error(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet, cli.verbose);

    let config =
        config::load_config_from(cli.config.as_deref()).context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    if !config.ui.color {
        console::set_colors_enabled(false);
    }

    commands::run(cli.command, output_ctx, &config, cli.config.as_deref()).await
}
