// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the moderator CLI.

pub mod check;
pub mod moderate;
pub mod policy;
pub mod types;

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use moderator_core::{AppConfig, ModerationSession};
use tracing::debug;

use crate::CliTokenProvider;
use crate::cli::{Commands, IssueCommand, OutputContext, PolicyCommand};
use crate::output;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if ctx.is_interactive() {
        let s = ProgressBar::new_spinner();
        s.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid spinner template"),
        );
        s.set_message(message.to_string());
        s.enable_steady_tick(Duration::from_millis(100));
        Some(s)
    } else {
        None
    }
}

/// Dispatch to the appropriate command handler.
pub async fn run(
    command: Commands,
    ctx: OutputContext,
    config: &AppConfig,
    config_path: Option<&Path>,
) -> Result<()> {
    match command {
        Commands::Issue(IssueCommand::Moderate {
            references,
            repo,
            apply,
            yes,
        }) => {
            // Reject malformed references before touching the network.
            let targets = moderate::parse_targets(&references, repo.as_deref())?;
            let session = ModerationSession::new(&CliTokenProvider, config)?;

            let spinner = (targets.len() == 1)
                .then(|| maybe_spinner(&ctx, "Fetching issue..."))
                .flatten();
            let mut result = moderate::run(&session, targets, &ctx).await;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }

            // Text output shows the preview before any confirmation prompt;
            // structured output is printed once, after closing.
            if ctx.is_text() {
                output::render(&result, &ctx)?;
            }
            if apply {
                moderate::apply(&session, &mut result, &ctx, &config.ui, yes).await?;
            }
            if !ctx.is_text() {
                output::render(&result, &ctx)?;
            }

            let failures = result.failures();
            if failures > 0 {
                anyhow::bail!(
                    "{failures} of {} issue(s) could not be moderated",
                    result.outcomes.len()
                );
            }
            Ok(())
        }

        Commands::Issue(IssueCommand::Check { file }) => {
            let result = check::run(&file, config)?;
            debug!(category = %result.decision.category, "Checked issue file");
            output::render(&result, &ctx)
        }

        Commands::Policy(PolicyCommand::Show) => {
            let result = policy::run(config, config_path)?;
            output::render(&result, &ctx)
        }
    }
}
