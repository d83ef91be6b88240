// SPDX-License-Identifier: Apache-2.0

//! Fetch issues, decide on them, and optionally close them.

use anyhow::{Context, Result};
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use moderator_core::{
    IssueTarget, ModerationReport, ModerationSession, UiConfig, parse_issue_reference,
};
use tracing::{debug, instrument, warn};

use super::types::{CloseOutcome, ModerateOutcome, ModerateResult};
use crate::cli::OutputContext;

/// Parses every reference up front so a typo fails before any network call.
pub fn parse_targets(references: &[String], repo: Option<&str>) -> Result<Vec<IssueTarget>> {
    references
        .iter()
        .map(|reference| parse_issue_reference(reference, repo).map_err(anyhow::Error::from))
        .collect()
}

/// Progress bar for several references (only if interactive).
fn maybe_progress(ctx: &OutputContext, total: usize) -> Option<ProgressBar> {
    if ctx.is_interactive() && total > 1 {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{pos}/{len}] {msg}")
                .expect("Invalid progress template"),
        );
        Some(bar)
    } else {
        None
    }
}

/// Fetches and decides on every target. Failures are recorded per target.
#[instrument(skip_all, fields(count = targets.len()))]
pub async fn run(
    session: &ModerationSession,
    targets: Vec<IssueTarget>,
    ctx: &OutputContext,
) -> ModerateResult {
    let progress = maybe_progress(ctx, targets.len());
    let results = session
        .moderate_all(targets, |current, _total, message| {
            if let Some(bar) = &progress {
                bar.set_position(current as u64);
                bar.set_message(message.to_string());
            }
        })
        .await;
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let outcomes = results
        .into_iter()
        .map(|(target, result)| match result {
            Ok(report) => ModerateOutcome::Decided {
                report: Box::new(report),
                close: None,
            },
            Err(e) => ModerateOutcome::Failed {
                reference: target.to_string(),
                error: format!("{e:#}"),
            },
        })
        .collect();

    ModerateResult {
        outcomes,
        dry_run: true,
    }
}

/// Asks whether to close one issue.
fn confirm_close(report: &ModerationReport) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!(
            "Close {} as not planned ({})?",
            report.target, report.decision.category
        ))
        .default(false)
        .interact()
        .context("Failed to get user confirmation")
}

/// Closes every issue whose decision is `close`, recording each attempt.
///
/// Without `--yes`, issues are only closed after an interactive confirmation
/// (unless `ui.confirm_before_close` is off). A non-interactive run without
/// `--yes` closes nothing.
pub async fn apply(
    session: &ModerationSession,
    result: &mut ModerateResult,
    ctx: &OutputContext,
    ui: &UiConfig,
    yes: bool,
) -> Result<()> {
    result.dry_run = false;
    let needs_prompt = !yes && ui.confirm_before_close;

    for outcome in &mut result.outcomes {
        let ModerateOutcome::Decided { report, close } = outcome else {
            continue;
        };
        if !report.decision.is_close() {
            continue;
        }

        let approved = if !needs_prompt {
            true
        } else if ctx.is_interactive() {
            confirm_close(report)?
        } else {
            debug!(issue = %report.target, "Not closing without --yes in a non-interactive run");
            false
        };
        if !approved {
            *close = Some(CloseOutcome::Declined);
            continue;
        }

        *close = Some(match session.apply(report).await {
            Ok(Some(comment_url)) => {
                if ctx.is_text() {
                    println!(
                        "{} {}  {}",
                        style("Closed").green().bold(),
                        report.target,
                        style(&comment_url).cyan().underlined()
                    );
                }
                CloseOutcome::Closed { comment_url }
            }
            Ok(None) => continue,
            Err(e) => {
                warn!(issue = %report.target, error = %e, "Failed to close issue");
                CloseOutcome::Failed {
                    error: format!("{e:#}"),
                }
            }
        });
    }

    Ok(())
}
