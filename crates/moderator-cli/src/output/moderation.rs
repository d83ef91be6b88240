// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use moderator_core::{Action, Decision, IssueRecord};

use super::Renderable;
use super::common::{show_dry_run_message, styled_action, write_indented, write_list};
use crate::cli::OutputContext;
use crate::commands::types::{CheckResult, CloseOutcome, ModerateOutcome, ModerateResult};

/// Writes one issue's header, decision, reasons and comment preview.
fn write_decision(
    w: &mut dyn Write,
    label: &str,
    issue: &IssueRecord,
    decision: &Decision,
    ctx: &OutputContext,
) -> io::Result<()> {
    writeln!(w, "{}  {}", style(label).bold(), issue.title)?;
    writeln!(
        w,
        "  {} {}  {} {}",
        style("action:").dim(),
        styled_action(decision.action),
        style("category:").dim(),
        style(decision.category).cyan()
    )?;
    if ctx.verbose {
        writeln!(
            w,
            "  {} {}  {} {}",
            style("author:").dim(),
            issue.author,
            style("association:").dim(),
            issue.author_association
        )?;
    }
    write_list(w, "Reasons", &decision.reasons, "No reasons given")?;
    if let Some(comment) = &decision.comment {
        writeln!(w, "  {}", style("Comment preview").cyan().bold())?;
        write_indented(w, comment)?;
    }
    Ok(())
}

impl Renderable for CheckResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        let label = format!("{}#{}", self.issue.repo, self.issue.number);
        write_decision(w, &label, &self.issue, &self.decision, ctx)
    }

    /// Prints only the closing comment, exactly as it would be posted.
    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        if let Some(comment) = &self.decision.comment {
            writeln!(w, "{comment}")?;
        }
        Ok(())
    }
}

impl Renderable for ModerateResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        for outcome in &self.outcomes {
            writeln!(w)?;
            match outcome {
                ModerateOutcome::Decided { report, close } => {
                    let label = report.target.to_string();
                    write_decision(w, &label, &report.issue, &report.decision, ctx)?;
                    match close {
                        Some(CloseOutcome::Closed { comment_url }) => {
                            writeln!(w, "  {} {comment_url}", style("closed:").green())?;
                        }
                        Some(CloseOutcome::Declined) => {
                            writeln!(w, "  {}", style("not closed").yellow())?;
                        }
                        Some(CloseOutcome::Failed { error }) => {
                            writeln!(w, "  {} {error}", style("close failed:").red())?;
                        }
                        None => {}
                    }
                }
                ModerateOutcome::Failed { reference, error } => {
                    writeln!(w, "{}  {}", style(reference).bold(), style("failed").red())?;
                    writeln!(w, "    {error}")?;
                }
            }
        }

        if self.outcomes.len() > 1 {
            writeln!(w)?;
            writeln!(w, "{}", style("Moderation Summary").bold().green())?;
            writeln!(w, "{}", style("=".repeat(18)).dim())?;
            writeln!(w, "  Close: {}", style(self.count_action(Action::Close)).red())?;
            writeln!(w, "  Skip:  {}", style(self.count_action(Action::Skip)).yellow())?;
            writeln!(w, "  Pass:  {}", style(self.count_action(Action::None)).green())?;
            writeln!(w, "  Failed: {}", style(self.failures()).red())?;
        }

        if self.dry_run && self.count_action(Action::Close) > 0 && !ctx.quiet {
            writeln!(w)?;
            show_dry_run_message(w, "Dry run - no issues were closed. Re-run with --apply to close.")?;
        }
        Ok(())
    }

    /// One section per issue to close, holding the comment that would be posted.
    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        let reports = self
            .outcomes
            .iter()
            .filter_map(ModerateOutcome::report)
            .filter(|report| report.decision.is_close());
        for report in reports {
            if let Some(comment) = &report.decision.comment {
                writeln!(w, "## {}\n", report.target)?;
                writeln!(w, "{comment}\n")?;
            }
        }
        Ok(())
    }
}
