// SPDX-License-Identifier: Apache-2.0

//! Result types returned by command handlers.
//!
//! Handlers return data; the output module decides how it is printed.

use moderator_core::{Action, Decision, IssueRecord, ModerationReport, Policy, RepoClass};
use serde::Serialize;

/// What happened when `--apply` tried to close an issue.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CloseOutcome {
    /// The comment was posted and the issue closed.
    Closed {
        /// URL of the closing comment.
        comment_url: String,
    },
    /// The user declined, or confirmation was impossible without `--yes`.
    Declined,
    /// Commenting or closing failed.
    Failed {
        /// Error message.
        error: String,
    },
}

/// Outcome for one issue reference.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModerateOutcome {
    /// The issue was fetched and a decision reached.
    Decided {
        /// Issue, decision and target.
        report: Box<ModerationReport>,
        /// Close attempt, present only with `--apply` and a `close` decision.
        #[serde(skip_serializing_if = "Option::is_none")]
        close: Option<CloseOutcome>,
    },
    /// The issue could not be fetched.
    Failed {
        /// The reference that failed.
        reference: String,
        /// Error message.
        error: String,
    },
}

impl ModerateOutcome {
    /// Returns the report if the issue was fetched.
    pub fn report(&self) -> Option<&ModerationReport> {
        match self {
            ModerateOutcome::Decided { report, .. } => Some(report.as_ref()),
            ModerateOutcome::Failed { .. } => None,
        }
    }

    /// Returns true if fetching or closing failed.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ModerateOutcome::Failed { .. }
                | ModerateOutcome::Decided {
                    close: Some(CloseOutcome::Failed { .. }),
                    ..
                }
        )
    }
}

/// Result from the `issue moderate` command.
#[derive(Debug, Clone, Serialize)]
pub struct ModerateResult {
    /// One outcome per reference, in the order given.
    pub outcomes: Vec<ModerateOutcome>,
    /// True unless `--apply` was given.
    pub dry_run: bool,
}

impl ModerateResult {
    /// Number of outcomes whose decision has `action`.
    pub fn count_action(&self, action: Action) -> usize {
        self.outcomes
            .iter()
            .filter_map(ModerateOutcome::report)
            .filter(|report| report.decision.action == action)
            .count()
    }

    /// Number of references that failed to fetch or close.
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }
}

/// Result from the `issue check` command.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// The issue as read from the file.
    pub issue: IssueRecord,
    /// The engine's decision.
    pub decision: Decision,
}

/// Rule order for one repository class.
#[derive(Debug, Clone, Serialize)]
pub struct RuleTable {
    /// Repository class.
    pub class: RepoClass,
    /// Rule names, in evaluation order.
    pub rules: Vec<&'static str>,
}

/// Result from the `policy show` command.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyResult {
    /// Config file consulted for this run.
    pub config_path: String,
    /// The validated policy.
    pub policy: Policy,
    /// Rule tables per repository class.
    pub rule_tables: Vec<RuleTable>,
}
