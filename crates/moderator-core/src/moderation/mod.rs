// SPDX-License-Identifier: Apache-2.0

//! Issue moderation: content classifiers and the decision engine.
//!
//! The engine takes one [`IssueRecord`] and a [`Policy`] and returns exactly
//! one [`Decision`]. It never performs I/O and never fails.
//!
//! # Example
//!
//! ```
//! use moderator_core::{Action, Category, IssueRecord, IssueState, Moderator, Policy};
//!
//! let issue = IssueRecord::builder()
//!     .repo("langgenius/dify-plugins")
//!     .number(1)
//!     .title("How do I configure the plugin?")
//!     .state(IssueState::Open)
//!     .build();
//!
//! let decision = Moderator::new(Policy::default()).decide(&issue);
//! assert_eq!(decision.action, Action::Close);
//! assert_eq!(decision.category, Category::Question);
//! ```

pub mod comment;
pub mod engine;
pub mod language;
pub mod patterns;
pub mod policy;
pub mod quality;
pub mod question;
pub mod standards;
pub mod text;
pub mod version;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::issue::IssueRecord;

pub use engine::Moderator;
pub use policy::{Policy, RepoClass};
pub use version::Version;

/// What to do with an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Out of scope for moderation; leave the issue alone.
    Skip,
    /// Close the issue as not planned with a comment.
    Close,
    /// The issue passed every check.
    None,
}

impl Action {
    /// Lower-case name, as used in JSON output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Skip => "skip",
            Action::Close => "close",
            Action::None => "none",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// The repository is not moderated.
    UnsupportedRepo,
    /// The issue is not open.
    NotOpen,
    /// The issue is not written in English.
    Language,
    /// The issue is a usage question.
    Question,
    /// The issue is too vague to act on (plugin repositories).
    Unclear,
    /// The issue reports an unsupported product version (flagship repository).
    OutdatedVersion,
    /// The issue misses required details (core-like repositories).
    CoreStandards,
    /// A pull request already addresses the issue.
    LinkedPr,
    /// The author is a maintainer or established contributor.
    TrustedAuthor,
    /// The issue passed every check.
    Pass,
}

impl Category {
    /// Kebab-case name, as used in JSON output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::UnsupportedRepo => "unsupported-repo",
            Category::NotOpen => "not-open",
            Category::Language => "language",
            Category::Question => "question",
            Category::Unclear => "unclear",
            Category::OutdatedVersion => "outdated-version",
            Category::CoreStandards => "core-standards",
            Category::LinkedPr => "linked-pr",
            Category::TrustedAuthor => "trusted-author",
            Category::Pass => "pass",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of moderating one issue.
///
/// A `close` decision always carries at least one reason and a comment;
/// other actions never carry a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// What to do.
    pub action: Action,
    /// Why.
    pub category: Category,
    /// Human-readable reasons, in the order they were found.
    pub reasons: Vec<String>,
    /// Closing comment, present only for `close`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Decision {
    /// A decision that leaves the issue untouched.
    pub(crate) fn skip(category: Category, reason: String) -> Self {
        Self {
            action: Action::Skip,
            category,
            reasons: vec![reason],
            comment: None,
        }
    }

    /// A passing decision.
    pub(crate) fn pass(reason: &str) -> Self {
        Self {
            action: Action::None,
            category: Category::Pass,
            reasons: vec![reason.to_string()],
            comment: None,
        }
    }

    /// Returns true if the issue should be closed.
    #[must_use]
    pub fn is_close(&self) -> bool {
        self.action == Action::Close
    }

    /// Returns the close instruction for a `close` decision.
    #[must_use]
    pub fn close_directive(&self, issue: &IssueRecord) -> Option<CloseDirective> {
        if !self.is_close() {
            return None;
        }
        self.comment.as_ref().map(|comment| CloseDirective {
            repo: issue.repo.clone(),
            number: issue.number,
            reason: CloseReason::NotPlanned,
            comment: comment.clone(),
        })
    }
}

/// State reason recorded when closing an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloseReason {
    /// Closed as not planned.
    NotPlanned,
}

/// Instruction to close one issue with a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseDirective {
    /// Repository in `owner/name` form.
    pub repo: String,
    /// Issue number.
    pub number: u64,
    /// State reason recorded on close.
    pub reason: CloseReason,
    /// Comment posted before closing.
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(Category::OutdatedVersion).unwrap(),
            "outdated-version"
        );
        assert_eq!(Category::LinkedPr.to_string(), "linked-pr");
    }

    #[test]
    fn action_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Action::None).unwrap(), "none");
        assert_eq!(Action::Close.to_string(), "close");
    }

    #[test]
    fn close_directive_only_for_close() {
        let issue = IssueRecord::builder().repo("langgenius/dify").number(9).build();
        let close = Decision {
            action: Action::Close,
            category: Category::Question,
            reasons: vec!["r".to_string()],
            comment: Some("bye".to_string()),
        };
        let directive = close.close_directive(&issue).unwrap();
        assert_eq!(directive.number, 9);
        assert_eq!(directive.reason, CloseReason::NotPlanned);

        let pass = Decision::pass("ok");
        assert!(pass.close_directive(&issue).is_none());
    }

    #[test]
    fn comment_omitted_from_json_when_absent() {
        let value = serde_json::to_value(Decision::pass("ok")).unwrap();
        assert!(value.get("comment").is_none());
        assert_eq!(value["category"], "pass");
    }
}
