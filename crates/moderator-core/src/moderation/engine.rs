// SPDX-License-Identifier: Apache-2.0

//! The decision engine.
//!
//! Two gates run first: the repository must be moderated and the issue must
//! be open. After that the repository class selects an ordered rule table.
//! The first rule that fires decides; if none fires the issue passes.

use tracing::debug;

use crate::issue::IssueRecord;

use super::comment::render_comment;
use super::language::{issue_cjk_ratio, language_reason};
use super::policy::{Policy, RepoClass};
use super::quality::unclear_reasons;
use super::question::looks_like_question;
use super::standards::standard_violations;
use super::version::extract_version;
use super::{Action, Category, Decision};

const PLUGIN_PASS: &str = "Issue appears actionable and follows repository moderation rules.";
const CORE_PASS: &str = "Issue meets baseline moderation and quality standards.";

/// Per-issue signals computed once before the rule table runs.
struct Signals<'a> {
    issue: &'a IssueRecord,
    class: RepoClass,
    cjk_ratio: f64,
    is_question: bool,
}

/// What a rule decided, before the comment is rendered.
struct Verdict {
    action: Action,
    category: Category,
    reasons: Vec<String>,
}

impl Verdict {
    fn close(category: Category, reasons: Vec<String>) -> Self {
        Self {
            action: Action::Close,
            category,
            reasons,
        }
    }

    fn skip(category: Category, reason: String) -> Self {
        Self {
            action: Action::Skip,
            category,
            reasons: vec![reason],
        }
    }
}

/// A named moderation rule.
struct Rule {
    name: &'static str,
    check: fn(&Policy, &Signals<'_>) -> Option<Verdict>,
}

const PLUGIN_RULES: &[Rule] = &[
    Rule {
        name: "language",
        check: language,
    },
    Rule {
        name: "question",
        check: plugin_question,
    },
    Rule {
        name: "unclear",
        check: unclear,
    },
];

const CORE_RULES: &[Rule] = &[
    Rule {
        name: "linked-pr",
        check: linked_pr,
    },
    Rule {
        name: "trusted-author",
        check: trusted_author,
    },
    Rule {
        name: "language",
        check: language,
    },
    Rule {
        name: "question",
        check: core_question,
    },
    Rule {
        name: "outdated-version",
        check: outdated_version,
    },
    Rule {
        name: "core-standards",
        check: core_standards,
    },
];

fn language(policy: &Policy, signals: &Signals<'_>) -> Option<Verdict> {
    let threshold = policy.cjk_ratio_threshold();
    (signals.cjk_ratio >= threshold).then(|| {
        Verdict::close(
            Category::Language,
            vec![language_reason(signals.cjk_ratio, threshold)],
        )
    })
}

fn plugin_question(_: &Policy, signals: &Signals<'_>) -> Option<Verdict> {
    signals.is_question.then(|| {
        Verdict::close(
            Category::Question,
            vec!["Issue appears to be a question rather than an actionable task.".to_string()],
        )
    })
}

fn core_question(_: &Policy, signals: &Signals<'_>) -> Option<Verdict> {
    signals.is_question.then(|| {
        Verdict::close(
            Category::Question,
            vec!["Issue appears to be a question rather than an actionable bug/task.".to_string()],
        )
    })
}

fn unclear(_: &Policy, signals: &Signals<'_>) -> Option<Verdict> {
    let reasons = unclear_reasons(signals.issue);
    (!reasons.is_empty()).then(|| Verdict::close(Category::Unclear, reasons))
}

fn linked_pr(_: &Policy, signals: &Signals<'_>) -> Option<Verdict> {
    let count = signals.issue.linked_prs.len();
    (count > 0).then(|| {
        Verdict::skip(
            Category::LinkedPr,
            format!("Issue has {count} linked PR(s); skip review per policy."),
        )
    })
}

fn trusted_author(_: &Policy, signals: &Signals<'_>) -> Option<Verdict> {
    let association = &signals.issue.author_association;
    association.is_trusted().then(|| {
        Verdict::skip(
            Category::TrustedAuthor,
            format!("Author association is {association}; skip review per policy."),
        )
    })
}

fn outdated_version(policy: &Policy, signals: &Signals<'_>) -> Option<Verdict> {
    if signals.class != RepoClass::Flagship {
        return None;
    }
    let reported = extract_version(&signals.issue.body, policy.product_patterns())?;
    let minimum = policy.min_version();
    (reported < minimum).then(|| {
        Verdict::close(
            Category::OutdatedVersion,
            vec![format!(
                "Reported {} version is v{reported}, which is below v{minimum}.",
                policy.product_name()
            )],
        )
    })
}

fn core_standards(policy: &Policy, signals: &Signals<'_>) -> Option<Verdict> {
    let violations = standard_violations(
        signals.issue,
        policy.product_name(),
        policy.product_patterns(),
    );
    (!violations.is_empty()).then(|| Verdict::close(Category::CoreStandards, violations))
}

fn rules_for(class: RepoClass) -> (&'static [Rule], &'static str) {
    match class {
        RepoClass::Plugin => (PLUGIN_RULES, PLUGIN_PASS),
        RepoClass::Flagship | RepoClass::Companion => (CORE_RULES, CORE_PASS),
    }
}

/// Moderates issues against a fixed [`Policy`].
///
/// Cheap to share: wrap it in an `Arc` to use it from several tasks.
#[derive(Debug, Clone, Default)]
pub struct Moderator {
    policy: Policy,
}

impl Moderator {
    /// Creates an engine for `policy`.
    #[must_use]
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    /// The policy this engine applies.
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Names of the rules applied to `class`, in evaluation order.
    #[must_use]
    pub fn rule_names(class: RepoClass) -> Vec<&'static str> {
        rules_for(class).0.iter().map(|rule| rule.name).collect()
    }

    /// Decides what to do with `issue`.
    #[must_use]
    pub fn decide(&self, issue: &IssueRecord) -> Decision {
        let Some(class) = self.policy.repo_class(&issue.repo) else {
            return Decision::skip(
                Category::UnsupportedRepo,
                format!("Repository '{}' is not supported by this moderator.", issue.repo),
            );
        };

        if !issue.state.is_open() {
            return Decision::skip(
                Category::NotOpen,
                format!("Issue state is {}. No moderation action required.", issue.state),
            );
        }

        let signals = Signals {
            issue,
            class,
            cjk_ratio: issue_cjk_ratio(issue),
            is_question: looks_like_question(issue),
        };

        let (rules, pass_reason) = rules_for(class);
        for rule in rules {
            if let Some(verdict) = (rule.check)(&self.policy, &signals) {
                debug!(
                    repo = %issue.repo,
                    number = issue.number,
                    rule = rule.name,
                    category = %verdict.category,
                    "Moderation rule matched"
                );
                return self.finish(issue, verdict);
            }
        }

        debug!(repo = %issue.repo, number = issue.number, "No moderation rule matched");
        Decision::pass(pass_reason)
    }

    fn finish(&self, issue: &IssueRecord, verdict: Verdict) -> Decision {
        let comment = (verdict.action == Action::Close)
            .then(|| render_comment(&self.policy, issue, verdict.category, &verdict.reasons));
        Decision {
            action: verdict.action,
            category: verdict.category,
            reasons: verdict.reasons,
            comment,
        }
    }
}
