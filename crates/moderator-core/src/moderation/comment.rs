// SPDX-License-Identifier: Apache-2.0

//! Closing comments posted when an issue is closed.

use crate::issue::IssueRecord;

use super::Category;
use super::policy::Policy;

/// Renders the closing comment for `category`.
///
/// Categories that never close an issue render an empty string. The text has
/// no trailing newline.
#[must_use]
pub fn render_comment(
    policy: &Policy,
    issue: &IssueRecord,
    category: Category,
    reasons: &[String],
) -> String {
    let product = policy.product_name();
    let links = policy.links();
    let greeting = format!("Hi @{}, thanks for opening this issue.", issue.author);
    let reasons_block = |fallback: String| {
        if reasons.is_empty() {
            fallback
        } else {
            reasons
                .iter()
                .map(|reason| format!("- {reason}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
    };

    let lines: Vec<String> = match category {
        Category::Question => vec![
            greeting,
            String::new(),
            "### Why this is being closed".into(),
            "This issue tracker is reserved for actionable bugs/tasks. This report looks like a usage question.".into(),
            String::new(),
            "### Next steps".into(),
            "Please use the community channels instead:".into(),
            format!("- {}", links.forum),
            format!("- {}", links.discord),
            String::new(),
            "If this is actually a bug/task, please open a new issue with clear reproducible details.".into(),
            String::new(),
            format!("Thanks for understanding and for supporting {product}."),
        ],
        Category::Language => vec![
            greeting,
            String::new(),
            "### Why this is being closed".into(),
            format!(
                "{product} issue tracking requires English-only issue title and description for consistent collaboration."
            ),
            String::new(),
            "### Next steps".into(),
            "Please open a new issue in English and include clear details so maintainers can help efficiently.".into(),
            String::new(),
            "Thanks for understanding and for your support.".into(),
        ],
        Category::Unclear => vec![
            greeting,
            String::new(),
            "### Why this is being closed".into(),
            "We could not extract an actionable task from the current report.".into(),
            String::new(),
            reasons_block("- The issue content is not clear enough to triage.".into()),
            String::new(),
            "### Next steps".into(),
            "Please open a new issue that includes:".into(),
            "- A clear problem statement".into(),
            "- Reproducible steps or concrete scope".into(),
            "- Expected result".into(),
            "- Actual result and logs/screenshots when available".into(),
            String::new(),
            "Thanks for understanding and for helping keep the issue tracker actionable.".into(),
        ],
        Category::OutdatedVersion => vec![
            greeting,
            String::new(),
            "### Why this is being closed".into(),
            format!("This report targets an outdated {product} version."),
            String::new(),
            reasons_block(format!(
                "- Reported {product} version is below v{}.",
                policy.min_version()
            )),
            String::new(),
            "### Next steps".into(),
            format!(
                "Please upgrade to the latest {product} release and retest. If the issue still occurs on the latest version, open a new issue with updated details."
            ),
            String::new(),
            format!("Thanks for understanding and for supporting {product}."),
        ],
        Category::CoreStandards => vec![
            greeting,
            String::new(),
            "### Why this is being closed".into(),
            format!(
                "This report does not yet meet the required issue standard for `{}`.",
                issue.repo
            ),
            String::new(),
            reasons_block("- Required issue details are missing.".into()),
            String::new(),
            "### Relevant guidelines".into(),
            format!("- Bug report template: {}", links.bug_template),
            format!("- Code of Conduct / Language Policy: {}", links.code_of_conduct),
            format!("- Contributing guide: {}", links.contributing),
            String::new(),
            "### Next steps".into(),
            "Please open a new issue in English and include all required details from the bug template/contributing guide.".into(),
            String::new(),
            "Thanks for understanding and for your contribution.".into(),
        ],
        Category::UnsupportedRepo
        | Category::NotOpen
        | Category::LinkedPr
        | Category::TrustedAuthor
        | Category::Pass => return String::new(),
    };

    lines.join("\n")
}
