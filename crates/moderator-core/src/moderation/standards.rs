// SPDX-License-Identifier: Apache-2.0

//! Content standards for core-like repositories.
//!
//! Violations accumulate: every rule is checked and each failing rule adds
//! its message once, in a fixed order.

use crate::issue::IssueRecord;

use super::patterns::{Patterns, ProductPatterns, any_match};
use super::quality::is_weak_title;
use super::text::{char_len, collapse_whitespace, dedupe, is_no_response};

/// Minimum normalized title length.
const MIN_TITLE_CHARS: usize = 12;
/// Minimum normalized body length.
const MIN_BODY_CHARS: usize = 120;
/// Minimum length of the feature template's problem story.
const MIN_STORY_CHARS: usize = 60;

const BUG_LABELS: [&str; 1] = ["bug"];
const FEATURE_LABELS: [&str; 2] = ["feature", "enhancement"];
const FEATURE_MARKERS: [&str; 5] = [
    "feature request",
    "feature",
    "enhancement",
    "proposal",
    "suggestion",
];
const USE_CASE_MARKERS: [&str; 5] = [
    "use case",
    "scenario",
    "business value",
    "why this is needed",
    "motivation",
];

/// Violation: weak title.
pub const UNCLEAR_TITLE: &str = "Use a clear and descriptive issue title.";
/// Violation: body too short.
pub const SHORT_DESCRIPTION: &str = "Provide a detailed issue description with enough context.";
/// Violation: code of conduct.
pub const DISRESPECTFUL: &str = "Use respectful, professional language (Code of Conduct).";
/// Violation: bug report without actual behavior or logs.
pub const MISSING_ACTUAL: &str = "Include actual behavior and logs/error details when possible.";
/// Violation: feature request without a use case.
pub const MISSING_USE_CASE: &str = "Describe the feature use case and expected value.";

/// Returns true if the issue reports a defect.
#[must_use]
pub fn is_bug_like(issue: &IssueRecord) -> bool {
    issue.has_any_label(&BUG_LABELS)
        || Patterns::global()
            .bug_markers
            .is_match(&format!("{}\n{}", issue.title, issue.body))
}

/// Returns true if the issue asks for a feature.
#[must_use]
pub fn is_feature_like(issue: &IssueRecord) -> bool {
    if issue.has_any_label(&FEATURE_LABELS) {
        return true;
    }
    let combined = format!("{}\n{}", issue.title, issue.body).to_lowercase();
    FEATURE_MARKERS.iter().any(|marker| combined.contains(marker))
}

/// Returns the answer to the feature template's first question, if present.
///
/// The answer starts after the first blank line following the question and
/// runs to the second question's heading or the end of the body.
#[must_use]
pub fn extract_feature_story(body: &str) -> &str {
    let patterns = Patterns::global();
    let Some(start) = patterns.feature_story_start.find(body) else {
        return "";
    };
    let rest = &body[start.end()..];
    let end = patterns
        .feature_story_end
        .find(rest)
        .map_or(rest.len(), |m| m.start());
    rest[..end].trim()
}

/// Returns true if a feature request explains itself well enough on its own.
#[must_use]
pub fn feature_request_quality(issue: &IssueRecord) -> bool {
    let body_clean = collapse_whitespace(&issue.body);
    if body_clean.is_empty() {
        return false;
    }

    let story = collapse_whitespace(extract_feature_story(&issue.body));
    if !story.is_empty() && !is_no_response(&story) && char_len(&story) >= MIN_STORY_CHARS {
        return true;
    }

    let body_lower = issue.body.to_lowercase();
    if body_lower.contains("example") && body_lower.contains("expected") {
        return true;
    }

    Patterns::global().action_verbs.is_match(&body_lower) && char_len(&body_clean) >= MIN_BODY_CHARS
}

/// Lists the standards `issue` violates, in a fixed order and without duplicates.
///
/// `product_name` and `product` name the product whose version a bug report
/// must state.
#[must_use]
pub fn standard_violations(
    issue: &IssueRecord,
    product_name: &str,
    product: &ProductPatterns,
) -> Vec<String> {
    let patterns = Patterns::global();
    let mut violations = Vec::new();

    let title = collapse_whitespace(&issue.title);
    let body_clean = collapse_whitespace(&issue.body);
    let body_lower = issue.body.to_lowercase();

    if is_weak_title(&title, MIN_TITLE_CHARS) {
        violations.push(UNCLEAR_TITLE.to_string());
    }

    if char_len(&body_clean) < MIN_BODY_CHARS {
        violations.push(SHORT_DESCRIPTION.to_string());
    }

    if patterns
        .disrespectful
        .is_match(&format!("{}\n{}", issue.title, issue.body))
    {
        violations.push(DISRESPECTFUL.to_string());
    }

    if is_bug_like(issue) {
        let version_label = format!("{product_name} version");
        let required = [
            (version_label.as_str(), product.version_mention.as_slice()),
            ("deployment mode (Cloud or Self Hosted)", patterns.deployment_mode.as_slice()),
            ("steps to reproduce", patterns.reproduction_steps.as_slice()),
            ("expected behavior", patterns.expected_behavior.as_slice()),
        ];
        for (label, evidence) in required {
            if !any_match(evidence, &body_lower) {
                violations.push(format!("Include {label}."));
            }
        }
        if !any_match(&patterns.actual_behavior, &body_lower) {
            violations.push(MISSING_ACTUAL.to_string());
        }
    }

    if is_feature_like(issue)
        && !USE_CASE_MARKERS.iter().any(|marker| body_lower.contains(marker))
        && !feature_request_quality(issue)
    {
        violations.push(MISSING_USE_CASE.to_string());
    }

    dedupe(violations)
}
