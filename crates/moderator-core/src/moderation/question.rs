// SPDX-License-Identifier: Apache-2.0

//! Usage-question detection.

use crate::issue::IssueRecord;

use super::patterns::Patterns;
use super::text::collapse_whitespace;

/// Labels that mark an issue as a question.
const QUESTION_LABELS: [&str; 2] = ["question", "support"];

/// Number of body lines inspected for question phrasing.
const BODY_LEAD_LINES: usize = 10;

/// Phrases that open a usage question.
const BODY_MARKERS: [&str; 19] = [
    "how to ",
    "what is ",
    "can i ",
    "could i ",
    "any idea",
    "anyone know",
    "need help",
    "i want to know",
    "please tell me",
    "i'm wondering",
    "i am wondering",
    "is there a way",
    "is it possible",
    "does anyone",
    "has anyone",
    "please help",
    "how can i",
    "how do i",
    "where can i",
];

/// Returns true if the issue reads as a usage question rather than a task.
#[must_use]
pub fn looks_like_question(issue: &IssueRecord) -> bool {
    if issue.has_any_label(&QUESTION_LABELS) {
        return true;
    }

    let title = issue.title.trim();
    if title.contains('?') || title.contains('？') {
        return true;
    }
    if Patterns::global().question_start.is_match(title) {
        return true;
    }

    let lead = issue
        .body
        .lines()
        .take(BODY_LEAD_LINES)
        .collect::<Vec<_>>()
        .join("\n");
    let lead = collapse_whitespace(&lead).to_lowercase();
    BODY_MARKERS.iter().any(|marker| lead.contains(marker))
}
