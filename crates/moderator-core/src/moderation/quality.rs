// SPDX-License-Identifier: Apache-2.0

//! Clarity analysis for plugin-repository issues.
//!
//! Produces the reasons an issue is too vague to act on. An empty list means
//! the issue is clear enough.

use crate::issue::IssueRecord;

use super::patterns::Patterns;
use super::text::{
    char_len, collapse_whitespace, dedupe, effective_content, extract_template_sections,
    is_no_response,
};

/// Minimum normalized title length.
const MIN_TITLE_CHARS: usize = 8;
/// Effective content shorter than this is too short to understand.
const MIN_CONTENT_CHARS: usize = 60;
/// Effective content shorter than this needs detail markers to compensate.
const DETAILED_CONTENT_CHARS: usize = 180;
/// Detail markers required when the content is short.
const MIN_DETAIL_MARKERS: usize = 2;

/// Words that indicate concrete detail in a report.
const DETAIL_MARKERS: [&str; 10] = [
    "steps",
    "reproduce",
    "expected",
    "actual",
    "error",
    "log",
    "screenshot",
    "use case",
    "environment",
    "version",
];

/// Reason: weak title.
pub const TITLE_TOO_SHORT: &str = "Title is too short or generic.";
/// Reason: nothing but whitespace in the body.
pub const DESCRIPTION_EMPTY: &str = "Description is empty.";
/// Reason: too little effective content.
pub const DESCRIPTION_TOO_SHORT: &str = "Description is too short to understand the task.";
/// Reason: placeholder words instead of details.
pub const PLACEHOLDERS: &str = "Description contains placeholders instead of concrete details.";
/// Reason: template left unanswered.
pub const SECTIONS_EMPTY: &str = "Almost all template sections are empty or marked _No response_.";
/// Reason: short and without detail markers.
pub const LACKS_CONTEXT: &str = "Description lacks enough concrete context for maintainers.";

/// Returns true if the normalized title is shorter than `min_chars` or generic.
pub(crate) fn is_weak_title(title: &str, min_chars: usize) -> bool {
    char_len(title) < min_chars || Patterns::global().generic_title.is_match(title)
}

/// Lists why `issue` is unclear, in a fixed order and without duplicates.
#[must_use]
pub fn unclear_reasons(issue: &IssueRecord) -> Vec<String> {
    let patterns = Patterns::global();
    let mut reasons = Vec::new();

    let title = collapse_whitespace(&issue.title);
    let body = collapse_whitespace(&issue.body);

    if is_weak_title(&title, MIN_TITLE_CHARS) {
        reasons.push(TITLE_TOO_SHORT.to_string());
    }

    if body.is_empty() {
        reasons.push(DESCRIPTION_EMPTY.to_string());
        return reasons;
    }

    let content_len = char_len(&effective_content(&issue.body));
    if content_len < MIN_CONTENT_CHARS {
        reasons.push(DESCRIPTION_TOO_SHORT.to_string());
    }

    if patterns.placeholder.is_match(&body) {
        reasons.push(PLACEHOLDERS.to_string());
    }

    let sections = extract_template_sections(&issue.body);
    if !sections.is_empty() {
        let filled = sections
            .iter()
            .map(|section| collapse_whitespace(&section.content))
            .filter(|content| !content.is_empty() && !is_no_response(content))
            .count();
        if filled <= 1 {
            reasons.push(SECTIONS_EMPTY.to_string());
        }
    }

    let body_lower = body.to_lowercase();
    let marker_hits = DETAIL_MARKERS
        .iter()
        .filter(|marker| body_lower.contains(*marker))
        .count();
    if content_len < DETAILED_CONTENT_CHARS && marker_hits < MIN_DETAIL_MARKERS {
        reasons.push(LACKS_CONTEXT.to_string());
    }

    dedupe(reasons)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(title: &str, body: &str) -> IssueRecord {
        IssueRecord::builder()
            .repo("langgenius/dify-plugins")
            .number(1)
            .title(title)
            .body(body)
            .build()
    }

    #[test]
    fn empty_body_is_terminal() {
        let reasons = unclear_reasons(&issue("Bug", "   "));
        assert_eq!(reasons, vec![TITLE_TOO_SHORT, DESCRIPTION_EMPTY]);
    }

    #[test]
    fn generic_title_with_good_body() {
        let body = "The OpenAI plugin raises an error when the API key contains a trailing \
                    newline. Steps: paste the key, save, run a workflow. Expected the run to \
                    succeed, actual result is a 401 error with the log attached below.";
        let reasons = unclear_reasons(&issue("not working", body));
        assert_eq!(reasons, vec![TITLE_TOO_SHORT]);
    }

    #[test]
    fn short_vague_body() {
        let reasons = unclear_reasons(&issue("Plugin upload problem", "It does not work, TBD"));
        assert_eq!(
            reasons,
            vec![DESCRIPTION_TOO_SHORT, PLACEHOLDERS, LACKS_CONTEXT]
        );
    }

    #[test]
    fn template_with_single_filled_section() {
        let body = "### Self Checks\n- [x] I have searched existing issues\n\
                    ### Steps to reproduce\n_No response_\n\
                    ### Expected\n_No response_";
        let reasons = unclear_reasons(&issue("Plugin upload fails silently", body));
        assert!(reasons.contains(&SECTIONS_EMPTY.to_string()));
    }

    #[test]
    fn two_filled_sections_are_enough() {
        let body = "### Steps to reproduce\nUpload the plugin package from the marketplace page \
                    and wait for the installation to finish.\n\
                    ### Expected\nThe plugin shows up in the list; actual: an error toast with log id 42.";
        let reasons = unclear_reasons(&issue("Plugin upload fails silently", body));
        assert!(reasons.is_empty(), "unexpected reasons: {reasons:?}");
    }

    #[test]
    fn placeholder_is_whole_word() {
        let body = "The node configuration panel freezes after selecting a tool, steps and \
                    expected output are attached, nothing else happens on screen.";
        let reasons = unclear_reasons(&issue("Node panel freezes", body));
        assert!(!reasons.contains(&PLACEHOLDERS.to_string()));
    }
}
