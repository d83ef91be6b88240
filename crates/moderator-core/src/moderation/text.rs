// SPDX-License-Identifier: Apache-2.0

//! Text normalization helpers shared by the classifiers.
//!
//! Issue bodies arrive as raw markdown, usually produced from a GitHub issue
//! form. These helpers collapse whitespace, split the body into template
//! sections, and remove the boilerplate a form always contains so that the
//! classifiers look at what the author actually wrote.

use super::patterns::Patterns;

/// Checklist snippets that issue forms render in Chinese even for English reports.
const CHECKLIST_SNIPPETS: [&str; 2] = [
    "我已阅读并同意",
    "请务必使用英文提交 Issue，否则会被关闭。谢谢！:)",
];

/// What remains of a checklist line once its snippets are removed, when the line carries nothing else.
const BARE_CHECKBOXES: [&str; 7] = ["- [x]", "- [ ]", "- [X]", "* [x]", "* [ ]", "* [X]", ""];

/// Section headings that hold the form's acknowledgment checklist.
const CHECKLIST_HEADINGS: [&str; 2] = ["self checks", "self check"];

/// Values the issue forms use for an unanswered field.
pub const NO_RESPONSE_VALUES: [&str; 4] = ["_no response_", "n/a", "na", "none"];

/// A markdown section of an issue body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading text without the leading `#` markers.
    pub heading: String,
    /// Everything up to the next heading, trimmed.
    pub content: String,
}

/// Replaces every run of whitespace with a single space and trims the result.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the number of characters in `text`.
#[must_use]
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Returns true if `text` is one of the "no response" sentinels (case-insensitive).
#[must_use]
pub fn is_no_response(text: &str) -> bool {
    let lowered = text.to_lowercase();
    NO_RESPONSE_VALUES.contains(&lowered.as_str())
}

/// Returns the fence character and run length if `line` opens or closes a fence.
fn fence_marker(line: &str) -> Option<(char, usize)> {
    let trimmed = line.trim_start();
    let marker = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let run = trimmed.chars().take_while(|&c| c == marker).count();
    (run >= 3).then_some((marker, run))
}

/// Removes fenced code blocks (```` ``` ```` or `~~~`), fences included.
///
/// A fence closes only on a line opening with the same character, at least
/// as many times as the opening fence. An unclosed fence swallows the rest
/// of the text.
#[must_use]
pub fn strip_code_blocks(text: &str) -> String {
    let mut kept = Vec::new();
    let mut open_fence: Option<(char, usize)> = None;

    for line in text.lines() {
        match (open_fence, fence_marker(line)) {
            (None, Some(marker)) => open_fence = Some(marker),
            (None, None) => kept.push(line),
            (Some((open, open_len)), Some((marker, len))) if open == marker && len >= open_len => {
                open_fence = None;
            }
            (Some(_), _) => {}
        }
    }

    kept.join("\n")
}

/// Removes the bilingual acknowledgment boilerplate from the "Self Checks" section.
///
/// Lines outside that section are kept untouched. Inside it, known snippets
/// are cut out and a line left with only a checkbox marker is dropped.
#[must_use]
pub fn sanitize_checklist_section(body: &str) -> String {
    let patterns = Patterns::global();
    let mut sanitized = Vec::new();
    let mut in_checklist = false;

    for line in body.lines() {
        let trimmed = line.trim();
        if patterns.heading.is_match(trimmed) {
            in_checklist = patterns.self_checks_heading.is_match(trimmed);
            sanitized.push(line.to_string());
            continue;
        }

        if in_checklist && CHECKLIST_SNIPPETS.iter().any(|s| line.contains(s)) {
            let cleaned = CHECKLIST_SNIPPETS
                .iter()
                .fold(line.to_string(), |acc, snippet| acc.replace(snippet, ""));
            if BARE_CHECKBOXES.contains(&cleaned.trim()) {
                continue;
            }
            sanitized.push(cleaned);
            continue;
        }

        sanitized.push(line.to_string());
    }

    sanitized.join("\n")
}

/// Splits `body` into its markdown sections.
///
/// Text before the first heading does not belong to any section, so a body
/// without headings has no sections at all.
#[must_use]
pub fn extract_template_sections(body: &str) -> Vec<Section> {
    let patterns = Patterns::global();
    let mut sections = Vec::new();
    let mut current: Option<String> = None;
    let mut lines: Vec<&str> = Vec::new();

    for line in body.lines() {
        if let Some(captures) = patterns.heading.captures(line.trim()) {
            if let Some(heading) = current.take() {
                sections.push(Section {
                    heading,
                    content: lines.join("\n").trim().to_string(),
                });
            }
            let heading = captures.get(1).map_or("", |m| m.as_str()).trim();
            current = Some(heading.to_string());
            lines.clear();
        } else {
            lines.push(line);
        }
    }

    if let Some(heading) = current {
        sections.push(Section {
            heading,
            content: lines.join("\n").trim().to_string(),
        });
    }

    sections
}

/// Returns true if every non-blank line of `content` is a checkbox item.
fn is_checkbox_only(content: &str) -> bool {
    let checkbox = &Patterns::global().checkbox_line;
    let mut lines = content.lines().map(str::trim).filter(|l| !l.is_empty()).peekable();
    lines.peek().is_some() && lines.all(|line| checkbox.is_match(line))
}

/// Returns the text the author actually wrote, without form boilerplate.
///
/// Checklist sections, unanswered sections and checkbox-only sections are
/// dropped and the remaining section contents joined with single spaces. If
/// the body has no sections, or every section is dropped, the whole
/// normalized body is returned instead.
#[must_use]
pub fn effective_content(body: &str) -> String {
    let parts: Vec<String> = extract_template_sections(body)
        .into_iter()
        .filter(|section| !CHECKLIST_HEADINGS.contains(&section.heading.to_lowercase().as_str()))
        .filter(|section| !is_checkbox_only(&section.content))
        .map(|section| collapse_whitespace(&section.content))
        .filter(|content| !content.is_empty() && !is_no_response(content))
        .collect();

    if parts.is_empty() {
        collapse_whitespace(body)
    } else {
        parts.join(" ")
    }
}

/// Removes repeated entries, keeping the first occurrence of each.
pub(crate) fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !result.contains(&item) {
            result.push(item);
        }
    }
    result
}
