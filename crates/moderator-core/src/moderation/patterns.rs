// SPDX-License-Identifier: Apache-2.0

//! Compiled regular expressions shared by the content classifiers.
//!
//! Patterns that do not depend on configuration are compiled once on first
//! use and shared across threads. Product-specific patterns (the product
//! name in "Dify version") live in [`ProductPatterns`] and are compiled when
//! a [`Policy`](super::Policy) is built.

use std::sync::LazyLock;

use regex::Regex;

/// Global pattern set (initialized once on first use).
static PATTERNS: LazyLock<Patterns> =
    LazyLock::new(|| Patterns::compile().expect("built-in moderation patterns are valid"));

/// Fixed patterns used by the classifiers.
#[derive(Debug)]
pub struct Patterns {
    /// Markdown heading on a trimmed line; group 1 is the heading text.
    pub heading: Regex,
    /// The "Self Checks" heading of the issue templates.
    pub self_checks_heading: Regex,
    /// A markdown checkbox list item.
    pub checkbox_line: Regex,
    /// Title starting with an interrogative word.
    pub question_start: Regex,
    /// Non-answers left in place of real content.
    pub placeholder: Regex,
    /// Titles that say nothing about the problem.
    pub generic_title: Regex,
    /// Language that violates the code of conduct.
    pub disrespectful: Regex,
    /// Words that mark a report as a bug.
    pub bug_markers: Regex,
    /// First `v?major.minor[.patch]` token.
    pub semver: Regex,
    /// Opening of the feature template's problem-story section, through the blank line after it.
    pub feature_story_start: Regex,
    /// Heading of the feature template's second section.
    pub feature_story_end: Regex,
    /// Verbs describing a concrete feature request.
    pub action_verbs: Regex,
    /// Evidence of actual behavior or logs in a bug report.
    pub actual_behavior: Vec<Regex>,
    /// Evidence of a deployment mode in a bug report.
    pub deployment_mode: Vec<Regex>,
    /// Evidence of reproduction steps in a bug report.
    pub reproduction_steps: Vec<Regex>,
    /// Evidence of expected behavior in a bug report.
    pub expected_behavior: Vec<Regex>,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            heading: Regex::new(r"^#{1,6}\s+(.*)$")?,
            self_checks_heading: Regex::new(r"(?i)^#{1,6}\s*Self Checks\s*$")?,
            checkbox_line: Regex::new(r"^[-*]\s*\[[ xX]\]")?,
            question_start: Regex::new(
                r"(?i)^\s*(how|what|why|can|could|is|are|do|does|did|where|when|which|who|whom|help)\b",
            )?,
            placeholder: Regex::new(r"(?i)\b(tbd|todo|n/?a|none|same as title|no idea)\b")?,
            generic_title: Regex::new(
                r"(?i)^(bug|issue|help|question|error|problem|bug report|help me|fix this|not working|doesn'?t work|please help|request|suggestion)$",
            )?,
            disrespectful: Regex::new(r"(?i)\b(idiot|stupid|dumb|fuck|shit|bitch)\b")?,
            bug_markers: Regex::new(r"(?i)\b(bug|error|exception|traceback|crash|fail(?:s|ure)?)\b")?,
            semver: Regex::new(r"\bv?([0-9]+)\.([0-9]+)(?:\.([0-9]+))?\b")?,
            feature_story_start: Regex::new(
                r"(?is)#+\s*1\.\s*Is this request related to a challenge you're experiencing\?.*?\n\n",
            )?,
            feature_story_end: Regex::new(r"\n#+\s*2\.")?,
            action_verbs: Regex::new(r"\b(add|support|allow|enable|expose|visualize|customize)\b")?,
            actual_behavior: compile_all(&[
                r"actual behavior",
                r"\bactual\b",
                r"\blog",
                r"\berror\b",
                r"traceback",
            ])?,
            deployment_mode: compile_all(&[r"\bcloud\b", r"self[- ]hosted", r"\bdocker\b", r"\bsource\b"])?,
            reproduction_steps: compile_all(&[
                r"steps to reproduce",
                r"\breproduce\b",
                r"(?m)^\s*1[.)]\s+",
            ])?,
            expected_behavior: compile_all(&[r"expected behavior", r"\bexpected\b"])?,
        })
    }

    /// Returns the shared pattern set.
    #[must_use]
    pub fn global() -> &'static Self {
        &PATTERNS
    }
}

/// Patterns that embed the configured product name.
#[derive(Debug, Clone)]
pub struct ProductPatterns {
    /// A line that labels the product version, e.g. "Dify version: 1.2.0".
    pub version_line: Regex,
    /// An incidental mention such as "dify v1.9" or "dify 1.9.2".
    pub version_inline: Regex,
    /// Evidence of the product version in a bug report (lower-cased body).
    pub version_mention: Vec<Regex>,
}

impl ProductPatterns {
    /// Compiles the product-specific patterns for `product_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile (the name is escaped,
    /// so this only happens on pathological input such as size limits).
    pub fn compile(product_name: &str) -> Result<Self, regex::Error> {
        let product = regex::escape(&product_name.to_lowercase());
        Ok(Self {
            version_line: Regex::new(&format!(r"(?i)\b{product}\s*version\b"))?,
            version_inline: Regex::new(&format!(
                r"(?i)\b{product}\s*v?([0-9]+)\.([0-9]+)(?:\.([0-9]+))?\b"
            ))?,
            version_mention: compile_all(&[&format!(r"\b{product} version\b"), r"\bversion\b"])?,
        })
    }
}

fn compile_all(sources: &[&str]) -> Result<Vec<Regex>, regex::Error> {
    sources.iter().map(|source| Regex::new(source)).collect()
}

/// Returns true if any of `patterns` matches `text`.
pub(crate) fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_patterns_compile() {
        let patterns = Patterns::global();
        assert!(patterns.heading.is_match("## Steps"));
        assert!(!patterns.heading.is_match("####### Too deep"));
    }

    #[test]
    fn generic_title_requires_full_match() {
        let patterns = Patterns::global();
        assert!(patterns.generic_title.is_match("Not Working"));
        assert!(patterns.generic_title.is_match("doesnt work"));
        assert!(!patterns.generic_title.is_match("Bug in workflow editor"));
    }

    #[test]
    fn bug_markers_are_whole_words() {
        let patterns = Patterns::global();
        assert!(patterns.bug_markers.is_match("the run fails on start"));
        assert!(patterns.bug_markers.is_match("Failure when saving"));
        assert!(!patterns.bug_markers.is_match("debugger view"));
    }

    #[test]
    fn product_patterns_escape_name() {
        let product = ProductPatterns::compile("C++ App").unwrap();
        assert!(product.version_line.is_match("c++ app version: 1.0"));
        assert!(product.version_inline.is_match("since C++ App v2.1"));
    }

    #[test]
    fn reproduction_steps_accept_numbered_list() {
        let patterns = Patterns::global();
        assert!(any_match(&patterns.reproduction_steps, "intro\n1. open the app\n2. click"));
        assert!(any_match(&patterns.reproduction_steps, "1) start"));
        assert!(!any_match(&patterns.reproduction_steps, "version 1.2 crashed"));
    }
}
