// SPDX-License-Identifier: Apache-2.0

//! Non-English detection by CJK character ratio.

use crate::issue::IssueRecord;

use super::text::{sanitize_checklist_section, strip_code_blocks};

/// Returns true if `c` lies in a CJK, Hangul or fullwidth block.
#[must_use]
pub fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{2E80}'..='\u{2EFF}'   // CJK Radicals Supplement
        | '\u{3000}'..='\u{303F}' // CJK Symbols and Punctuation
        | '\u{3040}'..='\u{309F}' // Hiragana
        | '\u{30A0}'..='\u{30FF}' // Katakana
        | '\u{3100}'..='\u{312F}' // Bopomofo
        | '\u{3130}'..='\u{318F}' // Hangul Compatibility Jamo
        | '\u{3200}'..='\u{32FF}' // Enclosed CJK Letters and Months
        | '\u{3300}'..='\u{33FF}' // CJK Compatibility
        | '\u{3400}'..='\u{4DBF}' // CJK Unified Ideographs Extension A
        | '\u{4E00}'..='\u{9FFF}' // CJK Unified Ideographs
        | '\u{AC00}'..='\u{D7AF}' // Hangul Syllables
        | '\u{F900}'..='\u{FAFF}' // CJK Compatibility Ideographs
        | '\u{FE30}'..='\u{FE4F}' // CJK Compatibility Forms
        | '\u{FF01}'..='\u{FF60}' // Fullwidth Forms
        | '\u{FFE0}'..='\u{FFEF}' // Fullwidth Signs
    )
}

/// Fraction of non-whitespace characters in `text` that are CJK.
///
/// Returns `0.0` for empty or all-whitespace input.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cjk_ratio(text: &str) -> f64 {
    let (total, cjk) = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .fold((0usize, 0usize), |(total, cjk), c| {
            (total + 1, cjk + usize::from(is_cjk(c)))
        });

    if total == 0 {
        0.0
    } else {
        cjk as f64 / total as f64
    }
}

/// Language ratio of an issue.
///
/// The body is sanitized and stripped of code blocks first. The ratio is
/// taken over title and body together and over the body alone, and the
/// larger one wins so a long English title cannot hide a non-English body.
#[must_use]
pub fn issue_cjk_ratio(issue: &IssueRecord) -> f64 {
    let body = strip_code_blocks(&sanitize_checklist_section(&issue.body));
    let combined = cjk_ratio(&format!("{}\n{body}", issue.title));
    combined.max(cjk_ratio(&body))
}

/// Reason text for a language verdict.
#[must_use]
pub fn language_reason(ratio: f64, threshold: f64) -> String {
    format!(
        "CJK ratio is {:.1}% (>= {:.0}%).",
        ratio * 100.0,
        threshold * 100.0
    )
}
