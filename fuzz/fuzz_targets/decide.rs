// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: 2026 Issue Moderator Contributors

#![no_main]

use std::sync::LazyLock;

use libfuzzer_sys::fuzz_target;
use moderator_core::{Action, IssueRecord, IssueState, Moderator};

static MODERATOR: LazyLock<Moderator> = LazyLock::new(Moderator::default);

const REPOS: [&str; 4] = [
    "langgenius/dify-plugins",
    "langgenius/dify",
    "langgenius/webapp-conversation",
    "someone/else",
];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let text = String::from_utf8_lossy(rest);
    let (title, body) = text.split_once('\n').unwrap_or((&text, ""));

    let issue = IssueRecord::builder()
        .repo(REPOS[usize::from(selector) % REPOS.len()])
        .number(1)
        .title(title)
        .body(body)
        .state(IssueState::Open)
        .build();

    let decision = MODERATOR.decide(&issue);
    assert!(!decision.reasons.is_empty());
    assert_eq!(decision.comment.is_some(), decision.action == Action::Close);

    // Arbitrary JSON must either be rejected or decided on without panicking.
    if let Ok(record) = serde_json::from_slice::<IssueRecord>(rest) {
        let _ = MODERATOR.decide(&record);
    }
});
