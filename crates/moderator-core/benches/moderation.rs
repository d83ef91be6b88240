// SPDX-License-Identifier: Apache-2.0

//! Benchmark for the moderation engine.
//!
//! A decision should take well under a millisecond even for long template bodies.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use moderator_core::{IssueRecord, IssueState, Moderator};

/// A filled-in bug report template, repeated to roughly 10 KB.
fn long_bug_report() -> String {
    let section = "### Dify version\n\nDify version: 1.11.2\n\n\
                   ### Cloud or Self Hosted\n\nSelf Hosted (Docker)\n\n\
                   ### Steps to reproduce\n\n1. Create a workflow with an HTTP node\n2. Run it\n\n\
                   ### Expected Behavior\n\nThe node returns the response body\n\n\
                   ### Actual Behavior\n\nThe run fails with a timeout error after 10 seconds\n\n\
                   ```\nTraceback (most recent call last):\n  File \"app.py\", line 1\n```\n\n";
    section.repeat(25)
}

fn issue(repo: &str, title: &str, body: String) -> IssueRecord {
    IssueRecord::builder()
        .repo(repo)
        .number(1)
        .title(title)
        .body(body)
        .state(IssueState::Open)
        .build()
}

fn bench_flagship_pass(c: &mut Criterion) {
    let moderator = Moderator::default();
    let issue = issue(
        "langgenius/dify",
        "HTTP node times out after ten seconds",
        long_bug_report(),
    );

    c.bench_function("decide_flagship_long_report", |b| {
        b.iter(|| moderator.decide(black_box(&issue)));
    });
}

fn bench_plugin_unclear(c: &mut Criterion) {
    let moderator = Moderator::default();
    let issue = issue(
        "langgenius/dify-plugins",
        "Plugin broken",
        "### Steps to reproduce\n_No response_\n### Expected\nTBD".to_string(),
    );

    c.bench_function("decide_plugin_unclear", |b| {
        b.iter(|| moderator.decide(black_box(&issue)));
    });
}

fn bench_language(c: &mut Criterion) {
    let moderator = Moderator::default();
    let issue = issue(
        "langgenius/dify-plugins",
        "插件无法加载",
        "请帮忙看看这个问题，插件在上传之后无法加载，日志里没有错误。".repeat(50),
    );

    c.bench_function("decide_language_cjk", |b| {
        b.iter(|| moderator.decide(black_box(&issue)));
    });
}

criterion_group!(
    benches,
    bench_flagship_pass,
    bench_plugin_unclear,
    bench_language
);
criterion_main!(benches);
