// SPDX-License-Identifier: Apache-2.0

//! Offline moderation of an issue stored as JSON.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use moderator_core::{AppConfig, IssueRecord, Moderator, Policy};
use tracing::debug;

use super::types::CheckResult;

/// Reads an issue record from `path`, or from stdin when `path` is `-`.
fn read_issue(path: &Path) -> Result<IssueRecord> {
    let raw = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read issue from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read issue file {}", path.display()))?
    };

    serde_json::from_str(&raw).with_context(|| {
        format!(
            "Failed to parse issue record from {}",
            if path.as_os_str() == "-" {
                "stdin".to_string()
            } else {
                path.display().to_string()
            }
        )
    })
}

/// Decides on the issue in `path` using the configured policy.
pub fn run(path: &Path, config: &AppConfig) -> Result<CheckResult> {
    let policy = Policy::from_config(config)?;
    let issue = read_issue(path)?;
    debug!(repo = %issue.repo, number = issue.number, "Loaded issue record");

    let decision = Moderator::new(policy).decide(&issue);
    Ok(CheckResult { issue, decision })
}

#[cfg(test)]
mod tests {
    use super::*;
    use moderator_core::{Action, Category};
    use std::io::Write;

    #[test]
    fn test_check_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"repo": "langgenius/dify-plugins", "number": 5, "title": "How do I install this?", "state": "open"}}"#
        )
        .unwrap();

        let result = run(file.path(), &AppConfig::default()).unwrap();
        assert_eq!(result.decision.action, Action::Close);
        assert_eq!(result.decision.category, Category::Question);
    }

    #[test]
    fn test_check_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = run(file.path(), &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse issue record"));
    }

    #[test]
    fn test_check_missing_file() {
        let err = run(Path::new("/nonexistent/issue.json"), &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to read issue file"));
    }
}
