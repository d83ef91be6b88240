// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Provides issue reference parsing, authentication, and the issue fetch and
//! close operations used around the decision engine.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::ModeratorError;

pub mod auth;
pub mod issues;

/// A parsed issue reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IssueTarget {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Issue number.
    pub number: u64,
}

impl IssueTarget {
    /// Returns the repository in `owner/name` form.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for IssueTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Returns true if `part` is a plausible GitHub owner or repository name.
fn is_valid_name(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Parses an owner/repo string to extract owner and repo.
///
/// Validates format: exactly one `/`, and both parts made of ASCII letters,
/// digits, `-`, `_` or `.`.
///
/// # Errors
///
/// Returns `ModeratorError::InvalidReference` if the format is invalid.
pub fn parse_owner_repo(s: &str) -> Result<(String, String), ModeratorError> {
    let s = s.trim();
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() != 2 || !is_valid_name(parts[0]) || !is_valid_name(parts[1]) {
        return Err(ModeratorError::invalid_reference(
            s,
            "expected owner/repo",
        ));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

fn parse_number(input: &str, raw: &str) -> Result<u64, ModeratorError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModeratorError::invalid_reference(
            input,
            format!("'{raw}' is not an issue number"),
        ));
    }
    raw.parse()
        .map_err(|_| ModeratorError::invalid_reference(input, format!("'{raw}' is out of range")))
}

/// Rejects a `--repo` value that disagrees with the repository in the reference.
fn check_repo_context(
    input: &str,
    target: &IssueTarget,
    repo_context: Option<&str>,
) -> Result<(), ModeratorError> {
    let Some(context) = repo_context else {
        return Ok(());
    };
    let (owner, repo) = parse_owner_repo(context)?;
    if owner.eq_ignore_ascii_case(&target.owner) && repo.eq_ignore_ascii_case(&target.repo) {
        Ok(())
    } else {
        Err(ModeratorError::invalid_reference(
            input,
            format!(
                "--repo {owner}/{repo} does not match the reference repository {}",
                target.full_name()
            ),
        ))
    }
}

/// Parses an issue reference in any of the supported formats.
///
/// Supports:
/// - Full URL: `https://github.com/owner/repo/issues/123` (query and fragment ignored)
/// - Short form: `owner/repo#123`
/// - Bare number: `123` (requires `repo_context`)
///
/// When `repo_context` is given together with a URL or short form, both must
/// name the same repository.
///
/// # Errors
///
/// Returns `ModeratorError::InvalidReference` if the reference is malformed,
/// a bare number has no repository context, or the repositories disagree.
pub fn parse_issue_reference(
    input: &str,
    repo_context: Option<&str>,
) -> Result<IssueTarget, ModeratorError> {
    let input = input.trim();

    if let Some(rest) = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
    {
        let path = rest.split(['?', '#']).next().unwrap_or(rest);
        let parts: Vec<&str> = path.trim_end_matches('/').split('/').collect();

        // Expected: ["github.com", "owner", "repo", "issues", "123"]
        if parts.len() != 5 || !parts[0].eq_ignore_ascii_case("github.com") {
            return Err(ModeratorError::invalid_reference(
                input,
                "expected https://github.com/owner/repo/issues/123",
            ));
        }
        if parts[3] != "issues" {
            return Err(ModeratorError::invalid_reference(
                input,
                "URL must point to a GitHub issue",
            ));
        }
        if parts[1].is_empty() || parts[2].is_empty() {
            return Err(ModeratorError::invalid_reference(input, "missing owner or repository"));
        }

        let target = IssueTarget {
            owner: parts[1].to_string(),
            repo: parts[2].to_string(),
            number: parse_number(input, parts[4])?,
        };
        check_repo_context(input, &target, repo_context)?;
        debug!(issue = %target, "Parsed issue URL");
        return Ok(target);
    }

    if let Some((owner_repo, number)) = input.split_once('#') {
        let (owner, repo) = parse_owner_repo(owner_repo)
            .map_err(|_| ModeratorError::invalid_reference(input, "expected owner/repo#123"))?;
        let target = IssueTarget {
            owner,
            repo,
            number: parse_number(input, number)?,
        };
        check_repo_context(input, &target, repo_context)?;
        debug!(issue = %target, "Parsed short-form issue reference");
        return Ok(target);
    }

    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
        let context = repo_context.ok_or_else(|| {
            ModeratorError::invalid_reference(
                input,
                "a bare issue number requires --repo owner/repo",
            )
        })?;
        let (owner, repo) = parse_owner_repo(context)?;
        let target = IssueTarget {
            owner,
            repo,
            number: parse_number(input, input)?,
        };
        debug!(issue = %target, "Parsed bare issue number");
        return Ok(target);
    }

    Err(ModeratorError::invalid_reference(
        input,
        "expected an issue URL, owner/repo#123, or an issue number with --repo",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(owner: &str, repo: &str, number: u64) -> IssueTarget {
        IssueTarget {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
        }
    }

    #[test]
    fn parse_owner_repo_valid() {
        let (owner, repo) = parse_owner_repo("langgenius/dify").unwrap();
        assert_eq!(owner, "langgenius");
        assert_eq!(repo, "dify");
    }

    #[test]
    fn parse_owner_repo_invalid() {
        assert!(parse_owner_repo("dify").is_err());
        assert!(parse_owner_repo("a/b/c").is_err());
        assert!(parse_owner_repo("/dify").is_err());
        assert!(parse_owner_repo("langgenius/").is_err());
        assert!(parse_owner_repo("lang#genius/dify").is_err());
        assert!(parse_owner_repo("lang genius/dify").is_err());
    }

    #[test]
    fn parse_url() {
        let parsed =
            parse_issue_reference("https://github.com/langgenius/dify/issues/123", None).unwrap();
        assert_eq!(parsed, target("langgenius", "dify", 123));
    }

    #[test]
    fn parse_url_with_fragment_and_query() {
        let parsed = parse_issue_reference(
            "https://github.com/langgenius/dify/issues/123/?foo=1#issuecomment-9",
            None,
        )
        .unwrap();
        assert_eq!(parsed.number, 123);
    }

    #[test]
    fn parse_url_rejects_pull_requests_and_other_hosts() {
        assert!(parse_issue_reference("https://github.com/langgenius/dify/pull/1", None).is_err());
        assert!(parse_issue_reference("https://gitlab.com/langgenius/dify/issues/1", None).is_err());
        assert!(parse_issue_reference("https://github.com/langgenius/dify/issues/abc", None).is_err());
    }

    #[test]
    fn parse_url_rejects_mismatched_repo() {
        let err = parse_issue_reference(
            "https://github.com/langgenius/dify/issues/1",
            Some("langgenius/dify-plugins"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not match"));

        assert!(
            parse_issue_reference(
                "https://github.com/langgenius/dify/issues/1",
                Some("LangGenius/Dify")
            )
            .is_ok()
        );
    }

    #[test]
    fn parse_short_form() {
        let parsed = parse_issue_reference("langgenius/dify-plugins#77", None).unwrap();
        assert_eq!(parsed, target("langgenius", "dify-plugins", 77));
        assert_eq!(parsed.to_string(), "langgenius/dify-plugins#77");
        assert!(parse_issue_reference("dify#77", None).is_err());
        assert!(parse_issue_reference("langgenius/dify#x", None).is_err());
    }

    #[test]
    fn parse_bare_number() {
        let parsed = parse_issue_reference("42", Some("langgenius/dify")).unwrap();
        assert_eq!(parsed, target("langgenius", "dify", 42));

        let err = parse_issue_reference("42", None).unwrap_err();
        assert!(matches!(err, ModeratorError::InvalidReference { .. }));
        assert!(err.to_string().contains("--repo"));
    }

    #[test]
    fn parse_garbage() {
        assert!(parse_issue_reference("", Some("a/b")).is_err());
        assert!(parse_issue_reference("-5", Some("a/b")).is_err());
        assert!(parse_issue_reference("not an issue", None).is_err());
    }
}
