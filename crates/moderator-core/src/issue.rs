// SPDX-License-Identifier: Apache-2.0

//! Issue records consumed by the moderation engine.
//!
//! An [`IssueRecord`] is created once per issue, either from the GitHub
//! fetch in [`crate::github::issues`] or from a JSON file, and never mutated.

use std::fmt;

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueState {
    /// The issue is open.
    Open,
    /// The issue is closed.
    Closed,
    /// Any other state reported by the tracker, kept verbatim (upper-cased).
    Other(String),
}

impl IssueState {
    /// Returns true if the issue is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, IssueState::Open)
    }
}

impl Default for IssueState {
    fn default() -> Self {
        IssueState::Other("UNKNOWN".to_string())
    }
}

impl From<&str> for IssueState {
    fn from(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "OPEN" => IssueState::Open,
            "CLOSED" => IssueState::Closed,
            "" => IssueState::default(),
            other => IssueState::Other(other.to_string()),
        }
    }
}

impl From<String> for IssueState {
    fn from(value: String) -> Self {
        IssueState::from(value.as_str())
    }
}

impl From<IssueState> for String {
    fn from(state: IssueState) -> Self {
        state.to_string()
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueState::Open => write!(f, "OPEN"),
            IssueState::Closed => write!(f, "CLOSED"),
            IssueState::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// The author's relationship to the repository, as reported by GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthorAssociation {
    /// Owner of the repository.
    Owner,
    /// Member of the owning organization.
    Member,
    /// Invited collaborator.
    Collaborator,
    /// Has previously committed to the repository.
    Contributor,
    /// No association.
    #[default]
    None,
    /// Any other association (first-timer, mannequin, ...), kept verbatim.
    Other(String),
}

impl AuthorAssociation {
    /// Returns true for associations whose issues are never moderated.
    #[must_use]
    pub fn is_trusted(&self) -> bool {
        matches!(
            self,
            AuthorAssociation::Owner
                | AuthorAssociation::Member
                | AuthorAssociation::Collaborator
                | AuthorAssociation::Contributor
        )
    }
}

impl From<&str> for AuthorAssociation {
    fn from(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "OWNER" => AuthorAssociation::Owner,
            "MEMBER" => AuthorAssociation::Member,
            "COLLABORATOR" => AuthorAssociation::Collaborator,
            "CONTRIBUTOR" => AuthorAssociation::Contributor,
            "NONE" | "" => AuthorAssociation::None,
            other => AuthorAssociation::Other(other.to_string()),
        }
    }
}

impl From<String> for AuthorAssociation {
    fn from(value: String) -> Self {
        AuthorAssociation::from(value.as_str())
    }
}

impl From<AuthorAssociation> for String {
    fn from(association: AuthorAssociation) -> Self {
        association.to_string()
    }
}

impl fmt::Display for AuthorAssociation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorAssociation::Owner => write!(f, "OWNER"),
            AuthorAssociation::Member => write!(f, "MEMBER"),
            AuthorAssociation::Collaborator => write!(f, "COLLABORATOR"),
            AuthorAssociation::Contributor => write!(f, "CONTRIBUTOR"),
            AuthorAssociation::None => write!(f, "NONE"),
            AuthorAssociation::Other(raw) => write!(f, "{raw}"),
        }
    }
}

fn unknown_author() -> String {
    "unknown".to_string()
}

/// A single issue as seen by the moderation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct IssueRecord {
    /// Repository in `owner/name` form.
    #[builder(into)]
    pub repo: String,
    /// Issue number.
    pub number: u64,
    /// Issue title.
    #[serde(default)]
    #[builder(into, default)]
    pub title: String,
    /// Issue body (raw markdown).
    #[serde(default)]
    #[builder(into, default)]
    pub body: String,
    /// Author login.
    #[serde(default = "unknown_author")]
    #[builder(into, default = unknown_author())]
    pub author: String,
    /// Label names.
    #[serde(default)]
    #[builder(default)]
    pub labels: Vec<String>,
    /// Lifecycle state.
    #[serde(default)]
    #[builder(default)]
    pub state: IssueState,
    /// Canonical issue URL.
    #[serde(default)]
    #[builder(into, default)]
    pub url: String,
    /// Author's relationship to the repository.
    #[serde(default)]
    #[builder(default)]
    pub author_association: AuthorAssociation,
    /// URLs of pull requests that close this issue when merged.
    #[serde(default)]
    #[builder(default)]
    pub linked_prs: Vec<String>,
}

impl IssueRecord {
    /// Returns true if the issue carries any of `names` (case-insensitive).
    #[must_use]
    pub fn has_any_label(&self, names: &[&str]) -> bool {
        self.labels
            .iter()
            .any(|label| names.iter().any(|n| label.trim().eq_ignore_ascii_case(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_parses_case_insensitively() {
        assert_eq!(IssueState::from("open"), IssueState::Open);
        assert_eq!(IssueState::from("CLOSED"), IssueState::Closed);
        assert_eq!(
            IssueState::from("merged"),
            IssueState::Other("MERGED".to_string())
        );
        assert_eq!(IssueState::from(""), IssueState::default());
    }

    #[test]
    fn association_trust() {
        assert!(AuthorAssociation::from("member").is_trusted());
        assert!(AuthorAssociation::from("CONTRIBUTOR").is_trusted());
        assert!(!AuthorAssociation::from("NONE").is_trusted());
        assert!(!AuthorAssociation::from("FIRST_TIME_CONTRIBUTOR").is_trusted());
    }

    #[test]
    fn association_display_keeps_raw_value() {
        let assoc = AuthorAssociation::from("first_timer");
        assert_eq!(assoc.to_string(), "FIRST_TIMER");
    }

    #[test]
    fn deserialize_fills_missing_optional_fields() {
        let json = r#"{ "repo": "langgenius/dify", "number": 7 }"#;
        let issue: IssueRecord = serde_json::from_str(json).unwrap();

        assert_eq!(issue.author, "unknown");
        assert_eq!(issue.author_association, AuthorAssociation::None);
        assert_eq!(issue.state.to_string(), "UNKNOWN");
        assert!(issue.labels.is_empty());
        assert!(issue.linked_prs.is_empty());
    }

    #[test]
    fn serialize_uses_upper_case_enums() {
        let issue = IssueRecord::builder()
            .repo("langgenius/dify")
            .number(1)
            .state(IssueState::Open)
            .author_association(AuthorAssociation::Member)
            .build();
        let value = serde_json::to_value(&issue).unwrap();

        assert_eq!(value["state"], "OPEN");
        assert_eq!(value["author_association"], "MEMBER");
    }

    #[test]
    fn builder_defaults() {
        let issue = IssueRecord::builder()
            .repo("a/b")
            .number(3)
            .title("Title")
            .build();

        assert_eq!(issue.author, "unknown");
        assert_eq!(issue.body, "");
        assert!(!issue.state.is_open());
    }

    #[test]
    fn label_lookup_is_case_insensitive() {
        let issue = IssueRecord::builder()
            .repo("a/b")
            .number(3)
            .labels(vec!["Question".to_string(), " bug ".to_string()])
            .build();

        assert!(issue.has_any_label(&["question", "support"]));
        assert!(issue.has_any_label(&["BUG"]));
        assert!(!issue.has_any_label(&["feature"]));
    }
}
