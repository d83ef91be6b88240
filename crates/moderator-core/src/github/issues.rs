// SPDX-License-Identifier: Apache-2.0

//! Issue fetch and close operations over the GitHub GraphQL API.
//!
//! One query loads everything the engine needs, including the author
//! association and the pull requests that would close the issue. Closing is
//! two mutations: a comment, then `closeIssue` with reason `NOT_PLANNED`.

use anyhow::{Context, Result};
use backon::Retryable;
use octocrab::Octocrab;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use super::IssueTarget;
use crate::error::ModeratorError;
use crate::issue::{AuthorAssociation, IssueRecord, IssueState};
use crate::moderation::CloseDirective;
use crate::retry::{is_retryable_octocrab, retry_backoff};

const ISSUE_QUERY: &str = r"
query($owner: String!, $name: String!, $number: Int!) {
  repository(owner: $owner, name: $name) {
    issue(number: $number) {
      id
      number
      title
      body
      url
      state
      authorAssociation
      author { login }
      labels(first: 100) { nodes { name } }
      closedByPullRequestsReferences(first: 100, includeClosedPrs: true) { nodes { url } }
    }
  }
}";

const ADD_COMMENT_MUTATION: &str = r"
mutation($subjectId: ID!, $body: String!) {
  addComment(input: { subjectId: $subjectId, body: $body }) {
    commentEdge { node { url } }
  }
}";

const CLOSE_ISSUE_MUTATION: &str = r"
mutation($issueId: ID!) {
  closeIssue(input: { issueId: $issueId, stateReason: NOT_PLANNED }) {
    issue { state }
  }
}";

/// An issue loaded from GitHub, with the node id needed to mutate it.
#[derive(Debug, Clone)]
pub struct FetchedIssue {
    /// GraphQL node id.
    pub node_id: String,
    /// The record handed to the engine.
    pub record: IssueRecord,
}

#[derive(Debug, Deserialize)]
struct RepositoryData {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    issue: Option<IssueNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueNode {
    id: String,
    number: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    author_association: Option<String>,
    #[serde(default)]
    author: Option<Login>,
    #[serde(default)]
    labels: Option<Nodes<Named>>,
    #[serde(default)]
    closed_by_pull_requests_references: Option<Nodes<Linked>>,
}

#[derive(Debug, Deserialize)]
struct Login {
    login: String,
}

#[derive(Debug, Deserialize)]
struct Nodes<T> {
    #[serde(default = "Vec::new")]
    nodes: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Linked {
    url: Option<String>,
}

impl IssueNode {
    fn into_fetched(self, repo: String) -> FetchedIssue {
        let labels = self
            .labels
            .map(|labels| labels.nodes)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .map(|label| label.name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        let linked_prs = self
            .closed_by_pull_requests_references
            .map(|prs| prs.nodes)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(|pr| pr.url)
            .filter(|url| !url.is_empty())
            .collect();

        let author = self
            .author
            .map(|a| a.login)
            .filter(|login| !login.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        let record = IssueRecord::builder()
            .repo(repo)
            .number(self.number)
            .title(self.title.unwrap_or_default())
            .body(self.body.unwrap_or_default())
            .author(author)
            .labels(labels)
            .state(IssueState::from(self.state.unwrap_or_default()))
            .url(self.url.unwrap_or_default())
            .author_association(AuthorAssociation::from(
                self.author_association.unwrap_or_default(),
            ))
            .linked_prs(linked_prs)
            .build();

        FetchedIssue {
            node_id: self.id,
            record,
        }
    }
}

/// Extracts `data` from a GraphQL response, turning reported errors into an error.
fn parse_response<T: DeserializeOwned>(response: Value) -> Result<T> {
    if let Some(errors) = response.get("errors")
        && !errors.is_null()
    {
        let message = errors
            .as_array()
            .map(|list| {
                list.iter()
                    .filter_map(|e| e.get("message").and_then(Value::as_str))
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .filter(|joined| !joined.is_empty())
            .unwrap_or_else(|| errors.to_string());
        return Err(ModeratorError::GitHub {
            message: format!("GraphQL error: {message}"),
        }
        .into());
    }

    let data = response
        .get("data")
        .cloned()
        .context("Missing 'data' field in GraphQL response")?;
    serde_json::from_value(data).context("Failed to parse GraphQL response")
}

/// Runs a GraphQL query, retrying transient failures.
async fn run_query(client: &Octocrab, payload: &Value, operation: &str) -> Result<Value> {
    (|| async { client.graphql::<Value>(payload).await })
        .retry(retry_backoff())
        .when(is_retryable_octocrab)
        .notify(|err, dur| {
            tracing::warn!(
                error = %err,
                retry_after = ?dur,
                operation,
                "Retrying GraphQL request"
            );
        })
        .await
        .map_err(|e| anyhow::Error::new(ModeratorError::from(e)))
}

/// Fetches an issue with everything the moderation engine needs.
///
/// # Errors
///
/// Returns an error if the request fails, GraphQL reports errors, or the
/// repository or issue does not exist.
#[instrument(skip(client, target), fields(issue = %target))]
pub async fn fetch_issue(client: &Octocrab, target: &IssueTarget) -> Result<FetchedIssue> {
    debug!("Fetching issue");

    let payload = json!({
        "query": ISSUE_QUERY,
        "variables": {
            "owner": target.owner,
            "name": target.repo,
            "number": target.number,
        }
    });

    let response = run_query(client, &payload, "fetch_issue")
        .await
        .with_context(|| format!("Failed to fetch issue {target}"))?;
    let data: RepositoryData = parse_response(response)
        .with_context(|| format!("Failed to fetch issue {target}"))?;

    let issue = data
        .repository
        .ok_or_else(|| ModeratorError::GitHub {
            message: format!("Repository {} not found or inaccessible", target.full_name()),
        })?
        .issue
        .ok_or_else(|| ModeratorError::GitHub {
            message: format!("Issue {target} not found"),
        })?;

    let fetched = issue.into_fetched(target.full_name());
    debug!(
        state = %fetched.record.state,
        association = %fetched.record.author_association,
        linked_prs = fetched.record.linked_prs.len(),
        "Fetched issue"
    );
    Ok(fetched)
}

/// Posts the closing comment and closes the issue as not planned.
///
/// Mutations are not retried, so a transient failure never posts the
/// comment twice.
///
/// # Returns
///
/// The URL of the posted comment.
///
/// # Errors
///
/// Returns an error if either mutation fails. If the comment was posted but
/// closing failed, the error says so.
#[instrument(skip(client, issue, directive), fields(repo = %directive.repo, number = directive.number))]
pub async fn close_issue(
    client: &Octocrab,
    issue: &FetchedIssue,
    directive: &CloseDirective,
) -> Result<String> {
    debug!("Posting closing comment");

    let comment_payload = json!({
        "query": ADD_COMMENT_MUTATION,
        "variables": { "subjectId": issue.node_id, "body": directive.comment },
    });
    let response: Value = client
        .graphql(&comment_payload)
        .await
        .map_err(ModeratorError::from)
        .with_context(|| format!("Failed to post comment to issue #{}", directive.number))?;
    let response: Value = parse_response(response)
        .with_context(|| format!("Failed to post comment to issue #{}", directive.number))?;
    let comment_url = response
        .pointer("/addComment/commentEdge/node/url")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    debug!(url = %comment_url, "Comment posted, closing issue");

    let close_payload = json!({
        "query": CLOSE_ISSUE_MUTATION,
        "variables": { "issueId": issue.node_id },
    });
    let response: Value = client
        .graphql(&close_payload)
        .await
        .map_err(ModeratorError::from)
        .with_context(|| {
            format!(
                "Comment posted but failed to close issue #{}",
                directive.number
            )
        })?;
    let _: Value = parse_response(response).with_context(|| {
        format!(
            "Comment posted but failed to close issue #{}",
            directive.number
        )
    })?;

    info!("Issue closed as not planned");
    Ok(comment_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> Value {
        json!({
            "data": {
                "repository": {
                    "issue": {
                        "id": "I_kwDOABC",
                        "number": 321,
                        "title": "Workflow fails",
                        "body": "Details",
                        "url": "https://github.com/langgenius/dify/issues/321",
                        "state": "OPEN",
                        "authorAssociation": "FIRST_TIME_CONTRIBUTOR",
                        "author": { "login": "octo" },
                        "labels": { "nodes": [ { "name": " bug " }, { "name": "" }, null ] },
                        "closedByPullRequestsReferences": {
                            "nodes": [ { "url": "https://github.com/langgenius/dify/pull/9" } ]
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn parses_issue_node_into_record() {
        let data: RepositoryData = parse_response(sample_response()).unwrap();
        let fetched = data
            .repository
            .unwrap()
            .issue
            .unwrap()
            .into_fetched("langgenius/dify".to_string());

        assert_eq!(fetched.node_id, "I_kwDOABC");
        let record = fetched.record;
        assert_eq!(record.number, 321);
        assert_eq!(record.author, "octo");
        assert_eq!(record.labels, vec!["bug"]);
        assert!(record.state.is_open());
        assert_eq!(
            record.author_association,
            AuthorAssociation::Other("FIRST_TIME_CONTRIBUTOR".to_string())
        );
        assert_eq!(record.linked_prs.len(), 1);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let response = json!({
            "data": { "repository": { "issue": { "id": "I_1", "number": 5, "author": null, "body": null } } }
        });
        let data: RepositoryData = parse_response(response).unwrap();
        let record = data
            .repository
            .unwrap()
            .issue
            .unwrap()
            .into_fetched("a/b".to_string())
            .record;

        assert_eq!(record.author, "unknown");
        assert_eq!(record.body, "");
        assert_eq!(record.author_association, AuthorAssociation::None);
        assert_eq!(record.state.to_string(), "UNKNOWN");
        assert!(record.linked_prs.is_empty());
    }

    #[test]
    fn graphql_errors_become_github_errors() {
        let response = json!({
            "data": null,
            "errors": [ { "message": "Could not resolve to a Repository" } ]
        });
        let err = parse_response::<RepositoryData>(response).unwrap_err();
        let moderator_err = err.downcast_ref::<ModeratorError>().unwrap();
        assert!(matches!(moderator_err, ModeratorError::GitHub { .. }));
        assert!(err.to_string().contains("Could not resolve to a Repository"));
    }

    #[test]
    fn missing_data_is_an_error() {
        assert!(parse_response::<RepositoryData>(json!({})).is_err());
    }
}
