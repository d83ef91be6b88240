// SPDX-License-Identifier: Apache-2.0

//! High-level moderation operations for front ends.
//!
//! A [`ModerationSession`] owns the GitHub client and the engine, so a
//! front end only parses references, calls [`ModerationSession::moderate_all`],
//! renders the reports, and optionally applies the close directives.

use anyhow::Result;
use octocrab::Octocrab;
use serde::Serialize;
use tracing::{info, instrument};

use crate::auth::TokenProvider;
use crate::bulk::process_ordered;
use crate::config::AppConfig;
use crate::error::ModeratorError;
use crate::github::IssueTarget;
use crate::github::auth::create_client_with_token;
use crate::github::issues::{FetchedIssue, close_issue, fetch_issue};
use crate::issue::IssueRecord;
use crate::moderation::{Decision, Moderator, Policy};

/// An issue together with the decision reached for it.
#[derive(Debug, Clone, Serialize)]
pub struct ModerationReport {
    /// The reference that was moderated.
    pub target: IssueTarget,
    /// The issue as fetched.
    pub issue: IssueRecord,
    /// The engine's decision.
    pub decision: Decision,
    #[serde(skip)]
    node_id: String,
}

/// A GitHub client paired with a moderation engine.
pub struct ModerationSession {
    client: Octocrab,
    moderator: Moderator,
    concurrency: usize,
}

impl std::fmt::Debug for ModerationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModerationSession")
            .field("moderator", &self.moderator)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl ModerationSession {
    /// Builds a session from configuration and a credential source.
    ///
    /// # Errors
    ///
    /// Returns `ModeratorError::Config` if the policy is invalid,
    /// `ModeratorError::NotAuthenticated` if the provider has no token, or
    /// `ModeratorError::GitHub` if the client cannot be built.
    pub fn new(provider: &dyn TokenProvider, config: &AppConfig) -> crate::Result<Self> {
        let policy = Policy::from_config(config)?;
        let token = provider
            .github_token()
            .ok_or(ModeratorError::NotAuthenticated)?;
        let client = create_client_with_token(&token, &config.github)?;
        Ok(Self::with_client(
            client,
            Moderator::new(policy),
            config.github.concurrency,
        ))
    }

    /// Builds a session around an existing client.
    #[must_use]
    pub fn with_client(client: Octocrab, moderator: Moderator, concurrency: usize) -> Self {
        Self {
            client,
            moderator,
            concurrency: concurrency.max(1),
        }
    }

    /// The engine used by this session.
    #[must_use]
    pub fn moderator(&self) -> &Moderator {
        &self.moderator
    }

    /// Fetches one issue and decides on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue cannot be fetched.
    #[instrument(skip(self, target), fields(issue = %target))]
    pub async fn moderate(&self, target: &IssueTarget) -> Result<ModerationReport> {
        let FetchedIssue { node_id, record } = fetch_issue(&self.client, target).await?;
        let decision = self.moderator.decide(&record);
        info!(
            action = %decision.action,
            category = %decision.category,
            "Moderation decision"
        );
        Ok(ModerationReport {
            target: target.clone(),
            issue: record,
            decision,
            node_id,
        })
    }

    /// Moderates several issues concurrently, returning results in input order.
    ///
    /// `progress` receives `(current, total, message)` as each fetch starts.
    pub async fn moderate_all<P>(
        &self,
        targets: Vec<IssueTarget>,
        progress: P,
    ) -> Vec<(IssueTarget, Result<ModerationReport>)>
    where
        P: Fn(usize, usize, &str),
    {
        process_ordered(
            targets,
            self.concurrency,
            |target| async move { self.moderate(&target).await },
            progress,
        )
        .await
    }

    /// Closes the issue if its decision says so.
    ///
    /// Returns the URL of the closing comment, or `None` when the decision is
    /// not `close`.
    ///
    /// # Errors
    ///
    /// Returns an error if commenting on or closing the issue fails.
    pub async fn apply(&self, report: &ModerationReport) -> Result<Option<String>> {
        let Some(directive) = report.decision.close_directive(&report.issue) else {
            return Ok(None);
        };
        let fetched = FetchedIssue {
            node_id: report.node_id.clone(),
            record: report.issue.clone(),
        };
        let url = close_issue(&self.client, &fetched, &directive).await?;
        Ok(Some(url))
    }
}
