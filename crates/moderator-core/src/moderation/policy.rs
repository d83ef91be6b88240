// SPDX-License-Identifier: Apache-2.0

//! Moderation policy: which repositories are moderated and how strictly.
//!
//! A [`Policy`] is built once from [`PolicyConfig`] and [`LinksConfig`],
//! validated, and then shared read-only by the engine.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::{AppConfig, LinksConfig, PolicyConfig};
use crate::error::ModeratorError;
use crate::github::parse_owner_repo;

use super::patterns::ProductPatterns;
use super::version::Version;

/// How a repository is moderated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepoClass {
    /// Plugin repository: language, question and clarity checks.
    Plugin,
    /// The flagship repository: core standards plus the version check.
    Flagship,
    /// Companion repository: core standards without the version check.
    Companion,
}

/// Validated, immutable moderation policy.
#[derive(Debug, Clone, Serialize)]
pub struct Policy {
    product_name: String,
    plugin_repos: BTreeSet<String>,
    flagship_repo: String,
    companion_repos: BTreeSet<String>,
    min_version: Version,
    cjk_ratio_threshold: f64,
    links: LinksConfig,
    #[serde(skip)]
    product: ProductPatterns,
}

impl Policy {
    /// Builds a policy from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// See [`Policy::from_parts`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ModeratorError> {
        Self::from_parts(&config.policy, &config.links)
    }

    /// Builds and validates a policy.
    ///
    /// # Errors
    ///
    /// Returns `ModeratorError::Config` if a repository is not `owner/name`,
    /// a repository appears in more than one class, the minimum version does
    /// not parse, the threshold is outside `(0, 1]`, or the product name is
    /// empty.
    pub fn from_parts(policy: &PolicyConfig, links: &LinksConfig) -> Result<Self, ModeratorError> {
        let product_name = policy.product_name.trim();
        if product_name.is_empty() {
            return Err(ModeratorError::config("policy.product_name must not be empty"));
        }

        let threshold = policy.cjk_ratio_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ModeratorError::config(format!(
                "policy.cjk_ratio_threshold must be in (0, 1], got {threshold}"
            )));
        }

        let min_version: Version = policy
            .min_version
            .parse()
            .map_err(|e| ModeratorError::config(format!("policy.min_version: {e}")))?;

        let plugin_repos = normalize_repos("policy.plugin_repos", &policy.plugin_repos)?;
        let companion_repos = normalize_repos("policy.companion_repos", &policy.companion_repos)?;
        let flagship_repo = normalize_repo("policy.flagship_repo", &policy.flagship_repo)?;

        if let Some(repo) = plugin_repos.intersection(&companion_repos).next() {
            return Err(ModeratorError::config(format!(
                "repository '{repo}' is listed as both plugin and companion"
            )));
        }
        if plugin_repos.contains(&flagship_repo) || companion_repos.contains(&flagship_repo) {
            return Err(ModeratorError::config(format!(
                "flagship repository '{flagship_repo}' is also listed as plugin or companion"
            )));
        }

        let product = ProductPatterns::compile(product_name)
            .map_err(|e| ModeratorError::config(format!("policy.product_name: {e}")))?;

        Ok(Self {
            product_name: product_name.to_string(),
            plugin_repos,
            flagship_repo,
            companion_repos,
            min_version,
            cjk_ratio_threshold: threshold,
            links: links.clone(),
            product,
        })
    }

    /// Classifies `repo`, or returns `None` if it is not moderated.
    #[must_use]
    pub fn repo_class(&self, repo: &str) -> Option<RepoClass> {
        let repo = repo.trim().to_lowercase();
        if self.plugin_repos.contains(&repo) {
            Some(RepoClass::Plugin)
        } else if repo == self.flagship_repo {
            Some(RepoClass::Flagship)
        } else if self.companion_repos.contains(&repo) {
            Some(RepoClass::Companion)
        } else {
            None
        }
    }

    /// Product name used in version detection and comments.
    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Plugin repositories, lower-cased.
    #[must_use]
    pub fn plugin_repos(&self) -> &BTreeSet<String> {
        &self.plugin_repos
    }

    /// The flagship repository, lower-cased.
    #[must_use]
    pub fn flagship_repo(&self) -> &str {
        &self.flagship_repo
    }

    /// Companion repositories, lower-cased.
    #[must_use]
    pub fn companion_repos(&self) -> &BTreeSet<String> {
        &self.companion_repos
    }

    /// Oldest accepted product version.
    #[must_use]
    pub fn min_version(&self) -> Version {
        self.min_version
    }

    /// CJK ratio at or above which an issue is non-English.
    #[must_use]
    pub fn cjk_ratio_threshold(&self) -> f64 {
        self.cjk_ratio_threshold
    }

    /// Links rendered into closing comments.
    #[must_use]
    pub fn links(&self) -> &LinksConfig {
        &self.links
    }

    pub(crate) fn product_patterns(&self) -> &ProductPatterns {
        &self.product
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::from_config(&AppConfig::default()).expect("built-in policy is valid")
    }
}

fn normalize_repo(field: &str, repo: &str) -> Result<String, ModeratorError> {
    let (owner, name) = parse_owner_repo(repo)
        .map_err(|e| ModeratorError::config(format!("{field}: {e}")))?;
    Ok(format!("{owner}/{name}").to_lowercase())
}

fn normalize_repos(field: &str, repos: &[String]) -> Result<BTreeSet<String>, ModeratorError> {
    repos.iter().map(|repo| normalize_repo(field, repo)).collect()
}
