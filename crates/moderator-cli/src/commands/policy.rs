// SPDX-License-Identifier: Apache-2.0

//! Show the effective moderation policy.

use std::path::Path;

use anyhow::Result;
use moderator_core::config::config_file_path;
use moderator_core::{AppConfig, Moderator, Policy, RepoClass};

use super::types::{PolicyResult, RuleTable};

/// Validates the configured policy and lists the rule order per class.
pub fn run(config: &AppConfig, config_path: Option<&Path>) -> Result<PolicyResult> {
    let policy = Policy::from_config(config)?;
    let rule_tables = [RepoClass::Plugin, RepoClass::Flagship, RepoClass::Companion]
        .into_iter()
        .map(|class| RuleTable {
            class,
            rules: Moderator::rule_names(class),
        })
        .collect();

    let config_path = config_path.map_or_else(config_file_path, Path::to_path_buf);
    Ok(PolicyResult {
        config_path: config_path.display().to_string(),
        policy,
        rule_tables,
    })
}
