// SPDX-License-Identifier: Apache-2.0

//! CLI-specific `TokenProvider` implementation.

use moderator_core::TokenProvider;
use moderator_core::github::auth::resolve_token;
use secrecy::SecretString;
use tracing::debug;

/// Resolves the GitHub token from `GH_TOKEN`, `GITHUB_TOKEN` or the GitHub CLI.
pub struct CliTokenProvider;

impl TokenProvider for CliTokenProvider {
    fn github_token(&self) -> Option<SecretString> {
        if let Some((token, source)) = resolve_token() {
            debug!(%source, "Resolved GitHub token");
            Some(token)
        } else {
            debug!("No GitHub token found in CLI sources");
            None
        }
    }
}
