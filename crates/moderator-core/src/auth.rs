// SPDX-License-Identifier: Apache-2.0

//! Token provider abstraction for credential resolution.
//!
//! Front ends implement [`TokenProvider`] to hand a GitHub token to the
//! facade without the core knowing where it came from.

use secrecy::SecretString;

use crate::github::auth::resolve_token;

/// Provides GitHub credentials for API calls.
///
/// Implementations should handle credential lookup and return `None` if
/// credentials are not available.
pub trait TokenProvider: Send + Sync {
    /// Retrieves the GitHub API token.
    ///
    /// Returns `None` if no token is available from any source.
    fn github_token(&self) -> Option<SecretString>;
}

/// Resolves the token from `GH_TOKEN`, `GITHUB_TOKEN`, then `gh auth token`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTokenProvider;

impl TokenProvider for DefaultTokenProvider {
    fn github_token(&self) -> Option<SecretString> {
        resolve_token().map(|(token, _source)| token)
    }
}

/// A fixed token, for callers that already hold one.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider(pub SecretString);

impl TokenProvider for StaticTokenProvider {
    fn github_token(&self) -> Option<SecretString> {
        Some(self.0.clone())
    }
}
