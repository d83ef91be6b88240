// SPDX-License-Identifier: Apache-2.0

//! Error types for the issue moderator.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.
//!
//! Moderation itself never fails: every well-formed [`IssueRecord`] yields a
//! [`Decision`]. The variants here cover the layers around the engine, so a
//! caller can never mistake "could not fetch the issue" for "the issue does
//! not meet the standards".
//!
//! [`IssueRecord`]: crate::issue::IssueRecord
//! [`Decision`]: crate::moderation::Decision

use thiserror::Error;

/// Errors that can occur outside the decision engine.
#[derive(Error, Debug)]
pub enum ModeratorError {
    /// The issue reference could not be parsed into a repository and number.
    #[error("Invalid issue reference '{input}': {reason}")]
    InvalidReference {
        /// The reference as supplied by the user.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// GitHub API error while fetching or mutating an issue.
    #[error("GitHub API error: {message}")]
    GitHub {
        /// Error message.
        message: String,
    },

    /// No GitHub token could be resolved.
    #[error(
        "Authentication required - set GH_TOKEN or GITHUB_TOKEN, or log in with `gh auth login`"
    )]
    NotAuthenticated,

    /// Configuration file or policy error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },
}

impl ModeratorError {
    /// Shorthand for an [`ModeratorError::InvalidReference`] error.
    pub(crate) fn invalid_reference(input: &str, reason: impl Into<String>) -> Self {
        ModeratorError::InvalidReference {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`ModeratorError::Config`] error.
    pub(crate) fn config(message: impl Into<String>) -> Self {
        ModeratorError::Config {
            message: message.into(),
        }
    }
}

impl From<octocrab::Error> for ModeratorError {
    fn from(err: octocrab::Error) -> Self {
        ModeratorError::GitHub {
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for ModeratorError {
    fn from(err: config::ConfigError) -> Self {
        ModeratorError::Config {
            message: err.to_string(),
        }
    }
}
