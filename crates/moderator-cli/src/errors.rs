// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `ModeratorError` and appends a remedy for
//! each failure class. The core crate carries the structured data; this
//! module decides how it reads in a terminal.

use anyhow::Error;
use moderator_core::ModeratorError;
use moderator_core::config::config_file_path;

/// Formats an error for CLI display with a hint when one applies.
///
/// Errors that are not a `ModeratorError` are shown with their full context chain.
pub fn format_error(error: &Error) -> String {
    let Some(moderator_err) = error.downcast_ref::<ModeratorError>() else {
        return format!("{error:#}");
    };

    match moderator_err {
        ModeratorError::InvalidReference { .. } => format!(
            "{error:#}\n\nTip: Use an issue URL, owner/repo#123, or a bare number with --repo owner/repo."
        ),
        ModeratorError::NotAuthenticated => moderator_err.to_string(),
        ModeratorError::GitHub { .. } => format!(
            "{error:#}\n\nTip: Check that your token can read the repository (`gh auth status`) and try again."
        ),
        ModeratorError::Config { .. } => format!(
            "{error:#}\n\nTip: Check your config file at {}",
            config_file_path().display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_invalid_reference() {
        let error = anyhow::Error::new(ModeratorError::InvalidReference {
            input: "123".to_string(),
            reason: "a bare number needs --repo".to_string(),
        });
        let formatted = format_error(&error);

        assert!(formatted.contains("Invalid issue reference '123'"));
        assert!(formatted.contains("--repo owner/repo"));
    }

    #[test]
    fn test_format_not_authenticated() {
        let error = anyhow::Error::new(ModeratorError::NotAuthenticated);
        let formatted = format_error(&error);

        assert!(formatted.contains("GH_TOKEN"));
        assert!(!formatted.contains("Tip:"));
    }

    #[test]
    fn test_format_github_error_keeps_context() {
        let error = anyhow::Error::new(ModeratorError::GitHub {
            message: "Could not resolve to an Issue".to_string(),
        })
        .context("Failed to fetch langgenius/dify#1");
        let formatted = format_error(&error);

        assert!(formatted.starts_with("Failed to fetch langgenius/dify#1"));
        assert!(formatted.contains("Could not resolve to an Issue"));
        assert!(formatted.contains("gh auth status"));
    }

    #[test]
    fn test_format_config_error() {
        let error = anyhow::Error::new(ModeratorError::Config {
            message: "policy.min_version: invalid".to_string(),
        });
        let formatted = format_error(&error);

        assert!(formatted.contains("Configuration error"));
        assert!(formatted.contains("config file"));
    }

    #[test]
    fn test_format_other_error() {
        let error = anyhow::anyhow!("disk full").context("Failed to read issue file");
        assert_eq!(format_error(&error), "Failed to read issue file: disk full");
    }
}
