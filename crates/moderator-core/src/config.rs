// SPDX-License-Identifier: Apache-2.0

//! Configuration management for the issue moderator.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `MODERATOR_`)
//! 2. Config file: `~/.config/issue-moderator/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Raise the minimum accepted product version
//! MODERATOR_POLICY__MIN_VERSION=1.11.0 moderator issue moderate 123 --repo langgenius/dify
//!
//! # Recognize an extra plugin repository (comma separated)
//! MODERATOR_POLICY__PLUGIN_REPOS=langgenius/dify-plugins,acme/plugins moderator policy show
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ModeratorError;

/// Directory name used under the XDG config home.
const APP_DIR: &str = "issue-moderator";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Moderation policy: repository sets, thresholds, minimum version.
    pub policy: PolicyConfig,
    /// Reference links embedded in closing comments.
    pub links: LinksConfig,
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// UI preferences.
    pub ui: UiConfig,
}

/// Moderation policy settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Product name used in version detection and comment text.
    pub product_name: String,
    /// Plugin repositories (`owner/name`), moderated for language, questions and clarity.
    #[serde(deserialize_with = "repo_list")]
    pub plugin_repos: Vec<String>,
    /// The flagship repository; the only one subject to the version check.
    pub flagship_repo: String,
    /// Companion repositories moderated with the same standards as the flagship.
    #[serde(deserialize_with = "repo_list")]
    pub companion_repos: Vec<String>,
    /// Oldest product version still accepted in bug reports.
    ///
    /// Must be a string: an unquoted `1.20` would read as the float `1.2`.
    #[serde(deserialize_with = "version_string")]
    pub min_version: String,
    /// CJK character ratio at or above which an issue is treated as non-English.
    pub cjk_ratio_threshold: f64,
}

/// Accepts only string values, so a version never round-trips through a float.
fn version_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    struct VersionString;

    impl Visitor<'_> for VersionString {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a quoted version string such as \"1.10.0\"")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(VersionString)
}

/// Accepts a list of repositories or one comma-separated string (environment form).
fn repo_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    struct RepoList;

    impl<'de> Visitor<'de> for RepoList {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a list of owner/name repositories or a comma-separated string")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Vec<String>, E> {
            Ok(value
                .split(',')
                .map(str::trim)
                .filter(|repo| !repo.is_empty())
                .map(String::from)
                .collect())
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<String>, A::Error> {
            let mut repos = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(repo) = seq.next_element::<String>()? {
                repos.push(repo);
            }
            Ok(repos)
        }
    }

    deserializer.deserialize_any(RepoList)
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            product_name: "Dify".to_string(),
            plugin_repos: vec![
                "langgenius/dify-plugins".to_string(),
                "langgenius/dify-official-plugins".to_string(),
            ],
            flagship_repo: "langgenius/dify".to_string(),
            companion_repos: vec![
                "langgenius/webapp-conversation".to_string(),
                "langgenius/webapp-text-generator".to_string(),
            ],
            min_version: "1.10.0".to_string(),
            cjk_ratio_threshold: 0.20,
        }
    }
}

/// Reference links rendered into closing comments.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Community forum for usage questions.
    pub forum: String,
    /// Community chat for usage questions.
    pub discord: String,
    /// Bug report issue template.
    pub bug_template: String,
    /// Code of conduct and language policy.
    pub code_of_conduct: String,
    /// Contributing guide.
    pub contributing: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            forum: "https://forum.dify.ai/".to_string(),
            discord: "https://discord.com/invite/FngNHpbcY7".to_string(),
            bug_template: "https://github.com/langgenius/dify/blob/3aecceff27c6b712628ad463c6e6ac15b8527ebe/.github/ISSUE_TEMPLATE/bug_report.yml".to_string(),
            code_of_conduct: "https://github.com/langgenius/dify/blob/4c1ad40f8e8a6ee58a958330558f2178b7e47fa7/.github/CODE_OF_CONDUCT.md".to_string(),
            contributing: "https://github.com/langgenius/dify/blob/25ac69afc5ac9324079be5f0d02b2a2b03dcc784/CONTRIBUTING.md".to_string(),
        }
    }
}

/// GitHub API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
    /// Maximum number of issues fetched concurrently.
    pub concurrency: usize,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_timeout_seconds: 10,
            concurrency: 5,
        }
    }
}

/// UI preferences.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    /// Enable colored output.
    pub color: bool,
    /// Ask for confirmation before closing an issue with `--apply`.
    pub confirm_before_close: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            confirm_before_close: true,
        }
    }
}

/// Returns the moderator configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/issue-moderator`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join(APP_DIR);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join(APP_DIR)
}

/// Returns the path to the default configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration from the default location.
///
/// Loads from the config file (if it exists) and environment variables.
/// Environment variables use the prefix `MODERATOR_` and double underscore
/// for nested keys (e.g., `MODERATOR_POLICY__MIN_VERSION`).
///
/// # Errors
///
/// Returns `ModeratorError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, ModeratorError> {
    load_config_from(None)
}

/// Load application configuration, optionally from an explicit file.
///
/// An explicit path must exist; the default path is optional.
///
/// # Errors
///
/// Returns `ModeratorError::Config` if the file is missing (explicit path
/// only), unreadable, or does not deserialize.
pub fn load_config_from(path: Option<&Path>) -> Result<AppConfig, ModeratorError> {
    let file_source = match path {
        Some(explicit) => File::from(explicit).required(true),
        None => File::from(config_file_path()).required(false),
    };

    let config = Config::builder()
        .add_source(file_source)
        .add_source(
            Environment::with_prefix("MODERATOR")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn from_toml(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .expect("should build config")
            .try_deserialize()
            .expect("should deserialize")
    }

    #[test]
    #[serial]
    fn test_load_config_defaults() {
        let config = load_config_from(None).expect("should load with defaults");

        assert_eq!(config.policy.product_name, "Dify");
        assert_eq!(config.policy.flagship_repo, "langgenius/dify");
        assert_eq!(config.policy.min_version, "1.10.0");
        assert!((config.policy.cjk_ratio_threshold - 0.20).abs() < f64::EPSILON);
        assert_eq!(config.policy.plugin_repos.len(), 2);
        assert_eq!(config.github.concurrency, 5);
        assert!(config.ui.confirm_before_close);
    }

    #[test]
    fn test_partial_policy_override_keeps_other_defaults() {
        let config = from_toml(
            r#"
[policy]
min_version = "1.11.2"
"#,
        );

        assert_eq!(config.policy.min_version, "1.11.2");
        assert_eq!(config.policy.flagship_repo, "langgenius/dify");
        assert_eq!(config.links.forum, "https://forum.dify.ai/");
    }

    #[test]
    fn test_repo_sets_from_toml() {
        let config = from_toml(
            r#"
[policy]
plugin_repos = ["acme/plugins"]
companion_repos = []
flagship_repo = "acme/app"
"#,
        );

        assert_eq!(config.policy.plugin_repos, vec!["acme/plugins"]);
        assert!(config.policy.companion_repos.is_empty());
        assert_eq!(config.policy.flagship_repo, "acme/app");
    }

    #[test]
    fn test_links_override() {
        let config = from_toml(
            r#"
[links]
forum = "https://example.com/forum"
"#,
        );

        assert_eq!(config.links.forum, "https://example.com/forum");
        assert_eq!(config.links.discord, LinksConfig::default().discord);
    }

    #[test]
    #[serial]
    fn test_load_config_from_explicit_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[policy]\ncjk_ratio_threshold = 0.5").expect("write");

        let config = load_config_from(Some(file.path())).expect("should load file");
        assert!((config.policy.cjk_ratio_threshold - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    #[serial]
    fn test_load_config_from_missing_explicit_file_fails() {
        let result = load_config_from(Some(Path::new("/nonexistent/moderator.toml")));
        assert!(matches!(result, Err(ModeratorError::Config { .. })));
    }

    #[test]
    #[serial]
    fn test_env_override_min_version() {
        unsafe {
            std::env::set_var("MODERATOR_POLICY__MIN_VERSION", "2.0.0");
        }

        let config = load_config_from(None).expect("should load");
        assert_eq!(config.policy.min_version, "2.0.0");

        unsafe {
            std::env::remove_var("MODERATOR_POLICY__MIN_VERSION");
        }
    }

    #[test]
    #[serial]
    fn test_env_override_keeps_two_part_version_as_text() {
        unsafe {
            std::env::set_var("MODERATOR_POLICY__MIN_VERSION", "1.20");
            std::env::set_var("MODERATOR_GITHUB__CONCURRENCY", "8");
            std::env::set_var("MODERATOR_POLICY__PLUGIN_REPOS", "acme/plugins,acme/extra");
        }

        let result = load_config_from(None);

        unsafe {
            std::env::remove_var("MODERATOR_POLICY__MIN_VERSION");
            std::env::remove_var("MODERATOR_GITHUB__CONCURRENCY");
            std::env::remove_var("MODERATOR_POLICY__PLUGIN_REPOS");
        }

        let config = result.expect("should load");
        assert_eq!(config.policy.min_version, "1.20");
        assert_eq!(config.github.concurrency, 8);
        assert_eq!(config.policy.plugin_repos, vec!["acme/plugins", "acme/extra"]);

        let policy = crate::moderation::Policy::from_config(&config).expect("valid policy");
        assert_eq!(policy.min_version(), crate::moderation::Version::new(1, 20, 0));
    }

    #[test]
    fn test_unquoted_min_version_is_rejected() {
        let result = Config::builder()
            .add_source(config::File::from_str(
                "[policy]\nmin_version = 1.20\n",
                config::FileFormat::Toml,
            ))
            .build()
            .expect("should build config")
            .try_deserialize::<AppConfig>();

        let err = result.expect_err("float version must not deserialize");
        assert!(err.to_string().contains("version string"));
    }

    #[test]
    #[serial]
    fn test_config_dir_respects_xdg_config_home() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", "/custom/config");
        }

        let dir = config_dir();
        assert_eq!(dir, PathBuf::from("/custom/config/issue-moderator"));

        unsafe {
            match original {
                Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_ignores_empty_xdg_config_home() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", "");
        }

        let dir = config_dir();
        assert!(dir.ends_with("issue-moderator"));

        unsafe {
            match original {
                Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
    }

    #[test]
    fn test_config_file_path() {
        assert!(config_file_path().ends_with("config.toml"));
    }
}
