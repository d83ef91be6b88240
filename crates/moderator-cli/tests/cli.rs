// SPDX-License-Identifier: Apache-2.0

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;

const PLUGIN_QUESTION: &str = "tests/fixtures/plugin_question.json";
const CORE_TRUSTED: &str = "tests/fixtures/core_trusted.json";

/// A command isolated from the user's config file and environment overrides.
fn moderator(config_home: &tempfile::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("moderator");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("MODERATOR_POLICY__MIN_VERSION")
        .env_remove("MODERATOR_POLICY__PLUGIN_REPOS")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_version() {
    let mut cmd = cargo_bin_cmd!("moderator");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("moderator"));
}

#[test]
fn test_help_contains_all_commands() {
    let mut cmd = cargo_bin_cmd!("moderator");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("issue"))
        .stdout(predicate::str::contains("policy"));
}

#[test]
fn test_check_text_output() {
    let home = tempfile::tempdir().unwrap();
    moderator(&home)
        .args(["issue", "check", PLUGIN_QUESTION])
        .assert()
        .success()
        .stdout(predicate::str::contains("langgenius/dify-plugins#812"))
        .stdout(predicate::str::contains("question"))
        .stdout(predicate::str::contains("Hi @newcomer"));
}

#[test]
fn test_check_json_output() {
    let home = tempfile::tempdir().unwrap();
    let output = moderator(&home)
        .args(["issue", "check", PLUGIN_QUESTION, "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["decision"]["action"], "close");
    assert_eq!(json["decision"]["category"], "question");
    assert_eq!(json["issue"]["number"], 812);
}

#[test]
fn test_check_yaml_output() {
    let home = tempfile::tempdir().unwrap();
    moderator(&home)
        .args(["issue", "check", CORE_TRUSTED, "-o", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("trusted-author"))
        .stdout(predicate::str::contains("skip"));
}

#[test]
fn test_check_markdown_prints_comment_only() {
    let home = tempfile::tempdir().unwrap();
    moderator(&home)
        .args(["issue", "check", PLUGIN_QUESTION, "-o", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Hi @newcomer, thanks for opening this issue.",
        ));
}

#[test]
fn test_check_reads_stdin() {
    let home = tempfile::tempdir().unwrap();
    let issue = std::fs::read_to_string(CORE_TRUSTED).unwrap();
    moderator(&home)
        .args(["issue", "check", "-", "-o", "json"])
        .write_stdin(issue)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"trusted-author\""));
}

#[test]
fn test_check_malformed_file_fails() {
    let home = tempfile::tempdir().unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    moderator(&home)
        .args(["issue", "check"])
        .arg(file.path())
        .assert()
        .failure()
        .code(predicate::eq(1))
        .stderr(predicate::str::contains("Failed to parse issue record"));
}

#[test]
fn test_policy_show_json() {
    let home = tempfile::tempdir().unwrap();
    let output = moderator(&home)
        .args(["policy", "show", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["policy"]["flagship_repo"], "langgenius/dify");
    assert_eq!(json["policy"]["min_version"], "1.10.0");
    assert_eq!(json["rule_tables"][0]["class"], "plugin");
}

#[test]
fn test_config_file_overrides_policy() {
    let home = tempfile::tempdir().unwrap();
    let config_path = home.path().join("custom.toml");
    std::fs::write(
        &config_path,
        "[policy]\nproduct_name = \"Acme\"\nflagship_repo = \"acme/acme\"\nplugin_repos = []\ncompanion_repos = []\nmin_version = \"2.1\"\n",
    )
    .unwrap();

    let output = moderator(&home)
        .args(["policy", "show", "-o", "json", "--config"])
        .arg(&config_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["policy"]["product_name"], "Acme");
    assert_eq!(json["policy"]["min_version"], "2.1.0");
}

#[test]
fn test_invalid_policy_fails_with_hint() {
    let home = tempfile::tempdir().unwrap();
    let config_path = home.path().join("bad.toml");
    std::fs::write(&config_path, "[policy]\ncjk_ratio_threshold = 2.0\n").unwrap();

    moderator(&home)
        .args(["policy", "show", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .code(predicate::eq(1))
        .stderr(predicate::str::contains("cjk_ratio_threshold"))
        .stderr(predicate::str::contains("Tip:"));
}

#[test]
fn test_missing_config_file_fails() {
    let home = tempfile::tempdir().unwrap();
    moderator(&home)
        .args(["policy", "show", "--config", "/nonexistent/moderator.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_moderate_rejects_bare_number_without_repo() {
    let home = tempfile::tempdir().unwrap();
    moderator(&home)
        .args(["issue", "moderate", "123"])
        .assert()
        .failure()
        .code(predicate::eq(1))
        .stderr(predicate::str::contains("Invalid issue reference '123'"))
        .stderr(predicate::str::contains("--repo"));
}

#[test]
fn test_moderate_rejects_repo_mismatch() {
    let home = tempfile::tempdir().unwrap();
    moderator(&home)
        .args([
            "issue",
            "moderate",
            "https://github.com/langgenius/dify/issues/1",
            "--repo",
            "langgenius/dify-plugins",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid issue reference"));
}

#[test]
fn test_moderate_requires_reference() {
    let mut cmd = cargo_bin_cmd!("moderator");
    cmd.args(["issue", "moderate"])
        .assert()
        .failure()
        .code(predicate::eq(2));
}

#[test]
fn test_invalid_command() {
    let mut cmd = cargo_bin_cmd!("moderator");
    cmd.arg("invalidcmd")
        .assert()
        .failure()
        .code(predicate::eq(2));
}

#[test]
fn test_invalid_output_format() {
    let mut cmd = cargo_bin_cmd!("moderator");
    cmd.args(["policy", "show", "--output", "xml"])
        .assert()
        .failure()
        .code(predicate::eq(2))
        .stderr(predicate::str::contains("invalid").or(predicate::str::contains("xml")));
}
