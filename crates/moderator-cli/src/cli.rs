// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for the moderator.
//!
//! Uses clap's derive API with noun-verb subcommands.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// YAML output for programmatic consumption
    Yaml,
    /// Markdown: the closing comments as they would be posted
    Markdown,
}

/// Global output configuration passed to commands.
#[derive(Clone, Debug)]
pub struct OutputContext {
    /// Output format (text, json, yaml, markdown)
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners, progress)
    pub quiet: bool,
    /// Show per-reason detail and timings
    pub verbose: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool, verbose: bool) -> Self {
        Self {
            format,
            quiet,
            verbose,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, prompts) may be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && self.is_text()
    }

    /// Returns true for the human-readable text format.
    pub fn is_text(&self) -> bool {
        matches!(self.format, OutputFormat::Text)
    }
}

/// Moderator - rule-based triage for issue trackers.
///
/// Fetches issues, decides whether they meet the repository's standards and
/// previews the closing comment. Nothing is changed on GitHub unless
/// `--apply` is given.
#[derive(Parser, Debug)]
#[command(name = "moderator")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format (text, json, yaml, markdown)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (spinners, progress)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Moderate GitHub issues
    #[command(subcommand)]
    Issue(IssueCommand),

    /// Inspect the moderation policy
    #[command(subcommand)]
    Policy(PolicyCommand),
}

/// Issue subcommands
#[derive(Subcommand, Debug)]
pub enum IssueCommand {
    /// Fetch issues and decide whether to close them (dry run unless --apply)
    Moderate {
        /// Issue references (URL, owner/repo#number, or number)
        #[arg(value_name = "REFERENCE", required = true)]
        references: Vec<String>,

        /// Repository for bare issue numbers (e.g., "langgenius/dify")
        #[arg(long, short = 'r')]
        repo: Option<String>,

        /// Close issues whose decision is `close`
        #[arg(long)]
        apply: bool,

        /// Skip the confirmation prompt when applying
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Decide on an issue stored as JSON, without contacting GitHub
    Check {
        /// Path to an issue record JSON file, or `-` for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Policy subcommands
#[derive(Subcommand, Debug)]
pub enum PolicyCommand {
    /// Show the effective policy and rule order
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_moderate_parses_flags() {
        let cli = Cli::try_parse_from([
            "moderator",
            "issue",
            "moderate",
            "123",
            "langgenius/dify#7",
            "--repo",
            "langgenius/dify",
            "--apply",
            "-y",
            "-o",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        let Commands::Issue(IssueCommand::Moderate {
            references,
            repo,
            apply,
            yes,
        }) = cli.command
        else {
            panic!("expected issue moderate");
        };
        assert_eq!(references, vec!["123", "langgenius/dify#7"]);
        assert_eq!(repo.as_deref(), Some("langgenius/dify"));
        assert!(apply);
        assert!(yes);
    }

    #[test]
    fn test_moderate_requires_reference() {
        assert!(Cli::try_parse_from(["moderator", "issue", "moderate"]).is_err());
    }

    #[test]
    fn test_non_text_formats_are_not_interactive() {
        let ctx = OutputContext {
            format: OutputFormat::Json,
            quiet: false,
            verbose: false,
            is_tty: true,
        };
        assert!(!ctx.is_interactive());
        assert!(!ctx.is_text());
    }
}
