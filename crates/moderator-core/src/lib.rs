// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # Moderator Core
//!
//! Core library for the issue moderator - rule-based triage for issue trackers.
//!
//! This crate provides reusable components for:
//! - The moderation decision engine and its content classifiers
//! - Policy and configuration management
//! - GitHub API integration (authentication, issue fetch, close)
//! - Bounded concurrent processing with retry
//!
//! ## Quick Start
//!
//! ```rust
//! use moderator_core::{IssueRecord, IssueState, Moderator, Policy};
//!
//! let moderator = Moderator::new(Policy::default());
//!
//! let issue = IssueRecord::builder()
//!     .repo("langgenius/dify")
//!     .number(123)
//!     .title("Workflow run crashes when the HTTP node times out")
//!     .body("Dify version: 1.9.0")
//!     .state(IssueState::Open)
//!     .build();
//!
//! let decision = moderator.decide(&issue);
//! println!("{} [{}]", decision.action, decision.category);
//! ```
//!
//! ## Modules
//!
//! - [`moderation`] - Classifiers, policy and the decision engine
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`github`] - GitHub API (reference parsing, auth, issues)
//! - [`facade`] - Fetch, decide and close in one session

// ============================================================================
// Authentication
// ============================================================================

pub use auth::{DefaultTokenProvider, StaticTokenProvider, TokenProvider};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::ModeratorError;

/// Convenience Result type for moderator operations.
///
/// This is equivalent to `std::result::Result<T, ModeratorError>`.
pub type Result<T> = std::result::Result<T, ModeratorError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AppConfig, GitHubConfig, LinksConfig, PolicyConfig, UiConfig, config_dir, config_file_path,
    load_config, load_config_from,
};

// ============================================================================
// Issue Model
// ============================================================================

pub use issue::{AuthorAssociation, IssueRecord, IssueState};

// ============================================================================
// Moderation
// ============================================================================

pub use moderation::{
    Action, Category, CloseDirective, CloseReason, Decision, Moderator, Policy, RepoClass,
    Version,
};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::{IssueTarget, parse_issue_reference, parse_owner_repo};

// ============================================================================
// Retry Logic
// ============================================================================

pub use retry::{is_retryable_http, is_retryable_octocrab, retry_backoff};

// ============================================================================
// Platform-Agnostic Facade
// ============================================================================

pub use facade::{ModerationReport, ModerationSession};

// ============================================================================
// Modules
// ============================================================================

pub mod auth;
pub mod bulk;
pub mod config;
pub mod error;
pub mod facade;
pub mod github;
pub mod issue;
pub mod moderation;
pub mod retry;
