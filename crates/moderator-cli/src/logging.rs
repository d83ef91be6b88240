// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the moderator CLI.
//!
//! Uses `tracing` with `tracing-subscriber`. The `-v` flag only affects
//! user-facing output; tracing is controlled through `RUST_LOG`.
//!
//! ```bash
//! # Rule matches and GitHub calls
//! RUST_LOG=moderator_core=debug moderator issue moderate langgenius/dify#123
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "moderator=warn,moderator_core=warn,octocrab=error";

/// Initialize the logging subsystem, writing to stderr.
pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .expect("valid default filter directives");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
