// SPDX-License-Identifier: Apache-2.0

//! Product version extraction from issue bodies.

use std::fmt;
use std::str::FromStr;

use regex::Captures;
use serde::{Serialize, Serializer};
use thiserror::Error;

use super::patterns::{Patterns, ProductPatterns};

/// A `major.minor.patch` version. Ordering is lexicographic on the three parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// Major version.
    pub major: u64,
    /// Minor version.
    pub minor: u64,
    /// Patch version; `0` when omitted.
    pub patch: u64,
}

impl Version {
    /// Creates a version from its parts.
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Builds a version from `major`, `minor` and optional `patch` capture groups.
    ///
    /// The groups hold ASCII digits only, so the sole parse failure is
    /// overflow; such parts saturate to `u64::MAX`.
    fn from_captures(captures: &Captures<'_>) -> Option<Self> {
        let part = |index: usize| {
            captures
                .get(index)
                .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        };
        Some(Self {
            major: part(1)?,
            minor: part(2)?,
            patch: part(3).unwrap_or(0),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Error returned when a version string does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version '{0}': expected major.minor[.patch]")]
pub struct ParseVersionError(String);

impl FromStr for Version {
    type Err = ParseVersionError;

    /// Parses `1.2`, `1.2.3` or `v1.2.3`. Anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
        let parts: Vec<&str> = digits.split('.').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(ParseVersionError(s.to_string()));
        }

        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseVersionError(s.to_string()));
            }
            *slot = part.parse().map_err(|_| ParseVersionError(s.to_string()))?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

/// Extracts the reported product version from an issue body.
///
/// A line labelling the product version (e.g. "Dify version: 1.9.2") wins
/// over an incidental mention elsewhere, even one that comes first. Without
/// such a line the first inline mention ("dify v1.9") is used.
#[must_use]
pub fn extract_version(body: &str, product: &ProductPatterns) -> Option<Version> {
    let semver = &Patterns::global().semver;

    let labelled = body
        .lines()
        .filter(|line| product.version_line.is_match(line))
        .find_map(|line| {
            semver
                .captures(line)
                .and_then(|captures| Version::from_captures(&captures))
        });

    labelled.or_else(|| {
        product
            .version_inline
            .captures(body)
            .and_then(|captures| Version::from_captures(&captures))
    })
}
