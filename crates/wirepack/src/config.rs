// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decode policy configuration.
//!
//! External buffers frequently carry padding after the last field, so the
//! default policy ignores trailing bytes. Strict consumers can reject them.
//!
//! # Environment
//!
//! | Variable                  | Values              | Default  |
//! |---------------------------|---------------------|----------|
//! | `WIREPACK_TRAILING_BYTES` | `ignore` / `reject` | `ignore` |

/// Environment variable consulted by [`DecodeConfig::from_env`].
pub const TRAILING_BYTES_ENV: &str = "WIREPACK_TRAILING_BYTES";

/// What to do with buffer bytes past the last decoded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TrailingBytes {
    /// Leave them uninspected.
    #[default]
    Ignore,
    /// Fail the decode with `WireError::TrailingBytes`.
    Reject,
}

impl TrailingBytes {
    /// Parse a policy name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Some(Self::Ignore),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Options for a top-level decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeConfig {
    /// Trailing data policy (applies to the outermost packet only).
    pub trailing_bytes: TrailingBytes,
}

impl DecodeConfig {
    /// Lenient defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any unconsumed bytes.
    pub fn strict() -> Self {
        Self {
            trailing_bytes: TrailingBytes::Reject,
        }
    }

    /// Set the trailing data policy.
    pub fn with_trailing_bytes(mut self, policy: TrailingBytes) -> Self {
        self.trailing_bytes = policy;
        self
    }

    /// Build from `WIREPACK_TRAILING_BYTES`, falling back to defaults.
    pub fn from_env() -> Self {
        match std::env::var(TRAILING_BYTES_ENV) {
            Ok(raw) => Self::from_env_value(&raw),
            Err(_) => Self::default(),
        }
    }

    fn from_env_value(raw: &str) -> Self {
        match TrailingBytes::parse(raw) {
            Some(policy) => Self::default().with_trailing_bytes(policy),
            None => {
                log::debug!(
                    "[wirepack] ignoring {}={:?} (expected 'ignore' or 'reject')",
                    TRAILING_BYTES_ENV,
                    raw
                );
                Self::default()
            }
        }
    }
}
