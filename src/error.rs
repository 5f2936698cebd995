// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Configuration errors.

use std::path::PathBuf;

/// Error raised while loading or validating an [`Environment`](crate::Environment).
///
/// Every variant names the field or variable at fault so the startup log
/// points straight at the misconfiguration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("required configuration missing: {0}")]
    MissingConfig(String),

    #[error("configuration field must not be empty: {0}")]
    EmptyField(&'static str),

    #[error("invalid URL in {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("invalid Auth0 domain prefix {0:?} (expected a bare tenant name such as \"my-tenant\" or \"my-tenant.eu\")")]
    InvalidDomainPrefix(String),

    #[error("invalid boolean for {name}: {value:?}")]
    InvalidFlag { name: &'static str, value: String },

    #[error("environment variable {0} is not valid UTF-8")]
    NonUnicodeVar(String),

    #[error("invalid environment JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Short machine-readable code, stable across message wording changes.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::MissingConfig(_) => "missing_config",
            ConfigError::EmptyField(_) => "empty_field",
            ConfigError::InvalidUrl { .. } => "invalid_url",
            ConfigError::InvalidDomainPrefix(_) => "invalid_domain_prefix",
            ConfigError::InvalidFlag { .. } => "invalid_flag",
            ConfigError::NonUnicodeVar(_) => "non_unicode_var",
            ConfigError::Json(_) => "invalid_json",
            ConfigError::Io { .. } => "io_error",
        }
    }
}
