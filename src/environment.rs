// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Client Environment Record
//!
//! The typed startup configuration of the ordering client:
//!
//! ```text
//! {
//!   "production": false,
//!   "apiServerUrl": "http://127.0.0.1:5000",
//!   "auth0": {
//!     "url": "asma.au",
//!     "audience": "Coffee_Shop",
//!     "clientId": "...",
//!     "callbackURL": "http://localhost:8100"
//!   }
//! }
//! ```
//!
//! An [`Environment`] is built once (defaults, JSON file or environment
//! variables), validated, and then only read. There are no setters; share it
//! with [`Environment::into_shared`].

use std::{env::VarError, fs, path::Path, sync::Arc};

use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, info};
use url::Url;

use crate::auth0::Auth0Settings;
use crate::config::{
    API_SERVER_URL_ENV, AUTH0_AUDIENCE_ENV, AUTH0_CALLBACK_URL_ENV, AUTH0_CLIENT_ID_ENV,
    AUTH0_DOMAIN_PREFIX_ENV, DEFAULT_API_SERVER_URL, DEFAULT_AUTH0_AUDIENCE,
    DEFAULT_AUTH0_CALLBACK_URL, DEFAULT_AUTH0_CLIENT_ID, DEFAULT_AUTH0_DOMAIN_PREFIX,
    ENVIRONMENT_FILE_ENV, PRODUCTION_ENV,
};
use crate::error::ConfigError;

/// Startup configuration of the ordering client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Environment {
    /// Build-mode flag consumed by the hosting application
    production: bool,
    /// Base address of the backend API
    #[serde(serialize_with = "serialize_base_url")]
    api_server_url: Url,
    /// Identity-provider parameters
    auth0: Auth0Settings,
}

impl Environment {
    pub fn new(production: bool, api_server_url: Url, auth0: Auth0Settings) -> Self {
        Self {
            production,
            api_server_url,
            auth0,
        }
    }

    /// The development build: local API server, development Auth0 tenant.
    pub fn development() -> Self {
        Self {
            production: false,
            api_server_url: Url::parse(DEFAULT_API_SERVER_URL)
                .expect("default API server URL is valid"),
            auth0: Auth0Settings::new(
                DEFAULT_AUTH0_DOMAIN_PREFIX,
                DEFAULT_AUTH0_AUDIENCE,
                DEFAULT_AUTH0_CLIENT_ID,
                Url::parse(DEFAULT_AUTH0_CALLBACK_URL).expect("default callback URL is valid"),
            ),
        }
    }

    /// Parse and validate the JSON form.
    ///
    /// Every field is required and unknown keys are rejected.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let env: Self = serde_json::from_str(json)?;
        env.validate()?;
        Ok(env)
    }

    /// Read and validate a JSON environment file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Load from the process environment.
    ///
    /// See [`crate::config`] for the variables and their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|name| env_value(name, std::env::var(name)))
    }

    /// Load using `lookup` to resolve variable names.
    ///
    /// Resolution order per field: variable, then `ENVIRONMENT_FILE`, then the
    /// development default. Defaults never apply in production.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load(|name| Ok(lookup(name)))
    }

    fn load<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let var = |name: &str| -> Result<Option<String>, ConfigError> {
            Ok(lookup(name)?
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()))
        };

        let base = match var(ENVIRONMENT_FILE_ENV)? {
            Some(path) => {
                debug!(path = %path, "Loading environment file");
                Some(Self::from_file(&path)?)
            }
            None => None,
        };

        let production = match var(PRODUCTION_ENV)? {
            Some(raw) => parse_flag(PRODUCTION_ENV, &raw)?,
            None => base.as_ref().is_some_and(|b| b.production),
        };

        let resolve = |name: &'static str,
                       from_file: Option<String>,
                       default: &str|
         -> Result<String, ConfigError> {
            if let Some(value) = var(name)? {
                debug!(variable = name, source = "env", "Resolved configuration value");
                return Ok(value);
            }
            if let Some(value) = from_file {
                debug!(variable = name, source = "file", "Resolved configuration value");
                return Ok(value);
            }
            if production {
                return Err(ConfigError::MissingConfig(name.to_string()));
            }
            debug!(variable = name, source = "default", "Resolved configuration value");
            Ok(default.to_string())
        };

        let api_server_url = resolve(
            API_SERVER_URL_ENV,
            base.as_ref().map(|b| b.api_server_url.to_string()),
            DEFAULT_API_SERVER_URL,
        )?;
        let domain_prefix = resolve(
            AUTH0_DOMAIN_PREFIX_ENV,
            base.as_ref().map(|b| b.auth0.domain_prefix().to_string()),
            DEFAULT_AUTH0_DOMAIN_PREFIX,
        )?;
        let audience = resolve(
            AUTH0_AUDIENCE_ENV,
            base.as_ref().map(|b| b.auth0.audience().to_string()),
            DEFAULT_AUTH0_AUDIENCE,
        )?;
        let client_id = resolve(
            AUTH0_CLIENT_ID_ENV,
            base.as_ref().map(|b| b.auth0.client_id().to_string()),
            DEFAULT_AUTH0_CLIENT_ID,
        )?;
        let callback_url = resolve(
            AUTH0_CALLBACK_URL_ENV,
            base.as_ref().map(|b| b.auth0.callback_url().to_string()),
            DEFAULT_AUTH0_CALLBACK_URL,
        )?;

        let env = Self {
            production,
            api_server_url: parse_url("apiServerUrl", &api_server_url)?,
            auth0: Auth0Settings::new(
                domain_prefix,
                audience,
                client_id,
                parse_url("auth0.callbackURL", &callback_url)?,
            ),
        };
        env.validate()?;

        info!(
            production = env.production,
            api_server_url = %env.api_server_url,
            auth0_domain = %env.auth0.domain(),
            audience = %env.auth0.audience(),
            "Client environment loaded"
        );
        Ok(env)
    }

    /// Check the record's invariants, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_web_url("apiServerUrl", &self.api_server_url)?;
        self.auth0.validate()
    }

    pub fn production(&self) -> bool {
        self.production
    }

    pub fn api_server_url(&self) -> &Url {
        &self.api_server_url
    }

    pub fn auth0(&self) -> &Auth0Settings {
        &self.auth0
    }

    /// Resolve a backend route against the API base URL.
    ///
    /// Any path prefix on the base is kept: `https://host/api` with
    /// `/drinks` gives `https://host/api/drinks`. Routes are appended as path
    /// segments, so the result never leaves the base: absolute URLs and
    /// `.`/`..` segments are rejected, and `?`/`#` are percent-encoded.
    pub fn api_endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidUrl {
            field: "apiServerUrl",
            reason: format!("{reason}: {path:?}"),
        };

        if path.starts_with("//") || Url::parse(path).is_ok() {
            return Err(invalid("route must be a relative path"));
        }
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.iter().any(|s| matches!(*s, "." | "..")) {
            return Err(invalid("route must not contain dot segments"));
        }

        let mut url = self.api_server_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| invalid("base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Freeze into a shared, read-only handle.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::development()
    }
}

/// Map a `std::env::var` result, treating non-UTF-8 values as errors rather
/// than as unset.
fn env_value(name: &str, value: Result<String, VarError>) -> Result<Option<String>, ConfigError> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NonUnicodeVar(name.to_string())),
    }
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: raw.to_string(),
        }),
    }
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        field,
        reason: e.to_string(),
    })
}

/// Require an `http`/`https` URL with a host.
pub(crate) fn check_web_url(field: &'static str, url: &Url) -> Result<(), ConfigError> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            field,
            reason: format!("unsupported scheme {:?}", url.scheme()),
        });
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::InvalidUrl {
            field,
            reason: "missing host".to_string(),
        });
    }
    Ok(())
}

/// Serialize a base URL without the root slash `Url` adds, so consumers can
/// append routes by concatenation.
pub(crate) fn serialize_base_url<S>(url: &Url, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let raw = url.as_str();
    if url.path() == "/" && url.query().is_none() && url.fragment().is_none() {
        serializer.serialize_str(raw.trim_end_matches('/'))
    } else {
        serializer.serialize_str(raw)
    }
}
