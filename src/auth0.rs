// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Auth0 Identity-Provider Settings
//!
//! The `auth0` block of the client environment, plus the values derived from
//! it by the two consumers:
//!
//! 1. The client builds the implicit-flow authorize link from the tenant,
//!    audience, client id and callback URL, and sends the user there.
//! 2. The backend verifies the resulting bearer token against the same
//!    tenant (issuer, JWKS) and audience.
//!
//! Nothing here performs network I/O.

use jsonwebtoken::{Algorithm, Validation};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Hosted Auth0 domain suffix appended to the tenant prefix.
const AUTH0_HOST_SUFFIX: &str = "auth0.com";

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Auth0 parameters of the client environment.
///
/// Serialized with the key names the client bundle binds to
/// (`url`, `audience`, `clientId`, `callbackURL`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Auth0Settings {
    /// Tenant prefix, e.g. `asma.au` for `asma.au.auth0.com`
    #[serde(rename = "url")]
    domain_prefix: String,
    /// API audience identifier
    audience: String,
    /// Registered application client id
    #[serde(rename = "clientId")]
    client_id: String,
    /// Base URL of the running client application
    #[serde(
        rename = "callbackURL",
        serialize_with = "crate::environment::serialize_base_url"
    )]
    callback_url: Url,
}

impl Auth0Settings {
    pub fn new(
        domain_prefix: impl Into<String>,
        audience: impl Into<String>,
        client_id: impl Into<String>,
        callback_url: Url,
    ) -> Self {
        Self {
            domain_prefix: domain_prefix.into(),
            audience: audience.into(),
            client_id: client_id.into(),
            callback_url,
        }
    }

    pub fn domain_prefix(&self) -> &str {
        &self.domain_prefix
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn callback_url(&self) -> &Url {
        &self.callback_url
    }

    /// Full tenant host, e.g. `asma.au.auth0.com`.
    pub fn domain(&self) -> String {
        format!("{}.{AUTH0_HOST_SUFFIX}", self.domain_prefix)
    }

    /// Expected `iss` claim of tokens issued by this tenant.
    ///
    /// Auth0 issuers always carry the trailing slash.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain())
    }

    /// JWKS endpoint the backend fetches signing keys from.
    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.domain())
    }

    /// Implicit-flow authorize link.
    ///
    /// `callback_path` is appended to the callback URL to form the
    /// `redirect_uri`, e.g. `/tabs/user-page`. Pass `""` to return to the
    /// application root.
    pub fn login_url(&self, callback_path: &str) -> Result<Url, ConfigError> {
        let mut url = self.tenant_url("/authorize")?;
        url.query_pairs_mut()
            .append_pair("audience", &self.audience)
            .append_pair("response_type", "token")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri(callback_path));
        Ok(url)
    }

    /// Logout link that returns the user to the callback URL.
    pub fn logout_url(&self) -> Result<Url, ConfigError> {
        let mut url = self.tenant_url("/v2/logout")?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("returnTo", &self.redirect_uri(""));
        Ok(url)
    }

    /// Bearer-token validation rules for the backend: RS256, issuer and
    /// audience pinned to this tenant.
    pub fn token_validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.set_issuer(&[self.issuer()]);
        validation.set_audience(&[&self.audience]);
        validation
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let prefix = self.domain_prefix.trim();
        if prefix.is_empty() {
            return Err(ConfigError::EmptyField("auth0.url"));
        }
        if !is_tenant_prefix(&self.domain_prefix) {
            return Err(ConfigError::InvalidDomainPrefix(self.domain_prefix.clone()));
        }
        if self.audience.trim().is_empty() {
            return Err(ConfigError::EmptyField("auth0.audience"));
        }
        if self.client_id.trim().is_empty() {
            return Err(ConfigError::EmptyField("auth0.clientId"));
        }
        crate::environment::check_web_url("auth0.callbackURL", &self.callback_url)
    }

    fn tenant_url(&self, path: &str) -> Result<Url, ConfigError> {
        Url::parse(&format!("https://{}{path}", self.domain())).map_err(|e| {
            ConfigError::InvalidUrl {
                field: "auth0.url",
                reason: e.to_string(),
            }
        })
    }

    // `Url` always serializes an empty path as "/", so strip it before
    // appending the route.
    fn redirect_uri(&self, callback_path: &str) -> String {
        format!(
            "{}{callback_path}",
            self.callback_url.as_str().trim_end_matches('/')
        )
    }
}

/// Dot-separated DNS labels: ASCII letters, digits and inner hyphens.
///
/// Anything else (`?`, `#`, `@`, `:`, empty labels) would move the derived
/// URLs off the `auth0.com` host.
fn is_tenant_prefix(prefix: &str) -> bool {
    prefix.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Auth0Settings {
        Auth0Settings::new(
            "asma.au",
            "Coffee_Shop",
            "client-123",
            Url::parse("http://localhost:8100").unwrap(),
        )
    }

    #[test]
    fn derives_tenant_endpoints() {
        let auth = sample();
        assert_eq!(auth.domain(), "asma.au.auth0.com");
        assert_eq!(auth.issuer(), "https://asma.au.auth0.com/");
        assert_eq!(
            auth.jwks_url(),
            "https://asma.au.auth0.com/.well-known/jwks.json"
        );
    }

    #[test]
    fn login_url_carries_flow_parameters() {
        let url = sample().login_url("/tabs/user-page").unwrap();
        assert_eq!(url.host_str(), Some("asma.au.auth0.com"));
        assert_eq!(url.path(), "/authorize");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("audience".to_string(), "Coffee_Shop".to_string()),
                ("response_type".to_string(), "token".to_string()),
                ("client_id".to_string(), "client-123".to_string()),
                (
                    "redirect_uri".to_string(),
                    "http://localhost:8100/tabs/user-page".to_string()
                ),
            ]
        );
    }

    #[test]
    fn login_url_without_path_returns_to_root() {
        let url = sample().login_url("").unwrap();
        let redirect = url
            .query_pairs()
            .find(|(k, _)| k == "redirect_uri")
            .map(|(_, v)| v.into_owned());
        assert_eq!(redirect.as_deref(), Some("http://localhost:8100"));
    }

    #[test]
    fn login_url_encodes_redirect() {
        let url = sample().login_url("/tabs/user-page").unwrap();
        assert!(url
            .as_str()
            .contains("redirect_uri=http%3A%2F%2Flocalhost%3A8100%2Ftabs%2Fuser-page"));
    }

    #[test]
    fn logout_url_returns_to_callback() {
        let url = sample().logout_url().unwrap();
        assert_eq!(url.path(), "/v2/logout");
        let return_to = url
            .query_pairs()
            .find(|(k, _)| k == "returnTo")
            .map(|(_, v)| v.into_owned());
        assert_eq!(return_to.as_deref(), Some("http://localhost:8100"));
    }

    #[test]
    fn token_validation_pins_issuer_and_audience() {
        let validation = sample().token_validation();
        assert_eq!(validation.algorithms, vec![Algorithm::RS256]);
        assert_eq!(validation.leeway, 60);
        assert!(validation
            .iss
            .as_ref()
            .is_some_and(|iss| iss.contains("https://asma.au.auth0.com/")));
        assert!(validation
            .aud
            .as_ref()
            .is_some_and(|aud| aud.contains("Coffee_Shop")));
    }

    #[test]
    fn validate_rejects_empty_fields() {
        let auth = Auth0Settings::new(
            "tenant",
            "  ",
            "client",
            Url::parse("http://localhost:8100").unwrap(),
        );
        assert!(matches!(
            auth.validate(),
            Err(ConfigError::EmptyField("auth0.audience"))
        ));

        let auth = Auth0Settings::new(
            "",
            "aud",
            "client",
            Url::parse("http://localhost:8100").unwrap(),
        );
        assert!(matches!(
            auth.validate(),
            Err(ConfigError::EmptyField("auth0.url"))
        ));

        let auth = Auth0Settings::new(
            "tenant",
            "aud",
            "",
            Url::parse("http://localhost:8100").unwrap(),
        );
        assert!(matches!(
            auth.validate(),
            Err(ConfigError::EmptyField("auth0.clientId"))
        ));
    }

    #[test]
    fn validate_rejects_full_urls_as_prefix() {
        for bad in [
            "https://tenant",
            "tenant/path",
            "ten ant",
            " tenant",
            "attacker.example?",
            "tenant#frag",
            "user@attacker",
            "tenant:1",
            "tenant..eu",
            ".tenant",
            "tenant.",
            "-tenant",
        ] {
            let auth = Auth0Settings::new(
                bad,
                "aud",
                "client",
                Url::parse("http://localhost:8100").unwrap(),
            );
            assert!(
                matches!(auth.validate(), Err(ConfigError::InvalidDomainPrefix(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn validate_accepts_regional_tenants() {
        for good in ["asma.au", "coffee-shop", "dev-123.eu"] {
            let auth = Auth0Settings::new(
                good,
                "aud",
                "client",
                Url::parse("http://localhost:8100").unwrap(),
            );
            auth.validate().unwrap();
            let login = auth.login_url("").unwrap();
            assert_eq!(login.host_str(), Some(auth.domain().as_str()));
        }
    }

    #[test]
    fn validate_rejects_non_web_callback() {
        let auth = Auth0Settings::new(
            "tenant",
            "aud",
            "client",
            Url::parse("mailto:someone@example.com").unwrap(),
        );
        assert!(matches!(
            auth.validate(),
            Err(ConfigError::InvalidUrl {
                field: "auth0.callbackURL",
                ..
            })
        ));
    }

    #[test]
    fn serializes_with_client_key_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["url"], "asma.au");
        assert_eq!(json["clientId"], "client-123");
        assert_eq!(json["callbackURL"], "http://localhost:8100");
    }
}
