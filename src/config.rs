// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and development defaults
//! for the client environment record. Configuration is loaded once at
//! startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `PRODUCTION` | Build-mode flag | `false` |
//! | `API_SERVER_URL` | Backend API base URL | `http://127.0.0.1:5000` |
//! | `AUTH0_DOMAIN_PREFIX` | Auth0 tenant prefix | `asma.au` (required for production) |
//! | `AUTH0_AUDIENCE` | Auth0 API audience | `Coffee_Shop` (required for production) |
//! | `AUTH0_CLIENT_ID` | Auth0 application client id | development client (required for production) |
//! | `AUTH0_CALLBACK_URL` | Redirect target after login | `http://localhost:8100` (required for production) |
//! | `ENVIRONMENT_FILE` | JSON environment file loaded before variables | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

/// Build-mode flag. Accepts `true/false/1/0/yes/no/on/off`.
pub const PRODUCTION_ENV: &str = "PRODUCTION";

/// Base URL of the running backend API server.
pub const API_SERVER_URL_ENV: &str = "API_SERVER_URL";

/// Auth0 tenant prefix, without the `.auth0.com` suffix.
pub const AUTH0_DOMAIN_PREFIX_ENV: &str = "AUTH0_DOMAIN_PREFIX";

/// Audience configured for the Auth0 API.
pub const AUTH0_AUDIENCE_ENV: &str = "AUTH0_AUDIENCE";

/// Client id generated for the Auth0 application.
pub const AUTH0_CLIENT_ID_ENV: &str = "AUTH0_CLIENT_ID";

/// Base URL of the running client application; Auth0 redirects here.
pub const AUTH0_CALLBACK_URL_ENV: &str = "AUTH0_CALLBACK_URL";

/// Path to a JSON environment file.
///
/// Variables set alongside the file override its values.
pub const ENVIRONMENT_FILE_ENV: &str = "ENVIRONMENT_FILE";

/// Logging format selector (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_LOG_FILTER: &str = "info";

// Development defaults. Never applied when `PRODUCTION` is true.

pub const DEFAULT_API_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_AUTH0_DOMAIN_PREFIX: &str = "asma.au";
pub const DEFAULT_AUTH0_AUDIENCE: &str = "Coffee_Shop";
pub const DEFAULT_AUTH0_CLIENT_ID: &str = "eNfZms88E1iRGXwdoWd3QChvljb645Ex";
pub const DEFAULT_AUTH0_CALLBACK_URL: &str = "http://localhost:8100";
