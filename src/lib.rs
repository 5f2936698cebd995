// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Coffee Shop Environment - Client Configuration Record
//!
//! Typed startup configuration for the coffee-shop ordering client: the
//! backend API base URL and the Auth0 identity-provider parameters. The
//! record is loaded once, validated, and shared read-only.
//!
//! ## Modules
//!
//! - `environment` - The configuration record and its loaders
//! - `auth0` - Identity-provider settings and derived endpoints
//! - `config` - Environment variable names and development defaults
//! - `logging` - Tracing subscriber setup

pub mod auth0;
pub mod config;
pub mod environment;
pub mod error;
pub mod logging;

pub use auth0::Auth0Settings;
pub use environment::Environment;
pub use error::ConfigError;
