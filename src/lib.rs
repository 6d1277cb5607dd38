// ABOUTME: Main library entry point for the MercadoPago multi-tenant connect service
// ABOUTME: OAuth initiation, provider callback exchange, tenant persistence, and browser-side helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # MP Connect
//!
//! Links a tenant of a multi-tenant application to its MercadoPago seller
//! account through the OAuth 2.0 authorization-code grant.
//!
//! ## Flow
//!
//! 1. The authorization initiator sends the browser to MercadoPago with the
//!    tenant carried in `state`
//! 2. MercadoPago redirects back to `GET /mercadopago-auth` with a code
//! 3. The callback exchanger trades the code for credentials, stores them on
//!    the tenant, and redirects to `<frontend>/dashboard?mp_success=true` or
//!    `?mp_error=<code>`
//! 4. The result observer reports the outcome in the browser and strips the
//!    signal from the URL
//!
//! ## Architecture
//!
//! - **Config**: environment-driven server and browser configuration
//! - **`OAuth2` client**: authorization URL, token exchange, and `state` stores
//! - **Database plugins**: tenant stores (SQLite, hosted REST)
//! - **Services**: the callback state machine and flow initiation
//! - **Routes**: thin axum handlers
//! - **Connect**: browser-side initiator and observer behind host traits
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mp_connect::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Callback served on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Browser-side initiator and result observer
pub mod connect;

/// Tenant persistence backends
pub mod database_plugins;

/// Structured logging setup
pub mod logging;

/// Request tracing and CORS middleware
pub mod middleware;

/// MercadoPago `OAuth2` client and `state` handling
pub mod oauth2_client;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// Callback and initiation business logic
pub mod services;

/// HTTP client helpers
pub mod utils;

pub use mp_connect_core::{constants, errors, models};
