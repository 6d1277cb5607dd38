// ABOUTME: OAuth 2.0 client implementation for connecting tenants to MercadoPago
// ABOUTME: Authorization URL construction, code exchange, and anti-forgery state stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # OAuth 2.0 Client Module
//!
//! The service acts as an OAuth 2.0 client of MercadoPago on behalf of a
//! tenant. This module handles:
//! - Authorization URL construction with the tenant-bound `state`
//! - The single authorization code exchange against the token endpoint
//! - Issuing and consuming the anti-forgery `state` value

/// Core OAuth 2.0 client implementation
pub mod client;
/// Anti-forgery state issuing and resolution
pub mod state;

pub use client::{
    build_authorization_url, MercadoPagoOAuthClient, MercadoPagoTokenResponse, TokenExchangeError,
    TokenExchanger,
};
pub use state::{InMemoryNonceStore, OAuthStateStore, TenantIdStateStore};
