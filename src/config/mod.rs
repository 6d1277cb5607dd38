// ABOUTME: Configuration management module for server and browser-side settings
// ABOUTME: Re-exports the immutable environment-derived configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the MercadoPago connection service
//!
//! All settings come from environment variables and are loaded once into an
//! immutable [`ServerConfig`] that is injected into the handlers at
//! construction time.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    BrowserConfig, Environment, MercadoPagoConfig, ServerConfig, StateConfig, StateMode,
    TenantStoreConfig,
};
