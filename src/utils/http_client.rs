// ABOUTME: Shared HTTP client utilities with connection pooling and timeout configuration
// ABOUTME: Provides OAuth and datastore clients to eliminate redundant client creation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Create a new HTTP client with custom timeout settings
///
/// Falls back to a default client if the builder rejects the configuration.
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Create a new HTTP client for OAuth token exchanges
///
/// The exchange is attempted once per callback, so these timeouts are the
/// only bound on how long the provider's redirect waits for a response.
#[must_use]
pub fn oauth_client() -> Client {
    create_client_with_timeout(15, 5) // 15s request timeout, 5s connect timeout
}

/// Create a new HTTP client for tenant datastore calls
#[must_use]
pub fn datastore_client() -> Client {
    create_client_with_timeout(30, 10)
}
