// ABOUTME: Tenant store factory selecting the backend from configuration
// ABOUTME: Hosted REST store when an elevated credential is configured, SQLite otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Tenant store factory
//!
//! Chooses the persistence backend at startup based on [`TenantStoreConfig`].

use super::rest::RestTenantStore;
use super::sqlite::SqliteTenantStore;
use super::TenantStore;
use crate::config::TenantStoreConfig;
use mp_connect_core::errors::AppResult;
use std::sync::Arc;
use tracing::info;

/// Get a descriptive string for the configured backend
#[must_use]
pub const fn backend_info(config: &TenantStoreConfig) -> &'static str {
    match config {
        TenantStoreConfig::Sqlite { .. } => "SQLite (Local Development)",
        TenantStoreConfig::Rest { .. } => "PostgREST (Service Role)",
    }
}

/// Create the tenant store for the given configuration
///
/// # Errors
///
/// Returns an error if the SQLite database cannot be opened or migrated
pub async fn create_tenant_store(config: &TenantStoreConfig) -> AppResult<Arc<dyn TenantStore>> {
    info!("Initializing tenant store: {}", backend_info(config));

    Ok(match config {
        TenantStoreConfig::Sqlite { url } => Arc::new(SqliteTenantStore::new(url).await?),
        TenantStoreConfig::Rest {
            base_url,
            service_role_key,
            table,
        } => Arc::new(RestTenantStore::new(
            base_url,
            service_role_key.clone(),
            table.clone(),
        )),
    })
}
