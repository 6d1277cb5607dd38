// ABOUTME: Tenant persistence abstraction for MercadoPago credential storage
// ABOUTME: Plugin architecture with SQLite and hosted REST (service role) backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use mp_connect_core::errors::AppResult;
use mp_connect_core::models::{Tenant, TenantCredentialsUpdate, TenantId};

/// Backend selection from configuration
pub mod factory;
/// PostgREST store authorized with the service role key
pub mod rest;
/// Local SQLite store
pub mod sqlite;

/// Tenant persistence abstraction
///
/// Implementations write with elevated privileges: the callback has no end-user
/// session, so row-level authorization cannot apply.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Set all five MercadoPago credential attributes in one write
    ///
    /// Incomplete updates are rejected before touching storage. An unknown
    /// tenant is reported as `ResourceNotFound`.
    async fn update_mercadopago_credentials(
        &self,
        tenant_id: &TenantId,
        update: TenantCredentialsUpdate,
    ) -> AppResult<()>;

    /// Get a tenant by id
    async fn get_tenant(&self, tenant_id: &TenantId) -> AppResult<Option<Tenant>>;
}
