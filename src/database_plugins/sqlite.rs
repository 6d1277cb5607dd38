// ABOUTME: SQLite tenant store implementation using sqlx connection pooling
// ABOUTME: Schema migration, tenant seeding, and the single-statement credential update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! SQLite tenant store
//!
//! The credential update is one `UPDATE` statement, so the five attributes
//! are always written together or not at all.

use super::TenantStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mp_connect_core::errors::{AppError, AppResult};
use mp_connect_core::models::{Tenant, TenantCredentialsUpdate, TenantId};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use tracing::{debug, info};

/// SQLite tenant store
#[derive(Clone)]
pub struct SqliteTenantStore {
    pool: SqlitePool,
}

impl SqliteTenantStore {
    /// Connect and run migrations
    ///
    /// In-memory databases are pinned to a single long-lived connection so
    /// every query sees the same schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid, the database
    /// cannot be opened, or migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        let store = Self { pool };
        store.migrate().await?;
        info!("SQLite tenant store ready");
        Ok(store)
    }

    /// Create the `tenants` table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS tenants (
                id TEXT PRIMARY KEY,
                name TEXT,
                mercadopago_access_token TEXT,
                mercadopago_refresh_token TEXT,
                mercadopago_user_id TEXT,
                mercadopago_public_key TEXT,
                mercadopago_connected_at DATETIME,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a tenant record
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or already exists
    pub async fn create_tenant(&self, tenant: &Tenant) -> AppResult<()> {
        if tenant.id.is_empty() {
            return Err(AppError::invalid_input("Tenant id must not be empty"));
        }

        sqlx::query(
            r"
            INSERT INTO tenants (
                id, name, mercadopago_access_token, mercadopago_refresh_token,
                mercadopago_user_id, mercadopago_public_key, mercadopago_connected_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(&tenant.id)
        .bind(&tenant.name)
        .bind(&tenant.mercadopago_access_token)
        .bind(&tenant.mercadopago_refresh_token)
        .bind(&tenant.mercadopago_user_id)
        .bind(&tenant.mercadopago_public_key)
        .bind(tenant.mercadopago_connected_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn row_to_tenant(row: &SqliteRow) -> AppResult<Tenant> {
        Ok(Tenant {
            id: row.try_get::<TenantId, _>("id")?,
            name: row.try_get("name")?,
            mercadopago_access_token: row.try_get("mercadopago_access_token")?,
            mercadopago_refresh_token: row.try_get("mercadopago_refresh_token")?,
            mercadopago_user_id: row.try_get("mercadopago_user_id")?,
            mercadopago_public_key: row.try_get("mercadopago_public_key")?,
            mercadopago_connected_at: row
                .try_get::<Option<DateTime<Utc>>, _>("mercadopago_connected_at")?,
        })
    }
}

#[async_trait]
impl TenantStore for SqliteTenantStore {
    async fn update_mercadopago_credentials(
        &self,
        tenant_id: &TenantId,
        update: TenantCredentialsUpdate,
    ) -> AppResult<()> {
        let credentials = update.into_credentials()?;

        let result = sqlx::query(
            r"
            UPDATE tenants SET
                mercadopago_access_token = $1,
                mercadopago_refresh_token = $2,
                mercadopago_user_id = $3,
                mercadopago_public_key = $4,
                mercadopago_connected_at = $5,
                updated_at = $6
            WHERE id = $7
            ",
        )
        .bind(&credentials.access_token)
        .bind(&credentials.refresh_token)
        .bind(&credentials.user_id)
        .bind(&credentials.public_key)
        .bind(credentials.connected_at)
        .bind(Utc::now())
        .bind(tenant_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Tenant {tenant_id}")));
        }

        debug!(tenant_id = %tenant_id, "Stored MercadoPago credentials");
        Ok(())
    }

    async fn get_tenant(&self, tenant_id: &TenantId) -> AppResult<Option<Tenant>> {
        let row = sqlx::query(
            r"
            SELECT id, name, mercadopago_access_token, mercadopago_refresh_token,
                   mercadopago_user_id, mercadopago_public_key, mercadopago_connected_at
            FROM tenants WHERE id = $1
            ",
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_tenant).transpose()
    }
}
