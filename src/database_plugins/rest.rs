// ABOUTME: Hosted tenant store over a PostgREST endpoint authorized with a service role key
// ABOUTME: Credential update via PATCH filtered by tenant id, bypassing row-level security
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::TenantStore;
use crate::utils::http_client::datastore_client;
use async_trait::async_trait;
use mp_connect_core::errors::{AppError, AppResult};
use mp_connect_core::models::{Tenant, TenantCredentialsUpdate, TenantId};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

/// Column values written by the credential update
#[derive(Debug, Serialize)]
struct CredentialColumns<'a> {
    mercadopago_access_token: &'a str,
    mercadopago_refresh_token: &'a str,
    mercadopago_user_id: &'a str,
    mercadopago_public_key: &'a str,
    mercadopago_connected_at: String,
}

/// PostgREST tenant store
pub struct RestTenantStore {
    base_url: String,
    service_role_key: String,
    table: String,
    client: reqwest::Client,
}

impl RestTenantStore {
    /// Create a store against `{base_url}/rest/v1/{table}`
    #[must_use]
    pub fn new(base_url: &str, service_role_key: String, table: String) -> Self {
        Self::with_http_client(base_url, service_role_key, table, datastore_client())
    }

    /// Create a store with a caller-supplied HTTP client
    #[must_use]
    pub fn with_http_client(
        base_url: &str,
        service_role_key: String,
        table: String,
        client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            service_role_key,
            table,
            client,
        }
    }

    /// Table URL filtered to a single tenant
    fn tenant_url(&self, tenant_id: &TenantId) -> AppResult<Url> {
        let mut url = Url::parse(&format!("{}/rest/v1/{}", self.base_url, self.table))?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{tenant_id}"));
        Ok(url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_role_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.service_role_key))
            .header(ACCEPT, "application/json")
    }

    async fn rows<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<Vec<T>> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::database(format!(
                "Tenant datastore returned {status}: {body}"
            )));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl TenantStore for RestTenantStore {
    async fn update_mercadopago_credentials(
        &self,
        tenant_id: &TenantId,
        update: TenantCredentialsUpdate,
    ) -> AppResult<()> {
        let credentials = update.into_credentials()?;
        let columns = CredentialColumns {
            mercadopago_access_token: &credentials.access_token,
            mercadopago_refresh_token: &credentials.refresh_token,
            mercadopago_user_id: &credentials.user_id,
            mercadopago_public_key: &credentials.public_key,
            mercadopago_connected_at: credentials.connected_at.to_rfc3339(),
        };

        let response = self
            .authorized(self.client.patch(self.tenant_url(tenant_id)?))
            .header("Prefer", "return=representation")
            .json(&columns)
            .send()
            .await
            .map_err(|e| AppError::database(format!("Tenant datastore unreachable: {e}")))?;

        // PostgREST answers 200 with an empty array when the filter matched nothing.
        // Rows stay untyped here: the write has already landed, only presence matters.
        if Self::rows::<serde_json::Value>(response).await?.is_empty() {
            return Err(AppError::not_found(format!("Tenant {tenant_id}")));
        }

        debug!(tenant_id = %tenant_id, "Stored MercadoPago credentials");
        Ok(())
    }

    async fn get_tenant(&self, tenant_id: &TenantId) -> AppResult<Option<Tenant>> {
        let mut url = self.tenant_url(tenant_id)?;
        url.query_pairs_mut().append_pair("select", "*");

        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(|e| AppError::database(format!("Tenant datastore unreachable: {e}")))?;

        Ok(Self::rows::<Tenant>(response).await?.into_iter().next())
    }
}
