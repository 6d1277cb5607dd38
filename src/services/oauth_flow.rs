// ABOUTME: Authorization initiation logic shared by the connect endpoint and browser initiator
// ABOUTME: Issues the anti-forgery state for a tenant and builds the provider authorization URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::MercadoPagoConfig;
use crate::oauth2_client::{build_authorization_url, OAuthStateStore};
use mp_connect_core::constants::{oauth, params};
use mp_connect_core::errors::{AppError, AppResult};
use mp_connect_core::models::TenantId;
use tracing::{debug, info};
use url::Url;

/// Start an authorization for `tenant_id`
///
/// # Errors
///
/// Returns an error if the tenant id is empty, the state cannot be issued,
/// or the configured authorization URL is invalid
pub async fn begin_authorization(
    config: &MercadoPagoConfig,
    states: &dyn OAuthStateStore,
    tenant_id: &TenantId,
) -> AppResult<Url> {
    if tenant_id.is_empty() {
        return Err(AppError::missing_field(params::TENANT_ID));
    }

    let state = states.issue(tenant_id).await?;
    let url = build_authorization_url(
        &config.auth_url,
        &config.client_id,
        &config.redirect_uri,
        &state,
    )?;

    debug!(redirect_uri = %config.redirect_uri, "Built MercadoPago authorization URL");
    info!(tenant_id = %tenant_id, provider = oauth::PROVIDER_NAME, "OAuth authorization started");
    Ok(url)
}
