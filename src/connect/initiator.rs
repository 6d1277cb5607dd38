// ABOUTME: Authorization initiator building the provider consent URL for a tenant
// ABOUTME: Fails fast with a configuration toast and no navigation when inputs are missing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::messages::CONFIG_ERROR_TITLE;
use super::{Navigator, Notifier, Toast};
use crate::config::BrowserConfig;
use crate::oauth2_client::build_authorization_url;
use mp_connect_core::errors::{AppError, AppResult};
use mp_connect_core::models::Tenant;
use tracing::warn;
use url::Url;

/// Starts the provider authorization from the browser session
///
/// The tenant id is used verbatim as `state`; the callback resolves it back
/// with the tenant-id state strategy.
#[derive(Debug, Clone)]
pub struct AuthorizationInitiator {
    config: BrowserConfig,
}

impl AuthorizationInitiator {
    /// Create an initiator over the browser-side settings
    #[must_use]
    pub const fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    /// Build the authorization URL without side effects
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the tenant is absent or has an empty
    /// id, or if the client id or redirect URI is not configured
    pub fn authorization_url(&self, tenant: Option<&Tenant>) -> AppResult<Url> {
        let tenant_id = tenant
            .map(|t| t.id.as_str())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::config("No tenant selected"))?;
        let client_id = non_empty(self.config.client_id.as_deref())
            .ok_or_else(|| AppError::config("MercadoPago client id is not configured"))?;
        let redirect_uri = non_empty(self.config.redirect_uri.as_deref())
            .ok_or_else(|| AppError::config("MercadoPago redirect URI is not configured"))?;

        build_authorization_url(&self.config.auth_url, client_id, redirect_uri, tenant_id)
    }

    /// Navigate to the provider consent page
    ///
    /// On failure a configuration toast is shown and no navigation happens.
    ///
    /// # Errors
    ///
    /// Returns the error that prevented navigation
    pub fn connect(
        &self,
        tenant: Option<&Tenant>,
        notifier: &dyn Notifier,
        navigator: &dyn Navigator,
    ) -> AppResult<()> {
        match self.authorization_url(tenant) {
            Ok(url) => {
                navigator.assign(&url);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Cannot start MercadoPago authorization");
                notifier.notify(Toast::destructive(CONFIG_ERROR_TITLE, None));
                Err(e)
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
