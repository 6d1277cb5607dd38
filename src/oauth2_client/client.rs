// ABOUTME: OAuth2 client implementation for MercadoPago authorization code exchange
// ABOUTME: Builds the authorization URL and performs the form-encoded token request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::MercadoPagoConfig;
use crate::utils::http_client::oauth_client;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mp_connect_core::constants::oauth;
use mp_connect_core::errors::AppResult;
use mp_connect_core::models::TenantCredentialsUpdate;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Build the provider authorization URL
///
/// Query parameters are appended in a fixed order: `client_id`,
/// `response_type`, `platform_id`, `redirect_uri`, `state`.
///
/// # Errors
///
/// Returns an error if the authorization endpoint is not a valid URL
pub fn build_authorization_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    state: &str,
) -> AppResult<Url> {
    let mut url = Url::parse(auth_url)?;

    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("response_type", oauth::RESPONSE_TYPE_CODE)
        .append_pair("platform_id", oauth::PLATFORM_ID)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("state", state);

    Ok(url)
}

/// Failure of the code exchange
#[derive(Debug, Error)]
pub enum TokenExchangeError {
    /// The token endpoint answered with a non-success status
    #[error("token endpoint returned {status}: {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },
    /// The token endpoint could not be reached or the body could not be read
    #[error("token endpoint request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for TokenExchangeError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

/// Token endpoint response body
///
/// Every field is optional: the body is not validated here, incomplete
/// payloads are rejected when the tenant record is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MercadoPagoTokenResponse {
    /// Access token for provider API calls
    #[serde(default)]
    pub access_token: Option<String>,
    /// Refresh token reserved for renewal
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Provider-side user id (numeric on the wire)
    #[serde(default, deserialize_with = "deserialize_user_id")]
    pub user_id: Option<String>,
    /// Provider-side public key
    #[serde(default)]
    pub public_key: Option<String>,
    /// Token type (usually "bearer")
    #[serde(default)]
    pub token_type: Option<String>,
    /// Access token lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Granted scopes
    #[serde(default)]
    pub scope: Option<String>,
    /// Whether the credentials are for production
    #[serde(default)]
    pub live_mode: Option<bool>,
}

fn deserialize_user_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(id)) => Some(id),
        Some(serde_json::Value::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}

impl MercadoPagoTokenResponse {
    /// Parse a token endpoint body, degrading to an empty payload when malformed
    #[must_use]
    pub fn parse_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|e| {
            warn!(error = %e, "Token response body is not a valid token payload");
            Self::default()
        })
    }

    /// Convert into the tenant update written by the persistence step
    #[must_use]
    pub fn into_credentials_update(self, connected_at: DateTime<Utc>) -> TenantCredentialsUpdate {
        TenantCredentialsUpdate {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            user_id: self.user_id,
            public_key: self.public_key,
            connected_at,
        }
    }
}

/// Exchanges an authorization code for credentials
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    /// Perform the exchange exactly once
    async fn exchange_code(&self, code: &str)
        -> Result<MercadoPagoTokenResponse, TokenExchangeError>;
}

/// OAuth 2.0 client for the MercadoPago token endpoint
pub struct MercadoPagoOAuthClient {
    config: MercadoPagoConfig,
    client: reqwest::Client,
}

impl MercadoPagoOAuthClient {
    /// Create a new client with the shared OAuth HTTP client
    #[must_use]
    pub fn new(config: MercadoPagoConfig) -> Self {
        Self::with_http_client(config, oauth_client())
    }

    /// Create a new client with a caller-supplied HTTP client
    #[must_use]
    pub const fn with_http_client(config: MercadoPagoConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Get the provider configuration
    #[must_use]
    pub const fn config(&self) -> &MercadoPagoConfig {
        &self.config
    }

    /// Get authorization URL for the given state
    ///
    /// # Errors
    ///
    /// Returns an error if the authorization URL is malformed
    pub fn authorization_url(&self, state: &str) -> AppResult<Url> {
        build_authorization_url(
            &self.config.auth_url,
            &self.config.client_id,
            &self.config.redirect_uri,
            state,
        )
    }
}

#[async_trait]
impl TokenExchanger for MercadoPagoOAuthClient {
    async fn exchange_code(
        &self,
        code: &str,
    ) -> Result<MercadoPagoTokenResponse, TokenExchangeError> {
        // redirect_uri must match the authorization request byte for byte
        let params = [
            ("grant_type", oauth::GRANT_TYPE_AUTHORIZATION_CODE),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TokenExchangeError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let token = MercadoPagoTokenResponse::parse_body(&body);
        debug!(
            token_type = token.token_type.as_deref().unwrap_or("unknown"),
            expires_in = token.expires_in,
            live_mode = token.live_mode,
            "Token exchange succeeded"
        );
        Ok(token)
    }
}
