// ABOUTME: Tenant identity and the MercadoPago credential attributes stored per tenant
// ABOUTME: TenantId newtype, Tenant record, and the all-or-nothing credential update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque tenant identifier
///
/// Doubles as the anti-forgery `state` value when the service runs in
/// tenant-id state mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "sqlx-types", derive(sqlx::Type), sqlx(transparent))]
pub struct TenantId(String);

impl TenantId {
    /// Wrap an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty (never valid for a stored tenant)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TenantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TenantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Tenant record as seen by this service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique tenant identifier
    pub id: TenantId,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Provider access token
    #[serde(default)]
    pub mercadopago_access_token: Option<String>,
    /// Provider refresh token
    #[serde(default)]
    pub mercadopago_refresh_token: Option<String>,
    /// Provider-side user id
    #[serde(default)]
    pub mercadopago_user_id: Option<String>,
    /// Provider-side public key
    #[serde(default)]
    pub mercadopago_public_key: Option<String>,
    /// When the connection was established
    #[serde(default)]
    pub mercadopago_connected_at: Option<DateTime<Utc>>,
}

impl Tenant {
    /// Create a tenant with no provider connection
    pub fn new(id: impl Into<TenantId>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
            mercadopago_access_token: None,
            mercadopago_refresh_token: None,
            mercadopago_user_id: None,
            mercadopago_public_key: None,
            mercadopago_connected_at: None,
        }
    }

    /// Connected means a non-empty access token is present
    #[must_use]
    pub fn is_mercadopago_connected(&self) -> bool {
        self.mercadopago_access_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }
}

/// Credential attributes as received from the token exchange
///
/// Fields are optional because the token response is not validated before
/// persistence; stores call [`TenantCredentialsUpdate::into_credentials`] and
/// reject incomplete updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantCredentialsUpdate {
    /// Access token
    pub access_token: Option<String>,
    /// Refresh token
    pub refresh_token: Option<String>,
    /// Provider-side user id
    pub user_id: Option<String>,
    /// Provider-side public key
    pub public_key: Option<String>,
    /// Connection timestamp
    pub connected_at: DateTime<Utc>,
}

/// Complete credential set, the only shape ever written to a tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MercadoPagoCredentials {
    /// Access token
    pub access_token: String,
    /// Refresh token
    pub refresh_token: String,
    /// Provider-side user id
    pub user_id: String,
    /// Provider-side public key
    pub public_key: String,
    /// Connection timestamp
    pub connected_at: DateTime<Utc>,
}

impl TenantCredentialsUpdate {
    /// Validate that every attribute is present and non-empty
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` naming the first absent attribute
    pub fn into_credentials(self) -> AppResult<MercadoPagoCredentials> {
        fn required(value: Option<String>, field: &str) -> AppResult<String> {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::missing_field(field))
        }

        Ok(MercadoPagoCredentials {
            access_token: required(self.access_token, "mercadopago_access_token")?,
            refresh_token: required(self.refresh_token, "mercadopago_refresh_token")?,
            user_id: required(self.user_id, "mercadopago_user_id")?,
            public_key: required(self.public_key, "mercadopago_public_key")?,
            connected_at: self.connected_at,
        })
    }
}
