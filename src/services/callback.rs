// ABOUTME: Provider callback state machine from query parameters to a terminal outcome
// ABOUTME: Error passthrough, validation, state resolution, code exchange, and tenant persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Callback exchange
//!
//! [`CallbackExchanger::exchange`] walks the callback linearly and stops at the
//! first terminal step. Every expected failure becomes an [`Outcome`]; only
//! infrastructure defects come back as `Err`. [`Outcome::redirect_url`] is the
//! single place where an outcome turns into a frontend URL.

use crate::database_plugins::TenantStore;
use crate::oauth2_client::{OAuthStateStore, TokenExchangeError, TokenExchanger};
use chrono::Utc;
use mp_connect_core::constants::{error_codes, params, routes};
use mp_connect_core::errors::AppResult;
use std::sync::Arc;
use tracing::{error, info, warn};
use url::{form_urlencoded, Url};

/// Query parameters of the provider redirect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    /// Authorization code
    pub code: Option<String>,
    /// Anti-forgery state
    pub state: Option<String>,
    /// Provider error code
    pub error: Option<String>,
    /// Provider error description
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Parse from a raw query string
    ///
    /// Never fails: unknown keys are ignored, the first occurrence of a key
    /// wins, and empty values count as absent.
    #[must_use]
    pub fn from_query(query: Option<&str>) -> Self {
        let mut parsed = Self::default();
        let Some(query) = query else {
            return parsed;
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_ref() {
                params::CODE => &mut parsed.code,
                params::STATE => &mut parsed.state,
                params::ERROR => &mut parsed.error,
                params::ERROR_DESCRIPTION => &mut parsed.error_description,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        parsed
    }
}

/// Terminal result of a callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Credentials exchanged and stored
    Success,
    /// Provider declined or aborted; carries the provider's code verbatim
    ProviderError(String),
    /// `code` or `state` missing
    ValidationError,
    /// `state` does not resolve to a pending authorization
    InvalidState,
    /// Token endpoint rejected the code or was unreachable
    ExchangeError,
    /// Tenant record could not be updated
    PersistenceError,
}

impl Outcome {
    /// Value of the `mp_error` signal, `None` for success
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::ProviderError(code) => Some(code),
            Self::ValidationError => Some(error_codes::MISSING_PARAMS),
            Self::InvalidState => Some(error_codes::INVALID_STATE),
            Self::ExchangeError => Some(error_codes::TOKEN_EXCHANGE_FAILED),
            Self::PersistenceError => Some(error_codes::DB_UPDATE_FAILED),
        }
    }

    /// Frontend URL carrying this outcome: `<frontend>/dashboard?mp_success=true`
    /// or `<frontend>/dashboard?mp_error=<code>`
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend base URL does not form a valid URL
    pub fn redirect_url(&self, frontend_url: &str) -> AppResult<Url> {
        let mut url = Url::parse(&format!(
            "{}{}",
            frontend_url.trim_end_matches('/'),
            routes::DASHBOARD_PATH
        ))?;

        let (key, value) = self
            .error_code()
            .map_or((params::MP_SUCCESS, params::MP_SUCCESS_VALUE), |code| {
                (params::MP_ERROR, code)
            });
        url.query_pairs_mut().append_pair(key, value);

        Ok(url)
    }
}

/// Stateless callback handler logic
///
/// Holds no per-request state: concurrent callbacks for different tenants
/// share nothing but the injected collaborators.
#[derive(Clone)]
pub struct CallbackExchanger {
    exchanger: Arc<dyn TokenExchanger>,
    store: Arc<dyn TenantStore>,
    states: Arc<dyn OAuthStateStore>,
}

impl CallbackExchanger {
    /// Create an exchanger from its collaborators
    #[must_use]
    pub fn new(
        exchanger: Arc<dyn TokenExchanger>,
        store: Arc<dyn TenantStore>,
        states: Arc<dyn OAuthStateStore>,
    ) -> Self {
        Self {
            exchanger,
            store,
            states,
        }
    }

    /// Run the callback to its terminal outcome
    ///
    /// The token exchange and the tenant update are each attempted exactly
    /// once, strictly in sequence.
    ///
    /// # Errors
    ///
    /// Returns an error only for unexpected failures (for example a state
    /// store fault other than an unknown state)
    pub async fn exchange(&self, params: CallbackParams) -> AppResult<Outcome> {
        if let Some(provider_error) = params.error {
            error!(
                error = %provider_error,
                description = params.error_description.as_deref().unwrap_or(""),
                "MercadoPago OAuth error"
            );
            return Ok(Outcome::ProviderError(provider_error));
        }

        let (Some(code), Some(state)) = (params.code, params.state) else {
            error!("Missing code or state parameter");
            return Ok(Outcome::ValidationError);
        };

        let tenant_id = match self.states.consume(&state).await {
            Ok(tenant_id) => tenant_id,
            Err(e) if e.is_not_found() => {
                warn!("OAuth state did not resolve to a pending authorization");
                return Ok(Outcome::InvalidState);
            }
            Err(e) => return Err(e),
        };

        let token = match self.exchanger.exchange_code(&code).await {
            Ok(token) => token,
            Err(TokenExchangeError::Rejected { status, body }) => {
                error!(
                    tenant_id = %tenant_id,
                    status,
                    body = %body,
                    "Token exchange failed"
                );
                return Ok(Outcome::ExchangeError);
            }
            Err(TokenExchangeError::Transport(e)) => {
                error!(tenant_id = %tenant_id, error = %e, "Token exchange request failed");
                return Ok(Outcome::ExchangeError);
            }
        };

        let update = token.into_credentials_update(Utc::now());
        if let Err(e) = self
            .store
            .update_mercadopago_credentials(&tenant_id, update)
            .await
        {
            error!(tenant_id = %tenant_id, error = %e, "Failed to update tenant");
            return Ok(Outcome::PersistenceError);
        }

        info!(tenant_id = %tenant_id, "MercadoPago account connected");
        Ok(Outcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_ignores_empty_and_keeps_first() {
        let params = CallbackParams::from_query(Some("code=&state=t1&state=t2&foo=bar"));
        assert_eq!(params.code, None);
        assert_eq!(params.state.as_deref(), Some("t1"));
        assert_eq!(params.error, None);
    }

    #[test]
    fn test_from_query_decodes_values() {
        let params = CallbackParams::from_query(Some("error=access%20denied&error_description=x+y"));
        assert_eq!(params.error.as_deref(), Some("access denied"));
        assert_eq!(params.error_description.as_deref(), Some("x y"));
        assert_eq!(CallbackParams::from_query(None), CallbackParams::default());
    }

    #[test]
    fn test_redirect_urls() {
        let frontend = "http://localhost:3000";
        let cases = [
            (Outcome::Success, "http://localhost:3000/dashboard?mp_success=true"),
            (
                Outcome::ValidationError,
                "http://localhost:3000/dashboard?mp_error=missing_params",
            ),
            (
                Outcome::ExchangeError,
                "http://localhost:3000/dashboard?mp_error=token_exchange_failed",
            ),
            (
                Outcome::PersistenceError,
                "http://localhost:3000/dashboard?mp_error=db_update_failed",
            ),
            (
                Outcome::InvalidState,
                "http://localhost:3000/dashboard?mp_error=invalid_state",
            ),
        ];

        for (outcome, expected) in cases {
            assert_eq!(outcome.redirect_url(frontend).unwrap().as_str(), expected);
        }
    }

    #[test]
    fn test_provider_error_is_encoded_but_round_trips() {
        let url = Outcome::ProviderError("access_denied&mp_success=true".into())
            .redirect_url("https://app.example.com/")
            .unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![("mp_error".to_owned(), "access_denied&mp_success=true".to_owned())]
        );
        assert_eq!(url.path(), "/dashboard");
    }

    #[test]
    fn test_invalid_frontend_url_is_an_error() {
        assert!(Outcome::Success.redirect_url("not a url").is_err());
    }
}
