// ABOUTME: Centralized resource container for dependency injection into route handlers
// ABOUTME: Holds configuration, the token exchanger, tenant store, and OAuth state store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and shared behind an `Arc`. Tests assemble it from
//! fakes through [`ServerResources::new`].

use crate::config::{ServerConfig, StateMode};
use crate::database_plugins::{factory::create_tenant_store, TenantStore};
use crate::oauth2_client::{
    InMemoryNonceStore, MercadoPagoOAuthClient, OAuthStateStore, TenantIdStateStore,
    TokenExchanger,
};
use crate::services::CallbackExchanger;
use mp_connect_core::errors::AppResult;
use std::sync::Arc;
use tracing::info;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Immutable server configuration
    pub config: Arc<ServerConfig>,
    /// Provider token endpoint client
    pub token_exchanger: Arc<dyn TokenExchanger>,
    /// Tenant persistence
    pub tenant_store: Arc<dyn TenantStore>,
    /// Anti-forgery state strategy
    pub state_store: Arc<dyn OAuthStateStore>,
    /// Callback state machine over the collaborators above
    pub callback_exchanger: CallbackExchanger,
}

impl ServerResources {
    /// Assemble resources from already-built collaborators
    #[must_use]
    pub fn new(
        config: Arc<ServerConfig>,
        token_exchanger: Arc<dyn TokenExchanger>,
        tenant_store: Arc<dyn TenantStore>,
        state_store: Arc<dyn OAuthStateStore>,
    ) -> Self {
        let callback_exchanger = CallbackExchanger::new(
            token_exchanger.clone(),
            tenant_store.clone(),
            state_store.clone(),
        );

        Self {
            config,
            token_exchanger,
            tenant_store,
            state_store,
            callback_exchanger,
        }
    }

    /// Build production resources from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the tenant store cannot be initialized
    pub async fn from_config(config: ServerConfig) -> AppResult<Self> {
        let tenant_store = create_tenant_store(&config.store).await?;
        let token_exchanger: Arc<dyn TokenExchanger> =
            Arc::new(MercadoPagoOAuthClient::new(config.mercadopago.clone()));
        let state_store = state_store_for(&config);

        Ok(Self::new(
            Arc::new(config),
            token_exchanger,
            tenant_store,
            state_store,
        ))
    }
}

/// Select the state strategy configured for this deployment
#[must_use]
pub fn state_store_for(config: &ServerConfig) -> Arc<dyn OAuthStateStore> {
    match config.state.mode {
        StateMode::Tenant => {
            info!("OAuth state mode: tenant id passthrough");
            Arc::new(TenantIdStateStore)
        }
        StateMode::Nonce => {
            info!(
                ttl_secs = config.state.ttl_secs,
                "OAuth state mode: single-use nonce"
            );
            Arc::new(InMemoryNonceStore::new(config.state.ttl()))
        }
    }
}
