// ABOUTME: Anti-forgery OAuth state issuing and single-use resolution back to a tenant
// ABOUTME: Tenant-id passthrough strategy and an in-memory TTL-bound nonce store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! OAuth `state` handling
//!
//! The `state` parameter correlates the provider callback with the tenant
//! that started the flow. Two strategies share one trait:
//! - [`TenantIdStateStore`]: the tenant id travels as the state, nothing is stored
//! - [`InMemoryNonceStore`]: an unguessable nonce is issued, kept with a TTL, and
//!   deleted on first use

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mp_connect_core::errors::{AppError, AppResult};
use mp_connect_core::models::TenantId;
use rand::RngCore;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Nonce length in bytes (32 bytes = 256 bits)
const NONCE_LENGTH: usize = 32;

/// Issues and resolves anti-forgery state values
#[async_trait]
pub trait OAuthStateStore: Send + Sync {
    /// Produce the state value for a new authorization request
    async fn issue(&self, tenant_id: &TenantId) -> AppResult<String>;

    /// Resolve a callback state back to its tenant, invalidating it
    ///
    /// Unknown, expired or already-consumed values yield `ResourceNotFound`.
    async fn consume(&self, state: &str) -> AppResult<TenantId>;
}

/// The tenant id is the state
#[derive(Debug, Clone, Copy, Default)]
pub struct TenantIdStateStore;

#[async_trait]
impl OAuthStateStore for TenantIdStateStore {
    async fn issue(&self, tenant_id: &TenantId) -> AppResult<String> {
        if tenant_id.is_empty() {
            return Err(AppError::invalid_input("Tenant id must not be empty"));
        }
        Ok(tenant_id.as_str().to_owned())
    }

    async fn consume(&self, state: &str) -> AppResult<TenantId> {
        if state.is_empty() {
            return Err(AppError::not_found("OAuth state"));
        }
        Ok(TenantId::new(state))
    }
}

/// Pending authorization (nonce itself is the `HashMap` key)
#[derive(Clone)]
struct PendingState {
    tenant_id: TenantId,
    expires_at: DateTime<Utc>,
}

/// Nonce store with in-memory storage
///
/// Nonces live in process memory, so a multi-instance deployment needs
/// sticky routing between initiation and callback.
pub struct InMemoryNonceStore {
    states: Arc<RwLock<HashMap<String, PendingState>>>,
    ttl: chrono::Duration,
}

impl InMemoryNonceStore {
    /// Create a nonce store with the given lifetime
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            states: Arc::new(RwLock::new(HashMap::new())),
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::minutes(10)),
        }
    }

    /// Number of pending (possibly expired) states
    pub async fn pending_count(&self) -> usize {
        self.states.read().await.len()
    }

    fn cleanup_expired_locked(states: &mut HashMap<String, PendingState>) {
        let now = Utc::now();
        states.retain(|_, pending| pending.expires_at > now);
    }
}

#[async_trait]
impl OAuthStateStore for InMemoryNonceStore {
    async fn issue(&self, tenant_id: &TenantId) -> AppResult<String> {
        if tenant_id.is_empty() {
            return Err(AppError::invalid_input("Tenant id must not be empty"));
        }

        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::internal("OAuth state lifetime exceeds the date range"))?;

        let mut random_bytes = [0_u8; NONCE_LENGTH];
        rand::thread_rng().fill_bytes(&mut random_bytes);
        let nonce = hex::encode(random_bytes);

        let mut states = self.states.write().await;
        Self::cleanup_expired_locked(&mut states);
        states.insert(
            nonce.clone(),
            PendingState {
                tenant_id: tenant_id.clone(),
                expires_at,
            },
        );
        drop(states);

        Ok(nonce)
    }

    async fn consume(&self, state: &str) -> AppResult<TenantId> {
        let pending = self
            .states
            .write()
            .await
            .remove(state)
            .ok_or_else(|| AppError::not_found("OAuth state"))?;

        if Utc::now() > pending.expires_at {
            return Err(AppError::not_found("OAuth state"));
        }

        Ok(pending.tenant_id)
    }
}
