// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, test configuration, and recording fakes for the callback collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `mp_connect`

use async_trait::async_trait;
use mp_connect::config::ServerConfig;
use mp_connect::connect::{LocationHistory, Navigator, Notifier, Toast};
use mp_connect::database_plugins::sqlite::SqliteTenantStore;
use mp_connect::database_plugins::TenantStore;
use mp_connect::oauth2_client::{
    MercadoPagoTokenResponse, OAuthStateStore, TenantIdStateStore, TokenExchangeError,
    TokenExchanger,
};
use mp_connect::resources::ServerResources;
use mp_connect::routes::build_router;
use mp_connect_core::errors::{AppError, AppResult};
use mp_connect_core::models::{Tenant, TenantCredentialsUpdate, TenantId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use url::Url;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Server configuration built from an explicit variable map
pub fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    ServerConfig::from_lookup(|key| vars.get(key).cloned())
}

/// Configuration used by HTTP tests
pub fn test_config() -> ServerConfig {
    config_from(&[
        ("MP_CLIENT_ID", "APP123"),
        ("MP_CLIENT_SECRET", "shh"),
        ("MP_REDIRECT_URI", "https://api.example.com/mercadopago-auth"),
        ("FRONTEND_URL", "http://localhost:3000"),
        ("DATABASE_URL", "sqlite::memory:"),
    ])
    .expect("test configuration must load")
}

/// Token payload as MercadoPago returns it
pub fn token_payload(access_token: &str, user_id: &str) -> MercadoPagoTokenResponse {
    MercadoPagoTokenResponse {
        access_token: Some(access_token.to_owned()),
        refresh_token: Some("R1".to_owned()),
        user_id: Some(user_id.to_owned()),
        public_key: Some("PK1".to_owned()),
        token_type: Some("bearer".to_owned()),
        expires_in: Some(15_552_000),
        scope: Some("offline_access read write".to_owned()),
        live_mode: Some(true),
    }
}

/// How the fake token endpoint answers
#[derive(Clone)]
pub enum ExchangeBehavior {
    Succeed(MercadoPagoTokenResponse),
    Reject { status: u16, body: String },
    Unreachable,
}

/// Token exchanger that records every code it receives
pub struct FakeTokenExchanger {
    behavior: ExchangeBehavior,
    codes: Mutex<Vec<String>>,
}

impl FakeTokenExchanger {
    pub fn new(behavior: ExchangeBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            codes: Mutex::new(Vec::new()),
        })
    }

    pub fn codes(&self) -> Vec<String> {
        self.codes.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenExchanger for FakeTokenExchanger {
    async fn exchange_code(
        &self,
        code: &str,
    ) -> Result<MercadoPagoTokenResponse, TokenExchangeError> {
        self.codes.lock().unwrap().push(code.to_owned());
        match &self.behavior {
            ExchangeBehavior::Succeed(token) => Ok(token.clone()),
            ExchangeBehavior::Reject { status, body } => Err(TokenExchangeError::Rejected {
                status: *status,
                body: body.clone(),
            }),
            ExchangeBehavior::Unreachable => {
                Err(TokenExchangeError::Transport("connection refused".to_owned()))
            }
        }
    }
}

/// Tenant store that records updates and can be told to fail
#[derive(Default)]
pub struct RecordingTenantStore {
    pub fail_with: Option<String>,
    updates: Mutex<Vec<(TenantId, TenantCredentialsUpdate)>>,
}

impl RecordingTenantStore {
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(message.to_owned()),
            updates: Mutex::new(Vec::new()),
        })
    }

    pub fn updates(&self) -> Vec<(TenantId, TenantCredentialsUpdate)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl TenantStore for RecordingTenantStore {
    async fn update_mercadopago_credentials(
        &self,
        tenant_id: &TenantId,
        update: TenantCredentialsUpdate,
    ) -> AppResult<()> {
        self.updates
            .lock()
            .unwrap()
            .push((tenant_id.clone(), update.clone()));
        if let Some(message) = &self.fail_with {
            return Err(AppError::database(message.clone()));
        }
        update.into_credentials().map(|_| ())
    }

    async fn get_tenant(&self, _tenant_id: &TenantId) -> AppResult<Option<Tenant>> {
        Ok(None)
    }
}

/// State store whose backend is down
pub struct BrokenStateStore;

#[async_trait]
impl OAuthStateStore for BrokenStateStore {
    async fn issue(&self, _tenant_id: &TenantId) -> AppResult<String> {
        Err(AppError::internal("state backend unavailable"))
    }

    async fn consume(&self, _state: &str) -> AppResult<TenantId> {
        Err(AppError::internal("state backend unavailable"))
    }
}

/// In-memory SQLite store seeded with the given tenant ids
pub async fn seeded_sqlite_store(tenant_ids: &[&str]) -> Arc<SqliteTenantStore> {
    let store = SqliteTenantStore::new("sqlite::memory:")
        .await
        .expect("in-memory SQLite must open");
    for id in tenant_ids {
        store
            .create_tenant(&Tenant::new(*id, Some(format!("Tenant {id}"))))
            .await
            .expect("seed tenant");
    }
    Arc::new(store)
}

/// Full router wired with the given collaborators
pub fn test_app(
    exchanger: Arc<dyn TokenExchanger>,
    store: Arc<dyn TenantStore>,
    states: Arc<dyn OAuthStateStore>,
) -> axum::Router {
    init_test_logging();
    let resources = ServerResources::new(Arc::new(test_config()), exchanger, store, states);
    build_router(Arc::new(resources))
}

/// Router in tenant-id state mode
pub fn tenant_mode_app(
    exchanger: Arc<dyn TokenExchanger>,
    store: Arc<dyn TenantStore>,
) -> axum::Router {
    test_app(exchanger, store, Arc::new(TenantIdStateStore))
}

/// Browser double collecting toasts, navigations, and history replacements
pub struct FakeBrowser {
    location: Mutex<Url>,
    pub toasts: Mutex<Vec<Toast>>,
    pub navigations: Mutex<Vec<Url>>,
    pub replacements: Mutex<Vec<Url>>,
}

impl FakeBrowser {
    pub fn at(url: &str) -> Self {
        Self {
            location: Mutex::new(Url::parse(url).unwrap()),
            toasts: Mutex::new(Vec::new()),
            navigations: Mutex::new(Vec::new()),
            replacements: Mutex::new(Vec::new()),
        }
    }

    pub fn current(&self) -> Url {
        self.location.lock().unwrap().clone()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<Url> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn replacement_count(&self) -> usize {
        self.replacements.lock().unwrap().len()
    }
}

impl Notifier for FakeBrowser {
    fn notify(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

impl Navigator for FakeBrowser {
    fn assign(&self, url: &Url) {
        self.navigations.lock().unwrap().push(url.clone());
    }
}

impl LocationHistory for FakeBrowser {
    fn location(&self) -> Url {
        self.current()
    }

    fn replace(&self, url: Url) {
        self.replacements.lock().unwrap().push(url.clone());
        *self.location.lock().unwrap() = url;
    }
}
