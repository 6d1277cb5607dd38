// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses provider credentials, frontend/redirect URLs, tenant store and state mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use anyhow::{bail, Context, Result};
use mp_connect_core::constants::{defaults, env_config, oauth, routes};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    /// Local development
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// How the anti-forgery `state` value is produced and resolved
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StateMode {
    /// The tenant id itself is the state (no server-side storage)
    #[default]
    Tenant,
    /// A random single-use nonce stored server-side with a TTL
    Nonce,
}

impl StateMode {
    /// Parse from string
    ///
    /// # Errors
    ///
    /// Returns an error for values other than `tenant` or `nonce`
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "tenant" | "tenant_id" => Ok(Self::Tenant),
            "nonce" => Ok(Self::Nonce),
            other => bail!("Invalid {} value: {other}", env_config::MP_STATE_MODE),
        }
    }
}

/// State strategy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Strategy for the `state` parameter
    pub mode: StateMode,
    /// Nonce lifetime in seconds
    pub ttl_secs: u64,
}

impl StateConfig {
    /// Nonce lifetime as a `Duration`
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// MercadoPago application credentials and endpoints
#[derive(Clone, Serialize, Deserialize)]
pub struct MercadoPagoConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Redirect URI, byte-identical on the authorization and token requests
    pub redirect_uri: String,
    /// Authorization endpoint
    pub auth_url: String,
    /// Token endpoint
    pub token_url: String,
}

impl std::fmt::Debug for MercadoPagoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MercadoPagoConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .finish()
    }
}

/// Where tenant credentials are persisted
#[derive(Clone, Serialize, Deserialize)]
pub enum TenantStoreConfig {
    /// Local SQLite database
    Sqlite {
        /// sqlx connection string
        url: String,
    },
    /// Hosted PostgREST endpoint authorized with an elevated key
    Rest {
        /// Service base URL
        base_url: String,
        /// Elevated (row-level-security bypassing) credential
        service_role_key: String,
        /// Tenant table name
        table: String,
    },
}

impl std::fmt::Debug for TenantStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite { url } => f.debug_struct("Sqlite").field("url", url).finish(),
            Self::Rest { base_url, table, .. } => f
                .debug_struct("Rest")
                .field("base_url", base_url)
                .field("service_role_key", &"[REDACTED]")
                .field("table", table)
                .finish(),
        }
    }
}

/// Server configuration loaded once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Public base URL of this service
    pub public_base_url: String,
    /// Frontend application base URL
    pub frontend_url: String,
    /// Provider application settings
    pub mercadopago: MercadoPagoConfig,
    /// Tenant persistence backend
    pub store: TenantStoreConfig,
    /// Anti-forgery state strategy
    pub state: StateConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or values are invalid
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or values are invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &str| get(key).with_context(|| format!("{key} must be set"));

        let http_port = match get(env_config::HTTP_PORT) {
            Some(port) => port
                .parse()
                .with_context(|| format!("Invalid {} value: {port}", env_config::HTTP_PORT))?,
            None => defaults::HTTP_PORT,
        };

        let public_base_url = get(env_config::PUBLIC_BASE_URL)
            .unwrap_or_else(|| format!("http://localhost:{http_port}"));
        let public_base_url = public_base_url.trim_end_matches('/').to_owned();

        let redirect_uri = get(env_config::MP_REDIRECT_URI)
            .unwrap_or_else(|| format!("{public_base_url}{}", routes::CALLBACK_PATH));

        let mercadopago = MercadoPagoConfig {
            client_id: require(env_config::MP_CLIENT_ID)?,
            client_secret: require(env_config::MP_CLIENT_SECRET)?,
            redirect_uri,
            auth_url: get(env_config::MP_AUTH_URL)
                .unwrap_or_else(|| oauth::AUTHORIZATION_URL.to_owned()),
            token_url: get(env_config::MP_TOKEN_URL).unwrap_or_else(|| oauth::TOKEN_URL.to_owned()),
        };

        let store = match (
            get(env_config::SUPABASE_URL),
            get(env_config::SUPABASE_SERVICE_ROLE_KEY),
        ) {
            (Some(base_url), Some(service_role_key)) => TenantStoreConfig::Rest {
                base_url: base_url.trim_end_matches('/').to_owned(),
                service_role_key,
                table: get(env_config::TENANTS_TABLE)
                    .unwrap_or_else(|| defaults::TENANTS_TABLE.to_owned()),
            },
            (Some(_), None) => bail!(
                "{} is set but {} is missing",
                env_config::SUPABASE_URL,
                env_config::SUPABASE_SERVICE_ROLE_KEY
            ),
            _ => TenantStoreConfig::Sqlite {
                url: get(env_config::DATABASE_URL)
                    .unwrap_or_else(|| defaults::DATABASE_URL.to_owned()),
            },
        };

        let state = StateConfig {
            mode: get(env_config::MP_STATE_MODE)
                .map_or(Ok(StateMode::default()), |mode| StateMode::parse(&mode))?,
            ttl_secs: match get(env_config::MP_STATE_TTL_SECS) {
                Some(ttl) => ttl.parse().with_context(|| {
                    format!("Invalid {} value: {ttl}", env_config::MP_STATE_TTL_SECS)
                })?,
                None => defaults::STATE_TTL_SECS,
            },
        };

        let config = Self {
            http_port,
            environment: get(env_config::ENVIRONMENT)
                .map(|value| Environment::from_str_or_default(&value))
                .unwrap_or_default(),
            public_base_url,
            frontend_url: get(env_config::FRONTEND_URL)
                .unwrap_or_else(|| defaults::FRONTEND_URL.to_owned())
                .trim_end_matches('/')
                .to_owned(),
            mercadopago,
            store,
            state,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate URL-shaped settings so request-time failures stay exceptional
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unparsable URL or an out-of-range
    /// nonce lifetime
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (env_config::FRONTEND_URL, self.frontend_url.as_str()),
            (env_config::MP_REDIRECT_URI, self.mercadopago.redirect_uri.as_str()),
            (env_config::MP_AUTH_URL, self.mercadopago.auth_url.as_str()),
            (env_config::MP_TOKEN_URL, self.mercadopago.token_url.as_str()),
        ];

        for (name, value) in checks {
            Url::parse(value).with_context(|| format!("{name} is not a valid URL: {value}"))?;
        }

        if !(1..=defaults::MAX_STATE_TTL_SECS).contains(&self.state.ttl_secs) {
            bail!(
                "{} must be between 1 and {} seconds, got {}",
                env_config::MP_STATE_TTL_SECS,
                defaults::MAX_STATE_TTL_SECS,
                self.state.ttl_secs
            );
        }

        if let TenantStoreConfig::Rest { base_url, .. } = &self.store {
            Url::parse(base_url).with_context(|| {
                format!("{} is not a valid URL: {base_url}", env_config::SUPABASE_URL)
            })?;
        }

        Ok(())
    }

    /// Browser-side settings derived from the same values the server uses
    #[must_use]
    pub fn browser_config(&self) -> BrowserConfig {
        BrowserConfig {
            client_id: Some(self.mercadopago.client_id.clone()),
            redirect_uri: Some(self.mercadopago.redirect_uri.clone()),
            auth_url: self.mercadopago.auth_url.clone(),
        }
    }

    /// Get a summary of the configuration for logging (secrets redacted)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "MP Connect Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Frontend URL: {}\n\
             - Redirect URI: {}\n\
             - Tenant Store: {}\n\
             - State Mode: {:?}",
            self.http_port,
            self.environment,
            self.frontend_url,
            self.mercadopago.redirect_uri,
            match &self.store {
                TenantStoreConfig::Sqlite { .. } => "SQLite",
                TenantStoreConfig::Rest { .. } => "REST (service role)",
            },
            self.state.mode,
        )
    }
}

/// Browser-side settings for the authorization initiator
///
/// Both values may be absent in a browser bundle; absence is reported by the
/// initiator at connect time rather than at load time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Public OAuth client ID
    pub client_id: Option<String>,
    /// Redirect URI registered with the provider
    pub redirect_uri: Option<String>,
    /// Authorization endpoint
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
}

fn default_auth_url() -> String {
    oauth::AUTHORIZATION_URL.to_owned()
}

impl BrowserConfig {
    /// Create a browser configuration against the default authorization endpoint
    #[must_use]
    pub fn new(client_id: Option<String>, redirect_uri: Option<String>) -> Self {
        Self {
            client_id,
            redirect_uri,
            auth_url: default_auth_url(),
        }
    }

    /// Load from environment variables (`MP_CLIENT_ID`, `MP_REDIRECT_URI`)
    #[must_use]
    pub fn from_env() -> Self {
        let get = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            client_id: get(env_config::MP_CLIENT_ID),
            redirect_uri: get(env_config::MP_REDIRECT_URI),
            auth_url: get(env_config::MP_AUTH_URL).unwrap_or_else(default_auth_url),
        }
    }
}
