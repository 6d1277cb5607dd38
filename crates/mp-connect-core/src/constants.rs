// ABOUTME: Application constants for provider endpoints, callback parameters, and defaults
// ABOUTME: Centralizes wire-level names so the initiator, exchanger and observer agree
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// MercadoPago OAuth endpoints and fixed request values
pub mod oauth {
    /// Provider name used in logs and error messages
    pub const PROVIDER_NAME: &str = "MercadoPago";

    /// Browser-navigated authorization endpoint
    pub const AUTHORIZATION_URL: &str = "https://auth.mercadopago.com.ar/authorization";

    /// Server-side token endpoint
    pub const TOKEN_URL: &str = "https://api.mercadopago.com/oauth/token";

    /// `response_type` value for the authorization code grant
    pub const RESPONSE_TYPE_CODE: &str = "code";

    /// Platform discriminator expected by the provider
    pub const PLATFORM_ID: &str = "mp";

    /// `grant_type` value for the code exchange
    pub const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";
}

/// Query parameter names on both legs of the redirect
pub mod params {
    /// Authorization code echoed by the provider
    pub const CODE: &str = "code";
    /// Anti-forgery state echoed by the provider
    pub const STATE: &str = "state";
    /// Provider-supplied error code
    pub const ERROR: &str = "error";
    /// Provider-supplied error description
    pub const ERROR_DESCRIPTION: &str = "error_description";
    /// Tenant identifier on the server-side initiation endpoint
    pub const TENANT_ID: &str = "tenant_id";

    /// Success signal placed on the frontend URL
    pub const MP_SUCCESS: &str = "mp_success";
    /// Error signal placed on the frontend URL
    pub const MP_ERROR: &str = "mp_error";
    /// Value of the success signal
    pub const MP_SUCCESS_VALUE: &str = "true";
}

/// Fixed outcome codes carried by the `mp_error` signal
pub mod error_codes {
    /// Callback missing `code` or `state`
    pub const MISSING_PARAMS: &str = "missing_params";
    /// Provider rejected the code or the endpoint was unreachable
    pub const TOKEN_EXCHANGE_FAILED: &str = "token_exchange_failed";
    /// Tenant record could not be updated
    pub const DB_UPDATE_FAILED: &str = "db_update_failed";
    /// State did not resolve to a pending authorization (nonce mode)
    pub const INVALID_STATE: &str = "invalid_state";
}

/// HTTP routes exposed by the service
pub mod routes {
    /// Provider redirect target
    pub const CALLBACK_PATH: &str = "/mercadopago-auth";
    /// Server-side initiation endpoint
    pub const CONNECT_PATH: &str = "/mercadopago-auth/connect";
    /// Frontend page receiving the outcome signal
    pub const DASHBOARD_PATH: &str = "/dashboard";
}

/// Environment variable names
pub mod env_config {
    /// Provider application client id
    pub const MP_CLIENT_ID: &str = "MP_CLIENT_ID";
    /// Provider application client secret
    pub const MP_CLIENT_SECRET: &str = "MP_CLIENT_SECRET";
    /// Redirect URI registered with the provider
    pub const MP_REDIRECT_URI: &str = "MP_REDIRECT_URI";
    /// Override for the authorization endpoint
    pub const MP_AUTH_URL: &str = "MP_AUTH_URL";
    /// Override for the token endpoint
    pub const MP_TOKEN_URL: &str = "MP_TOKEN_URL";
    /// State strategy (`tenant` or `nonce`)
    pub const MP_STATE_MODE: &str = "MP_STATE_MODE";
    /// Nonce lifetime in seconds
    pub const MP_STATE_TTL_SECS: &str = "MP_STATE_TTL_SECS";
    /// Public base URL of this service
    pub const PUBLIC_BASE_URL: &str = "PUBLIC_BASE_URL";
    /// Frontend application base URL
    pub const FRONTEND_URL: &str = "FRONTEND_URL";
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Hosted tenant datastore base URL
    pub const SUPABASE_URL: &str = "SUPABASE_URL";
    /// Elevated credential for the hosted tenant datastore
    pub const SUPABASE_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
    /// Tenant table name in the hosted datastore
    pub const TENANTS_TABLE: &str = "TENANTS_TABLE";
    /// Local tenant database
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Default configuration values
pub mod defaults {
    /// Frontend used when `FRONTEND_URL` is unset
    pub const FRONTEND_URL: &str = "http://localhost:3000";
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8081;
    /// Default tenant table
    pub const TENANTS_TABLE: &str = "tenants";
    /// Default local database
    pub const DATABASE_URL: &str = "sqlite:./data/tenants.db";
    /// Default nonce lifetime (10 minutes)
    pub const STATE_TTL_SECS: u64 = 600;
    /// Upper bound on the nonce lifetime (1 day)
    pub const MAX_STATE_TTL_SECS: u64 = 86_400;
}

/// Service identity for logging
pub mod service_names {
    /// Name reported in startup logs
    pub const MP_CONNECT_SERVER: &str = "mp-connect-server";
}
