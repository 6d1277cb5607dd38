// ABOUTME: MercadoPago OAuth route handlers for the provider callback and flow initiation
// ABOUTME: Thin handlers delegating to the callback exchanger and authorization service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! MercadoPago OAuth routes
//!
//! - `OPTIONS /mercadopago-auth`: CORS preflight
//! - `GET /mercadopago-auth`: provider redirect target; always answers with a
//!   302 back to the frontend dashboard, or a 500 JSON body on unexpected faults
//! - `GET /mercadopago-auth/connect?tenant_id=..`: issues the state and
//!   redirects the browser to the provider's consent page

use crate::middleware::with_cors_headers;
use crate::resources::ServerResources;
use crate::services::oauth_flow::begin_authorization;
use crate::services::CallbackParams;
use axum::{
    extract::{Query, RawQuery, State},
    http::{header::LOCATION, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use mp_connect_core::constants::{params, routes};
use mp_connect_core::errors::AppError;
use mp_connect_core::models::TenantId;
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;
use url::Url;

/// Query parameters for the connect endpoint
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Tenant starting the authorization
    pub tenant_id: Option<String>,
}

/// MercadoPago OAuth routes implementation
pub struct MercadoPagoRoutes;

impl MercadoPagoRoutes {
    /// Create all MercadoPago OAuth routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                routes::CALLBACK_PATH,
                get(Self::handle_callback).options(Self::handle_preflight),
            )
            .route(routes::CONNECT_PATH, get(Self::handle_connect))
            .with_state(resources)
    }

    async fn handle_preflight() -> Response {
        with_cors_headers(StatusCode::OK.into_response())
    }

    async fn handle_callback(
        State(resources): State<Arc<ServerResources>>,
        RawQuery(query): RawQuery,
    ) -> Response {
        let params = CallbackParams::from_query(query.as_deref());

        let response = match resources.callback_exchanger.exchange(params).await {
            Ok(outcome) => match outcome.redirect_url(&resources.config.frontend_url) {
                Ok(url) => found(&url),
                Err(e) => {
                    error!(error = %e, "Failed to build frontend redirect");
                    internal_error()
                }
            },
            Err(e) => {
                error!(error = %e, "Unexpected failure handling MercadoPago callback");
                internal_error()
            }
        };

        with_cors_headers(response)
    }

    async fn handle_connect(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ConnectQuery>,
    ) -> Response {
        let Some(tenant_id) = query.tenant_id.filter(|t| !t.trim().is_empty()) else {
            return AppError::missing_field(params::TENANT_ID).into_response();
        };

        match begin_authorization(
            &resources.config.mercadopago,
            resources.state_store.as_ref(),
            &TenantId::new(tenant_id),
        )
        .await
        {
            Ok(url) => found(&url),
            Err(e) => e.into_response(),
        }
    }
}

/// 302 Found with `Location`
///
/// `axum::response::Redirect::to` answers 303, the callback contract is 302.
pub fn found(url: &Url) -> Response {
    match HeaderValue::from_str(url.as_str()) {
        Ok(location) => (StatusCode::FOUND, [(LOCATION, location)]).into_response(),
        Err(e) => {
            error!(error = %e, "Redirect target is not a valid header value");
            internal_error()
        }
    }
}

/// Generic 500 body; never carries internal detail
pub fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Internal server error" })),
    )
        .into_response()
}
