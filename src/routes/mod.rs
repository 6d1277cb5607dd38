// ABOUTME: Route module organization for the MercadoPago connect HTTP endpoints
// ABOUTME: Assembles domain routers and the shared tracing, request-id, and panic layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer. [`build_router`] merges them
//! and wraps the result in the cross-cutting layers.

/// Health check and readiness routes
pub mod health;
/// MercadoPago OAuth callback and initiation routes
pub mod mercadopago;

/// Health route handlers
pub use health::HealthRoutes;
/// MercadoPago OAuth route handlers
pub use mercadopago::MercadoPagoRoutes;

use crate::middleware::{create_request_span, request_id_header};
use crate::resources::ServerResources;
use axum::response::Response;
use axum::Router;
use std::any::Any;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Build the application router with all routes and layers
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(MercadoPagoRoutes::routes(resources))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(create_request_span)
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(PropagateRequestIdLayer::new(request_id_header()))
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = %detail, "Request handler panicked");

    mercadopago::internal_error()
}
