// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Liveness plus a readiness probe that reports the tenant store backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for load balancers and uptime monitoring

use crate::database_plugins::factory::backend_info;
use crate::resources::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use mp_connect_core::constants::service_names;
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health_handler))
            .route("/ready", get(Self::ready_handler))
            .with_state(resources)
    }

    async fn health_handler() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "service": service_names::MP_CONNECT_SERVER,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn ready_handler(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "ready",
            "tenant_store": backend_info(&resources.config.store),
            "state_mode": resources.config.state.mode,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}
