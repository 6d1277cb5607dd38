// ABOUTME: Integration tests for the SQLite and PostgREST tenant stores
// ABOUTME: Single-write credential updates, unknown tenants, and incomplete payload rejection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::patch,
    Json, Router,
};
use chrono::Utc;
use common::seeded_sqlite_store;
use mp_connect::config::TenantStoreConfig;
use mp_connect::database_plugins::factory::{backend_info, create_tenant_store};
use mp_connect::database_plugins::rest::RestTenantStore;
use mp_connect::database_plugins::sqlite::SqliteTenantStore;
use mp_connect::database_plugins::TenantStore;
use mp_connect_core::errors::ErrorCode;
use mp_connect_core::models::{Tenant, TenantCredentialsUpdate, TenantId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::net::TcpListener;

fn complete_update() -> TenantCredentialsUpdate {
    TenantCredentialsUpdate {
        access_token: Some("T1".to_owned()),
        refresh_token: Some("R1".to_owned()),
        user_id: Some("99".to_owned()),
        public_key: Some("PK1".to_owned()),
        connected_at: Utc::now(),
    }
}

// ============================================================================
// SQLite
// ============================================================================

#[tokio::test]
async fn test_sqlite_update_sets_all_credentials() {
    let store = seeded_sqlite_store(&["tenant-42"]).await;
    let update = complete_update();
    let connected_at = update.connected_at;

    store
        .update_mercadopago_credentials(&TenantId::new("tenant-42"), update)
        .await
        .unwrap();

    let tenant = store
        .get_tenant(&TenantId::new("tenant-42"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(tenant.name.as_deref(), Some("Tenant tenant-42"));
    assert_eq!(tenant.mercadopago_access_token.as_deref(), Some("T1"));
    assert_eq!(tenant.mercadopago_refresh_token.as_deref(), Some("R1"));
    assert_eq!(tenant.mercadopago_user_id.as_deref(), Some("99"));
    assert_eq!(tenant.mercadopago_public_key.as_deref(), Some("PK1"));
    assert_eq!(
        tenant.mercadopago_connected_at.map(|t| t.timestamp()),
        Some(connected_at.timestamp())
    );
}

#[tokio::test]
async fn test_sqlite_reconnect_overwrites_credentials() {
    let store = seeded_sqlite_store(&["tenant-42"]).await;
    let id = TenantId::new("tenant-42");

    store
        .update_mercadopago_credentials(&id, complete_update())
        .await
        .unwrap();
    let mut second = complete_update();
    second.access_token = Some("T2".to_owned());
    store.update_mercadopago_credentials(&id, second).await.unwrap();

    let tenant = store.get_tenant(&id).await.unwrap().unwrap();
    assert_eq!(tenant.mercadopago_access_token.as_deref(), Some("T2"));
}

#[tokio::test]
async fn test_sqlite_unknown_tenant_is_not_found() {
    let store = seeded_sqlite_store(&["tenant-42"]).await;

    let err = store
        .update_mercadopago_credentials(&TenantId::new("nobody"), complete_update())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(store
        .get_tenant(&TenantId::new("nobody"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_sqlite_incomplete_update_writes_nothing() {
    let store = seeded_sqlite_store(&["tenant-42"]).await;
    let mut update = complete_update();
    update.refresh_token = None;

    let err = store
        .update_mercadopago_credentials(&TenantId::new("tenant-42"), update)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::MissingRequiredField);
    let tenant = store
        .get_tenant(&TenantId::new("tenant-42"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(tenant.mercadopago_access_token, None);
}

#[tokio::test]
async fn test_sqlite_file_database_persists_across_pools() {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}", dir.path().join("tenants.db").display());

    {
        let store = SqliteTenantStore::new(&url).await.unwrap();
        store
            .create_tenant(&Tenant::new("tenant-42", None))
            .await
            .unwrap();
        store
            .update_mercadopago_credentials(&TenantId::new("tenant-42"), complete_update())
            .await
            .unwrap();
    }

    let reopened = SqliteTenantStore::new(&url).await.unwrap();
    let tenant = reopened
        .get_tenant(&TenantId::new("tenant-42"))
        .await
        .unwrap()
        .unwrap();
    assert!(tenant.is_mercadopago_connected());
}

#[tokio::test]
async fn test_sqlite_rejects_empty_tenant_id() {
    let store = seeded_sqlite_store(&[]).await;
    let err = store.create_tenant(&Tenant::new("", None)).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_factory_builds_sqlite_store() {
    let config = TenantStoreConfig::Sqlite {
        url: "sqlite::memory:".to_owned(),
    };
    assert_eq!(backend_info(&config), "SQLite (Local Development)");

    let store = create_tenant_store(&config).await.unwrap();
    assert!(store
        .get_tenant(&TenantId::new("tenant-42"))
        .await
        .unwrap()
        .is_none());
}

// ============================================================================
// PostgREST
// ============================================================================

#[derive(Clone, Default)]
struct MockDatastore {
    rows: Arc<Mutex<HashMap<String, serde_json::Value>>>,
    seen_headers: Arc<Mutex<Vec<HeaderMap>>>,
}

async fn handle_patch(
    State(datastore): State<MockDatastore>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(columns): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    datastore.seen_headers.lock().unwrap().push(headers);
    let id = query
        .get("id")
        .and_then(|f| f.strip_prefix("eq."))
        .unwrap_or_default()
        .to_owned();

    let mut rows = datastore.rows.lock().unwrap();
    match rows.get_mut(&id) {
        Some(row) => {
            for (key, value) in columns.as_object().unwrap() {
                row[key] = value.clone();
            }
            (StatusCode::OK, Json(serde_json::json!([row.clone()])))
        }
        None => (StatusCode::OK, Json(serde_json::json!([]))),
    }
}

async fn spawn_datastore(tenant_ids: &[&str]) -> (String, MockDatastore) {
    let datastore = MockDatastore::default();
    for id in tenant_ids {
        datastore
            .rows
            .lock()
            .unwrap()
            .insert((*id).to_owned(), serde_json::json!({ "id": id, "name": null }));
    }

    let app = Router::new()
        .route("/rest/v1/tenants", patch(handle_patch))
        .with_state(datastore.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/"), datastore)
}

#[tokio::test]
async fn test_rest_update_patches_tenant_with_service_role() {
    let (base_url, datastore) = spawn_datastore(&["tenant-42"]).await;
    let store = RestTenantStore::new(&base_url, "service-key".to_owned(), "tenants".to_owned());

    store
        .update_mercadopago_credentials(&TenantId::new("tenant-42"), complete_update())
        .await
        .unwrap();

    let row = datastore.rows.lock().unwrap()["tenant-42"].clone();
    assert_eq!(row["mercadopago_access_token"], "T1");
    assert_eq!(row["mercadopago_refresh_token"], "R1");
    assert_eq!(row["mercadopago_user_id"], "99");
    assert_eq!(row["mercadopago_public_key"], "PK1");
    assert!(row["mercadopago_connected_at"].is_string());

    let headers = datastore.seen_headers.lock().unwrap()[0].clone();
    assert_eq!(headers["apikey"], "service-key");
    assert_eq!(headers["authorization"], "Bearer service-key");
    assert_eq!(headers["prefer"], "return=representation");
}

#[tokio::test]
async fn test_rest_unknown_tenant_is_not_found() {
    let (base_url, _) = spawn_datastore(&["tenant-42"]).await;
    let store = RestTenantStore::new(&base_url, "service-key".to_owned(), "tenants".to_owned());

    let err = store
        .update_mercadopago_credentials(&TenantId::new("nobody"), complete_update())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_rest_incomplete_update_sends_nothing() {
    let (base_url, datastore) = spawn_datastore(&["tenant-42"]).await;
    let store = RestTenantStore::new(&base_url, "service-key".to_owned(), "tenants".to_owned());
    let mut update = complete_update();
    update.access_token = None;

    assert!(store
        .update_mercadopago_credentials(&TenantId::new("tenant-42"), update)
        .await
        .is_err());
    assert!(datastore.seen_headers.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_rest_update_succeeds_when_row_columns_are_not_strings() {
    let (base_url, datastore) = spawn_datastore(&[]).await;
    datastore.rows.lock().unwrap().insert(
        "42".to_owned(),
        serde_json::json!({ "id": 42, "name": "Shop", "mercadopago_user_id": null }),
    );
    let store = RestTenantStore::new(&base_url, "service-key".to_owned(), "tenants".to_owned());

    store
        .update_mercadopago_credentials(&TenantId::new("42"), complete_update())
        .await
        .unwrap();

    let row = datastore.rows.lock().unwrap()["42"].clone();
    assert_eq!(row["id"], 42);
    assert_eq!(row["mercadopago_access_token"], "T1");
}
