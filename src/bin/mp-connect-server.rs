// ABOUTME: Server binary serving the MercadoPago OAuth callback and connect endpoints
// ABOUTME: Loads environment configuration, initializes logging and the tenant store, and serves axum
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # MP Connect Server Binary
//!
//! Starts the HTTP service that completes MercadoPago OAuth authorizations
//! and stores the resulting credentials on the tenant record.

use anyhow::{Context, Result};
use clap::Parser;
use mp_connect::{
    config::ServerConfig, database_plugins::factory::backend_info, logging,
    resources::ServerResources, routes::build_router,
};
use mp_connect_core::constants::routes;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Command-line arguments
#[derive(Parser)]
#[command(name = "mp-connect-server")]
#[command(about = "MercadoPago multi-tenant OAuth connect service")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env().context("Failed to load configuration")?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    config.validate().context("Invalid configuration")?;
    info!("{}", config.summary());

    let resources = Arc::new(
        ServerResources::from_config(config.clone())
            .await
            .context("Failed to initialize server resources")?,
    );
    info!("Tenant store initialized: {}", backend_info(&config.store));

    let app = build_router(resources);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP port {}", config.http_port))?;

    display_available_endpoints(&config);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server stopped");
    Ok(())
}

/// Display the endpoints served by this process
fn display_available_endpoints(config: &ServerConfig) {
    let base = &config.public_base_url;

    info!("=== Available API Endpoints ===");
    info!("   Health:            GET     {base}/health");
    info!("   Readiness:         GET     {base}/ready");
    info!(
        "   OAuth Connect:     GET     {base}{}?tenant_id={{id}}",
        routes::CONNECT_PATH
    );
    info!("   OAuth Callback:    GET     {base}{}", routes::CALLBACK_PATH);
    info!("   CORS Preflight:    OPTIONS {base}{}", routes::CALLBACK_PATH);
    info!("=== End of Endpoint List ===");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Graceful shutdown initiated");
}
