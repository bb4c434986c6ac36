// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

use std::net::SocketAddr;

use devlaunch_server::{api, config::Config, solana::ChainGateway, state::AppState};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install shutdown handler");
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = Config::from_env();

    let chain = match ChainGateway::new(
        &config.solana_rpc_url,
        config.operator_wallet_key.as_deref(),
        &config.solana_network,
    ) {
        Ok(chain) => chain,
        Err(err) => {
            tracing::error!(%err, "invalid operator wallet key");
            std::process::exit(1);
        }
    };

    if chain.operator_address().is_none() {
        tracing::warn!("no operator wallet configured; chain-mutating endpoints will fail");
    }

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(err) => {
            tracing::error!(%err, "invalid bind address");
            std::process::exit(1);
        }
    };

    let state = AppState::new(config, chain);
    let app = api::router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%err, %addr, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!("DevLaunch server listening on http://{addr} (docs at /docs)");

    if let Err(err) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    {
        tracing::error!(%err, "server error");
        std::process::exit(1);
    }
}
