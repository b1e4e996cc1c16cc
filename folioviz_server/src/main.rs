// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `folioviz_server` binary.

use folioviz_server::{Config, app_router, build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);
    let listen_addr = config.listen_addr;
    tracing::info!("Serving assets from {}", config.asset_dir.display());
    let state = build_state(config)?;
    let router = app_router(state);
    tracing::info!("Listening on {}", listen_addr);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
