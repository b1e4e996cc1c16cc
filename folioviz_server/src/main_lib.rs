// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared state, router assembly and tracing setup.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use folioviz_dashboard::{DashboardData, JsonFileData, SampleData};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::api;
use crate::assets::serve_asset;
use crate::config::{Config, LogFormat};

/// State shared by every request. Immutable after startup.
#[derive(Debug)]
pub struct AppState {
    /// Server settings.
    pub config: Config,
    /// Source of dashboard records.
    pub data: Arc<dyn DashboardData>,
}

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

/// Builds the shared state, loading the data file if one is configured.
pub fn build_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let data: Arc<dyn DashboardData> = match &config.data_file {
        Some(path) => {
            let data = JsonFileData::load(path)
                .with_context(|| format!("cannot load data file {}", path.display()))?;
            tracing::info!("Dashboard data loaded from {}", path.display());
            Arc::new(data)
        }
        None => {
            tracing::info!("Using the built-in sample portfolio");
            Arc::new(SampleData)
        }
    };
    Ok(Arc::new(AppState { config, data }))
}

async fn log_request(request: Request, next: Next) -> Response {
    tracing::info!("{} received at {}", request.method(), request.uri());
    next.run(request).await
}

/// The full application: view routes, then static assets for everything else.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(api::router())
        .fallback(serve_asset)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
