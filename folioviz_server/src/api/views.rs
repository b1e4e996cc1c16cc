// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `/views/*`: server-rendered dashboard fragments.

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;
use folioviz_dashboard::{ViewKind, render_scatter_payload, render_view};

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

fn render(state: &AppState, kind: ViewKind) -> ApiResult<Html<String>> {
    render_view(kind, state.data.as_ref()).map(Html).map_err(|err| {
        tracing::error!(view = %kind, error = %err, "view rendering failed");
        ApiError::Internal(err.to_string())
    })
}

async fn get_view(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Html<String>> {
    let kind: ViewKind = name.parse()?;
    render(&state, kind)
}

async fn get_scatter(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    render(&state, ViewKind::Scatter)
}

/// Re-renders the scatter fragment from a posted JSON array of `{x, y}` points.
async fn post_scatter(body: Bytes) -> ApiResult<Html<String>> {
    render_scatter_payload(&body).map(Html).map_err(|err| {
        tracing::warn!(error = %err, "rejected scatter payload");
        ApiError::from(err)
    })
}

/// Routes for every [`ViewKind`].
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/views/scatter", get(get_scatter).post(post_scatter))
        .route("/views/{name}", get(get_view))
}
