// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static file serving for the dashboard shell.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{Uri, header};
use axum::response::{IntoResponse, Response};

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

/// Document served for `/`.
pub const INDEX_DOCUMENT: &str = "index.html";

/// Content type for a file, by extension.
pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        _ => "text/plain",
    }
}

/// Resolves a request path under `root`.
///
/// Returns `None` for paths that would leave `root` (`..`, absolute or prefixed components).
pub fn resolve_asset(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = match request_path.trim_start_matches('/') {
        "" => INDEX_DOCUMENT,
        other => other,
    };
    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}

/// Serves the file at the request path from the asset root.
///
/// Every failure (missing file, directory, permissions, escaping the root) is a `404`.
pub async fn serve_asset(State(state): State<Arc<AppState>>, uri: Uri) -> ApiResult<Response> {
    let Some(path) = resolve_asset(&state.config.asset_dir, uri.path()) else {
        tracing::debug!(path = uri.path(), "rejected asset path");
        return Err(ApiError::NotFound);
    };
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, content_type(&path))], bytes).into_response()),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "asset unavailable");
            Err(ApiError::NotFound)
        }
    }
}
