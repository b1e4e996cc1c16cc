// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dashboard fragment routes.

use std::sync::Arc;

use axum::Router;

use crate::main_lib::AppState;

pub mod views;

/// All API routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().merge(views::router())
}
