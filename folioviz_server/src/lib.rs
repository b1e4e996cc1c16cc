// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HTTP server for the folioviz dashboard.
//!
//! - `GET /` and `GET /<path>` serve the static shell from the asset directory.
//! - `GET /views/{pie,line,bar,positions,scatter}` return server-rendered fragments.
//! - `POST /views/scatter` re-renders the scatter fragment from a JSON array of points.
//!
//! Every request is logged with its method and URL.

pub mod api;
pub mod assets;
pub mod config;
pub mod error;
mod main_lib;

pub use config::{Config, LogFormat};
pub use error::{ApiError, ApiResult};
pub use main_lib::{AppState, app_router, build_state, init_tracing};
