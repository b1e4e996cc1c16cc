// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned while assembling dashboard views.

use folioviz_charts::ChartError;
use thiserror::Error;

/// Result alias for dashboard operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned while loading data or rendering a view.
#[derive(Error, Debug)]
pub enum Error {
    /// A scale or geometry could not be built from the records.
    #[error("cannot build chart: {0}")]
    Chart(#[from] ChartError),

    /// A posted payload did not have the expected shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// The data provider could not read or decode its records.
    #[error("dashboard data unavailable: {0}")]
    Data(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The requested view name is not known.
    #[error("unknown view '{0}'")]
    UnknownView(String),
}
