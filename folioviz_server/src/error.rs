// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HTTP error responses.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use folioviz_dashboard::Error as DashboardError;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by route handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The requested asset or view does not exist or cannot be read.
    #[error("Not Found")]
    NotFound,
    /// The request body was rejected.
    #[error("{0}")]
    BadRequest(String),
    /// The server could not render a response.
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound => {
                return (
                    StatusCode::NOT_FOUND,
                    [(header::CONTENT_TYPE, "text/plain")],
                    "Not Found",
                )
                    .into_response();
            }
            Self::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason),
            Self::Internal(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}

/// Result alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Maps errors caused by a client-supplied payload.
///
/// Provider-side failures are mapped to [`ApiError::Internal`] by the handlers that call the
/// provider.
impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::UnknownView(_) => Self::NotFound,
            DashboardError::MalformedPayload(_) | DashboardError::Chart(_) => {
                Self::BadRequest(err.to_string())
            }
            DashboardError::Data(_) => Self::Internal(err.to_string()),
        }
    }
}
