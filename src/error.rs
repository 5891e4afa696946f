// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::llm::GenerationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    RequestValidation(String),

    /// Transport-level failure reaching a provider.
    #[error("{0}")]
    UpstreamUnavailable(String),

    /// The provider answered but reported a non-success status.
    #[error("{0}")]
    UpstreamRejected(String),

    #[error("Malformed upstream data: {0}")]
    MalformedUpstreamData(String),

    #[error("Text generation failed: {0}")]
    Generation(#[from] GenerationError),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::RequestValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UpstreamRejected(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamUnavailable(_)
            | AppError::MalformedUpstreamData(_)
            | AppError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Generation(_) => tracing::error!(%status, error = %self, "chat request failed"),
            _ => tracing::warn!(%status, error = %self, "chat request failed"),
        }

        (status, Json(ErrorBody { detail: self.to_string() })).into_response()
    }
}
