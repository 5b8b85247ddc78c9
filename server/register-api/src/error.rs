//! HTTP mapping for engine errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use risk_register::EngineError;
use thiserror::Error;

use crate::types::Detail;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Engine(#[from] EngineError),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let ApiError::Engine(e) = self;
    let (status, body) = match e {
      EngineError::Validation { field, reason } => {
        tracing::info!(%field, %reason, "rejected request");
        (StatusCode::BAD_REQUEST, Detail::new(reason).with_field(field))
      }
      EngineError::EmptyExport => (StatusCode::NOT_FOUND, Detail::new("No data to export")),
      other => {
        tracing::error!(error = %other, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Detail::new("internal error"))
      }
    };
    (status, Json(body)).into_response()
  }
}
