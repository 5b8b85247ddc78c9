//! Structured error types for the risk register.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },

  #[error("no data to export")]
  EmptyExport,

  #[error("csv: {0}")]
  Csv(#[from] csv::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("utf-8: {0}")]
  Utf8(#[from] std::string::FromUtf8Error),
}

impl EngineError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}
