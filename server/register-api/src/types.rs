//! Request/response types for the register API.

use risk_register::aggregate::HeatCell;
use risk_register::Stats;
use serde::{Deserialize, Serialize};

/// `?level=&order=` on list and export routes.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
  pub level: Option<String>,
  pub order: Option<String>,
}

/// `?likelihood=&impact=` on the preview route. Parsed at intake so a bad value
/// is a field error rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ClassifyQuery {
  pub likelihood: Option<String>,
  pub impact: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
  pub stats: Stats,
  pub heatmap: Vec<HeatCell>,
}

/// Error body, `{"detail": ...}` like the form expects.
#[derive(Debug, Serialize)]
pub struct Detail {
  pub detail: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl Detail {
  pub fn new(detail: impl Into<String>) -> Self {
    Self {
      detail: detail.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
