//! HTTP handlers for the register API.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use risk_register::classify;
use risk_register::engine::view_selection;
use risk_register::export::{self, EXPORT_CONTENT_TYPE, EXPORT_FILENAME};
use risk_register::intake;
use risk_register::register;
use risk_register::types::Classification;
use risk_register::{Column, EngineError, Register, RiskInput, RiskRecord};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{ClassifyQuery, Summary, ViewQuery};

pub async fn health() -> &'static str {
  "ok"
}

/// The visible projection shared by the list and export routes.
/// Without `order` the register's insertion order is kept.
fn visible<'a>(snapshot: &'a Register, query: &ViewQuery) -> Result<Vec<&'a RiskRecord>, EngineError> {
  let (level, order) = view_selection(query.level.as_deref(), query.order.as_deref())?;
  if query.order.is_some() {
    Ok(snapshot.view(level, order))
  } else {
    Ok(register::filter(snapshot.records(), level))
  }
}

/// Live preview for the form: classification only, nothing is stored.
pub async fn classify_preview(Query(query): Query<ClassifyQuery>) -> Result<Json<Classification>, ApiError> {
  let likelihood = intake::rating_from_param("likelihood", query.likelihood.as_deref())?;
  let impact = intake::rating_from_param("impact", query.impact.as_deref())?;
  Ok(Json(classify::classify(likelihood, impact)))
}

pub async fn assess_risk(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<RiskInput>, JsonRejection>,
) -> Result<Json<RiskRecord>, ApiError> {
  let Json(payload) = payload.map_err(|e| EngineError::validation("body", &e.body_text()))?;
  let submission = intake::validate(&payload)?;
  let record = state.insert(submission).await;
  tracing::info!(id = record.id(), score = record.score(), risk_level = %record.level(), "risk assessed");
  Ok(Json(record))
}

pub async fn list_risks(
  State(state): State<Arc<AppState>>,
  Query(query): Query<ViewQuery>,
) -> Result<Json<Vec<RiskRecord>>, ApiError> {
  let snapshot = state.snapshot().await;
  let view = visible(&snapshot, &query)?;
  Ok(Json(view.into_iter().cloned().collect()))
}

pub async fn summary(State(state): State<Arc<AppState>>) -> Json<Summary> {
  let snapshot = state.snapshot().await;
  Json(Summary {
    stats: snapshot.stats(),
    heatmap: snapshot.heatmap().cells(),
  })
}

pub async fn export_csv(
  State(state): State<Arc<AppState>>,
  Query(query): Query<ViewQuery>,
) -> Result<Response, ApiError> {
  let snapshot = state.snapshot().await;
  let view = visible(&snapshot, &query)?;
  let body = export::to_delimited_text(&view, &Column::ALL)?;
  tracing::info!(rows = view.len(), "register exported");

  let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILENAME);
  Ok(
    (
      [
        (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
        (header::CONTENT_DISPOSITION, disposition),
      ],
      body,
    )
      .into_response(),
  )
}
