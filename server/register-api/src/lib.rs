//! Risk Register API
//!
//! HTTP service that classifies submitted risks into an in-memory register and
//! serves the filtered view, summary stats + heatmap, and CSV export.

pub mod config;
mod error;
mod handlers;
mod state;
mod types;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use config::Config;
pub use error::ApiError;
pub use handlers::{assess_risk, classify_preview, export_csv, health, list_risks, summary};
pub use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/api/classify", get(classify_preview))
    .route("/api/assess-risk", post(assess_risk))
    .route("/api/risks", get(list_risks))
    .route("/api/risks/export", get(export_csv))
    .route("/api/summary", get(summary))
    .layer(CorsLayer::permissive())
    .with_state(state)
}
