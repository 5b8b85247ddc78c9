//! Intake boundary: validate submissions and normalize records handed back by the store.

use std::collections::HashSet;

use serde_json::Value;

use crate::classify;
use crate::error::EngineError;
use crate::types::*;

const RANGE_REASON: &str = "Invalid range: Likelihood and Impact must be 1–5.";

/// Validate a raw form submission. Text is trimmed; nothing is clamped.
pub fn validate(raw: &RiskInput) -> Result<Submission, EngineError> {
  let asset = raw.asset.trim();
  if asset.is_empty() {
    return Err(EngineError::validation("asset", "must not be empty"));
  }
  let threat = raw.threat.trim();
  if threat.is_empty() {
    return Err(EngineError::validation("threat", "must not be empty"));
  }

  let likelihood = rating_from_value("likelihood", &raw.likelihood)?;
  let impact = rating_from_value("impact", &raw.impact)?;

  Ok(Submission {
    asset: asset.to_string(),
    threat: threat.to_string(),
    likelihood,
    impact,
  })
}

/// Accept JSON integers only; floats, strings and nulls are rejected.
pub fn rating_from_value(field: &str, value: &Value) -> Result<Rating, EngineError> {
  let n = value
    .as_i64()
    .ok_or_else(|| EngineError::validation(field, "must be an integer"))?;
  Rating::new(n).ok_or_else(|| EngineError::validation(field, RANGE_REASON))
}

/// Query-string form of a rating, e.g. `?likelihood=3`. Missing counts as non-numeric.
pub fn rating_from_param(field: &str, raw: Option<&str>) -> Result<Rating, EngineError> {
  let n = raw
    .and_then(|s| s.trim().parse::<i64>().ok())
    .ok_or_else(|| EngineError::validation(field, "must be an integer"))?;
  Rating::new(n).ok_or_else(|| EngineError::validation(field, RANGE_REASON))
}

/// Turn whatever the store returned into an ordered record list.
///
/// Anything other than an array of well-shaped, self-consistent records degrades
/// to an empty list; a "no risks" view beats a failed page.
pub fn records_from_upstream(payload: &Value) -> Vec<RiskRecord> {
  match try_records_from_upstream(payload) {
    Ok(records) => records,
    Err(e) => {
      tracing::warn!(error = %e, "malformed upstream records, treating as empty");
      Vec::new()
    }
  }
}

fn try_records_from_upstream(payload: &Value) -> Result<Vec<RiskRecord>, EngineError> {
  if !payload.is_array() {
    return Err(EngineError::validation("records", "expected an array"));
  }
  let raw: Vec<UpstreamRecord> = serde_json::from_value(payload.clone())?;

  let mut seen = HashSet::with_capacity(raw.len());
  if let Some(dup) = raw.iter().find(|r| !seen.insert(r.id)) {
    return Err(EngineError::validation("id", &format!("duplicate id {}", dup.id)));
  }

  raw.iter().map(record_from_upstream).collect()
}

fn record_from_upstream(raw: &UpstreamRecord) -> Result<RiskRecord, EngineError> {
  let submission = validate(&RiskInput {
    asset: raw.asset.clone(),
    threat: raw.threat.clone(),
    likelihood: Value::from(raw.likelihood),
    impact: Value::from(raw.impact),
  })?;

  let derived = classify::classify(submission.likelihood, submission.impact);
  if let Some(score) = raw.score {
    if score != derived.score as i64 {
      return Err(EngineError::validation("score", "does not match likelihood x impact"));
    }
  }
  if let Some(level) = &raw.level {
    if Level::from_str_loose(level) != Some(derived.level) {
      return Err(EngineError::validation("level", "does not match score band"));
    }
  }

  Ok(RiskRecord::new(raw.id, submission))
}
