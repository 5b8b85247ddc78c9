//! Command dispatch for the stdin/stdout binary (no I/O here).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::HeatCell;
use crate::classify;
use crate::error::EngineError;
use crate::export::{self, EXPORT_CONTENT_TYPE, EXPORT_FILENAME};
use crate::intake;
use crate::register::Register;
use crate::types::{Classification, Column, LevelFilter, RiskRecord, SortOrder, Stats};

/// One inbound command. Unknown fields are silently ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
  Classify {
    #[serde(default)]
    likelihood: Value,
    #[serde(default)]
    impact: Value,
  },
  Report {
    #[serde(default)]
    records: Value,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    order: Option<String>,
  },
  Export {
    #[serde(default)]
    records: Value,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    order: Option<String>,
  },
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
  Classification(Classification),
  Report(Report),
  Export(ExportFile),
}

/// Visible view plus full-set aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
  pub view: Vec<RiskRecord>,
  pub stats: Stats,
  pub heatmap: Vec<HeatCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportFile {
  pub filename: &'static str,
  pub content_type: &'static str,
  pub body: String,
}

/// Parse the optional `level` / `order` selectors; absent means All / ascending.
pub fn view_selection(
  level: Option<&str>,
  order: Option<&str>,
) -> Result<(LevelFilter, SortOrder), EngineError> {
  let level = level.map(str::parse::<LevelFilter>).transpose()?.unwrap_or_default();
  let order = order.map(str::parse::<SortOrder>).transpose()?.unwrap_or_default();
  Ok((level, order))
}

pub fn run(command: &Command) -> Result<Response, EngineError> {
  match command {
    Command::Classify { likelihood, impact } => {
      let likelihood = intake::rating_from_value("likelihood", likelihood)?;
      let impact = intake::rating_from_value("impact", impact)?;
      Ok(Response::Classification(classify::classify(likelihood, impact)))
    }
    Command::Report { records, level, order } => {
      let (level, order) = view_selection(level.as_deref(), order.as_deref())?;
      let register = Register::from_records(intake::records_from_upstream(records));
      Ok(Response::Report(Report {
        view: register.view(level, order).into_iter().cloned().collect(),
        stats: register.stats(),
        heatmap: register.heatmap().cells(),
      }))
    }
    Command::Export { records, level, order } => {
      let (level, order) = view_selection(level.as_deref(), order.as_deref())?;
      let register = Register::from_records(intake::records_from_upstream(records));
      let body = export::to_delimited_text(&register.view(level, order), &Column::ALL)?;
      Ok(Response::Export(ExportFile {
        filename: EXPORT_FILENAME,
        content_type: EXPORT_CONTENT_TYPE,
        body,
      }))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn command(v: Value) -> Command {
    serde_json::from_value(v).unwrap()
  }

  #[test]
  fn classify_command() {
    let out = run(&command(json!({"command": "classify", "likelihood": 4, "impact": 5}))).unwrap();
    let json = serde_json::to_value(out).unwrap();
    assert_eq!(json["score"], 20);
    assert_eq!(json["level"], "Critical");
  }

  #[test]
  fn classify_rejects_out_of_range() {
    let err = run(&command(json!({"command": "classify", "likelihood": 0, "impact": 5}))).unwrap_err();
    assert!(err.to_string().contains("likelihood"));
  }

  #[test]
  fn report_on_malformed_records_is_empty() {
    let out = run(&command(json!({"command": "report", "records": {"oops": true}}))).unwrap();
    let json = serde_json::to_value(out).unwrap();
    assert_eq!(json["stats"]["total"], 0);
    assert_eq!(json["stats"]["average_score"], 0.0);
    assert_eq!(json["view"].as_array().unwrap().len(), 0);
    assert_eq!(json["heatmap"].as_array().unwrap().len(), 25);
  }

  #[test]
  fn report_rejects_unknown_level() {
    let err = run(&command(json!({"command": "report", "records": [], "level": "Severe"}))).unwrap_err();
    assert!(matches!(err, EngineError::Validation { .. }));
  }

  #[test]
  fn export_empty_view_is_reported() {
    let records = json!([{"id": 1, "asset": "DB", "threat": "Leak", "likelihood": 1, "impact": 1}]);
    let err = run(&command(json!({"command": "export", "records": records, "level": "High"}))).unwrap_err();
    assert!(matches!(err, EngineError::EmptyExport));
  }
}
