//! Integration tests for the risk register.

use risk_register::export::to_delimited_text;
use risk_register::intake::{records_from_upstream, validate};
use risk_register::{run, Column, Command, Level, LevelFilter, Register, RiskInput, RiskRecord, SortOrder};

fn fixture_records() -> serde_json::Value {
  serde_json::from_str(
    r#"[
      {"id": 1, "asset": "Customer Database", "threat": "Unauthorized Access", "likelihood": 1, "impact": 1, "score": 1, "level": "Low"},
      {"id": 2, "asset": "Payment Gateway", "threat": "Ransomware", "likelihood": 5, "impact": 5, "score": 25, "level": "Critical"},
      {"id": 3, "asset": "HR Portal", "threat": "Phishing", "likelihood": 3, "impact": 4, "score": 12, "level": "Medium"}
    ]"#,
  )
  .unwrap()
}

fn submit(register: &mut Register, asset: &str, threat: &str, likelihood: i64, impact: i64) {
  let raw = RiskInput {
    asset: asset.into(),
    threat: threat.into(),
    likelihood: likelihood.into(),
    impact: impact.into(),
  };
  let submission = validate(&raw).unwrap();
  let id = register.len() as u64 + 1;
  register.append(RiskRecord::new(id, submission));
}

#[test]
fn scenario_a_end_to_end() {
  let register = Register::from_records(records_from_upstream(&fixture_records()));
  let levels: Vec<Level> = register.records().iter().map(|r| r.level()).collect();
  assert_eq!(levels, vec![Level::Low, Level::Critical, Level::Medium]);

  let stats = register.stats();
  assert_eq!(stats.total, 3);
  assert_eq!(stats.high_critical_count, 1);
  assert_eq!(stats.average_score, 12.7);
  assert_eq!(register.heatmap().total(), stats.total);
}

#[test]
fn scenario_b_export_is_two_lines() {
  let mut register = Register::new();
  submit(&mut register, "DB", "Leak", 2, 3);
  let text = to_delimited_text(&register.view(LevelFilter::All, SortOrder::Ascending), &Column::ALL).unwrap();
  assert_eq!(
    text,
    "ID,Asset,Threat,Likelihood,Impact,Score,Level,Mitigation Hint\n1,DB,Leak,2,3,6,Medium,Plan mitigation within 6 months"
  );
}

#[test]
fn scenario_c_filter_then_sort() {
  let register = Register::from_records(records_from_upstream(&fixture_records()));
  let view = register.view(LevelFilter::Only(Level::Critical), SortOrder::Ascending);
  assert_eq!(view.len(), 1);
  assert_eq!(view[0].score(), 25);
  assert_eq!(view[0].asset(), "Payment Gateway");
}

#[test]
fn submissions_flow_into_views_and_aggregates() {
  let mut register = Register::new();
  submit(&mut register, " Customer DB ", "SQL injection", 4, 5);
  submit(&mut register, "Laptop fleet", "Theft", 2, 2);
  submit(&mut register, "Wiki", "Defacement", 2, 2);

  assert_eq!(register.records()[0].asset(), "Customer DB");
  let desc = register.view(LevelFilter::All, SortOrder::Descending);
  let ids: Vec<u64> = desc.iter().map(|r| r.id()).collect();
  assert_eq!(ids, vec![1, 2, 3]);

  let stats = register.stats();
  assert_eq!(stats.high_critical_count, 1);
  // (20 + 4 + 4) / 3 = 9.33..
  assert_eq!(stats.average_score, 9.3);
}

#[test]
fn stdin_commands_are_deterministic() {
  let json = format!(r#"{{"command": "report", "records": {}, "order": "desc"}}"#, fixture_records());
  let command: Command = serde_json::from_str(&json).unwrap();
  let a = serde_json::to_string(&run(&command).unwrap()).unwrap();
  let b = serde_json::to_string(&run(&command).unwrap()).unwrap();
  assert_eq!(a, b, "Same inputs must produce identical JSON output");

  let report: serde_json::Value = serde_json::from_str(&a).unwrap();
  assert_eq!(report["view"][0]["id"], 2);
  assert_eq!(report["stats"]["average_score"], 12.7);
}

#[test]
fn export_command_carries_file_metadata() {
  let json = format!(r#"{{"command": "export", "records": {}, "level": "All"}}"#, fixture_records());
  let command: Command = serde_json::from_str(&json).unwrap();
  let out = serde_json::to_value(run(&command).unwrap()).unwrap();
  assert_eq!(out["filename"], "risk-register.csv");
  assert_eq!(out["content_type"], "text/csv");
  let body = out["body"].as_str().unwrap();
  assert_eq!(body.lines().count(), 4);
  assert!(body.lines().nth(1).unwrap().starts_with("1,Customer Database,"));
}

#[test]
fn unknown_fields_are_ignored() {
  let json = r#"{"command": "classify", "likelihood": 3, "impact": 3, "another": 42}"#;
  let command: Command = serde_json::from_str(json).unwrap();
  assert!(run(&command).is_ok());
}
