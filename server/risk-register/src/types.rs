//! Core types for the risk register (JSON contracts + internal models).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::classify;
use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Rating (likelihood / impact)
// ---------------------------------------------------------------------------

/// A likelihood or impact rating. Only 1..=5 is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
  pub const MIN: u8 = 1;
  pub const MAX: u8 = 5;

  pub fn new(value: i64) -> Option<Self> {
    if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
      Some(Self(value as u8))
    } else {
      None
    }
  }

  pub fn get(self) -> u8 {
    self.0
  }

  /// Zero-based index into the heatmap grid.
  pub fn index(self) -> usize {
    (self.0 - 1) as usize
  }

  /// All ratings, lowest first.
  pub fn all() -> impl DoubleEndedIterator<Item = Rating> {
    (Self::MIN..=Self::MAX).map(Rating)
  }
}

impl Serialize for Rating {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(self.0)
  }
}

impl fmt::Display for Rating {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ---------------------------------------------------------------------------
// Level (normalized)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
  Low,
  Medium,
  High,
  Critical,
}

impl Level {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "Low",
      Self::Medium => "Medium",
      Self::High => "High",
      Self::Critical => "Critical",
    }
  }

  /// Fixed mitigation guidance for this level.
  pub fn hint(self) -> &'static str {
    match self {
      Self::Low => "Accept / monitor",
      Self::Medium => "Plan mitigation within 6 months",
      Self::High => "Prioritize action + compensating controls (NIST PR.AC)",
      Self::Critical => "Immediate mitigation required + executive reporting",
    }
  }

  /// Heatmap bucket color (green, yellow, orange, red).
  pub fn color(self) -> &'static str {
    match self {
      Self::Low => "#9be7a2",
      Self::Medium => "#ffe58f",
      Self::High => "#ffb366",
      Self::Critical => "#ff7a7a",
    }
  }

  pub fn is_high_or_critical(self) -> bool {
    matches!(self, Self::High | Self::Critical)
  }

  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "low" => Some(Self::Low),
      "medium" => Some(Self::Medium),
      "high" => Some(Self::High),
      "critical" => Some(Self::Critical),
      _ => None,
    }
  }
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ---------------------------------------------------------------------------
// Classification + record
// ---------------------------------------------------------------------------

/// Derived triple for one (likelihood, impact) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
  pub score: u8,
  pub level: Level,
  pub hint: &'static str,
}

/// A classified risk. Derived fields are only ever produced by [`classify::classify`],
/// so there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskRecord {
  id: u64,
  asset: String,
  threat: String,
  likelihood: Rating,
  impact: Rating,
  score: u8,
  level: Level,
  hint: &'static str,
}

impl RiskRecord {
  /// Classify a validated submission and attach the store-assigned id.
  pub fn new(id: u64, submission: Submission) -> Self {
    let Classification { score, level, hint } =
      classify::classify(submission.likelihood, submission.impact);
    Self {
      id,
      asset: submission.asset,
      threat: submission.threat,
      likelihood: submission.likelihood,
      impact: submission.impact,
      score,
      level,
      hint,
    }
  }

  pub fn id(&self) -> u64 {
    self.id
  }

  pub fn asset(&self) -> &str {
    &self.asset
  }

  pub fn threat(&self) -> &str {
    &self.threat
  }

  pub fn likelihood(&self) -> Rating {
    self.likelihood
  }

  pub fn impact(&self) -> Rating {
    self.impact
  }

  pub fn score(&self) -> u8 {
    self.score
  }

  pub fn level(&self) -> Level {
    self.level
  }

  pub fn hint(&self) -> &'static str {
    self.hint
  }
}

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the caller sends)
// ---------------------------------------------------------------------------

/// Raw submission from the form. Ratings stay untyped until intake so that a
/// non-numeric value is reported as a field error rather than a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskInput {
  #[serde(default)]
  pub asset: String,
  #[serde(default)]
  pub threat: String,
  #[serde(default)]
  pub likelihood: serde_json::Value,
  #[serde(default)]
  pub impact: serde_json::Value,
}

/// A submission that passed intake validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
  pub asset: String,
  pub threat: String,
  pub likelihood: Rating,
  pub impact: Rating,
}

/// One record as handed back by the store. Derived fields are optional and, when
/// present, must agree with recomputation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamRecord {
  pub id: u64,
  pub asset: String,
  pub threat: String,
  pub likelihood: i64,
  pub impact: i64,
  #[serde(default)]
  pub score: Option<i64>,
  #[serde(default)]
  pub level: Option<String>,
}

// ---------------------------------------------------------------------------
// View selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelFilter {
  #[default]
  All,
  Only(Level),
}

impl LevelFilter {
  pub fn matches(self, level: Level) -> bool {
    match self {
      Self::All => true,
      Self::Only(l) => l == level,
    }
  }
}

impl FromStr for LevelFilter {
  type Err = EngineError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.trim().eq_ignore_ascii_case("all") {
      return Ok(Self::All);
    }
    Level::from_str_loose(s)
      .map(Self::Only)
      .ok_or_else(|| EngineError::validation("level", "expected All|Low|Medium|High|Critical"))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  #[default]
  Ascending,
  Descending,
}

impl FromStr for SortOrder {
  type Err = EngineError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "asc" | "ascending" => Ok(Self::Ascending),
      "desc" | "descending" => Ok(Self::Descending),
      _ => Err(EngineError::validation("order", "expected asc|desc")),
    }
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
  pub total: usize,
  pub high_critical_count: usize,
  pub average_score: f64,
}

/// Export columns, in their canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
  Id,
  Asset,
  Threat,
  Likelihood,
  Impact,
  Score,
  Level,
  MitigationHint,
}

impl Column {
  pub const ALL: [Column; 8] = [
    Column::Id,
    Column::Asset,
    Column::Threat,
    Column::Likelihood,
    Column::Impact,
    Column::Score,
    Column::Level,
    Column::MitigationHint,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Self::Id => "ID",
      Self::Asset => "Asset",
      Self::Threat => "Threat",
      Self::Likelihood => "Likelihood",
      Self::Impact => "Impact",
      Self::Score => "Score",
      Self::Level => "Level",
      Self::MitigationHint => "Mitigation Hint",
    }
  }

  pub fn value(self, record: &RiskRecord) -> String {
    match self {
      Self::Id => record.id().to_string(),
      Self::Asset => record.asset().to_string(),
      Self::Threat => record.threat().to_string(),
      Self::Likelihood => record.likelihood().to_string(),
      Self::Impact => record.impact().to_string(),
      Self::Score => record.score().to_string(),
      Self::Level => record.level().to_string(),
      Self::MitigationHint => record.hint().to_string(),
    }
  }
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Structured error output for rejected commands.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}

impl From<&EngineError> for ErrorOutput {
  fn from(e: &EngineError) -> Self {
    match e {
      EngineError::Validation { field, reason } => Self::new(reason.clone()).with_field(field.clone()),
      _ => Self::new(e.to_string()),
    }
  }
}
