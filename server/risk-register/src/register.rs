//! The ordered register and its derived views.

use crate::aggregate::{self, Heatmap};
use crate::types::{LevelFilter, RiskRecord, SortOrder, Stats};

/// Records in insertion order. Append-only.
#[derive(Debug, Clone, Default)]
pub struct Register {
  records: Vec<RiskRecord>,
}

impl Register {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_records(records: Vec<RiskRecord>) -> Self {
    Self { records }
  }

  pub fn append(&mut self, record: RiskRecord) {
    self.records.push(record);
  }

  pub fn records(&self) -> &[RiskRecord] {
    &self.records
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// Filter, then sort: the visible projection used for display and export.
  pub fn view(&self, level: LevelFilter, order: SortOrder) -> Vec<&RiskRecord> {
    sort_by_score(filter(&self.records, level), order)
  }

  pub fn stats(&self) -> Stats {
    aggregate::stats(&self.records)
  }

  pub fn heatmap(&self) -> Heatmap<'_> {
    aggregate::heatmap(&self.records)
  }
}

/// Records matching `level`, relative order preserved.
pub fn filter(records: &[RiskRecord], level: LevelFilter) -> Vec<&RiskRecord> {
  records.iter().filter(|r| level.matches(r.level())).collect()
}

/// Stable sort by score; equal scores keep their input order in either direction.
pub fn sort_by_score(mut records: Vec<&RiskRecord>, order: SortOrder) -> Vec<&RiskRecord> {
  match order {
    SortOrder::Ascending => records.sort_by(|a, b| a.score().cmp(&b.score())),
    SortOrder::Descending => records.sort_by(|a, b| b.score().cmp(&a.score())),
  }
  records
}
