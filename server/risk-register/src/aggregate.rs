//! Summary statistics and the 5x5 likelihood x impact heatmap.
//!
//! Both operate on the full record set, never on a filtered view.

use serde::Serialize;

use crate::classify;
use crate::types::{Level, Rating, RiskRecord, Stats};

const GRID: usize = Rating::MAX as usize;

/// Count, high/critical count and mean score (one decimal, half-up).
pub fn stats(records: &[RiskRecord]) -> Stats {
  let total = records.len();
  let high_critical_count = records.iter().filter(|r| r.level().is_high_or_critical()).count();
  let score_sum: u64 = records.iter().map(|r| r.score() as u64).sum();

  Stats {
    total,
    high_critical_count,
    average_score: mean_tenths(score_sum, total as u64) as f64 / 10.0,
  }
}

/// Mean of `sum / count` in tenths, rounded half-up; integer math so .x5 never
/// lands on the wrong side of a float.
fn mean_tenths(sum: u64, count: u64) -> u64 {
  if count == 0 {
    return 0;
  }
  (sum * 20 + count) / (count * 2)
}

/// Bucket color for a cell; same bands as the classifier.
pub fn cell_color(likelihood: Rating, impact: Rating) -> &'static str {
  cell_level(likelihood, impact).color()
}

fn cell_level(likelihood: Rating, impact: Rating) -> Level {
  classify::level_for_score(likelihood.get() * impact.get())
}

/// Records bucketed by exact (likelihood, impact). `grid[l-1][i-1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap<'a> {
  grid: [[Vec<&'a RiskRecord>; GRID]; GRID],
}

impl<'a> Heatmap<'a> {
  pub fn cell(&self, likelihood: Rating, impact: Rating) -> &[&'a RiskRecord] {
    &self.grid[likelihood.index()][impact.index()]
  }

  pub fn count(&self, likelihood: Rating, impact: Rating) -> usize {
    self.cell(likelihood, impact).len()
  }

  /// Sum of all cell counts.
  pub fn total(&self) -> usize {
    self.grid.iter().flatten().map(Vec::len).sum()
  }

  /// Flattened cells, likelihood 5 -> 1 then impact 1 -> 5 (display order).
  pub fn cells(&self) -> Vec<HeatCell> {
    let mut out = Vec::with_capacity(GRID * GRID);
    for likelihood in Rating::all().rev() {
      for impact in Rating::all() {
        let level = cell_level(likelihood, impact);
        let bucket = self.cell(likelihood, impact);
        out.push(HeatCell {
          likelihood,
          impact,
          score: likelihood.get() * impact.get(),
          level,
          color: level.color(),
          count: bucket.len(),
          assets: bucket.iter().map(|r| r.asset().to_string()).collect(),
        });
      }
    }
    out
  }
}

/// One heatmap cell as emitted over JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatCell {
  pub likelihood: Rating,
  pub impact: Rating,
  pub score: u8,
  pub level: Level,
  pub color: &'static str,
  pub count: usize,
  pub assets: Vec<String>,
}

pub fn heatmap(records: &[RiskRecord]) -> Heatmap<'_> {
  let mut grid: [[Vec<&RiskRecord>; GRID]; GRID] =
    std::array::from_fn(|_| std::array::from_fn(|_| Vec::new()));
  for record in records {
    grid[record.likelihood().index()][record.impact().index()].push(record);
  }
  Heatmap { grid }
}
