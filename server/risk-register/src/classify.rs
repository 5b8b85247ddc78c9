//! Likelihood x impact classification.

use crate::types::{Classification, Level, Rating};

/// Band a 1..=25 score. Upper bounds are inclusive; first match wins.
pub fn level_for_score(score: u8) -> Level {
  if score <= 5 {
    Level::Low
  } else if score <= 12 {
    Level::Medium
  } else if score <= 18 {
    Level::High
  } else {
    Level::Critical
  }
}

/// Score, level and mitigation hint for one (likelihood, impact) pair.
pub fn classify(likelihood: Rating, impact: Rating) -> Classification {
  let score = likelihood.get() * impact.get();
  let level = level_for_score(score);
  Classification {
    score,
    level,
    hint: level.hint(),
  }
}
