//! Risk Register Engine — deterministic likelihood x impact classification.
//!
//! Classifies qualitative risk observations into score / level / mitigation hint,
//! keeps them in an append-only register, and derives the filtered + sorted view,
//! summary stats, the 5x5 heatmap and a flat CSV export on demand.
//!
//! No DB, no network; pure computation over in-memory records.

pub mod aggregate;
pub mod classify;
pub mod engine;
pub mod error;
pub mod export;
pub mod intake;
pub mod register;
pub mod types;

pub use aggregate::Heatmap;
pub use engine::{run, Command, Response};
pub use error::EngineError;
pub use register::Register;
pub use types::{Column, Level, LevelFilter, Rating, RiskInput, RiskRecord, SortOrder, Stats};
