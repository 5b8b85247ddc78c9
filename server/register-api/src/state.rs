//! Shared in-memory store.

use risk_register::types::Submission;
use risk_register::{Register, RiskRecord};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct AppState {
  store: RwLock<Store>,
}

#[derive(Debug, Default)]
struct Store {
  register: Register,
  last_id: u64,
}

impl AppState {
  pub fn new() -> Self {
    Self::default()
  }

  /// Assign the next id, classify, append. One write lock covers all three.
  pub async fn insert(&self, submission: Submission) -> RiskRecord {
    let mut store = self.store.write().await;
    store.last_id += 1;
    let record = RiskRecord::new(store.last_id, submission);
    store.register.append(record.clone());
    record
  }

  /// Point-in-time copy of the register for computing derived views.
  pub async fn snapshot(&self) -> Register {
    self.store.read().await.register.clone()
  }
}
