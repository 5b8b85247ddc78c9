//! Binary entrypoint: read one JSON command from stdin, write one JSON object to stdout.
//!
//! Rejected commands produce an ErrorOutput object. Logs go to stderr.

use risk_register::types::ErrorOutput;
use risk_register::{run, Command};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(io::stderr)
    .init();

  if let Err(e) = run_binary() {
    tracing::error!(error = %e, "risk-register failed");
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;

  let json = match serde_json::from_str::<Command>(raw.trim()) {
    Ok(command) => match run(&command) {
      Ok(out) => serde_json::to_vec(&out)?,
      Err(e) => {
        tracing::info!(error = %e, "command rejected");
        serde_json::to_vec(&ErrorOutput::from(&e))?
      }
    },
    Err(e) => serde_json::to_vec(&ErrorOutput::new(format!("json parse: {}", e)))?,
  };

  let mut out = io::stdout().lock();
  out.write_all(&json)?;
  out.flush()?;
  Ok(())
}
