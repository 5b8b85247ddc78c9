//! Binary entrypoint for the register API.

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use register_api::{router, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = Config::from_env()?;
  let app = router(Arc::new(AppState::new()));

  let addr = config.socket_addr();
  let listener = tokio::net::TcpListener::bind(addr).await?;
  tracing::info!(%addr, "register-api listening");
  axum::serve(listener, app).await?;

  Ok(())
}
