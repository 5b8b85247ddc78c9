//! Service configuration with sane defaults, overridable from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{var} must be {expected}, got {value:?}")]
  Invalid {
    var: &'static str,
    expected: &'static str,
    value: String,
  },
}

#[derive(Debug, Clone)]
pub struct Config {
  /// Interface to bind. Loopback unless told otherwise.
  pub bind_addr: IpAddr,
  pub port: u16,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
      port: 8000,
    }
  }
}

impl Config {
  /// Read `BIND_ADDR` and `PORT`; unset variables keep their defaults.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|var| std::env::var(var).ok())
  }

  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let mut config = Self::default();

    if let Some(value) = lookup("BIND_ADDR") {
      config.bind_addr = value.parse().map_err(|_| ConfigError::Invalid {
        var: "BIND_ADDR",
        expected: "an IP address",
        value: value.clone(),
      })?;
    }
    if let Some(value) = lookup("PORT") {
      config.port = value.parse().map_err(|_| ConfigError::Invalid {
        var: "PORT",
        expected: "a valid u16",
        value: value.clone(),
      })?;
    }

    Ok(config)
  }

  pub fn socket_addr(&self) -> SocketAddr {
    SocketAddr::new(self.bind_addr, self.port)
  }
}
