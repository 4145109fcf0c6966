//! Server configuration from environment variables.

use std::net::{Ipv4Addr, SocketAddr};
use std::num::NonZeroUsize;

pub const DEFAULT_PORT: u16 = 4001;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}: expected an integer in 0..=65535")]
    InvalidPort(String),
    #[error("invalid HOOK_MAX_RECORDS {0:?}: expected a positive integer")]
    InvalidMaxRecords(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Retention bound for the capture store; `None` keeps every record.
    pub max_records: Option<NonZeroUsize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_records: None,
        }
    }
}

impl ServerConfig {
    /// Reads `PORT` and `HOOK_MAX_RECORDS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let max_records = match lookup("HOOK_MAX_RECORDS") {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(
                raw.trim()
                    .parse::<NonZeroUsize>()
                    .map_err(|_| ConfigError::InvalidMaxRecords(raw))?,
            ),
            None => None,
        };
        Ok(Self { port, max_records })
    }

    /// Listen on every interface.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, ServerConfig::default());
        assert_eq!(cfg.listen_addr().port(), 4001);
    }

    #[test]
    fn reads_port_and_retention() {
        let cfg =
            ServerConfig::from_lookup(lookup(&[("PORT", "8080"), ("HOOK_MAX_RECORDS", "500")]))
                .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.max_records, NonZeroUsize::new(500));
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[("PORT", "http")])),
            Err(ConfigError::InvalidPort("http".to_string()))
        );
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[("HOOK_MAX_RECORDS", "0")])),
            Err(ConfigError::InvalidMaxRecords("0".to_string()))
        );
    }
}
