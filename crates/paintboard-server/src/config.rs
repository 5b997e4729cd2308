//! Server configuration read from the environment.

use axum::http::HeaderValue;
use paintboard_core::DocumentConfig;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:4200";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Which origins may call the API.
#[derive(Debug, Clone, PartialEq)]
pub enum CorsOrigin {
    Any,
    Exact(HeaderValue),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub cors_origin: CorsOrigin,
    pub history_limit: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            cors_origin: CorsOrigin::Exact(HeaderValue::from_static(DEFAULT_CORS_ORIGIN)),
            history_limit: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `PAINTBOARD_*` environment variables.
    ///
    /// Unset or blank variables fall back to their defaults; anything that
    /// does not parse is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let host = match var("PAINTBOARD_HOST") {
            Some(value) => parse_value("PAINTBOARD_HOST", value)?,
            None => defaults.host,
        };
        let port = match var("PAINTBOARD_PORT") {
            Some(value) => parse_value("PAINTBOARD_PORT", value)?,
            None => defaults.port,
        };
        let cors_origin = match var("PAINTBOARD_CORS_ORIGIN") {
            Some(value) => parse_origin(value)?,
            None => defaults.cors_origin,
        };
        let history_limit = match var("PAINTBOARD_HISTORY_LIMIT") {
            Some(value) => Some(parse_value("PAINTBOARD_HISTORY_LIMIT", value)?),
            None => None,
        };

        Ok(Self {
            host,
            port,
            cors_origin,
            history_limit,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn document_config(&self) -> DocumentConfig {
        match self.history_limit {
            Some(limit) => DocumentConfig::default().with_history_limit(limit),
            None => DocumentConfig::default(),
        }
    }
}

fn parse_value<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid { var, value })
}

fn parse_origin(value: String) -> Result<CorsOrigin, ConfigError> {
    if value == "*" {
        return Ok(CorsOrigin::Any);
    }
    HeaderValue::from_str(&value)
        .map(CorsOrigin::Exact)
        .map_err(|_| ConfigError::Invalid {
            var: "PAINTBOARD_CORS_ORIGIN",
            value,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(
            config.cors_origin,
            CorsOrigin::Exact(HeaderValue::from_static("http://localhost:4200"))
        );
        assert_eq!(config.history_limit, None);
        assert_eq!(config.document_config().history_limit, None);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PAINTBOARD_HOST", "127.0.0.1"),
            ("PAINTBOARD_PORT", " 9000 "),
            ("PAINTBOARD_CORS_ORIGIN", "*"),
            ("PAINTBOARD_HISTORY_LIMIT", "50"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.cors_origin, CorsOrigin::Any);
        assert_eq!(config.document_config().history_limit, Some(50));
    }

    #[test]
    fn test_blank_uses_default() {
        let config = load(&[("PAINTBOARD_PORT", "  ")]).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            load(&[("PAINTBOARD_PORT", "http")]).unwrap_err(),
            ConfigError::Invalid {
                var: "PAINTBOARD_PORT",
                value: "http".to_string()
            }
        );
        assert!(load(&[("PAINTBOARD_HOST", "localhost:80")]).is_err());
        assert!(load(&[("PAINTBOARD_HISTORY_LIMIT", "-1")]).is_err());
        assert!(load(&[("PAINTBOARD_CORS_ORIGIN", "bad\norigin")]).is_err());
    }
}
