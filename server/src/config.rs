//! Process configuration for `todo-server`.

use std::env;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db";
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_GRPC_ADDR: &str = "127.0.0.1:9090";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite URL of the todo database (default: "sqlite://todos.db")
    pub database_url: String,
    /// REST listen address (default: "127.0.0.1:8080")
    pub http_addr: SocketAddr,
    /// gRPC listen address (default: "127.0.0.1:9090")
    pub grpc_addr: SocketAddr,
    /// Endpoint the REST gateway dials (default: loopback on the gRPC port)
    pub rpc_endpoint: String,
    /// Browser origin allowed by CORS (default: "http://localhost:3000")
    pub cors_origin: HeaderValue,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Optional Environment Variables
    /// - `TODO_DATABASE_URL`
    /// - `TODO_HTTP_ADDR`
    /// - `TODO_GRPC_ADDR`
    /// - `TODO_RPC_ENDPOINT`
    /// - `TODO_CORS_ORIGIN`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("TODO_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let http_addr = parse_addr(&lookup, "TODO_HTTP_ADDR", DEFAULT_HTTP_ADDR)?;
        let grpc_addr = parse_addr(&lookup, "TODO_GRPC_ADDR", DEFAULT_GRPC_ADDR)?;

        let rpc_endpoint = lookup("TODO_RPC_ENDPOINT")
            .unwrap_or_else(|| format!("http://127.0.0.1:{}", grpc_addr.port()));

        let origin = lookup("TODO_CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = HeaderValue::from_str(&origin).map_err(|e| ConfigError::Invalid {
            key: "TODO_CORS_ORIGIN",
            reason: e.to_string(),
        })?;

        Ok(Self {
            database_url,
            http_addr,
            grpc_addr,
            rpc_endpoint,
            cors_origin,
        })
    }
}

fn parse_addr<F>(lookup: &F, key: &'static str, default: &str) -> Result<SocketAddr, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .parse()
        .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.http_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.grpc_addr, "127.0.0.1:9090".parse().unwrap());
        assert_eq!(config.rpc_endpoint, "http://127.0.0.1:9090");
        assert_eq!(config.cors_origin, "http://localhost:3000");
    }

    #[test]
    fn rpc_endpoint_follows_grpc_port() {
        let config = config(&[("TODO_GRPC_ADDR", "0.0.0.0:7000")]).unwrap();
        assert_eq!(config.rpc_endpoint, "http://127.0.0.1:7000");
    }

    #[test]
    fn explicit_rpc_endpoint_wins() {
        let config = config(&[
            ("TODO_GRPC_ADDR", "0.0.0.0:7000"),
            ("TODO_RPC_ENDPOINT", "http://backend:7000"),
        ])
        .unwrap();
        assert_eq!(config.rpc_endpoint, "http://backend:7000");
    }

    #[test]
    fn invalid_addr_names_the_key() {
        let err = config(&[("TODO_HTTP_ADDR", "not-an-addr")]).unwrap_err();
        assert!(err.to_string().contains("TODO_HTTP_ADDR"));
    }

    #[test]
    fn invalid_origin_is_rejected() {
        let err = config(&[("TODO_CORS_ORIGIN", "http://bad\norigin")]).unwrap_err();
        assert!(err.to_string().contains("TODO_CORS_ORIGIN"));
    }
}
