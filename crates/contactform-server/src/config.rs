//! Server configuration loaded from environment variables.
//!
//! All settings have defaults so the server can start with zero
//! configuration for local development.

use std::net::{IpAddr, SocketAddr};

use contactform_shared::constants::DEFAULT_HTTP_PORT;

use crate::store::StoreInitPolicy;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) server.
    /// Env: `HOST` and `PORT`
    /// Default: `0.0.0.0:3000`
    pub http_addr: SocketAddr,

    /// Store connection string (`sqlite::memory:`, `sqlite://<path>` or a path).
    /// Env: `DATABASE_URL`
    /// Default: unset, meaning the platform data directory.
    pub database_url: Option<String>,

    /// What to do when the store cannot be opened at startup.
    /// Env: `STORE_INIT_POLICY` (`degrade` / `fail-fast`)
    /// Default: `degrade`
    pub store_init_policy: StoreInitPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            database_url: None,
            store_init_policy: StoreInitPolicy::Degrade,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = var("HOST") {
            match host.parse::<IpAddr>() {
                Ok(ip) => config.http_addr.set_ip(ip),
                Err(_) => tracing::warn!(value = %host, "Invalid HOST, using default"),
            }
        }

        if let Some(port) = var("PORT") {
            match port.parse::<u16>() {
                Ok(p) => config.http_addr.set_port(p),
                Err(_) => tracing::warn!(value = %port, "Invalid PORT, using default"),
            }
        }

        if let Some(url) = var("DATABASE_URL") {
            if !url.trim().is_empty() {
                config.database_url = Some(url);
            }
        }

        if let Some(policy) = var("STORE_INIT_POLICY") {
            match policy.parse::<StoreInitPolicy>() {
                Ok(p) => config.store_init_policy = p,
                Err(e) => tracing::warn!(error = %e, "Invalid STORE_INIT_POLICY, using default"),
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter.

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.http_addr, ([0, 0, 0, 0], 3000).into());
        assert!(config.database_url.is_none());
        assert_eq!(config.store_init_policy, StoreInitPolicy::Degrade);
    }

    #[test]
    fn test_env_overrides() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8081"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("STORE_INIT_POLICY", "fail-fast"),
        ]);
        assert_eq!(config.http_addr, ([127, 0, 0, 1], 8081).into());
        assert_eq!(config.database_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(config.store_init_policy, StoreInitPolicy::FailFast);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = load(&[
            ("PORT", "not-a-port"),
            ("DATABASE_URL", "  "),
            ("STORE_INIT_POLICY", "sometimes"),
        ]);
        assert_eq!(config.http_addr.port(), 3000);
        assert!(config.database_url.is_none());
        assert_eq!(config.store_init_policy, StoreInitPolicy::Degrade);
    }
}
