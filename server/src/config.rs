//! Runtime configuration read from the environment.
//!
//! `main` loads a `.env` file (if any) before calling [`AppConfig::from_env`],
//! so every variable below may also be set there.
//!
//! | Variable       | Default                  |
//! |----------------|--------------------------|
//! | `DATABASE_URL` | `sqlite:finance.db`      |
//! | `HOST`         | `127.0.0.1`              |
//! | `PORT`         | `3000`                   |
//! | `CORS_ORIGIN`  | `http://localhost:8080`  |

use std::net::IpAddr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not valid: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:finance.db".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origin: "http://localhost:8080".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source; unset or blank
    /// variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = var("HOST").unwrap_or(defaults.host);
        if host.parse::<IpAddr>().is_err() && host != "localhost" {
            return Err(ConfigError::Invalid { name: "HOST", value: host });
        }

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value: raw })?,
            None => defaults.port,
        };

        let cors_origin = var("CORS_ORIGIN").unwrap_or(defaults.cors_origin);
        if !cors_origin.starts_with("http://") && !cors_origin.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: "CORS_ORIGIN",
                value: cors_origin,
            });
        }

        Ok(Self {
            database_url: var("DATABASE_URL").unwrap_or(defaults.database_url),
            host,
            port,
            cors_origin,
        })
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.socket_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8081"),
            ("CORS_ORIGIN", "https://finance.example.com"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.port, 8081);
        assert_eq!(config.cors_origin, "https://finance.example.com");
        assert_eq!(config.socket_addr(), "0.0.0.0:8081");
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("PORT", "  ")])).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));

        let err = AppConfig::from_lookup(lookup(&[("HOST", "not a host")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "HOST", .. }));

        let err = AppConfig::from_lookup(lookup(&[("CORS_ORIGIN", "localhost:8080")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "CORS_ORIGIN", .. }));
    }
}
