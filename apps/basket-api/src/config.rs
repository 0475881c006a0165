//! # Service Configuration
//!
//! Configuration for the Basket HTTP server.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BASKET_PORT=9090                                                   │
//! │     BASKET_DEPOT_CITY=Austin                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $BASKET_CONFIG, or                                                 │
//! │     ~/.config/basket/basket.toml (Linux)                               │
//! │     ~/Library/Application Support/com.basket.basket/basket.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     0.0.0.0:8080, Dallas depot                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # basket.toml
//! [server]
//! bind_addr = "127.0.0.1"
//! port = 8080
//!
//! [database]
//! path = "/var/lib/basket/basket.db"
//! max_connections = 5
//!
//! [depot]
//! street = "1234 Deerfield St"
//! city = "Dallas"
//! country = "USA"
//! ```

use basket_core::validation::validate_address;
use basket_core::Address;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Sections
// =============================================================================

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. Defaults to `basket.db` in the platform data directory.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> PathBuf {
    directories::ProjectDirs::from("com", "basket", "basket")
        .map(|dirs| dirs.data_dir().join("basket.db"))
        .unwrap_or_else(|| PathBuf::from("basket.db"))
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// `[depot]` section: the address every shipment leaves from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepotSettings {
    pub street: String,
    pub city: String,
    pub country: String,
}

impl Default for DepotSettings {
    fn default() -> Self {
        DepotSettings {
            street: "1234 Deerfield St".to_string(),
            city: "Dallas".to_string(),
            country: "USA".to_string(),
        }
    }
}

impl DepotSettings {
    pub fn address(&self) -> Address {
        Address::new(&self.street, &self.city, &self.country)
    }
}

// =============================================================================
// Service Configuration
// =============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub depot: DepotSettings,
}

impl ServiceConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else `$BASKET_CONFIG`, else the
    ///    platform config dir). A missing file is not an error.
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path
            .or_else(|| std::env::var_os("BASKET_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Io { path, source })?;
                Self::from_toml(&contents)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document. Missing sections and keys take defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `BASKET_*` overrides read through `lookup`.
    ///
    /// `load` passes the process environment; tests pass a map.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("BASKET_BIND_ADDR") {
            self.server.bind_addr = addr;
        }

        if let Some(port) = lookup("BASKET_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BASKET_PORT".to_string()))?;
            debug!(port = self.server.port, "Overriding port from environment");
        }

        if let Some(path) = lookup("BASKET_DB_PATH") {
            self.database.path = PathBuf::from(path);
        }

        if let Some(max) = lookup("BASKET_DB_MAX_CONNECTIONS") {
            self.database.max_connections = max
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BASKET_DB_MAX_CONNECTIONS".to_string()))?;
        }

        if let Some(street) = lookup("BASKET_DEPOT_STREET") {
            self.depot.street = street;
        }

        if let Some(city) = lookup("BASKET_DEPOT_CITY") {
            self.depot.city = city;
        }

        if let Some(country) = lookup("BASKET_DEPOT_COUNTRY") {
            self.depot.country = country;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("port must be greater than 0".into()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "max_connections must be greater than 0".into(),
            ));
        }

        validate_address(&self.depot.address())
            .map_err(|e| ConfigError::Invalid(format!("depot address: {}", e)))?;

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "basket", "basket")
            .map(|dirs| dirs.config_dir().join("basket.toml"))
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
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(
            config.depot.address(),
            Address::new("1234 Deerfield St", "Dallas", "USA")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServiceConfig::from_toml(
            r#"
            [server]
            port = 9000

            [depot]
            street = "1 Congress Ave"
            city = "Austin"
            country = "USA"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind_addr, "0.0.0.0");
        assert_eq!(config.depot.city, "Austin");
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_malformed_toml() {
        let err = ServiceConfig::from_toml("[server\nport = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServiceConfig::default();
        config
            .apply_overrides(lookup(&[
                ("BASKET_BIND_ADDR", "127.0.0.1"),
                ("BASKET_PORT", "3000"),
                ("BASKET_DB_PATH", "/tmp/basket-test.db"),
                ("BASKET_DB_MAX_CONNECTIONS", "2"),
                ("BASKET_DEPOT_CITY", "Houston"),
            ]))
            .unwrap();

        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.database.path, PathBuf::from("/tmp/basket-test.db"));
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.depot.city, "Houston");
        assert_eq!(config.depot.street, "1234 Deerfield St");
    }

    #[test]
    fn test_unparsable_override_is_rejected() {
        let mut config = ServiceConfig::default();
        let err = config
            .apply_overrides(lookup(&[("BASKET_PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "BASKET_PORT"));
    }

    #[test]
    fn test_validation() {
        let mut config = ServiceConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.depot.country = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let path = std::env::temp_dir().join(format!("basket-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[database]\nmax_connections = 3\n").unwrap();

        let config = ServiceConfig::load(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.unwrap().database.max_connections, 3);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("basket-config-does-not-exist.toml");
        let config = ServiceConfig::load(Some(path)).unwrap();
        assert_eq!(config.depot, DepotSettings::default());
    }
}
