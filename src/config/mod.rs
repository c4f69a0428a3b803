//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the database connection string.
pub const MONGODB_URI_ENV: &str = "MONGODB_URI";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Document database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string; `MONGODB_URI` overrides it
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Database name. When unset, the URI's default database is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Collection served by the stats endpoint
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_collection() -> String {
    "final_table".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            name: None,
            collection: default_collection(),
        }
    }
}

/// Static slate location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlateConfig {
    /// Directory served as static files
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Slate CSV inside `public_dir`
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("./public")
}

fn default_file_name() -> String {
    "nba_slate.csv".to_string()
}

impl Default for SlateConfig {
    fn default() -> Self {
        Self {
            public_dir: default_public_dir(),
            file_name: default_file_name(),
        }
    }
}

impl SlateConfig {
    pub fn slate_path(&self) -> PathBuf {
        self.public_dir.join(&self.file_name)
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub slate: SlateConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            slate: SlateConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration: optional TOML file, then `SLATE__SECTION__KEY`
    /// environment variables, then `MONGODB_URI`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_uri(path, std::env::var(MONGODB_URI_ENV).ok())
    }

    /// As [`AppConfig::load`], with the connection string override passed in.
    pub fn load_with_uri(path: &Path, uri: Option<String>) -> Result<Self, ConfigError> {
        let config: AppConfig = ::config::Config::builder()
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix("SLATE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("database.uri", uri)?
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if !(self.database.uri.starts_with("mongodb://")
            || self.database.uri.starts_with("mongodb+srv://"))
        {
            return Err(ConfigError::ValidationError(format!(
                "Database URI must use the mongodb:// or mongodb+srv:// scheme, got {:?}",
                self.database.uri
            )));
        }

        if self.database.collection.is_empty() {
            return Err(ConfigError::ValidationError(
                "Database collection must not be empty".to_string(),
            ));
        }

        if self.slate.file_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "Slate file name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
