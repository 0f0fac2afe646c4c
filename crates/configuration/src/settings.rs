use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty or missing `config.toml` is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub export: ExportSettings,
    pub log: LogSettings,
}

impl Config {
    /// Rejects values that would only fail later at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::ValidationError("database.url must be set".to_string()));
        }
        if self.export.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError("export.path must be set".to_string()));
        }
        Ok(())
    }
}

/// Where the web server listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    /// The `host:port` pair the listener binds to.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 5000 }
    }
}

/// Connection parameters for the record store.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// An sqlx SQLite URL, e.g. `sqlite://database.db` or `sqlite::memory:`.
    pub url: String,
    /// Pool size. The default of one serialises all writes through a single connection.
    pub max_connections: u32,
}

impl DatabaseSettings {
    /// A private, throwaway database. Useful for tests and dry runs.
    pub fn in_memory() -> Self {
        Self { url: "sqlite::memory:".to_string(), max_connections: 1 }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self { url: "sqlite://database.db".to_string(), max_connections: 1 }
    }
}

/// Target of the CSV results export.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub path: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self { path: PathBuf::from("results.csv") }
    }
}

/// Logging verbosity and optional rolling log files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// An `EnvFilter` directive used when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".to_string(), directory: None }
    }
}
