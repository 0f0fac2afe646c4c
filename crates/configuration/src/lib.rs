use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
#[cfg(feature = "clap")]
pub mod cli;
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
#[cfg(feature = "clap")]
pub use cli::ConfigArgs;
pub use logging::init_tracing;
pub use settings::{Config, DatabaseSettings, ExportSettings, LogSettings, ServerSettings};

/// Prefix for environment overrides, e.g. `GRADEBOOK__DATABASE__URL`.
pub const ENV_PREFIX: &str = "GRADEBOOK";

/// Loads the application configuration.
///
/// Values are layered: built-in defaults, then the TOML file at `path` (optional),
/// then `GRADEBOOK__<SECTION>__<KEY>` environment variables. The result is validated
/// before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // `load_config` reads the process environment, so tests that load must not
    // overlap with the one that sets GRADEBOOK__* variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let _env = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, "sqlite://database.db");
        assert_eq!(config.database.max_connections, 1);
        assert_eq!(config.export.path, Path::new("results.csv"));
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn file_values_override_defaults() {
        let _env = env_lock();
        let file = toml_file("[server]\nport = 8080\n\n[export]\npath = \"out/grades.csv\"\n");

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.export.path, Path::new("out/grades.csv"));
    }

    #[test]
    fn zero_connections_is_rejected() {
        let _env = env_lock();
        let file = toml_file("[database]\nmax_connections = 0\n");

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn environment_overrides_the_file() {
        let _env = env_lock();
        let file = toml_file("[server]\nport = 8080\n\n[export]\npath = \"out/grades.csv\"\n");

        // SAFETY: ENV_LOCK serialises every test in this module that touches the environment.
        unsafe {
            std::env::set_var("GRADEBOOK__SERVER__PORT", "8081");
            std::env::set_var("GRADEBOOK__EXPORT__PATH", "x.csv");
        }
        let loaded = load_config(file.path());
        unsafe {
            std::env::remove_var("GRADEBOOK__SERVER__PORT");
            std::env::remove_var("GRADEBOOK__EXPORT__PATH");
        }

        let config = loaded.unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.export.path, Path::new("x.csv"));
    }

    #[test]
    fn blank_database_url_is_rejected() {
        let _env = env_lock();
        let file = toml_file("[database]\nurl = \"\"\n");

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn empty_export_path_is_rejected() {
        let _env = env_lock();
        let file = toml_file("[export]\npath = \"\"\n");

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn server_address_joins_host_and_port() {
        let settings = ServerSettings { host: "0.0.0.0".to_string(), port: 3000 };
        assert_eq!(settings.address(), "0.0.0.0:3000");
    }
}
