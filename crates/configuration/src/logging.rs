use crate::error::ConfigError;
use crate::settings::LogSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// File name prefix of the daily rolling log.
pub const LOG_FILE_PREFIX: &str = "gradebook.log";

/// Sets up console logging and, when `log.directory` is set, a daily rolling log file.
///
/// `RUST_LOG` takes precedence over `log.level`. The returned guard must be held
/// until exit so buffered file output is flushed.
pub fn init_tracing(settings: &LogSettings) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = || match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => level_filter(&settings.level),
    };

    let console = fmt::layer().with_target(false).with_filter(filter()?);

    let (file, guard) = match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer).with_filter(filter()?);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();
    Ok(guard)
}

/// Parses a `log.level` directive such as `info` or `info,tower_http=debug`.
pub fn level_filter(level: &str) -> Result<EnvFilter, ConfigError> {
    EnvFilter::try_new(level)
        .map_err(|e| ConfigError::ValidationError(format!("log.level {level:?} is invalid: {e}")))
}
