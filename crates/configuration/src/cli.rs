use crate::error::ConfigError;
use crate::settings::Config;
use clap::Args;
use std::path::PathBuf;

/// Command-line flags shared by every binary that needs a [`Config`].
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: PathBuf,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<Config, ConfigError> {
        crate::load_config(&self.config)
    }
}
