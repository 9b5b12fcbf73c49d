use config::Config;
use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::instrument;

use super::{
    program_config::ProgramConfig, retry_config::RetryConfig, sheets_config::SheetsConfig,
};

const DEFAULT_CONFIG_PATH: &str = "Config";
const ENV_PREFIX: &str = "PROGRAM_COPIER";

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("Error reading config file '{0}'")]
    Unreadable(String),
    #[error("Failed to deserialize config file '{0}'")]
    InvalidField(String),
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub sheets: SheetsConfig,
    pub program: ProgramConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl AppConfig {
    /// Loads the file named by `CONFIG_PATH` (default `Config`, any extension the `config`
    /// crate understands), with `PROGRAM_COPIER__SECTION__KEY` environment overrides.
    pub fn load() -> error_stack::Result<Self, AppConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&config_path)
    }

    #[instrument]
    pub fn load_from(config_path: &str) -> error_stack::Result<Self, AppConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(config_path))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .change_context_lazy(|| AppConfigError::Unreadable(config_path.to_string()))?;

        // Deserialized straight from `Config` so "201" and 201 both reach string and number fields.
        serde_path_to_error::deserialize::<_, AppConfig>(config).map_err(|e| {
            let path = e.path().to_string();
            report!(AppConfigError::InvalidField(config_path.to_string())).attach_printable(
                format!(
                    "Field path: {}: {}. Make sure all required fields are present in the configuration file.",
                    path,
                    e.inner()
                ),
            )
        })
    }
}
