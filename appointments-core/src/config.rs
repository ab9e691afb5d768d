//! Client configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{AppointmentError, AppointmentResult};
use crate::view::PAGE_SIZE_OPTIONS;

static DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_PAGE_SIZE: usize = PAGE_SIZE_OPTIONS[0];

/// Prefix for environment overrides, e.g. `APPOINTMENTS_BASE_URL`.
const ENV_PREFIX: &str = "APPOINTMENTS";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Configuration at ~/.config/appointments/config.toml
///
/// Values from the file are overridden by `APPOINTMENTS_*` environment variables.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppointmentsConfig {
    /// Server root; the resource lives at `{base_url}/appointments`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Rows per page in the list until changed.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for AppointmentsConfig {
    fn default() -> Self {
        AppointmentsConfig {
            base_url: default_base_url(),
            page_size: default_page_size(),
        }
    }
}

impl AppointmentsConfig {
    pub fn config_path() -> AppointmentResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AppointmentError::Config("Could not determine config directory".into()))?
            .join("appointments");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template on first run.
    pub fn load() -> AppointmentResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) layered under the environment.
    pub fn load_from(path: &Path) -> AppointmentResult<Self> {
        let config: AppointmentsConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| AppointmentError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AppointmentError::Config(e.to_string()))?;

        config.validate()
    }

    fn validate(self) -> AppointmentResult<Self> {
        if !PAGE_SIZE_OPTIONS.contains(&self.page_size) {
            return Err(AppointmentError::Config(format!(
                "page_size must be one of {:?}, got {}",
                PAGE_SIZE_OPTIONS, self.page_size
            )));
        }

        url::Url::parse(&self.base_url).map_err(|e| {
            AppointmentError::Config(format!("Invalid base_url '{}': {}", self.base_url, e))
        })?;

        Ok(self)
    }

    /// Save to the default location.
    pub fn save(&self) -> AppointmentResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> AppointmentResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| AppointmentError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppointmentError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| AppointmentError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AppointmentResult<()> {
        let contents = format!(
            "\
# appointments configuration

# Server hosting the /appointments resource:
# base_url = \"{}\"

# Rows per page in the list (one of 5, 10, 25, 100):
# page_size = {}
",
            DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppointmentError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AppointmentError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
