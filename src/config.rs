//! Layered configuration
//!
//! Values are resolved from built-in defaults, then an optional YAML file, then
//! `TICKETING_*` environment variables (e.g. `TICKETING_LOG_LEVEL=debug`).

use crate::error::Result;
use config::{Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "TICKETING";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Runtime settings for the ticketing binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Start with the demo tickets when nothing is imported
    pub seed_sample_data: bool,
    /// Default tracing filter when `--verbose` is not given
    pub log_level: String,
    /// Format used by `export` when `--format` is omitted
    pub default_export_format: String,
    /// Colorize terminal output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
            log_level: "warn".to_string(),
            default_export_format: "json".to_string(),
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the platform config directory
    /// when no path is given. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env = Environment::with_prefix(ENV_PREFIX).try_parsing(true);
        match path {
            Some(path) => Self::build(Some(path), env),
            None => Self::build(Self::default_path().as_deref(), env),
        }
    }

    /// Default location of the configuration file, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "ticketing", "ticketing")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn build(path: Option<&Path>, env: Environment) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("seed_sample_data", defaults.seed_sample_data)?
            .set_default("log_level", defaults.log_level)?
            .set_default("default_export_format", defaults.default_export_format)?
            .set_default("color", defaults.color)?;

        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Yaml)
                    .required(false),
            );
        }

        let settings = builder.add_source(env).build()?;
        Ok(settings.try_deserialize()?)
    }
}
