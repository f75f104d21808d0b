//! Configuration loader with precedence handling

use crate::config::{ConfigFile, ConfigSource, StoreConfiguration, StoreOverrides};
use stardata_core::{
    CompressionLevel, Result, SerializationOp, StorageError, CONFIG_DIR_NAME, CONFIG_FILE_NAME,
    STARDATA_ATOMIC_WRITES_VAR, STARDATA_COMPRESSION_LEVEL_VAR,
};
use std::path::{Path, PathBuf};

/// Loads [`StoreConfiguration`] from defaults, file, environment and CLI
pub struct StoreConfigLoader;

impl StoreConfigLoader {
    /// Load configuration using the default config file location
    pub fn load() -> Result<StoreConfiguration> {
        Self::load_with(None)
    }

    /// Load configuration, reading `config_file` instead of the default
    /// location when given. An explicit file must exist; the default one is
    /// optional.
    pub fn load_with(config_file: Option<&Path>) -> Result<StoreConfiguration> {
        let mut config = StoreConfiguration::default();

        let file_path = match config_file {
            Some(path) => Some(path.to_path_buf()),
            None => Some(Self::config_file_path()?).filter(|path| path.exists()),
        };

        if let Some(path) = file_path {
            let overrides = Self::read_config_file(&path)?;
            tracing::debug!("Applying config file {:?}: {:?}", path, overrides);
            config.apply(&overrides, &ConfigSource::ConfigFile(path))?;
        }

        Self::apply_env(&mut config)?;

        Ok(config)
    }

    /// Defaults overlaid with a single config file
    pub fn load_from_path(path: &Path) -> Result<StoreConfiguration> {
        let overrides = Self::read_config_file(path)?;
        let mut config = StoreConfiguration::default();
        config.apply(&overrides, &ConfigSource::ConfigFile(path.to_path_buf()))?;
        Ok(config)
    }

    /// Apply command line arguments (highest precedence)
    pub fn apply_cli_args(
        mut config: StoreConfiguration,
        compression_level: Option<CompressionLevel>,
        atomic_writes: Option<bool>,
    ) -> StoreConfiguration {
        if let Some(level) = compression_level {
            config.set_level(level, ConfigSource::CommandLine);
        }
        if let Some(atomic) = atomic_writes {
            config.set_atomic_writes(atomic, ConfigSource::CommandLine);
        }
        config
    }

    /// Get the configuration file path
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config_home)
        } else {
            dirs::config_dir().ok_or_else(|| {
                StorageError::configuration(
                    "Could not determine config directory",
                    "Set XDG_CONFIG_HOME or HOME environment variable",
                )
            })?
        };

        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    fn read_config_file(path: &Path) -> Result<StoreOverrides> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StorageError::io(path, "read config file", e))?;

        let file: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| StorageError::format(path, SerializationOp::Decode, e))?;

        file.store.into_overrides(path)
    }

    /// Apply `STARDATA_*` environment variables
    fn apply_env(config: &mut StoreConfiguration) -> Result<()> {
        if let Ok(level_str) = std::env::var(STARDATA_COMPRESSION_LEVEL_VAR) {
            let level = level_str.parse::<CompressionLevel>()?;
            tracing::debug!("Applying {}={}", STARDATA_COMPRESSION_LEVEL_VAR, level);
            config.set_level(
                level,
                ConfigSource::EnvironmentVariable(STARDATA_COMPRESSION_LEVEL_VAR.to_string()),
            );
        }

        if let Ok(atomic_str) = std::env::var(STARDATA_ATOMIC_WRITES_VAR) {
            let atomic = parse_bool(STARDATA_ATOMIC_WRITES_VAR, &atomic_str)?;
            tracing::debug!("Applying {}={}", STARDATA_ATOMIC_WRITES_VAR, atomic);
            config.set_atomic_writes(
                atomic,
                ConfigSource::EnvironmentVariable(STARDATA_ATOMIC_WRITES_VAR.to_string()),
            );
        }

        Ok(())
    }
}

fn parse_bool(variable: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(StorageError::configuration(
            format!("{variable} must be a boolean, got '{other}'"),
            format!("Set {variable} to true or false"),
        )),
    }
}
