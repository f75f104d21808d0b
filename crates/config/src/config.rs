//! Store configuration types

use serde::{Deserialize, Serialize};
use stardata_core::{CompressionLevel, Result, StorageError};
use std::path::{Path, PathBuf};

/// Effective settings for a JSON store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Level used for writes (1-9, default 9)
    pub compression_level: CompressionLevel,
    /// Write through a temp file and rename instead of truncating in place
    pub atomic_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            compression_level: CompressionLevel::DEFAULT,
            atomic_writes: false,
        }
    }
}

impl StoreConfig {
    /// Apply the values an override layer actually sets
    ///
    /// Nothing changes when the layer's level is out of range.
    pub fn merge(&mut self, overrides: &StoreOverrides) -> Result<()> {
        if let Some(level) = overrides.compression_level {
            self.compression_level = CompressionLevel::new(level)?;
        }
        if let Some(atomic) = overrides.atomic_writes {
            self.atomic_writes = atomic;
        }
        Ok(())
    }
}

/// One configuration layer; unset fields leave lower layers in place
///
/// The level is kept raw so range errors surface as configuration errors
/// when the layer is merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreOverrides {
    pub compression_level: Option<i64>,
    pub atomic_writes: Option<bool>,
}

impl StoreOverrides {
    pub fn is_empty(&self) -> bool {
        self.compression_level.is_none() && self.atomic_writes.is_none()
    }
}

/// On-disk shape of the config file: `{"store": {...}}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ConfigFile {
    pub store: StoreSection,
}

/// `store` section as written in the file
///
/// The level is accepted as any JSON value so that `4.5` or `"5"` are
/// reported as bad levels rather than as unreadable files.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct StoreSection {
    pub compression_level: Option<serde_json::Value>,
    pub atomic_writes: Option<bool>,
}

impl StoreSection {
    pub fn into_overrides(self, path: &Path) -> Result<StoreOverrides> {
        let compression_level = match self.compression_level {
            None | Some(serde_json::Value::Null) => None,
            Some(value) => Some(value.as_i64().ok_or_else(|| {
                StorageError::configuration(
                    format!(
                        "compression_level in {} must be an integer, got {value}",
                        path.display()
                    ),
                    "Set store.compression_level to a whole number between 1 and 9",
                )
            })?),
        };

        Ok(StoreOverrides {
            compression_level,
            atomic_writes: self.atomic_writes,
        })
    }
}

/// Source of configuration for debugging and precedence tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default configuration
    Default,
    /// Configuration file
    ConfigFile(PathBuf),
    /// Environment variable
    EnvironmentVariable(String),
    /// Command line argument
    CommandLine,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::ConfigFile(path) => write!(f, "config file {}", path.display()),
            Self::EnvironmentVariable(name) => write!(f, "environment variable {name}"),
            Self::CommandLine => f.write_str("command line"),
        }
    }
}

/// Store configuration together with the layer that set each field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfiguration {
    pub store: StoreConfig,
    pub level_source: ConfigSource,
    pub atomic_source: ConfigSource,
}

impl Default for StoreConfiguration {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            level_source: ConfigSource::Default,
            atomic_source: ConfigSource::Default,
        }
    }
}

impl StoreConfiguration {
    /// Merge a layer, crediting `source` only for the fields it sets
    pub fn apply(&mut self, overrides: &StoreOverrides, source: &ConfigSource) -> Result<()> {
        self.store.merge(overrides)?;
        if overrides.compression_level.is_some() {
            self.level_source = source.clone();
        }
        if overrides.atomic_writes.is_some() {
            self.atomic_source = source.clone();
        }
        Ok(())
    }

    pub fn set_level(&mut self, level: CompressionLevel, source: ConfigSource) {
        self.store.compression_level = level;
        self.level_source = source;
    }

    pub fn set_atomic_writes(&mut self, atomic: bool, source: ConfigSource) {
        self.store.atomic_writes = atomic;
        self.atomic_source = source;
    }
}
