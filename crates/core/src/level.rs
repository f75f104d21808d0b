//! Compression level newtype
//!
//! A [`CompressionLevel`] can only hold a value in `1..=9`. Every constructor
//! validates, so a level that made it into a store or a config is always
//! usable by the codec.

use crate::errors::{Result, StorageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compression strength, 1 (fastest) to 9 (strongest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    pub const MIN: CompressionLevel = CompressionLevel(1);
    pub const MAX: CompressionLevel = CompressionLevel(9);
    pub const DEFAULT: CompressionLevel = CompressionLevel::MAX;

    /// Validate a raw level
    pub fn new(level: i64) -> Result<Self> {
        if level < i64::from(Self::MIN.0) || level > i64::from(Self::MAX.0) {
            return Err(StorageError::configuration(
                format!(
                    "compression level {level} is out of range ({}-{})",
                    Self::MIN.0,
                    Self::MAX.0
                ),
                "Choose a compression level between 1 (fastest) and 9 (strongest)",
            ));
        }
        Ok(Self(level as u32))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for CompressionLevel {
    type Error = StorageError;

    fn try_from(level: i64) -> Result<Self> {
        Self::new(level)
    }
}

impl TryFrom<u32> for CompressionLevel {
    type Error = StorageError;

    fn try_from(level: u32) -> Result<Self> {
        Self::new(i64::from(level))
    }
}

impl From<CompressionLevel> for u32 {
    fn from(level: CompressionLevel) -> Self {
        level.0
    }
}

impl FromStr for CompressionLevel {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let level = trimmed.parse::<i64>().map_err(|_| {
            StorageError::configuration(
                format!("compression level '{trimmed}' is not an integer"),
                "Choose a compression level between 1 (fastest) and 9 (strongest)",
            )
        })?;
        Self::new(level)
    }
}
