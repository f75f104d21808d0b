use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Result type alias for stardata operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Boxed error used as the source of codec failures
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Error type for every stardata operation
///
/// `Configuration` is a contract violation surfaced at call time. The other
/// three variants are runtime failures of a read or write and carry the path
/// they were raised for.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Invalid configuration value (e.g. a compression level outside 1..=9)
    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        recovery_hint: RecoveryHint,
    },

    /// Filesystem read or write failure
    #[error("I/O error during {operation} on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: io::Error,
        recovery_hint: RecoveryHint,
    },

    /// Compression or decompression failure
    #[error("failed to {operation} '{}': {source}", .path.display())]
    Codec {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: BoxedSource,
        recovery_hint: RecoveryHint,
    },

    /// JSON encode/decode failure
    #[error("failed to {operation} JSON for '{}': {source}", .path.display())]
    Format {
        path: PathBuf,
        operation: SerializationOp,
        #[source]
        source: serde_json::Error,
        recovery_hint: RecoveryHint,
    },
}

/// Coarse classification of a [`StorageError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Io,
    Codec,
    Format,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration",
            Self::Io => "io",
            Self::Codec => "codec",
            Self::Format => "format",
        };
        f.write_str(name)
    }
}

/// Recovery hints for error handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryHint {
    /// The stored file is unusable; write it again
    ClearAndRetry,

    /// Check file permissions
    CheckPermissions { path: PathBuf },

    /// Check that the path exists and points at a file
    CheckPath { path: PathBuf },

    /// No automated recovery possible
    Manual { instructions: String },

    /// No recovery possible
    NoRecovery,
}

/// Serialization operation types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializationOp {
    Encode,
    Decode,
}

impl fmt::Display for SerializationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => f.write_str("encode"),
            Self::Decode => f.write_str("decode"),
        }
    }
}

impl StorageError {
    /// Create a configuration error with manual recovery instructions
    #[must_use]
    pub fn configuration(message: impl Into<String>, instructions: impl Into<String>) -> Self {
        StorageError::Configuration {
            message: message.into(),
            recovery_hint: RecoveryHint::Manual {
                instructions: instructions.into(),
            },
        }
    }

    /// Create an I/O error, deriving the recovery hint from the error kind
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, operation: &'static str, source: io::Error) -> Self {
        let path = path.into();
        let recovery_hint = match source.kind() {
            io::ErrorKind::NotFound => RecoveryHint::CheckPath { path: path.clone() },
            io::ErrorKind::PermissionDenied => RecoveryHint::CheckPermissions {
                path: path.clone(),
            },
            _ => RecoveryHint::NoRecovery,
        };
        StorageError::Io {
            path,
            operation,
            source,
            recovery_hint,
        }
    }

    /// Create a codec error
    ///
    /// Decompression failures mean the stored bytes are damaged, so they are
    /// hinted as `ClearAndRetry`.
    #[must_use]
    pub fn codec(
        path: impl Into<PathBuf>,
        operation: &'static str,
        source: impl Into<BoxedSource>,
    ) -> Self {
        let recovery_hint = if operation == "decompress" {
            RecoveryHint::ClearAndRetry
        } else {
            RecoveryHint::NoRecovery
        };
        StorageError::Codec {
            path: path.into(),
            operation,
            source: source.into(),
            recovery_hint,
        }
    }

    /// Create a JSON format error
    #[must_use]
    pub fn format(
        path: impl Into<PathBuf>,
        operation: SerializationOp,
        source: serde_json::Error,
    ) -> Self {
        let recovery_hint = match operation {
            SerializationOp::Decode => RecoveryHint::ClearAndRetry,
            SerializationOp::Encode => RecoveryHint::Manual {
                instructions: "Make sure the value serializes to JSON (map keys must be strings)"
                    .to_string(),
            },
        };
        StorageError::Format {
            path: path.into(),
            operation,
            source,
            recovery_hint,
        }
    }

    /// The taxonomy entry this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Io { .. } => ErrorKind::Io,
            Self::Codec { .. } => ErrorKind::Codec,
            Self::Format { .. } => ErrorKind::Format,
        }
    }

    /// Path the failing operation targeted, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Configuration { .. } => None,
            Self::Io { path, .. } | Self::Codec { path, .. } | Self::Format { path, .. } => {
                Some(path)
            }
        }
    }

    pub fn recovery_hint(&self) -> &RecoveryHint {
        match self {
            Self::Configuration { recovery_hint, .. }
            | Self::Io { recovery_hint, .. }
            | Self::Codec { recovery_hint, .. }
            | Self::Format { recovery_hint, .. } => recovery_hint,
        }
    }
}
