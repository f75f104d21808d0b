//! JSON store facade
//!
//! Write pipeline: value → JSON text → compressed bytes → file.
//! Read pipeline: file → bytes → decompressed text → value.
//!
//! The file holds the raw codec output with no header of its own, so the
//! compression level is not recorded and reads work for any level.
//!
//! [`JsonStore::read`] and [`JsonStore::write`] return every runtime failure
//! as a [`StorageError`]. The `*_or_log` / `*_or_else` variants absorb the
//! failure instead: they log it, hand it to an optional callback, and (for
//! reads) return `None`.

use crate::fs::{FileSystem, TokioFileSystem, WriteMode};
use serde::{de::DeserializeOwned, Serialize};
use stardata_codec::{Codec, LzmaCodec};
use stardata_config::StoreConfig;
use stardata_core::{
    CompressionLevel, Result, SerializationOp, StorageError, READ_FAILURE_PREFIX,
    WRITE_FAILURE_PREFIX,
};
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Reads and writes compressed JSON files
pub struct JsonStore {
    fs: Arc<dyn FileSystem>,
    codec: Arc<dyn Codec>,
    /// Always holds a validated `CompressionLevel`
    level: AtomicU32,
}

impl JsonStore {
    /// Store over `fs` with the LZMA codec at the default level (9)
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::with_codec(fs, Arc::new(LzmaCodec::new()))
    }

    /// Store over `fs` with a custom codec at the default level (9)
    pub fn with_codec(fs: Arc<dyn FileSystem>, codec: Arc<dyn Codec>) -> Self {
        Self {
            fs,
            codec,
            level: AtomicU32::new(CompressionLevel::DEFAULT.get()),
        }
    }

    /// Store on the local disk configured from `config`
    pub fn from_config(config: &StoreConfig) -> Self {
        let mode = if config.atomic_writes {
            WriteMode::Atomic
        } else {
            WriteMode::InPlace
        };
        Self::builder()
            .filesystem(Arc::new(TokioFileSystem::with_mode(mode)))
            .compression_level(config.compression_level)
            .build()
    }

    pub fn builder() -> JsonStoreBuilder {
        JsonStoreBuilder::default()
    }

    /// Level used by the next write
    pub fn compression_level(&self) -> CompressionLevel {
        CompressionLevel::try_from(self.level.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Change the compression level
    ///
    /// Values outside `1..=9` fail with [`StorageError::Configuration`] and
    /// leave the current level untouched.
    pub fn set_compression_level(&self, level: i64) -> Result<()> {
        let level = CompressionLevel::new(level)?;
        self.set_level(level);
        Ok(())
    }

    pub fn set_level(&self, level: CompressionLevel) {
        self.level.store(level.get(), Ordering::Release);
    }

    pub fn codec_name(&self) -> &'static str {
        self.codec.name()
    }

    /// Serialize, compress and write `data` to `path`, replacing any
    /// existing content
    pub async fn write<T>(&self, path: impl AsRef<Path>, data: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let path = path.as_ref();

        let text = serde_json::to_string(data)
            .map_err(|e| StorageError::format(path, SerializationOp::Encode, e))?;

        // The level is read once, right before compressing.
        let level = self.compression_level();
        let compressed = self
            .codec
            .compress(&text, level)
            .map_err(|e| StorageError::codec(path, "compress", e))?;

        tracing::debug!(
            "Write - path: {:?}, codec: {}, level: {}, json_len: {}, compressed_len: {}",
            path,
            self.codec.name(),
            level,
            text.len(),
            compressed.len()
        );

        self.fs
            .write_file(path, &compressed)
            .await
            .map_err(|e| StorageError::io(path, "write file", e))
    }

    /// Read, decompress and parse the file at `path`
    pub async fn read<T>(&self, path: impl AsRef<Path>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let path = path.as_ref();

        let bytes = self
            .fs
            .read_file(path)
            .await
            .map_err(|e| StorageError::io(path, "read file", e))?;

        let text = self
            .codec
            .decompress(&bytes)
            .map_err(|e| StorageError::codec(path, "decompress", e))?;

        tracing::debug!(
            "Read - path: {:?}, compressed_len: {}, json_len: {}",
            path,
            bytes.len(),
            text.len()
        );

        serde_json::from_str(&text)
            .map_err(|e| StorageError::format(path, SerializationOp::Decode, e))
    }

    /// [`JsonStore::read`] into an untyped JSON value
    pub async fn read_value(&self, path: impl AsRef<Path>) -> Result<serde_json::Value> {
        self.read(path).await
    }

    /// Write without surfacing failures; they are only logged
    pub async fn write_or_log<T>(&self, path: impl AsRef<Path>, data: &T)
    where
        T: Serialize + ?Sized,
    {
        self.write_or_else(path, data, |_| {}).await;
    }

    /// Write; on failure log it and pass the error to `on_error`
    ///
    /// A panic inside `on_error` is not caught.
    pub async fn write_or_else<T, F>(&self, path: impl AsRef<Path>, data: &T, on_error: F)
    where
        T: Serialize + ?Sized,
        F: FnOnce(StorageError),
    {
        let path = path.as_ref();
        if let Err(err) = self.write(path, data).await {
            report_failure(WRITE_FAILURE_PREFIX, path, &err);
            on_error(err);
        }
    }

    /// Read, returning `None` on failure; failures are only logged
    ///
    /// A file that stores JSON `null` read as `serde_json::Value` gives
    /// `Some(Value::Null)`, never `None`.
    pub async fn read_or_log<T>(&self, path: impl AsRef<Path>) -> Option<T>
    where
        T: DeserializeOwned,
    {
        self.read_or_else(path, |_| {}).await
    }

    /// Read; on failure log it, pass the error to `on_error` and return `None`
    ///
    /// A panic inside `on_error` is not caught.
    pub async fn read_or_else<T, F>(&self, path: impl AsRef<Path>, on_error: F) -> Option<T>
    where
        T: DeserializeOwned,
        F: FnOnce(StorageError),
    {
        let path = path.as_ref();
        match self.read(path).await {
            Ok(value) => Some(value),
            Err(err) => {
                report_failure(READ_FAILURE_PREFIX, path, &err);
                on_error(err);
                None
            }
        }
    }
}

impl fmt::Debug for JsonStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonStore")
            .field("codec", &self.codec.name())
            .field("level", &self.compression_level())
            .finish_non_exhaustive()
    }
}

/// Two lines per failure: what was being done to which path, then the error.
fn report_failure(prefix: &str, path: &Path, err: &StorageError) {
    tracing::error!("{}: {}", prefix, path.display());
    tracing::error!(kind = %err.kind(), "{}", err);
}

/// Explicit wiring for a [`JsonStore`]
#[derive(Default)]
pub struct JsonStoreBuilder {
    fs: Option<Arc<dyn FileSystem>>,
    codec: Option<Arc<dyn Codec>>,
    level: CompressionLevel,
}

impl JsonStoreBuilder {
    /// Defaults to [`TokioFileSystem`] writing in place
    pub fn filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = Some(fs);
        self
    }

    /// Defaults to [`LzmaCodec`]
    pub fn codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = Some(codec);
        self
    }

    pub fn compression_level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    pub fn build(self) -> JsonStore {
        let fs = self.fs.unwrap_or_else(|| Arc::new(TokioFileSystem::new()));
        let codec = self.codec.unwrap_or_else(|| Arc::new(LzmaCodec::new()));
        let store = JsonStore::with_codec(fs, codec);
        store.set_level(self.level);
        store
    }
}
