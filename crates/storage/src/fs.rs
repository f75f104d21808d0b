//! Filesystem port
//!
//! The store never touches the disk directly; it goes through a
//! [`FileSystem`] so the backend can be swapped out (tests use
//! [`MemoryFileSystem`]).

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Binary file access by path
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Read the whole file. Missing paths fail with `io::ErrorKind::NotFound`.
    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or truncate `path` and write `bytes` to it
    async fn write_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// How [`TokioFileSystem`] replaces file contents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and write the target directly
    #[default]
    InPlace,
    /// Write a sibling temp file, then rename it over the target
    Atomic,
}

/// [`FileSystem`] backed by `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem {
    mode: WriteMode,
}

impl TokioFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: WriteMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }
}

#[async_trait]
impl FileSystem for TokioFileSystem {
    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path).await
    }

    async fn write_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        match self.mode {
            WriteMode::InPlace => fs::write(path, bytes).await,
            WriteMode::Atomic => {
                let temp_path = path.with_extension(format!("tmp.{}", uuid::Uuid::new_v4()));
                fs::write(&temp_path, bytes).await?;

                match fs::rename(&temp_path, path).await {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        // Clean up temp file
                        let _ = fs::remove_file(&temp_path).await;
                        Err(e)
                    }
                }
            }
        }
    }
}

/// In-memory [`FileSystem`]
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes at `path`, bypassing any codec
    pub fn insert(&self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.write().insert(path.into(), bytes.into());
    }

    /// Raw bytes stored at `path`
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.read().get(path.as_ref()).cloned()
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.files.read().contains_key(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.read().get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }

    async fn write_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        self.files.write().insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}
