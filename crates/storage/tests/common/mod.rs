//! Shared fakes for the storage integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use stardata_codec::{Codec, CodecError, CompressionLevel, LzmaCodec};
use stardata_storage::FileSystem;
use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Filesystem whose every call fails
pub struct FailingFileSystem {
    pub kind: io::ErrorKind,
}

impl FailingFileSystem {
    pub fn new(kind: io::ErrorKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl FileSystem for FailingFileSystem {
    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        Err(io::Error::new(
            self.kind,
            format!("read refused: {}", path.display()),
        ))
    }

    async fn write_file(&self, path: &Path, _bytes: &[u8]) -> io::Result<()> {
        Err(io::Error::new(
            self.kind,
            format!("write refused: {}", path.display()),
        ))
    }
}

/// LZMA codec that remembers the level of every compress call
#[derive(Default)]
pub struct RecordingCodec {
    inner: LzmaCodec,
    levels: Mutex<Vec<CompressionLevel>>,
}

impl RecordingCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn levels(&self) -> Vec<CompressionLevel> {
        self.levels.lock().clone()
    }

    pub fn last_level(&self) -> Option<CompressionLevel> {
        self.levels.lock().last().copied()
    }
}

impl Codec for RecordingCodec {
    fn name(&self) -> &'static str {
        "recording-lzma"
    }

    fn compress(&self, text: &str, level: CompressionLevel) -> Result<Vec<u8>, CodecError> {
        self.levels.lock().push(level);
        self.inner.compress(text, level)
    }

    fn decompress(&self, bytes: &[u8]) -> Result<String, CodecError> {
        self.inner.decompress(bytes)
    }
}

/// Error-level log messages captured on the current thread
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<String>>>);

impl CapturedLogs {
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

struct CaptureLayer(CapturedLogs);

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::ERROR {
            return;
        }
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        (self.0).0.lock().push(visitor.0);
    }
}

/// Install a capturing subscriber for the current thread
///
/// Keep the guard alive for as long as events should be captured.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::registry().with(CaptureLayer(logs.clone()));
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
