use serde_json::{json, Value};
use stardata_codec::{Codec, CompressionLevel, LzmaCodec};
use stardata_storage::{ErrorKind, JsonStore, MemoryFileSystem, StorageError};
use std::io;
use std::path::Path;
use std::sync::Arc;

mod common;
use common::{capture_logs, FailingFileSystem};

#[tokio::test]
async fn write_failure_is_returned_as_io_error() {
    let store = JsonStore::new(Arc::new(FailingFileSystem::new(
        io::ErrorKind::PermissionDenied,
    )));

    let err = store.write("out.bin", &json!({"x": 1})).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.path(), Some(Path::new("out.bin")));
}

#[tokio::test]
async fn write_failure_is_contained_reported_and_logged() {
    let (logs, _guard) = capture_logs();
    let store = JsonStore::new(Arc::new(FailingFileSystem::new(
        io::ErrorKind::PermissionDenied,
    )));

    let mut seen: Vec<StorageError> = Vec::new();
    store
        .write_or_else("out.bin", &json!({"x": 1}), |err| seen.push(err))
        .await;

    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].kind(), ErrorKind::Io);
    let detail = seen[0].to_string();

    let lines = logs.lines();
    assert_eq!(lines.len(), 2, "{lines:?}");
    assert_eq!(lines[0], "Problem writing: out.bin");
    assert_eq!(lines[1], detail);
    assert!(lines[1].contains("write refused"));
}

#[tokio::test]
async fn write_or_log_logs_without_callback() {
    let (logs, _guard) = capture_logs();
    let store = JsonStore::new(Arc::new(FailingFileSystem::new(io::ErrorKind::Other)));

    store.write_or_log("out.bin", &json!([1])).await;

    let lines = logs.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "Problem writing: out.bin");
}

#[tokio::test]
async fn read_failure_returns_none_and_reports_once() {
    let (logs, _guard) = capture_logs();
    let store = JsonStore::new(Arc::new(FailingFileSystem::new(io::ErrorKind::NotFound)));

    let mut calls = 0;
    let mut kind = None;
    let value: Option<Value> = store
        .read_or_else("in.bin", |err| {
            calls += 1;
            kind = Some(err.kind());
        })
        .await;

    assert!(value.is_none());
    assert_eq!(calls, 1);
    assert_eq!(kind, Some(ErrorKind::Io));

    let lines = logs.lines();
    assert_eq!(lines.len(), 2, "{lines:?}");
    assert_eq!(lines[0], "Problem loading: in.bin");
    assert!(lines[1].contains("read refused"));
}

#[tokio::test]
async fn missing_file_on_memory_fs_is_io_not_found() {
    let store = JsonStore::new(Arc::new(MemoryFileSystem::new()));

    let err = store.read_value("missing.bin").await.unwrap_err();
    match err {
        StorageError::Io { source, .. } => assert_eq!(source.kind(), io::ErrorKind::NotFound),
        other => panic!("Wrong error type: {other}"),
    }
    assert!(store.read_or_log::<Value>("missing.bin").await.is_none());
}

#[tokio::test]
async fn corrupt_bytes_are_codec_failures() {
    let (logs, _guard) = capture_logs();
    let fs = Arc::new(MemoryFileSystem::new());
    fs.insert("corrupt.bin", b"this was never compressed".to_vec());
    let store = JsonStore::new(fs);

    let err = store.read_value("corrupt.bin").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Codec);

    let mut reported = None;
    let value: Option<Value> = store
        .read_or_else("corrupt.bin", |err| reported = Some(err.kind()))
        .await;
    assert!(value.is_none());
    assert_eq!(reported, Some(ErrorKind::Codec));
    assert!(logs.lines().contains(&"Problem loading: corrupt.bin".to_string()));
}

#[tokio::test]
async fn truncated_file_is_codec_failure() {
    let fs = Arc::new(MemoryFileSystem::new());
    let store = JsonStore::new(fs.clone());
    let data: Vec<String> = (0..200).map(|i| format!("item-{i}")).collect();
    store.write("full.bin", &data).await.unwrap();

    let bytes = fs.get("full.bin").unwrap();
    fs.insert("cut.bin", bytes[..bytes.len() / 2].to_vec());

    let err = store.read_value("cut.bin").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Codec);
}

#[tokio::test]
async fn malformed_json_is_format_failure() {
    let fs = Arc::new(MemoryFileSystem::new());
    let compressed = LzmaCodec::new()
        .compress("{\"x\": 1,", CompressionLevel::DEFAULT)
        .unwrap();
    fs.insert("broken.bin", compressed);
    let store = JsonStore::new(fs);

    let err = store.read_value("broken.bin").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);

    let mut reported = None;
    let value: Option<Value> = store
        .read_or_else("broken.bin", |err| reported = Some(err.kind()))
        .await;
    assert!(value.is_none());
    assert_eq!(reported, Some(ErrorKind::Format));
}

#[tokio::test]
async fn successful_calls_do_not_invoke_callback_or_log() {
    let (logs, _guard) = capture_logs();
    let store = JsonStore::new(Arc::new(MemoryFileSystem::new()));

    let mut calls = 0;
    store
        .write_or_else("ok.bin", &json!({"ok": true}), |_| calls += 1)
        .await;
    let value: Option<Value> = store.read_or_else("ok.bin", |_| calls += 1).await;

    assert_eq!(value, Some(json!({"ok": true})));
    assert_eq!(calls, 0);
    assert!(logs.lines().is_empty());
}

#[tokio::test]
#[should_panic(expected = "callback failed")]
async fn panicking_callback_propagates() {
    let store = JsonStore::new(Arc::new(FailingFileSystem::new(io::ErrorKind::Other)));
    store
        .write_or_else("out.bin", &json!(1), |_| panic!("callback failed"))
        .await;
}
