//! Compressed JSON storage for stardata
//!
//! [`JsonStore`] serializes values to JSON, compresses the text with a
//! [`Codec`](stardata_codec::Codec) and writes the bytes through a
//! [`FileSystem`] port. Reads run the same pipeline backwards.

pub mod fs;
pub mod store;

pub use fs::{FileSystem, MemoryFileSystem, TokioFileSystem, WriteMode};
pub use stardata_core::{CompressionLevel, ErrorKind, Result, StorageError};
pub use store::{JsonStore, JsonStoreBuilder};
