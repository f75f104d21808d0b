//! Compression codecs for stardata
//!
//! A [`Codec`] turns JSON text into compressed bytes at a given
//! [`CompressionLevel`] and back. Decompression never needs the level.

mod error;
mod lzma;

pub use error::CodecError;
pub use lzma::{LzmaCodec, DEFAULT_MEMORY_LIMIT};
pub use stardata_core::CompressionLevel;

/// Text compression codec
pub trait Codec: Send + Sync {
    /// Short codec name used in logs
    fn name(&self) -> &'static str;

    /// Compress `text` at `level`
    fn compress(&self, text: &str, level: CompressionLevel) -> Result<Vec<u8>, CodecError>;

    /// Decompress bytes produced by [`Codec::compress`] at any level
    fn decompress(&self, bytes: &[u8]) -> Result<String, CodecError>;
}
