//! LZMA codec
//!
//! Produces the legacy "LZMA-alone" container: a 13-byte header (properties,
//! dictionary size, uncompressed size) followed by the raw LZMA1 stream with
//! an end marker. The header carries everything the decoder needs, so the
//! compression level is never stored.
//!
//! Decoding also accepts files whose header records the uncompressed size
//! and whose stream stops without an end marker.

use crate::error::CodecError;
use crate::Codec;
use liblzma::read::{XzDecoder, XzEncoder};
use liblzma::stream::{LzmaOptions, Stream};
use stardata_core::CompressionLevel;
use std::io::{self, Read};

const CODEC_NAME: &str = "lzma";

/// Decoder memory limit (256 MiB). Level 9 needs a 64 MiB dictionary.
pub const DEFAULT_MEMORY_LIMIT: u64 = 256 * 1024 * 1024;

/// LZMA-alone codec backed by liblzma
#[derive(Debug, Clone, Copy)]
pub struct LzmaCodec {
    memory_limit: u64,
}

impl LzmaCodec {
    pub fn new() -> Self {
        Self {
            memory_limit: DEFAULT_MEMORY_LIMIT,
        }
    }

    /// Cap the memory the decoder may allocate; streams declaring a larger
    /// dictionary fail to decode.
    pub fn with_memory_limit(memory_limit: u64) -> Self {
        Self { memory_limit }
    }

    pub fn memory_limit(&self) -> u64 {
        self.memory_limit
    }
}

impl Default for LzmaCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for LzmaCodec {
    fn name(&self) -> &'static str {
        CODEC_NAME
    }

    fn compress(&self, text: &str, level: CompressionLevel) -> Result<Vec<u8>, CodecError> {
        let options = LzmaOptions::new_preset(level.get()).map_err(|e| CodecError::Init {
            codec: CODEC_NAME,
            source: io::Error::from(e),
        })?;
        let stream = Stream::new_lzma_encoder(&options).map_err(|e| CodecError::Init {
            codec: CODEC_NAME,
            source: io::Error::from(e),
        })?;

        let mut encoder = XzEncoder::new_stream(text.as_bytes(), stream);
        let mut compressed = Vec::new();
        encoder
            .read_to_end(&mut compressed)
            .map_err(|e| CodecError::Process {
                codec: CODEC_NAME,
                operation: "compress",
                source: e,
            })?;

        tracing::debug!(
            "Compressed text - level: {}, text_len: {}, compressed_len: {}",
            level,
            text.len(),
            compressed.len()
        );
        Ok(compressed)
    }

    fn decompress(&self, bytes: &[u8]) -> Result<String, CodecError> {
        if bytes.is_empty() {
            return Err(CodecError::Process {
                codec: CODEC_NAME,
                operation: "decompress",
                source: io::Error::new(io::ErrorKind::UnexpectedEof, "empty input"),
            });
        }

        let stream = Stream::new_lzma_decoder(self.memory_limit).map_err(|e| CodecError::Init {
            codec: CODEC_NAME,
            source: io::Error::from(e),
        })?;

        let mut decoder = XzDecoder::new_stream(bytes, stream);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| CodecError::Process {
                codec: CODEC_NAME,
                operation: "decompress",
                source: e,
            })?;

        String::from_utf8(decompressed).map_err(|e| CodecError::InvalidUtf8 {
            codec: CODEC_NAME,
            source: e,
        })
    }
}
