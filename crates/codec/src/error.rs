use std::io;
use std::string::FromUtf8Error;

/// Codec failure
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The encoder or decoder could not be set up
    #[error("codec {codec} init failed: {source}")]
    Init {
        codec: &'static str,
        #[source]
        source: io::Error,
    },

    /// The stream could not be processed (corrupt, truncated, over the memory limit)
    #[error("codec {codec} {operation} failed: {source}")]
    Process {
        codec: &'static str,
        operation: &'static str,
        #[source]
        source: io::Error,
    },

    /// Decompressed bytes are not UTF-8 text
    #[error("codec {codec} produced invalid UTF-8: {source}")]
    InvalidUtf8 {
        codec: &'static str,
        #[source]
        source: FromUtf8Error,
    },
}
