//! Core domain types, errors, and constants for `stardata`.
//!
//! ## Key Components
//!
//! - **`errors`**: the `StorageError` enum and `Result` alias shared by every
//!   crate in the workspace, with an [`ErrorKind`] tag and recovery hints.
//! - **`level`**: the validated [`CompressionLevel`] newtype.
//! - **`constants`**: environment variable names and defaults.

pub mod constants;
pub mod errors;
pub mod level;

pub use self::{
    constants::*,
    errors::{BoxedSource, ErrorKind, RecoveryHint, Result, SerializationOp, StorageError},
    level::CompressionLevel,
};
