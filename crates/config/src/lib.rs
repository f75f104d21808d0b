//! Configuration for stardata
//!
//! Settings are layered, lowest precedence first: built-in defaults, the
//! JSON config file, `STARDATA_*` environment variables, command line flags.

pub mod config;
pub mod loader;

pub use config::{ConfigSource, StoreConfig, StoreConfiguration, StoreOverrides};
pub use loader::StoreConfigLoader;
