/// Constants used throughout the stardata codebase
// Environment variable names
pub const STARDATA_COMPRESSION_LEVEL_VAR: &str = "STARDATA_COMPRESSION_LEVEL";
pub const STARDATA_ATOMIC_WRITES_VAR: &str = "STARDATA_ATOMIC_WRITES";

// Configuration file location, relative to the user config directory
pub const CONFIG_DIR_NAME: &str = "stardata";
pub const CONFIG_FILE_NAME: &str = "config.json";

// Best-effort failure log prefixes
pub const READ_FAILURE_PREFIX: &str = "Problem loading";
pub const WRITE_FAILURE_PREFIX: &str = "Problem writing";
