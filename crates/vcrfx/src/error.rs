//! # Configuration Error Types
//!
//! The per-frame path cannot fail. These errors only surface when the
//! configuration archive is read from or written to disk.

use thiserror::Error;

/// Errors that can occur while persisting configuration variables.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Archive file could not be parsed.
    #[error("invalid configuration archive: {0}")]
    Parse(#[from] toml::de::Error),

    /// Archive could not be serialized.
    #[error("failed to serialize configuration archive: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Archive file could not be read or written.
    #[error("configuration archive I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
