//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur when locating, loading, saving, or checking configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The OS did not provide a configuration directory and none was given.
    #[error("could not determine a configuration directory")]
    NoConfigDir,

    /// Failed to read the config file from disk.
    #[error("failed to read config {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the config file to disk.
    #[error("failed to write config {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// A setting holds a value the renderer cannot use.
    #[error("invalid setting `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
