//! Error types for the CLI

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file `{path}`: {reason}")]
    Unreadable { path: String, reason: String },

    /// Config file is not valid TOML
    #[error("invalid config file `{path}`: {reason}")]
    Invalid { path: String, reason: String },

    /// The configured dialect is unknown
    #[error("unknown dialect `{0}` in config")]
    UnknownDialect(String),
}
