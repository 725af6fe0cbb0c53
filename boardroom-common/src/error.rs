//! Common error types for Boardroom
//!
//! Parsing and derivation never fail; these errors only come from the
//! surrounding plumbing (dataset store, configuration files).

use thiserror::Error;

/// Common result type for Boardroom operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Boardroom crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML configuration file could not be parsed
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
