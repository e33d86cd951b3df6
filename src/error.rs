//! Error types for the recents crate

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecentsError {
    /// No filesystem entry exists at the requested path
    #[error("'{0}' does not exist")]
    NotFound(String),

    /// The path exists but could not be turned into a canonical absolute path
    #[error("could not resolve '{path}': {source}")]
    Resolution {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The registry store rejected a write
    #[error("registry write failed: {0}")]
    RegistryWrite(String),

    /// The registry store could not be read or parsed
    #[error("registry unavailable: {0}")]
    Registry(String),

    /// Invalid combination of actions or missing input; fatal before any mutation
    #[error("{0}")]
    Configuration(String),

    /// Problems with the user configuration file
    #[error("config error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, RecentsError>;
