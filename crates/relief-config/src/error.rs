//! Configuration error types.

use std::path::PathBuf;

/// Errors raised while loading, saving or validating the host configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file exists but is not valid RON for [`crate::Config`].
    #[error("malformed config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] ron::Error),

    /// A value is outside its permitted domain.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: String, reason: String },

    /// A pipeline step name is not a known operation.
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),
}
