//! Error types surfaced by the crate.
//!
//! The content path itself is total; only configuration loading and direct
//! use of the highlighting backends can fail.
use std::path::PathBuf;

pub use crate::syntax::SyntaxError;

/// Errors raised while loading or validating [`PipelineOptions`].
///
/// [`PipelineOptions`]: crate::PipelineOptions
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Failed to read config file {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("Invalid TOML config: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("Invalid JSON config: {0}")]
  Json(#[from] serde_json::Error),
  #[error("Unsupported config file '{0}', expected a .toml or .json file")]
  UnsupportedFormat(String),
  #[error("Invalid config value: {0}")]
  Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
