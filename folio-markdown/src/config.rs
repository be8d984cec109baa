//! Loading [`PipelineOptions`] from TOML or JSON.
//!
//! Every key is optional; missing keys take their defaults. Values read from
//! text are validated, while options built in code are trusted as-is.
use std::{ffi::OsStr, fs, path::Path};

use log::debug;

use crate::{
  error::{ConfigError, ConfigResult},
  processor::PipelineOptions,
};

impl PipelineOptions {
  /// Parse options from a TOML document.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::Toml`] for malformed TOML or unknown value types,
  /// and [`ConfigError::Invalid`] if validation fails.
  pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
    let options: Self = toml::from_str(source)?;
    options.validate()?;
    Ok(options)
  }

  /// Parse options from a JSON document.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::Json`] for malformed JSON, and
  /// [`ConfigError::Invalid`] if validation fails.
  pub fn from_json_str(source: &str) -> ConfigResult<Self> {
    let options: Self = serde_json::from_str(source)?;
    options.validate()?;
    Ok(options)
  }

  /// Check values that would make the pipeline output meaningless.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::Invalid`] for a zero `max_excerpt_length`, a zero
  /// `words_per_minute` or an empty `asset_base_url`.
  pub fn validate(&self) -> ConfigResult<()> {
    if self.max_excerpt_length == 0 {
      return Err(ConfigError::Invalid(
        "max_excerpt_length must be greater than 0".to_string(),
      ));
    }

    if self.words_per_minute == 0 {
      return Err(ConfigError::Invalid(
        "words_per_minute must be greater than 0".to_string(),
      ));
    }

    if self
      .asset_base_url
      .as_deref()
      .is_some_and(|url| url.trim().is_empty())
    {
      return Err(ConfigError::Invalid(
        "asset_base_url must not be empty; omit it instead".to_string(),
      ));
    }

    Ok(())
  }
}

/// Load options from a `.toml` or `.json` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unknown extension,
/// fails to parse or fails validation.
pub fn load_options(path: &Path) -> ConfigResult<PipelineOptions> {
  let content = fs::read_to_string(path).map_err(|source| {
    ConfigError::Io {
      path: path.to_path_buf(),
      source,
    }
  })?;

  let extension = path
    .extension()
    .and_then(OsStr::to_str)
    .map(str::to_ascii_lowercase);

  let options = match extension.as_deref() {
    Some("toml") => PipelineOptions::from_toml_str(&content)?,
    Some("json") => PipelineOptions::from_json_str(&content)?,
    _ => {
      return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
    },
  };

  debug!("Loaded pipeline options from {}", path.display());
  Ok(options)
}
