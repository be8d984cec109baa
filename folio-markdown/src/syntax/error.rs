//! Errors from highlighting backends.

/// Result type for syntax highlighting operations.
pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Why a code block could not be highlighted, or a stylesheet produced.
///
/// None of these reach callers of the content pipeline: the renderer turns
/// every one of them into the plain `language-text` fallback.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
  #[error("no grammar for language '{0}'")]
  UnsupportedLanguage(String),
  #[error("unknown highlighting theme '{0}'")]
  ThemeNotFound(String),
  #[error("highlighting failed: {0}")]
  HighlightingFailed(String),
  #[error("could not build stylesheet: {0}")]
  StylesheetFailed(String),
  #[error("crate built without a highlighting backend, enable the 'syntect' feature")]
  NoBackendAvailable,
}
