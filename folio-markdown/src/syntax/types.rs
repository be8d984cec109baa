//! The highlighter seam and the manager the renderer talks to.
use std::collections::HashMap;

use super::error::{SyntaxError, SyntaxResult};

/// A syntax highlighting backend.
///
/// Output is token-classified HTML: each token sits in a `span` whose
/// classes name its scope, and the text between tags is escaped exactly
/// once. Colours live in a separate stylesheet from
/// [`SyntaxHighlighter::stylesheet`], so one stylesheet serves every page.
pub trait SyntaxHighlighter: Send + Sync {
  /// Backend name, for logs.
  fn name(&self) -> &'static str;

  /// Language names and file extensions this backend accepts.
  fn supported_languages(&self) -> Vec<String>;

  /// Theme names accepted by [`SyntaxHighlighter::stylesheet`].
  fn available_themes(&self) -> Vec<String>;

  fn supports_language(&self, language: &str) -> bool {
    self
      .supported_languages()
      .iter()
      .any(|lang| lang.eq_ignore_ascii_case(language))
  }

  fn has_theme(&self, theme: &str) -> bool {
    self
      .available_themes()
      .iter()
      .any(|t| t.eq_ignore_ascii_case(theme))
  }

  /// Highlight raw (unescaped) `code` as `language`.
  ///
  /// # Errors
  ///
  /// Returns an error if the language is unknown or highlighting fails.
  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String>;

  /// CSS for the classes emitted by [`SyntaxHighlighter::highlight`].
  /// `None` selects the backend's default theme.
  ///
  /// # Errors
  ///
  /// Returns an error if the theme is unknown or cannot be turned into CSS.
  fn stylesheet(&self, theme: Option<&str>) -> SyntaxResult<String>;
}

/// Settings layered on top of a backend.
#[derive(Debug, Clone)]
pub struct SyntaxConfig {
  /// Theme used for the stylesheet when the caller names none.
  pub default_theme: Option<String>,

  /// Short fence tags authors use, mapped to names the backend knows.
  pub language_aliases: HashMap<String, String>,
}

impl Default for SyntaxConfig {
  fn default() -> Self {
    let language_aliases = [
      ("js", "javascript"),
      ("jsx", "javascript"),
      ("ts", "typescript"),
      ("py", "python"),
      ("rb", "ruby"),
      ("sh", "bash"),
      ("shell", "bash"),
      ("zsh", "bash"),
      ("yml", "yaml"),
      ("md", "markdown"),
      ("rs", "rust"),
    ]
    .into_iter()
    .map(|(alias, language)| (alias.to_string(), language.to_string()))
    .collect();

    Self {
      default_theme: None,
      language_aliases,
    }
  }
}

/// Resolves fence tags and forwards to a [`SyntaxHighlighter`].
pub struct SyntaxManager {
  highlighter: Box<dyn SyntaxHighlighter>,
  config:      SyntaxConfig,
}

impl std::fmt::Debug for SyntaxManager {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SyntaxManager")
      .field("highlighter", &self.highlighter.name())
      .field("config", &self.config)
      .finish()
  }
}

impl SyntaxManager {
  #[must_use]
  pub fn new(
    highlighter: Box<dyn SyntaxHighlighter>,
    config: SyntaxConfig,
  ) -> Self {
    Self {
      highlighter,
      config,
    }
  }

  /// Wrap `highlighter` with the default aliases and no default theme.
  #[must_use]
  pub fn with_highlighter(highlighter: Box<dyn SyntaxHighlighter>) -> Self {
    Self::new(highlighter, SyntaxConfig::default())
  }

  #[must_use]
  pub fn highlighter(&self) -> &dyn SyntaxHighlighter {
    self.highlighter.as_ref()
  }

  #[must_use]
  pub const fn config(&self) -> &SyntaxConfig {
    &self.config
  }

  /// Lowercase a fence tag and follow its alias, if any.
  #[must_use]
  pub fn resolve_language(&self, language: &str) -> String {
    let lowered = language.to_ascii_lowercase();
    self
      .config
      .language_aliases
      .get(&lowered)
      .cloned()
      .unwrap_or(lowered)
  }

  /// Whether a block tagged `language` would be highlighted.
  #[must_use]
  pub fn supports(&self, language: &str) -> bool {
    self
      .highlighter
      .supports_language(&self.resolve_language(language))
  }

  /// Highlight `code` for a block tagged `language`.
  ///
  /// # Errors
  ///
  /// Returns [`SyntaxError::UnsupportedLanguage`] when the backend does not
  /// know the resolved language, or the backend's error if highlighting
  /// fails.
  pub fn highlight_code(
    &self,
    code: &str,
    language: &str,
  ) -> SyntaxResult<String> {
    let resolved = self.resolve_language(language);
    if !self.highlighter.supports_language(&resolved) {
      return Err(SyntaxError::UnsupportedLanguage(resolved));
    }
    self.highlighter.highlight(code, &resolved)
  }

  /// Stylesheet for `theme`, or for the configured default theme.
  ///
  /// # Errors
  ///
  /// Returns the backend's error if the stylesheet cannot be produced.
  pub fn stylesheet(&self, theme: Option<&str>) -> SyntaxResult<String> {
    let theme = theme.or(self.config.default_theme.as_deref());
    self.highlighter.stylesheet(theme)
  }
}
