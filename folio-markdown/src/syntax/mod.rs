//! Pluggable syntax highlighting for fenced code blocks.
//!
//! The pipeline only talks to [`SyntaxManager`], which wraps any
//! [`SyntaxHighlighter`] backend. The bundled backend is **Syntect** with
//! two-face's extended syntax and theme sets, enabled by the `syntect`
//! feature (on by default).

pub mod error;
pub mod types;

pub use error::{SyntaxError, SyntaxResult};
pub use types::{SyntaxConfig, SyntaxHighlighter, SyntaxManager};

#[cfg(feature = "syntect")] mod syntect;
#[cfg(feature = "syntect")] pub use syntect::*;

/// Create the default syntax manager based on available features.
///
/// # Errors
///
/// Returns [`SyntaxError::NoBackendAvailable`] when the crate was built
/// without a highlighting backend, or the backend's own initialization
/// error.
pub fn create_default_manager() -> SyntaxResult<SyntaxManager> {
  #[cfg(feature = "syntect")]
  {
    create_syntect_manager()
  }

  #[cfg(not(feature = "syntect"))]
  {
    Err(SyntaxError::NoBackendAvailable)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_syntax_config_default() {
    let config = SyntaxConfig::default();
    assert!(config.default_theme.is_none());
    assert_eq!(config.language_aliases["js"], "javascript");
    assert_eq!(config.language_aliases["sh"], "bash");
  }

  #[test]
  fn test_error_messages() {
    let error = SyntaxError::UnsupportedLanguage("brainfudge".to_string());
    assert!(error.to_string().contains("brainfudge"));
    let result: SyntaxResult<String> = Err(SyntaxError::NoBackendAvailable);
    assert!(result.is_err());
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn test_syntect_highlighter() {
    let highlighter = SyntectHighlighter::default();
    assert_eq!(highlighter.name(), "Syntect");
    assert!(!highlighter.supported_languages().is_empty());
    assert!(highlighter.has_theme("InspiredGitHub"));
    assert!(highlighter.has_theme("Nord"));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn test_every_listed_theme_has_a_stylesheet() {
    let highlighter = SyntectHighlighter::default();
    for theme in highlighter.available_themes() {
      assert!(
        highlighter.stylesheet(Some(&theme)).is_ok(),
        "theme {theme} is listed but has no stylesheet"
      );
    }
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn test_syntect_highlight_emits_classes() {
    let highlighter = SyntectHighlighter::default();
    let html = highlighter
      .highlight("fn main() {}\n", "rust")
      .expect("rust is supported");
    assert!(html.contains("<span class=\""));
    assert!(html.contains("main"));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn test_syntect_escapes_exactly_once() {
    let highlighter = SyntectHighlighter::default();
    let html = highlighter
      .highlight("let a = b < c && d;\n", "rust")
      .expect("rust is supported");
    assert!(html.contains("&lt;"));
    assert!(html.contains("&amp;&amp;"));
    assert!(!html.contains("&amp;lt;"));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn test_unknown_language_is_rejected() {
    let manager = create_default_manager().expect("backend available");
    assert!(!manager.supports("made-up-lang"));
    assert!(matches!(
      manager.highlight_code("x", "made-up-lang"),
      Err(SyntaxError::UnsupportedLanguage(lang)) if lang == "made-up-lang"
    ));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn test_language_resolution() {
    let manager = create_default_manager().expect("backend available");
    assert_eq!(manager.resolve_language("js"), "javascript");
    assert_eq!(manager.resolve_language("PY"), "python");
    assert_eq!(manager.resolve_language("rust"), "rust");
    assert!(manager.supports("js"));
    assert!(manager.supports("Rust"));
    assert!(manager.supports("ts"));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn test_stylesheet_for_default_and_named_theme() {
    let manager = create_default_manager().expect("backend available");
    let css = manager.stylesheet(None).expect("default theme exists");
    assert!(css.contains('{'));

    assert!(manager.stylesheet(Some("Dracula")).is_ok());
    assert!(manager.stylesheet(Some("Zenburn")).is_ok());
    assert!(matches!(
      manager.stylesheet(Some("No Such Theme")),
      Err(SyntaxError::ThemeNotFound(_))
    ));
  }
}
