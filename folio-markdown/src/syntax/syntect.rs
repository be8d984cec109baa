//! Syntect-based syntax highlighting backend enhanced with two-face.
//!
//! Uses Sublime Text syntax definitions (`TextMate` grammars) from the
//! two-face crate, which adds TypeScript, TSX, SCSS and friends on top of
//! syntect's defaults. Output is class-based so that one stylesheet can
//! serve every article.

use std::sync::OnceLock;

use syntect::{
  highlighting::{Theme, ThemeSet},
  html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style},
  parsing::SyntaxSet,
  util::LinesWithEndings,
};
use two_face::theme::{EmbeddedLazyThemeSet, EmbeddedThemeName};

use super::{
  error::{SyntaxError, SyntaxResult},
  types::{SyntaxConfig, SyntaxHighlighter, SyntaxManager},
};

const DEFAULT_THEME: &str = "InspiredGitHub";

/// Themes from two-face exposed by name, on top of syntect's defaults.
const EMBEDDED_THEMES: &[(&str, EmbeddedThemeName)] = &[
  ("Dracula", EmbeddedThemeName::Dracula),
  ("Github", EmbeddedThemeName::Github),
  ("GruvboxDark", EmbeddedThemeName::GruvboxDark),
  ("GruvboxLight", EmbeddedThemeName::GruvboxLight),
  ("MonokaiExtended", EmbeddedThemeName::MonokaiExtended),
  ("Nord", EmbeddedThemeName::Nord),
  ("OneHalfDark", EmbeddedThemeName::OneHalfDark),
  ("OneHalfLight", EmbeddedThemeName::OneHalfLight),
  ("SolarizedDark", EmbeddedThemeName::SolarizedDark),
  ("SolarizedLight", EmbeddedThemeName::SolarizedLight),
  ("TwoDark", EmbeddedThemeName::TwoDark),
  ("Zenburn", EmbeddedThemeName::Zenburn),
];

/// Syntect-based syntax highlighter
#[derive(Debug, Default)]
pub struct SyntectHighlighter;

impl SyntectHighlighter {
  #[must_use]
  pub const fn new() -> Self {
    Self
  }

  /// Get the syntect `SyntaxSet`.
  fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(two_face::syntax::extra_newlines)
  }

  /// Get the two-face theme set.
  fn theme_set() -> &'static EmbeddedLazyThemeSet {
    static THEME_SET: OnceLock<EmbeddedLazyThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(two_face::theme::extra)
  }

  /// Get the default syntect `ThemeSet`.
  fn default_theme_set() -> &'static ThemeSet {
    static DEFAULT_THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    DEFAULT_THEME_SET.get_or_init(ThemeSet::load_defaults)
  }

  /// Look a theme up by name, syntect's defaults first.
  fn find_theme(name: &str) -> Option<&'static Theme> {
    if let Some(theme) = Self::default_theme_set().themes.get(name) {
      return Some(theme);
    }

    EMBEDDED_THEMES
      .iter()
      .find(|(embedded, _)| embedded.eq_ignore_ascii_case(name))
      .map(|(_, embedded)| Self::theme_set().get(*embedded))
  }
}

impl SyntaxHighlighter for SyntectHighlighter {
  fn name(&self) -> &'static str {
    "Syntect"
  }

  fn supported_languages(&self) -> Vec<String> {
    Self::syntax_set()
      .syntaxes()
      .iter()
      .flat_map(|syntax| {
        std::iter::once(syntax.name.to_lowercase())
          .chain(syntax.file_extensions.iter().map(|ext| ext.to_lowercase()))
      })
      .collect()
  }

  fn supports_language(&self, language: &str) -> bool {
    !language.is_empty()
      && Self::syntax_set().find_syntax_by_token(language).is_some()
  }

  fn available_themes(&self) -> Vec<String> {
    let mut themes: Vec<String> =
      Self::default_theme_set().themes.keys().cloned().collect();
    themes.extend(EMBEDDED_THEMES.iter().map(|(name, _)| (*name).to_string()));
    themes.sort();
    themes.dedup();
    themes
  }

  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String> {
    let syntax_set = Self::syntax_set();
    let syntax = syntax_set
      .find_syntax_by_token(language)
      .ok_or_else(|| SyntaxError::UnsupportedLanguage(language.to_string()))?;

    let mut generator = ClassedHTMLGenerator::new_with_class_style(
      syntax,
      syntax_set,
      ClassStyle::Spaced,
    );
    for line in LinesWithEndings::from(code) {
      generator
        .parse_html_for_line_which_includes_newline(line)
        .map_err(|e| SyntaxError::HighlightingFailed(e.to_string()))?;
    }
    Ok(generator.finalize())
  }

  fn stylesheet(&self, theme: Option<&str>) -> SyntaxResult<String> {
    let name = theme.unwrap_or(DEFAULT_THEME);
    let theme = Self::find_theme(name)
      .ok_or_else(|| SyntaxError::ThemeNotFound(name.to_string()))?;
    css_for_theme_with_class_style(theme, ClassStyle::Spaced)
      .map_err(|e| SyntaxError::StylesheetFailed(e.to_string()))
  }
}

/// Create a Syntect-based syntax manager with configuration
///
/// # Errors
///
/// Currently infallible; the signature matches other backends.
pub fn create_syntect_manager() -> SyntaxResult<SyntaxManager> {
  let config = SyntaxConfig {
    default_theme: Some(DEFAULT_THEME.to_string()),
    ..SyntaxConfig::default()
  };
  Ok(SyntaxManager::new(Box::new(SyntectHighlighter::new()), config))
}
