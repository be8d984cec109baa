pub mod codeblock;

use regex::Regex;

/// Error type for utility operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
  #[error("Regex compilation failed: {0}")]
  RegexError(#[from] regex::Error),
}

/// Result type for utility operations.
pub type UtilResult<T> = Result<T, UtilError>;

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile. The
/// pattern asserts something impossible, which is safer than a trivial regex
/// like `^$` that would still match empty strings.
#[must_use]
#[allow(clippy::expect_used, reason = "Constant pattern, always compiles")]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").expect("regex pattern [^\\s\\S] should always compile")
}

/// Compile `pattern`, logging and falling back to [`never_matching_regex`]
/// when it does not compile.
///
/// Intended for `LazyLock` statics, where a bad pattern must degrade a single
/// transformation rather than abort the whole pipeline.
#[must_use]
pub fn regex_or_never(pattern: &str) -> Regex {
  try_regex(pattern).unwrap_or_else(|e| {
    log::error!(
      "Failed to compile regex {pattern:?}: {e}\n Falling back to never \
       matching regex."
    );
    never_matching_regex()
  })
}

/// Compile `pattern` into a [`Regex`].
///
/// # Errors
///
/// Returns [`UtilError::RegexError`] if the pattern is invalid.
pub fn try_regex(pattern: &str) -> UtilResult<Regex> {
  Ok(Regex::new(pattern)?)
}

/// Apply a regex transformation to HTML elements using the provided function.
/// Used by the renderer for rewriting raw author markup.
pub fn process_html_elements<F>(
  html: &str,
  regex: &Regex,
  transform: F,
) -> String
where
  F: Fn(&regex::Captures) -> String,
{
  match regex.replace_all(html, transform) {
    std::borrow::Cow::Borrowed(_) => html.to_string(),
    std::borrow::Cow::Owned(s) => s,
  }
}
