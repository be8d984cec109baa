//! Reading-time estimate from raw word count.
use log::warn;

/// Default reading speed.
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

/// Count whitespace-separated tokens in `markdown`.
///
/// Markup is not stripped first, so a lone `#` or `-` counts as a word.
#[must_use]
pub fn word_count(markdown: &str) -> usize {
  markdown.split_whitespace().count()
}

/// Estimated reading time in whole minutes, rounded up.
///
/// Empty input reads in 0 minutes. A `words_per_minute` of 0 falls back to
/// [`DEFAULT_WORDS_PER_MINUTE`].
#[must_use]
pub fn reading_time(markdown: &str, words_per_minute: usize) -> usize {
  let words_per_minute = if words_per_minute == 0 {
    warn!(
      "words_per_minute is 0, using the default of {DEFAULT_WORDS_PER_MINUTE}"
    );
    DEFAULT_WORDS_PER_MINUTE
  } else {
    words_per_minute
  };

  word_count(markdown).div_ceil(words_per_minute)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_four_hundred_tokens_is_two_minutes() {
    let content = "word ".repeat(400);
    assert_eq!(reading_time(&content, 200), 2);
  }

  #[test]
  fn test_rounds_up() {
    assert_eq!(reading_time(&"w ".repeat(201), 200), 2);
    assert_eq!(reading_time("one", 200), 1);
  }

  #[test]
  fn test_empty_is_zero() {
    assert_eq!(reading_time("", 200), 0);
    assert_eq!(reading_time(" \n\t ", 200), 0);
  }

  #[test]
  fn test_markup_counts_as_words() {
    assert_eq!(word_count("# Title\n\n- item *x*"), 5);
  }

  #[test]
  fn test_zero_wpm_uses_default() {
    let content = "word ".repeat(400);
    assert_eq!(reading_time(&content, 0), 2);
  }
}
