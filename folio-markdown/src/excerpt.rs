//! Plain-text excerpts straight from raw markdown.
//!
//! Listing cards and search only need a short summary, so this works on the
//! source text with an ordered chain of rewrites instead of parsing. The
//! order is load-bearing: fenced code goes first so that markers inside code
//! samples never reach the emphasis rules, and tags are stripped only after
//! links and images have been reduced to their text.
use std::sync::LazyLock;

use log::trace;
use regex::Regex;

use crate::utils::{codeblock::strip_fenced_blocks, regex_or_never};

/// Ellipsis appended to truncated excerpts.
pub const DEFAULT_ELLIPSIS: &str = "...";

/// Default excerpt length, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 150;

/// One rewrite of the chain: every match of `regex` is replaced by
/// `replacement` (which may refer to capture groups).
struct Rule {
  regex:       LazyLock<Regex>,
  replacement: &'static str,
}

macro_rules! rule {
  ($pattern:expr, $replacement:expr) => {
    Rule {
      regex:       LazyLock::new(|| regex_or_never($pattern)),
      replacement: $replacement,
    }
  };
}

static TABLE_DELIMITER_ROWS: [Rule; 1] = [rule!(
  r"(?m)^[ \t]*\|?(?:[ \t]*:?-+:?[ \t]*\|)+(?:[ \t]*:?-+:?)?[ \t]*$",
  ""
)];

static TABLE_ROW: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?m)^[ \t]*\|.*\|[ \t]*$"));

static HEADING_MARKERS: [Rule; 1] = [rule!(r"(?m)^[ \t]{0,3}#{1,6}[ \t]+", "")];

static EMPHASIS: [Rule; 5] = [
  rule!(r"\*\*([^*\n]+?)\*\*", "$1"),
  rule!(r"__([^_\n]+?)__", "$1"),
  rule!(r"\*([^*\s][^*\n]*?)\*", "$1"),
  rule!(r"\b_([^_\n]+?)_\b", "$1"),
  rule!(r"~~([^~\n]+?)~~", "$1"),
];

static INLINE_CODE: [Rule; 2] =
  [rule!(r"``([^\n]+?)``", "$1"), rule!(r"`([^`\n]+)`", "$1")];

static LINKS_AND_IMAGES: [Rule; 2] = [
  rule!(r"!\[([^\]]*)\]\([^)]*\)(?:\{[^}\n]*\})?", "$1"),
  rule!(r"\[([^\]]*)\]\([^)]*\)", "$1"),
];

static BLOCK_MARKERS: [Rule; 4] = [
  rule!(r"(?m)^[ \t]{0,3}(?:=+|-{2,})[ \t]*$", ""),
  rule!(r"(?m)^[ \t]*(?:[-*_][ \t]*){3,}$", ""),
  rule!(r"(?m)^[ \t]*(?:>[ \t]?)+", ""),
  rule!(r"(?m)^[ \t]*(?:[-*+]|\d+[.)])[ \t]+", ""),
];

static TAGS: [Rule; 2] =
  [rule!(r"(?s)<!--.*?-->", ""), rule!(r"</?[a-zA-Z][^>]*>", "")];

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| regex_or_never(r"\s+"));

/// Blank out the pipes of `| a | b |` rows, keeping the cell text.
fn strip_table_rows(text: String) -> String {
  let text = apply(text, &TABLE_DELIMITER_ROWS);
  TABLE_ROW
    .replace_all(&text, |caps: &regex::Captures| caps[0].replace('|', " "))
    .into_owned()
}

fn apply(text: String, rules: &[Rule]) -> String {
  rules.iter().fold(text, |text, rule| {
    rule.regex.replace_all(&text, rule.replacement).into_owned()
  })
}

/// Reduce raw markdown to a single line of plain text.
///
/// Fenced code blocks are removed entirely, markup is reduced to the text it
/// carries, whitespace runs collapse to one space and the result is trimmed.
#[must_use]
pub fn strip_markdown(markdown: &str) -> String {
  if markdown.trim().is_empty() {
    return String::new();
  }

  let text = strip_fenced_blocks(markdown);
  let text = strip_table_rows(text);
  let text = apply(text, &HEADING_MARKERS);
  let text = apply(text, &EMPHASIS);
  let text = apply(text, &INLINE_CODE);
  let text = apply(text, &LINKS_AND_IMAGES);
  let text = apply(text, &BLOCK_MARKERS);
  let text = apply(text, &TAGS);

  WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Cut `text` to at most `max_length` characters plus `ellipsis`.
///
/// Text that already fits is returned unchanged, without an ellipsis.
/// Otherwise the cut moves back to the last whitespace inside the window, but
/// only when that whitespace sits at or beyond 80% of `max_length`; an early
/// break would throw away most of the window.
#[must_use]
pub fn truncate(text: &str, max_length: usize, ellipsis: &str) -> String {
  if text.chars().count() <= max_length {
    return text.to_string();
  }

  let window: Vec<char> = text.chars().take(max_length).collect();
  let cut = window
    .iter()
    .rposition(|c| c.is_whitespace())
    .filter(|&index| index * 5 >= max_length * 4)
    .unwrap_or(max_length);

  let mut excerpt: String = window[..cut].iter().collect();
  excerpt.truncate(excerpt.trim_end().len());
  excerpt.push_str(ellipsis);
  excerpt
}

/// Plain-text excerpt of `markdown`, at most `max_length` characters before
/// the ellipsis.
#[must_use]
pub fn excerpt(markdown: &str, max_length: usize, ellipsis: &str) -> String {
  let text = strip_markdown(markdown);
  trace!(
    "Stripped markdown to {} characters for a {max_length} excerpt",
    text.chars().count()
  );
  truncate(&text, max_length, ellipsis)
}
