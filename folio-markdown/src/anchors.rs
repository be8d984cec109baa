//! Heading anchor assignment.
//!
//! Ids are computed exactly once per document, from the ordered list of
//! heading titles, and the resulting [`HeadingIds`] is handed to both the
//! outline builder and the renderer. Neither consumer derives ids on its own,
//! so the table of contents and the rendered document can never disagree.
//!
//! The [`IdRegistry`] holding occurrence counts is created per call and
//! dropped with it; there is no shared or global registry.
use std::collections::{HashMap, HashSet};

use crate::parser::NodeTree;

/// Slug used when a title normalises to nothing.
pub const FALLBACK_SLUG: &str = "heading";

/// Normalise heading text into a slug.
///
/// Lowercases, drops punctuation that is not part of a word (letters and
/// digits in any script, `_` and `-` survive), collapses whitespace runs into
/// single `-` and trims dashes from both ends. Non-ASCII letters are kept
/// as-is. Returns an empty string when nothing survives.
#[must_use]
pub fn slugify(text: &str) -> String {
  text
    .to_lowercase()
    .chars()
    .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '-'))
    .collect::<String>()
    .split_whitespace()
    .collect::<Vec<_>>()
    .join("-")
    .trim_matches('-')
    .to_string()
}

/// Per-document slug registry.
///
/// Tracks how often each slug has been seen and every id handed out so far,
/// so that repeated titles get `-2`, `-3`, ... suffixes in order of
/// appearance and no id is ever issued twice.
#[derive(Debug, Default)]
pub struct IdRegistry {
  seen:   HashMap<String, usize>,
  issued: HashSet<String>,
}

impl IdRegistry {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Assign the id for the next heading titled `title`.
  pub fn assign(&mut self, title: &str) -> String {
    let mut slug = slugify(title);
    if slug.is_empty() {
      slug = FALLBACK_SLUG.to_string();
    }

    let count = self.seen.entry(slug.clone()).or_insert(0);
    *count += 1;

    let id = if *count == 1 && !self.issued.contains(&slug) {
      slug
    } else {
      let mut n = (*count).max(2);
      let mut candidate = format!("{slug}-{n}");
      while self.issued.contains(&candidate) {
        n += 1;
        candidate = format!("{slug}-{n}");
      }
      *count = n;
      candidate
    };

    self.issued.insert(id.clone());
    id
  }

  /// Number of ids issued so far.
  #[must_use]
  pub fn len(&self) -> usize {
    self.issued.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.issued.is_empty()
  }
}

/// Assign one id per title, in order, using a fresh registry.
#[must_use]
pub fn assign_heading_ids<S: AsRef<str>>(titles: &[S]) -> Vec<String> {
  let mut registry = IdRegistry::new();
  titles
    .iter()
    .map(|title| registry.assign(title.as_ref()))
    .collect()
}

/// The ids of every heading in one document, in document order.
///
/// The `k`-th id belongs to the `k`-th heading yielded by
/// [`NodeTree::headings`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeadingIds(Vec<String>);

impl HeadingIds {
  /// Compute ids for every heading in `tree`.
  #[must_use]
  pub fn assign(tree: &NodeTree) -> Self {
    Self(assign_heading_ids(&tree.heading_titles()))
  }

  #[must_use]
  pub fn get(&self, index: usize) -> Option<&str> {
    self.0.get(index).map(String::as_str)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  #[must_use]
  pub fn as_slice(&self) -> &[String] {
    &self.0
  }

  #[must_use]
  pub fn into_inner(self) -> Vec<String> {
    self.0
  }
}

impl From<Vec<String>> for HeadingIds {
  fn from(ids: Vec<String>) -> Self {
    Self(ids)
  }
}
