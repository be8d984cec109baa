//! Types for the folio-markdown public API.
use serde::{Deserialize, Serialize};

/// One entry of a document outline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeadingRecord {
  /// Heading level (1-6).
  pub level: u8,
  /// Heading text (inline content, no markdown formatting).
  pub title: String,
  /// Anchor id, unique within the outline and present in the rendered HTML.
  pub id:    String,
}

/// Ordered headings of one document.
pub type Outline = Vec<HeadingRecord>;

/// Everything the content pipeline derives from one article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactBundle {
  /// Rendered HTML output.
  pub html: String,

  /// Extracted headings (for `ToC`, scroll-spy, etc).
  pub outline: Outline,

  /// Plain-text summary for listings, cards and search.
  pub excerpt: String,

  /// Estimated reading time in whole minutes.
  pub reading_time_minutes: usize,

  /// Title of the document, if found (first H1).
  pub title: Option<String>,
}

impl ArtifactBundle {
  /// Serialize the bundle as JSON for the rendering and listing layers.
  ///
  /// # Errors
  ///
  /// Returns an error if serialization fails.
  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string(self)
  }

  /// Parse a bundle previously produced by [`ArtifactBundle::to_json`].
  ///
  /// # Errors
  ///
  /// Returns an error if `json` is not a valid bundle.
  pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(json)
  }
}
