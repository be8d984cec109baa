//! Type definitions for the content pipeline.
//!
//! Contains the configuration (`PipelineOptions` and its builder) and the
//! pipeline struct itself.
//!
//! # Examples
//!
//! ```
//! use folio_markdown::{ContentPipeline, PipelineOptions};
//!
//! let options = PipelineOptions {
//!   max_excerpt_length: 80,
//!   highlight_code: false,
//!   ..Default::default()
//! };
//!
//! let pipeline = ContentPipeline::new(options);
//! ```
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
  excerpt::{DEFAULT_ELLIPSIS, DEFAULT_MAX_LENGTH},
  parser::ParseOptions,
  reading_time::DEFAULT_WORDS_PER_MINUTE,
  render::{DEFAULT_IMAGE_CLASS, RenderOptions},
  syntax::SyntaxManager,
};

/// Options for configuring the content pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Config struct with related boolean flags"
)]
pub struct PipelineOptions {
  /// Enable GitHub Flavored Markdown (tables, strikethrough, autolinks).
  pub gfm: bool,

  /// Enable syntax highlighting for fenced code blocks.
  pub highlight_code: bool,

  /// Theme for the token stylesheet. `None` uses the backend default.
  pub highlight_theme: Option<String>,

  /// Maximum excerpt length in characters, before the ellipsis.
  pub max_excerpt_length: usize,

  /// Appended to truncated excerpts.
  pub ellipsis: String,

  /// Reading speed for the reading-time estimate.
  pub words_per_minute: usize,

  /// Add lazy loading and the default class to images.
  pub lazy_images: bool,

  /// Class given to images without an author class.
  pub image_class: String,

  /// Prefix for relative image sources.
  pub asset_base_url: Option<String>,

  /// Open external links in a new tab.
  pub external_links_new_tab: bool,
}

impl Default for PipelineOptions {
  fn default() -> Self {
    Self {
      gfm:                    true,
      highlight_code:         true,
      highlight_theme:        None,
      max_excerpt_length:     DEFAULT_MAX_LENGTH,
      ellipsis:               DEFAULT_ELLIPSIS.to_string(),
      words_per_minute:       DEFAULT_WORDS_PER_MINUTE,
      lazy_images:            true,
      image_class:            DEFAULT_IMAGE_CLASS.to_string(),
      asset_base_url:         None,
      external_links_new_tab: true,
    }
  }
}

impl PipelineOptions {
  /// Parser switches derived from these options.
  #[must_use]
  pub const fn parse_options(&self) -> ParseOptions {
    ParseOptions {
      gfm:              self.gfm,
      image_attributes: true,
    }
  }

  /// Renderer switches derived from these options.
  #[must_use]
  pub fn render_options(&self) -> RenderOptions {
    RenderOptions {
      highlight_code:         self.highlight_code,
      lazy_images:            self.lazy_images,
      image_class:            self.image_class.clone(),
      asset_base_url:         self.asset_base_url.clone(),
      external_links_new_tab: self.external_links_new_tab,
    }
  }
}

/// Builder for constructing `PipelineOptions` with method chaining.
#[derive(Debug, Clone)]
pub struct PipelineOptionsBuilder {
  options: PipelineOptions,
}

impl PipelineOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self {
      options: PipelineOptions::default(),
    }
  }

  /// Enable or disable GitHub Flavored Markdown.
  #[must_use]
  pub const fn gfm(mut self, enabled: bool) -> Self {
    self.options.gfm = enabled;
    self
  }

  /// Enable or disable syntax highlighting.
  #[must_use]
  pub const fn highlight_code(mut self, enabled: bool) -> Self {
    self.options.highlight_code = enabled;
    self
  }

  /// Set the syntax highlighting theme.
  #[must_use]
  pub fn highlight_theme<S: Into<String>>(mut self, theme: Option<S>) -> Self {
    self.options.highlight_theme = theme.map(Into::into);
    self
  }

  /// Set the maximum excerpt length.
  #[must_use]
  pub const fn max_excerpt_length(mut self, length: usize) -> Self {
    self.options.max_excerpt_length = length;
    self
  }

  /// Set the excerpt ellipsis.
  #[must_use]
  pub fn ellipsis<S: Into<String>>(mut self, ellipsis: S) -> Self {
    self.options.ellipsis = ellipsis.into();
    self
  }

  /// Set the reading speed.
  #[must_use]
  pub const fn words_per_minute(mut self, words_per_minute: usize) -> Self {
    self.options.words_per_minute = words_per_minute;
    self
  }

  /// Enable or disable the image rewrite.
  #[must_use]
  pub const fn lazy_images(mut self, enabled: bool) -> Self {
    self.options.lazy_images = enabled;
    self
  }

  /// Set the default image class.
  #[must_use]
  pub fn image_class<S: Into<String>>(mut self, class: S) -> Self {
    self.options.image_class = class.into();
    self
  }

  /// Set the base URL for relative image sources.
  #[must_use]
  pub fn asset_base_url<S: Into<String>>(mut self, url: Option<S>) -> Self {
    self.options.asset_base_url = url.map(Into::into);
    self
  }

  /// Enable or disable opening external links in a new tab.
  #[must_use]
  pub const fn external_links_new_tab(mut self, enabled: bool) -> Self {
    self.options.external_links_new_tab = enabled;
    self
  }

  /// Build the final `PipelineOptions`.
  #[must_use]
  pub fn build(self) -> PipelineOptions {
    self.options
  }
}

impl Default for PipelineOptionsBuilder {
  fn default() -> Self {
    Self::new()
  }
}

/// The content pipeline.
///
/// Holds configuration and the syntax highlighter only; no per-document
/// state survives a call. Can be cheaply cloned since it uses `Arc`
/// internally for the syntax manager, and shared across threads.
#[derive(Debug, Clone)]
pub struct ContentPipeline {
  pub(crate) options:        PipelineOptions,
  pub(crate) render_options: RenderOptions,
  pub(crate) syntax_manager: Option<Arc<SyntaxManager>>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let options = PipelineOptions::default();
    assert!(options.gfm);
    assert!(options.highlight_code);
    assert_eq!(options.max_excerpt_length, 150);
    assert_eq!(options.ellipsis, "...");
    assert_eq!(options.words_per_minute, 200);
    assert_eq!(options.image_class, "max-w-full h-auto rounded-lg shadow-md");
    assert!(options.external_links_new_tab);
  }

  #[test]
  fn test_builder() {
    let options = PipelineOptionsBuilder::new()
      .gfm(false)
      .highlight_code(false)
      .highlight_theme(Some("Nord"))
      .max_excerpt_length(80)
      .ellipsis("…")
      .words_per_minute(250)
      .lazy_images(false)
      .image_class("img")
      .asset_base_url(Some("/static"))
      .external_links_new_tab(false)
      .build();

    assert!(!options.gfm);
    assert!(!options.highlight_code);
    assert_eq!(options.highlight_theme.as_deref(), Some("Nord"));
    assert_eq!(options.max_excerpt_length, 80);
    assert_eq!(options.ellipsis, "…");
    assert_eq!(options.words_per_minute, 250);
    assert!(!options.lazy_images);
    assert_eq!(options.image_class, "img");
    assert_eq!(options.asset_base_url.as_deref(), Some("/static"));
    assert!(!options.external_links_new_tab);
  }

  #[test]
  fn test_derived_options() {
    let options = PipelineOptionsBuilder::new()
      .gfm(false)
      .lazy_images(false)
      .build();
    assert!(!options.parse_options().gfm);

    let render = options.render_options();
    assert!(!render.lazy_images);
    assert!(render.highlight_code);
  }
}
