//! Core implementation of the content pipeline.
//!
//! One call to [`ContentPipeline::process`] parses the document once,
//! assigns heading ids once and hands the same ids to both the outline
//! builder and the renderer. The excerpt and reading time are computed from
//! the raw source.
use std::sync::Arc;

use log::{debug, trace, warn};

use super::types::{ContentPipeline, PipelineOptions};
use crate::{
  anchors::HeadingIds,
  excerpt::excerpt,
  outline::{build_outline, document_title},
  parser::parse_with_options,
  reading_time::reading_time,
  render::Renderer,
  syntax::{SyntaxManager, SyntaxResult, create_default_manager},
  types::ArtifactBundle,
};

impl ContentPipeline {
  /// Create a new `ContentPipeline` with the given options.
  ///
  /// When highlighting is enabled the default backend is loaded; if none is
  /// available, code blocks are rendered unhighlighted.
  #[must_use]
  pub fn new(options: PipelineOptions) -> Self {
    let syntax_manager = if options.highlight_code {
      match create_default_manager() {
        Ok(manager) => Some(Arc::new(manager)),
        Err(e) => {
          warn!("Syntax highlighting disabled: {e}");
          None
        },
      }
    } else {
      None
    };

    Self::with_syntax_manager(options, syntax_manager)
  }

  /// Create a pipeline around an existing syntax manager.
  ///
  /// Useful to share one manager between pipelines or to plug in a custom
  /// [`SyntaxHighlighter`](crate::syntax::SyntaxHighlighter).
  #[must_use]
  pub fn with_syntax_manager(
    options: PipelineOptions,
    syntax_manager: Option<Arc<SyntaxManager>>,
  ) -> Self {
    let render_options = options.render_options();
    Self {
      options,
      render_options,
      syntax_manager,
    }
  }

  /// Access pipeline options.
  #[must_use]
  pub const fn options(&self) -> &PipelineOptions {
    &self.options
  }

  /// The syntax manager in use, if highlighting is available.
  #[must_use]
  pub fn syntax_manager(&self) -> Option<&SyntaxManager> {
    self.syntax_manager.as_deref()
  }

  /// Derive every artifact from `markdown`.
  #[must_use]
  pub fn process(&self, markdown: &str) -> ArtifactBundle {
    trace!("Processing {} bytes of markdown", markdown.len());

    let tree = parse_with_options(markdown, &self.options.parse_options());
    let ids = HeadingIds::assign(&tree);
    trace!("Assigned {} heading ids", ids.len());

    let outline = build_outline(&tree, &ids);
    let html = Renderer::new(&self.render_options)
      .with_syntax(self.syntax_manager())
      .render(&tree, &ids);
    let title = document_title(&outline);

    ArtifactBundle {
      html,
      outline,
      excerpt: self.excerpt(markdown),
      reading_time_minutes: self.reading_time(markdown),
      title,
    }
  }

  /// Plain-text excerpt of `markdown` using the configured length and
  /// ellipsis.
  #[must_use]
  pub fn excerpt(&self, markdown: &str) -> String {
    excerpt(
      markdown,
      self.options.max_excerpt_length,
      &self.options.ellipsis,
    )
  }

  /// Reading time of `markdown` at the configured speed.
  #[must_use]
  pub fn reading_time(&self, markdown: &str) -> usize {
    reading_time(markdown, self.options.words_per_minute)
  }

  /// CSS for the classes emitted by the highlighter, using the configured
  /// theme.
  ///
  /// Returns an empty string when highlighting is unavailable.
  ///
  /// # Errors
  ///
  /// Returns an error if the configured theme does not exist.
  pub fn highlight_stylesheet(&self) -> SyntaxResult<String> {
    let Some(manager) = self.syntax_manager() else {
      debug!("No syntax manager, returning an empty stylesheet");
      return Ok(String::new());
    };
    manager.stylesheet(self.options.highlight_theme.as_deref())
  }
}

impl Default for ContentPipeline {
  fn default() -> Self {
    Self::new(PipelineOptions::default())
  }
}
