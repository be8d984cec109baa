//! High-level processing functions with error recovery.
use log::{error, trace};
use rayon::prelude::*;

use super::types::{ContentPipeline, PipelineOptions};
use crate::{
  excerpt::excerpt,
  reading_time::reading_time,
  types::ArtifactBundle,
};

/// Process markdown content with error recovery.
///
/// Runs the pipeline and, should anything panic along the way, falls back to
/// a bundle whose HTML is the escaped source in a `<pre>` block. The excerpt
/// and reading time come from the raw source and are still filled in.
///
/// # Arguments
///
/// * `pipeline` - The configured content pipeline
/// * `content` - The raw markdown content to process
///
/// # Returns
///
/// An `ArtifactBundle`; never fails.
#[must_use]
pub fn process_with_recovery(
  pipeline: &ContentPipeline,
  content: &str,
) -> ArtifactBundle {
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    pipeline.process(content)
  })) {
    Ok(bundle) => bundle,
    Err(panic_err) => {
      error!("Panic during markdown processing: {panic_err:?}");
      fallback_bundle(pipeline.options(), content)
    },
  }
}

fn fallback_bundle(options: &PipelineOptions, content: &str) -> ArtifactBundle {
  let html = format!(
    "<pre class=\"language-text\"><code \
     class=\"language-text\">{}</code></pre>\n",
    html_escape::encode_text(content)
  );

  ArtifactBundle {
    html,
    outline: Vec::new(),
    excerpt: guarded_excerpt(content, |s| {
      excerpt(s, options.max_excerpt_length, &options.ellipsis)
    }),
    reading_time_minutes: reading_time(content, options.words_per_minute),
    title: None,
  }
}

/// Run `excerpt_fn`, leaving the excerpt empty if it panics.
///
/// The raw source is never used as a stand-in, since it has neither the
/// markup stripped nor the length bound applied.
fn guarded_excerpt<F>(content: &str, excerpt_fn: F) -> String
where
  F: FnOnce(&str) -> String,
{
  std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| excerpt_fn(content)))
    .unwrap_or_else(|_| {
      error!("Panic while building the excerpt, leaving it empty");
      String::new()
    })
}

/// Safely process content with error recovery.
///
/// Provides a safe wrapper around string transformations that may fail, and
/// ensures that fallback content is returned rather than complete failure.
///
/// # Arguments
///
/// * `content` - The content to process
/// * `processor_fn` - The processing function to apply
/// * `fallback` - Fallback content to use if processing fails
///
/// # Returns
///
/// The processed content, or `fallback` on panic (the original content when
/// `fallback` is empty).
pub fn process_safe<F>(content: &str, processor_fn: F, fallback: &str) -> String
where
  F: FnOnce(&str) -> String,
{
  // Avoid processing empty strings
  if content.is_empty() {
    return String::new();
  }

  let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    processor_fn(content)
  }));

  match result {
    Ok(processed_text) => processed_text,
    Err(e) => {
      if let Some(error_msg) = e.downcast_ref::<String>() {
        error!("Error processing content: {error_msg}");
      } else if let Some(error_msg) = e.downcast_ref::<&str>() {
        error!("Error processing content: {error_msg}");
      } else {
        error!("Unknown error occurred while processing content");
      }

      if fallback.is_empty() {
        content.to_string()
      } else {
        fallback.to_string()
      }
    },
  }
}

/// Process many documents in parallel with the same pipeline.
///
/// Results are returned in input order. Every document gets its own parse,
/// ids and registry, so documents never influence one another.
#[must_use]
pub fn process_batch<S>(
  pipeline: &ContentPipeline,
  documents: &[S],
) -> Vec<ArtifactBundle>
where
  S: AsRef<str> + Sync,
{
  trace!("Processing a batch of {} documents", documents.len());
  documents
    .par_iter()
    .map(|document| process_with_recovery(pipeline, document.as_ref()))
    .collect()
}

/// Create a pipeline with sensible defaults for common call sites.
///
/// # Arguments
///
/// * `preset` - The preset configuration to use
///
/// # Returns
///
/// A configured `ContentPipeline`
#[must_use]
pub fn create_processor(preset: ProcessorPreset) -> ContentPipeline {
  ContentPipeline::new(preset.options())
}

/// Preset configurations for common call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorPreset {
  /// Full article page: highlighting, image and link rewriting, long
  /// excerpt.
  Article,
  /// Listing cards and search: short excerpt, no highlighting.
  Listing,
  /// `CommonMark` only, nothing rewritten.
  Plain,
}

impl ProcessorPreset {
  /// The options this preset stands for.
  #[must_use]
  pub fn options(self) -> PipelineOptions {
    let defaults = PipelineOptions::default();
    match self {
      Self::Article => defaults,
      Self::Listing => {
        PipelineOptions {
          highlight_code: false,
          max_excerpt_length: 80,
          ..defaults
        }
      },
      Self::Plain => {
        PipelineOptions {
          gfm: false,
          highlight_code: false,
          lazy_images: false,
          external_links_new_tab: false,
          ..defaults
        }
      },
    }
  }
}

/// Process markdown content from a string with error recovery.
///
/// This is a convenience function that combines pipeline creation and
/// content processing in a single call.
///
/// # Arguments
/// * `content` - The markdown content to process
/// * `preset` - The processor preset to use
///
/// # Returns
/// An `ArtifactBundle` with the processed content
#[must_use]
pub fn process_markdown_string(
  content: &str,
  preset: ProcessorPreset,
) -> ArtifactBundle {
  let pipeline = create_processor(preset);
  process_with_recovery(&pipeline, content)
}
