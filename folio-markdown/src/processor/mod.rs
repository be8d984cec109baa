//! The content pipeline: bundle assembly, presets and batch processing.
//!
//! # Architecture
//!
//! - [`core`]: `ContentPipeline` and the single-document pipeline
//! - [`process`]: high-level processing functions with error recovery
//! - [`types`]: configuration structures and the pipeline struct
pub mod core;
pub mod process;
pub mod types;

pub use process::{
  ProcessorPreset,
  create_processor,
  process_batch,
  process_markdown_string,
  process_safe,
  process_with_recovery,
};
pub use types::{ContentPipeline, PipelineOptions, PipelineOptionsBuilder};

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_pipeline_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ContentPipeline>();
  }

  #[test]
  fn test_deterministic_output() {
    let pipeline = create_processor(ProcessorPreset::Listing);
    let markdown = "# A\n\n## A\n\n![x](y.png)\n\n> ## A\n";
    assert_eq!(pipeline.process(markdown), pipeline.process(markdown));
  }
}
