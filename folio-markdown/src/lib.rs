//! # folio-markdown - the content pipeline for blog articles
//!
//! Turns one article written in Markdown into the artifacts the front end
//! needs: rendered HTML with highlighted code and lazy-loaded images, an
//! outline of headings whose ids match the HTML anchors, a plain-text
//! excerpt for listings and search, and a reading-time estimate.
//!
//! ## Quick Start
//!
//! ```rust
//! use folio_markdown::{ContentPipeline, PipelineOptions};
//!
//! let pipeline = ContentPipeline::new(PipelineOptions::default());
//! let bundle = pipeline.process("# Hello World\n\nThis is **bold** text.");
//!
//! assert_eq!(bundle.title.as_deref(), Some("Hello World"));
//! assert_eq!(bundle.outline[0].id, "hello-world");
//! assert!(bundle.html.contains("id=\"hello-world\""));
//! assert_eq!(bundle.excerpt, "Hello World This is bold text.");
//! ```
//!
//! ## Features
//!
//! - **Consistent anchors**: heading ids are assigned once per document and
//!   shared by the outline and the renderer
//! - **Graceful highlighting** through a pluggable [`SyntaxHighlighter`];
//!   unknown languages fall back to escaped plain code
//! - **Image rewriting** with lazy loading and a default responsive class,
//!   never overriding an author's class
//! - **Raw-source excerpts** that never leak code samples
//! - **Batch processing** on a rayon thread pool
//!
//! ## Configuration
//!
//! ```rust
//! use folio_markdown::{ContentPipeline, PipelineOptionsBuilder};
//!
//! let options = PipelineOptionsBuilder::new()
//!   .max_excerpt_length(80)
//!   .asset_base_url(Some("https://cdn.example.com"))
//!   .build();
//!
//! let pipeline = ContentPipeline::new(options);
//! ```
//!
//! Options can also be read from TOML or JSON with [`config::load_options`].

pub mod anchors;
pub mod config;
pub mod error;
pub mod excerpt;
pub mod outline;
pub mod parser;
pub mod processor;
pub mod reading_time;
pub mod render;
pub mod syntax;
pub mod types;
pub mod utils;

pub use crate::{
  anchors::{HeadingIds, IdRegistry, assign_heading_ids, slugify},
  error::{ConfigError, ConfigResult},
  excerpt::excerpt,
  outline::build_outline,
  parser::{NodeTree, parse},
  processor::{
    ContentPipeline,
    PipelineOptions,
    PipelineOptionsBuilder,
    ProcessorPreset,
    create_processor,
    process_batch,
    process_markdown_string,
    process_with_recovery,
  },
  reading_time::reading_time,
  render::render,
  syntax::{SyntaxError, SyntaxHighlighter, SyntaxManager},
  types::{ArtifactBundle, HeadingRecord, Outline},
};
