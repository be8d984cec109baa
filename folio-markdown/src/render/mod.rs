//! HTML rendering of a parsed document.
//!
//! The renderer never derives heading ids itself. It is handed the
//! [`HeadingIds`] computed for the document and attaches the `k`-th id to the
//! `k`-th heading it meets, walking the tree in the same pre-order as
//! [`NodeTree::headings`]. That shared order is what keeps every outline
//! anchor present in the HTML.
//!
//! Code blocks are highlighted through a [`SyntaxManager`] when one is
//! supplied; anything the backend cannot handle is emitted escaped under
//! `language-text`.
mod html;
mod images;

pub use html::neutralize_scripts;
pub use images::{image_tag, resolve_asset_url, rewrite_img_tags};
use log::trace;

use crate::{anchors::HeadingIds, parser::NodeTree, syntax::SyntaxManager};

/// Default sizing class for images without an explicit author class.
pub const DEFAULT_IMAGE_CLASS: &str = "max-w-full h-auto rounded-lg shadow-md";

/// Rendering switches, usually derived from the pipeline options.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Config struct with related boolean flags"
)]
pub struct RenderOptions {
  /// Highlight fenced code blocks with a known language.
  pub highlight_code: bool,

  /// Add `loading="lazy"` and the default class to images.
  pub lazy_images: bool,

  /// Class given to images that carry none of their own.
  pub image_class: String,

  /// Base URL prepended to relative image sources.
  pub asset_base_url: Option<String>,

  /// Open `http(s)` links in a new tab.
  pub external_links_new_tab: bool,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      highlight_code:         true,
      lazy_images:            true,
      image_class:            DEFAULT_IMAGE_CLASS.to_string(),
      asset_base_url:         None,
      external_links_new_tab: true,
    }
  }
}

/// Renders node trees to HTML.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
  options: &'a RenderOptions,
  syntax:  Option<&'a SyntaxManager>,
}

impl<'a> Renderer<'a> {
  #[must_use]
  pub const fn new(options: &'a RenderOptions) -> Self {
    Self {
      options,
      syntax: None,
    }
  }

  /// Use `manager` to highlight code blocks.
  #[must_use]
  pub const fn with_syntax(mut self, manager: Option<&'a SyntaxManager>) -> Self {
    self.syntax = manager;
    self
  }

  /// Render `tree`, attaching `ids` to its headings in document order.
  #[must_use]
  pub fn render(&self, tree: &NodeTree, ids: &HeadingIds) -> String {
    trace!("Rendering {} top-level blocks", tree.blocks.len());
    let mut writer = html::HtmlWriter::new(self.options, self.syntax, ids);
    writer.blocks(&tree.blocks);
    writer.finish()
  }
}

/// Render `tree` with default options and no highlighter.
#[must_use]
pub fn render(tree: &NodeTree, ids: &HeadingIds) -> String {
  Renderer::new(&RenderOptions::default()).render(tree, ids)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    parser::parse,
    syntax::{SyntaxHighlighter, SyntaxResult},
  };

  fn render_md(markdown: &str) -> String {
    let tree = parse(markdown);
    render(&tree, &HeadingIds::assign(&tree))
  }

  /// Wraps every line in a span; knows only "upper".
  struct UpperHighlighter;

  impl SyntaxHighlighter for UpperHighlighter {
    fn name(&self) -> &'static str {
      "Upper"
    }

    fn supported_languages(&self) -> Vec<String> {
      vec!["upper".to_string()]
    }

    fn available_themes(&self) -> Vec<String> {
      Vec::new()
    }

    fn highlight(&self, code: &str, _language: &str) -> SyntaxResult<String> {
      Ok(format!(
        "<span class=\"upper\">{}</span>",
        html_escape::encode_text(&code.to_uppercase())
      ))
    }

    fn stylesheet(&self, _theme: Option<&str>) -> SyntaxResult<String> {
      Ok(".upper { font-weight: bold; }".to_string())
    }
  }

  #[test]
  fn test_heading_ids_attached() {
    let html = render_md("# Intro\n\n## Intro\n\n## Setup\n");
    assert_eq!(
      html,
      "<h1 id=\"intro\">Intro</h1>\n<h2 id=\"intro-2\">Intro</h2>\n<h2 \
       id=\"setup\">Setup</h2>\n"
    );
  }

  #[test]
  fn test_nested_heading_gets_its_id() {
    let html = render_md("# A\n\n> # A\n");
    assert!(html.contains("<blockquote>\n<h1 id=\"a-2\">A</h1>\n</blockquote>"));
  }

  #[test]
  fn test_missing_id_omits_attribute() {
    let tree = parse("# One\n\n# Two\n");
    let html = render(&tree, &HeadingIds::from(vec!["one".to_string()]));
    assert!(html.contains("<h1 id=\"one\">One</h1>"));
    assert!(html.contains("<h1>Two</h1>"));
  }

  #[test]
  fn test_paragraph_and_inlines() {
    let html = render_md("Some *em*, **strong**, `a < b` and ~~old~~.\n");
    assert_eq!(
      html,
      "<p>Some <em>em</em>, <strong>strong</strong>, <code>a &lt; b</code> and \
       <del>old</del>.</p>\n"
    );
  }

  #[test]
  fn test_text_is_escaped() {
    let html = render_md("Fish & chips <3\n");
    assert!(html.contains("Fish &amp; chips &lt;3"));
  }

  #[test]
  fn test_code_block_fallback_escapes_once() {
    let html = render_md("```\nif a < b && c {}\n```\n");
    assert_eq!(
      html,
      "<pre class=\"language-text\"><code class=\"language-text\">if a &lt; b \
       &amp;&amp; c {}\n</code></pre>\n"
    );
  }

  #[test]
  fn test_code_block_with_stub_highlighter() {
    let manager = SyntaxManager::with_highlighter(Box::new(UpperHighlighter));
    let options = RenderOptions::default();
    let renderer = Renderer::new(&options).with_syntax(Some(&manager));

    let tree = parse("```upper\nhi <b>\n```\n\n```made-up-lang\nx\n```\n");
    let html = renderer.render(&tree, &HeadingIds::assign(&tree));

    assert!(html.contains(
      "<pre class=\"language-upper\"><code class=\"language-upper\"><span \
       class=\"upper\">HI &lt;B&gt;\n</span></code></pre>"
    ));
    assert!(html.contains(
      "<pre class=\"language-text\"><code class=\"language-text\">x\n</code></pre>"
    ));
  }

  #[test]
  fn test_highlighting_disabled() {
    let manager = SyntaxManager::with_highlighter(Box::new(UpperHighlighter));
    let options = RenderOptions {
      highlight_code: false,
      ..RenderOptions::default()
    };
    let tree = parse("```upper\nhi\n```\n");
    let html = Renderer::new(&options)
      .with_syntax(Some(&manager))
      .render(&tree, &HeadingIds::default());
    assert!(html.contains("language-text"));
    assert!(!html.contains("HI"));
  }

  #[test]
  fn test_lists() {
    assert_eq!(
      render_md("- a\n- b\n"),
      "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n"
    );
    assert_eq!(
      render_md("3. x\n4. y\n"),
      "<ol start=\"3\">\n<li>x</li>\n<li>y</li>\n</ol>\n"
    );
    assert_eq!(
      render_md("- a\n\n- b\n"),
      "<ul>\n<li>\n<p>a</p>\n</li>\n<li>\n<p>b</p>\n</li>\n</ul>\n"
    );
  }

  #[test]
  fn test_blockquote_and_rule() {
    assert_eq!(
      render_md("> quoted\n\n---\n"),
      "<blockquote>\n<p>quoted</p>\n</blockquote>\n<hr />\n"
    );
  }

  #[test]
  fn test_external_links() {
    let html = render_md("[site](https://example.com) and [about](/about)\n");
    assert!(html.contains(
      "<a href=\"https://example.com\" target=\"_blank\" rel=\"noopener \
       noreferrer\">site</a>"
    ));
    assert!(html.contains("<a href=\"/about\">about</a>"));

    let options = RenderOptions {
      external_links_new_tab: false,
      ..RenderOptions::default()
    };
    let tree = parse("[site](https://example.com)\n");
    let html = Renderer::new(&options).render(&tree, &HeadingIds::default());
    assert!(!html.contains("target="));
  }

  #[test]
  fn test_images() {
    let html = render_md("![alt](a.png)\n");
    assert!(html.contains("loading=\"lazy\""));
    assert!(html.contains("class=\"max-w-full h-auto rounded-lg shadow-md\""));

    let html = render_md("![alt](a.png){.hero}\n");
    assert!(html.contains("class=\"hero\""));
    assert!(!html.contains("max-w-full"));
  }

  #[test]
  fn test_table() {
    let html = render_md("| a | b |\n|:--|--:|\n| 1 | 2 |\n");
    assert_eq!(
      html,
      "<table>\n<thead>\n<tr>\n<th align=\"left\">a</th>\n<th \
       align=\"right\">b</th>\n</tr>\n</thead>\n<tbody>\n<tr>\n<td \
       align=\"left\">1</td>\n<td align=\"right\">2</td>\n</tr>\n</tbody>\n</table>\n"
    );
  }

  #[test]
  fn test_script_is_escaped() {
    let html = render_md("<script>alert(1)</script>\n\ninline <script>x</script>\n");
    assert!(!html.contains("<script"));
    assert!(!html.contains("</script"));
    assert!(html.contains("&lt;script>alert(1)"));
  }

  #[test]
  fn test_raw_html_passes_through() {
    let html = render_md("<div class=\"note\">\n<img src=\"x.png\">\n</div>\n");
    assert!(html.contains("<div class=\"note\">"));
    assert!(html.contains("<img src=\"x.png\" loading=\"lazy\""));
  }
}
