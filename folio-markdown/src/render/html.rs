//! HTML writer for a [`NodeTree`].
use std::sync::LazyLock;

use html_escape::{encode_double_quoted_attribute, encode_text};
use log::{debug, warn};
use regex::Regex;

use super::{
  RenderOptions,
  images::{image_tag, rewrite_img_tags},
};
use crate::{
  anchors::HeadingIds,
  parser::{Alignment, Block, Inline},
  syntax::SyntaxManager,
  utils::regex_or_never,
};

static SCRIPT_TAG_RE: LazyLock<Regex> =
  LazyLock::new(|| regex_or_never(r"(?i)<(/?\s*script)"));

/// Escape anything that would open or close a `<script>` element.
///
/// The rest of the fragment is left untouched.
#[must_use]
pub fn neutralize_scripts(html: &str) -> String {
  SCRIPT_TAG_RE.replace_all(html, "&lt;$1").into_owned()
}

/// Single-use writer holding the output buffer and the heading cursor.
pub(super) struct HtmlWriter<'a> {
  options: &'a RenderOptions,
  syntax:  Option<&'a SyntaxManager>,
  ids:     &'a HeadingIds,
  cursor:  usize,
  out:     String,
}

impl<'a> HtmlWriter<'a> {
  pub(super) const fn new(
    options: &'a RenderOptions,
    syntax: Option<&'a SyntaxManager>,
    ids: &'a HeadingIds,
  ) -> Self {
    Self {
      options,
      syntax,
      ids,
      cursor: 0,
      out: String::new(),
    }
  }

  pub(super) fn finish(self) -> String {
    if self.cursor != self.ids.len() {
      warn!(
        "Rendered {} headings but {} ids were supplied",
        self.cursor,
        self.ids.len()
      );
    }
    self.out
  }

  pub(super) fn blocks(&mut self, blocks: &[Block]) {
    for block in blocks {
      self.block(block);
    }
  }

  fn block(&mut self, block: &Block) {
    match block {
      Block::Heading { level, content } => self.heading(*level, content),
      Block::Paragraph(content) => {
        self.out.push_str("<p>");
        self.inlines(content);
        self.out.push_str("</p>\n");
      },
      Block::CodeBlock { language, code } => {
        self.code_block(language.as_deref(), code);
      },
      Block::List {
        ordered,
        start,
        tight,
        items,
      } => self.list(*ordered, *start, *tight, items),
      Block::Blockquote(children) => {
        self.out.push_str("<blockquote>\n");
        self.blocks(children);
        self.out.push_str("</blockquote>\n");
      },
      Block::ThematicBreak => self.out.push_str("<hr />\n"),
      Block::Table {
        alignments,
        header,
        rows,
      } => self.table(alignments, header, rows),
      Block::Html(raw) => {
        let html = self.raw_html(raw);
        self.out.push_str(&html);
      },
      Block::RawText(text) => {
        self.out.push_str("<p>");
        self.out.push_str(&encode_text(text));
        self.out.push_str("</p>\n");
      },
    }
  }

  fn heading(&mut self, level: u8, content: &[Inline]) {
    let index = self.cursor;
    self.cursor += 1;

    match self.ids.get(index) {
      Some(id) => {
        self.out.push_str(&format!(
          "<h{level} id=\"{}\">",
          encode_double_quoted_attribute(id)
        ));
      },
      None => {
        warn!("No id supplied for heading #{index}, rendering without one");
        self.out.push_str(&format!("<h{level}>"));
      },
    }

    self.inlines(content);
    self.out.push_str(&format!("</h{level}>\n"));
  }

  fn code_block(&mut self, language: Option<&str>, code: &str) {
    let highlighted = language
      .filter(|lang| !lang.is_empty())
      .and_then(|lang| self.highlight(code, lang).map(|html| (lang, html)));

    match highlighted {
      Some((lang, html)) => {
        let class = encode_double_quoted_attribute(lang);
        self.out.push_str(&format!(
          "<pre class=\"language-{class}\"><code \
           class=\"language-{class}\">{html}</code></pre>\n"
        ));
      },
      None => {
        self.out.push_str(
          "<pre class=\"language-text\"><code class=\"language-text\">",
        );
        self.out.push_str(&encode_text(code));
        self.out.push_str("</code></pre>\n");
      },
    }
  }

  /// Highlighted markup for `code`, or `None` when it should be emitted
  /// as plain text.
  fn highlight(&self, code: &str, language: &str) -> Option<String> {
    if !self.options.highlight_code {
      return None;
    }

    let manager = self.syntax?;
    match manager.highlight_code(code, language) {
      Ok(html) => Some(html),
      Err(e) => {
        debug!("Code block tagged '{language}' left unhighlighted: {e}");
        None
      },
    }
  }

  fn list(
    &mut self,
    ordered: bool,
    start: usize,
    tight: bool,
    items: &[Vec<Block>],
  ) {
    let tag = if ordered { "ol" } else { "ul" };
    if ordered && start != 1 {
      self.out.push_str(&format!("<ol start=\"{start}\">\n"));
    } else {
      self.out.push_str(&format!("<{tag}>\n"));
    }

    for item in items {
      self.out.push_str("<li>");
      for (i, block) in item.iter().enumerate() {
        match block {
          Block::Paragraph(content) if tight => {
            self.inlines(content);
            if i + 1 < item.len() {
              self.out.push('\n');
            }
          },
          _ => {
            if i == 0 {
              self.out.push('\n');
            }
            self.block(block);
          },
        }
      }
      self.out.push_str("</li>\n");
    }

    self.out.push_str(&format!("</{tag}>\n"));
  }

  fn table(
    &mut self,
    alignments: &[Alignment],
    header: &[Vec<Inline>],
    rows: &[Vec<Vec<Inline>>],
  ) {
    self.out.push_str("<table>\n<thead>\n");
    self.table_row("th", alignments, header);
    self.out.push_str("</thead>\n");

    if !rows.is_empty() {
      self.out.push_str("<tbody>\n");
      for row in rows {
        self.table_row("td", alignments, row);
      }
      self.out.push_str("</tbody>\n");
    }

    self.out.push_str("</table>\n");
  }

  fn table_row(
    &mut self,
    cell_tag: &str,
    alignments: &[Alignment],
    cells: &[Vec<Inline>],
  ) {
    self.out.push_str("<tr>\n");
    for (i, cell) in cells.iter().enumerate() {
      let align = alignments.get(i).copied().unwrap_or_default().as_attr();
      match align {
        Some(align) => {
          self
            .out
            .push_str(&format!("<{cell_tag} align=\"{align}\">"));
        },
        None => self.out.push_str(&format!("<{cell_tag}>")),
      }
      self.inlines(cell);
      self.out.push_str(&format!("</{cell_tag}>\n"));
    }
    self.out.push_str("</tr>\n");
  }

  fn inlines(&mut self, inlines: &[Inline]) {
    for inline in inlines {
      self.inline(inline);
    }
  }

  fn inline(&mut self, inline: &Inline) {
    match inline {
      Inline::Text(text) => self.out.push_str(&encode_text(text)),
      Inline::Code(code) => {
        self.out.push_str("<code>");
        self.out.push_str(&encode_text(code));
        self.out.push_str("</code>");
      },
      Inline::Emphasis(children) => self.wrapped("em", children),
      Inline::Strong(children) => self.wrapped("strong", children),
      Inline::Strikethrough(children) => self.wrapped("del", children),
      Inline::Link {
        href,
        title,
        content,
      } => self.link(href, title.as_deref(), content),
      Inline::Image {
        src,
        alt,
        title,
        class,
      } => {
        let tag = image_tag(
          src,
          alt,
          title.as_deref(),
          class.as_deref(),
          self.options,
        );
        self.out.push_str(&tag);
      },
      Inline::SoftBreak => self.out.push('\n'),
      Inline::LineBreak => self.out.push_str("<br />\n"),
      Inline::Html(raw) => {
        let html = self.raw_html(raw);
        self.out.push_str(&html);
      },
    }
  }

  fn wrapped(&mut self, tag: &str, children: &[Inline]) {
    self.out.push_str(&format!("<{tag}>"));
    self.inlines(children);
    self.out.push_str(&format!("</{tag}>"));
  }

  fn link(&mut self, href: &str, title: Option<&str>, content: &[Inline]) {
    self.out.push_str("<a href=\"");
    self.out.push_str(&encode_double_quoted_attribute(href));
    self.out.push('"');

    if let Some(title) = title {
      self.out.push_str(" title=\"");
      self.out.push_str(&encode_double_quoted_attribute(title));
      self.out.push('"');
    }

    if self.options.external_links_new_tab && is_external(href) {
      self.out.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
    }

    self.out.push('>');
    self.inlines(content);
    self.out.push_str("</a>");
  }

  fn raw_html(&self, raw: &str) -> String {
    rewrite_img_tags(&neutralize_scripts(raw), self.options)
  }
}

fn is_external(href: &str) -> bool {
  href.starts_with("http://") || href.starts_with("https://")
}
