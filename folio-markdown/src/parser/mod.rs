//! Block parser: raw Markdown to an owned [`NodeTree`].
//!
//! Tokenizing is delegated to `comrak`; this module converts comrak's arena
//! AST into the crate's own node shape so that every later stage (outline,
//! renderer) works on plain owned data. Parsing never fails: malformed input
//! degrades to a best-effort tree (an unterminated fence runs to the end of
//! the document) and node kinds the tree does not model are kept as
//! [`Block::RawText`] instead of being dropped.
pub mod nodes;

use std::sync::LazyLock;

use comrak::{
  Arena,
  nodes::{AstNode, ListType, NodeValue, TableAlignment},
  options::Options,
  parse_document,
};
use log::trace;
use regex::Regex;

pub use self::nodes::{Alignment, Block, HeadingRef, Inline, NodeTree};
use crate::utils;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
  /// Enable GitHub Flavored Markdown: tables, strikethrough and autolinks.
  pub gfm: bool,

  /// Recognise `{.class}` directly after an image as an explicit class.
  pub image_attributes: bool,
}

impl Default for ParseOptions {
  fn default() -> Self {
    Self {
      gfm:              true,
      image_attributes: true,
    }
  }
}

/// Parse Markdown with the default options.
#[must_use]
pub fn parse(markdown: &str) -> NodeTree {
  parse_with_options(markdown, &ParseOptions::default())
}

/// Parse Markdown into a [`NodeTree`].
#[must_use]
pub fn parse_with_options(markdown: &str, options: &ParseOptions) -> NodeTree {
  let arena = Arena::new();
  let comrak_options = comrak_options(options);
  let root = parse_document(&arena, markdown, &comrak_options);

  let converter = Converter { options };
  let blocks = converter.blocks(root);
  trace!("Parsed {} top-level blocks", blocks.len());
  NodeTree::new(blocks)
}

/// Build comrak options from [`ParseOptions`].
fn comrak_options(options: &ParseOptions) -> Options<'static> {
  let mut comrak = Options::default();
  if options.gfm {
    comrak.extension.table = true;
    comrak.extension.strikethrough = true;
    comrak.extension.autolink = true;
  }
  // Raw HTML is kept in the AST; the renderer decides what to emit
  comrak.render.r#unsafe = true;
  comrak
}

struct Converter<'o> {
  options: &'o ParseOptions,
}

impl Converter<'_> {
  /// Convert the block children of `node`.
  fn blocks<'a>(&self, node: &'a AstNode<'a>) -> Vec<Block> {
    node.children().filter_map(|child| self.block(child)).collect()
  }

  fn block<'a>(&self, node: &'a AstNode<'a>) -> Option<Block> {
    let value = node.data.borrow().value.clone();
    let block = match value {
      NodeValue::Heading(heading) => {
        Block::Heading {
          level:   heading.level.clamp(1, 6),
          content: self.inlines(node),
        }
      },
      NodeValue::Paragraph => Block::Paragraph(self.inlines(node)),
      NodeValue::CodeBlock(code) => {
        let language = code
          .info
          .split_whitespace()
          .next()
          .map(str::to_string)
          .filter(|lang| !lang.is_empty());
        Block::CodeBlock {
          language,
          code: code.literal.clone(),
        }
      },
      NodeValue::List(list) => {
        let items = node
          .children()
          .map(|item| self.blocks(item))
          .collect::<Vec<_>>();
        Block::List {
          ordered: list.list_type == ListType::Ordered,
          start: list.start,
          tight: list.tight,
          items,
        }
      },
      NodeValue::BlockQuote => Block::Blockquote(self.blocks(node)),
      NodeValue::ThematicBreak => Block::ThematicBreak,
      NodeValue::HtmlBlock(html) => Block::Html(html.literal.clone()),
      NodeValue::Table(table) => self.table(node, &table.alignments),
      // Link reference definitions and similar leave nothing to render
      NodeValue::FrontMatter(_) => return None,
      _ => {
        let text = collect_text(node);
        if text.trim().is_empty() {
          return None;
        }
        Block::RawText(text)
      },
    };
    Some(block)
  }

  fn table<'a>(
    &self,
    node: &'a AstNode<'a>,
    alignments: &[TableAlignment],
  ) -> Block {
    let alignments = alignments
      .iter()
      .map(|alignment| {
        match alignment {
          TableAlignment::Left => Alignment::Left,
          TableAlignment::Center => Alignment::Center,
          TableAlignment::Right => Alignment::Right,
          TableAlignment::None => Alignment::None,
        }
      })
      .collect();

    let mut header = Vec::new();
    let mut rows = Vec::new();
    for row in node.children() {
      let is_header =
        matches!(row.data.borrow().value, NodeValue::TableRow(true));
      let cells = row
        .children()
        .map(|cell| self.inlines(cell))
        .collect::<Vec<_>>();
      if is_header && header.is_empty() {
        header = cells;
      } else {
        rows.push(cells);
      }
    }

    Block::Table {
      alignments,
      header,
      rows,
    }
  }

  /// Convert the inline children of `node`.
  fn inlines<'a>(&self, node: &'a AstNode<'a>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::new();
    for child in node.children() {
      let Some(inline) = self.inline(child) else {
        continue;
      };
      // Merge adjacent text so attribute syntax is never split across nodes
      if let (Some(Inline::Text(prev)), Inline::Text(next)) =
        (out.last_mut(), &inline)
      {
        prev.push_str(next);
        continue;
      }
      out.push(inline);
    }

    if self.options.image_attributes {
      attach_image_classes(&mut out);
    }
    out
  }

  fn inline<'a>(&self, node: &'a AstNode<'a>) -> Option<Inline> {
    let value = node.data.borrow().value.clone();
    let inline = match value {
      NodeValue::Text(text) => Inline::Text(text.to_string()),
      NodeValue::Code(code) => Inline::Code(code.literal.clone()),
      NodeValue::Emph => Inline::Emphasis(self.inlines(node)),
      NodeValue::Strong => Inline::Strong(self.inlines(node)),
      NodeValue::Strikethrough => Inline::Strikethrough(self.inlines(node)),
      NodeValue::Link(link) => {
        Inline::Link {
          href:    link.url.clone(),
          title:   non_empty(&link.title),
          content: self.inlines(node),
        }
      },
      NodeValue::Image(link) => {
        Inline::Image {
          src:   link.url.clone(),
          alt:   collect_text(node),
          title: non_empty(&link.title),
          class: None,
        }
      },
      NodeValue::SoftBreak => Inline::SoftBreak,
      NodeValue::LineBreak => Inline::LineBreak,
      NodeValue::HtmlInline(html) => Inline::Html(html.to_string()),
      _ => {
        let text = collect_text(node);
        if text.is_empty() {
          return None;
        }
        Inline::Text(text)
      },
    };
    Some(inline)
  }
}

/// Move a `{.class .other}` suffix that directly follows an image into the
/// image's explicit class.
fn attach_image_classes(inlines: &mut [Inline]) {
  static ATTRIBUTES_RE: LazyLock<Regex> = LazyLock::new(|| {
    utils::regex_or_never(r"^\{\s*((?:\.[\w-]+\s*)+)\}")
  });

  for i in 1..inlines.len() {
    let (before, after) = inlines.split_at_mut(i);
    let (Some(Inline::Image { class, .. }), Some(Inline::Text(text))) =
      (before.last_mut(), after.first_mut())
    else {
      continue;
    };
    if class.is_some() {
      continue;
    }

    let Some(caps) = ATTRIBUTES_RE.captures(text) else {
      continue;
    };
    let classes = caps[1]
      .split_whitespace()
      .map(|c| c.trim_start_matches('.'))
      .collect::<Vec<_>>()
      .join(" ");
    let consumed = caps[0].len();
    *class = Some(classes);
    text.replace_range(..consumed, "");
  }
}

/// Collect all text below `node`, used for image alt text and for node kinds
/// the tree does not model.
fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
  let mut text = String::new();
  for descendant in node.descendants() {
    match &descendant.data.borrow().value {
      NodeValue::Text(t) => text.push_str(t),
      NodeValue::Code(code) => text.push_str(&code.literal),
      NodeValue::CodeBlock(code) => text.push_str(&code.literal),
      NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
      _ => {},
    }
  }
  text
}

fn non_empty(s: &str) -> Option<String> {
  (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn text(s: &str) -> Inline {
    Inline::Text(s.to_string())
  }

  #[test]
  fn test_parse_heading_levels() {
    let tree = parse("# One\n\n###### Six\n");
    assert_eq!(tree.blocks, vec![
      Block::Heading {
        level:   1,
        content: vec![text("One")],
      },
      Block::Heading {
        level:   6,
        content: vec![text("Six")],
      },
    ]);
  }

  #[test]
  fn test_parse_fenced_code_with_language() {
    let tree = parse("```rust\nfn main() {}\n```\n");
    assert_eq!(tree.blocks, vec![Block::CodeBlock {
      language: Some("rust".to_string()),
      code:     "fn main() {}\n".to_string(),
    }]);
  }

  #[test]
  fn test_parse_fenced_code_without_language() {
    let tree = parse("```\nplain\n```\n");
    assert_eq!(tree.blocks, vec![Block::CodeBlock {
      language: None,
      code:     "plain\n".to_string(),
    }]);
  }

  #[test]
  fn test_code_literal_is_not_escaped() {
    let tree = parse("```html\n<div>&amp;</div>\n```\n");
    let Some(Block::CodeBlock { code, .. }) = tree.blocks.first() else {
      unreachable!("expected a code block");
    };
    assert_eq!(code, "<div>&amp;</div>\n");
  }

  #[test]
  fn test_unterminated_fence_runs_to_end() {
    let tree = parse("Intro\n\n```js\nlet a = 1;\n\n# not a heading\n");
    assert_eq!(tree.blocks.len(), 2);
    let Some(Block::CodeBlock { language, code }) = tree.blocks.get(1) else {
      unreachable!("expected a code block");
    };
    assert_eq!(language.as_deref(), Some("js"));
    assert!(code.contains("# not a heading"));
    assert!(tree.headings().is_empty());
  }

  #[test]
  fn test_parse_lists() {
    let tree = parse("3. three\n4. four\n\n- a\n- b\n");
    let [
      Block::List {
        ordered: true,
        start: 3,
        items: ordered,
        ..
      },
      Block::List {
        ordered: false,
        items: bullets,
        tight: true,
        ..
      },
    ] = tree.blocks.as_slice()
    else {
      unreachable!("unexpected tree: {tree:?}");
    };
    assert_eq!(ordered.len(), 2);
    assert_eq!(bullets.len(), 2);
  }

  #[test]
  fn test_parse_blockquote_and_rule() {
    let tree = parse("> quoted\n\n---\n");
    assert_eq!(tree.blocks, vec![
      Block::Blockquote(vec![Block::Paragraph(vec![text("quoted")])]),
      Block::ThematicBreak,
    ]);
  }

  #[test]
  fn test_parse_inline_constructs() {
    let tree = parse("*em* **strong** `code` [link](/x \"T\") ![alt](a.png)");
    let Some(Block::Paragraph(inlines)) = tree.blocks.first() else {
      unreachable!("expected a paragraph");
    };
    assert_eq!(inlines, &vec![
      Inline::Emphasis(vec![text("em")]),
      text(" "),
      Inline::Strong(vec![text("strong")]),
      text(" "),
      Inline::Code("code".to_string()),
      text(" "),
      Inline::Link {
        href:    "/x".to_string(),
        title:   Some("T".to_string()),
        content: vec![text("link")],
      },
      text(" "),
      Inline::Image {
        src:   "a.png".to_string(),
        alt:   "alt".to_string(),
        title: None,
        class: None,
      },
    ]);
  }

  #[test]
  fn test_image_attribute_class() {
    let tree = parse("![hero](h.png){.wide .rounded} caption");
    let Some(Block::Paragraph(inlines)) = tree.blocks.first() else {
      unreachable!("expected a paragraph");
    };
    assert_eq!(inlines, &vec![
      Inline::Image {
        src:   "h.png".to_string(),
        alt:   "hero".to_string(),
        title: None,
        class: Some("wide rounded".to_string()),
      },
      text(" caption"),
    ]);
  }

  #[test]
  fn test_image_attribute_disabled() {
    let options = ParseOptions {
      image_attributes: false,
      ..ParseOptions::default()
    };
    let tree = parse_with_options("![a](b.png){.c}", &options);
    let Some(Block::Paragraph(inlines)) = tree.blocks.first() else {
      unreachable!("expected a paragraph");
    };
    assert!(matches!(inlines.first(), Some(Inline::Image { class: None, .. })));
    assert_eq!(inlines.get(1), Some(&text("{.c}")));
  }

  #[test]
  fn test_parse_table() {
    let tree = parse("| a | b |\n|:--|--:|\n| 1 | 2 |\n");
    let Some(Block::Table {
      alignments,
      header,
      rows,
    }) = tree.blocks.first()
    else {
      unreachable!("expected a table");
    };
    assert_eq!(alignments, &vec![Alignment::Left, Alignment::Right]);
    assert_eq!(header.len(), 2);
    assert_eq!(rows.len(), 1);
  }

  #[test]
  fn test_tables_need_gfm() {
    let options = ParseOptions {
      gfm: false,
      ..ParseOptions::default()
    };
    let tree = parse_with_options("| a |\n|---|\n| 1 |\n", &options);
    assert!(matches!(tree.blocks.first(), Some(Block::Paragraph(_))));
  }

  #[test]
  fn test_html_block_kept_verbatim() {
    let tree = parse("<div class=\"note\">hi</div>\n");
    assert_eq!(tree.blocks, vec![Block::Html(
      "<div class=\"note\">hi</div>\n".to_string()
    )]);
  }

  #[test]
  fn test_empty_input() {
    assert!(parse("").is_empty());
    assert!(parse("\n\n   \n").is_empty());
  }
}
