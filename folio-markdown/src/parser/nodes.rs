//! Owned node tree produced by the block parser.
//!
//! The tree is a plain ordered sequence of top-level [`Block`]s. Lists and
//! block quotes nest further blocks; paragraphs, headings and table cells
//! carry [`Inline`] content. Nothing here borrows from the parser's arena, so
//! a [`NodeTree`] can be handed to any number of consumers after parsing.

/// Horizontal alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
  #[default]
  None,
  Left,
  Center,
  Right,
}

impl Alignment {
  /// Value of the `align` attribute, if any.
  #[must_use]
  pub const fn as_attr(self) -> Option<&'static str> {
    match self {
      Self::None => None,
      Self::Left => Some("left"),
      Self::Center => Some("center"),
      Self::Right => Some("right"),
    }
  }
}

/// Block-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
  /// ATX or setext heading, level 1-6.
  Heading { level: u8, content: Vec<Inline> },

  Paragraph(Vec<Inline>),

  /// Fenced or indented code. `code` is the literal source, never
  /// entity-escaped.
  CodeBlock {
    language: Option<String>,
    code:     String,
  },

  /// Ordered or bullet list. Each item is its own sequence of blocks.
  List {
    ordered: bool,
    start:   usize,
    tight:   bool,
    items:   Vec<Vec<Self>>,
  },

  Blockquote(Vec<Self>),

  ThematicBreak,

  /// GFM table.
  Table {
    alignments: Vec<Alignment>,
    header:     Vec<Vec<Inline>>,
    rows:       Vec<Vec<Vec<Inline>>>,
  },

  /// Author-supplied HTML block, kept verbatim.
  Html(String),

  /// Anything the parser does not model, flattened to its text.
  RawText(String),
}

/// Inline-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
  Text(String),
  Code(String),
  Emphasis(Vec<Self>),
  Strong(Vec<Self>),
  Strikethrough(Vec<Self>),
  Link {
    href:    String,
    title:   Option<String>,
    content: Vec<Self>,
  },
  Image {
    src:   String,
    alt:   String,
    title: Option<String>,
    /// Explicit author class from `{.class}` attribute syntax.
    class: Option<String>,
  },
  SoftBreak,
  LineBreak,
  /// Author-supplied inline HTML, kept verbatim.
  Html(String),
}

/// Ordered sequence of top-level blocks, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeTree {
  pub blocks: Vec<Block>,
}

/// A heading found while walking a tree.
#[derive(Debug, Clone, Copy)]
pub struct HeadingRef<'a> {
  pub level:   u8,
  pub content: &'a [Inline],
}

impl NodeTree {
  #[must_use]
  pub const fn new(blocks: Vec<Block>) -> Self {
    Self { blocks }
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.blocks.is_empty()
  }

  /// All headings in document order, including those nested inside lists
  /// and block quotes.
  ///
  /// This is the single traversal order used for anchor assignment; the
  /// renderer visits headings in the same pre-order.
  #[must_use]
  pub fn headings(&self) -> Vec<HeadingRef<'_>> {
    let mut out = Vec::new();
    collect_headings(&self.blocks, &mut out);
    out
  }

  /// Plain-text titles of every heading, in document order.
  #[must_use]
  pub fn heading_titles(&self) -> Vec<String> {
    self
      .headings()
      .iter()
      .map(|heading| plain_text(heading.content))
      .collect()
  }
}

fn collect_headings<'a>(blocks: &'a [Block], out: &mut Vec<HeadingRef<'a>>) {
  for block in blocks {
    match block {
      Block::Heading { level, content } => {
        out.push(HeadingRef {
          level: *level,
          content,
        });
      },
      Block::Blockquote(children) => collect_headings(children, out),
      Block::List { items, .. } => {
        for item in items {
          collect_headings(item, out);
        }
      },
      _ => {},
    }
  }
}

/// Flatten inline content to plain text.
///
/// Formatting markers are dropped and their text kept; links keep their text
/// and lose the href; images and raw HTML contribute nothing. The result is
/// trimmed.
#[must_use]
pub fn plain_text(inlines: &[Inline]) -> String {
  let mut text = String::new();
  push_plain_text(inlines, &mut text);
  text.trim().to_string()
}

fn push_plain_text(inlines: &[Inline], text: &mut String) {
  for inline in inlines {
    match inline {
      Inline::Text(t) | Inline::Code(t) => text.push_str(t),
      Inline::Emphasis(children)
      | Inline::Strong(children)
      | Inline::Strikethrough(children)
      | Inline::Link {
        content: children, ..
      } => push_plain_text(children, text),
      Inline::SoftBreak | Inline::LineBreak => text.push(' '),
      Inline::Image { .. } | Inline::Html(_) => {},
    }
  }
}
