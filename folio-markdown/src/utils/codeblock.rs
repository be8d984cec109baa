//! Line-based fenced code detection for raw markdown.

/// Fence state carried from one line to the next.
///
/// Remembers the opening fence character and run length, since only a fence
/// of the same character and at least the same length closes the block. A
/// fence that is never closed keeps the tracker inside until end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FenceTracker {
  in_code_block:    bool,
  code_fence_char:  Option<char>,
  code_fence_count: usize,
}

/// How a single line relates to fenced code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceLine {
  /// Ordinary text outside any fence.
  Text,
  /// The opening fence line, including its info string.
  Open,
  /// A line of code inside the fence.
  Code,
  /// The closing fence line.
  Close,
}

impl FenceTracker {
  /// Create a new fence tracker.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      in_code_block:    false,
      code_fence_char:  None,
      code_fence_count: 0,
    }
  }

  /// Check if currently inside a code block.
  #[must_use]
  pub const fn in_code_block(&self) -> bool {
    self.in_code_block
  }

  /// Process a line and update fence state.
  ///
  /// Returns the updated state after processing the line.
  /// Call this for each line to maintain accurate fence tracking.
  #[must_use]
  pub fn process_line(&self, line: &str) -> Self {
    self.classify(line).0
  }

  /// Process a line, returning the updated state and the role of the line.
  ///
  /// Blockquote markers and a leading list marker are skipped first, so
  /// fences nested in quotes and list items are recognised too.
  #[must_use]
  pub fn classify(&self, line: &str) -> (Self, FenceLine) {
    let trimmed = container_content(line);

    if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
      let Some(fence_char) = trimmed.chars().next() else {
        return (*self, self.current_role());
      };

      let fence_count =
        trimmed.chars().take_while(|&c| c == fence_char).count();
      let rest = &trimmed[fence_count * fence_char.len_utf8()..];

      if !self.in_code_block {
        // Backtick info strings may not contain backticks
        if fence_char == '`' && rest.contains('`') {
          return (*self, FenceLine::Text);
        }
        return (
          Self {
            in_code_block:    true,
            code_fence_char:  Some(fence_char),
            code_fence_count: fence_count,
          },
          FenceLine::Open,
        );
      } else if self.code_fence_char == Some(fence_char)
        && fence_count >= self.code_fence_count
        && rest.trim().is_empty()
      {
        return (Self::new(), FenceLine::Close);
      }
    }

    (*self, self.current_role())
  }

  const fn current_role(&self) -> FenceLine {
    if self.in_code_block {
      FenceLine::Code
    } else {
      FenceLine::Text
    }
  }
}

/// The part of `line` after any `>` quote markers and one list marker.
fn container_content(line: &str) -> &str {
  let mut rest = line.trim_start();
  while let Some(after) = rest.strip_prefix('>') {
    rest = after.trim_start();
  }
  strip_list_marker(rest).map_or(rest, str::trim_start)
}

fn strip_list_marker(text: &str) -> Option<&str> {
  let digits = text.bytes().take_while(u8::is_ascii_digit).count();
  let marker_len = match text.as_bytes().get(digits) {
    Some(b'-' | b'*' | b'+') if digits == 0 => 1,
    Some(b'.' | b')') if (1..=9).contains(&digits) => digits + 1,
    _ => return None,
  };
  let rest = &text[marker_len..];
  rest.starts_with([' ', '\t']).then_some(rest)
}

/// Remove every fenced code block, fences included, from raw markdown.
///
/// Unterminated fences swallow the rest of the document.
#[must_use]
pub fn strip_fenced_blocks(content: &str) -> String {
  let mut tracker = FenceTracker::new();
  let mut out = String::with_capacity(content.len());

  for line in content.lines() {
    let (next, role) = tracker.classify(line);
    tracker = next;
    if role == FenceLine::Text {
      out.push_str(line);
      out.push('\n');
    }
  }

  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn roles(markdown: &str) -> Vec<FenceLine> {
    let mut tracker = FenceTracker::new();
    markdown
      .lines()
      .map(|line| {
        let (next, role) = tracker.classify(line);
        tracker = next;
        role
      })
      .collect()
  }

  #[test]
  fn test_backtick_and_tilde_fences() {
    use FenceLine::{Close, Code, Open, Text};
    assert_eq!(roles("a\n```rust\nfn x() {}\n```\nb"), vec![
      Text, Open, Code, Close, Text
    ]);
    assert_eq!(roles("~~~\ncode\n~~~"), vec![Open, Code, Close]);
  }

  #[test]
  fn test_closing_fence_must_match() {
    use FenceLine::{Close, Code, Open};
    // other char, shorter run, or trailing info never close
    assert_eq!(roles("````\n~~~~\n```\n```` js\n`````"), vec![
      Open, Code, Code, Code, Close
    ]);
  }

  #[test]
  fn test_indented_fence_and_process_line() {
    let tracker = FenceTracker::new().process_line("   ```");
    assert!(tracker.in_code_block());
    assert!(!tracker.process_line("  ```").in_code_block());
  }

  #[test]
  fn test_inline_triple_backticks_are_not_a_fence() {
    assert_eq!(roles("``` not a fence ```"), vec![FenceLine::Text]);
  }

  #[test]
  fn test_strip_fenced_blocks() {
    let md = "before\n```js\nlet a = **b**;\n```\nafter";
    assert_eq!(strip_fenced_blocks(md), "before\nafter\n");
  }

  #[test]
  fn test_fences_inside_containers() {
    use FenceLine::{Close, Code, Open, Text};
    assert_eq!(roles("- ```js\n  **x**\n  ```\n- next"), vec![
      Open, Code, Close, Text
    ]);
    assert_eq!(roles("> quote\n> ```\n> let a = *b*;\n> ```"), vec![
      Text, Open, Code, Close
    ]);
    assert_eq!(roles("1. step\n2) ~~~sh\n   ls\n   ~~~"), vec![
      Text, Open, Code, Close
    ]);
  }

  #[test]
  fn test_list_marker_needs_a_space() {
    assert_eq!(roles("-```js"), vec![FenceLine::Text]);
    assert_eq!(roles("1.```"), vec![FenceLine::Text]);
  }

  #[test]
  fn test_strip_unterminated_fence_runs_to_end() {
    let md = "intro\n~~~\nnever closed\nstill code";
    assert_eq!(strip_fenced_blocks(md), "intro\n");
  }
}
