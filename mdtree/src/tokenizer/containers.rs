//! Detection of `:::` container markers.
//!
//! Containers may sit at the top level, inside block quotes and list items,
//! and inside other containers. Finding them takes two comrak parses. The
//! first locates marker lines: a paragraph line reading `::: name params` for
//! a registered name, or a bare colon run at least as long as the innermost
//! open marker. Lines of code blocks and HTML blocks never hold markers,
//! however deeply nested. Each marker line is then replaced by a one-line
//! HTML comment that keeps the line's block quote and list prefix, so the
//! second parse gives every marker a block of its own at the right depth.
//! Lowering maps those blocks back to container tokens.

use comrak::nodes::{AstNode, NodeValue};

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

/// What a marker line does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerKind {
  /// `::: name params`; `info` is everything after the colons.
  Open { name: String, info: String },
  /// A bare colon run.
  Close,
}

/// One `:::` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
  pub kind:   MarkerKind,
  /// The colon run.
  pub markup: String,
  /// The line as written, without its prefix and line ending.
  pub text:   String,
}

/// Markers of one input, addressed by the placeholder comments replacing
/// them.
#[derive(Debug, Default)]
pub struct Markers {
  tag:     String,
  markers: Vec<Marker>,
}

impl Markers {
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.markers.is_empty()
  }

  /// The marker behind a placeholder comment, if `html` is one.
  #[must_use]
  pub fn get(&self, html: &str) -> Option<&Marker> {
    if self.markers.is_empty() {
      return None;
    }

    let index = html
      .trim()
      .strip_prefix(COMMENT_START)?
      .strip_suffix(COMMENT_END)?
      .strip_prefix(self.tag.as_str())?
      .strip_prefix(':')?
      .parse::<usize>()
      .ok()?;
    self.markers.get(index)
  }

  fn placeholder(&self, index: usize) -> String {
    format!("{COMMENT_START}{}:{index}{COMMENT_END}", self.tag)
  }
}

/// Find the marker lines of `input`, given its first-pass AST, and return the
/// input with each marker line swapped for its placeholder.
pub fn mark<'a, S: AsRef<str>>(
  input: &str,
  root: &'a AstNode<'a>,
  names: &[S],
) -> (String, Markers) {
  let mut tag = String::from("mdtree-container");
  while input.contains(tag.as_str()) {
    tag.push('-');
  }
  let mut markers = Markers {
    tag,
    markers: Vec::new(),
  };

  let lines = input.split_inclusive('\n').collect::<Vec<_>>();
  // (line index, byte offset of the marker within the line)
  let mut replacements: Vec<(usize, usize)> = Vec::new();
  let mut open_lens: Vec<usize> = Vec::new();

  for node in root.descendants() {
    let data = node.data.borrow();
    let holds_lines = match &data.value {
      NodeValue::Paragraph => true,
      NodeValue::Heading(heading) => heading.setext,
      _ => false,
    };
    if !holds_lines {
      continue;
    }

    let start = data.sourcepos.start;
    for line_no in start.line..=data.sourcepos.end.line {
      let Some(index) = line_no.checked_sub(1) else {
        continue;
      };
      let Some(line) = lines.get(index) else {
        continue;
      };
      if replacements.last().is_some_and(|&(last, _)| last == index) {
        continue;
      }

      let from = if line_no == start.line {
        start.column.saturating_sub(1)
      } else {
        0
      };
      let Some(rest) = line.get(from..) else {
        continue;
      };
      let offset = from + prefix_len(rest);
      let content = line[offset..].trim_end_matches(['\n', '\r']);

      let marker = if let Some(markup) = open_lens
        .last()
        .and_then(|&min_len| parse_close(content, min_len))
      {
        open_lens.pop();
        Marker {
          kind:   MarkerKind::Close,
          markup: markup.to_string(),
          text:   content.to_string(),
        }
      } else if let Some((name, info, markup)) = parse_open(content, names) {
        open_lens.push(markup.len());
        Marker {
          kind:   MarkerKind::Open {
            name: name.to_string(),
            info: info.to_string(),
          },
          markup: markup.to_string(),
          text:   content.to_string(),
        }
      } else {
        continue;
      };

      markers.markers.push(marker);
      replacements.push((index, offset));
    }
  }

  if replacements.is_empty() {
    return (input.to_string(), markers);
  }

  let mut output = String::with_capacity(input.len() + replacements.len() * 24);
  let mut pending = replacements.into_iter().enumerate().peekable();
  for (index, line) in lines.iter().enumerate() {
    match pending.next_if(|(_, (line_index, _))| *line_index == index) {
      Some((marker_index, (_, offset))) => {
        let body_len = line.trim_end_matches(['\n', '\r']).len();
        output.push_str(&line[..offset]);
        output.push_str(&markers.placeholder(marker_index));
        output.push_str(&line[body_len..]);
      },
      None => output.push_str(line),
    }
  }

  (output, markers)
}

/// Length of the leading whitespace and block quote markers.
fn prefix_len(line: &str) -> usize {
  line
    .bytes()
    .take_while(|b| matches!(b, b' ' | b'\t' | b'>'))
    .count()
}

fn colon_run(text: &str) -> usize {
  text.bytes().take_while(|&b| b == b':').count()
}

fn parse_open<'a, S: AsRef<str>>(
  content: &'a str,
  names: &[S],
) -> Option<(&'a str, &'a str, &'a str)> {
  let colons = colon_run(content);
  if colons < 3 {
    return None;
  }

  let (markup, params) = content.split_at(colons);
  let first_word = params.split_whitespace().next()?;
  names
    .iter()
    .any(|name| name.as_ref() == first_word)
    .then_some((first_word, params, markup))
}

fn parse_close(content: &str, min_len: usize) -> Option<&str> {
  let colons = colon_run(content);
  if colons < min_len.max(3) {
    return None;
  }

  let (markup, trailing) = content.split_at(colons);
  trailing.trim().is_empty().then_some(markup)
}

#[cfg(test)]
mod tests {
  use comrak::{Arena, options::Options, parse_document};

  use super::*;

  const NAMES: &[&str] = &["Alert", "Note"];

  fn run(input: &str) -> (String, Markers) {
    let arena = Arena::new();
    let root = parse_document(&arena, input, &Options::default());
    mark(input, root, NAMES)
  }

  #[test]
  fn test_plain_markdown_is_untouched() {
    let (marked, markers) = run("# Hi\n\ntext\n");
    assert_eq!(marked, "# Hi\n\ntext\n");
    assert!(markers.is_empty());
  }

  #[test]
  fn test_top_level_container() {
    let (marked, markers) = run("before\n\n::: Alert type=info\nBody\n:::\nafter");
    assert_eq!(
      marked,
      "before\n\n<!--mdtree-container:0-->\nBody\n<!--mdtree-container:1-->\nafter"
    );
    assert_eq!(markers.markers, [
      Marker {
        kind:   MarkerKind::Open {
          name: "Alert".to_string(),
          info: " Alert type=info".to_string(),
        },
        markup: ":::".to_string(),
        text:   "::: Alert type=info".to_string(),
      },
      Marker {
        kind:   MarkerKind::Close,
        markup: ":::".to_string(),
        text:   ":::".to_string(),
      },
    ]);
  }

  #[test]
  fn test_block_quote_prefix_is_kept() {
    let (marked, markers) = run("> ::: Alert\n> Body\n> :::\n");
    assert_eq!(
      marked,
      "> <!--mdtree-container:0-->\n> Body\n> <!--mdtree-container:1-->\n"
    );
    assert_eq!(markers.markers.len(), 2);
  }

  #[test]
  fn test_list_item_prefix_is_kept() {
    let (marked, _) = run("- item\n\n  ::: Note\n  Body\n  :::\n");
    assert_eq!(
      marked,
      "- item\n\n  <!--mdtree-container:0-->\n  Body\n  <!--mdtree-container:1-->\n"
    );
  }

  #[test]
  fn test_unregistered_name_is_untouched() {
    let input = "::: Warning\nBody\n:::\n";
    let (marked, markers) = run(input);
    assert_eq!(marked, input);
    assert!(markers.is_empty());
  }

  #[test]
  fn test_markers_inside_code_are_ignored() {
    for input in [
      "```md\n::: Alert\n:::\n```\n",
      "- ```\n  ::: Alert\n  ```\n",
      "> ~~~\n> ::: Alert\n> ~~~\n",
      "    ::: Alert\n",
    ] {
      let (marked, markers) = run(input);
      assert_eq!(marked, input);
      assert!(markers.is_empty(), "{input:?}");
    }
  }

  #[test]
  fn test_short_close_does_not_close_longer_marker() {
    let (marked, markers) = run(":::: Note\nx\n:::\n");
    assert_eq!(marked, "<!--mdtree-container:0-->\nx\n:::\n");
    assert_eq!(markers.markers.len(), 1);
  }

  #[test]
  fn test_stray_close_is_untouched() {
    let input = "text\n:::\nmore\n";
    let (marked, markers) = run(input);
    assert_eq!(marked, input);
    assert!(markers.is_empty());
  }

  #[test]
  fn test_placeholder_tag_avoids_input_text() {
    let (marked, markers) = run("mdtree-container\n\n::: Alert\n");
    assert_eq!(marked, "mdtree-container\n\n<!--mdtree-container-:0-->\n");
    assert!(markers.get("<!--mdtree-container-:0-->").is_some());
    assert!(markers.get("<!--mdtree-container:0-->").is_none());
  }

  #[test]
  fn test_get_rejects_other_comments() {
    let (_, markers) = run("::: Alert\n");
    assert!(markers.get("<!--mdtree-container:0-->\n").is_some());
    assert!(markers.get("<!--mdtree-container:1-->").is_none());
    assert!(markers.get("<!-- note -->").is_none());
    assert!(Markers::default().get("<!--mdtree-container:0-->").is_none());
  }
}
