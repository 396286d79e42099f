use regex::Regex;

use crate::types::Node;

/// Slugify a string for use as an anchor ID.
/// Converts to lowercase, replaces non-alphanumeric characters with dashes,
/// and trims leading/trailing dashes.
#[must_use]
pub fn slugify(text: &str) -> String {
  text
    .to_lowercase()
    .replace(|c: char| !c.is_alphanumeric() && c != '-' && c != '_', "-")
    .trim_matches('-')
    .to_string()
}

/// Concatenated visible text below `node`: text node values and code text, in
/// document order. Raw HTML, breaks and attributes are excluded.
#[must_use]
pub fn text_content(node: &Node) -> String {
  let mut text = String::new();
  collect_text(node, &mut text);
  text
}

pub(crate) fn collect_text(node: &Node, out: &mut String) {
  match node {
    Node::Text(text) => out.push_str(&text.value),
    Node::Code(code) if code.inline => out.push_str(&code.text),
    Node::Element(_) | Node::Component(_) => {
      for child in node.children() {
        collect_text(child, out);
      }
    },
    Node::Code(_) | Node::Break(_) | Node::Html(_) => {},
  }
}

/// A regex that never matches, used when a static pattern fails to compile.
#[must_use]
pub fn never_matching_regex() -> Regex {
  // `[^\s\S]` asserts something impossible and is always a valid pattern
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| {
    #[allow(clippy::unwrap_used, reason = "Pattern is a constant")]
    Regex::new(r"^\b$").unwrap()
  })
}
