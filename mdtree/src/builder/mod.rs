//! Reconstruction of the node tree from a flat token stream.
//!
//! - [`block`]: open/close pairing, container components and generic elements
//! - [`leaf`]: block-level leaf tokens (inline runs, fences, code, html, rules)
//! - [`inline`]: inline token streams
//!
//! All state that changes during a parse lives in [`ParseState`], which is
//! created per call and shared with nested fragment parses so that keys stay
//! unique across the whole tree.
pub mod block;
pub mod inline;
pub mod leaf;

pub use block::build_blocks;

use crate::{
  registry::ComponentRegistry,
  token::Token,
  tokenizer::MarkdownTokenizer,
  types::Attrs,
};

/// Per-call key counter.
#[derive(Debug, Default)]
pub struct KeyGenerator {
  next: usize,
}

impl KeyGenerator {
  /// Return `n_<counter>` and advance the counter.
  pub fn next_key(&mut self) -> String {
    let key = format!("n_{}", self.next);
    self.next += 1;
    key
  }
}

/// Everything one parse call needs while walking tokens.
#[derive(Debug)]
pub struct ParseState<'p> {
  pub registry:     &'p ComponentRegistry,
  pub tokenizer:    &'p MarkdownTokenizer,
  pub fence_prefix: &'p str,
  pub keys:         KeyGenerator,
}

impl<'p> ParseState<'p> {
  #[must_use]
  pub fn new(
    registry: &'p ComponentRegistry,
    tokenizer: &'p MarkdownTokenizer,
    fence_prefix: &'p str,
  ) -> Self {
    Self {
      registry,
      tokenizer,
      fence_prefix,
      keys: KeyGenerator::default(),
    }
  }

  pub fn next_key(&mut self) -> String {
    self.keys.next_key()
  }

  /// Tokenize and build a markdown fragment with this call's state.
  pub fn parse_fragment(&mut self, markdown: &str) -> Vec<crate::types::Node> {
    let tokens = self.tokenizer.tokenize(markdown);
    build_blocks(&tokens, self)
  }
}

/// Index of the token closing `tokens[start]`, counting nested opens of the
/// same type. Only `open_ty` and `close_ty` affect the count.
#[must_use]
pub fn find_close_index(
  tokens: &[Token],
  start: usize,
  open_ty: &str,
  close_ty: &str,
) -> Option<usize> {
  let mut depth = 0usize;

  for (index, token) in tokens.iter().enumerate().skip(start) {
    if token.ty == open_ty {
      depth += 1;
    } else if token.ty == close_ty {
      depth = depth.saturating_sub(1);
      if depth == 0 {
        return Some(index);
      }
    }
  }

  None
}

/// Element name of an open token: its tag, else its type without the
/// `_open` / `_close` suffix.
#[must_use]
pub fn normalize_node_name(token: &Token) -> String {
  if !token.tag.is_empty() {
    return token.tag.clone();
  }

  let ty = token.ty.as_str();
  ty.strip_suffix("_open")
    .or_else(|| ty.strip_suffix("_close"))
    .unwrap_or(ty)
    .to_string()
}

/// Token attributes as a map. Later duplicates win.
#[must_use]
pub fn attrs_to_map(attrs: &[(String, String)]) -> Attrs {
  attrs
    .iter()
    .map(|(name, value)| (name.clone(), value.clone()))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_keys_are_sequential() {
    let mut keys = KeyGenerator::default();
    assert_eq!(keys.next_key(), "n_0");
    assert_eq!(keys.next_key(), "n_1");
    assert_eq!(keys.next_key(), "n_2");
  }

  #[test]
  fn test_find_close_index_counts_nesting() {
    let tokens = vec![
      Token::open("x_open", "div"),
      Token::open("x_open", "div"),
      Token::open("y_open", "p"),
      Token::close("x_close", "div"),
      Token::close("x_close", "div"),
    ];
    assert_eq!(find_close_index(&tokens, 0, "x_open", "x_close"), Some(4));
    assert_eq!(find_close_index(&tokens, 1, "x_open", "x_close"), Some(3));
    assert_eq!(find_close_index(&tokens, 2, "y_open", "y_close"), None);
  }

  #[test]
  fn test_normalize_node_name() {
    assert_eq!(normalize_node_name(&Token::open("paragraph_open", "p")), "p");
    assert_eq!(normalize_node_name(&Token::open("custom_open", "")), "custom");
    assert_eq!(normalize_node_name(&Token::close("custom_close", "")), "custom");
    assert_eq!(normalize_node_name(&Token::new("thing", "", 0)), "thing");
  }

  #[test]
  fn test_attrs_to_map_keeps_order() {
    let attrs = vec![
      ("b".to_string(), "2".to_string()),
      ("a".to_string(), "1".to_string()),
      ("b".to_string(), "3".to_string()),
    ];
    let map = attrs_to_map(&attrs);
    assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "a"]);
    assert_eq!(map.get("b").map(String::as_str), Some("3"));
  }
}
