//! Flat token stream consumed by the tree builder.
//!
//! Tokens follow the markdown-it shape: block constructs appear as
//! `<name>_open` / `<name>_close` pairs with a nesting delta of `+1` / `-1`,
//! leaves have a delta of `0`, and the inline content of a block is carried
//! by a single `inline` token whose `children` hold the inline stream.

/// Nesting delta of a token.
pub const OPEN: i8 = 1;
pub const LEAF: i8 = 0;
pub const CLOSE: i8 = -1;

/// A single token produced by a tokenizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
  /// Token type, e.g. `paragraph_open`, `fence`, `text`.
  pub ty:       String,
  /// HTML-ish tag name, e.g. `p`, `h2`, `code`. May be empty.
  pub tag:      String,
  /// `+1` opens, `0` is a leaf, `-1` closes.
  pub nesting:  i8,
  /// Attributes in source order.
  pub attrs:    Vec<(String, String)>,
  /// Literal content (text, code body, raw HTML, image alt text).
  pub content:  String,
  /// Fence info string or container params.
  pub info:     String,
  /// The source markup that produced the token (`:::`, `` ``` ``, `**`).
  pub markup:   String,
  /// Whether this is a block-level token.
  pub block:    bool,
  /// Wrapper tokens that carry no semantic weight, e.g. paragraphs in tight
  /// lists.
  pub hidden:   bool,
  /// Inline stream for `inline` tokens, alt text stream for images.
  pub children: Vec<Token>,
}

impl Token {
  pub fn new(ty: impl Into<String>, tag: impl Into<String>, nesting: i8) -> Self {
    Self {
      ty: ty.into(),
      tag: tag.into(),
      nesting,
      ..Self::default()
    }
  }

  /// An opening block token.
  pub fn open(ty: impl Into<String>, tag: impl Into<String>) -> Self {
    Self::new(ty, tag, OPEN).block(true)
  }

  /// A closing block token.
  pub fn close(ty: impl Into<String>, tag: impl Into<String>) -> Self {
    Self::new(ty, tag, CLOSE).block(true)
  }

  /// A `text` leaf.
  pub fn text(content: impl Into<String>) -> Self {
    Self::new("text", "", LEAF).content(content)
  }

  /// An `inline` leaf wrapping an inline token stream.
  #[must_use]
  pub fn inline(children: Vec<Self>) -> Self {
    let content = children
      .iter()
      .map(|child| child.content.as_str())
      .collect::<String>();
    Self {
      children,
      ..Self::new("inline", "", LEAF).block(true).content(content)
    }
  }

  #[must_use]
  pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.attrs.push((name.into(), value.into()));
    self
  }

  #[must_use]
  pub fn content(mut self, content: impl Into<String>) -> Self {
    self.content = content.into();
    self
  }

  #[must_use]
  pub fn info(mut self, info: impl Into<String>) -> Self {
    self.info = info.into();
    self
  }

  #[must_use]
  pub fn markup(mut self, markup: impl Into<String>) -> Self {
    self.markup = markup.into();
    self
  }

  #[must_use]
  pub const fn block(mut self, block: bool) -> Self {
    self.block = block;
    self
  }

  #[must_use]
  pub const fn hidden(mut self, hidden: bool) -> Self {
    self.hidden = hidden;
    self
  }

  #[must_use]
  pub fn children(mut self, children: Vec<Self>) -> Self {
    self.children = children;
    self
  }

  /// Look up an attribute value.
  #[must_use]
  pub fn attr_value(&self, name: &str) -> Option<&str> {
    self
      .attrs
      .iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value.as_str())
  }

  /// Set an attribute, replacing an existing value of the same name.
  pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
    let value = value.into();
    if let Some(slot) = self.attrs.iter_mut().find(|(key, _)| key == name) {
      slot.1 = value;
    } else {
      self.attrs.push((name.to_string(), value));
    }
  }

  /// Whether this token opens a nesting range (`+1` and an `_open` type).
  #[must_use]
  pub fn is_open(&self) -> bool {
    self.nesting == OPEN && self.ty.ends_with("_open")
  }
}

/// Type of the token closing `open_ty`: `foo_open` becomes `foo_close`;
/// anything else is returned unchanged.
#[must_use]
pub fn close_type(open_ty: &str) -> String {
  open_ty
    .strip_suffix("_open")
    .map_or_else(|| open_ty.to_string(), |base| format!("{base}_close"))
}

/// Token type pair of a `:::` container named `name`.
#[must_use]
pub fn container_types(name: &str) -> (String, String) {
  (
    format!("container_{name}_open"),
    format!("container_{name}_close"),
  )
}

/// Extract `name` from a `container_<name>_open` token type.
#[must_use]
pub fn container_name(ty: &str) -> Option<&str> {
  ty.strip_prefix("container_")?
    .strip_suffix("_open")
    .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_close_type() {
    assert_eq!(close_type("paragraph_open"), "paragraph_close");
    assert_eq!(close_type("container_Alert_open"), "container_Alert_close");
    assert_eq!(close_type("fence"), "fence");
  }

  #[test]
  fn test_container_name() {
    assert_eq!(container_name("container_Alert_open"), Some("Alert"));
    assert_eq!(container_name("container__open"), None);
    assert_eq!(container_name("container_Alert_close"), None);
    assert_eq!(container_name("paragraph_open"), None);
  }

  #[test]
  fn test_set_attr_replaces() {
    let mut token = Token::open("heading_open", "h1").attr("id", "old");
    token.set_attr("id", "new");
    token.set_attr("class", "title");
    assert_eq!(token.attr_value("id"), Some("new"));
    assert_eq!(token.attrs.len(), 2);
  }

  #[test]
  fn test_is_open() {
    assert!(Token::open("paragraph_open", "p").is_open());
    assert!(Token::open("container_Alert_open", "div").is_open());
    assert!(!Token::close("paragraph_close", "p").is_open());
    assert!(!Token::new("fence", "code", OPEN).is_open());
    assert!(!Token::text("x").is_open());
  }

  #[test]
  fn test_inline_content_concatenates_children() {
    let inline = Token::inline(vec![Token::text("a"), Token::text("b")]);
    assert_eq!(inline.content, "ab");
    assert_eq!(inline.nesting, LEAF);
  }
}
