//! Node tree produced by the parser.
//!
//! Every node carries a `key` that is unique within one parse call. The tree
//! serializes with a `kind` discriminator so renderers outside Rust can walk
//! it as JSON:
//!
//! ```
//! use mdtree::parse_markdown;
//!
//! let root = parse_markdown("# Title", &Default::default());
//! let json = serde_json::to_value(&root).unwrap_or_default();
//! assert_eq!(json["kind"], "root");
//! assert_eq!(json["children"][0]["name"], "h1");
//! ```
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// String attributes of an element or code node, in source order.
pub type Attrs = IndexMap<String, String>;

/// Structured component properties.
pub type Props = Map<String, Value>;

/// Root of a parsed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", rename = "root")]
pub struct Root {
  pub children: Vec<Node>,
}

impl Root {
  /// Concatenated visible text of the whole document.
  #[must_use]
  pub fn text_content(&self) -> String {
    let mut text = String::new();
    for child in &self.children {
      crate::utils::collect_text(child, &mut text);
    }
    text
  }
}

/// Any node below the root.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
  Text(TextNode),
  Break(BreakNode),
  Html(HtmlNode),
  Element(ElementNode),
  Code(CodeNode),
  Component(ComponentNode),
}

impl Node {
  /// The per-parse identity of this node.
  #[must_use]
  pub fn key(&self) -> &str {
    match self {
      Self::Text(node) => &node.key,
      Self::Break(node) => &node.key,
      Self::Html(node) => &node.key,
      Self::Element(node) => &node.key,
      Self::Code(node) => &node.key,
      Self::Component(node) => &node.key,
    }
  }

  /// Child nodes; empty for leaves.
  #[must_use]
  pub fn children(&self) -> &[Self] {
    match self {
      Self::Element(node) => &node.children,
      Self::Component(node) => &node.children,
      Self::Text(_) | Self::Break(_) | Self::Html(_) | Self::Code(_) => &[],
    }
  }

  /// Element tag name or component name, if this node has one.
  #[must_use]
  pub fn name(&self) -> Option<&str> {
    match self {
      Self::Element(node) => Some(&node.name),
      Self::Component(node) => Some(&node.name),
      _ => None,
    }
  }
}

/// Literal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextNode {
  pub key:   String,
  pub value: String,
}

/// Soft or hard line break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakNode {
  pub key:  String,
  pub hard: bool,
}

/// Raw HTML passed through from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlNode {
  pub key:   String,
  pub value: String,
  pub block: bool,
}

/// Generic tag-shaped node: headings, paragraphs, emphasis, links, lists,
/// images, rules and anything a tokenizer plugin wraps in open/close tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementNode {
  pub key:      String,
  pub name:     String,
  pub attrs:    Attrs,
  pub children: Vec<Node>,
  pub block:    bool,
}

/// Inline code span or fenced/indented code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeNode {
  pub key:    String,
  pub inline: bool,
  pub text:   String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lang:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub info:   Option<String>,
  pub attrs:  Attrs,
}

/// Which extension syntax produced a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentSyntax {
  /// `::: Name props` ... `:::`
  Container,
  /// A code fence whose info string is `component:Name props`.
  Fence,
}

impl ComponentSyntax {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Container => "container",
      Self::Fence => "fence",
    }
  }
}

impl std::fmt::Display for ComponentSyntax {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A named block addressed to an externally registered component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentNode {
  pub key:      String,
  pub name:     String,
  pub syntax:   ComponentSyntax,
  pub props:    Props,
  pub children: Vec<Node>,

  /// Raw fence body, for fence components whose body is not parsed as
  /// markdown. `None` for containers, and for fence components registered
  /// with `parse_fence_body_as_markdown`, whose body lives in `children`
  /// instead.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source: Option<String>,
}
