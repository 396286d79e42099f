//! # mdtree - Markdown to component-aware node trees
//!
//! Parses Markdown into a typed, serializable node tree instead of HTML, so
//! that any renderer can walk it. On top of CommonMark/GFM two block syntaxes
//! address externally registered components:
//!
//! - `:::` containers, whose body is parsed as Markdown children
//! - fenced code blocks whose info string starts with `component:`, whose body
//!   is kept as raw source or, if configured, parsed as Markdown
//!
//! ## Quick Start
//!
//! ```rust
//! use mdtree::{Node, ParseOptionsBuilder, parse_markdown};
//!
//! let options = ParseOptionsBuilder::new()
//!   .component_block("Alert", true)
//!   .component_block("Chart", true)
//!   .build();
//!
//! let root = parse_markdown(
//!   "::: Alert type=info\nHeads up\n:::\n\n```component:Chart {\"theme\":\"dark\"}\n1,2,3\n```\n",
//!   &options,
//! );
//!
//! let Node::Component(alert) = &root.children[0] else { return };
//! assert_eq!(alert.props["type"], "info");
//!
//! let Node::Component(chart) = &root.children[1] else { return };
//! assert_eq!(chart.props["theme"], "dark");
//! assert_eq!(chart.source.as_deref(), Some("1,2,3\n"));
//! ```
//!
//! ## Architecture
//!
//! - [`tokenizer`]: comrak-backed tokenizer producing a flat [`Token`] stream
//! - [`builder`]: reconstructs the node tree from tokens
//! - [`registry`]: component block configuration
//! - [`props`]: props string parsing
//! - [`parser`]: `MarkdownParser` and `parse_markdown`
pub mod builder;
pub mod component;
mod error;
pub mod parser;
pub mod props;
pub mod registry;
pub mod token;
pub mod tokenizer;
mod types;
pub mod utils;

pub use crate::{
  component::FENCE_COMPONENT_PREFIX,
  error::{PropsError, PropsResult},
  parser::{
    MarkdownParser,
    ParseOptions,
    ParseOptionsBuilder,
    parse_batch,
    parse_markdown,
  },
  props::{PropsContext, PropsParser, parse_props},
  registry::{
    ComponentBlock,
    ComponentBlockConfig,
    ComponentBlockEntry,
    ComponentBlocks,
    ComponentRegistry,
    infer_component_blocks,
  },
  token::Token,
  tokenizer::{
    MarkdownTokenizer,
    TokenTransformer,
    TokenizerOptions,
    TokenizerPlugin,
  },
  types::{
    Attrs,
    BreakNode,
    CodeNode,
    ComponentNode,
    ComponentSyntax,
    ElementNode,
    HtmlNode,
    Node,
    Props,
    Root,
    TextNode,
  },
};
