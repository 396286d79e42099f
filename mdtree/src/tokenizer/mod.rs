//! Default tokenizer: comrak for CommonMark/GFM, plus `:::` containers.
//!
//! [`MarkdownTokenizer::tokenize`] turns source text into the flat
//! markdown-it-shaped [`Token`] stream that the tree builder consumes. comrak
//! parses the input and the AST is lowered into tokens. When containers are
//! registered and the input has `:::` lines, the marker lines are located on
//! a first parse and the input is parsed again with each marker standing in a
//! block of its own; lowering emits those as `container_<name>_open` /
//! `container_<name>_close` pairs, balanced within their parent block.
//! Registered [`TokenTransformer`]s then rewrite the finished stream in
//! registration order.
//!
//! # Examples
//!
//! ```
//! use mdtree::{MarkdownTokenizer, TokenizerOptions};
//!
//! let mut tokenizer = MarkdownTokenizer::new(TokenizerOptions::default());
//! tokenizer.enable_container("Alert");
//!
//! let tokens = tokenizer.tokenize("::: Alert\nHi\n:::\n");
//! assert_eq!(tokens[0].ty, "container_Alert_open");
//! assert_eq!(tokens.last().map(|t| t.ty.as_str()), Some("container_Alert_close"));
//! ```
mod containers;
mod lower;
pub mod plugins;

use std::{fmt, sync::Arc};

use comrak::{Arena, options::Options, parse_document};
use log::debug;
use serde::{Deserialize, Serialize};

pub use self::plugins::TokenizerPlugin;
use self::containers::Markers;
use crate::token::Token;

/// Markdown dialect switches, mapped onto comrak options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Config struct with related boolean flags"
)]
pub struct TokenizerOptions {
  /// Pass raw HTML through as `html_block` / `html_inline` tokens. When
  /// disabled, raw HTML is kept as literal text.
  pub html: bool,

  /// Turn bare URLs into links.
  pub linkify: bool,

  /// Smart quotes, dashes and ellipses.
  pub typographer: bool,

  /// GFM tables.
  pub tables: bool,

  /// `~~strikethrough~~`.
  pub strikethrough: bool,

  /// `- [ ]` task list items.
  pub tasklist: bool,

  /// `^superscript^`.
  pub superscript: bool,
}

impl Default for TokenizerOptions {
  fn default() -> Self {
    Self {
      html:          false,
      linkify:       true,
      typographer:   true,
      tables:        true,
      strikethrough: true,
      tasklist:      false,
      superscript:   false,
    }
  }
}

/// A rewrite stage run over the complete token stream after tokenization.
pub trait TokenTransformer: Send + Sync {
  fn transform(&self, tokens: &mut Vec<Token>);
}

impl<F> TokenTransformer for F
where
  F: Fn(&mut Vec<Token>) + Send + Sync,
{
  fn transform(&self, tokens: &mut Vec<Token>) {
    self(tokens);
  }
}

/// Tokenizer producing the flat token stream.
///
/// Cheap to clone; transformers are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct MarkdownTokenizer {
  options:      TokenizerOptions,
  containers:   Vec<String>,
  transformers: Vec<Arc<dyn TokenTransformer>>,
}

impl fmt::Debug for MarkdownTokenizer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MarkdownTokenizer")
      .field("options", &self.options)
      .field("containers", &self.containers)
      .field("transformers", &self.transformers.len())
      .finish()
  }
}

impl MarkdownTokenizer {
  #[must_use]
  pub fn new(options: TokenizerOptions) -> Self {
    Self {
      options,
      containers: Vec::new(),
      transformers: Vec::new(),
    }
  }

  /// Access tokenizer options.
  #[must_use]
  pub const fn options(&self) -> &TokenizerOptions {
    &self.options
  }

  /// Recognize `::: name` blocks. Registering a name twice is a no-op.
  pub fn enable_container(&mut self, name: impl Into<String>) {
    let name = name.into();
    if name.is_empty() || self.containers.contains(&name) {
      return;
    }
    debug!("Registering container `{name}`");
    self.containers.push(name);
  }

  /// Names recognized as `:::` containers, in registration order.
  #[must_use]
  pub fn containers(&self) -> &[String] {
    &self.containers
  }

  /// Append a post-tokenization rewrite stage.
  pub fn add_transformer<T>(&mut self, transformer: T)
  where
    T: TokenTransformer + 'static,
  {
    self.transformers.push(Arc::new(transformer));
  }

  /// Apply a plugin to this tokenizer.
  pub fn use_plugin(&mut self, plugin: &TokenizerPlugin) -> &mut Self {
    plugin.apply(self);
    self
  }

  /// Tokenize `input` into a flat token stream.
  #[must_use]
  pub fn tokenize(&self, input: &str) -> Vec<Token> {
    let arena = Arena::new();
    let options = self.comrak_options();
    let mut root = parse_document(&arena, input, &options);
    let mut markers = Markers::default();

    if !self.containers.is_empty() && input.contains(":::") {
      let (marked, found) = containers::mark(input, root, &self.containers);
      if !found.is_empty() {
        root = parse_document(&arena, &marked, &options);
        markers = found;
      }
    }

    let mut tokens = Vec::new();
    lower::lower_document(root, &self.options, &markers, &mut tokens);

    for transformer in &self.transformers {
      transformer.transform(&mut tokens);
    }

    tokens
  }

  /// Build comrak options from `TokenizerOptions`.
  fn comrak_options(&self) -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = self.options.tables;
    options.extension.strikethrough = self.options.strikethrough;
    options.extension.tasklist = self.options.tasklist;
    options.extension.superscript = self.options.superscript;
    options.extension.autolink = self.options.linkify;
    options.parse.smart = self.options.typographer;
    // Heading ids are a plugin concern
    options.extension.header_id_prefix = None;
    options.render.r#unsafe = self.options.html;
    options
  }
}
