//! Type definitions for the parser.
//!
//! Contains the parse configuration (`ParseOptions`), its builder
//! (`ParseOptionsBuilder`) and the parser itself (`MarkdownParser`).
//!
//! # Examples
//!
//! ```
//! use mdtree::{MarkdownParser, ParseOptionsBuilder, TokenizerPlugin};
//!
//! let options = ParseOptionsBuilder::new()
//!   .component_block("Alert", true)
//!   .plugin(TokenizerPlugin::heading_ids())
//!   .build();
//!
//! let parser = MarkdownParser::new(options);
//! let root = parser.parse("::: Alert\nHi\n:::");
//! assert_eq!(root.children[0].name(), Some("Alert"));
//! ```
use crate::{
  component::FENCE_COMPONENT_PREFIX,
  registry::{ComponentBlockEntry, ComponentBlocks, ComponentRegistry},
  tokenizer::{MarkdownTokenizer, TokenizerOptions, TokenizerPlugin},
};

/// Options for configuring the parser.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
  /// Use this tokenizer instead of building one from `tokenizer_options`.
  /// Component containers and plugins are still registered on it.
  pub tokenizer: Option<MarkdownTokenizer>,

  /// Options for the default tokenizer.
  pub tokenizer_options: TokenizerOptions,

  /// Tokenizer plugins, applied in order after component containers.
  pub plugins: Vec<TokenizerPlugin>,

  /// Component names recognized as `:::` containers and/or fence components.
  pub component_blocks: ComponentBlocks,

  /// Info-string prefix marking a fence as a component. Defaults to
  /// `component:`.
  pub fence_component_prefix: Option<String>,
}

impl ParseOptions {
  /// The effective fence component prefix.
  #[must_use]
  pub fn fence_prefix(&self) -> &str {
    self
      .fence_component_prefix
      .as_deref()
      .unwrap_or(FENCE_COMPONENT_PREFIX)
  }
}

/// Markdown parser with immutable, normalized configuration.
///
/// Parsing never mutates the parser, so a single instance can serve any number
/// of threads.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
  pub(crate) registry:     ComponentRegistry,
  pub(crate) tokenizer:    MarkdownTokenizer,
  pub(crate) fence_prefix: String,
}

/// Builder for constructing `ParseOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct ParseOptionsBuilder {
  options: ParseOptions,
}

impl ParseOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Use a preconfigured tokenizer.
  #[must_use]
  pub fn tokenizer(mut self, tokenizer: MarkdownTokenizer) -> Self {
    self.options.tokenizer = Some(tokenizer);
    self
  }

  /// Set options for the default tokenizer.
  #[must_use]
  pub fn tokenizer_options(mut self, options: TokenizerOptions) -> Self {
    self.options.tokenizer_options = options;
    self
  }

  /// Append a tokenizer plugin.
  #[must_use]
  pub fn plugin(mut self, plugin: TokenizerPlugin) -> Self {
    self.options.plugins.push(plugin);
    self
  }

  /// Configure one component name.
  #[must_use]
  pub fn component_block<S, E>(mut self, name: S, entry: E) -> Self
  where
    S: Into<String>,
    E: Into<ComponentBlockEntry>,
  {
    self
      .options
      .component_blocks
      .insert(name.into(), entry.into());
    self
  }

  /// Replace the whole component configuration.
  #[must_use]
  pub fn component_blocks(mut self, blocks: ComponentBlocks) -> Self {
    self.options.component_blocks = blocks;
    self
  }

  /// Set the fence component prefix.
  #[must_use]
  pub fn fence_component_prefix<S: Into<String>>(mut self, prefix: Option<S>) -> Self {
    self.options.fence_component_prefix = prefix.map(Into::into);
    self
  }

  /// Build the final `ParseOptions`.
  #[must_use]
  pub fn build(self) -> ParseOptions {
    self.options
  }
}
