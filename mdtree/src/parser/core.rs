//! Core implementation of the parser.
//!
//! Building a `MarkdownParser` normalizes the component configuration and
//! prepares the tokenizer once; every parse call then runs with its own
//! [`ParseState`].
use log::debug;

use super::types::{MarkdownParser, ParseOptions};
use crate::{
  builder::{ParseState, build_blocks},
  registry::ComponentRegistry,
  token::Token,
  tokenizer::MarkdownTokenizer,
  types::Root,
};

impl MarkdownParser {
  /// Create a new `MarkdownParser` with the given options.
  #[must_use]
  pub fn new(options: ParseOptions) -> Self {
    let registry = ComponentRegistry::new(&options.component_blocks);
    let fence_prefix = options.fence_prefix().to_string();

    let mut tokenizer = options
      .tokenizer
      .unwrap_or_else(|| MarkdownTokenizer::new(options.tokenizer_options));

    for name in registry.container_names() {
      tokenizer.enable_container(name);
    }

    for plugin in &options.plugins {
      tokenizer.use_plugin(plugin);
    }

    debug!(
      "Parser ready: {} component block(s), {} container(s), {} plugin(s)",
      registry.len(),
      tokenizer.containers().len(),
      options.plugins.len()
    );

    Self {
      registry,
      tokenizer,
      fence_prefix,
    }
  }

  /// Parse markdown into a node tree.
  #[must_use]
  pub fn parse(&self, markdown: &str) -> Root {
    let tokens = self.tokenizer.tokenize(markdown);
    self.parse_tokens(&tokens)
  }

  /// Build a node tree from an already tokenized stream.
  ///
  /// Fence components whose body is parsed as markdown still go through this
  /// parser's tokenizer.
  #[must_use]
  pub fn parse_tokens(&self, tokens: &[Token]) -> Root {
    let mut state = ParseState::new(&self.registry, &self.tokenizer, &self.fence_prefix);
    Root {
      children: build_blocks(tokens, &mut state),
    }
  }

  /// Normalized component configuration.
  #[must_use]
  pub const fn registry(&self) -> &ComponentRegistry {
    &self.registry
  }

  /// The tokenizer used for `parse`.
  #[must_use]
  pub const fn tokenizer(&self) -> &MarkdownTokenizer {
    &self.tokenizer
  }

  /// Prefix marking a fence as a component.
  #[must_use]
  pub fn fence_prefix(&self) -> &str {
    &self.fence_prefix
  }
}

impl Default for MarkdownParser {
  fn default() -> Self {
    Self::new(ParseOptions::default())
  }
}
