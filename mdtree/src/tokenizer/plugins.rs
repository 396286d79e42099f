//! Tokenizer plugins.
//!
//! A plugin is a function that configures a [`MarkdownTokenizer`], optionally
//! with parameters. Plugins are applied in order when a parser is built,
//! after the component containers have been registered.
use std::{fmt, sync::Arc};

use log::debug;
use serde_json::Value;

use super::MarkdownTokenizer;
use crate::{token::Token, utils::slugify};

type BarePlugin = Arc<dyn Fn(&mut MarkdownTokenizer) + Send + Sync>;
type ParamPlugin = Arc<dyn Fn(&mut MarkdownTokenizer, &[Value]) + Send + Sync>;

/// A tokenizer plugin together with its parameters.
#[derive(Clone)]
pub enum TokenizerPlugin {
  /// Plugin applied without parameters.
  Bare(BarePlugin),
  /// Plugin applied with trailing parameters.
  WithParams(ParamPlugin, Vec<Value>),
}

impl TokenizerPlugin {
  pub fn bare<F>(plugin: F) -> Self
  where
    F: Fn(&mut MarkdownTokenizer) + Send + Sync + 'static,
  {
    Self::Bare(Arc::new(plugin))
  }

  pub fn with_params<F>(plugin: F, params: Vec<Value>) -> Self
  where
    F: Fn(&mut MarkdownTokenizer, &[Value]) + Send + Sync + 'static,
  {
    Self::WithParams(Arc::new(plugin), params)
  }

  /// Generic `:::` containers for `names`. Such containers become `div`
  /// elements unless a component block of the same name is configured.
  #[must_use]
  pub fn containers<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let params = names
      .into_iter()
      .map(|name| Value::String(name.into()))
      .collect();
    Self::with_params(containers, params)
  }

  /// Slugified `id` attributes on headings.
  #[must_use]
  pub fn heading_ids() -> Self {
    Self::bare(heading_ids)
  }

  /// Run the plugin against `tokenizer`.
  pub fn apply(&self, tokenizer: &mut MarkdownTokenizer) {
    match self {
      Self::Bare(plugin) => {
        debug!("Applying tokenizer plugin");
        plugin(tokenizer);
      },
      Self::WithParams(plugin, params) => {
        debug!("Applying tokenizer plugin with {} param(s)", params.len());
        plugin(tokenizer, params);
      },
    }
  }
}

impl fmt::Debug for TokenizerPlugin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Bare(_) => f.write_str("TokenizerPlugin::Bare(..)"),
      Self::WithParams(_, params) => {
        f.debug_tuple("TokenizerPlugin::WithParams")
          .field(&"..")
          .field(params)
          .finish()
      },
    }
  }
}

/// Register every string parameter as a container name. Non-string
/// parameters are ignored.
pub fn containers(tokenizer: &mut MarkdownTokenizer, params: &[Value]) {
  for name in params.iter().filter_map(Value::as_str) {
    tokenizer.enable_container(name);
  }
}

/// Add a slugified `id` to every heading that doesn't already carry one.
pub fn heading_ids(tokenizer: &mut MarkdownTokenizer) {
  tokenizer.add_transformer(|tokens: &mut Vec<Token>| add_heading_ids(tokens));
}

fn add_heading_ids(tokens: &mut [Token]) {
  for i in 0..tokens.len() {
    if tokens[i].ty != "heading_open" || tokens[i].attr_value("id").is_some() {
      continue;
    }

    let Some(inline) = tokens.get(i + 1).filter(|t| t.ty == "inline") else {
      continue;
    };

    let id = slugify(&inline.content);
    if !id.is_empty() {
      tokens[i].set_attr("id", id);
    }
  }
}
