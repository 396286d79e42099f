//! Component block configuration.
//!
//! Callers describe which component names may appear as `:::` containers
//! and/or `component:` fences. Entries are either a bare `true` (all defaults)
//! or a [`ComponentBlockConfig`] with individual overrides. The configuration
//! is normalized once into a [`ComponentRegistry`] of fully defaulted
//! [`ComponentBlock`]s.
//!
//! ```
//! use mdtree::{ComponentBlockConfig, ComponentBlocks, ComponentRegistry};
//!
//! let mut blocks = ComponentBlocks::new();
//! blocks.insert("Alert".into(), true.into());
//! blocks.insert(
//!   "Card".into(),
//!   ComponentBlockConfig {
//!     container: Some(false),
//!     parse_fence_body_as_markdown: Some(true),
//!     ..Default::default()
//!   }
//!   .into(),
//! );
//!
//! let registry = ComponentRegistry::new(&blocks);
//! assert!(registry.allows_container("Alert"));
//! assert!(!registry.allows_container("Card"));
//! assert!(registry.get("Card").is_some_and(|b| b.parse_fence_body_as_markdown));
//! ```
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::props::PropsParser;

/// Per-name component configuration as supplied by the caller.
pub type ComponentBlocks = IndexMap<String, ComponentBlockEntry>;

/// A single component block entry: a flag or an explicit configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ComponentBlockEntry {
  /// `true` enables every syntax with default settings, `false` disables the
  /// name entirely.
  Enabled(bool),
  Config(ComponentBlockConfig),
}

impl From<bool> for ComponentBlockEntry {
  fn from(enabled: bool) -> Self {
    Self::Enabled(enabled)
  }
}

impl From<ComponentBlockConfig> for ComponentBlockEntry {
  fn from(config: ComponentBlockConfig) -> Self {
    Self::Config(config)
  }
}

/// Explicit configuration for one component name. Unset fields take their
/// defaults during normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentBlockConfig {
  /// Recognize `::: Name` containers. Defaults to `true`.
  pub container: Option<bool>,

  /// Recognize `component:Name` fences. Defaults to `true`.
  pub fence: Option<bool>,

  /// Parse a fence component's body as markdown children instead of keeping
  /// it as raw source. Defaults to `false`.
  pub parse_fence_body_as_markdown: Option<bool>,

  /// Replace the default props heuristic for this component.
  #[serde(skip)]
  pub parse_props: Option<PropsParser>,
}

/// A fully defaulted component block.
#[derive(Debug, Clone)]
pub struct ComponentBlock {
  pub container:                    bool,
  pub fence:                        bool,
  pub parse_fence_body_as_markdown: bool,
  pub parse_props:                  PropsParser,
}

impl Default for ComponentBlock {
  fn default() -> Self {
    Self {
      container:                    true,
      fence:                        true,
      parse_fence_body_as_markdown: false,
      parse_props:                  PropsParser::default(),
    }
  }
}

impl From<ComponentBlockConfig> for ComponentBlock {
  fn from(config: ComponentBlockConfig) -> Self {
    let defaults = Self::default();
    Self {
      container:                    config
        .container
        .unwrap_or(defaults.container),
      fence:                        config.fence.unwrap_or(defaults.fence),
      parse_fence_body_as_markdown: config
        .parse_fence_body_as_markdown
        .unwrap_or(defaults.parse_fence_body_as_markdown),
      parse_props:                  config
        .parse_props
        .unwrap_or(defaults.parse_props),
    }
  }
}

/// Immutable, normalized component configuration.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
  blocks: IndexMap<String, ComponentBlock>,
}

impl ComponentRegistry {
  /// Normalize caller configuration. `false` entries are dropped.
  #[must_use]
  pub fn new(blocks: &ComponentBlocks) -> Self {
    let mut normalized = IndexMap::with_capacity(blocks.len());

    for (name, entry) in blocks {
      let block = match entry {
        ComponentBlockEntry::Enabled(false) => {
          debug!("Component block `{name}` is disabled");
          continue;
        },
        ComponentBlockEntry::Enabled(true) => ComponentBlock::default(),
        ComponentBlockEntry::Config(config) => {
          ComponentBlock::from(config.clone())
        },
      };
      normalized.insert(name.clone(), block);
    }

    Self { blocks: normalized }
  }

  /// Configuration for `name`, if registered.
  #[must_use]
  pub fn get(&self, name: &str) -> Option<&ComponentBlock> {
    self.blocks.get(name)
  }

  /// Whether `name` is registered with container syntax enabled.
  #[must_use]
  pub fn allows_container(&self, name: &str) -> bool {
    self.get(name).is_some_and(|block| block.container)
  }

  /// Names registered with container syntax enabled, in configuration order.
  pub fn container_names(&self) -> impl Iterator<Item = &str> {
    self
      .blocks
      .iter()
      .filter(|(_, block)| block.container)
      .map(|(name, _)| name.as_str())
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.blocks.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.blocks.is_empty()
  }
}

/// Infer component blocks from a map of component implementations.
///
/// Every name starting with an ASCII uppercase letter is treated as a custom
/// component with container and fence syntax enabled; lowercase names (usually
/// overrides for plain elements such as `p` or `a`) are ignored.
///
/// ```
/// use std::collections::BTreeMap;
///
/// use mdtree::infer_component_blocks;
///
/// let components = BTreeMap::from([("Alert", ()), ("p", ()), ("Chart", ())]);
/// let blocks = infer_component_blocks(&components);
/// assert_eq!(blocks.keys().collect::<Vec<_>>(), ["Alert", "Chart"]);
/// ```
pub fn infer_component_blocks<I, K, V>(components: I) -> ComponentBlocks
where
  I: IntoIterator<Item = (K, V)>,
  K: AsRef<str>,
{
  components
    .into_iter()
    .map(|(name, _)| name.as_ref().to_string())
    .filter(|name| is_likely_component_name(name))
    .map(|name| {
      let config = ComponentBlockConfig {
        container:                    Some(true),
        fence:                        Some(true),
        parse_fence_body_as_markdown: Some(false),
        parse_props:                  None,
      };
      (name, ComponentBlockEntry::Config(config))
    })
    .collect()
}

fn is_likely_component_name(name: &str) -> bool {
  name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}
