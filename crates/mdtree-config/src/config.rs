use std::{
  fs,
  path::{Path, PathBuf},
};

use mdtree::{
  ComponentBlockEntry,
  ComponentBlocks,
  ParseOptions,
  TokenizerOptions,
  TokenizerPlugin,
};
use serde::Deserialize;

use crate::error::ConfigError;

/// File names searched by [`ParserConfig::find_config_file`], in priority
/// order.
const CONFIG_FILENAMES: [&str; 6] = [
  "mdtree.toml",
  "mdtree.json",
  ".mdtree.toml",
  ".mdtree.json",
  ".config/mdtree.toml",
  ".config/mdtree.json",
];

/// Parser configuration as stored on disk.
///
/// Every field is optional in the file; missing fields take the parser
/// defaults. Component entries are either a boolean or a table of overrides:
///
/// ```toml
/// fence_component_prefix = "component:"
/// containers = ["aside"]
/// heading_ids = true
///
/// [tokenizer]
/// html = false
/// tasklist = true
///
/// [components]
/// Alert = true
/// Chart = { container = false }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
  /// Info-string prefix marking a fence as a component.
  pub fence_component_prefix: Option<String>,

  /// Markdown dialect switches.
  pub tokenizer: TokenizerOptions,

  /// Component names and their syntax settings.
  pub components: ComponentBlocks,

  /// Extra `:::` container names rendered as plain `div` elements.
  pub containers: Vec<String>,

  /// Add slugified `id` attributes to headings.
  pub heading_ids: bool,
}

impl ParserConfig {
  /// Parse configuration from a TOML string.
  ///
  /// # Errors
  ///
  /// Returns an error if the string is not valid TOML for this schema or the
  /// resulting configuration is invalid.
  pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Parse configuration from a JSON string.
  ///
  /// # Errors
  ///
  /// Returns an error if the string is not valid JSON for this schema or the
  /// resulting configuration is invalid.
  pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
    let config: Self = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Load configuration from a file, choosing the format by extension.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to a `.toml` or `.json` file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  #[allow(
    clippy::option_if_let_else,
    reason = "Clearer with explicit match on extension"
  )]
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    match path.extension().and_then(|ext| ext.to_str()) {
      Some(ext) => {
        match ext.to_lowercase().as_str() {
          "json" => {
            Self::from_json_str(&content).map_err(|e| {
              ConfigError::Config(format!(
                "Failed to parse JSON config from {}: {}",
                path.display(),
                e
              ))
            })
          },
          "toml" => {
            Self::from_toml_str(&content).map_err(|e| {
              ConfigError::Config(format!(
                "Failed to parse TOML config from {}: {}",
                path.display(),
                e
              ))
            })
          },
          _ => {
            Err(ConfigError::Config(format!(
              "Unsupported config file format: {}",
              path.display()
            )))
          },
        }
      },
      None => {
        Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load and merge several configuration files in order. With no files, the
  /// first config file found in `dir` is used, or the defaults if there is
  /// none.
  ///
  /// # Errors
  ///
  /// Returns an error if any file cannot be loaded.
  pub fn load(config_files: &[PathBuf], dir: &Path) -> Result<Self, ConfigError> {
    let Some((first, rest)) = config_files.split_first() else {
      return match Self::find_config_file(dir) {
        Some(discovered) => {
          log::info!("Using discovered config file: {}", discovered.display());
          Self::from_file(&discovered)
        },
        None => Ok(Self::default()),
      };
    };

    let mut merged = Self::from_file(first)?;
    for path in rest {
      merged.merge(Self::from_file(path)?);
    }

    if config_files.len() > 1 {
      log::info!("Loaded and merged {} config files", config_files.len());
    }

    Ok(merged)
  }

  /// Search `dir` for a config file in the usual locations.
  #[must_use]
  pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|name| dir.join(name))
      .find(|path| path.is_file())
  }

  /// Merge another config into this one, with the other config's values taking
  /// precedence.
  ///
  /// # Merge Rules
  ///
  /// - `fence_component_prefix`: other's [`Some`] value replaces this one
  /// - `tokenizer` and `heading_ids`: other's value always replaces
  /// - `components`: other's entries are merged in, overriding individual names
  /// - `containers`: other's names are appended, skipping duplicates
  pub fn merge(&mut self, other: Self) {
    if other.fence_component_prefix.is_some() {
      self.fence_component_prefix = other.fence_component_prefix;
    }
    self.tokenizer = other.tokenizer;
    self.heading_ids = other.heading_ids;
    self.components.extend(other.components);

    for name in other.containers {
      if !self.containers.contains(&name) {
        self.containers.push(name);
      }
    }
  }

  /// Check values that deserialize fine but cannot work.
  ///
  /// # Errors
  ///
  /// Returns an error for an empty fence prefix, or component and container
  /// names that are empty or contain whitespace.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self
      .fence_component_prefix
      .as_deref()
      .is_some_and(|prefix| prefix.trim().is_empty())
    {
      return Err(ConfigError::Config(
        "fence_component_prefix must not be empty".to_string(),
      ));
    }

    let names = self
      .components
      .keys()
      .map(|name| ("component", name))
      .chain(self.containers.iter().map(|name| ("container", name)));
    for (kind, name) in names {
      if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(ConfigError::Config(format!(
          "Invalid {kind} name '{name}': names must be non-empty and contain \
           no whitespace"
        )));
      }
    }

    Ok(())
  }

  /// Whether `name` is configured as a component, regardless of which syntaxes
  /// are enabled.
  #[must_use]
  pub fn has_component(&self, name: &str) -> bool {
    matches!(
      self.components.get(name),
      Some(ComponentBlockEntry::Enabled(true) | ComponentBlockEntry::Config(_))
    )
  }

  /// Convert into parser options.
  #[must_use]
  pub fn into_parse_options(self) -> ParseOptions {
    let mut plugins = Vec::new();
    if !self.containers.is_empty() {
      plugins.push(TokenizerPlugin::containers(self.containers));
    }
    if self.heading_ids {
      plugins.push(TokenizerPlugin::heading_ids());
    }

    ParseOptions {
      tokenizer: None,
      tokenizer_options: self.tokenizer,
      plugins,
      component_blocks: self.components,
      fence_component_prefix: self.fence_component_prefix,
    }
  }
}

#[cfg(test)]
#[allow(clippy::expect_used, reason = "Fine in tests")]
mod tests {
  use super::*;

  #[test]
  fn test_empty_config_is_default() {
    let config = ParserConfig::from_toml_str("").expect("empty config parses");
    assert!(!config.heading_ids);
    assert!(config.components.is_empty());
    assert_eq!(config.tokenizer, TokenizerOptions::default());
  }

  #[test]
  fn test_merge_rules() {
    let mut base = ParserConfig {
      fence_component_prefix: Some("component:".to_string()),
      containers: vec!["aside".to_string()],
      ..Default::default()
    };
    base.components.insert("Alert".to_string(), true.into());

    let mut other = ParserConfig {
      containers: vec!["aside".to_string(), "tip".to_string()],
      heading_ids: true,
      ..Default::default()
    };
    other.components.insert("Alert".to_string(), false.into());
    other.components.insert("Chart".to_string(), true.into());

    base.merge(other);

    assert_eq!(base.fence_component_prefix.as_deref(), Some("component:"));
    assert_eq!(base.containers, ["aside", "tip"]);
    assert!(base.heading_ids);
    assert!(!base.has_component("Alert"));
    assert!(base.has_component("Chart"));
  }

  #[test]
  fn test_validate_rejects_bad_names() {
    let mut config = ParserConfig::default();
    config.components.insert("Two Words".to_string(), true.into());
    assert!(matches!(config.validate(), Err(ConfigError::Config(_))));

    let config = ParserConfig {
      fence_component_prefix: Some("  ".to_string()),
      ..Default::default()
    };
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_into_parse_options_adds_plugins() {
    let config = ParserConfig {
      containers: vec!["aside".to_string()],
      heading_ids: true,
      ..Default::default()
    };
    let options = config.into_parse_options();
    assert_eq!(options.plugins.len(), 2);
    assert!(options.tokenizer.is_none());
  }
}
