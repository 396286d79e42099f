//! Parser configuration loaded from TOML or JSON files.
//!
//! ```
//! use mdtree_config::ParserConfig;
//!
//! let config = ParserConfig::from_toml_str(
//!   r#"
//! containers = ["aside"]
//!
//! [components]
//! Alert = true
//! Card = { parse_fence_body_as_markdown = true }
//! "#,
//! )
//! .unwrap_or_default();
//!
//! let parser = mdtree::MarkdownParser::new(config.into_parse_options());
//! assert!(parser.registry().allows_container("Alert"));
//! ```
pub mod config;
pub mod error;

pub use config::ParserConfig;
pub use error::ConfigError;
