//! Parser entry points.
//!
//! - [`core`]: `MarkdownParser` construction and the parse pipeline
//! - [`process`]: one-shot and batch helpers
//! - [`types`]: configuration structures
pub mod core;
pub mod process;
pub mod types;

pub use process::{parse_batch, parse_markdown};
pub use types::{MarkdownParser, ParseOptions, ParseOptionsBuilder};
