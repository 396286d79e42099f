//! One-shot parsing helpers.
use super::types::{MarkdownParser, ParseOptions};
use crate::types::Root;

/// Parse markdown with a throwaway parser.
///
/// Builds a [`MarkdownParser`] from `options` and parses `markdown` once. When
/// parsing many documents with the same configuration, construct the parser
/// once instead.
///
/// # Arguments
///
/// * `markdown` - The markdown source
/// * `options` - Parser configuration
///
/// # Returns
///
/// The root of the node tree. Parsing never fails; malformed input degrades to
/// plain text and generic elements.
#[must_use]
pub fn parse_markdown(markdown: &str, options: &ParseOptions) -> Root {
  MarkdownParser::new(options.clone()).parse(markdown)
}

/// Parse several documents with one parser, keeping input order.
#[must_use]
pub fn parse_batch<I, S>(parser: &MarkdownParser, documents: I) -> Vec<Root>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  documents
    .into_iter()
    .map(|doc| parser.parse(doc.as_ref()))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_batch_keys_restart_per_document() {
    let parser = MarkdownParser::default();
    let roots = parse_batch(&parser, ["one", "two"]);

    assert_eq!(roots.len(), 2);
    for root in &roots {
      assert_eq!(root.children[0].key(), "n_1");
    }
  }
}
