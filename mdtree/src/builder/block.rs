//! Block-level reconstruction.
use log::{trace, warn};

use super::{
  ParseState,
  attrs_to_map,
  find_close_index,
  leaf,
  normalize_node_name,
};
use crate::{
  component::container_props_raw,
  props::PropsContext,
  token::{LEAF, OPEN, Token, close_type, container_name},
  types::{ComponentNode, ComponentSyntax, ElementNode, Node},
};

/// Build nodes from a block-level token stream.
pub fn build_blocks(tokens: &[Token], state: &mut ParseState<'_>) -> Vec<Node> {
  let mut nodes = Vec::new();
  let mut index = 0;

  while index < tokens.len() {
    let token = &tokens[index];

    // Hidden wrappers such as tight-list paragraphs vanish; their content
    // lands in the parent
    if token.hidden && token.nesting != LEAF {
      index += 1;
      continue;
    }

    if token.nesting == OPEN {
      if let Some(name) = registered_container(token, state) {
        let close_ty = close_type(&token.ty);
        if let Some(close) = find_close_index(tokens, index, &token.ty, &close_ty) {
          let node = container_component(name, token, &tokens[index + 1..close], state);
          nodes.push(node);
          index = close + 1;
          continue;
        }
      }

      if token.is_open() {
        let close_ty = close_type(&token.ty);
        let Some(close) = find_close_index(tokens, index, &token.ty, &close_ty) else {
          warn!("Skipping `{}` token without a matching `{close_ty}`", token.ty);
          index += 1;
          continue;
        };

        let children = build_blocks(&tokens[index + 1..close], state);
        nodes.push(Node::Element(ElementNode {
          key: state.next_key(),
          name: normalize_node_name(token),
          attrs: attrs_to_map(&token.attrs),
          children,
          block: token.block,
        }));
        index = close + 1;
        continue;
      }
    }

    if token.nesting == LEAF {
      nodes.extend(leaf::build_leaf(token, state));
    }

    index += 1;
  }

  nodes
}

/// Container name of `token` if it opens a container registered as a
/// component with container syntax enabled.
fn registered_container<'t>(token: &'t Token, state: &ParseState<'_>) -> Option<&'t str> {
  container_name(&token.ty).filter(|name| state.registry.allows_container(name))
}

fn container_component(
  name: &str,
  token: &Token,
  interior: &[Token],
  state: &mut ParseState<'_>,
) -> Node {
  trace!("Container component `{name}`");

  let props_raw = container_props_raw(name, &token.info);
  let props = state
    .registry
    .get(name)
    .map(|block| {
      block.parse_props.parse(props_raw, &PropsContext {
        name,
        syntax: ComponentSyntax::Container,
      })
    })
    .unwrap_or_default();

  let key = state.next_key();
  let children = build_blocks(interior, state);

  Node::Component(ComponentNode {
    key,
    name: name.to_string(),
    syntax: ComponentSyntax::Container,
    props,
    children,
    source: None,
  })
}

#[cfg(test)]
#[allow(clippy::panic, reason = "Fine in tests")]
mod tests {
  use super::*;
  use crate::{
    registry::{ComponentBlocks, ComponentRegistry},
    tokenizer::MarkdownTokenizer,
  };

  fn build(tokens: &[Token], blocks: &ComponentBlocks) -> Vec<Node> {
    let registry = ComponentRegistry::new(blocks);
    let tokenizer = MarkdownTokenizer::default();
    let mut state = ParseState::new(&registry, &tokenizer, "component:");
    build_blocks(tokens, &mut state)
  }

  fn paragraph(text: &str) -> [Token; 3] {
    [
      Token::open("paragraph_open", "p"),
      Token::inline(vec![Token::text(text)]),
      Token::close("paragraph_close", "p"),
    ]
  }

  #[test]
  fn test_registered_container_becomes_component() {
    let mut tokens = vec![
      Token::open("container_Alert_open", "div")
        .info(" Alert type=info")
        .markup(":::"),
    ];
    tokens.extend(paragraph("Body"));
    tokens.push(Token::close("container_Alert_close", "div"));

    let blocks = ComponentBlocks::from([("Alert".to_string(), true.into())]);
    let nodes = build(&tokens, &blocks);

    let [Node::Component(alert)] = nodes.as_slice() else {
      panic!("expected one component, got {nodes:?}");
    };
    assert_eq!(alert.name, "Alert");
    assert_eq!(alert.syntax, ComponentSyntax::Container);
    assert_eq!(alert.props.get("type").and_then(|v| v.as_str()), Some("info"));
    assert_eq!(alert.key, "n_0");
    assert_eq!(alert.children.len(), 1);
    assert_eq!(alert.children[0].name(), Some("p"));
  }

  #[test]
  fn test_unregistered_container_becomes_div() {
    let mut tokens = vec![Token::open("container_aside_open", "div")];
    tokens.extend(paragraph("Body"));
    tokens.push(Token::close("container_aside_close", "div"));

    let nodes = build(&tokens, &ComponentBlocks::new());
    let [Node::Element(div)] = nodes.as_slice() else {
      panic!("expected one element, got {nodes:?}");
    };
    assert_eq!(div.name, "div");
    assert!(div.block);
  }

  #[test]
  fn test_hidden_wrappers_are_spliced() {
    let tokens = vec![
      Token::open("list_item_open", "li"),
      Token::open("paragraph_open", "p").hidden(true),
      Token::inline(vec![Token::text("item")]),
      Token::close("paragraph_close", "p").hidden(true),
      Token::close("list_item_close", "li"),
    ];
    let nodes = build(&tokens, &ComponentBlocks::new());

    let [Node::Element(item)] = nodes.as_slice() else {
      panic!("expected one element, got {nodes:?}");
    };
    assert!(matches!(item.children.as_slice(), [Node::Text(text)] if text.value == "item"));
  }

  #[test]
  fn test_unmatched_open_is_skipped() {
    let mut tokens = vec![Token::open("blockquote_open", "blockquote")];
    tokens.extend(paragraph("still here"));

    let nodes = build(&tokens, &ComponentBlocks::new());
    let [Node::Element(p)] = nodes.as_slice() else {
      panic!("expected one element, got {nodes:?}");
    };
    assert_eq!(p.name, "p");
  }

  #[test]
  fn test_stray_close_is_ignored() {
    let tokens = vec![Token::close("blockquote_close", "blockquote")];
    assert!(build(&tokens, &ComponentBlocks::new()).is_empty());
  }

  #[test]
  fn test_nesting_depth_is_preserved() {
    let depth = 6;
    let mut tokens = Vec::new();
    for _ in 0..depth {
      tokens.push(Token::open("blockquote_open", "blockquote"));
    }
    tokens.extend(paragraph("deep"));
    for _ in 0..depth {
      tokens.push(Token::close("blockquote_close", "blockquote"));
    }

    let nodes = build(&tokens, &ComponentBlocks::new());
    let mut current = nodes.as_slice();
    for _ in 0..depth {
      let [Node::Element(quote)] = current else {
        panic!("expected a single blockquote, got {current:?}");
      };
      assert_eq!(quote.name, "blockquote");
      current = quote.children.as_slice();
    }
    assert_eq!(current[0].name(), Some("p"));
  }
}
