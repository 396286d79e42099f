//! Inline token streams.
use super::{ParseState, attrs_to_map, find_close_index, normalize_node_name};
use crate::{
  token::{Token, close_type},
  types::{BreakNode, CodeNode, ElementNode, HtmlNode, Node, TextNode},
};

/// Build nodes from the children of an `inline` token.
pub fn build_inlines(tokens: &[Token], state: &mut ParseState<'_>) -> Vec<Node> {
  let mut nodes = Vec::new();
  let mut index = 0;

  while index < tokens.len() {
    let token = &tokens[index];

    match token.ty.as_str() {
      "text" => {
        nodes.push(Node::Text(TextNode {
          key:   state.next_key(),
          value: token.content.clone(),
        }));
      },
      "softbreak" | "hardbreak" => {
        nodes.push(Node::Break(BreakNode {
          key:  state.next_key(),
          hard: token.ty == "hardbreak",
        }));
      },
      "html_inline" => {
        nodes.push(Node::Html(HtmlNode {
          key:   state.next_key(),
          value: token.content.clone(),
          block: false,
        }));
      },
      "code_inline" => {
        nodes.push(Node::Code(CodeNode {
          key:    state.next_key(),
          inline: true,
          text:   token.content.clone(),
          lang:   None,
          info:   None,
          attrs:  attrs_to_map(&token.attrs),
        }));
      },
      "image" => nodes.push(image(token, state)),
      _ => {
        if token.is_open() {
          let close_ty = close_type(&token.ty);
          if let Some(close) = find_close_index(tokens, index, &token.ty, &close_ty) {
            let children = build_inlines(&tokens[index + 1..close], state);
            nodes.push(Node::Element(ElementNode {
              key: state.next_key(),
              name: normalize_node_name(token),
              attrs: attrs_to_map(&token.attrs),
              children,
              block: false,
            }));
            index = close + 1;
            continue;
          }
        }

        if !token.content.is_empty() {
          nodes.push(Node::Text(TextNode {
            key:   state.next_key(),
            value: token.content.clone(),
          }));
        }
      },
    }

    index += 1;
  }

  nodes
}

/// Images are leaves; the alt text stream is flattened into the `alt`
/// attribute when the token doesn't carry a usable one.
fn image(token: &Token, state: &mut ParseState<'_>) -> Node {
  let mut attrs = attrs_to_map(&token.attrs);
  let has_alt = attrs.get("alt").is_some_and(|alt| !alt.is_empty());
  if !has_alt && !token.content.is_empty() {
    attrs.insert("alt".to_string(), token.content.clone());
  }

  let name = if token.tag.is_empty() {
    "img".to_string()
  } else {
    token.tag.clone()
  };

  Node::Element(ElementNode {
    key: state.next_key(),
    name,
    attrs,
    children: Vec::new(),
    block: false,
  })
}
