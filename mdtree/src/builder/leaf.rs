//! Block-level leaf tokens.
use log::trace;

use super::{ParseState, attrs_to_map, inline::build_inlines};
use crate::{
  component::parse_fence_spec,
  props::{PropsContext, PropsParser},
  token::Token,
  types::{
    CodeNode,
    ComponentNode,
    ComponentSyntax,
    ElementNode,
    HtmlNode,
    Node,
    TextNode,
  },
};

/// Nodes for one leaf token. Inline runs expand to several nodes; tokens
/// without content produce none.
pub fn build_leaf(token: &Token, state: &mut ParseState<'_>) -> Vec<Node> {
  match token.ty.as_str() {
    "inline" => build_inlines(&token.children, state),
    "fence" => {
      let node =
        fence_component(token, state).unwrap_or_else(|| fenced_code(token, state));
      vec![node]
    },
    "code_block" => {
      vec![Node::Code(CodeNode {
        key:    state.next_key(),
        inline: false,
        text:   token.content.clone(),
        lang:   None,
        info:   None,
        attrs:  attrs_to_map(&token.attrs),
      })]
    },
    "html_block" => {
      vec![Node::Html(HtmlNode {
        key:   state.next_key(),
        value: token.content.clone(),
        block: true,
      })]
    },
    "hr" => {
      vec![Node::Element(ElementNode {
        key:      state.next_key(),
        name:     "hr".to_string(),
        attrs:    attrs_to_map(&token.attrs),
        children: Vec::new(),
        block:    true,
      })]
    },
    _ if !token.content.is_empty() => {
      vec![Node::Text(TextNode {
        key:   state.next_key(),
        value: token.content.clone(),
      })]
    },
    _ => Vec::new(),
  }
}

fn fenced_code(token: &Token, state: &mut ParseState<'_>) -> Node {
  let lang = token
    .info
    .split_whitespace()
    .next()
    .map(ToString::to_string);

  Node::Code(CodeNode {
    key: state.next_key(),
    inline: false,
    text: token.content.clone(),
    lang,
    info: Some(token.info.clone()),
    attrs: attrs_to_map(&token.attrs),
  })
}

/// A fence whose info string names a component, or `None` for plain code.
fn fence_component(token: &Token, state: &mut ParseState<'_>) -> Option<Node> {
  let spec = parse_fence_spec(&token.info, state.fence_prefix, state.registry)?;
  trace!("Fence component `{}`", spec.name);

  let block = state.registry.get(spec.name);
  let context = PropsContext {
    name:   spec.name,
    syntax: ComponentSyntax::Fence,
  };
  let props = match block {
    Some(block) => block.parse_props.parse(spec.props_raw, &context),
    None => PropsParser::default().parse(spec.props_raw, &context),
  };

  let (children, source) = if block.is_some_and(|b| b.parse_fence_body_as_markdown) {
    (state.parse_fragment(&token.content), None)
  } else {
    (Vec::new(), Some(token.content.clone()))
  };

  Some(Node::Component(ComponentNode {
    key: state.next_key(),
    name: spec.name.to_string(),
    syntax: ComponentSyntax::Fence,
    props,
    children,
    source,
  }))
}
