//! Lowering of a comrak AST into the flat token stream.
use comrak::nodes::{AstNode, ListType, NodeValue};

use super::{
  TokenizerOptions,
  containers::{MarkerKind, Markers},
};
use crate::token::{CLOSE, LEAF, OPEN, Token, container_types};

/// Where a block sits, as far as token flags are concerned.
#[derive(Debug, Clone, Copy, Default)]
struct BlockContext {
  /// Direct child of an item in a tight list; paragraphs here are hidden.
  tight_item: bool,
}

/// Append the tokens for every block below `root`. HTML blocks standing in
/// for `markers` become container tokens.
pub fn lower_document<'a>(
  root: &'a AstNode<'a>,
  options: &TokenizerOptions,
  markers: &Markers,
  out: &mut Vec<Token>,
) {
  let lowering = Lowering { options, markers };
  lowering.blocks(root, BlockContext::default(), out);
}

struct Lowering<'o> {
  options: &'o TokenizerOptions,
  markers: &'o Markers,
}

impl Lowering<'_> {
  fn blocks<'a>(
    &self,
    parent: &'a AstNode<'a>,
    ctx: BlockContext,
    out: &mut Vec<Token>,
  ) {
    // (name, marker length) of containers open in this parent
    let mut open: Vec<(&str, usize)> = Vec::new();

    for child in parent.children() {
      let marker = match &child.data.borrow().value {
        NodeValue::HtmlBlock(html) => self.markers.get(&html.literal),
        _ => None,
      };

      // Paragraphs inside a container are not tight-list paragraphs
      let child_ctx = if open.is_empty() {
        ctx
      } else {
        BlockContext::default()
      };

      let Some(marker) = marker else {
        self.block(child, child_ctx, out);
        continue;
      };

      match &marker.kind {
        MarkerKind::Open { name, info } => {
          let (open_ty, _) = container_types(name);
          out.push(
            Token::open(open_ty, "div")
              .info(info.as_str())
              .markup(marker.markup.as_str()),
          );
          open.push((name.as_str(), marker.markup.len()));
        },
        MarkerKind::Close => {
          let top = open
            .last()
            .copied()
            .filter(|&(_, len)| marker.markup.len() >= len);
          if let Some((name, _)) = top {
            open.pop();
            let (_, close_ty) = container_types(name);
            out.push(Token::close(close_ty, "div").markup(marker.markup.as_str()));
          } else {
            text_paragraph(&marker.text, child_ctx, out);
          }
        },
      }
    }

    while let Some((name, _)) = open.pop() {
      let (_, close_ty) = container_types(name);
      out.push(Token::close(close_ty, "div"));
    }
  }

  fn block<'a>(&self, node: &'a AstNode<'a>, ctx: BlockContext, out: &mut Vec<Token>) {
    let data = node.data.borrow();
    let nested = BlockContext::default();

    match &data.value {
      NodeValue::FrontMatter(_) => {},
      NodeValue::BlockQuote => {
        out.push(Token::open("blockquote_open", "blockquote").markup(">"));
        self.blocks(node, nested, out);
        out.push(Token::close("blockquote_close", "blockquote").markup(">"));
      },
      NodeValue::List(list) => {
        let (ty, tag) = if matches!(list.list_type, ListType::Ordered) {
          ("ordered_list", "ol")
        } else {
          ("bullet_list", "ul")
        };
        let mut open = Token::open(format!("{ty}_open"), tag);
        if matches!(list.list_type, ListType::Ordered) && list.start != 1 {
          open = open.attr("start", list.start.to_string());
        }
        out.push(open);
        self.blocks(node, BlockContext { tight_item: list.tight }, out);
        out.push(Token::close(format!("{ty}_close"), tag));
      },
      NodeValue::Item(_) => {
        out.push(Token::open("list_item_open", "li"));
        self.blocks(node, ctx, out);
        out.push(Token::close("list_item_close", "li"));
      },
      NodeValue::TaskItem(..) => {
        out.push(
          Token::open("list_item_open", "li").attr("class", "task-list-item"),
        );
        self.blocks(node, ctx, out);
        out.push(Token::close("list_item_close", "li"));
      },
      NodeValue::Paragraph => {
        out.push(Token::open("paragraph_open", "p").hidden(ctx.tight_item));
        out.push(self.inline_token(node));
        out.push(Token::close("paragraph_close", "p").hidden(ctx.tight_item));
      },
      NodeValue::Heading(heading) => {
        let tag = format!("h{}", heading.level);
        let markup = "#".repeat(usize::from(heading.level));
        out.push(Token::open("heading_open", tag.as_str()).markup(markup.as_str()));
        out.push(self.inline_token(node));
        out.push(Token::close("heading_close", tag).markup(markup));
      },
      NodeValue::CodeBlock(code) => {
        let token = if code.fenced {
          Token::new("fence", "code", LEAF)
            .info(code.info.as_str())
            .markup("```")
        } else {
          Token::new("code_block", "code", LEAF)
        };
        out.push(token.content(code.literal.as_str()).block(true));
      },
      NodeValue::HtmlBlock(html) => {
        if self.options.html {
          out.push(
            Token::new("html_block", "", LEAF)
              .content(html.literal.as_str())
              .block(true),
          );
        } else {
          text_paragraph(html.literal.trim_end_matches('\n'), ctx, out);
        }
      },
      NodeValue::ThematicBreak => {
        out.push(Token::new("hr", "hr", LEAF).markup("---").block(true));
      },
      NodeValue::Table(..) => self.table(node, out),
      _ => self.blocks(node, nested, out),
    }
  }

  fn table<'a>(&self, node: &'a AstNode<'a>, out: &mut Vec<Token>) {
    out.push(Token::open("table_open", "table"));

    let (header, body): (Vec<_>, Vec<_>) = node
      .children()
      .partition(|row| matches!(row.data.borrow().value, NodeValue::TableRow(true)));

    for (section, rows, cell) in [("thead", header, "th"), ("tbody", body, "td")] {
      if rows.is_empty() {
        continue;
      }
      out.push(Token::open(format!("{section}_open"), section));
      for row in rows {
        out.push(Token::open("tr_open", "tr"));
        for cell_node in row.children() {
          out.push(Token::open(format!("{cell}_open"), cell));
          out.push(self.inline_token(cell_node));
          out.push(Token::close(format!("{cell}_close"), cell));
        }
        out.push(Token::close("tr_close", "tr"));
      }
      out.push(Token::close(format!("{section}_close"), section));
    }

    out.push(Token::close("table_close", "table"));
  }

  fn inline_token<'a>(&self, node: &'a AstNode<'a>) -> Token {
    let mut children = Vec::new();
    self.inlines(node, &mut children);
    Token::inline(children)
  }

  fn inlines<'a>(&self, parent: &'a AstNode<'a>, out: &mut Vec<Token>) {
    for child in parent.children() {
      self.inline(child, out);
    }
  }

  fn wrap<'a>(
    &self,
    node: &'a AstNode<'a>,
    open: Token,
    out: &mut Vec<Token>,
  ) {
    let close_ty = crate::token::close_type(&open.ty);
    let close = Token::new(close_ty, open.tag.as_str(), CLOSE).markup(open.markup.as_str());
    out.push(open);
    self.inlines(node, out);
    out.push(close);
  }

  fn inline<'a>(&self, node: &'a AstNode<'a>, out: &mut Vec<Token>) {
    let data = node.data.borrow();

    match &data.value {
      NodeValue::Text(text) => out.push(Token::text(text.to_string())),
      NodeValue::SoftBreak => out.push(Token::new("softbreak", "br", LEAF)),
      NodeValue::LineBreak => out.push(Token::new("hardbreak", "br", LEAF)),
      NodeValue::Code(code) => {
        out.push(
          Token::new("code_inline", "code", LEAF)
            .content(code.literal.as_str())
            .markup("`"),
        );
      },
      NodeValue::HtmlInline(html) => {
        if let Some(marker) = self.markers.get(html) {
          out.push(Token::text(marker.text.as_str()));
        } else if self.options.html {
          out.push(Token::new("html_inline", "", LEAF).content(html.as_str()));
        } else {
          out.push(Token::text(html.as_str()));
        }
      },
      NodeValue::Emph => {
        self.wrap(node, Token::new("em_open", "em", OPEN).markup("*"), out);
      },
      NodeValue::Strong => {
        self.wrap(node, Token::new("strong_open", "strong", OPEN).markup("**"), out);
      },
      NodeValue::Strikethrough => {
        self.wrap(node, Token::new("s_open", "s", OPEN).markup("~~"), out);
      },
      NodeValue::Superscript => {
        self.wrap(node, Token::new("sup_open", "sup", OPEN).markup("^"), out);
      },
      NodeValue::Subscript => {
        self.wrap(node, Token::new("sub_open", "sub", OPEN).markup("~"), out);
      },
      NodeValue::Link(link) => {
        let mut open = Token::new("link_open", "a", OPEN).attr("href", link.url.as_str());
        if !link.title.is_empty() {
          open = open.attr("title", link.title.as_str());
        }
        self.wrap(node, open, out);
      },
      NodeValue::Image(link) => {
        let mut alt = Vec::new();
        self.inlines(node, &mut alt);
        let alt_text = alt.iter().map(|t| t.content.as_str()).collect::<String>();

        let mut image = Token::new("image", "img", LEAF)
          .attr("src", link.url.as_str())
          .attr("alt", "");
        if !link.title.is_empty() {
          image = image.attr("title", link.title.as_str());
        }
        out.push(image.content(alt_text).children(alt));
      },
      _ => self.inlines(node, out),
    }
  }
}

fn text_paragraph(text: &str, ctx: BlockContext, out: &mut Vec<Token>) {
  out.push(Token::open("paragraph_open", "p").hidden(ctx.tight_item));
  out.push(Token::inline(vec![Token::text(text)]));
  out.push(Token::close("paragraph_close", "p").hidden(ctx.tight_item));
}
