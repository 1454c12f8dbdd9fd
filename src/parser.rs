//! Grammar-based parser for egg buffers
//!
//! The whole buffer is lexed at once and reduced with parser combinators;
//! there is no line-oriented pass. Informally:
//!
//! ```text
//! tree          := node+
//! node          := '<' TAG '>' NAME? '{' node_or_text* '}'
//! node_or_text  := node | leaf_contents
//! leaf_contents := QUOTED_STRING | NUMBER+ | UNQUOTED_STRING
//! ```
//!
//! After a node's contents are parsed, a node that reduced to exactly one
//! text fragment collapses into a leaf; anything else stays a branch with
//! raw text runs wrapped as text fragments. Consequences worth knowing:
//!
//! - `<VertexRef> { 1 2 3 <Ref> { Cube } }` is a branch whose children are
//!   the fragment `1 2 3` and a real `Ref` leaf, so searching by tag finds
//!   the inner node.
//! - Consecutive numeric tokens coalesce into one space-joined fragment, so
//!   a multi-line `<Matrix4>` body normalizes to a single line on the first
//!   reserialization. Output is stable from then on.
//! - Any input that does not reduce via the grammar is a fatal
//!   [`ParseError`]; there is no partial-tree recovery.

use chumsky::prelude::*;
use chumsky::Stream;

use crate::error::ParseError;
use crate::lexer::{lex, Token};
use crate::nodes::{sanitize_string, EggBranch, EggLeaf, EggNode, EggText, EggTree};

/// A parsed piece of node contents before the leaf/branch decision.
enum Item {
    Node(EggNode),
    Text(String),
}

fn assemble(tag: String, name: Option<String>, mut items: Vec<Item>) -> EggNode {
    if items.len() == 1 && matches!(items[0], Item::Text(_)) {
        if let Some(Item::Text(value)) = items.pop() {
            return EggNode::Leaf(EggLeaf::new(tag, name, value));
        }
    }
    let children = items
        .into_iter()
        .map(|item| match item {
            Item::Node(node) => node,
            Item::Text(text) => EggNode::Text(EggText::new(text)),
        })
        .collect();
    EggNode::Branch(EggBranch::new(tag, name, children))
}

fn unexpected<'s>(span: std::ops::Range<usize>, found: Token<'s>) -> Simple<Token<'s>> {
    Simple::expected_input_found(span, std::iter::empty(), Some(found))
}

fn node_parser<'s>() -> impl Parser<Token<'s>, EggNode, Error = Simple<Token<'s>>> {
    recursive(|node| {
        // Tags and names are bare tokens; numeric-looking ones are fine.
        let ident = filter_map(|span, tok| match tok {
            Token::Word(s) | Token::Number(s) => Ok(s.to_string()),
            other => Err(unexpected(span, other)),
        });

        // Quoted names are stored unquoted; equality of names is
        // quote-insensitive.
        let quoted_name = filter_map(|span, tok| match tok {
            Token::Quoted(s) | Token::SingleQuoted(s) => Ok(sanitize_string(s).to_string()),
            other => Err(unexpected(span, other)),
        });

        let name = ident.clone().or(quoted_name);

        // Leaf values keep their quotes; sanitization is a separate,
        // explicit step for consumers that treat values as filenames.
        let quoted_value = filter_map(|span, tok| match tok {
            Token::Quoted(s) | Token::SingleQuoted(s) => Ok(s.to_string()),
            other => Err(unexpected(span, other)),
        });

        let number = filter_map(|span, tok| match tok {
            Token::Number(s) => Ok(s.to_string()),
            other => Err(unexpected(span, other)),
        });

        let word = filter_map(|span, tok| match tok {
            Token::Word(s) => Ok(s.to_string()),
            other => Err(unexpected(span, other)),
        });

        let fragment = quoted_value
            .or(number.repeated().at_least(1).map(|run| run.join(" ")))
            .or(word);

        let item = node.map(Item::Node).or(fragment.map(Item::Text));

        just(Token::LAngle)
            .ignore_then(ident)
            .then_ignore(just(Token::RAngle))
            .then(name.or_not())
            .then(
                item.repeated()
                    .delimited_by(just(Token::LBrace), just(Token::RBrace)),
            )
            .map(|((tag, name), items)| assemble(tag, name, items))
    })
}

fn syntax_error(errors: Vec<Simple<Token<'_>>>) -> ParseError {
    match errors.into_iter().next() {
        Some(error) => {
            let message = match error.found() {
                Some(token) => format!("unexpected {token}"),
                None => String::from("unexpected end of input"),
            };
            ParseError::Syntax {
                span: error.span(),
                message,
            }
        }
        None => ParseError::Syntax {
            span: 0..0,
            message: String::from("input does not reduce"),
        },
    }
}

/// Parse a complete egg buffer into a tree.
///
/// The buffer must contain at least one node and nothing but nodes at the
/// top level; anything else is a fatal [`ParseError`].
pub fn parse(source: &str) -> Result<EggTree, ParseError> {
    let tokens = lex(source)?;
    let eoi = source.len()..source.len() + 1;
    node_parser()
        .repeated()
        .at_least(1)
        .then_ignore(end())
        .parse(Stream::from_iter(eoi, tokens.into_iter()))
        .map(EggTree::new)
        .map_err(syntax_error)
}
