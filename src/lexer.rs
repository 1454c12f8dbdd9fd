//! Token definitions for the egg grammar
//!
//! Whitespace and both comment styles (`// ...` line, `/* ... */` block)
//! are insignificant: the lexer skips them and they are never reproduced
//! on serialization.

use logos::Logos;
use std::fmt;
use std::ops::Range;

use crate::error::ParseError;

/// Terminals of the egg grammar.
///
/// String-carrying tokens borrow the raw source slice; quoted strings keep
/// their surrounding quotes so the parser can decide whether to strip them
/// (names) or preserve them (leaf values).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*[^/])*\*/")]
pub enum Token<'src> {
    #[token("<")]
    LAngle,

    #[token(">")]
    RAngle,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    /// Double-quoted string with backslash escaping, quotes included.
    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice())]
    Quoted(&'src str),

    /// Single-quoted string, accepted as a lexical superset for names.
    #[regex(r"'([^'\\]|\\.)*'", |lex| lex.slice())]
    SingleQuoted(&'src str),

    /// Numeric token: signed floats with exponents, bare hex digit runs
    /// (no `0x` prefix), and the `nan` / `inf` / `-inf` / `.#inf` forms.
    #[regex(
        r"-?(([0-9]+(\.[0-9]*)?)|([0-9]*\.[0-9]+))(e-?[0-9]+)?|[0-9a-fA-F]+|nan|-?(\.#)?inf",
        |lex| lex.slice(),
        priority = 5
    )]
    Number(&'src str),

    /// Any other bare token.
    #[regex(r#"[^ \t\r\n\f"{}<>]+"#, |lex| lex.slice())]
    Word(&'src str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LAngle => write!(f, "<"),
            Token::RAngle => write!(f, ">"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Quoted(s) | Token::SingleQuoted(s) => write!(f, "string {s}"),
            Token::Number(s) => write!(f, "number {s}"),
            Token::Word(s) => write!(f, "token {s}"),
        }
    }
}

/// Tokenize a whole egg buffer, with byte spans.
///
/// Input the lexer cannot classify is a fatal [`ParseError::Lex`] carrying
/// the offending byte offset.
pub fn lex(source: &str) -> Result<Vec<(Token<'_>, Range<usize>)>, ParseError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(next) = lexer.next() {
        match next {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                return Err(ParseError::Lex {
                    offset: lexer.span().start,
                })
            }
        }
    }
    Ok(tokens)
}
