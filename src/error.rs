//! Error types for parsing and pre-mutation validation
//!
//! `ParseError` is fatal and synchronous: the parser performs no partial
//! tree recovery. `ValidationError` is raised by structural operations
//! before any tree mutation happens, so a failed operation never leaves a
//! partially transformed tree behind. Lookup misses are not errors; they
//! are reported through the `log` side channel and the operation becomes a
//! no-op.

use std::ops::Range;
use thiserror::Error;

/// Fatal failure to parse an egg buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer hit a character sequence no terminal accepts.
    #[error("unrecognized input at byte {offset}")]
    Lex { offset: usize },
    /// The token stream does not reduce via the grammar.
    #[error("syntax error at {span:?}: {message}")]
    Syntax { span: Range<usize>, message: String },
}

/// Fatal validation failure, raised before any mutation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("malformed collide bitmask: {0:?}")]
    MalformedBitmask(String),
    #[error("size must be a power of two, got {0}")]
    NotPowerOfTwo(u64),
    #[error("invalid uv scroll speed: {0:?}")]
    InvalidScrollSpeed(String),
    #[error("uv scroll speeds cannot both be zero")]
    ZeroScrollSpeeds,
}
