//! # eggtree
//!
//! A parser, in-memory tree model, and transformation toolkit for Panda3D
//! egg model files.
//!
//! The egg format is a brace-delimited, S-expression-like scene
//! description: `<TAG> [name] { contents }`, nestable, with an open tag
//! vocabulary. This crate parses whole buffers into an [`EggTree`] of
//! typed nodes, supports searching and in-place mutation through the node
//! model, reserializes with exact two-space indentation (stable after one
//! normalization pass), and ships the structural operations an asset
//! pipeline applies between external converter runs (texture path
//! rewrites, collision tag injection, palette index stripping, material
//! removal, ...).
//!
//! ```text
//! <Group> a {
//!   <Group> b {
//!     <Scalar> alpha { dual }
//!   }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`lexer`] - token definitions for the egg grammar
//! - [`parser`] - the grammar-based parser
//! - [`nodes`] - the node model and serializer
//! - [`snapshot`] - normalized serializable tree view
//! - [`ops`] - structural transformations
//! - [`context`] - pipeline-facing context object
//! - [`error`] - parse and validation errors

pub mod context;
pub mod error;
pub mod lexer;
pub mod nodes;
pub mod ops;
pub mod parser;
pub mod snapshot;

pub use context::AssetContext;
pub use error::{ParseError, ValidationError};
pub use nodes::{
    quote_egg_string, sanitize_string, EggBranch, EggLeaf, EggNode, EggText, EggTree, NodeId,
};
pub use parser::parse;
pub use snapshot::{snapshot_node, snapshot_tree, NodeSnapshot};
