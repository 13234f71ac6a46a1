//! Rowan-based parser for the C# subset the completers read
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! We build a lossless CST that preserves all whitespace and comments,
//! then extract an AST layer on top.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone, Send + Sync)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//!     ↓
//! HIR → SemanticIndex
//! ```
//!
//! Only the shapes the completers inspect (type declarations, members,
//! static constructor statements, call chains) are modelled in detail.
//! Everything else is parsed structurally and kept as opaque nodes.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod lexer;
mod syntax_kind;

pub use ast::*;
pub use lexer::{Lexer, Token, is_reserved_keyword, tokenize};
pub use parser::{Parse, SyntaxError, parse};
pub(crate) use parser::release_tree;
pub use syntax_kind::{CSharpLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
