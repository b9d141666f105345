//! Markup tokenizer and tree builder for the Lumen rendering pipeline.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** - a single forward scan producing doctype, start tag,
//!   end tag, self-closing tag, text, and comment tokens with source spans
//! - **Tree Builder** - a stack of open elements that turns tokens into a
//!   [`lumen_dom::DomTree`], ignoring end tags that close nothing
//!
//! # Not Implemented
//!
//! - Character references (`&amp;` is kept verbatim)
//! - Raw text elements (a `<` inside `<script>` starts a tag)
//! - Implied elements and insertion modes
//!
//! Neither stage fails: unterminated tags and comments consume the rest of
//! the input and are still emitted.

/// Tree construction from the token stream.
pub mod parser;
/// Tokenizer for converting markup into tokens.
pub mod tokenizer;

pub use parser::{MAX_TREE_DEPTH, ParseIssue, TreeBuilder, print_tree};
pub use tokenizer::{HTMLTokenizer, SourceSpan, Token, TokenKind, VOID_ELEMENTS, tokenize};
