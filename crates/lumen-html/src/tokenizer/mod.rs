//! Markup tokenizer module.

/// Helper methods for input scanning and token emission.
pub mod helpers;
/// Tokenizer state dispatch and per-state scanners.
pub mod scanner;
/// Token types produced by the tokenizer.
pub mod token;

pub use scanner::{HTMLTokenizer, TokenizerState, VOID_ELEMENTS, tokenize};
pub use token::{SourceSpan, Token, TokenKind};
