//! Helper functions for the markup tokenizer.
//!
//! This module contains the scanning primitives every state builds on:
//! - Lookahead ("the next few characters are")
//! - Consuming runs of characters while or until a predicate holds
//! - Token emission with the span the token was read from

use super::scanner::HTMLTokenizer;
use super::token::{SourceSpan, Token, TokenKind};

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// The character under the cursor, or `None` at end of input.
    pub(super) fn current(&self) -> Option<char> {
        self.input.get(self.current_pos).copied()
    }

    /// True once the cursor has passed the last character.
    pub(super) fn at_eof(&self) -> bool {
        self.current_pos >= self.input.len()
    }

    /// Move the cursor forward, never past the end of input.
    pub(super) fn advance(&mut self, count: usize) {
        self.current_pos = (self.current_pos + count).min(self.input.len());
    }

    /// Check if the next few characters match `target` exactly.
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        let mut offset = self.current_pos;
        for expected in target.chars() {
            match self.input.get(offset) {
                Some(&c) if c == expected => offset += 1,
                _ => return false,
            }
        }
        true
    }

    /// Check if the next few characters match `target`, ignoring ASCII case.
    #[must_use]
    pub fn next_few_characters_are_ignore_case(&self, target: &str) -> bool {
        let mut offset = self.current_pos;
        for expected in target.chars() {
            match self.input.get(offset) {
                Some(c) if c.eq_ignore_ascii_case(&expected) => offset += 1,
                _ => return false,
            }
        }
        true
    }

    /// Consume characters while `predicate` holds and return them.
    pub(super) fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut run = String::new();
        while let Some(c) = self.current() {
            if !predicate(c) {
                break;
            }
            run.push(c);
            self.current_pos += 1;
        }
        run
    }

    /// Consume characters up to (not including) the first one matching
    /// `stop`, or to end of input.
    pub(super) fn consume_until(&mut self, stop: impl Fn(char) -> bool) -> String {
        self.consume_while(|c| !stop(c))
    }

    /// Skip any whitespace under the cursor.
    pub(super) fn skip_whitespace(&mut self) {
        let _ = self.consume_while(char::is_whitespace);
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Emit a token covering the input from `start` to the cursor.
    pub(super) fn emit(&mut self, kind: TokenKind, start: usize) {
        let span = SourceSpan::new(start, self.current_pos);
        self.token_stream.push(Token::new(kind, span));
    }
}
