use lumen_common::warning::warn_once;
use lumen_dom::AttributesMap;
use strum_macros::Display;

use super::token::{Token, TokenKind};

/// Elements that can never have children. A start tag naming one of these
/// is emitted as a self-closing tag even without a trailing `/`.
pub const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// The scanner picked for the characters under the cursor.
///
/// There is no persistent state machine: each token starts from a fresh
/// dispatch on local lookahead and its scanner runs to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// `<!DOCTYPE`, any ASCII case.
    DoctypeStart,
    /// `<!--`
    CommentStart,
    /// `</`
    EndTagStart,
    /// `<` followed by anything else.
    StartTagStart,
    /// Anything that is not `<`.
    Text,
}

/// Single-pass markup tokenizer.
///
/// Never fails: unterminated tags and comments consume the rest of the
/// input and are still emitted. Pure-whitespace text runs produce no token.
pub struct HTMLTokenizer {
    pub(super) input: Vec<char>,
    pub(super) current_pos: usize,
    pub(super) token_stream: Vec<Token>,
}

/// Tokenize `input` in one call.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input);
    tokenizer.run();
    tokenizer.into_tokens()
}

impl HTMLTokenizer {
    /// Create a new tokenizer for the given input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            current_pos: 0,
            token_stream: Vec::new(),
        }
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after `run()` to get the tokens for the tree builder.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// Scan the whole input.
    ///
    /// Every scanner consumes at least one character, so this always
    /// terminates.
    pub fn run(&mut self) {
        while !self.at_eof() {
            match self.next_state() {
                TokenizerState::DoctypeStart => self.consume_doctype(),
                TokenizerState::CommentStart => self.consume_comment(),
                TokenizerState::EndTagStart => self.consume_end_tag(),
                TokenizerState::StartTagStart => self.consume_start_tag(),
                TokenizerState::Text => self.consume_text(),
            }
        }
    }

    /// Choose the scanner for the characters under the cursor.
    #[must_use]
    pub fn next_state(&self) -> TokenizerState {
        if self.next_few_characters_are_ignore_case("<!doctype") {
            TokenizerState::DoctypeStart
        } else if self.next_few_characters_are("<!--") {
            TokenizerState::CommentStart
        } else if self.next_few_characters_are("</") {
            TokenizerState::EndTagStart
        } else if self.next_few_characters_are("<") {
            TokenizerState::StartTagStart
        } else {
            TokenizerState::Text
        }
    }

    /// `<!DOCTYPE html>` - everything up to `>` is the content.
    fn consume_doctype(&mut self) {
        let start = self.current_pos;
        self.advance("<!DOCTYPE".len());
        self.skip_whitespace();

        let content = self.consume_until(|c| c == '>');
        if self.at_eof() {
            warn_once("HTML", "unterminated DOCTYPE consumed to end of input");
        }
        self.advance(1);

        self.emit(
            TokenKind::Doctype {
                content: content.trim().to_string(),
            },
            start,
        );
    }

    /// `<!-- ... -->` - content ends at the first `-->`.
    fn consume_comment(&mut self) {
        let start = self.current_pos;
        self.advance("<!--".len());

        let mut content = String::new();
        let mut terminated = false;
        while let Some(c) = self.current() {
            if self.next_few_characters_are("-->") {
                self.advance("-->".len());
                terminated = true;
                break;
            }
            content.push(c);
            self.advance(1);
        }
        if !terminated {
            warn_once("HTML", "unterminated comment consumed to end of input");
        }

        self.emit(TokenKind::Comment { content }, start);
    }

    /// `</name ...>` - anything between the name and `>` is discarded.
    fn consume_end_tag(&mut self) {
        let start = self.current_pos;
        self.advance("</".len());

        let name = self.consume_while(|c| c.is_ascii_alphanumeric());
        let _ = self.consume_until(|c| c == '>');
        if self.at_eof() {
            warn_once("HTML", &format!("unterminated end tag </{name}"));
        }
        self.advance(1);

        self.emit(
            TokenKind::EndTag {
                name: name.to_ascii_lowercase(),
            },
            start,
        );
    }

    /// `<name attr=value ...>` or `<name ... />`.
    fn consume_start_tag(&mut self) {
        let start = self.current_pos;
        self.advance("<".len());

        let name = self
            .consume_while(|c| c.is_ascii_alphanumeric())
            .to_ascii_lowercase();

        let mut attributes = AttributesMap::new();
        self.skip_whitespace();
        while let Some(c) = self.current() {
            if c == '>' || c == '/' {
                break;
            }
            if let Some((attr_name, value)) = self.consume_attribute() {
                // Later duplicates overwrite earlier ones.
                let _ = attributes.insert(attr_name, value);
            } else {
                warn_once("HTML", &format!("skipped unexpected '{c}' in <{name}> tag"));
                self.advance(1);
            }
            self.skip_whitespace();
        }

        let mut self_closing = false;
        if self.current() == Some('/') {
            self_closing = true;
            self.advance(1);
        }
        if self.current() == Some('>') {
            self.advance(1);
        } else if self.at_eof() {
            warn_once("HTML", &format!("unterminated <{name}> tag consumed to end of input"));
        }

        if VOID_ELEMENTS.contains(&name.as_str()) {
            self_closing = true;
        }

        let kind = if self_closing {
            TokenKind::SelfClosingTag { name, attributes }
        } else {
            TokenKind::StartTag { name, attributes }
        };
        self.emit(kind, start);
    }

    /// One `name`, `name=value`, `name="value"`, or `name='value'`.
    ///
    /// Returns `None` without consuming anything when the cursor is not on
    /// an attribute name character.
    fn consume_attribute(&mut self) -> Option<(String, String)> {
        let name = self.consume_while(is_attribute_name_char);
        if name.is_empty() {
            return None;
        }
        let name = name.to_ascii_lowercase();

        self.skip_whitespace();
        if self.current() != Some('=') {
            return Some((name, String::new()));
        }
        self.advance(1);
        self.skip_whitespace();

        let value = match self.current() {
            Some(quote @ ('"' | '\'')) => {
                self.advance(1);
                let value = self.consume_until(|c| c == quote);
                self.advance(1);
                value
            }
            _ => self.consume_while(|c| !c.is_whitespace() && c != '>'),
        };
        Some((name, value))
    }

    /// Text up to the next `<`. Whitespace-only runs are dropped here and
    /// never become tokens.
    fn consume_text(&mut self) {
        let start = self.current_pos;
        let content = self.consume_until(|c| c == '<');
        if !content.trim().is_empty() {
            self.emit(TokenKind::Text { content }, start);
        }
    }
}

/// `[A-Za-z0-9_:-]`
const fn is_attribute_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_state_dispatch() {
        assert_eq!(HTMLTokenizer::new("<!doctype html>").next_state(), TokenizerState::DoctypeStart);
        assert_eq!(HTMLTokenizer::new("<!-- x -->").next_state(), TokenizerState::CommentStart);
        assert_eq!(HTMLTokenizer::new("</p>").next_state(), TokenizerState::EndTagStart);
        assert_eq!(HTMLTokenizer::new("<p>").next_state(), TokenizerState::StartTagStart);
        assert_eq!(HTMLTokenizer::new("hello").next_state(), TokenizerState::Text);
    }

    #[test]
    fn test_stray_character_in_tag_makes_progress() {
        let tokens = tokenize("<div \"oops\" id=a>x</div>");
        assert_eq!(tokens.len(), 3);
        let attrs = tokens[0].attributes().unwrap();
        assert_eq!(attrs.get("id").map(String::as_str), Some("a"));
    }

    #[test]
    fn test_spans_cover_consumed_input() {
        let tokens = tokenize("<p>hi</p>");
        assert_eq!(tokens[0].span.start, 0);
        assert_eq!(tokens[0].span.end, 3);
        assert_eq!(tokens[1].span.start, 3);
        assert_eq!(tokens[1].span.end, 5);
        assert_eq!(tokens[2].span.end, 9);
    }
}
