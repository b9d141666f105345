//! Stylesheet parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing),
//! reduced to what the pipeline consumes.
//!
//! The parser reads characters directly rather than a token stream. A
//! stylesheet is a list of `selector { property: value; ... }` rules;
//! selectors are kept as raw text and only interpreted during the cascade.
//! Malformed input is skipped, never rejected.

use lumen_common::warning::warn_once;
use serde::Serialize;

use crate::selector::Specificity;

/// [§ 5.4.4 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-a-declaration)
///
/// A CSS declaration (e.g., `color: red`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// The property name, trimmed and lower-cased.
    pub property: String,
    /// The value text, trimmed. Never empty.
    pub value: String,
}

impl Declaration {
    /// Create a declaration.
    #[must_use]
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-a-qualified-rule)
///
/// A CSS style rule (selector + declarations).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleRule {
    /// Raw selector text, trimmed. Never empty.
    pub selector: String,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
    /// Computed from the selector text when the rule is parsed.
    pub specificity: Specificity,
}

/// A parsed stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stylesheet {
    /// Rules in source order.
    pub rules: Vec<StyleRule>,
}

impl Stylesheet {
    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the stylesheet has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Append every rule of `other` after this stylesheet's rules.
    pub fn extend(&mut self, other: Self) {
        self.rules.extend(other.rules);
    }
}

/// Parse stylesheet text in one call.
#[must_use]
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    CSSParser::new(css).parse_stylesheet()
}

/// Character-level stylesheet parser.
///
/// Every loop either consumes input or stops at end of input, so parsing
/// always terminates.
pub struct CSSParser {
    input: Vec<char>,
    position: usize,
}

impl CSSParser {
    /// Create a parser over `css`.
    #[must_use]
    pub fn new(css: &str) -> Self {
        Self {
            input: css.chars().collect(),
            position: 0,
        }
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    pub fn parse_stylesheet(&mut self) -> Stylesheet {
        let mut rules = Vec::new();
        self.skip_whitespace_and_comments();
        while !self.at_end() {
            if let Some(rule) = self.consume_rule() {
                rules.push(rule);
            }
            self.skip_whitespace_and_comments();
        }
        Stylesheet { rules }
    }

    /// One rule, or `None` when it is malformed or an at-rule.
    fn consume_rule(&mut self) -> Option<StyleRule> {
        if self.current() == Some('@') {
            self.skip_at_rule();
            return None;
        }

        let prelude = self.consume_until(|c| c == '{');
        if self.at_end() {
            warn_once(
                "CSS",
                &format!("selector '{}' has no '{{'; ignoring the rest of the stylesheet", prelude.trim()),
            );
            return None;
        }
        self.advance();

        let declarations = self.consume_declaration_block();
        let selector = prelude.trim();
        if selector.is_empty() {
            warn_once("CSS", "dropped rule with an empty selector");
            return None;
        }

        Some(StyleRule {
            selector: selector.to_string(),
            specificity: Specificity::of(selector),
            declarations,
        })
    }

    /// Declarations up to and including the closing `}`.
    fn consume_declaration_block(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        self.skip_whitespace_and_comments();
        while let Some(c) = self.current() {
            if c == '}' {
                self.advance();
                break;
            }
            if let Some(declaration) = self.consume_declaration() {
                declarations.push(declaration);
            }
            self.skip_whitespace_and_comments();
        }
        declarations
    }

    /// `property: value` up to `;` or `}`.
    ///
    /// The terminating `;` is consumed; `}` is left for the block.
    fn consume_declaration(&mut self) -> Option<Declaration> {
        let property = self
            .consume_until(|c| matches!(c, ':' | ';' | '}'))
            .trim()
            .to_ascii_lowercase();

        match self.current() {
            Some(':') => self.advance(),
            Some(';') => {
                self.advance();
                warn_once("CSS", &format!("dropped declaration '{property}' with no ':'"));
                return None;
            }
            _ => {
                if !property.is_empty() {
                    warn_once("CSS", &format!("dropped declaration '{property}' with no ':'"));
                }
                return None;
            }
        }

        let value = self.consume_until(|c| matches!(c, ';' | '}'));
        let value = value.trim();
        if self.current() == Some(';') {
            self.advance();
        }

        if property.is_empty() || value.is_empty() {
            warn_once(
                "CSS",
                &format!("dropped declaration '{property}: {value}' with an empty side"),
            );
            return None;
        }
        Some(Declaration::new(property, value))
    }

    /// `@name ...;` or `@name ... { ... }` with nested blocks balanced.
    fn skip_at_rule(&mut self) {
        let prelude = self.consume_until(|c| matches!(c, ';' | '{'));
        let name = prelude.split_whitespace().next().unwrap_or("@");
        warn_once("CSS", &format!("skipped unsupported at-rule {name}"));

        if self.current() == Some(';') {
            self.advance();
            return;
        }

        let mut depth = 0usize;
        while let Some(c) = self.current() {
            self.advance();
            match c {
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    // =========================================================================
    // Character helpers
    // =========================================================================

    fn current(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }

    fn starts_with(&self, target: &str) -> bool {
        target
            .chars()
            .enumerate()
            .all(|(offset, expected)| self.input.get(self.position + offset) == Some(&expected))
    }

    fn consume_until(&mut self, stop: impl Fn(char) -> bool) -> String {
        let mut run = String::new();
        while let Some(c) = self.current() {
            if stop(c) {
                break;
            }
            run.push(c);
            self.position += 1;
        }
        run
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// An unterminated comment runs to end of input.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.current() {
                Some(c) if c.is_whitespace() => self.advance(),
                Some('/') if self.starts_with("/*") => {
                    self.position += 2;
                    while !self.at_end() && !self.starts_with("*/") {
                        self.advance();
                    }
                    self.position = (self.position + 2).min(self.input.len());
                }
                _ => return,
            }
        }
    }
}
