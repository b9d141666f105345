use lumen_dom::AttributesMap;
use serde::Serialize;
use strum_macros::Display;

/// Half-open range of character offsets into the markup a token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SourceSpan {
    /// Offset of the first character of the token.
    pub start: usize,
    /// Offset one past the last character consumed for the token.
    pub end: usize,
}

impl SourceSpan {
    /// Create a span covering `start..end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of characters the span covers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the span covers no characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The kind of a token and the data that kind carries.
///
/// Displays as the kind name alone (`StartTag`, `Text`, ...), which is what
/// step-by-step views print next to each token.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
#[serde(tag = "type")]
pub enum TokenKind {
    /// `<!DOCTYPE ...>`; the content is the trimmed text after the keyword.
    #[strum(serialize = "DOCTYPE")]
    #[serde(rename = "DOCTYPE")]
    Doctype {
        /// Text between the keyword and `>`, trimmed.
        content: String,
    },

    /// An opening tag that may contain children.
    StartTag {
        /// Lower-cased tag name.
        name: String,
        /// Attributes, names lower-cased.
        attributes: AttributesMap,
    },

    /// A closing tag. Anything after the name is discarded.
    EndTag {
        /// Lower-cased tag name.
        name: String,
    },

    /// A tag written with a trailing `/` or naming a void element.
    SelfClosingTag {
        /// Lower-cased tag name.
        name: String,
        /// Attributes, names lower-cased.
        attributes: AttributesMap,
    },

    /// A run of text containing at least one non-whitespace character.
    Text {
        /// The raw text, surrounding whitespace included.
        content: String,
    },

    /// `<!-- ... -->`.
    Comment {
        /// Everything between the delimiters.
        content: String,
    },
}

/// A single token with the span of markup it was read from.
///
/// Tokens are never modified after the tokenizer emits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// What was read.
    pub kind: TokenKind,
    /// Where it was read from.
    pub span: SourceSpan,
}

impl Token {
    /// Create a token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }

    /// Tag name for tag tokens.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::StartTag { name, .. }
            | TokenKind::EndTag { name }
            | TokenKind::SelfClosingTag { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Attribute map for start and self-closing tags.
    #[must_use]
    pub const fn attributes(&self) -> Option<&AttributesMap> {
        match &self.kind {
            TokenKind::StartTag { attributes, .. }
            | TokenKind::SelfClosingTag { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    /// Text content for doctype, text, and comment tokens.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Doctype { content }
            | TokenKind::Text { content }
            | TokenKind::Comment { content } => Some(content),
            _ => None,
        }
    }
}
