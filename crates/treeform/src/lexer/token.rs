//! Token vocabulary shared by the markup and JSON lexers

use crate::error::Span;

/// Atomic unit of a tokenized input stream.
///
/// The markup lexer produces `Open`/`Close`/`Key`/`Value`/`Content`; the
/// JSON lexer produces `Open`/`Close`/`Key`/`Value` plus the list pair.
/// Scalar payloads are literal source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Opening tag or `{`; the name is empty for JSON objects
    Open(String),
    /// Closing tag or `}`
    Close(String),
    /// Attribute name or quoted member name (quotes stripped)
    Key(String),
    /// Attribute value (quotes stripped) or scalar member value
    /// (quotes preserved)
    Value(String),
    /// Text run between tags, verbatim
    Content(String),
    /// `[`
    OpenList,
    /// `]`
    CloseList,
    /// End of input
    Eof,
}

impl TokenKind {
    /// Get token name for diagnostics
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open(_) => "open",
            Self::Close(_) => "close",
            Self::Key(_) => "key",
            Self::Value(_) => "value",
            Self::Content(_) => "content",
            Self::OpenList => "open-list",
            Self::CloseList => "close-list",
            Self::Eof => "EOF",
        }
    }
}

/// Token with source location
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub const fn eof(span: Span) -> Self {
        Self {
            kind: TokenKind::Eof,
            span,
        }
    }
}
