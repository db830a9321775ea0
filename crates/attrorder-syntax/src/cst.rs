use serde::Serialize;

use crate::diagnostics::{Diagnostic, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Spaces, tabs and newlines, kept so the stream stays lossless.
    Whitespace,
    /// `// ...` or `/* ... */`.
    Comment,
    Ident,
    Keyword,
    /// `@` immediately followed by an identifier, e.g. `@property` or `@interface`.
    Directive,
    Number,
    String,
    Char,
    Symbol,
    Unknown,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::Ident => "ident",
            TokenKind::Keyword => "keyword",
            TokenKind::Directive => "directive",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Char => "char",
            TokenKind::Symbol => "symbol",
            TokenKind::Unknown => "unknown",
        }
    }

    /// Tokens that may stand in a name position. Keywords count: recognition is positional.
    pub fn is_word(self) -> bool {
        matches!(self, TokenKind::Ident | TokenKind::Keyword)
    }

    /// Tokens with no bearing on structure.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CstToken {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl CstToken {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == symbol
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CstFile {
    pub path: String,
    pub tokens: Vec<CstToken>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Concatenates token texts. For a stream produced by `lex` this reproduces the input exactly.
pub fn render_tokens(tokens: &[CstToken]) -> String {
    let mut out = String::with_capacity(tokens.iter().map(|t| t.text.len()).sum());
    for token in tokens {
        out.push_str(&token.text);
    }
    out
}
