#![deny(clippy::unwrap_used)]

//! Token model and lexer for C-family / Objective-C sources.
//!
//! The stream keeps whitespace and comments as tokens so that concatenating the token texts
//! reproduces the source exactly; rewriting passes splice token ranges and re-render.

mod cst;
mod diagnostics;
pub mod lexer;
pub mod syntax;

pub use cst::{render_tokens, CstFile, CstToken, TokenKind};
pub use diagnostics::{
    file_diagnostics_have_errors, render_diagnostics, Diagnostic, DiagnosticSeverity,
    FileDiagnostic, Position, Span,
};
pub use lexer::lex;

pub fn lex_file(path: &str, content: &str) -> CstFile {
    let (tokens, diagnostics) = lex(content);
    CstFile {
        path: path.to_string(),
        tokens,
        diagnostics,
    }
}
