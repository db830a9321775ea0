use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// 1-based line and column (columns count chars, not bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Inclusive source range: `end` is the position of the last char.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub code: String,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(code: &str, message: impl Into<String>, span: Span) -> Self {
        Self {
            code: code.to_string(),
            severity: DiagnosticSeverity::Error,
            message: message.into(),
            span,
        }
    }

    pub fn warning(code: &str, message: impl Into<String>, span: Span) -> Self {
        Self {
            code: code.to_string(),
            severity: DiagnosticSeverity::Warning,
            message: message.into(),
            span,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileDiagnostic {
    pub path: String,
    pub diagnostic: Diagnostic,
}

// ANSI color codes
const RED: &str = "\x1b[1;31m";
const YELLOW: &str = "\x1b[1;33m";
const DARK_GRAY: &str = "\x1b[90m";
const WHITE: &str = "\x1b[97m";
const RESET: &str = "\x1b[0m";

pub fn file_diagnostics_have_errors(diagnostics: &[FileDiagnostic]) -> bool {
    diagnostics
        .iter()
        .any(|diag| diag.diagnostic.severity == DiagnosticSeverity::Error)
}

/// Renders diagnostics for one file, with a source excerpt under each header.
pub fn render_diagnostics(
    path: &str,
    source: &str,
    diagnostics: &[Diagnostic],
    use_color: bool,
) -> String {
    let mut output = String::new();
    for (index, diagnostic) in diagnostics.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        output.push_str(&render_diagnostic(path, source, diagnostic, use_color));
    }
    output.trim_end().to_string()
}

fn render_diagnostic(path: &str, source: &str, diagnostic: &Diagnostic, use_color: bool) -> String {
    let start = diagnostic.span.start;
    let label = match diagnostic.severity {
        DiagnosticSeverity::Error => "error",
        DiagnosticSeverity::Warning => "warning",
    };
    let mut output = if use_color {
        let color = match diagnostic.severity {
            DiagnosticSeverity::Error => RED,
            DiagnosticSeverity::Warning => YELLOW,
        };
        format!(
            "{color}{label}[{}]{RESET} {DARK_GRAY}{path}:{}:{}{RESET}\n  {WHITE}{}{RESET}\n",
            diagnostic.code, start.line, start.column, diagnostic.message
        )
    } else {
        format!(
            "{label}[{}] {path}:{}:{}\n  {}\n",
            diagnostic.code, start.line, start.column, diagnostic.message
        )
    };
    if let Some(frame) = render_source_frame(source, &diagnostic.span) {
        output.push_str(&frame);
    }
    output
}

fn render_source_frame(source: &str, span: &Span) -> Option<String> {
    let line = source.lines().nth(span.start.line.checked_sub(1)?)?;
    let line_no = span.start.line;
    let width = line_no.to_string().len();
    let line_len = line.chars().count();

    let start_col = span.start.column.clamp(1, line_len + 1);
    let end_col = if span.start.line == span.end.line {
        span.end.column.clamp(start_col, line_len.max(start_col))
    } else {
        line_len.max(start_col)
    };
    let padding = " ".repeat(start_col - 1);
    let carets = "^".repeat(end_col - start_col + 1);

    Some(format!(
        "{:>width$} |\n{line_no:>width$} | {line}\n{:>width$} | {padding}{carets}\n",
        "", ""
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(line: usize, start: usize, end: usize) -> Span {
        Span::new(
            Position {
                line,
                column: start,
            },
            Position { line, column: end },
        )
    }

    #[test]
    fn renders_header_and_carets_under_span() {
        let source = "int x;\n/* open\n";
        let diag = Diagnostic::error("L001", "unterminated block comment", span(2, 1, 2));
        let rendered = render_diagnostics("a.m", source, &[diag], false);
        assert_eq!(
            rendered,
            "error[L001] a.m:2:1\n  unterminated block comment\n  |\n2 | /* open\n  | ^^"
        );
    }

    #[test]
    fn missing_line_skips_frame() {
        let diag = Diagnostic::warning("L004", "unexpected character", span(9, 1, 1));
        let rendered = render_diagnostics("a.m", "x", &[diag], false);
        assert_eq!(rendered, "warning[L004] a.m:9:1\n  unexpected character");
    }

    #[test]
    fn errors_are_detected_among_warnings() {
        let warning = FileDiagnostic {
            path: "a.m".to_string(),
            diagnostic: Diagnostic::warning("L004", "w", span(1, 1, 1)),
        };
        assert!(!file_diagnostics_have_errors(std::slice::from_ref(&warning)));
        let error = FileDiagnostic {
            path: "a.m".to_string(),
            diagnostic: Diagnostic::error("L001", "e", span(1, 1, 1)),
        };
        assert!(file_diagnostics_have_errors(&[warning, error]));
    }
}
