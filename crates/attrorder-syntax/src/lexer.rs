use crate::cst::{CstToken, TokenKind};
use crate::diagnostics::{Diagnostic, Position, Span};
use crate::syntax::{is_keyword, SYMBOLS_1, SYMBOLS_2, SYMBOLS_3};

/// Lexes C-family / Objective-C source into a lossless token stream.
///
/// Every byte of `content` ends up in exactly one token, so `render_tokens(&lex(s).0) == s`
/// for any input. Problems (unterminated comments or literals, stray characters) are reported
/// as diagnostics and never stop the scan.
pub fn lex(content: &str) -> (Vec<CstToken>, Vec<Diagnostic>) {
    let mut lexer = Lexer::new(content);
    lexer.run();
    (lexer.tokens, lexer.diagnostics)
}

struct Lexer<'a> {
    chars: Vec<char>,
    src: &'a str,
    idx: usize,
    byte: usize,
    line: usize,
    column: usize,
    tokens: Vec<CstToken>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars().collect(),
            src,
            idx: 0,
            byte: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.idx + offset).copied()
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn bump(&mut self) -> Option<(char, Position)> {
        let ch = self.peek(0)?;
        let pos = self.position();
        self.idx += 1;
        self.byte += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some((ch, pos))
    }

    fn bump_while(&mut self, mut pred: impl FnMut(char) -> bool) -> Option<Position> {
        let mut last = None;
        while let Some(ch) = self.peek(0) {
            if !pred(ch) {
                break;
            }
            last = self.bump().map(|(_, pos)| pos);
        }
        last
    }

    fn push(&mut self, kind: TokenKind, start_byte: usize, start: Position, end: Position) {
        let text = &self.src[start_byte..self.byte];
        self.tokens.push(CstToken::new(kind, text, Span::new(start, end)));
    }

    fn run(&mut self) {
        while let Some(ch) = self.peek(0) {
            let start_byte = self.byte;
            let start = self.position();
            let next = self.peek(1);

            if ch.is_whitespace() {
                let end = self.bump_while(char::is_whitespace).unwrap_or(start);
                self.push(TokenKind::Whitespace, start_byte, start, end);
            } else if ch == '/' && next == Some('/') {
                let end = self.bump_while(|c| c != '\n').unwrap_or(start);
                self.push(TokenKind::Comment, start_byte, start, end);
            } else if ch == '/' && next == Some('*') {
                self.block_comment(start_byte, start);
            } else if ch == '"' {
                self.quoted('"', TokenKind::String, start_byte, start);
            } else if ch == '\'' {
                self.quoted('\'', TokenKind::Char, start_byte, start);
            } else if ch == '@' && next == Some('"') {
                self.bump();
                self.quoted('"', TokenKind::String, start_byte, start);
            } else if ch == '@' && next.is_some_and(is_ident_start) {
                self.bump();
                let end = self.bump_while(is_ident_continue).unwrap_or(start);
                self.push(TokenKind::Directive, start_byte, start, end);
            } else if is_ident_start(ch) {
                let end = self.bump_while(is_ident_continue).unwrap_or(start);
                let kind = if is_keyword(&self.src[start_byte..self.byte]) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Ident
                };
                self.push(kind, start_byte, start, end);
            } else if ch.is_ascii_digit() || (ch == '.' && next.is_some_and(|c| c.is_ascii_digit())) {
                self.number(start_byte, start);
            } else {
                self.symbol(start_byte, start);
            }
        }
    }

    fn block_comment(&mut self, start_byte: usize, start: Position) {
        self.bump();
        let mut end = self.bump().map(|(_, pos)| pos).unwrap_or(start);
        loop {
            match (self.peek(0), self.peek(1)) {
                (Some('*'), Some('/')) => {
                    self.bump();
                    end = self.bump().map(|(_, pos)| pos).unwrap_or(end);
                    break;
                }
                (Some(_), _) => {
                    end = self.bump().map(|(_, pos)| pos).unwrap_or(end);
                }
                (None, _) => {
                    self.diagnostics.push(Diagnostic::error(
                        "L001",
                        "unterminated block comment",
                        Span::new(start, end),
                    ));
                    break;
                }
            }
        }
        self.push(TokenKind::Comment, start_byte, start, end);
    }

    /// Scans a literal closed by `quote`. A newline before the closing quote ends the token.
    fn quoted(&mut self, quote: char, kind: TokenKind, start_byte: usize, start: Position) {
        let mut end = self.bump().map(|(_, pos)| pos).unwrap_or(start);
        loop {
            match self.peek(0) {
                Some(ch) if ch == quote => {
                    end = self.bump().map(|(_, pos)| pos).unwrap_or(end);
                    break;
                }
                Some('\\') if self.peek(1).is_some() => {
                    self.bump();
                    end = self.bump().map(|(_, pos)| pos).unwrap_or(end);
                }
                Some('\n') | None => {
                    let (code, what) = if kind == TokenKind::Char {
                        ("L003", "character")
                    } else {
                        ("L002", "string")
                    };
                    self.diagnostics.push(Diagnostic::error(
                        code,
                        format!("unterminated {what} literal"),
                        Span::new(start, end),
                    ));
                    break;
                }
                Some(_) => {
                    end = self.bump().map(|(_, pos)| pos).unwrap_or(end);
                }
            }
        }
        self.push(kind, start_byte, start, end);
    }

    fn number(&mut self, start_byte: usize, start: Position) {
        let mut end = start;
        let mut prev = '\0';
        while let Some(ch) = self.peek(0) {
            let exponent_sign =
                matches!(ch, '+' | '-') && matches!(prev, 'e' | 'E' | 'p' | 'P');
            if !(ch.is_ascii_alphanumeric() || ch == '.' || ch == '_' || ch == '\'' || exponent_sign)
            {
                break;
            }
            if let Some((_, pos)) = self.bump() {
                end = pos;
            }
            prev = ch;
        }
        self.push(TokenKind::Number, start_byte, start, end);
    }

    fn symbol(&mut self, start_byte: usize, start: Position) {
        let window = [self.peek(0), self.peek(1), self.peek(2)];
        let width = if SYMBOLS_3
            .iter()
            .any(|(chars, _)| chars.iter().zip(window).all(|(c, w)| Some(*c) == w))
        {
            3
        } else if SYMBOLS_2
            .iter()
            .any(|(chars, _)| chars.iter().zip(window).all(|(c, w)| Some(*c) == w))
        {
            2
        } else {
            1
        };

        let known = width > 1 || window[0].is_some_and(|c| SYMBOLS_1.contains(&c));
        let mut end = start;
        for _ in 0..width {
            if let Some((_, pos)) = self.bump() {
                end = pos;
            }
        }
        if known {
            self.push(TokenKind::Symbol, start_byte, start, end);
        } else {
            self.diagnostics.push(Diagnostic::warning(
                "L004",
                format!("unexpected character `{}`", &self.src[start_byte..self.byte]),
                Span::new(start, end),
            ));
            self.push(TokenKind::Unknown, start_byte, start, end);
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphabetic()
}

fn is_ident_continue(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphanumeric()
}
