use attrorder_syntax::{CstToken, Span, TokenKind};

use super::parse::{AttributeEntry, AttributeList, CommentGroup};

/// Builds the replacement for `list.range.open..=list.range.close` with `entries` in order.
///
/// Layout: `(`, preamble comments, entries joined by `, `, postamble comments, `)`, with single
/// spaces between the comment and entry pieces. Original tokens are cloned; only the `,` and
/// space separators are new.
pub fn build_replacement(
    tokens: &[CstToken],
    list: &AttributeList,
    entries: &[AttributeEntry],
) -> Vec<CstToken> {
    let open = &tokens[list.range.open];
    let close = &tokens[list.range.close];

    let mut pieces: Vec<Vec<CstToken>> = Vec::new();
    pieces.extend(comment_pieces(tokens, &list.preamble));
    if !entries.is_empty() {
        pieces.push(entry_piece(tokens, entries));
    }
    pieces.extend(comment_pieces(tokens, &list.postamble));

    let mut out = vec![open.clone()];
    for (index, piece) in pieces.into_iter().enumerate() {
        if index > 0 {
            let separator = separator_after(out.last().unwrap_or(open));
            out.push(separator);
        }
        out.extend(piece);
    }
    let trailing = out
        .last()
        .filter(|t| is_line_comment(t))
        .map(separator_after);
    out.extend(trailing);
    out.push(close.clone());
    out
}

/// True when both sequences carry the same tokens once whitespace is ignored.
pub fn same_significant_tokens(original: &[CstToken], replacement: &[CstToken]) -> bool {
    let significant = |tokens: &[CstToken]| {
        tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| t.text.clone())
            .collect::<Vec<_>>()
    };
    significant(original) == significant(replacement)
}

fn comment_pieces<'a>(
    tokens: &'a [CstToken],
    group: &'a CommentGroup,
) -> impl Iterator<Item = Vec<CstToken>> + 'a {
    group.tokens.iter().map(move |&idx| vec![tokens[idx].clone()])
}

fn entry_piece(tokens: &[CstToken], entries: &[AttributeEntry]) -> Vec<CstToken> {
    let mut piece: Vec<CstToken> = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            let span = piece
                .last()
                .map_or(tokens[entry.tokens().start].span, |t| t.span);
            piece.push(CstToken::new(TokenKind::Symbol, ",", span));
            piece.push(space(span));
        }
        piece.extend(tokens[entry.tokens()].iter().cloned());
    }
    piece
}

fn space(span: Span) -> CstToken {
    CstToken::new(TokenKind::Whitespace, " ", span)
}

/// A `//` comment runs to end of line, so whatever follows it must start a new line.
fn separator_after(prev: &CstToken) -> CstToken {
    if is_line_comment(prev) {
        CstToken::new(TokenKind::Whitespace, "\n", prev.span)
    } else {
        space(prev.span)
    }
}

fn is_line_comment(token: &CstToken) -> bool {
    token.kind == TokenKind::Comment && token.text.starts_with("//")
}
