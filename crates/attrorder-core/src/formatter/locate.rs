use attrorder_syntax::{CstToken, TokenKind};

/// Token indices of one attribute list: the marker, its `(` and the matching `)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRange {
    pub marker: usize,
    pub open: usize,
    pub close: usize,
}

/// Finds the first attribute list whose marker sits at or after `from`.
///
/// Markers not followed by `(` (whitespace aside), or whose `(` is never closed, are skipped.
pub fn find_attribute_list(tokens: &[CstToken], marker: &str, from: usize) -> Option<ListRange> {
    (from..tokens.len())
        .filter(|&idx| is_marker(&tokens[idx], marker))
        .find_map(|idx| list_after_marker(tokens, idx))
}

/// All lists in the stream, left to right.
pub fn locate_attribute_lists(tokens: &[CstToken], marker: &str) -> Vec<ListRange> {
    let mut lists = Vec::new();
    let mut cursor = 0;
    while let Some(range) = find_attribute_list(tokens, marker, cursor) {
        cursor = range.close + 1;
        lists.push(range);
    }
    lists
}

fn is_marker(token: &CstToken, marker: &str) -> bool {
    !matches!(
        token.kind,
        TokenKind::Whitespace | TokenKind::Comment | TokenKind::String | TokenKind::Char
    ) && token.text == marker
}

fn list_after_marker(tokens: &[CstToken], marker: usize) -> Option<ListRange> {
    let open = (marker + 1..tokens.len()).find(|&idx| tokens[idx].kind != TokenKind::Whitespace)?;
    if !tokens[open].is_symbol("(") {
        return None;
    }
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(open) {
        if token.is_symbol("(") {
            depth += 1;
        } else if token.is_symbol(")") {
            depth -= 1;
            if depth == 0 {
                return Some(ListRange {
                    marker,
                    open,
                    close: idx,
                });
            }
        }
    }
    None
}
