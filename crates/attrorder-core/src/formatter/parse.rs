use std::ops::Range;

use attrorder_syntax::{CstToken, Span, TokenKind};
use rustc_hash::FxHashSet;

use super::locate::ListRange;

/// One attribute occurrence: `name` or `name = value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeEntry {
    name: String,
    value: Option<String>,
    original_index: usize,
    tokens: Range<usize>,
}

impl AttributeEntry {
    pub(crate) fn new(
        name: String,
        value: Option<String>,
        original_index: usize,
        tokens: Range<usize>,
    ) -> Self {
        Self {
            name,
            value,
            original_index,
            tokens,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Verbatim source text after `=`, surrounding whitespace excluded.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Position among first-seen distinct names.
    pub fn original_index(&self) -> usize {
        self.original_index
    }

    /// Stream indices from the name token through the last value token.
    pub fn tokens(&self) -> Range<usize> {
        self.tokens.clone()
    }
}

/// Comment token indices, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentGroup {
    pub tokens: Vec<usize>,
}

impl CommentGroup {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

/// Where a comment inside the parentheses sits relative to the entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPlacement {
    Preamble,
    Postamble,
    Interior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BailReason {
    /// A comment sits between entries, so it has no unambiguous owner once entries move.
    InteriorComment { at: Span },
    /// A segment is not `name` or `name = value` (empty segment, stray `=`, ...).
    Malformed { at: Span },
}

impl BailReason {
    pub fn span(&self) -> Span {
        match self {
            BailReason::InteriorComment { at } | BailReason::Malformed { at } => *at,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            BailReason::InteriorComment { .. } => "comment between attributes",
            BailReason::Malformed { .. } => "unrecognized attribute syntax",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Ineligible(BailReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeList {
    pub range: ListRange,
    pub preamble: CommentGroup,
    pub entries: Vec<AttributeEntry>,
    pub postamble: CommentGroup,
    pub eligibility: Eligibility,
}

impl AttributeList {
    pub fn is_eligible(&self) -> bool {
        self.eligibility == Eligibility::Eligible
    }

    fn ineligible(range: ListRange, reason: BailReason) -> Self {
        Self {
            range,
            preamble: CommentGroup::default(),
            entries: Vec::new(),
            postamble: CommentGroup::default(),
            eligibility: Eligibility::Ineligible(reason),
        }
    }
}

/// Parses the tokens between `range.open` and `range.close`.
///
/// Stops at the first reason to bail; an ineligible list carries no entries.
pub fn parse_attribute_list(tokens: &[CstToken], range: ListRange) -> AttributeList {
    let inner = range.open + 1..range.close;
    let code: Vec<usize> = inner
        .clone()
        .filter(|&idx| !tokens[idx].kind.is_trivia())
        .collect();

    let (Some(&first), Some(&last)) = (code.first(), code.last()) else {
        let preamble = comments_in(tokens, inner);
        return AttributeList {
            range,
            preamble,
            entries: Vec::new(),
            postamble: CommentGroup::default(),
            eligibility: Eligibility::Eligible,
        };
    };

    let mut preamble = CommentGroup::default();
    let mut postamble = CommentGroup::default();
    let mut interior = None;
    for idx in inner.filter(|&idx| tokens[idx].kind == TokenKind::Comment) {
        match classify_comment(idx, first, last) {
            CommentPlacement::Preamble => preamble.tokens.push(idx),
            CommentPlacement::Postamble => postamble.tokens.push(idx),
            CommentPlacement::Interior if interior.is_none() => interior = Some(idx),
            CommentPlacement::Interior => {}
        }
    }

    let segments = split_segments(tokens, first, last);
    if let Some(idx) = interior.filter(|_| segments.len() > 1) {
        return AttributeList::ineligible(
            range,
            BailReason::InteriorComment {
                at: tokens[idx].span,
            },
        );
    }

    let mut seen = FxHashSet::default();
    let mut entries = Vec::with_capacity(segments.len());
    for segment in segments {
        let parsed = match parse_segment(tokens, segment) {
            Ok(parsed) => parsed,
            Err(at) => {
                return AttributeList::ineligible(range, BailReason::Malformed { at });
            }
        };
        if !seen.insert(parsed.name.clone()) {
            continue;
        }
        entries.push(AttributeEntry::new(
            parsed.name,
            parsed.value,
            entries.len(),
            parsed.tokens,
        ));
    }

    AttributeList {
        range,
        preamble,
        entries,
        postamble,
        eligibility: Eligibility::Eligible,
    }
}

fn classify_comment(idx: usize, first_code: usize, last_code: usize) -> CommentPlacement {
    if idx < first_code {
        CommentPlacement::Preamble
    } else if idx > last_code {
        CommentPlacement::Postamble
    } else {
        CommentPlacement::Interior
    }
}

fn comments_in(tokens: &[CstToken], range: Range<usize>) -> CommentGroup {
    CommentGroup {
        tokens: range
            .filter(|&idx| tokens[idx].kind == TokenKind::Comment)
            .collect(),
    }
}

/// Splits `first..=last` on commas outside any nested brackets.
///
/// A leading, doubled or trailing comma yields an empty segment.
fn split_segments(tokens: &[CstToken], first: usize, last: usize) -> Vec<Range<usize>> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = first;
    for (idx, token) in tokens.iter().enumerate().take(last + 1).skip(first) {
        if token.kind != TokenKind::Symbol {
            continue;
        }
        match token.text.as_str() {
            "(" | "[" | "{" => depth += 1,
            ")" | "]" | "}" => depth = depth.saturating_sub(1),
            "," if depth == 0 => {
                segments.push(start..idx);
                start = idx + 1;
            }
            _ => {}
        }
    }
    segments.push(start..last + 1);
    segments
}

struct ParsedSegment {
    name: String,
    value: Option<String>,
    tokens: Range<usize>,
}

/// `name` or `name = value...`; on failure returns the span to report.
fn parse_segment(tokens: &[CstToken], segment: Range<usize>) -> Result<ParsedSegment, Span> {
    let code: Vec<usize> = segment
        .clone()
        .filter(|&idx| !tokens[idx].kind.is_trivia())
        .collect();

    let Some(&name_idx) = code.first() else {
        // Empty segment: point at the comma that closes it, or the one before it.
        let at = tokens
            .get(segment.end)
            .filter(|t| t.is_symbol(","))
            .or_else(|| segment.start.checked_sub(1).map(|idx| &tokens[idx]))
            .map(|t| t.span);
        return Err(at.unwrap_or(tokens[segment.start].span));
    };
    let name = &tokens[name_idx];
    if !name.kind.is_word() {
        return Err(name.span);
    }

    match code.as_slice() {
        [_] => Ok(ParsedSegment {
            name: name.text.clone(),
            value: None,
            tokens: name_idx..name_idx + 1,
        }),
        [_, eq, rest @ ..] if tokens[*eq].is_symbol("=") && !rest.is_empty() => {
            let (value_start, value_end) = (rest[0], rest[rest.len() - 1]);
            let value = tokens[value_start..=value_end]
                .iter()
                .map(|t| t.text.as_str())
                .collect::<String>();
            Ok(ParsedSegment {
                name: name.text.clone(),
                value: Some(value),
                tokens: name_idx..value_end + 1,
            })
        }
        [_, unexpected, ..] => Err(tokens[*unexpected].span),
        [] => Err(name.span),
    }
}
