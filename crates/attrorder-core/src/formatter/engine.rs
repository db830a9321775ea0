use attrorder_syntax::{CstToken, Span};
use tracing::{debug, trace};

use super::locate::find_attribute_list;
use super::parse::{parse_attribute_list, BailReason, Eligibility};
use super::rewrite::{build_replacement, same_significant_tokens};
use super::OrderOptions;

/// A list left untouched, and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BailOut {
    /// Marker through closing `)`.
    pub span: Span,
    pub reason: BailReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalizeReport {
    pub lists_seen: usize,
    /// Marker-through-`)` spans (in the input) of lists that were rewritten.
    pub rewritten: Vec<Span>,
    pub bailed: Vec<BailOut>,
}

impl CanonicalizeReport {
    pub fn changed(&self) -> bool {
        !self.rewritten.is_empty()
    }

    pub fn unchanged(&self) -> usize {
        self.lists_seen - self.rewritten.len() - self.bailed.len()
    }
}

/// Rewrites every attribute list in `tokens` in a single left-to-right pass.
///
/// Each list is handled on its own: an ineligible list is left as is and the scan moves on.
/// A list is replaced only when its significant tokens would change.
pub fn canonicalize_tokens(tokens: &mut Vec<CstToken>, options: &OrderOptions) -> CanonicalizeReport {
    let mut report = CanonicalizeReport::default();
    let mut cursor = 0;

    while let Some(range) = find_attribute_list(tokens, &options.marker, cursor) {
        report.lists_seen += 1;
        let span = tokens[range.marker].span.to(tokens[range.close].span);
        trace!(line = span.start.line, column = span.start.column, "attribute list");

        let list = parse_attribute_list(tokens, range);
        if let Eligibility::Ineligible(reason) = list.eligibility {
            debug!(
                line = span.start.line,
                column = span.start.column,
                reason = reason.describe(),
                "attribute list left unchanged"
            );
            report.bailed.push(BailOut { span, reason });
            cursor = range.close + 1;
            continue;
        }

        let sorted = options.order.sorted(&list.entries);
        let replacement = build_replacement(tokens, &list, &sorted);
        if same_significant_tokens(&tokens[range.open..=range.close], &replacement) {
            cursor = range.close + 1;
            continue;
        }

        debug!(
            line = span.start.line,
            column = span.start.column,
            entries = sorted.len(),
            "attribute list reordered"
        );
        let replaced_len = replacement.len();
        tokens.splice(range.open..=range.close, replacement);
        report.rewritten.push(span);
        cursor = range.open + replaced_len;
    }

    report
}
