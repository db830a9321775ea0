#![deny(clippy::unwrap_used)]

mod formatter;

pub use formatter::{
    canonicalize_text, canonicalize_text_with_report, canonicalize_tokens, find_attribute_list,
    locate_attribute_lists, parse_attribute_list, AttributeEntry, AttributeList, BailOut,
    BailReason, CanonicalizeReport, Canonicalized, CommentGroup, CommentPlacement, Eligibility,
    ListRange, OrderOptions, OrderSpec, DEFAULT_MARKER,
};
