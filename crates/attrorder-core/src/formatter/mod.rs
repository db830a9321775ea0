// Attribute-list canonicalizer.
//
// Pipeline, per list, in one left-to-right pass over a lossless token stream:
// 1) Locate: marker token, `(`, matching `)` (`locate.rs`).
// 2) Parse: preamble comments, entries, postamble comments; decide eligibility (`parse.rs`).
// 3) Order: stable sort by configured rank, unlisted names last in source order (`order.rs`).
// 4) Re-emit: clone original tokens into the canonical layout (`rewrite.rs`).
// 5) Splice: replace the range only if significant tokens differ (`engine.rs`).
//
// Notes:
// - Deterministic + idempotent: output is a pure function of `(input, options)`.
// - Lists with a comment between entries, or with syntax we do not recognise, are left
//   byte-identical.
// - Whitespace outside rewritten lists is never touched.

mod engine;
mod locate;
mod order;
mod parse;
mod rewrite;

use attrorder_syntax::{lex, render_tokens, Diagnostic};

pub use engine::{canonicalize_tokens, BailOut, CanonicalizeReport};
pub use locate::{find_attribute_list, locate_attribute_lists, ListRange};
pub use order::OrderSpec;
pub use parse::{
    parse_attribute_list, AttributeEntry, AttributeList, BailReason, CommentGroup,
    CommentPlacement, Eligibility,
};

/// Directive that introduces an Objective-C property attribute list.
pub const DEFAULT_MARKER: &str = "@property";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderOptions {
    /// Text of the token that opens an attribute list when followed by `(`.
    pub marker: String,
    pub order: OrderSpec,
}

impl OrderOptions {
    pub fn new(order: OrderSpec) -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            order,
        }
    }
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self::new(OrderSpec::default())
    }
}

#[derive(Debug, Clone)]
pub struct Canonicalized {
    pub text: String,
    pub report: CanonicalizeReport,
    /// Lexer diagnostics for the input. They never block canonicalization.
    pub diagnostics: Vec<Diagnostic>,
}

pub fn canonicalize_text(content: &str, options: &OrderOptions) -> String {
    canonicalize_text_with_report(content, options).text
}

pub fn canonicalize_text_with_report(content: &str, options: &OrderOptions) -> Canonicalized {
    let (mut tokens, diagnostics) = lex(content);
    let report = canonicalize_tokens(&mut tokens, options);
    let text = if report.changed() {
        render_tokens(&tokens)
    } else {
        content.to_string()
    };
    Canonicalized {
        text,
        report,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_OBJC_ATTRIBUTES: &[&str] = &[
        "class",
        "direct",
        "atomic",
        "nonatomic",
        "assign",
        "retain",
        "strong",
        "copy",
        "weak",
        "unsafe_unretained",
        "readonly",
        "readwrite",
        "getter",
        "setter",
        "nullable",
        "nonnull",
        "null_resettable",
        "null_unspecified",
    ];

    fn options(order: &[&str]) -> OrderOptions {
        OrderOptions::new(OrderSpec::new(order.iter().copied()))
    }

    /// Formatting `input` yields `expected`, and `expected` is a fixed point.
    #[track_caller]
    fn verify_format(expected: &str, input: &str, options: &OrderOptions) {
        assert_eq!(canonicalize_text(input, options), expected, "input: {input}");
        assert_eq!(
            canonicalize_text(expected, options),
            expected,
            "not stable: {expected}"
        );
    }

    #[track_caller]
    fn verify_unchanged(code: &str, options: &OrderOptions) {
        verify_format(code, code, options);
    }

    #[test]
    fn sorts_specified_attributes() {
        let opts = options(&["a", "b", "c"]);

        verify_unchanged("@property() int p;", &opts);

        verify_unchanged("@property(a) int p;", &opts);
        verify_unchanged("@property(b) int p;", &opts);
        verify_unchanged("@property(c) int p;", &opts);

        verify_unchanged("@property(a, b) int p;", &opts);
        verify_unchanged("@property(a, c) int p;", &opts);
        verify_unchanged("@property(b, c) int p;", &opts);
        verify_unchanged("@property(a, b, c) int p;", &opts);

        verify_format("@property(a, b) int p;", "@property(b, a) int p;", &opts);
        verify_format("@property(a, c) int p;", "@property(c, a) int p;", &opts);
        verify_format("@property(b, c) int p;", "@property(c, b) int p;", &opts);

        verify_format("@property(a, b, c) int p;", "@property(b, a, c) int p;", &opts);
        verify_format("@property(a, b, c) int p;", "@property(c, b, a) int p;", &opts);
    }

    #[test]
    fn sorts_attributes_with_values() {
        let opts = options(&["a", "getter", "c"]);

        verify_unchanged("@property(getter=G, c) int p;", &opts);
        verify_unchanged("@property(a, getter=G) int p;", &opts);
        verify_unchanged("@property(a, getter=G, c) int p;", &opts);

        verify_format("@property(getter=G, c) int p;", "@property(c, getter=G) int p;", &opts);
        verify_format("@property(a, getter=G) int p;", "@property(getter=G, a) int p;", &opts);
        verify_format(
            "@property(a, getter=G, c) int p;",
            "@property(getter=G, c, a) int p;",
            &opts,
        );

        verify_format(
            "@property(a=A, c=C, x=X, y=Y) int p;",
            "@property(c=C, x=X, y=Y, a=A) int p;",
            &opts,
        );
    }

    #[test]
    fn sorts_unspecified_attributes_to_back() {
        let opts = options(&["a", "b", "c"]);

        verify_unchanged("@property(x) int p;", &opts);

        verify_unchanged("@property(a, x, y) int p;", &opts);
        verify_unchanged("@property(b, x, y) int p;", &opts);
        verify_unchanged("@property(a, b, c, x, y) int p;", &opts);

        verify_format("@property(a, x) int p;", "@property(x, a) int p;", &opts);

        verify_format("@property(a, b, x, y) int p;", "@property(x, b, y, a) int p;", &opts);
        verify_format("@property(a, b, y, x) int p;", "@property(y, b, x, a) int p;", &opts);
    }

    #[test]
    fn removes_duplicate_attributes() {
        let opts = options(&["a", "b", "c"]);

        verify_format("@property(a) int p;", "@property(a, a) int p;", &opts);
        verify_format("@property(a) int p;", "@property(a, a, a, a) int p;", &opts);

        verify_format(
            "@property(a, b, c) int p;",
            "@property(c, b, a, b, a, c) int p;",
            &opts,
        );
        verify_format(
            "@property(a, b, c, x, y) int p;",
            "@property(c, x, b, a, y, b, a, c, y) int p;",
            &opts,
        );
    }

    #[test]
    fn duplicate_keeps_first_value() {
        let opts = options(&["getter", "a"]);
        verify_format(
            "@property(getter=First, a) int p;",
            "@property(a, getter=First, getter=Second) int p;",
            &opts,
        );
    }

    #[test]
    fn handles_all_attributes() {
        for &attribute in ALL_OBJC_ATTRIBUTES {
            let opts = options(&["FIRST", attribute, "LAST"]);

            verify_unchanged(&format!("@property({attribute}, LAST) int p;"), &opts);
            verify_unchanged(&format!("@property(FIRST, {attribute}) int p;"), &opts);
            verify_unchanged(&format!("@property(FIRST, {attribute}, LAST) int p;"), &opts);

            verify_format(
                &format!("@property({attribute}, LAST) int p;"),
                &format!("@property(LAST, {attribute}) int p;"),
                &opts,
            );
            verify_format(
                &format!("@property(FIRST, {attribute}) int p;"),
                &format!("@property({attribute}, FIRST) int p;"),
                &opts,
            );
            verify_format(
                &format!("@property(FIRST, {attribute}, LAST) int p;"),
                &format!("@property(LAST, {attribute}, FIRST) int p;"),
                &opts,
            );
        }
    }

    #[test]
    fn handles_comments_around_attributes() {
        let opts = options(&["a", "b", "c"]);

        verify_unchanged("@property(/* 1 */) int p;", &opts);
        verify_unchanged("@property(/* 1 */ /* 2 */) int p;", &opts);

        verify_unchanged("@property(/* 1 */ a) int p;", &opts);
        verify_unchanged("@property(a /* 2 */) int p;", &opts);
        verify_unchanged("@property(/* 1 */ a /* 2 */) int p;", &opts);

        verify_format(
            "@property(/* 1 */ a, b, x, y) int p;",
            "@property(/* 1 */ x, b, a, y) int p;",
            &opts,
        );
        verify_format(
            "@property(a, b, x, y /* 2 */) int p;",
            "@property(x, b, a, y /* 2 */) int p;",
            &opts,
        );
        verify_format(
            "@property(/* 1 */ a, b, x, y /* 2 */) int p;",
            "@property(/* 1 */ x, b, a, y /* 2 */) int p;",
            &opts,
        );
        verify_format(
            "@property(/* 1 */ /* 2 */ a, b, x, y /* 3 */ /* 4 */) int p;",
            "@property(/* 1 *//* 2 */ x,b,a,y /* 3 *//* 4 */) int p;",
            &opts,
        );

        verify_unchanged("@property(a, /* 1 */ b) int p;", &opts);
        verify_unchanged("@property(b, /* 1 */ a) int p;", &opts);
        verify_unchanged("@property(b /* 1 */, a) int p;", &opts);
    }

    #[test]
    fn reordering_scenarios() {
        let abc = options(&["a", "b", "c"]);
        verify_format("@property(a, b, c) int p;", "@property(b, a, c) int p;", &abc);
        verify_format("@property(a, b, c) int p;", "@property(c, b, a, b, a, c) int p;", &abc);
        verify_format("@property(a, b, x, y) int p;", "@property(x, b, y, a) int p;", &abc);
        verify_unchanged("@property(a, /* note */ b) int p;", &abc);

        let getter = options(&["a", "getter", "c"]);
        verify_format(
            "@property(a=A, c=C, x=X, y=Y) int p;",
            "@property(c=C, x=X, y=Y, a=A) int p;",
            &getter,
        );
    }

    #[test]
    fn text_outside_lists_is_untouched() {
        let opts = options(&["nonatomic", "copy"]);
        let input = "@interface Foo : NSObject\n\n  @property   (copy,nonatomic)   NSString *name;\n@end\n";
        let expected = "@interface Foo : NSObject\n\n  @property   (nonatomic, copy)   NSString *name;\n@end\n";
        verify_format(expected, input, &opts);
    }

    #[test]
    fn report_exposes_lexer_diagnostics() {
        let result = canonicalize_text_with_report(
            "@property(b, a) int p; /* open",
            &options(&["a", "b"]),
        );
        assert_eq!(result.text, "@property(a, b) int p; /* open");
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.report.changed());
    }

    #[test]
    fn default_options_only_collapse_duplicates() {
        let opts = OrderOptions::default();
        assert_eq!(opts.marker, DEFAULT_MARKER);
        verify_format("@property(c, a) int p;", "@property(c, a, c) int p;", &opts);
        verify_unchanged("@property(c, b, a) int p;", &opts);
    }
}
