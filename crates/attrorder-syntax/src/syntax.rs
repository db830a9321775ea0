/// Reserved words of C, Objective-C and the C++ subset that shows up in `.mm`/`.h` files.
///
/// The lexer tags these as `TokenKind::Keyword`. Inside an attribute list they are still
/// valid attribute names (`class` is the common case).
pub const KEYWORDS_C: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Bool", "_Atomic", "_Nonnull",
    "_Nullable",
];

pub const KEYWORDS_CXX: &[&str] = &[
    "bool", "catch", "class", "const_cast", "delete", "explicit", "false", "friend", "mutable",
    "namespace", "new", "nullptr", "operator", "private", "protected", "public", "template",
    "this", "throw", "true", "try", "typename", "using", "virtual",
];

pub fn is_keyword(text: &str) -> bool {
    KEYWORDS_C.contains(&text) || KEYWORDS_CXX.contains(&text)
}

pub const SYMBOLS_3: &[([char; 3], &str)] = &[
    (['.', '.', '.'], "..."),
    (['<', '<', '='], "<<="),
    (['>', '>', '='], ">>="),
    (['-', '>', '*'], "->*"),
];

pub const SYMBOLS_2: &[([char; 2], &str)] = &[
    (['-', '>'], "->"),
    (['+', '+'], "++"),
    (['-', '-'], "--"),
    (['<', '<'], "<<"),
    (['>', '>'], ">>"),
    (['<', '='], "<="),
    (['>', '='], ">="),
    (['=', '='], "=="),
    (['!', '='], "!="),
    (['&', '&'], "&&"),
    (['|', '|'], "||"),
    (['+', '='], "+="),
    (['-', '='], "-="),
    (['*', '='], "*="),
    (['/', '='], "/="),
    (['%', '='], "%="),
    (['&', '='], "&="),
    (['|', '='], "|="),
    (['^', '='], "^="),
    ([':', ':'], "::"),
    (['#', '#'], "##"),
];

pub const SYMBOLS_1: &[char] = &[
    '{', '}', '(', ')', '[', ']', ',', ';', '.', ':', '=', '+', '-', '*', '/', '%', '|', '&',
    '!', '~', '^', '<', '>', '?', '@', '#', '\\',
];
