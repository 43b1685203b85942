#![deny(missing_docs)]

//! # Identifier Formatting
//!
//! Turns arbitrary schema/operation names into valid TypeScript
//! declaration identifiers and quoted keys.
//!
//! Quoting rules:
//! - An identifier is `[A-Za-z$_][A-Za-z0-9$_]*` and not a reserved word.
//! - `identifier` replaces every other character with `_`, prefixes `_`
//!   when the first character is a digit or the result is reserved, and
//!   yields `_` for empty input.
//! - `format_key` emits the raw key when it is an identifier, otherwise
//!   the JSON-quoted string.

/// TypeScript/ECMAScript reserved words that cannot be bare identifiers.
const RESERVED_WORDS: &[&str] = &[
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '$' || c == '_'
}

fn is_identifier_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '$' || c == '_'
}

/// Whether `raw` can appear as a bare TypeScript identifier.
pub fn is_identifier(raw: &str) -> bool {
    let mut chars = raw.chars();
    match chars.next() {
        Some(c) if is_identifier_start(c) => {}
        _ => return false,
    }
    chars.all(is_identifier_part) && !RESERVED_WORDS.contains(&raw)
}

/// Sanitizes `raw` into a valid declaration identifier.
pub fn identifier(raw: &str) -> String {
    let mut out: String = raw
        .chars()
        .map(|c| if is_identifier_part(c) { c } else { '_' })
        .collect();
    if out.is_empty() {
        return "_".to_string();
    }
    let starts_with_digit = out.chars().next().is_some_and(|c| c.is_ascii_digit());
    if starts_with_digit || RESERVED_WORDS.contains(&out.as_str()) {
        out.insert(0, '_');
    }
    out
}

/// Formats `raw` as an object key: bare when it is a valid identifier,
/// JSON-quoted otherwise.
pub fn format_key(raw: &str) -> String {
    if is_identifier(raw) {
        raw.to_string()
    } else {
        format_string(raw)
    }
}

/// JSON-quotes `raw` as a string literal.
pub fn format_string(raw: &str) -> String {
    serde_json::to_string(raw).unwrap_or_default()
}
