#![deny(missing_docs)]

//! # Declaration Text Formatting
//!
//! Low-level helpers shared by every generator: `key: value` entry lists,
//! indentation, and JSDoc comment blocks.

use crate::oas::SchemaObject;
use serde_json::Value;

/// Indentation applied per nesting level.
pub const INDENT: &str = "  ";

/// One `key: value` line in a declaration body.
#[derive(Debug, Clone, Default)]
pub struct Entry {
    /// Already-formatted key (quoted when necessary).
    pub key: String,
    /// Already-resolved value expression.
    pub value: String,
    /// Per-entry override of the options' middle separator (e.g. `?: `).
    pub middle_sep: Option<&'static str>,
    /// JSDoc block emitted above the entry.
    pub doc: Option<String>,
    /// Modifiers prepended to the key (e.g. `readonly`).
    pub modifiers: Vec<&'static str>,
}

/// Separator configuration for [`format_entries`].
#[derive(Debug, Clone)]
pub struct EntryOptions {
    /// Separator between key and value (default `: `).
    pub middle_separator: &'static str,
    /// Separator appended after each entry (default `,`).
    pub end_separator: &'static str,
    /// Whether the last entry also receives the end separator.
    pub trailing_end_separator: bool,
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self {
            middle_separator: ": ",
            end_separator: ",",
            trailing_end_separator: false,
        }
    }
}

/// Renders `entries` as one indented block.
pub fn format_entries(entries: &[Entry], options: &EntryOptions) -> String {
    let separator = format!("{}\n", options.end_separator);
    let rendered = entries
        .iter()
        .map(|entry| {
            let doc = entry
                .doc
                .as_ref()
                .map(|doc| format!("{}\n", doc))
                .unwrap_or_default();
            let modifiers: String = entry
                .modifiers
                .iter()
                .map(|modifier| format!("{} ", modifier))
                .collect();
            let middle = entry.middle_sep.unwrap_or(options.middle_separator);
            format!("{}{}{}{}{}", doc, modifiers, entry.key, middle, entry.value)
        })
        .collect::<Vec<_>>()
        .join(&separator);
    let trailing = if options.trailing_end_separator && !entries.is_empty() {
        options.end_separator
    } else {
        ""
    };
    add_indent_level(&format!("{}{}", rendered, trailing))
}

/// Indents every line of `text` by one level.
pub fn add_indent_level(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("{}{}", INDENT, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders `comments` as a JSDoc block, or `None` when empty.
pub fn format_comments(comments: &[String]) -> Option<String> {
    if comments.is_empty() {
        return None;
    }
    let body: String = comments
        .iter()
        .map(|comment| format!("\n * {}", comment))
        .collect();
    Some(format!("/**{}\n */", body))
}

/// Builds the JSDoc block for a schema from its `description`, `format`
/// and `example` facets.
pub fn format_schema_jsdoc(schema: &SchemaObject) -> Option<String> {
    let mut lines: Vec<String> = Vec::new();
    if let Some(description) = &schema.description {
        lines.extend(description.split('\n').map(str::to_string));
    }
    if let Some(format) = &schema.format {
        lines.push(format!("@format {}", format));
    }
    // Schemas and properties support a single example, not multiple.
    if let Some(example) = &schema.example {
        lines.push("@example".to_string());
        lines.push(match example {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
    }
    format_comments(&lines)
}
