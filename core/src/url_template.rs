#![deny(missing_docs)]

//! # URL Template Parsing
//!
//! Extracts `{param}` placeholders from a path string and produces the
//! JavaScript template-literal form used by the generated `getUrl`
//! functions.

use regex::Regex;
use std::sync::OnceLock;

/// A parsed URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrlTemplate {
    /// The raw template, e.g. `/users/{id}`.
    pub url_template: String,
    /// Template-literal form, e.g. `/users/${id}`.
    pub url_js_template: String,
    /// Placeholder names in order of appearance.
    pub path_params: Vec<String>,
}

/// Parses `url_template`, collecting `{name}` placeholders in order.
pub fn parse_url_template(url_template: &str) -> ParsedUrlTemplate {
    static PARAM_RE: OnceLock<Regex> = OnceLock::new();
    let param_re = PARAM_RE.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("Invalid regex"));

    let path_params = param_re
        .captures_iter(url_template)
        .map(|capture| capture[1].to_string())
        .collect();

    ParsedUrlTemplate {
        url_template: url_template.to_string(),
        url_js_template: url_template.replace('{', "${"),
        path_params,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extracts_params_in_order() {
        let parsed = parse_url_template("/users/{id}/posts/{postId}");
        assert_eq!(parsed.path_params, ["id", "postId"]);
        assert_eq!(parsed.url_js_template, "/users/${id}/posts/${postId}");
        assert_eq!(parsed.url_template, "/users/{id}/posts/{postId}");
    }

    #[test]
    fn test_plain_url_has_no_params() {
        let parsed = parse_url_template("/health");
        assert!(parsed.path_params.is_empty());
        assert_eq!(parsed.url_js_template, "/health");
    }

    #[test]
    fn test_repeated_placeholder_is_collected_twice() {
        let parsed = parse_url_template("/{a}/{a}");
        assert_eq!(parsed.path_params, ["a", "a"]);
    }
}
