//! Placeholder extraction from URL templates.
//!
//! Every `<...>` token is a placeholder. Tokens whose inner text starts with
//! `$` are [`PlaceholderKind::Variable`] (resolved from context), all others
//! are [`PlaceholderKind::Argument`] (filled from the query's arguments).

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^>]+)>").expect("placeholder pattern is valid"));

static LEGACY_PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%([^}]+)\}").expect("legacy placeholder pattern is valid"));

/// What fills a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// Filled from a user argument
    Argument,
    /// Filled from ambient context (`<$language>`, `<$country: {}>`, `<$now: ...>`)
    Variable,
}

/// One `<...>` token of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The full token including angle brackets
    pub pattern: String,
    /// Inner text for argument placeholders, `None` for variables
    pub name: Option<String>,
    /// Argument or variable
    pub kind: PlaceholderKind,
    /// Byte range of `pattern` within the template
    pub span: Range<usize>,
}

/// All placeholders of `template`, in order of appearance.
#[must_use]
pub fn placeholders(template: &str) -> Vec<Placeholder> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let inner = captures.get(1)?.as_str();
            let kind = if inner.starts_with('$') {
                PlaceholderKind::Variable
            } else {
                PlaceholderKind::Argument
            };

            Some(Placeholder {
                pattern: whole.as_str().to_string(),
                name: (kind == PlaceholderKind::Argument).then(|| inner.to_string()),
                kind,
                span: whole.range(),
            })
        })
        .collect()
}

/// Names of the argument placeholders of `template`, in order.
#[must_use]
pub fn argument_placeholder_names(template: &str) -> Vec<String> {
    placeholders(template).into_iter().filter_map(|placeholder| placeholder.name).collect()
}

/// Rewrite short-notation `{%name}` placeholders to `<name>`.
#[must_use]
pub fn replace_legacy_placeholders(template: &str) -> String {
    LEGACY_PLACEHOLDER_RE.replace_all(template, "<$1>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gets_argument_placeholders() {
        let result =
            placeholders("https://www.bvg.de/de/verbindungen/verbindungssuche?S=<Start>&Z=<Ziel>&start=1");

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].pattern, "<Start>");
        assert_eq!(result[0].name.as_deref(), Some("Start"));
        assert_eq!(result[0].kind, PlaceholderKind::Argument);
        assert_eq!(result[1].pattern, "<Ziel>");
        assert_eq!(result[1].name.as_deref(), Some("Ziel"));
    }

    #[test]
    fn test_gets_argument_and_variable_placeholders() {
        let template = "https://<$language>.wikipedia.org/wiki/Special:Search?go=Article&search=<article>";
        let result = placeholders(template);

        assert_eq!(result[0].pattern, "<$language>");
        assert_eq!(result[0].name, None);
        assert_eq!(result[0].kind, PlaceholderKind::Variable);
        assert_eq!(&template[result[0].span.clone()], "<$language>");
        assert_eq!(result[1].name.as_deref(), Some("article"));
        assert_eq!(result[1].kind, PlaceholderKind::Argument);
    }

    #[test]
    fn test_argument_placeholder_names() {
        let names = argument_placeholder_names("https://x/<$language>/<from>/<to>");
        assert_eq!(names, vec!["from", "to"]);
    }

    #[test]
    fn test_replace_legacy_placeholders() {
        assert_eq!(
            replace_legacy_placeholders("https://example.com/?a={%first}&b={%second}"),
            "https://example.com/?a=<first>&b=<second>"
        );
    }
}
