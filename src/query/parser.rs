//! Splitting a typed query into keyword, arguments and prefixes.
//!
//! A query looks like `[.<country>.][<prefix>.]*<keyword> [arg, arg, ...]`:
//!
//! | query | keyword | args | language | country | additional namespaces |
//! |---|---|---|---|---|---|
//! | `gn Art` | `gn` | `[Art]` | - | - | `[]` |
//! | `en.w Hamburg` | `w` | `[Hamburg]` | `en` | - | `[en]` |
//! | `.gb.gn Art` | `gn` | `[Art]` | - | `gb` | `[.gb]` |
//! | `.gb.de.gn Art` | `gn` | `[Art]` | `de` | `gb` | `[.gb, de]` |
//! | `en.blah.w x` | `w` | `[x]` | `en` | - | `[en, blah]` |
//!
//! Codes are not validated; a prefix that names no namespace simply yields no
//! data during lookup.

use crate::models::NamespaceSource;

/// Result of parsing one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedQuery {
    /// Final dot-segment of the first word
    pub keyword: String,
    /// Comma-separated arguments, each trimmed
    pub args: Vec<String>,
    /// Namespaces named by prefixes, ascending priority
    pub additional_namespaces: Vec<NamespaceSource>,
    /// First two-letter non-country prefix
    pub language: Option<String>,
    /// Two-letter prefix following a leading dot
    pub country: Option<String>,
}

/// Stateless query parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParser;

impl QueryParser {
    /// Create a parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse `query` into its parts.
    #[must_use]
    pub fn parse(&self, query: &str) -> ParsedQuery {
        let (keyword_token, argument_part) = match query.trim().split_once(' ') {
            Some((keyword_token, rest)) => (keyword_token, rest.trim()),
            None => (query.trim(), ""),
        };

        let args = if argument_part.is_empty() {
            Vec::new()
        } else {
            argument_part.split(',').map(|arg| arg.trim().to_string()).collect()
        };

        let mut prefixes: Vec<&str> = keyword_token.split('.').collect();
        let keyword = prefixes.pop().unwrap_or_default().to_string();

        let mut parsed = ParsedQuery {
            keyword,
            args,
            ..ParsedQuery::default()
        };

        let mut remaining = prefixes.as_slice();

        // A leading dot introduces the country: `.gb.gn`
        if let Some((&"", rest)) = remaining.split_first() {
            remaining = rest;
            if let Some((&country, rest)) = remaining.split_first()
                && country.chars().count() == 2
            {
                remaining = rest;
                parsed.additional_namespaces.push(NamespaceSource::official(format!(".{country}")));
                parsed.country = Some(country.to_string());
            }
        }

        for &prefix in remaining {
            if parsed.language.is_none() && prefix.chars().count() == 2 {
                parsed.language = Some(prefix.to_string());
            }
            // The language prefix is a namespace as well
            parsed.additional_namespaces.push(NamespaceSource::official(prefix));
        }

        parsed
    }
}
