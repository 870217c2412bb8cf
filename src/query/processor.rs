//! Top-level query resolution.

use super::parser::QueryParser;
use crate::core::{QxsError, Result};
use crate::database::ShortcutDatabase;
use crate::environment::Environment;
use crate::models::{NamespaceSource, Shortcut};
use crate::url::UrlProcessor;
use crate::url::placeholder::placeholders;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Outcome of processing one query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The query resolved to a URL.
    Success {
        /// Fully substituted target URL
        url: String,
        /// The shortcut that produced it
        shortcut: Shortcut,
    },
    /// The query matched a retired shortcut.
    Deprecated {
        /// When the shortcut was retired
        created: Option<String>,
        /// Replacement query with the original arguments filled in
        alternative_query: Option<String>,
    },
    /// No shortcut matched and no default keyword is configured.
    NotFound,
}

/// Resolves typed queries to URLs.
///
/// Language and country come from the query's prefixes, falling back to the
/// [`Environment`]. The namespace list is the environment's namespaces followed
/// by those named in the query, duplicates removed.
pub struct QueryProcessor {
    environment: Arc<dyn Environment>,
    database: Arc<dyn ShortcutDatabase>,
    parser: QueryParser,
}

impl QueryProcessor {
    /// Processor over `database` in `environment`.
    #[must_use]
    pub fn new(environment: Arc<dyn Environment>, database: Arc<dyn ShortcutDatabase>) -> Self {
        Self {
            environment,
            database,
            parser: QueryParser::new(),
        }
    }

    /// Resolve `query`.
    ///
    /// # Errors
    ///
    /// - [`QxsError::DefaultKeywordNotFound`] when the query does not resolve
    ///   and the configured default keyword does not either
    /// - [`QxsError::MissingUrl`] for a non-deprecated shortcut without url
    /// - [`QxsError::AlternativeArgumentMismatch`] for a deprecation alternative
    ///   expecting a different number of arguments
    /// - any error of the database or URL processing
    pub async fn process(&self, query: &str) -> Result<QueryOutcome> {
        let parsed = self.parser.parse(query);
        let country = parsed.country.as_deref().unwrap_or_else(|| self.environment.country());
        let language = parsed.language.as_deref().unwrap_or_else(|| self.environment.language());
        let namespaces = merge_namespaces(self.environment.namespaces(), &parsed.additional_namespaces);

        debug!(
            "Processing keyword '{}' with {} argument(s), language '{}', country '{}'",
            parsed.keyword,
            parsed.args.len(),
            language,
            country
        );

        let shortcut =
            self.database.get_shortcut(&parsed.keyword, parsed.args.len(), language, &namespaces).await?;

        let Some(shortcut) = shortcut else {
            return match self.environment.default_keyword() {
                Some(default_keyword) => self.process_default_keyword(default_keyword, query).await,
                None => Ok(QueryOutcome::NotFound),
            };
        };
        debug!("Shortcut database returned: {:?}", shortcut);

        if let Some(deprecated) = &shortcut.deprecated {
            let alternative_query = deprecated
                .alternative
                .as_ref()
                .map(|alternative| determine_deprecation_alternative(&alternative.query, &parsed.args))
                .transpose()?;

            return Ok(QueryOutcome::Deprecated {
                created: deprecated.created.clone(),
                alternative_query,
            });
        }

        let Some(template) = &shortcut.url else {
            return Err(QxsError::MissingUrl {
                keyword: parsed.keyword,
            });
        };

        let url = UrlProcessor::new(language, country).process(template, &parsed.args)?;
        Ok(QueryOutcome::Success { url, shortcut })
    }

    /// Full-text search over the environment's namespaces.
    ///
    /// # Errors
    ///
    /// Any error of the database.
    pub async fn search(&self, query: &str) -> Result<BTreeMap<String, Shortcut>> {
        self.database.search(query, self.environment.language(), self.environment.namespaces()).await
    }

    /// Resolve the default keyword with the whole raw `query` as its only argument.
    async fn process_default_keyword(&self, default_keyword: &str, query: &str) -> Result<QueryOutcome> {
        debug!("Falling back to default keyword '{}'", default_keyword);

        let language = self.environment.language();
        let shortcut = self
            .database
            .get_shortcut(default_keyword, 1, language, self.environment.namespaces())
            .await?
            .ok_or_else(|| QxsError::DefaultKeywordNotFound {
                keyword: default_keyword.to_string(),
            })?;

        let Some(template) = &shortcut.url else {
            return Err(QxsError::MissingUrl {
                keyword: default_keyword.to_string(),
            });
        };

        let url = UrlProcessor::new(language, self.environment.country())
            .process(template, &[query.to_string()])?;
        Ok(QueryOutcome::Success { url, shortcut })
    }
}

/// `base` followed by `additional`, keeping the first occurrence of each source.
fn merge_namespaces(base: &[NamespaceSource], additional: &[NamespaceSource]) -> Vec<NamespaceSource> {
    let mut merged: Vec<NamespaceSource> = Vec::with_capacity(base.len() + additional.len());
    for source in base.iter().chain(additional) {
        if !merged.contains(source) {
            merged.push(source.clone());
        }
    }
    merged
}

/// Fill the placeholders of `alternative` positionally with `args`.
fn determine_deprecation_alternative(alternative: &str, args: &[String]) -> Result<String> {
    let placeholders = placeholders(alternative);
    if placeholders.len() != args.len() {
        return Err(QxsError::AlternativeArgumentMismatch {
            placeholders: placeholders.len(),
            arguments: args.len(),
        });
    }

    let mut populated = String::with_capacity(alternative.len());
    let mut cursor = 0;
    for (placeholder, arg) in placeholders.iter().zip(args) {
        populated.push_str(&alternative[cursor..placeholder.span.start]);
        populated.push_str(arg);
        cursor = placeholder.span.end;
    }
    populated.push_str(&alternative[cursor..]);

    Ok(populated)
}
