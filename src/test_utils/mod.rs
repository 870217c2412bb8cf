//! Test utilities for qxs
//!
//! Helpers shared by unit and integration tests: one-time logging setup, an
//! in-memory [`Environment`], a namespace handler serving fixed data, and the
//! standard fixture namespaces.
//!
//! # Example
//!
//! ```rust,no_run
//! use qxs_cli::query::QueryOutcome;
//! use qxs_cli::test_utils::fixture_processor;
//!
//! # async fn example() {
//! let outcome = fixture_processor(None).process("bvg Alexanderplatz, Hermannplatz").await.unwrap();
//! assert!(matches!(outcome, QueryOutcome::Success { .. }));
//! # }
//! ```

use crate::core::{QxsError, Result};
use crate::database::ObjectShortcutDatabase;
use crate::environment::Environment;
use crate::models::{NamespaceSource, ShortcutSearchKeyMap};
use crate::namespaces::{NamespaceData, NamespaceDispatcher, NamespaceSourceHandler};
use crate::query::QueryProcessor;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=qxs_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// [`Environment`] with fixed values.
///
/// Defaults to namespaces `o`, `de`, `.de`, country `de`, language `de` and no
/// default keyword.
#[derive(Debug, Clone)]
pub struct StaticEnvironment {
    /// Country code
    pub country: String,
    /// Language code
    pub language: String,
    /// Namespaces, ascending priority
    pub namespaces: Vec<NamespaceSource>,
    /// Fallback keyword
    pub default_keyword: Option<String>,
}

impl Default for StaticEnvironment {
    fn default() -> Self {
        Self {
            country: "de".to_string(),
            language: "de".to_string(),
            namespaces: ["o", "de", ".de"].into_iter().map(NamespaceSource::official).collect(),
            default_keyword: None,
        }
    }
}

impl StaticEnvironment {
    /// Default environment with `default_keyword`.
    #[must_use]
    pub fn with_default_keyword(default_keyword: Option<&str>) -> Self {
        Self {
            default_keyword: default_keyword.map(str::to_string),
            ..Self::default()
        }
    }
}

impl Environment for StaticEnvironment {
    fn country(&self) -> &str {
        &self.country
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn namespaces(&self) -> &[NamespaceSource] {
        &self.namespaces
    }

    fn default_keyword(&self) -> Option<&str> {
        self.default_keyword.as_deref()
    }
}

/// Handler serving official namespaces from memory.
///
/// Names without data yield `None`, like an official namespace absent from
/// the bulk document.
#[derive(Debug, Default)]
pub struct StaticNamespaceSourceHandler {
    namespaces: HashMap<String, NamespaceData>,
}

impl StaticNamespaceSourceHandler {
    /// Handler without any namespaces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add namespace `name` holding `shortcuts`.
    #[must_use]
    pub fn with_namespace(mut self, name: &str, shortcuts: ShortcutSearchKeyMap) -> Self {
        self.namespaces.insert(name.to_string(), Arc::new(shortcuts));
        self
    }
}

#[async_trait]
impl NamespaceSourceHandler for StaticNamespaceSourceHandler {
    fn supports(&self, source: &NamespaceSource) -> bool {
        matches!(source, NamespaceSource::Official(_))
    }

    async fn get(&self, source: &NamespaceSource) -> Result<Option<NamespaceData>> {
        match source {
            NamespaceSource::Official(name) => Ok(self.namespaces.get(name).cloned()),
            _ => Err(QxsError::UnsupportedNamespaceSource {
                source_name: source.to_string(),
            }),
        }
    }
}

/// Shortcuts of the `o` fixture namespace.
pub const FIXTURE_O: &str = r#"
"bvg 2":
  title: BVG Verbindungssuche
  url: https://www.bvg.de/de/verbindungen/verbindungssuche?S=<Start>&Z=<Ziel>&start=1
"behvaugeh 2":
  deprecated:
    created: "2024-03-31"
    alternative:
      query: bvg <Start>, <Ziel>
"invalidalternative 2":
  deprecated:
    created: "2024-03-31"
    alternative:
      query: bvg <Start>
"noalterantive 2":
  deprecated:
    created: "2024-03-31"
"resultmissingurl 2":
  title: Broken shortcut
"exampledefault 1":
  title: Example search
  url: https://example.com/?query=<query>
"wikipedia-de 1":
  title: Wikipedia (Deutsch)
  url: https://de.wikipedia.org/w/index.php?search=<query>
"gn 1":
  title: Google News
  url: "https://news.google.com/search?q=<query>&gl=<$country: {}>"
"#;

/// Shortcuts of the `de` fixture namespace.
pub const FIXTURE_DE: &str = r#"
"w 1":
  include:
    key: "wikipedia-<$language> 1"
    namespace: o
"#;

/// Shortcuts of the `en` fixture namespace.
pub const FIXTURE_EN: &str = r#"
"w 1":
  title: Wikipedia
  url: https://<$language>.wikipedia.org/wiki/Special:Search?search=<query>
"#;

/// Dispatcher over the fixture namespaces `o`, `de` and `en`.
///
/// # Panics
///
/// Panics if a fixture does not parse.
#[must_use]
pub fn fixture_dispatcher() -> NamespaceDispatcher {
    let parse = |yaml: &str| -> ShortcutSearchKeyMap {
        serde_yaml::from_str(yaml).expect("fixture namespace is valid YAML")
    };

    let handler = StaticNamespaceSourceHandler::new()
        .with_namespace("o", parse(FIXTURE_O))
        .with_namespace("de", parse(FIXTURE_DE))
        .with_namespace("en", parse(FIXTURE_EN));
    NamespaceDispatcher::new(vec![Box::new(handler)])
}

/// [`QueryProcessor`] over the fixture namespaces in the default [`StaticEnvironment`].
#[must_use]
pub fn fixture_processor(default_keyword: Option<&str>) -> QueryProcessor {
    let database = ObjectShortcutDatabase::new(Arc::new(fixture_dispatcher()));
    QueryProcessor::new(
        Arc::new(StaticEnvironment::with_default_keyword(default_keyword)),
        Arc::new(database),
    )
}
