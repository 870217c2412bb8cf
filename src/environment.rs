//! Ambient context a query is resolved in.
//!
//! The [`QueryProcessor`](crate::query::QueryProcessor) only reads from an
//! [`Environment`]; the CLI backs it with the config file
//! ([`ConfigEnvironment`](crate::config::ConfigEnvironment)), tests with
//! [`StaticEnvironment`](crate::test_utils::StaticEnvironment).

use crate::models::NamespaceSource;

/// Read-only defaults for country, language, namespaces and fallback keyword.
pub trait Environment: Send + Sync {
    /// Two-letter country code, e.g. `de`.
    fn country(&self) -> &str;

    /// Two-letter language code, e.g. `en`.
    fn language(&self) -> &str;

    /// Namespaces in ascending priority (lowest first).
    fn namespaces(&self) -> &[NamespaceSource];

    /// Keyword used when a query does not resolve.
    fn default_keyword(&self) -> Option<&str>;
}
