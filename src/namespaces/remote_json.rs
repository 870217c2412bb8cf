//! Official namespaces from one compiled JSON document.

use super::{NamespaceData, NamespaceSourceHandler, decode_entries, fetch_text};
use crate::core::{QxsError, Result};
use crate::models::NamespaceSource;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

#[derive(Deserialize)]
struct BulkDocument {
    shortcuts: HashMap<String, HashMap<String, serde_json::Value>>,
}

/// Handler for official namespaces (`"o"`, `"de"`, `".de"`, ...).
///
/// The whole document (`{"shortcuts": {<namespace>: {<search key>: ...}}}`) is
/// downloaded on first use and cached for the process lifetime. A namespace
/// missing from the document has no data.
pub struct RemoteSingleJsonNamespaceSourceHandler {
    url: String,
    client: reqwest::Client,
    cache: OnceCell<HashMap<String, NamespaceData>>,
}

impl RemoteSingleJsonNamespaceSourceHandler {
    /// Handler loading from `url`, e.g. [`DEFAULT_DATA_SOURCE_URL`](crate::constants::DEFAULT_DATA_SOURCE_URL).
    #[must_use]
    pub fn new(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
            cache: OnceCell::new(),
        }
    }

    async fn load(&self) -> Result<HashMap<String, NamespaceData>> {
        let content = fetch_text(&self.client, &self.url).await?;
        parse_bulk_document(&self.url, &content)
    }
}

#[async_trait]
impl NamespaceSourceHandler for RemoteSingleJsonNamespaceSourceHandler {
    fn supports(&self, source: &NamespaceSource) -> bool {
        matches!(source, NamespaceSource::Official(_))
    }

    async fn get(&self, source: &NamespaceSource) -> Result<Option<NamespaceData>> {
        let NamespaceSource::Official(name) = source else {
            return Err(QxsError::UnsupportedNamespaceSource {
                source_name: source.to_string(),
            });
        };

        let namespaces = self.cache.get_or_try_init(|| self.load()).await?;
        Ok(namespaces.get(name).cloned())
    }
}

fn parse_bulk_document(url: &str, content: &str) -> Result<HashMap<String, NamespaceData>> {
    let document: BulkDocument =
        serde_json::from_str(content).map_err(|e| QxsError::MalformedNamespaceData {
            source_name: url.to_string(),
            reason: e.to_string(),
        })?;

    debug!("Loaded {} official namespaces from {}", document.shortcuts.len(), url);
    Ok(document
        .shortcuts
        .into_iter()
        .map(|(name, entries)| {
            let shortcuts = decode_entries(&name, entries);
            (name, Arc::new(shortcuts))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShortcutSearchKeyMap;

    #[test]
    fn test_supports_only_official_namespaces() {
        let handler = RemoteSingleJsonNamespaceSourceHandler::new("http://localhost", reqwest::Client::new());

        assert!(handler.supports(&NamespaceSource::official("o")));
        assert!(!handler.supports(&NamespaceSource::inline("x", ShortcutSearchKeyMap::new())));
    }

    #[test]
    fn test_parse_bulk_document_splits_namespaces() {
        let namespaces = parse_bulk_document(
            "test",
            r#"{"shortcuts": {"o": {"g 1": {"url": "https://google.com/?q=<q>"}}, ".de": {}}}"#,
        )
        .unwrap();

        assert_eq!(namespaces.len(), 2);
        assert!(namespaces["o"].contains_key("g 1"));
        assert!(namespaces[".de"].is_empty());
    }

    #[test]
    fn test_parse_bulk_document_keeps_namespace_with_broken_entry() {
        let namespaces = parse_bulk_document(
            "test",
            r#"{"shortcuts": {"o": {"good 1": {"url": "https://good"}, "bad 1": {"tags": "web"}}}}"#,
        )
        .unwrap();

        assert!(namespaces["o"].contains_key("good 1"));
        assert!(!namespaces["o"].contains_key("bad 1"));
    }

    #[test]
    fn test_parse_bulk_document_rejects_other_shapes() {
        let error = parse_bulk_document("test", r#"{"namespaces": []}"#).unwrap_err();
        assert!(matches!(error, QxsError::MalformedNamespaceData { .. }));
    }
}
