use super::{NamespaceData, NamespaceSourceHandler, fetch_text, parse_search_key_map};
use crate::core::{QxsError, Result};
use crate::models::NamespaceSource;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Handler for namespaces published as a YAML/JSON document at a URL.
///
/// Each URL is fetched once per process.
pub struct UrlNamespaceSourceHandler {
    client: reqwest::Client,
    cache: DashMap<String, NamespaceData>,
}

impl UrlNamespaceSourceHandler {
    /// Create the handler.
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            cache: DashMap::new(),
        }
    }
}

#[async_trait]
impl NamespaceSourceHandler for UrlNamespaceSourceHandler {
    fn supports(&self, source: &NamespaceSource) -> bool {
        matches!(source, NamespaceSource::Url { .. })
    }

    async fn get(&self, source: &NamespaceSource) -> Result<Option<NamespaceData>> {
        let NamespaceSource::Url { url, .. } = source else {
            return Err(QxsError::UnsupportedNamespaceSource {
                source_name: source.to_string(),
            });
        };

        fetch_cached(&self.client, &self.cache, url).await.map(Some)
    }
}

/// Fetch `url` unless it is already in `cache`.
pub(super) async fn fetch_cached(
    client: &reqwest::Client,
    cache: &DashMap<String, NamespaceData>,
    url: &str,
) -> Result<NamespaceData> {
    if let Some(data) = cache.get(url) {
        return Ok(data.clone());
    }

    let content = fetch_text(client, url).await?;
    let data = Arc::new(parse_search_key_map(url, &content)?);
    cache.insert(url.to_string(), data.clone());
    Ok(data)
}
