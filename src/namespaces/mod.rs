//! Namespace sources: turning a [`NamespaceSource`] into shortcut data.
//!
//! The [`NamespaceDispatcher`] holds an ordered list of
//! [`NamespaceSourceHandler`]s and routes each source to the first handler
//! whose [`supports`](NamespaceSourceHandler::supports) returns `true`. Every
//! handler owns its fetch and cache policy; cached data is handed out as
//! immutable [`Arc`] snapshots that live for the rest of the process.
//!
//! | handler | source shape | data |
//! |---|---|---|
//! | [`RemoteSingleJsonNamespaceSourceHandler`] | `Official` | one bulk JSON document with all official namespaces |
//! | [`InPlaceNamespaceSourceHandler`] | `Inline` | embedded in the config |
//! | [`UrlNamespaceSourceHandler`] | `Url` | YAML/JSON document at a URL |
//! | [`GithubNamespaceSourceHandler`] | `Github` | `trovu-data-user` repository of a GitHub user |
//! | [`FileNamespaceSourceHandler`] | `File` | YAML/JSON file on disk |

mod file;
mod github;
mod in_place;
mod remote_json;
mod remote_url;

pub use file::FileNamespaceSourceHandler;
pub use github::GithubNamespaceSourceHandler;
pub use in_place::InPlaceNamespaceSourceHandler;
pub use remote_json::RemoteSingleJsonNamespaceSourceHandler;
pub use remote_url::UrlNamespaceSourceHandler;

use crate::core::{QxsError, Result};
use crate::models::{NamespaceSource, ShortcutEntry, ShortcutSearchKeyMap};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared, immutable snapshot of one namespace's data.
pub type NamespaceData = Arc<ShortcutSearchKeyMap>;

/// Fetches the data of the namespace sources it supports.
#[async_trait]
pub trait NamespaceSourceHandler: Send + Sync {
    /// Whether this handler can serve `source`. Pure check on the source shape.
    fn supports(&self, source: &NamespaceSource) -> bool;

    /// Data of `source`, or `None` when the namespace has no data.
    ///
    /// # Errors
    ///
    /// [`QxsError::UnsupportedNamespaceSource`] when called with an unsupported
    /// shape; usage or data-definition errors when fetching or decoding fails.
    async fn get(&self, source: &NamespaceSource) -> Result<Option<NamespaceData>>;
}

/// Routes namespace sources to handlers.
#[derive(Default)]
pub struct NamespaceDispatcher {
    handlers: Vec<Box<dyn NamespaceSourceHandler>>,
}

impl NamespaceDispatcher {
    /// Dispatcher over `handlers`, tried in order.
    #[must_use]
    pub fn new(handlers: Vec<Box<dyn NamespaceSourceHandler>>) -> Self {
        Self { handlers }
    }

    /// The standard handler chain.
    #[must_use]
    pub fn with_default_handlers(data_source_url: &str, github_base_url: &str) -> Self {
        let client = http_client();
        Self::new(vec![
            Box::new(RemoteSingleJsonNamespaceSourceHandler::new(data_source_url, client.clone())),
            Box::new(InPlaceNamespaceSourceHandler::new()),
            Box::new(UrlNamespaceSourceHandler::new(client.clone())),
            Box::new(GithubNamespaceSourceHandler::new(github_base_url, client)),
            Box::new(FileNamespaceSourceHandler::new()),
        ])
    }

    /// Data of `source` from the first supporting handler.
    ///
    /// # Errors
    ///
    /// [`QxsError::UnsupportedNamespaceSource`] when no handler supports the
    /// source; otherwise whatever the handler reports.
    pub async fn get(&self, source: &NamespaceSource) -> Result<Option<NamespaceData>> {
        let handler = self.handlers.iter().find(|handler| handler.supports(source)).ok_or_else(|| {
            QxsError::UnsupportedNamespaceSource {
                source_name: source.to_string(),
            }
        })?;

        debug!("Fetching namespace '{}'", source);
        handler.get(source).await
    }
}

/// HTTP client shared by the remote handlers.
#[must_use]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(crate::constants::USER_AGENT)
        .timeout(crate::constants::NAMESPACE_FETCH_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            warn!("Failed to configure HTTP client, using defaults: {}", e);
            reqwest::Client::new()
        })
}

/// GET `url` and return the body text.
pub(crate) async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let unavailable = |reason: String| QxsError::NamespaceUnavailable {
        source_name: url.to_string(),
        reason,
    };

    debug!("Loading shortcut data from {}", url);
    let response = client.get(url).send().await.map_err(|e| unavailable(e.to_string()))?;
    let response = response.error_for_status().map_err(|e| unavailable(e.to_string()))?;
    response.text().await.map_err(|e| unavailable(e.to_string()))
}

/// Decode a YAML (or JSON) search-key map.
///
/// The document must be a mapping; entries that do not decode are skipped.
pub(crate) fn parse_search_key_map(source_name: &str, content: &str) -> Result<ShortcutSearchKeyMap> {
    // An empty document means an empty namespace
    if content.trim().is_empty() {
        return Ok(ShortcutSearchKeyMap::new());
    }

    let entries: HashMap<String, serde_json::Value> =
        serde_yaml::from_str(content).map_err(|e| QxsError::MalformedNamespaceData {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })?;
    Ok(decode_entries(source_name, entries))
}

/// Decode each raw entry on its own, logging and dropping the ones that fail.
pub(crate) fn decode_entries(
    source_name: &str,
    entries: HashMap<String, serde_json::Value>,
) -> ShortcutSearchKeyMap {
    entries
        .into_iter()
        .filter_map(|(search_key, value)| match serde_json::from_value::<ShortcutEntry>(value) {
            Ok(entry) => Some((search_key, entry)),
            Err(e) => {
                warn!("Skipping malformed shortcut '{}' in namespace '{}': {}", search_key, source_name, e);
                None
            }
        })
        .collect()
}
