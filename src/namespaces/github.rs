use super::remote_url::fetch_cached;
use super::{NamespaceData, NamespaceSourceHandler};
use crate::constants::GITHUB_USER_SHORTCUTS_PATH;
use crate::core::{QxsError, Result};
use crate::models::NamespaceSource;
use async_trait::async_trait;
use dashmap::DashMap;

/// Handler for user namespaces kept in a GitHub `trovu-data-user` repository.
///
/// `{github = "johndoe"}` loads
/// `<base>johndoe/trovu-data-user/master/shortcuts.yml`.
pub struct GithubNamespaceSourceHandler {
    base_url: String,
    client: reqwest::Client,
    cache: DashMap<String, NamespaceData>,
}

impl GithubNamespaceSourceHandler {
    /// Handler resolving users against `base_url` (raw content host, with trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            cache: DashMap::new(),
        }
    }

    /// Location of the shortcut file of `user`.
    #[must_use]
    pub fn shortcuts_url(&self, user: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/{user}/{GITHUB_USER_SHORTCUTS_PATH}")
    }
}

#[async_trait]
impl NamespaceSourceHandler for GithubNamespaceSourceHandler {
    fn supports(&self, source: &NamespaceSource) -> bool {
        matches!(source, NamespaceSource::Github { .. })
    }

    async fn get(&self, source: &NamespaceSource) -> Result<Option<NamespaceData>> {
        let NamespaceSource::Github { github, .. } = source else {
            return Err(QxsError::UnsupportedNamespaceSource {
                source_name: source.to_string(),
            });
        };

        let url = self.shortcuts_url(github);
        fetch_cached(&self.client, &self.cache, &url).await.map(Some)
    }
}
