use super::{NamespaceData, NamespaceSourceHandler, parse_search_key_map};
use crate::core::{QxsError, Result};
use crate::models::NamespaceSource;
use async_trait::async_trait;
use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Handler for namespaces stored in a local YAML/JSON file.
///
/// Paths are used as given; the config layer makes them absolute.
#[derive(Default)]
pub struct FileNamespaceSourceHandler {
    cache: DashMap<PathBuf, NamespaceData>,
}

impl FileNamespaceSourceHandler {
    /// Create the handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NamespaceSourceHandler for FileNamespaceSourceHandler {
    fn supports(&self, source: &NamespaceSource) -> bool {
        matches!(source, NamespaceSource::File { .. })
    }

    async fn get(&self, source: &NamespaceSource) -> Result<Option<NamespaceData>> {
        let NamespaceSource::File { path, .. } = source else {
            return Err(QxsError::UnsupportedNamespaceSource {
                source_name: source.to_string(),
            });
        };

        if let Some(data) = self.cache.get(path) {
            return Ok(Some(data.clone()));
        }

        debug!("Reading shortcut file {}", path.display());
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            QxsError::NamespaceUnavailable {
                source_name: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        let data = Arc::new(parse_search_key_map(&path.display().to_string(), &content)?);
        self.cache.insert(path.clone(), data.clone());
        Ok(Some(data))
    }
}
