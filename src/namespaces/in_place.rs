use super::{NamespaceData, NamespaceSourceHandler};
use crate::core::{QxsError, Result};
use crate::models::NamespaceSource;
use async_trait::async_trait;

/// Handler for shortcuts embedded directly in the namespace definition.
#[derive(Debug, Default)]
pub struct InPlaceNamespaceSourceHandler;

impl InPlaceNamespaceSourceHandler {
    /// Create the handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NamespaceSourceHandler for InPlaceNamespaceSourceHandler {
    fn supports(&self, source: &NamespaceSource) -> bool {
        matches!(source, NamespaceSource::Inline { .. })
    }

    async fn get(&self, source: &NamespaceSource) -> Result<Option<NamespaceData>> {
        match source {
            NamespaceSource::Inline { shortcuts, .. } => Ok(Some(shortcuts.clone())),
            _ => Err(QxsError::UnsupportedNamespaceSource {
                source_name: source.to_string(),
            }),
        }
    }
}
