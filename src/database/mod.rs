//! Shortcut lookup by keyword and argument count.
//!
//! [`ShortcutDatabase`] is the seam the [`QueryProcessor`](crate::query::QueryProcessor)
//! depends on. [`ObjectShortcutDatabase`] implements it over Trovu-style
//! namespace data served by a [`NamespaceDispatcher`], delegating the actual
//! resolution to a [`ShortcutFinder`].

mod finder;

pub use finder::ShortcutFinder;

use crate::constants::DEFAULT_MAX_INCLUDE_DEPTH;
use crate::core::Result;
use crate::models::{NamespaceSource, Shortcut};
use crate::namespaces::NamespaceDispatcher;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Source of resolved shortcuts.
#[async_trait]
pub trait ShortcutDatabase: Send + Sync {
    /// Shortcut for `keyword` taking at most `argument_count` arguments.
    ///
    /// # Errors
    ///
    /// Data-definition errors from include resolution; errors fetching namespaces.
    async fn get_shortcut(
        &self,
        keyword: &str,
        argument_count: usize,
        language: &str,
        namespaces: &[NamespaceSource],
    ) -> Result<Option<Shortcut>>;

    /// Shortcuts whose title, description or url contain `query` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Same as [`get_shortcut`](Self::get_shortcut).
    async fn search(
        &self,
        query: &str,
        language: &str,
        namespaces: &[NamespaceSource],
    ) -> Result<BTreeMap<String, Shortcut>>;
}

/// [`ShortcutDatabase`] over namespace data (classic Trovu YAML).
pub struct ObjectShortcutDatabase {
    dispatcher: Arc<NamespaceDispatcher>,
}

impl ObjectShortcutDatabase {
    /// Database reading namespaces through `dispatcher`.
    #[must_use]
    pub const fn new(dispatcher: Arc<NamespaceDispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl ShortcutDatabase for ObjectShortcutDatabase {
    async fn get_shortcut(
        &self,
        keyword: &str,
        argument_count: usize,
        language: &str,
        namespaces: &[NamespaceSource],
    ) -> Result<Option<Shortcut>> {
        let finder = ShortcutFinder::new(&self.dispatcher, namespaces, language);

        // Shortcuts for fewer arguments also match; surplus arguments are
        // joined into the last placeholder later. Zero is never tried.
        for count in (1..=argument_count).rev() {
            let search_key = format!("{keyword} {count}");
            if let Some(shortcut) =
                finder.get_shortcut_by_search_key(&search_key, None, DEFAULT_MAX_INCLUDE_DEPTH).await?
            {
                return Ok(Some(shortcut));
            }
        }

        debug!("No shortcut for '{}' with up to {} argument(s)", keyword, argument_count);
        Ok(None)
    }

    async fn search(
        &self,
        query: &str,
        language: &str,
        namespaces: &[NamespaceSource],
    ) -> Result<BTreeMap<String, Shortcut>> {
        let finder = ShortcutFinder::new(&self.dispatcher, namespaces, language);
        finder.get_shortcuts_by_fulltext_search(&query.to_lowercase()).await
    }
}
