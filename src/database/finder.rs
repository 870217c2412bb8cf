//! Search-key resolution across prioritized namespaces.

use crate::core::{QxsError, Result};
use crate::models::{IncludeDefinition, NamespaceSource, RawShortcut, Shortcut, ShortcutEntry};
use crate::namespaces::NamespaceDispatcher;
use crate::url::placeholder::replace_legacy_placeholders;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Resolves search keys against a fixed namespace list and language.
///
/// Namespaces are given in ascending priority and searched highest first.
/// Cached namespace snapshots are only ever read; every entry is cloned before
/// its `include` is stripped and merged.
pub struct ShortcutFinder<'a> {
    dispatcher: &'a NamespaceDispatcher,
    namespaces: &'a [NamespaceSource],
    language: &'a str,
}

impl<'a> ShortcutFinder<'a> {
    /// Finder over `namespaces` (ascending priority).
    ///
    /// `language` replaces `<$language>` in include keys.
    #[must_use]
    pub const fn new(
        dispatcher: &'a NamespaceDispatcher,
        namespaces: &'a [NamespaceSource],
        language: &'a str,
    ) -> Self {
        Self {
            dispatcher,
            namespaces,
            language,
        }
    }

    /// Resolve `search_key` (`"<keyword> <argument count>"`).
    ///
    /// `override_namespaces` replaces the configured namespace list. Each
    /// include hop consumes one unit of `max_depth`; reaching zero fails with
    /// [`QxsError::CircularInclusion`]. Returns `None` when no namespace
    /// defines the key or when its include resolves to nothing.
    ///
    /// # Errors
    ///
    /// Data-definition errors for include cycles and malformed includes;
    /// whatever the dispatcher reports for unavailable namespaces.
    pub fn get_shortcut_by_search_key<'s>(
        &'s self,
        search_key: &'s str,
        override_namespaces: Option<&'s [NamespaceSource]>,
        max_depth: u32,
    ) -> BoxFuture<'s, Result<Option<Shortcut>>> {
        async move {
            if max_depth == 0 {
                return Err(QxsError::CircularInclusion {
                    search_key: search_key.to_string(),
                });
            }

            let namespaces = override_namespaces.unwrap_or(self.namespaces);
            debug!("Searching for '{}' in {} namespace(s)", search_key, namespaces.len());

            for namespace in namespaces.iter().rev() {
                let Some(data) = self.dispatcher.get(namespace).await? else {
                    warn!("Namespace '{}' has no data, skipping", namespace);
                    continue;
                };
                let Some(entry) = data.get(search_key) else {
                    continue;
                };

                debug!("Found '{}' in namespace '{}'", search_key, namespace);
                let raw = match entry {
                    ShortcutEntry::Legacy(url) => {
                        return Ok(Some(Shortcut::from_url(replace_legacy_placeholders(url))));
                    }
                    ShortcutEntry::Definition(raw) => raw.clone(),
                };

                return self.resolve(raw, override_namespaces, max_depth - 1).await;
            }

            Ok(None)
        }
        .boxed()
    }

    /// All shortcuts whose title, description or url contain `normalized_query`.
    ///
    /// `normalized_query` must be lower-cased. Entries whose include resolves
    /// to nothing are skipped; on key collision the lower-priority namespace,
    /// visited last, wins.
    ///
    /// # Errors
    ///
    /// Same as [`get_shortcut_by_search_key`](Self::get_shortcut_by_search_key).
    pub async fn get_shortcuts_by_fulltext_search(
        &self,
        normalized_query: &str,
    ) -> Result<BTreeMap<String, Shortcut>> {
        let mut results = BTreeMap::new();

        for namespace in self.namespaces.iter().rev() {
            let Some(data) = self.dispatcher.get(namespace).await? else {
                continue;
            };

            for (search_key, entry) in data.iter() {
                let shortcut = match entry {
                    ShortcutEntry::Legacy(url) => Shortcut::from_url(replace_legacy_placeholders(url)),
                    ShortcutEntry::Definition(raw) => {
                        match self
                            .resolve(raw.clone(), None, crate::constants::DEFAULT_MAX_INCLUDE_DEPTH)
                            .await?
                        {
                            Some(shortcut) => shortcut,
                            None => continue,
                        }
                    }
                };

                if shortcut.matches(normalized_query) {
                    results.insert(search_key.clone(), shortcut);
                }
            }
        }

        Ok(results)
    }

    /// Strip the include of `raw` and merge the included shortcut below it.
    async fn resolve(
        &self,
        raw: RawShortcut,
        override_namespaces: Option<&[NamespaceSource]>,
        max_depth: u32,
    ) -> Result<Option<Shortcut>> {
        let RawShortcut { include, shortcut } = raw;
        let Some(include) = include else {
            return Ok(Some(shortcut));
        };

        // A shortcut without its included part (e.g. a title without url) is useless
        Ok(self
            .resolve_include(&include, override_namespaces, max_depth)
            .await?
            .map(|included| shortcut.merged_over(included)))
    }

    fn resolve_include<'s>(
        &'s self,
        include: &'s IncludeDefinition,
        override_namespaces: Option<&'s [NamespaceSource]>,
        max_depth: u32,
    ) -> BoxFuture<'s, Result<Option<Shortcut>>> {
        async move {
            match include {
                IncludeDefinition::Key(key) => {
                    let key = self.map_search_key(key);
                    self.get_shortcut_by_search_key(&key, override_namespaces, max_depth).await
                }
                IncludeDefinition::Reference { key, namespace } => {
                    let key = self.map_search_key(key);
                    match namespace {
                        Some(namespace) => {
                            let only = [NamespaceSource::official(namespace.as_str())];
                            self.get_shortcut_by_search_key(&key, Some(&only[..]), max_depth).await
                        }
                        None => self.get_shortcut_by_search_key(&key, override_namespaces, max_depth).await,
                    }
                }
                IncludeDefinition::List(entries) => {
                    for entry in entries {
                        if let Some(shortcut) =
                            self.resolve_include(entry, override_namespaces, max_depth).await?
                        {
                            return Ok(Some(shortcut));
                        }
                    }
                    Ok(None)
                }
                IncludeDefinition::Unrecognized(value) => Err(QxsError::InvalidInclude {
                    definition: value.to_string(),
                }),
            }
        }
        .boxed()
    }

    fn map_search_key(&self, search_key: &str) -> String {
        search_key.replace("<$language>", self.language)
    }
}
