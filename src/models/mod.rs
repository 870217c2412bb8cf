//! Shortcut and namespace data models
//!
//! These types mirror the Trovu-style YAML/JSON shortcut data:
//!
//! ```yaml
//! "bvg 2":
//!   title: BVG Verbindungssuche
//!   url: https://www.bvg.de/de/verbindungen/verbindungssuche?S=<Start>&Z=<Ziel>&start=1
//!   tags: [transport]
//! "behvaugeh 2":
//!   deprecated:
//!     created: 2024-03-31
//!     alternative:
//!       query: bvg <Start>, <Ziel>
//! "wiki 1":
//!   include: w 1
//! "legacy 1": https://example.com/?q={%query}
//! ```
//!
//! A [`ShortcutSearchKeyMap`] maps search keys (`"<keyword> <argumentCount>"`)
//! to [`ShortcutEntry`] values. Raw entries may carry an `include`; the
//! [`Shortcut`] type handed to callers never does.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Search key → raw shortcut definition, one map per namespace.
pub type ShortcutSearchKeyMap = HashMap<String, ShortcutEntry>;

/// A resolved, include-free shortcut definition.
///
/// Fields not modelled explicitly (for example `examples`) are kept in
/// [`extra`](Self::extra) so they survive include merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shortcut {
    /// URL template with `<argument>` and `<$variable>` placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Present when the shortcut is retired
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecation>,
    /// Any other fields of the definition
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Shortcut {
    /// Shortcut consisting of a URL template only.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Layer `self` over `base`: every field present on `self` wins.
    #[must_use]
    pub fn merged_over(self, base: Self) -> Self {
        let mut extra = base.extra;
        extra.extend(self.extra);

        Self {
            url: self.url.or(base.url),
            title: self.title.or(base.title),
            description: self.description.or(base.description),
            tags: self.tags.or(base.tags),
            deprecated: self.deprecated.or(base.deprecated),
            extra,
        }
    }

    /// Case-insensitive substring match on title, description and url.
    ///
    /// `normalized_query` must already be lower-cased.
    #[must_use]
    pub fn matches(&self, normalized_query: &str) -> bool {
        [&self.title, &self.description, &self.url]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(normalized_query))
    }
}

/// Deprecation marker of a retired shortcut.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deprecation {
    /// Date (as written in the data) the shortcut was retired
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Replacement query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative: Option<DeprecationAlternative>,
}

/// Replacement for a deprecated shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecationAlternative {
    /// Query template with `<name>` placeholders filled positionally from the
    /// original query's arguments
    pub query: String,
}

/// Shortcut as stored in namespace data, possibly referencing another one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawShortcut {
    /// Reference to the shortcut(s) this one inherits from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<IncludeDefinition>,
    /// Locally defined fields
    #[serde(flatten)]
    pub shortcut: Shortcut,
}

/// The `include` field of a raw shortcut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IncludeDefinition {
    /// `include: "w 1"`
    Key(String),
    /// `include: {key: "w 1", namespace: "en"}`
    Reference {
        /// Search key, may contain `<$language>`
        key: String,
        /// Restricts the lookup to this single namespace
        #[serde(default, skip_serializing_if = "Option::is_none")]
        namespace: Option<String>,
    },
    /// Alternatives tried left to right; the first that resolves wins
    List(Vec<IncludeDefinition>),
    /// Any other shape; rejected at resolution time
    Unrecognized(serde_json::Value),
}

/// Value stored under a search key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShortcutEntry {
    /// Short notation: just a URL template using `{%name}` placeholders
    Legacy(String),
    /// Full definition
    Definition(RawShortcut),
}

/// Where the shortcuts of one namespace come from.
///
/// Configuration files write either a bare name (`"o"`, `"de"`, `".de"`) or a
/// table with exactly one of `url`, `github`, `file`, `shortcuts`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "NamespaceSourceDefinition")]
pub enum NamespaceSource {
    /// Official/shared namespace from the bulk data source
    Official(String),
    /// YAML/JSON document at a URL
    Url {
        /// Optional display name
        name: Option<String>,
        /// Location of the document
        url: String,
    },
    /// User namespace hosted on GitHub
    Github {
        /// Optional display name
        name: Option<String>,
        /// GitHub user name
        github: String,
    },
    /// YAML/JSON file on disk
    File {
        /// Optional display name
        name: Option<String>,
        /// Path to the file
        path: PathBuf,
    },
    /// Shortcuts embedded directly
    Inline {
        /// Optional display name
        name: Option<String>,
        /// The namespace data
        shortcuts: Arc<ShortcutSearchKeyMap>,
    },
}

impl NamespaceSource {
    /// Official namespace by name.
    #[must_use]
    pub fn official(name: impl Into<String>) -> Self {
        Self::Official(name.into())
    }

    /// Inline namespace wrapping `shortcuts`.
    #[must_use]
    pub fn inline(name: impl Into<String>, shortcuts: ShortcutSearchKeyMap) -> Self {
        Self::Inline {
            name: Some(name.into()),
            shortcuts: Arc::new(shortcuts),
        }
    }
}

impl fmt::Display for NamespaceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Official(name) => f.write_str(name),
            Self::Url { name: Some(name), .. }
            | Self::Github { name: Some(name), .. }
            | Self::File { name: Some(name), .. }
            | Self::Inline { name: Some(name), .. } => f.write_str(name),
            Self::Url { name: None, url } => f.write_str(url),
            Self::Github { name: None, github } => write!(f, "github:{github}"),
            Self::File { name: None, path } => write!(f, "{}", path.display()),
            Self::Inline { name: None, .. } => f.write_str("<inline>"),
        }
    }
}

/// Serialized shape of a [`NamespaceSource`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NamespaceSourceDefinition {
    Name(String),
    Table(NamespaceSourceTable),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NamespaceSourceTable {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    github: Option<String>,
    #[serde(default)]
    file: Option<PathBuf>,
    #[serde(default)]
    shortcuts: Option<ShortcutSearchKeyMap>,
}

impl TryFrom<NamespaceSourceDefinition> for NamespaceSource {
    type Error = String;

    fn try_from(definition: NamespaceSourceDefinition) -> Result<Self, Self::Error> {
        let table = match definition {
            NamespaceSourceDefinition::Name(name) => return Ok(Self::Official(name)),
            NamespaceSourceDefinition::Table(table) => table,
        };

        let NamespaceSourceTable {
            name,
            url,
            github,
            file,
            shortcuts,
        } = table;

        match (url, github, file, shortcuts) {
            (Some(url), None, None, None) => Ok(Self::Url { name, url }),
            (None, Some(github), None, None) => Ok(Self::Github { name, github }),
            (None, None, Some(path), None) => Ok(Self::File { name, path }),
            (None, None, None, Some(shortcuts)) => Ok(Self::Inline {
                name,
                shortcuts: Arc::new(shortcuts),
            }),
            (None, None, None, None) => match name {
                Some(name) => Ok(Self::Official(name)),
                None => Err("namespace table needs one of url, github, file, shortcuts".to_string()),
            },
            _ => Err(format!(
                "namespace '{}' must set only one of url, github, file, shortcuts",
                name.unwrap_or_default()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_deserializes_legacy_and_definition() {
        let map: ShortcutSearchKeyMap = serde_yaml::from_str(
            r#"
"legacy 1": "https://example.com/?q={%query}"
"wiki 1":
  include: "w 1"
  title: Wiki
  examples:
    - arguments: Berlin
"#,
        )
        .unwrap();

        assert_eq!(
            map["legacy 1"],
            ShortcutEntry::Legacy("https://example.com/?q={%query}".to_string())
        );
        let ShortcutEntry::Definition(raw) = &map["wiki 1"] else {
            panic!("expected definition");
        };
        assert_eq!(raw.include, Some(IncludeDefinition::Key("w 1".to_string())));
        assert_eq!(raw.shortcut.title.as_deref(), Some("Wiki"));
        assert!(raw.shortcut.extra.contains_key("examples"));
    }

    #[test]
    fn test_include_shapes() {
        let reference: IncludeDefinition =
            serde_yaml::from_str("{key: 'w 1', namespace: en}").unwrap();
        assert_eq!(
            reference,
            IncludeDefinition::Reference {
                key: "w 1".to_string(),
                namespace: Some("en".to_string())
            }
        );

        let list: IncludeDefinition = serde_yaml::from_str("['a 1', {key: 'b 1'}]").unwrap();
        assert!(matches!(list, IncludeDefinition::List(ref entries) if entries.len() == 2));

        let odd: IncludeDefinition = serde_yaml::from_str("{namespace: en}").unwrap();
        assert!(matches!(odd, IncludeDefinition::Unrecognized(_)));
    }

    #[test]
    fn test_merged_over_prefers_own_fields() {
        let base = Shortcut {
            url: Some("https://base".into()),
            title: Some("Base".into()),
            tags: Some(vec!["a".into()]),
            ..Shortcut::default()
        };
        let own = Shortcut {
            title: Some("Own".into()),
            ..Shortcut::default()
        };

        let merged = own.merged_over(base);
        assert_eq!(merged.url.as_deref(), Some("https://base"));
        assert_eq!(merged.title.as_deref(), Some("Own"));
        assert_eq!(merged.tags, Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let shortcut = Shortcut {
            title: Some("Wikipedia Search".into()),
            ..Shortcut::default()
        };
        assert!(shortcut.matches("wikipedia"));
        assert!(!shortcut.matches("google"));
    }

    #[test]
    fn test_namespace_source_from_config_shapes() {
        #[derive(Deserialize)]
        struct Holder {
            namespaces: Vec<NamespaceSource>,
        }

        let holder: Holder = toml::from_str(
            r#"
namespaces = [
    "o",
    { name = "mine", github = "johndoe" },
    { file = "shortcuts.yml" },
    { url = "https://example.com/ns.yml" },
    { name = "inline", shortcuts = { "ex 1" = "https://example.com/?q={%q}" } },
]
"#,
        )
        .unwrap();

        assert_eq!(holder.namespaces[0], NamespaceSource::official("o"));
        assert!(matches!(&holder.namespaces[1], NamespaceSource::Github { github, .. } if github == "johndoe"));
        assert!(matches!(&holder.namespaces[2], NamespaceSource::File { .. }));
        assert!(matches!(&holder.namespaces[3], NamespaceSource::Url { .. }));
        assert!(matches!(&holder.namespaces[4], NamespaceSource::Inline { shortcuts, .. } if shortcuts.contains_key("ex 1")));
        assert_eq!(holder.namespaces[1].to_string(), "mine");
    }

    #[test]
    fn test_namespace_source_rejects_ambiguous_table() {
        #[derive(Debug, Deserialize)]
        struct Holder {
            #[allow(dead_code)]
            namespaces: Vec<NamespaceSource>,
        }

        let result: Result<Holder, _> =
            toml::from_str(r#"namespaces = [{ url = "https://a", file = "b.yml" }]"#);
        assert!(result.is_err());
    }
}
