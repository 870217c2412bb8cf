//! qxs - keyword queries to URLs
//!
//! qxs resolves a short, typed query such as `bvg Alexanderplatz, Hermannplatz`
//! into a destination URL by looking up a Trovu-style shortcut definition in a
//! layered set of namespaces and expanding the placeholders of its URL template.
//!
//! # Architecture Overview
//!
//! ```text
//! QueryProcessor ─► QueryParser
//!        │
//!        ├────────► ShortcutDatabase ─► ShortcutFinder ─► NamespaceDispatcher ─► handlers
//!        │
//!        └────────► UrlProcessor ─► placeholders, variables, arguments
//! ```
//!
//! 1. The [`query::QueryParser`] splits the query into keyword, arguments and
//!    inline language/country/namespace prefixes.
//! 2. The [`database::ObjectShortcutDatabase`] looks up `"<keyword> <n>"`,
//!    decrementing `n` down to 1, walking namespaces from highest to lowest
//!    priority and following `include` references up to a fixed depth.
//! 3. The [`query::QueryProcessor`] classifies the outcome (success, deprecated,
//!    not found), falls back to the default keyword, and runs the
//!    [`url::UrlProcessor`] over the shortcut's URL template.
//!
//! # Query Format
//!
//! ```text
//! [.<country>.][<language or namespace>.]*<keyword> [argument[, argument ...]]
//! ```
//!
//! | query | meaning |
//! |---|---|
//! | `g rust` | keyword `g`, one argument |
//! | `bvg Alexanderplatz, Hermannplatz` | keyword `bvg`, two arguments |
//! | `en.w Berlin` | language `en`, namespace `en` added |
//! | `.gb.gn Art` | country `gb`, namespace `.gb` added |
//!
//! # Core Modules
//!
//! - [`core`] - Error family ([`core::QxsError`]) and user-facing error rendering
//! - [`models`] - Shortcut and namespace data models
//! - [`environment`] - Ambient defaults a query is resolved in
//! - [`query`] - Parsing and top-level processing
//! - [`database`] - Shortcut lookup with include resolution
//! - [`namespaces`] - Fetching namespace data from its sources
//! - [`url`] - URL template expansion
//!
//! ## Supporting Modules
//! - [`config`] - `~/.qxs/config.toml`
//! - [`cli`] - The `qxs` command
//! - [`constants`] - Defaults and timeouts

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod database;
pub mod environment;
pub mod models;
pub mod namespaces;
pub mod query;
pub mod url;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
