//! Global constants used throughout the qxs codebase.
//!
//! Timeouts, default data sources and resolution limits live here so that
//! magic numbers stay discoverable.

use std::time::Duration;

/// Maximum number of include hops followed while resolving one search key.
///
/// This is a depth ceiling, not cycle detection: a legitimate chain deeper than
/// this is rejected exactly like a cycle.
pub const DEFAULT_MAX_INCLUDE_DEPTH: u32 = 10;

/// Timeout for fetching remote namespace data (30 seconds).
pub const NAMESPACE_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for `--fetch` requests against a resolved URL (30 seconds).
pub const URL_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Bulk JSON document holding all official namespaces.
pub const DEFAULT_DATA_SOURCE_URL: &str = "https://qxs.kesto.de/data.json";

/// Base URL for GitHub-hosted user namespaces.
pub const DEFAULT_GITHUB_BASE_URL: &str = "https://raw.githubusercontent.com/";

/// Repository and file path of a user namespace below `<base>/<user>/`.
pub const GITHUB_USER_SHORTCUTS_PATH: &str = "trovu-data-user/master/shortcuts.yml";

/// Default namespaces in ascending priority.
pub const DEFAULT_NAMESPACES: [&str; 3] = ["o", "en", ".us"];

/// Default language when neither query nor config provide one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default country when neither query nor config provide one.
pub const DEFAULT_COUNTRY: &str = "us";

/// User agent sent with every HTTP request.
pub const USER_AGENT: &str = concat!("qxs/", env!("CARGO_PKG_VERSION"));
