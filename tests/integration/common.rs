//! Shared setup for integration tests.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Shortcuts written to `base.yml`.
pub const BASE_SHORTCUTS: &str = r#"
"bvg 2":
  title: BVG Verbindungssuche
  url: https://www.bvg.de/de/verbindungen/verbindungssuche?S=<Start>&Z=<Ziel>&start=1
"behvaugeh 2":
  deprecated:
    created: "2024-03-31"
    alternative:
      query: bvg <Start>, <Ziel>
"g 1":
  title: Google Web Search
  url: https://www.google.com/search?hl=<$language>&q=<query>
"wiki 1":
  include: "g 1"
  title: Wiki search
"legacy 1": https://legacy.example/?q={%query}
"broken 1":
  title: Broken
"#;

/// A temporary directory holding `config.toml` and `base.yml`.
pub struct QxsFixture {
    pub temp: TempDir,
}

impl QxsFixture {
    /// Fixture whose config lists `base.yml` plus an inline namespace, followed
    /// by the extra TOML lines in `extra`.
    pub fn new(extra: &str) -> Self {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("base.yml"), BASE_SHORTCUTS).unwrap();
        fs::write(
            temp.path().join("config.toml"),
            format!(
                r#"namespaces = [
    {{ name = "base", file = "base.yml" }},
    {{ name = "mine", shortcuts = {{ "g 1" = "https://mine.example/?q={{%query}}&lang=<$language>" }} }},
]
language = "de"
country = "de"
{extra}
"#
            ),
        )
        .unwrap();
        Self { temp }
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp.path().join("config.toml")
    }
}
