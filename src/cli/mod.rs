//! Command-line interface for qxs.
//!
//! ```bash
//! qxs bvg Alexanderplatz, Hermannplatz   # open in the browser
//! qxs -o .de.gn Kunst                    # print the URL
//! qxs -f w Berlin                        # fetch the URL and print the body
//! qxs -s wikipedia                       # full-text search
//! ```
//!
//! All words after the options form a single query. Exit codes: `0` on
//! success or a deprecated shortcut, `1` when nothing matched or on errors,
//! `2` for invalid usage.

use crate::config::{ConfigEnvironment, QxsConfig};
use crate::constants::{URL_FETCH_TIMEOUT, USER_AGENT};
use crate::core::QxsError;
use crate::database::ObjectShortcutDatabase;
use crate::models::Shortcut;
use crate::namespaces::NamespaceDispatcher;
use crate::query::{QueryOutcome, QueryProcessor};
use crate::url::argument_placeholder_names;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::{Command, ExitCode, Stdio};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Settings derived from the command line before anything runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Explicit configuration file
    pub config_path: Option<PathBuf>,
}

/// Resolve keyword queries into URLs.
#[derive(Debug, Parser)]
#[command(
    name = "qxs",
    about = "Resolve keyword queries into URLs using Trovu-style shortcuts",
    version,
    long_about = "qxs turns short queries like `bvg Alexanderplatz, Hermannplatz` into URLs \
                  using shortcut definitions from prioritized namespaces."
)]
pub struct Cli {
    /// The query: `[.<country>.][<namespace>.]<keyword> [argument, ...]`
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,

    /// Print the resolved URL instead of opening it
    #[arg(short, long)]
    output: bool,

    /// Fetch the resolved URL and print the response body
    #[arg(short, long, conflicts_with = "output")]
    fetch: bool,

    /// Search shortcut titles, descriptions and URLs instead of resolving
    #[arg(short, long, conflicts_with_all = ["output", "fetch"])]
    search: bool,

    /// Log lookup details to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Path to the configuration file (default: `~/.qxs/config.toml`)
    #[arg(short, long, env = "QXS_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Run the command.
    ///
    /// # Errors
    ///
    /// Configuration, resolution, browser and fetch failures.
    pub async fn execute(self) -> Result<ExitCode> {
        let config = self.build_config();
        init_logging(&config.log_filter);
        self.execute_with_config(config).await
    }

    /// Derive [`CliConfig`] from the parsed flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_filter = if self.verbose { "qxs_cli=debug" } else { "qxs_cli=warn" };

        CliConfig {
            log_filter: log_filter.to_string(),
            config_path: self.config.clone(),
        }
    }

    /// Run the command with an explicit [`CliConfig`].
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn execute_with_config(self, config: CliConfig) -> Result<ExitCode> {
        let qxs_config = QxsConfig::load_with_optional(config.config_path).await?;
        let dispatcher =
            NamespaceDispatcher::with_default_handlers(&qxs_config.data_source_url, &qxs_config.github_base_url);
        let browser = qxs_config.browser.clone();

        let processor = QueryProcessor::new(
            Arc::new(ConfigEnvironment::new(qxs_config)),
            Arc::new(ObjectShortcutDatabase::new(Arc::new(dispatcher))),
        );
        let query = self.query.join(" ");

        if self.search {
            for (search_key, shortcut) in processor.search(&query).await? {
                println!("{}", search_line(&search_key, &shortcut));
            }
            return Ok(ExitCode::SUCCESS);
        }

        match processor.process(&query).await? {
            QueryOutcome::Success { url, .. } => {
                if self.output {
                    println!("{url}");
                } else if self.fetch {
                    print!("{}", fetch(&url).await?);
                } else {
                    open_in_browser(&browser, &url)?;
                }
                Ok(ExitCode::SUCCESS)
            }
            QueryOutcome::Deprecated {
                created,
                alternative_query,
            } => {
                eprintln!("{}", deprecation_message(created.as_deref(), alternative_query.as_deref()));
                Ok(ExitCode::SUCCESS)
            }
            QueryOutcome::NotFound => {
                eprintln!("Shortcut not found.");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

/// Install the stderr log subscriber; `RUST_LOG` overrides `default_filter`.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// `<search key>\t<argument names>\t<title>\t<url>`
fn search_line(search_key: &str, shortcut: &Shortcut) -> String {
    let url = shortcut.url.as_deref().unwrap_or_default();
    let arguments = argument_placeholder_names(url)
        .iter()
        .map(|name| format!("<{name}>"))
        .collect::<Vec<_>>()
        .join(", ");

    format!("{}\t{}\t{}\t{}", search_key, arguments, shortcut.title.as_deref().unwrap_or_default(), url)
}

fn deprecation_message(created: Option<&str>, alternative_query: Option<&str>) -> String {
    let mut message = match created {
        Some(created) => format!("This shortcut is deprecated since {created}."),
        None => "This shortcut is deprecated.".to_string(),
    };
    if let Some(alternative_query) = alternative_query {
        message.push_str(&format!(" Try the following query as replacement: \"{alternative_query}\"."));
    }
    message
}

/// Open `url` with `browser` without waiting for it to exit.
fn open_in_browser(browser: &str, url: &str) -> Result<()> {
    let launch_failed = |reason: String| QxsError::BrowserLaunchFailed {
        browser: browser.to_string(),
        reason,
    };

    let program = which::which(browser).map_err(|e| launch_failed(e.to_string()))?;
    info!("Opening {} with {}", url, program.display());

    Command::new(&program)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| launch_failed(e.to_string()))?;
    Ok(())
}

async fn fetch(url: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(URL_FETCH_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")?;

    info!("Fetching {}", url);
    client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .with_context(|| format!("Failed to fetch {url}"))?
        .text()
        .await
        .with_context(|| format!("Failed to read response from {url}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_log_filter() {
        let cli = Cli::parse_from(["qxs", "g", "rust"]);
        assert_eq!(cli.build_config().log_filter, "qxs_cli=warn");

        let cli = Cli::parse_from(["qxs", "--verbose", "g", "rust"]);
        assert_eq!(cli.build_config().log_filter, "qxs_cli=debug");
    }

    #[test]
    fn test_query_words_are_collected() {
        let cli = Cli::parse_from(["qxs", "-o", "bvg", "Alexanderplatz,", "Hermannplatz"]);

        assert!(cli.output);
        assert_eq!(cli.query.join(" "), "bvg Alexanderplatz, Hermannplatz");
    }

    #[test]
    fn test_output_and_fetch_conflict() {
        let error = Cli::try_parse_from(["qxs", "--output", "--fetch", "g", "rust"]).unwrap_err();

        assert_eq!(error.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_query_is_required() {
        assert!(Cli::try_parse_from(["qxs", "--output"]).is_err());
    }

    #[test]
    fn test_deprecation_message() {
        assert_eq!(
            deprecation_message(Some("2024-03-31"), Some("bvg A, B")),
            "This shortcut is deprecated since 2024-03-31. Try the following query as replacement: \"bvg A, B\"."
        );
        assert_eq!(
            deprecation_message(Some("2024-03-31"), None),
            "This shortcut is deprecated since 2024-03-31."
        );
    }

    #[test]
    fn test_search_line_lists_argument_names() {
        let mut shortcut = Shortcut::from_url("https://www.bvg.de/?S=<Start>&Z=<Ziel>&lang=<$language>");
        shortcut.title = Some("BVG".to_string());

        assert_eq!(
            search_line("bvg 2", &shortcut),
            "bvg 2\t<Start>, <Ziel>\tBVG\thttps://www.bvg.de/?S=<Start>&Z=<Ziel>&lang=<$language>"
        );
        assert_eq!(search_line("empty 0", &Shortcut::default()), "empty 0\t\t\t");
    }

    #[test]
    fn test_open_in_browser_reports_missing_program() {
        let error = open_in_browser("qxs-no-such-browser", "https://example.com").unwrap_err();

        assert!(matches!(
            error.downcast_ref::<QxsError>(),
            Some(QxsError::BrowserLaunchFailed { .. })
        ));
    }
}
