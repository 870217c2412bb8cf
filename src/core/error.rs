//! Error handling for qxs
//!
//! All failures that originate in qxs itself are variants of [`QxsError`]. Every
//! variant belongs to exactly one [`ErrorKind`], so callers can treat "any qxs
//! error" as one category while still distinguishing broken shortcut data from
//! misconfiguration and from programming defects:
//!
//! - **Data definition** ([`ErrorKind::DataDefinition`]): the namespace data is
//!   malformed or inconsistent (missing URL, unknown variable placeholder,
//!   include chain too deep, ...).
//! - **Usage** ([`ErrorKind::Usage`]): the caller or environment is misconfigured
//!   (default keyword missing, namespace cannot be fetched, bad config file).
//! - **Implementation** ([`ErrorKind::Implementation`]): an internal invariant was
//!   violated, e.g. no namespace handler accepts a source shape.
//!
//! Nothing in the core retries. Use [`user_friendly_error`] at the CLI edge to
//! turn an [`anyhow::Error`] into a displayable [`ErrorContext`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use qxs_cli::core::{ErrorKind, QxsError};
//!
//! let error = QxsError::CircularInclusion { search_key: "w 1".to_string() };
//! assert_eq!(error.kind(), ErrorKind::DataDefinition);
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Coarse classification of a [`QxsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Shortcut or namespace data is malformed.
    DataDefinition,
    /// The caller, config file, or environment is misconfigured.
    Usage,
    /// An internal invariant was violated.
    Implementation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DataDefinition => "data definition error",
            Self::Usage => "usage error",
            Self::Implementation => "implementation error",
        };
        f.write_str(name)
    }
}

/// The error type for qxs operations
///
/// Variants are grouped by their [`ErrorKind`]; see [`QxsError::kind`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QxsError {
    /// Include resolution exceeded the depth ceiling.
    ///
    /// There is no visited-set: a legitimate chain deeper than the ceiling is
    /// reported exactly like a cycle.
    #[error("Possible circular inclusion detected for search key \"{search_key}\"")]
    CircularInclusion {
        /// The search key being resolved when the ceiling was hit
        search_key: String,
    },

    /// An `include` value has a shape that is neither a key, a reference, nor a list.
    #[error("Encountered unexpected include definition: {definition}")]
    InvalidInclude {
        /// The offending include rendered as JSON
        definition: String,
    },

    /// A shortcut that is not deprecated carries no `url`.
    #[error("Shortcut \"{keyword}\" has no url although it is not deprecated")]
    MissingUrl {
        /// Keyword of the malformed shortcut
        keyword: String,
    },

    /// A deprecation alternative expects a different number of arguments than supplied.
    #[error(
        "Number of arguments of deprecation alternative ({placeholders}) does not match original shortcut's argument count ({arguments})"
    )]
    AlternativeArgumentMismatch {
        /// Placeholders in the alternative query template
        placeholders: usize,
        /// Arguments supplied to the original query
        arguments: usize,
    },

    /// A `<$...>` placeholder that qxs does not know.
    #[error("Encountered invalid variable placeholder: \"{placeholder}\"")]
    InvalidVariablePlaceholder {
        /// The full placeholder including angle brackets
        placeholder: String,
    },

    /// A `<$now ...>` placeholder without a usable `output` format.
    #[error("Unable to parse $now placeholder: \"{placeholder}\"")]
    InvalidNowPlaceholder {
        /// The full placeholder including angle brackets
        placeholder: String,
    },

    /// Namespace payload could not be decoded into shortcut definitions.
    #[error("Malformed shortcut data in namespace '{source_name}': {reason}")]
    MalformedNamespaceData {
        /// Namespace (or URL/path) the payload came from
        source_name: String,
        /// Decoder message
        reason: String,
    },

    /// The configured default keyword does not resolve.
    #[error("Default shortcut \"{keyword}\" was not found")]
    DefaultKeywordNotFound {
        /// The configured default keyword
        keyword: String,
    },

    /// A namespace could not be fetched or read.
    #[error("Namespace '{source_name}' is unavailable: {reason}")]
    NamespaceUnavailable {
        /// Namespace (or URL/path) that failed
        source_name: String,
        /// Underlying I/O or HTTP failure
        reason: String,
    },

    /// Configuration file problem.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// The browser could not be started.
    #[error("Failed to launch browser '{browser}': {reason}")]
    BrowserLaunchFailed {
        /// Configured browser command
        browser: String,
        /// Why launching failed
        reason: String,
    },

    /// No registered handler supports the namespace source.
    #[error("No namespace source handler supports namespace '{source_name}'")]
    UnsupportedNamespaceSource {
        /// Display name of the source
        source_name: String,
    },
}

impl QxsError {
    /// The category this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CircularInclusion { .. }
            | Self::InvalidInclude { .. }
            | Self::MissingUrl { .. }
            | Self::AlternativeArgumentMismatch { .. }
            | Self::InvalidVariablePlaceholder { .. }
            | Self::InvalidNowPlaceholder { .. }
            | Self::MalformedNamespaceData { .. } => ErrorKind::DataDefinition,
            Self::DefaultKeywordNotFound { .. }
            | Self::NamespaceUnavailable { .. }
            | Self::ConfigError { .. }
            | Self::BrowserLaunchFailed { .. } => ErrorKind::Usage,
            Self::UnsupportedNamespaceSource { .. } => ErrorKind::Implementation,
        }
    }
}

/// Result alias used by the resolution core.
pub type Result<T> = std::result::Result<T, QxsError>;

/// Error wrapper with optional details and a suggestion for CLI display.
///
/// ```rust,no_run
/// use qxs_cli::core::{ErrorContext, QxsError};
///
/// let context = ErrorContext::new(QxsError::DefaultKeywordNotFound { keyword: "g".into() })
///     .with_suggestion("Set default_keyword in ~/.qxs/config.toml to an existing keyword");
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying qxs error
    pub error: QxsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context without details or suggestion.
    #[must_use]
    pub const fn new(error: QxsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion (shown in green).
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add explanatory details (shown in yellow).
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert an error into an [`ErrorContext`] if it is (or wraps) a [`QxsError`].
///
/// Returns `Err` with the original error when no [`QxsError`] is found in the
/// chain, so the caller can print it with full diagnostic detail instead.
pub fn user_friendly_error(error: anyhow::Error) -> std::result::Result<ErrorContext, anyhow::Error> {
    let Some(qxs_error) = error.chain().find_map(|cause| cause.downcast_ref::<QxsError>()) else {
        return Err(error);
    };

    Ok(create_error_context(qxs_error.clone()))
}

fn create_error_context(error: QxsError) -> ErrorContext {
    match &error {
        QxsError::DefaultKeywordNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Check default_keyword in your qxs config or add the keyword to one of your namespaces"),
        QxsError::NamespaceUnavailable { .. } => ErrorContext::new(error)
            .with_suggestion("Check your network connection and the namespace definitions in your qxs config"),
        QxsError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Fix the config file or pass another one with --config"),
        QxsError::BrowserLaunchFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Set 'browser' in your qxs config or use --output to print the URL"),
        QxsError::CircularInclusion { .. } => ErrorContext::new(error).with_details(format!(
            "Include chains are limited to {} levels",
            crate::constants::DEFAULT_MAX_INCLUDE_DEPTH
        )),
        QxsError::UnsupportedNamespaceSource { .. } => ErrorContext::new(error)
            .with_details("This is a bug in qxs, please report it"),
        _ => ErrorContext::new(error),
    }
}
