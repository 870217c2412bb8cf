//! Resolution of `<$...>` variable placeholders.
//!
//! Supported tokens:
//!
//! - `<$language>` → effective language
//! - `<$country: {}>` → effective country (only this exact spelling, as used by
//!   the Google News shortcut data)
//! - `<$now: {output: FORMAT}>` → local time, with `YYYY`, `MM`, `DD`, `HH`
//!   and `mm` in `FORMAT` replaced by zero-padded values

use crate::core::{QxsError, Result};
use chrono::{DateTime, Datelike, Local, Timelike};

/// Maps variable placeholders to their literal value.
#[derive(Debug, Clone)]
pub struct VariablePlaceholderProcessor {
    language: String,
    country: String,
    now: DateTime<Local>,
}

impl VariablePlaceholderProcessor {
    /// Processor using the current local time.
    #[must_use]
    pub fn new(language: impl Into<String>, country: impl Into<String>) -> Self {
        Self::with_now(language, country, Local::now())
    }

    /// Processor with a fixed clock.
    #[must_use]
    pub fn with_now(
        language: impl Into<String>,
        country: impl Into<String>,
        now: DateTime<Local>,
    ) -> Self {
        Self {
            language: language.into(),
            country: country.into(),
            now,
        }
    }

    /// Value of `placeholder` (including angle brackets).
    ///
    /// # Errors
    ///
    /// [`QxsError::InvalidVariablePlaceholder`] for unknown variables,
    /// [`QxsError::InvalidNowPlaceholder`] for `$now` without an output format.
    pub fn process(&self, placeholder: &str) -> Result<String> {
        match placeholder {
            "<$language>" => Ok(self.language.clone()),
            "<$country: {}>" => Ok(self.country.clone()),
            _ if placeholder.starts_with("<$now") => self.process_now(placeholder),
            _ => Err(QxsError::InvalidVariablePlaceholder {
                placeholder: placeholder.to_string(),
            }),
        }
    }

    fn process_now(&self, placeholder: &str) -> Result<String> {
        let invalid = || QxsError::InvalidNowPlaceholder {
            placeholder: placeholder.to_string(),
        };

        // `<$now: {output: HH-mm}>` is a YAML flow mapping once the brackets are stripped
        let inner = placeholder
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .ok_or_else(invalid)?;
        let parsed: serde_yaml::Value = serde_yaml::from_str(inner).map_err(|_| invalid())?;
        let format = parsed
            .get("$now")
            .and_then(|now| now.get("output"))
            .and_then(serde_yaml::Value::as_str)
            .ok_or_else(invalid)?;

        Ok(format_date(&self.now, format))
    }
}

fn format_date(now: &DateTime<Local>, format: &str) -> String {
    format
        .replace("YYYY", &format!("{:04}", now.year()))
        .replace("MM", &format!("{:02}", now.month()))
        .replace("DD", &format!("{:02}", now.day()))
        .replace("HH", &format!("{:02}", now.hour()))
        .replace("mm", &format!("{:02}", now.minute()))
}
