//! Per-placeholder transform of user arguments.

use super::placeholder::Placeholder;

/// Maps one argument to the value it contributes to its placeholder.
///
/// Currently the identity; per-placeholder rules (e.g. city or date mapping)
/// plug in here, before percent-encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentPlaceholderProcessor;

impl ArgumentPlaceholderProcessor {
    /// Create a processor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Value for `placeholder` given the user's `argument`.
    #[must_use]
    pub fn process(&self, _placeholder: &Placeholder, argument: &str) -> String {
        argument.to_string()
    }
}
