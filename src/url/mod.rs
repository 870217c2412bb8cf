//! URL templating: placeholder extraction and substitution.
//!
//! - [`placeholder`] classifies `<...>` tokens
//! - [`variable`] resolves `<$...>` tokens from context
//! - [`argument`] transforms user arguments per placeholder
//! - [`UrlProcessor`] ties them together

pub mod argument;
pub mod placeholder;
mod processor;
pub mod variable;

pub use placeholder::{Placeholder, PlaceholderKind, argument_placeholder_names};
pub use processor::UrlProcessor;
pub use variable::VariablePlaceholderProcessor;
