use super::argument::ArgumentPlaceholderProcessor;
use super::placeholder::{PlaceholderKind, placeholders};
use super::variable::VariablePlaceholderProcessor;
use crate::core::Result;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left as they are in an encoded argument: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Expands a URL template into the final URL.
///
/// Variable placeholders are resolved first, independent of arguments. Argument
/// placeholders are then filled positionally; surplus arguments are joined
/// with `,` into the last argument placeholder. Argument values are
/// percent-encoded, variable values are inserted verbatim. Argument
/// placeholders without a matching argument are left in place.
#[derive(Debug, Clone)]
pub struct UrlProcessor {
    variables: VariablePlaceholderProcessor,
    arguments: ArgumentPlaceholderProcessor,
}

impl UrlProcessor {
    /// Processor for the given effective language and country.
    #[must_use]
    pub fn new(language: impl Into<String>, country: impl Into<String>) -> Self {
        Self::with_variables(VariablePlaceholderProcessor::new(language, country))
    }

    /// Processor with a preconfigured variable resolver (e.g. a fixed clock).
    #[must_use]
    pub const fn with_variables(variables: VariablePlaceholderProcessor) -> Self {
        Self {
            variables,
            arguments: ArgumentPlaceholderProcessor::new(),
        }
    }

    /// Substitute all placeholders of `template`.
    ///
    /// # Errors
    ///
    /// Fails with a data-definition error on an unknown variable placeholder.
    pub fn process(&self, template: &str, args: &[String]) -> Result<String> {
        let placeholders = placeholders(template);

        let mut replacements = Vec::with_capacity(placeholders.len());
        for placeholder in placeholders.iter().filter(|p| p.kind == PlaceholderKind::Variable) {
            replacements.push((placeholder, self.variables.process(&placeholder.pattern)?));
        }

        let argument_placeholders: Vec<_> =
            placeholders.iter().filter(|p| p.kind == PlaceholderKind::Argument).collect();
        let effective_args = fold_excess_arguments(args, argument_placeholders.len());

        for (placeholder, argument) in argument_placeholders.into_iter().zip(&effective_args) {
            let value = self.arguments.process(placeholder, argument);
            replacements.push((placeholder, utf8_percent_encode(&value, URI_COMPONENT).to_string()));
        }

        replacements.sort_by_key(|(placeholder, _)| placeholder.span.start);

        let mut url = String::with_capacity(template.len());
        let mut cursor = 0;
        for (placeholder, value) in replacements {
            url.push_str(&template[cursor..placeholder.span.start]);
            url.push_str(&value);
            cursor = placeholder.span.end;
        }
        url.push_str(&template[cursor..]);

        Ok(url)
    }
}

/// Join arguments beyond `slots` into the last slot.
fn fold_excess_arguments(args: &[String], slots: usize) -> Vec<String> {
    if slots == 0 || args.len() <= slots {
        return args.to_vec();
    }

    let mut folded = args[..slots - 1].to_vec();
    folded.push(args[slots - 1..].join(","));
    folded
}
