//! View error types.

use fielddom::{DomError, SelectorError, TemplateError};

/// Errors raised while constructing or rendering an [`InputView`](crate::InputView).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// Every field needs a non-empty name.
    #[error("must pass in a name")]
    MissingName,

    /// The template markup could not be parsed.
    #[error("Invalid template for field '{field}': {source}")]
    Template {
        field: String,
        #[source]
        source: TemplateError,
    },

    /// The template lacks one of the addressable slots.
    #[error("Template for field '{field}' has no {role} slot")]
    MissingSlot { field: String, role: &'static str },

    /// The validity class selector could not be parsed.
    #[error("Invalid validity class selector for field '{field}': {source}")]
    Selector {
        field: String,
        #[source]
        source: SelectorError,
    },

    /// Mounting the fragment in place of the configured element failed.
    #[error("Could not mount field '{field}': {source}")]
    Mount {
        field: String,
        #[source]
        source: DomError,
    },
}
