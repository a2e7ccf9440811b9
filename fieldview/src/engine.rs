//! Value/validity bookkeeping shared by every field.

use crate::validation::{first_failure, FieldContext, Test};
use crate::Value;

/// Mutable state of one field.
///
/// `valid` always equals `message.is_empty()`. `has_been_valid` gates error
/// display and only goes back to false through a reset or clear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldState {
    pub value: Value,
    /// The user has produced input at least once.
    pub edited: bool,
    /// The field passed its checks at least once, or a submission forced it.
    pub has_been_valid: bool,
    pub valid: bool,
    pub message: String,
}

impl FieldState {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    /// Store a verdict, keeping `valid` in step with the message.
    pub fn set_verdict(&mut self, message: String) {
        self.valid = message.is_empty();
        self.message = message;
    }

    /// Replace the value; returns whether it changed under the emptiness rule.
    pub fn replace_value(&mut self, value: Value) -> bool {
        let changed = !self.value.same_as(&value);
        self.value = value;
        changed
    }

    /// Back to a pristine state holding `value`.
    pub fn restart(&mut self, value: Value) {
        self.value = value;
        self.edited = false;
        self.has_been_valid = false;
    }
}

/// What a check needs from the configuration.
pub struct Rules<'a> {
    pub required: bool,
    pub required_message: &'a str,
    pub tests: &'a [Test],
}

/// The message a value earns: the required message for a missing required
/// value, else the first failing test's message, else empty.
pub fn evaluate(rules: &Rules<'_>, value: &Value, cx: &FieldContext<'_>) -> String {
    if rules.required && value.is_empty() {
        return rules.required_message.to_string();
    }
    first_failure(rules.tests, value, cx).unwrap_or_default()
}
