use log::{debug, trace};

use super::InputView;
use crate::Value;

impl InputView {
    /// Set the value programmatically.
    ///
    /// Marks the field edited only when the value really changes: empty text
    /// and null count as the same, `0` counts as a value.
    pub fn set_value(&mut self, value: impl Into<Value>) {
        let value = value.into();
        self.write_input(&value);
        self.state.update(|s| {
            if s.replace_value(value) {
                s.edited = true;
            }
        });
        self.run_tests();
    }

    /// Evaluate the current value and store the verdict.
    ///
    /// Returns the failure message, empty when valid. Never opens the
    /// `has_been_valid` gate.
    pub fn check_valid(&mut self) -> String {
        let message = self.evaluate();
        self.state.update(|s| s.set_verdict(message.clone()));
        message
    }

    /// Check validity, open the gate when valid, and show the result.
    pub fn run_tests(&mut self) {
        let message = self.check_valid();
        if message.is_empty() {
            self.state.update(|s| s.has_been_valid = true);
        }
        trace!("Field '{}' evaluated: {:?}", self.config.name, message);
        self.set_message(message);
    }

    /// Prepare for submission: surface validation state even on untouched
    /// fields. A configured before-submit hook replaces this entirely.
    pub fn before_submit(&mut self) {
        match self.config.before_submit.clone() {
            Some(hook) => {
                debug!("Field '{}' running custom before-submit", self.config.name);
                hook(self);
            }
            None => self.force_validation(),
        }
    }

    /// The built-in before-submit behavior, available to custom hooks.
    pub fn force_validation(&mut self) {
        debug!("Field '{}' forced validation", self.config.name);
        self.state.update(|s| {
            s.has_been_valid = true;
            s.edited = true;
        });
        self.run_tests();
    }

    /// Restore the construction-time value and hide any surfaced feedback.
    pub fn reset(&mut self) {
        debug!("Resetting field '{}'", self.config.name);
        let initial = self.config.value.clone();
        self.restart(initial);
    }

    /// Empty the field, whatever it started with, and hide any feedback.
    pub fn clear(&mut self) {
        debug!("Clearing field '{}'", self.config.name);
        self.restart(Value::Text(String::new()));
    }

    fn restart(&mut self, value: Value) {
        self.write_input(&value);
        self.state.update(|s| s.restart(value));
        self.clear_validity_classes();
        let message = self.check_valid();
        self.set_message(message);
    }
}
