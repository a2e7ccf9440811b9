use fielddom::Event;
use log::trace;

use super::InputView;
use crate::Value;

impl InputView {
    /// Route a document event to this field.
    ///
    /// Returns `false` when the event is not for this field's input, or the
    /// view is not listening for it (not rendered, or removed).
    pub fn dispatch(&mut self, event: &Event) -> bool {
        let Some(input) = self.input() else {
            return false;
        };
        if event.target() != input || !self.doc.is_listening(input, event.kind()) {
            return false;
        }
        trace!("Field '{}' received {:?}", self.config.name, event.kind());

        match event {
            Event::Input { .. } => self.handle_input_changed(),
            Event::Blur { .. } => self.handle_blur(),
            Event::Change { .. } => self.handle_change(),
            Event::Submit { .. } => self.before_submit(),
        }
        true
    }

    /// Every keystroke: take the live value, mark the field edited, re-check
    /// and tell the parent form.
    pub fn handle_input_changed(&mut self) {
        let Some(input) = self.input() else {
            return;
        };
        let text = self.doc.value(input).unwrap_or_default();
        self.state.update(|s| {
            s.value = Value::Text(text);
            s.edited = true;
        });
        self.run_tests();

        if let Some(parent) = self.config.parent.clone() {
            parent.update(self);
        }
    }

    /// Leaving the input commits what was typed, so an edited non-empty
    /// value starts showing its errors.
    pub fn handle_blur(&mut self) {
        self.commit();
    }

    pub fn handle_change(&mut self) {
        self.commit();
    }

    fn commit(&mut self) {
        let (empty, edited) = self.state.read(|s| (s.value.is_empty(), s.edited));
        if empty {
            return;
        }
        if edited {
            self.state.update(|s| s.has_been_valid = true);
        }
        self.run_tests();
    }
}
