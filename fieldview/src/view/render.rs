use fielddom::{template, EventKind};
use log::{debug, warn};

use super::InputView;
use crate::template::{Slots, DEFAULT_TEMPLATE};
use crate::visual::{self, ValidityClass};
use crate::{Value, ViewError};

impl InputView {
    /// Build the fragment and wire it up. Only the first call does anything.
    ///
    /// The fragment replaces the configured `el` when that element is
    /// attached somewhere; otherwise it stays detached for the host to place.
    pub fn render(&mut self) -> Result<&mut Self, ViewError> {
        if self.slots.is_some() {
            return Ok(self);
        }

        let name = self.config.name.clone();
        let markup = self.config.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
        let element = template::parse(markup).map_err(|source| ViewError::Template {
            field: name.clone(),
            source,
        })?;

        let root = self.doc.insert(element);
        let slots = match Slots::locate(&self.doc, root, &name) {
            Ok(slots) => slots,
            Err(err) => {
                self.doc.discard(root);
                return Err(err);
            }
        };

        if let Some(el) = self.config.el.filter(|el| self.doc.parent(*el).is_some()) {
            if let Err(source) = self.doc.replace_child(el, root) {
                self.doc.discard(root);
                return Err(ViewError::Mount { field: name, source });
            }
        }
        self.slots = Some(slots);

        let doc = &self.doc;
        doc.set_attribute(slots.input, "name", &self.config.name);
        if self.config.required {
            doc.set_attribute(slots.input, "required", "");
        }
        doc.set_attribute(slots.input, "placeholder", &self.config.placeholder);
        doc.set_text(slots.label, &self.config.label);
        if let Some(class) = &self.config.root_element_class {
            doc.add_class(root, class);
        }
        for kind in EventKind::ALL {
            doc.listen(slots.input, kind);
        }
        self.set_input_type(None);
        self.write_input(&self.value());

        let message = self.message();
        self.set_message(message);

        debug!("Rendered field '{}' as {}", self.config.name, root);
        Ok(self)
    }

    /// Replace the fragment with a freshly built one.
    ///
    /// The new fragment takes the old one's place when that is attached and
    /// reflects the current value and validity. The old nodes are discarded.
    /// On error the old fragment is kept as it was.
    pub fn rerender(&mut self) -> Result<&mut Self, ViewError> {
        let Some(old) = self.slots.take() else {
            return self.render();
        };
        let listening = self.doc.listeners(old.input);
        self.doc.unlisten_all(old.input);

        if let Err(err) = self.render().map(|_| ()) {
            for kind in listening {
                self.doc.listen(old.input, kind);
            }
            self.slots = Some(old);
            return Err(err);
        }

        if let (Some(root), Some(_)) = (self.el(), self.doc.parent(old.root)) {
            self.doc
                .replace_child(old.root, root)
                .map_err(|source| ViewError::Mount {
                    field: self.config.name.clone(),
                    source,
                })?;
        }
        self.doc.discard(old.root);

        debug!("Re-rendered field '{}'", self.config.name);
        Ok(self)
    }

    /// Store a message and update the fragment to match.
    ///
    /// The message container only shows once the field has been valid;
    /// before that the message is recorded but stays hidden.
    pub fn set_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        let (has_been_valid, edited) = self.state.update(|s| {
            s.set_verdict(message.clone());
            (s.has_been_valid, s.edited)
        });

        let Some(slots) = self.slots else {
            return;
        };
        let visual = visual::reduce(&message, has_been_valid, edited);

        self.doc.set_hidden(slots.message_container, !visual.message_visible);
        if let Some(text) = visual.message_text {
            self.doc.set_text(slots.message_text, text);
        }

        let (add, remove) = match visual.validity {
            ValidityClass::Invalid => (&self.config.invalid_class, &self.config.valid_class),
            ValidityClass::Valid => (&self.config.valid_class, &self.config.invalid_class),
            ValidityClass::Unchanged => return,
        };
        for target in self.doc.query_all(slots.root, &self.validity_targets) {
            self.doc.add_class(target, add);
            self.doc.remove_class(target, remove);
        }
    }

    /// Switch the input's `type`, e.g. to reveal a password. `None` reapplies
    /// the current type.
    pub fn set_input_type(&mut self, input_type: Option<&str>) {
        if let Some(input_type) = input_type {
            self.input_type = input_type.to_string();
        }
        if let Some(slots) = self.slots {
            self.doc.set_attribute(slots.input, "type", &self.input_type);
        }
    }

    /// Unregister observers and take the fragment out of its parent.
    ///
    /// Safe to call before rendering, on a detached fragment, and repeatedly.
    /// The view keeps the detached fragment, so a later [`render`](Self::render)
    /// does nothing; use [`rerender`](Self::rerender) to build a new one.
    pub fn remove(&mut self) {
        let Some(slots) = self.slots else {
            return;
        };
        self.doc.unlisten_all(slots.input);
        if self.doc.detach(slots.root) {
            debug!("Removed field '{}' from the document", self.config.name);
        }
    }

    pub(super) fn write_input(&self, value: &Value) {
        if let Some(slots) = self.slots {
            self.doc.set_value(slots.input, value.as_text());
        }
    }

    pub(super) fn clear_validity_classes(&self) {
        let Some(slots) = self.slots else {
            return;
        };
        let classes = format!("{} {}", self.config.valid_class, self.config.invalid_class);
        for target in self.doc.query_all(slots.root, &self.validity_targets) {
            self.doc.remove_class(target, &classes);
        }
    }

    /// Markup of the rendered fragment, for logging and snapshots.
    pub fn to_markup(&self) -> Option<String> {
        match self.slots {
            Some(slots) => Some(self.doc.to_markup(slots.root)),
            None => {
                warn!("Field '{}' has not been rendered", self.config.name);
                None
            }
        }
    }
}
