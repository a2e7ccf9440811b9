//! The input view: one field bound to one fragment of a [`Document`].

mod events;
mod render;
mod state;

use fielddom::{Document, NodeId, Selector};
use log::debug;

use crate::config::FieldConfig;
use crate::engine::{self, FieldState, Rules};
use crate::handle::FieldHandle;
use crate::state::State;
use crate::template::Slots;
use crate::validation::FieldContext;
use crate::{Value, ViewError};

/// A single-field input widget.
///
/// The view owns its value and validity state and, once rendered, a fragment
/// of the shared [`Document`]: a label, an input and a message area. Hosts feed
/// it [`fielddom::Event`]s through [`InputView::dispatch`]; the view
/// re-evaluates and updates the fragment.
///
/// Errors are held back until the field has been valid once, the user commits
/// a value they typed, or the form is submitted, so an empty required field
/// does not complain the moment a page loads.
///
/// # Example
///
/// ```ignore
/// let doc = Document::new();
/// let mut title = InputView::new(
///     &doc,
///     FieldConfig::new("title")
///         .label("Title")
///         .test(rules::min_length(5, "Must be 5+ characters.")),
/// )?;
/// title.render()?;
///
/// doc.set_value(title.input().unwrap(), "Once");
/// title.dispatch(&Event::Input { target: title.input().unwrap() });
/// assert!(!title.is_valid());
/// ```
pub struct InputView {
    config: FieldConfig,
    doc: Document,
    state: State<FieldState>,
    validity_targets: Selector,
    input_type: String,
    slots: Option<Slots>,
}

impl InputView {
    /// Create a view. Fails when the name is empty or the validity class
    /// selector does not parse. Nothing is rendered yet.
    pub fn new(doc: &Document, config: FieldConfig) -> Result<Self, ViewError> {
        if config.name.trim().is_empty() {
            return Err(ViewError::MissingName);
        }
        let validity_targets =
            Selector::parse(&config.validity_class_selector).map_err(|source| {
                ViewError::Selector {
                    field: config.name.clone(),
                    source,
                }
            })?;

        let view = Self {
            input_type: config.input_type.clone(),
            state: State::new(FieldState::new(config.value.clone())),
            config,
            doc: doc.clone(),
            validity_targets,
            slots: None,
        };
        let message = view.evaluate();
        view.state.update(|s| s.set_verdict(message));

        debug!("Created field '{}'", view.config.name);
        Ok(view)
    }

    // Accessors

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn value(&self) -> Value {
        self.state.read(|s| s.value.clone())
    }

    pub fn is_valid(&self) -> bool {
        self.state.read(|s| s.valid)
    }

    pub fn message(&self) -> String {
        self.state.read(|s| s.message.clone())
    }

    pub fn is_edited(&self) -> bool {
        self.state.read(|s| s.edited)
    }

    pub fn has_been_valid(&self) -> bool {
        self.state.read(|s| s.has_been_valid)
    }

    /// Snapshot of the full state.
    pub fn field_state(&self) -> FieldState {
        self.state.get()
    }

    /// Current `type` of the input.
    pub fn input_type(&self) -> &str {
        &self.input_type
    }

    /// Read-only handle other fields' tests can hold on to.
    pub fn handle(&self) -> FieldHandle {
        FieldHandle::new(&self.config.name, self.state.clone())
    }

    pub fn is_rendered(&self) -> bool {
        self.slots.is_some()
    }

    /// Root of the rendered fragment.
    pub fn el(&self) -> Option<NodeId> {
        self.slots.map(|s| s.root)
    }

    /// The input element of the rendered fragment.
    pub fn input(&self) -> Option<NodeId> {
        self.slots.map(|s| s.input)
    }

    pub fn slots(&self) -> Option<&Slots> {
        self.slots.as_ref()
    }

    // Internals

    fn context(&self) -> FieldContext<'_> {
        FieldContext {
            name: &self.config.name,
            label: &self.config.label,
            input_type: &self.input_type,
            required: self.config.required,
        }
    }

    /// Run the checks against the current value without touching state.
    /// The state lock is released before tests run so they may read any
    /// field, this one included.
    fn evaluate(&self) -> String {
        let value = self.value();
        let rules = Rules {
            required: self.config.required,
            required_message: &self.config.required_message,
            tests: &self.config.tests,
        };
        engine::evaluate(&rules, &value, &self.context())
    }
}

impl std::fmt::Debug for InputView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputView")
            .field("name", &self.config.name)
            .field("state", &self.state.get())
            .field("slots", &self.slots)
            .finish()
    }
}

impl Drop for InputView {
    fn drop(&mut self) {
        self.remove();
        if let Some(slots) = self.slots.take() {
            self.doc.discard(slots.root);
        }
    }
}
