use std::sync::Arc;

use crate::engine::FieldState;
use crate::state::State;
use crate::Value;

/// Read-only view of a field for its siblings.
///
/// Tests of one field can capture the handle of another and read it when they
/// run. Reads see whatever the other field last computed: nothing re-runs
/// automatically when the other field changes.
#[derive(Debug, Clone)]
pub struct FieldHandle {
    name: Arc<str>,
    state: State<FieldState>,
}

impl FieldHandle {
    pub(crate) fn new(name: &str, state: State<FieldState>) -> Self {
        Self {
            name: name.into(),
            state,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
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

    /// Snapshot of the whole state.
    pub fn snapshot(&self) -> FieldState {
        self.state.get()
    }
}
