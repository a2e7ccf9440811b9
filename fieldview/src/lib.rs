//! A single form field as a self-contained widget.
//!
//! An [`InputView`] renders a label, an input and a message area into a
//! [`fielddom::Document`], keeps the field's value in sync with the input,
//! runs the configured checks and decides when feedback becomes visible.

pub mod config;
pub mod engine;
pub mod error;
pub mod handle;
pub mod state;
pub mod template;
pub mod validation;
pub mod value;
pub mod view;
pub mod visual;

pub use fielddom;

pub use config::{BeforeSubmit, FieldConfig, FieldOptions, FormParent};
pub use engine::FieldState;
pub use error::ViewError;
pub use handle::FieldHandle;
pub use state::State;
pub use template::{Slots, DEFAULT_TEMPLATE};
pub use validation::{FieldContext, Test};
pub use value::Value;
pub use view::InputView;

pub mod prelude {
    pub use crate::config::{FieldConfig, FieldOptions, FormParent};
    pub use crate::error::ViewError;
    pub use crate::handle::FieldHandle;
    pub use crate::validation::{rules, FieldContext, Test};
    pub use crate::value::Value;
    pub use crate::view::InputView;

    pub use fielddom::{Document, Event, EventKind, NodeId, TextInputState};
}
