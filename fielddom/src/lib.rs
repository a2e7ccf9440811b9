pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod selector;
pub mod template;
pub mod text_input;

pub use document::{Document, NodeId};
pub use element::{Content, Element};
pub use error::{DomError, SelectorError, TemplateError};
pub use event::{Event, EventKind, Key, KeyPress, Modifiers};
pub use selector::Selector;
pub use text_input::{TextInputData, TextInputState};
