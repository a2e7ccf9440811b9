mod content;
mod node;

pub use content::Content;
pub use node::{is_void, Element, TEXT_TAG, VOID_TAGS};
