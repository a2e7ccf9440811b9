//! The field fragment template and its addressable slots.

use fielddom::{Document, NodeId, Selector};

use crate::ViewError;

/// Default markup. Any replacement needs an `input` and the same `role`
/// markers (`data-hook` works too).
pub const DEFAULT_TEMPLATE: &str = concat!(
    "<label>",
    "<span role=\"label\"></span>",
    "<input>",
    "<div role=\"message-container\" class=\"message message-below message-error\">",
    "<p role=\"message-text\"></p>",
    "</div>",
    "</label>",
);

pub const LABEL_ROLE: &str = "label";
pub const MESSAGE_CONTAINER_ROLE: &str = "message-container";
pub const MESSAGE_TEXT_ROLE: &str = "message-text";

/// The nodes of a rendered fragment the view writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slots {
    pub root: NodeId,
    pub input: NodeId,
    pub label: NodeId,
    pub message_container: NodeId,
    pub message_text: NodeId,
}

impl Slots {
    /// Find every slot below (or at) `root`.
    pub fn locate(doc: &Document, root: NodeId, field: &str) -> Result<Self, ViewError> {
        let find = |role: &'static str, selector: String| {
            // Selectors built from fixed role names always parse
            Selector::parse(&selector)
                .ok()
                .and_then(|selector| doc.query(root, &selector))
                .ok_or_else(|| ViewError::MissingSlot {
                    field: field.to_string(),
                    role,
                })
        };
        let by_role = |role: &'static str| {
            find(role, format!("[role={role}], [data-hook={role}]"))
        };

        Ok(Self {
            root,
            input: find("input", "input".to_string())?,
            label: by_role(LABEL_ROLE)?,
            message_container: by_role(MESSAGE_CONTAINER_ROLE)?,
            message_text: by_role(MESSAGE_TEXT_ROLE)?,
        })
    }
}
