//! Visual state derived from a field's verdict.
//!
//! `reduce` is the whole display policy: errors stay hidden until the field
//! has been valid once (or a submit forced it), and the valid class is only
//! handed out to fields the user has actually edited.

/// What to do with the valid/invalid classes on the targeted elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityClass {
    /// Add the invalid class, remove the valid class.
    Invalid,
    /// Add the valid class, remove the invalid class.
    Valid,
    /// Leave both classes as they are.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualState {
    pub message_visible: bool,
    /// New text for the message slot, when it should change.
    pub message_text: Option<String>,
    pub validity: ValidityClass,
}

pub fn reduce(message: &str, has_been_valid: bool, edited: bool) -> VisualState {
    if !message.is_empty() && has_been_valid {
        return VisualState {
            message_visible: true,
            message_text: Some(message.to_string()),
            validity: ValidityClass::Invalid,
        };
    }

    let validity = if has_been_valid && edited {
        ValidityClass::Valid
    } else {
        ValidityClass::Unchanged
    };
    VisualState {
        message_visible: false,
        message_text: None,
        validity,
    }
}
