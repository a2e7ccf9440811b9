//! Error types for document, template and selector operations.

use crate::NodeId;

/// Errors from structural document operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The node id does not refer to a live node.
    #[error("Node {0} does not exist")]
    UnknownNode(NodeId),

    /// The node has no parent to be replaced in.
    #[error("Node {0} is not attached")]
    Detached(NodeId),

    /// The node is not a child of the given parent.
    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Inserting the node would make it its own ancestor.
    #[error("Node {0} cannot be moved below itself")]
    Cycle(NodeId),

    /// Text nodes and void elements cannot hold children.
    #[error("Node {0} cannot have children")]
    NotAContainer(NodeId),
}

/// Errors from parsing template markup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// The template contains no element.
    #[error("Template is empty")]
    Empty,

    /// The template has more than one top-level element.
    #[error("Template must have a single root element, found {0}")]
    MultipleRoots(usize),

    /// An element was opened and never closed.
    #[error("Tag <{0}> is never closed")]
    Unclosed(String),

    /// A closing tag does not match the innermost open element.
    #[error("Unexpected </{found}> at byte {pos}, expected </{expected}>")]
    MismatchedClose {
        expected: String,
        found: String,
        pos: usize,
    },

    /// The markup could not be read at the given byte offset.
    #[error("Malformed markup at byte {pos}: {reason}")]
    Malformed { pos: usize, reason: &'static str },
}

impl TemplateError {
    pub(crate) fn malformed(pos: usize, reason: &'static str) -> Self {
        Self::Malformed { pos, reason }
    }
}

/// Errors from parsing a selector string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// The selector (or one of its comma-separated parts) is empty.
    #[error("Empty selector")]
    Empty,

    /// A character that cannot appear at this point.
    #[error("Unexpected {found:?} at position {pos} in selector {selector:?}")]
    Unexpected {
        selector: String,
        found: char,
        pos: usize,
    },

    /// An attribute selector is missing its closing bracket.
    #[error("Unterminated attribute selector in {0:?}")]
    UnterminatedAttribute(String),
}
