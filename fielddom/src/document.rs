//! Id-addressed element arena shared between a host and its widgets.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::trace;

use crate::element::{is_void, Content, Element, TEXT_TAG};
use crate::error::{DomError, SelectorError};
use crate::event::EventKind;
use crate::selector::Selector;

/// Handle to a node living in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeContent {
    Text(String),
    Children(Vec<NodeId>),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) tag: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) classes: Vec<String>,
    pub(crate) content: NodeContent,
    pub(crate) parent: Option<NodeId>,
    pub(crate) hidden: bool,
    pub(crate) value: Option<String>,
    pub(crate) listeners: Vec<EventKind>,
}

impl Node {
    pub(crate) fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn child_ids(&self) -> &[NodeId] {
        match &self.content {
            NodeContent::Children(children) => children,
            NodeContent::Text(_) => &[],
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Tree {
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
}

impl Tree {
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(&id).ok_or(DomError::UnknownNode(id))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    fn insert(&mut self, element: Element, parent: Option<NodeId>) -> NodeId {
        let Element {
            tag,
            attributes,
            classes,
            content,
            hidden,
            value,
        } = element;

        let id = self.alloc(Node {
            tag,
            attributes,
            classes,
            content: NodeContent::Children(Vec::new()),
            parent,
            hidden,
            value,
            listeners: Vec::new(),
        });

        let content = match content {
            Content::None => NodeContent::Children(Vec::new()),
            Content::Text(text) => NodeContent::Text(text),
            Content::Children(children) => NodeContent::Children(
                children
                    .into_iter()
                    .map(|child| self.insert(child, Some(id)))
                    .collect(),
            ),
        };
        if let Some(node) = self.nodes.get_mut(&id) {
            node.content = content;
        }

        id
    }

    /// Pre-order ids of the subtree rooted at `root`, root first.
    pub(crate) fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(&id) {
                out.push(id);
                stack.extend(node.child_ids().iter().rev().copied());
            }
        }
        out
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn unlink(&mut self, child: NodeId) -> bool {
        let Some(parent) = self.nodes.get(&child).and_then(|n| n.parent) else {
            return false;
        };
        if let Some(NodeContent::Children(children)) =
            self.nodes.get_mut(&parent).map(|n| &mut n.content)
        {
            children.retain(|c| *c != child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
        }
        true
    }

    fn ensure_container(&mut self, id: NodeId) -> Result<(), DomError> {
        let node = self.nodes.get(&id).ok_or(DomError::UnknownNode(id))?;
        if node.is_text() || is_void(&node.tag) {
            return Err(DomError::NotAContainer(id));
        }
        if let NodeContent::Text(text) = &node.content {
            // Mixed content: the existing text becomes a text child.
            let text = text.clone();
            let text_node = self.alloc(Node {
                tag: TEXT_TAG.to_string(),
                attributes: Vec::new(),
                classes: Vec::new(),
                content: NodeContent::Text(text),
                parent: Some(id),
                hidden: false,
                value: None,
                listeners: Vec::new(),
            });
            self.get_mut(id)?.content = NodeContent::Children(vec![text_node]);
        }
        Ok(())
    }

    fn remove_subtree(&mut self, root: NodeId) {
        for id in self.subtree(root) {
            self.nodes.remove(&id);
        }
    }

    fn text(&self, id: NodeId) -> String {
        match self.nodes.get(&id).map(|n| &n.content) {
            Some(NodeContent::Text(text)) => text.clone(),
            Some(NodeContent::Children(children)) => {
                children.iter().map(|c| self.text(*c)).collect()
            }
            None => String::new(),
        }
    }

    fn write_markup(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if node.is_text() {
            if let NodeContent::Text(text) = &node.content {
                out.push_str(&escape(text));
            }
            return;
        }

        out.push('<');
        out.push_str(&node.tag);
        for (name, value) in &node.attributes {
            if name == "value" && node.value.is_some() {
                continue;
            }
            push_attr(out, name, value);
        }
        if !node.classes.is_empty() {
            push_attr(out, "class", &node.classes.join(" "));
        }
        if let Some(value) = &node.value {
            push_attr(out, "value", value);
        }
        if node.hidden {
            out.push_str(" hidden");
        }
        out.push('>');

        if is_void(&node.tag) {
            return;
        }
        match &node.content {
            NodeContent::Text(text) => out.push_str(&escape(text)),
            NodeContent::Children(children) => {
                for child in children {
                    self.write_markup(*child, out);
                }
            }
        }
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Shared structural document.
///
/// `Document` wraps an arena of nodes in `Arc<RwLock<_>>`, so it is cheap to
/// clone and every clone sees the same tree. Hosts build their page in it and
/// widgets render their fragments into it.
///
/// Mutators on a node that no longer exists are ignored; getters return
/// `None`. Structural operations that can violate tree shape return
/// [`DomError`].
///
/// # Example
///
/// ```ignore
/// let doc = Document::new();
/// let form = doc.insert(Element::new("form"));
/// let slot = doc.insert(Element::new("div"));
/// doc.append_child(form, slot)?;
/// assert_eq!(doc.parent(slot), Some(form));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    inner: Arc<RwLock<Tree>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Tree> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tree> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn update<F>(&self, id: NodeId, f: F)
    where
        F: FnOnce(&mut Node),
    {
        match self.write().get_mut(id) {
            Ok(node) => f(node),
            Err(_) => trace!("ignoring update of missing {id}"),
        }
    }

    fn inspect<T, F>(&self, id: NodeId, f: F) -> Option<T>
    where
        F: FnOnce(&Node) -> T,
    {
        self.read().get(id).map(f)
    }

    // Structure

    /// Insert a detached element tree and return the id of its root.
    pub fn insert(&self, element: Element) -> NodeId {
        self.write().insert(element, None)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.read().get(id).is_some()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.inspect(id, |n| n.parent).flatten()
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.inspect(id, |n| n.child_ids().to_vec())
            .unwrap_or_default()
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let mut tree = self.write();
        tree.get_mut(child)?;
        tree.ensure_container(parent)?;
        if tree.is_ancestor_or_self(child, parent) {
            return Err(DomError::Cycle(child));
        }

        tree.unlink(child);
        if let NodeContent::Children(children) = &mut tree.get_mut(parent)?.content {
            children.push(child);
        }
        tree.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Put `new` where `old` is; `old` ends up detached.
    pub fn replace_child(&self, old: NodeId, new: NodeId) -> Result<(), DomError> {
        let mut tree = self.write();
        tree.get_mut(new)?;
        let parent = tree.get_mut(old)?.parent.ok_or(DomError::Detached(old))?;
        if old == new {
            return Ok(());
        }
        if tree.is_ancestor_or_self(new, parent) {
            return Err(DomError::Cycle(new));
        }

        tree.unlink(new);
        let NodeContent::Children(children) = &mut tree.get_mut(parent)?.content else {
            return Err(DomError::NotAChild { parent, child: old });
        };
        let slot = children
            .iter()
            .position(|c| *c == old)
            .ok_or(DomError::NotAChild { parent, child: old })?;
        children[slot] = new;
        tree.get_mut(new)?.parent = Some(parent);
        tree.get_mut(old)?.parent = None;
        Ok(())
    }

    /// Unlink a node from its parent. Returns false when it had none.
    pub fn detach(&self, id: NodeId) -> bool {
        self.write().unlink(id)
    }

    /// Detach a node and drop it and all its descendants from the arena.
    pub fn discard(&self, id: NodeId) {
        let mut tree = self.write();
        tree.unlink(id);
        tree.remove_subtree(id);
    }

    // Markup

    pub fn tag(&self, id: NodeId) -> Option<String> {
        self.inspect(id, |n| n.tag.clone())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.inspect(id, |n| n.attribute(name).map(str::to_string))
            .flatten()
    }

    pub fn set_attribute(&self, id: NodeId, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        self.update(id, |node| {
            match node.attributes.iter_mut().find(|(n, _)| *n == name) {
                Some((_, existing)) => *existing = value,
                None => node.attributes.push((name, value)),
            }
        });
    }

    pub fn remove_attribute(&self, id: NodeId, name: &str) {
        self.update(id, |node| node.attributes.retain(|(n, _)| n != name));
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.inspect(id, |n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn classes(&self, id: NodeId) -> Vec<String> {
        self.inspect(id, |n| n.classes.clone()).unwrap_or_default()
    }

    /// Add each whitespace-separated class in `class`.
    pub fn add_class(&self, id: NodeId, class: &str) {
        self.update(id, |node| {
            for class in class.split_whitespace() {
                if !node.classes.iter().any(|c| c == class) {
                    node.classes.push(class.to_string());
                }
            }
        });
    }

    /// Remove each whitespace-separated class in `class`.
    pub fn remove_class(&self, id: NodeId, class: &str) {
        self.update(id, |node| {
            for class in class.split_whitespace() {
                node.classes.retain(|c| c != class);
            }
        });
    }

    // Content

    /// Concatenated text of the node and its descendants.
    pub fn text(&self, id: NodeId) -> Option<String> {
        let tree = self.read();
        tree.get(id)?;
        Some(tree.text(id))
    }

    /// Replace all children of the node with plain text.
    pub fn set_text(&self, id: NodeId, text: impl Into<String>) {
        let text = text.into();
        let mut tree = self.write();
        let old_children = match tree.get(id) {
            Some(node) => node.child_ids().to_vec(),
            None => return,
        };
        for child in old_children {
            tree.remove_subtree(child);
        }
        if let Ok(node) = tree.get_mut(id) {
            node.content = NodeContent::Text(text);
        }
    }

    // State

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.inspect(id, |n| n.hidden).unwrap_or(false)
    }

    pub fn set_hidden(&self, id: NodeId, hidden: bool) {
        self.update(id, |node| node.hidden = hidden);
    }

    /// Live value of an input element.
    pub fn value(&self, id: NodeId) -> Option<String> {
        self.inspect(id, |n| n.value.clone()).flatten()
    }

    pub fn set_value(&self, id: NodeId, value: impl Into<String>) {
        let value = value.into();
        self.update(id, |node| node.value = Some(value));
    }

    // Observers

    /// Register interest in `kind` events targeted at the node.
    pub fn listen(&self, id: NodeId, kind: EventKind) {
        self.update(id, |node| {
            if !node.listeners.contains(&kind) {
                node.listeners.push(kind);
            }
        });
    }

    pub fn unlisten(&self, id: NodeId, kind: EventKind) {
        self.update(id, |node| node.listeners.retain(|k| *k != kind));
    }

    pub fn unlisten_all(&self, id: NodeId) {
        self.update(id, |node| node.listeners.clear());
    }

    pub fn is_listening(&self, id: NodeId, kind: EventKind) -> bool {
        self.inspect(id, |n| n.listeners.contains(&kind))
            .unwrap_or(false)
    }

    pub fn listeners(&self, id: NodeId) -> Vec<EventKind> {
        self.inspect(id, |n| n.listeners.clone()).unwrap_or_default()
    }

    // Queries

    /// First element matching `selector` in `scope` (scope included), in
    /// document order.
    pub fn query(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        let tree = self.read();
        tree.subtree(scope)
            .into_iter()
            .find(|id| selector.matches(&tree, *id))
    }

    /// Every element matching `selector` in `scope` (scope included), in
    /// document order.
    pub fn query_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        let tree = self.read();
        tree.subtree(scope)
            .into_iter()
            .filter(|id| selector.matches(&tree, *id))
            .collect()
    }

    /// Parse `selector` and run [`Document::query_all`].
    pub fn select(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.query_all(scope, &selector))
    }

    /// Serialize the node and its descendants back to markup.
    pub fn to_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.read().write_markup(id, &mut out);
        out
    }
}
