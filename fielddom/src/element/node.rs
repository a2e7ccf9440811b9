use super::Content;

/// Tag used for bare text nodes.
pub const TEXT_TAG: &str = "#text";

/// Tags that never have children or a closing tag.
pub const VOID_TAGS: &[&str] = &["input", "br", "img", "hr", "meta", "link"];

pub fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Owned element tree.
///
/// This is the detached form of markup: what templates parse into and what
/// hosts build by hand before inserting into a [`Document`](crate::Document).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    // Identity
    pub tag: String,

    // Markup
    pub attributes: Vec<(String, String)>,
    pub classes: Vec<String>,

    // Content
    pub content: Content,

    // State
    pub hidden: bool,
    /// Live value for `input` elements.
    pub value: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into().to_ascii_lowercase();
        let value = (tag == "input").then(String::new);
        Self {
            tag,
            value,
            ..Default::default()
        }
    }

    /// Create a bare text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: TEXT_TAG.to_string(),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    /// Create an `input` element with the given value.
    pub fn input(value: impl Into<String>) -> Self {
        Self::new("input").value(value)
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    // Identity
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    // Markup
    /// Set an attribute. `class` is split into the class list and `value` on
    /// an input also sets its live value.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();

        if name == "class" {
            for class in value.split_whitespace() {
                self = self.class(class);
            }
            return self;
        }
        if name == "value" && self.tag == "input" {
            self.value = Some(value.clone());
        }

        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Set the `role` attribute used to address template slots.
    pub fn role(self, role: impl Into<String>) -> Self {
        self.attr("role", role)
    }

    // State
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    // Content
    /// Replace all content with text.
    pub fn text_content(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::None => self.content = Content::Children(vec![child]),
            Content::Text(text) => {
                let existing = Element::text(std::mem::take(text));
                self.content = Content::Children(vec![existing, child]);
            }
        }
        self
    }

    pub fn children(self, new_children: impl IntoIterator<Item = Element>) -> Self {
        new_children.into_iter().fold(self, |el, child| el.child(child))
    }
}
