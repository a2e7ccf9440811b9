//! Field configuration.

use std::fmt;
use std::sync::Arc;

use fielddom::NodeId;
use serde::Deserialize;

use crate::validation::Test;
use crate::{InputView, Value};

pub const DEFAULT_VALID_CLASS: &str = "input-valid";
pub const DEFAULT_INVALID_CLASS: &str = "input-invalid";
pub const DEFAULT_REQUIRED_MESSAGE: &str = "This field is required.";
pub const DEFAULT_VALIDITY_CLASS_SELECTOR: &str = "input";

/// Receives every input-change evaluation of the fields it contains.
pub trait FormParent: Send + Sync {
    fn update(&self, field: &InputView);
}

/// Replacement for the built-in before-submit behavior.
pub type BeforeSubmit = Arc<dyn Fn(&mut InputView) + Send + Sync>;

/// Per-field configuration. Fixed once the view is constructed.
///
/// # Example
///
/// ```ignore
/// let config = FieldConfig::new("age")
///     .label("Age")
///     .input_type("number")
///     .value(0)
///     .test(rules::number("Must be a number."));
/// ```
#[derive(Clone)]
pub struct FieldConfig {
    /// Field identifier, also written to the input's `name` attribute.
    pub name: String,
    /// Value the field starts with and returns to on reset.
    pub value: Value,
    pub placeholder: String,
    pub label: String,
    /// `type` attribute of the input element.
    pub input_type: String,
    pub required: bool,
    pub valid_class: String,
    pub invalid_class: String,
    pub required_message: String,
    /// Validator predicates, run in order.
    pub tests: Vec<Test>,
    /// Markup used instead of the default template.
    pub template: Option<String>,
    /// Class added to the fragment root on render.
    pub root_element_class: Option<String>,
    /// Elements of the fragment that receive the valid/invalid classes.
    pub validity_class_selector: String,
    pub parent: Option<Arc<dyn FormParent>>,
    pub before_submit: Option<BeforeSubmit>,
    /// Existing element the fragment replaces on render.
    pub el: Option<NodeId>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: Value::Null,
            placeholder: String::new(),
            label: String::new(),
            input_type: "text".to_string(),
            required: true,
            valid_class: DEFAULT_VALID_CLASS.to_string(),
            invalid_class: DEFAULT_INVALID_CLASS.to_string(),
            required_message: DEFAULT_REQUIRED_MESSAGE.to_string(),
            tests: Vec::new(),
            template: None,
            root_element_class: None,
            validity_class_selector: DEFAULT_VALIDITY_CLASS_SELECTOR.to_string(),
            parent: None,
            before_submit: None,
            el: None,
        }
    }
}

impl FieldConfig {
    /// Create a new config with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = input_type.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn valid_class(mut self, class: impl Into<String>) -> Self {
        self.valid_class = class.into();
        self
    }

    pub fn invalid_class(mut self, class: impl Into<String>) -> Self {
        self.invalid_class = class.into();
        self
    }

    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = message.into();
        self
    }

    /// Append a validator predicate.
    pub fn test(mut self, test: Test) -> Self {
        self.tests.push(test);
        self
    }

    pub fn tests(mut self, tests: impl IntoIterator<Item = Test>) -> Self {
        self.tests.extend(tests);
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn root_element_class(mut self, class: impl Into<String>) -> Self {
        self.root_element_class = Some(class.into());
        self
    }

    pub fn validity_class_selector(mut self, selector: impl Into<String>) -> Self {
        self.validity_class_selector = selector.into();
        self
    }

    pub fn parent(mut self, parent: Arc<dyn FormParent>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Take over `before_submit` entirely.
    pub fn before_submit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut InputView) + Send + Sync + 'static,
    {
        self.before_submit = Some(Arc::new(hook));
        self
    }

    /// Render in place of an existing element.
    pub fn el(mut self, el: NodeId) -> Self {
        self.el = Some(el);
        self
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("placeholder", &self.placeholder)
            .field("label", &self.label)
            .field("input_type", &self.input_type)
            .field("required", &self.required)
            .field("valid_class", &self.valid_class)
            .field("invalid_class", &self.invalid_class)
            .field("required_message", &self.required_message)
            .field("tests", &self.tests.len())
            .field("template", &self.template)
            .field("root_element_class", &self.root_element_class)
            .field("validity_class_selector", &self.validity_class_selector)
            .field("parent", &self.parent.is_some())
            .field("before_submit", &self.before_submit.is_some())
            .field("el", &self.el)
            .finish()
    }
}

/// The plain-data part of a [`FieldConfig`], as it appears in form
/// descriptions. Keys are camelCase; anything omitted keeps its default.
///
/// ```ignore
/// let options: FieldOptions = serde_json::from_str(r#"{
///     "name": "age", "type": "number", "value": 0, "required": true
/// }"#)?;
/// let config = FieldConfig::from(options).test(rules::number("Must be a number."));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldOptions {
    pub name: String,
    pub value: Value,
    pub placeholder: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub input_type: Option<String>,
    pub required: Option<bool>,
    pub valid_class: Option<String>,
    pub invalid_class: Option<String>,
    pub required_message: Option<String>,
    pub template: Option<String>,
    pub root_element_class: Option<String>,
    pub validity_class_selector: Option<String>,
}

impl From<FieldOptions> for FieldConfig {
    fn from(options: FieldOptions) -> Self {
        let defaults = FieldConfig::default();
        Self {
            name: options.name,
            value: options.value,
            placeholder: options.placeholder.unwrap_or(defaults.placeholder),
            label: options.label.unwrap_or(defaults.label),
            input_type: options.input_type.unwrap_or(defaults.input_type),
            required: options.required.unwrap_or(defaults.required),
            valid_class: options.valid_class.unwrap_or(defaults.valid_class),
            invalid_class: options.invalid_class.unwrap_or(defaults.invalid_class),
            required_message: options
                .required_message
                .unwrap_or(defaults.required_message),
            template: options.template,
            root_element_class: options.root_element_class,
            validity_class_selector: options
                .validity_class_selector
                .unwrap_or(defaults.validity_class_selector),
            ..defaults
        }
    }
}
