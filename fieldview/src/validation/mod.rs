//! Validator predicates.
//!
//! A field runs its tests in declaration order and reports the message of the
//! first one that fails. A test returns `None` (or an empty message) to pass.
//!
//! # Example
//!
//! ```ignore
//! use fieldview::validation::{rules, Test};
//!
//! let config = FieldConfig::new("username")
//!     .test(rules::min_length(3, "Must be 3+ characters."))
//!     .test(Test::new(|value, _cx| {
//!         (value.as_text() == "admin").then(|| "That name is taken.".to_string())
//!     }));
//! ```

pub mod rules;

use std::fmt;
use std::sync::Arc;

use crate::Value;

/// What a test can see of the field it validates, besides the value.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub input_type: &'a str,
    pub required: bool,
}

type TestFn = dyn Fn(&Value, &FieldContext<'_>) -> Option<String> + Send + Sync;

/// A single validator predicate.
#[derive(Clone)]
pub struct Test(Arc<TestFn>);

impl Test {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &FieldContext<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the test. Empty messages count as a pass.
    pub fn check(&self, value: &Value, cx: &FieldContext<'_>) -> Option<String> {
        (self.0)(value, cx).filter(|message| !message.is_empty())
    }
}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Test(..)")
    }
}

/// Message of the first failing test, in order.
pub fn first_failure(tests: &[Test], value: &Value, cx: &FieldContext<'_>) -> Option<String> {
    tests.iter().find_map(|test| test.check(value, cx))
}
