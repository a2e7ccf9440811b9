//! Ready-made tests.

use super::Test;
use crate::FieldHandle;

/// Require at least `min` characters.
pub fn min_length(min: usize, msg: impl Into<String>) -> Test {
    let msg = msg.into();
    Test::new(move |v, _| (v.as_text().chars().count() < min).then(|| msg.clone()))
}

/// Allow at most `max` characters.
pub fn max_length(max: usize, msg: impl Into<String>) -> Test {
    let msg = msg.into();
    Test::new(move |v, _| (v.as_text().chars().count() > max).then(|| msg.clone()))
}

/// Require the value to match a regex pattern.
pub fn pattern(pattern: &str, msg: impl Into<String>) -> Result<Test, regex::Error> {
    let msg = msg.into();
    let re = regex::Regex::new(pattern)?;
    Ok(Test::new(move |v, _| {
        (!re.is_match(&v.as_text())).then(|| msg.clone())
    }))
}

/// Require a valid email address. Empty passes; use `required` for presence.
pub fn email(msg: impl Into<String>) -> Test {
    let msg = msg.into();
    Test::new(move |v, _| {
        let invalid = !v.is_empty() && !email_address::EmailAddress::is_valid(&v.as_text());
        invalid.then(|| msg.clone())
    })
}

/// Require a number. Empty passes; use `required` for presence.
pub fn number(msg: impl Into<String>) -> Test {
    let msg = msg.into();
    Test::new(move |v, _| (!v.is_empty() && v.as_number().is_none()).then(|| msg.clone()))
}

/// Require a number within `min..=max`. Non-numbers fail.
pub fn range(min: f64, max: f64, msg: impl Into<String>) -> Test {
    let msg = msg.into();
    Test::new(move |v, _| {
        if v.is_empty() {
            return None;
        }
        let in_range = v.as_number().is_some_and(|n| (min..=max).contains(&n));
        (!in_range).then(|| msg.clone())
    })
}

/// Require the same value as another field, read when this test runs.
pub fn matches_field(other: FieldHandle, msg: impl Into<String>) -> Test {
    let msg = msg.into();
    Test::new(move |v, _| (!v.same_as(&other.value())).then(|| msg.clone()))
}

/// Require another field to be valid when this test runs.
pub fn requires_valid(other: FieldHandle, msg: impl Into<String>) -> Test {
    let msg = msg.into();
    Test::new(move |_, _| (!other.is_valid()).then(|| msg.clone()))
}
