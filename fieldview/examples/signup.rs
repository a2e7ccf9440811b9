//! Signup Example
//!
//! Builds a small signup form out of four fields and drives it with a
//! scripted sequence of key presses, printing every field update and the
//! final markup:
//! - Errors stay hidden while a field is first being typed
//! - Tab commits a field and surfaces its error
//! - Enter submits and forces every field to show its state
//!
//! Logs go to signup.log.

use std::fs::File;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fieldview::prelude::*;
use fieldview::fielddom::Element;
use simplelog::{Config, LevelFilter, WriteLogger};

// ============================================================================
// Form
// ============================================================================

struct SignupForm;

impl FormParent for SignupForm {
    fn update(&self, field: &InputView) {
        println!(
            "  [{}] value={:?} valid={}",
            field.name(),
            field.value().to_string(),
            field.is_valid()
        );
    }
}

fn build(doc: &Document, form: NodeId) -> Result<Vec<InputView>, ViewError> {
    let parent: Arc<dyn FormParent> = Arc::new(SignupForm);

    let slot = |name: &str| -> NodeId {
        let el = doc.insert(Element::new("div").id(format!("{name}-slot")));
        let _ = doc.append_child(form, el);
        el
    };
    let username_el = slot("username");
    let email_el = slot("email");
    let password_el = slot("password");
    let confirm_el = slot("confirm");

    let username = InputView::new(
        doc,
        FieldConfig::new("username")
            .label("Username")
            .test(rules::min_length(3, "Must be 3+ characters."))
            .test(rules::max_length(16, "Must be 16 characters or fewer."))
            .parent(parent.clone())
            .el(username_el),
    )?;
    let email = InputView::new(
        doc,
        FieldConfig::new("email")
            .label("Email")
            .input_type("email")
            .placeholder("you@example.com")
            .test(rules::email("Must be an email address."))
            .parent(parent.clone())
            .el(email_el),
    )?;
    let password = InputView::new(
        doc,
        FieldConfig::new("password")
            .label("Password")
            .input_type("password")
            .test(rules::min_length(8, "Must be 8+ characters."))
            .parent(parent.clone())
            .el(password_el),
    )?;
    let confirm = InputView::new(
        doc,
        FieldConfig::new("confirm")
            .label("Confirm password")
            .input_type("password")
            .test(rules::matches_field(password.handle(), "Passwords must match."))
            .parent(parent)
            .el(confirm_el),
    )?;

    let mut fields = vec![username, email, password, confirm];
    for field in &mut fields {
        field.render()?;
    }
    Ok(fields)
}

// ============================================================================
// Script
// ============================================================================

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn keys(text: &str) -> Vec<KeyEvent> {
    text.chars().map(|c| key(KeyCode::Char(c))).collect()
}

fn main() {
    // Initialize file logging
    if let Ok(log_file) = File::create("signup.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, Config::default(), log_file);
    }

    let doc = Document::new();
    let form = doc.insert(Element::new("form").class("signup"));
    let mut fields = match build(&doc, form) {
        Ok(fields) => fields,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let script: Vec<(usize, Vec<KeyEvent>)> = vec![
        (0, keys("jo")),
        (0, vec![key(KeyCode::Tab)]),
        (0, keys("e")),
        (1, keys("joe@example")),
        (1, vec![key(KeyCode::Tab)]),
        (2, keys("correct horse")),
        (3, keys("correct h0rse")),
        (3, vec![key(KeyCode::Tab)]),
        (3, vec![key(KeyCode::Backspace); 4]),
        (3, keys("orse")),
        (3, vec![key(KeyCode::Enter)]),
    ];

    let mut editor = TextInputState::new();
    for (index, presses) in script {
        let Some(target) = fields[index].input() else {
            continue;
        };
        println!("{}: {} key(s)", fields[index].name(), presses.len());
        for press in presses {
            let Some(event) = editor.handle_key(&doc, target, press) else {
                continue;
            };
            if let Event::Submit { .. } = event {
                // Submitting the form prepares every field
                for field in &mut fields {
                    field.before_submit();
                }
            } else {
                fields[index].dispatch(&event);
            }
        }
    }

    println!();
    println!("{}", doc.to_markup(form));
    let valid = fields.iter().all(InputView::is_valid);
    println!("form valid: {valid}");
}
