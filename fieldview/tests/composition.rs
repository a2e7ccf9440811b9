use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fieldview::fielddom::{Document, Element, Event, EventKind, TextInputState};
use fieldview::validation::rules;
use fieldview::{FieldConfig, FieldOptions, FormParent, InputView, Test, Value, ViewError};

#[derive(Default)]
struct Recorder {
    updates: Mutex<Vec<(String, String, bool)>>,
}

impl FormParent for Recorder {
    fn update(&self, field: &InputView) {
        self.updates.lock().unwrap().push((
            field.name().to_string(),
            field.value().to_string(),
            field.is_valid(),
        ));
    }
}

fn rendered(doc: &Document, config: FieldConfig) -> InputView {
    let mut view = InputView::new(doc, config).unwrap();
    view.render().unwrap();
    view
}

fn type_value(view: &mut InputView, text: &str) {
    let input = view.input().unwrap();
    view.document().set_value(input, text);
    view.dispatch(&Event::Input { target: input });
}

// ============================================================================
// Parent form and hooks
// ============================================================================

#[test]
fn test_parent_is_told_about_every_input() {
    let doc = Document::new();
    let recorder = Arc::new(Recorder::default());
    let mut view = rendered(
        &doc,
        FieldConfig::new("title")
            .test(rules::min_length(3, "Too short."))
            .parent(recorder.clone()),
    );

    type_value(&mut view, "ab");
    type_value(&mut view, "abc");

    let updates = recorder.updates.lock().unwrap();
    assert_eq!(
        *updates,
        vec![
            ("title".to_string(), "ab".to_string(), false),
            ("title".to_string(), "abc".to_string(), true),
        ]
    );
}

#[test]
fn test_parent_not_told_about_programmatic_changes() {
    let doc = Document::new();
    let recorder = Arc::new(Recorder::default());
    let mut view = rendered(&doc, FieldConfig::new("title").parent(recorder.clone()));

    view.set_value("abc");
    view.before_submit();
    view.reset();

    assert!(recorder.updates.lock().unwrap().is_empty());
}

#[test]
fn test_custom_before_submit_replaces_default() {
    let doc = Document::new();
    let calls = Arc::new(Mutex::new(0));
    let seen = calls.clone();
    let mut view = rendered(
        &doc,
        FieldConfig::new("title").before_submit(move |_view| {
            *seen.lock().unwrap() += 1;
        }),
    );

    view.before_submit();

    assert_eq!(*calls.lock().unwrap(), 1);
    assert!(!view.has_been_valid());
    assert!(doc.is_hidden(view.slots().unwrap().message_container));
}

#[test]
fn test_custom_before_submit_can_force_validation() {
    let doc = Document::new();
    let mut view = rendered(
        &doc,
        FieldConfig::new("title").before_submit(|view| {
            view.set_value("filled in");
            view.force_validation();
        }),
    );

    view.before_submit();

    assert!(view.is_valid());
    assert!(doc.has_class(view.input().unwrap(), "input-valid"));
}

// ============================================================================
// Cross-field checks
// ============================================================================

#[test]
fn test_confirmation_reads_other_field() {
    let doc = Document::new();
    let mut password = rendered(&doc, FieldConfig::new("password").input_type("password"));
    let mut confirm = rendered(
        &doc,
        FieldConfig::new("confirm")
            .input_type("password")
            .test(rules::matches_field(password.handle(), "Passwords differ.")),
    );

    type_value(&mut password, "hunter22");
    type_value(&mut confirm, "hunter22");
    assert!(confirm.is_valid());

    // Nothing re-runs on its own
    type_value(&mut password, "hunter23");
    assert!(confirm.is_valid());

    confirm.run_tests();
    assert!(!confirm.is_valid());
    assert_eq!(confirm.message(), "Passwords differ.");
}

#[test]
fn test_requires_valid_other_field() {
    let doc = Document::new();
    let mut start = rendered(
        &doc,
        FieldConfig::new("start").test(rules::number("Must be a number.")),
    );
    let handle = start.handle();
    let mut end = rendered(
        &doc,
        FieldConfig::new("end").test(rules::requires_valid(handle.clone(), "Fix the start first.")),
    );

    type_value(&mut start, "soon");
    type_value(&mut end, "10");
    assert_eq!(end.message(), "Fix the start first.");

    type_value(&mut start, "1");
    assert!(handle.is_valid());
    assert_eq!(handle.value(), Value::from("1"));
    end.run_tests();
    assert!(end.is_valid());
}

#[test]
fn test_test_sees_field_context() {
    let doc = Document::new();
    let mut view = rendered(
        &doc,
        FieldConfig::new("age")
            .label("Age")
            .input_type("number")
            .test(Test::new(|value, cx| {
                (cx.input_type == "number" && value.as_number().is_none())
                    .then(|| format!("{} must be a number.", cx.label))
            })),
    );

    type_value(&mut view, "ten");

    assert_eq!(view.message(), "Age must be a number.");
}

#[test]
fn test_tests_run_in_order() {
    let doc = Document::new();
    let mut view = rendered(
        &doc,
        FieldConfig::new("code").tests([
            rules::min_length(4, "First."),
            rules::pattern("^[0-9]+$", "Second.").unwrap(),
        ]),
    );

    type_value(&mut view, "ab");
    assert_eq!(view.message(), "First.");

    type_value(&mut view, "abcd");
    assert_eq!(view.message(), "Second.");

    type_value(&mut view, "1234");
    assert!(view.is_valid());
}

// ============================================================================
// Templates and mounting
// ============================================================================

#[test]
fn test_custom_template_with_data_hooks() {
    let doc = Document::new();
    let template = r#"
        <div class="field">
            <span data-hook="label"></span>
            <input>
            <div data-hook="message-container"><p data-hook="message-text"></p></div>
        </div>
    "#;
    let mut view = rendered(
        &doc,
        FieldConfig::new("title").label("Title").template(template),
    );
    let slots = *view.slots().unwrap();

    assert_eq!(doc.tag(slots.root).as_deref(), Some("div"));
    assert_eq!(doc.text(slots.label).as_deref(), Some("Title"));

    view.before_submit();
    assert!(!doc.is_hidden(slots.message_container));
    assert_eq!(
        doc.text(slots.message_text).as_deref(),
        Some("This field is required.")
    );
}

#[test]
fn test_template_missing_slot() {
    let doc = Document::new();
    let mut view =
        InputView::new(&doc, FieldConfig::new("title").template("<div><input></div>")).unwrap();

    let err = view.render().unwrap_err();

    assert_eq!(
        err,
        ViewError::MissingSlot {
            field: "title".to_string(),
            role: "label",
        }
    );
    assert!(!view.is_rendered());
}

#[test]
fn test_template_that_does_not_parse() {
    let doc = Document::new();
    let mut view =
        InputView::new(&doc, FieldConfig::new("title").template("<div><input>")).unwrap();

    assert!(matches!(view.render(), Err(ViewError::Template { .. })));
}

#[test]
fn test_render_replaces_placeholder_element() {
    let doc = Document::new();
    let form = doc.insert(
        Element::new("form")
            .child(Element::new("h1").text_content("Sign up"))
            .child(Element::new("div").id("title-slot")),
    );
    let placeholder = doc.select(form, "#title-slot").unwrap()[0];

    let view = rendered(&doc, FieldConfig::new("title").el(placeholder));
    let root = view.el().unwrap();

    assert_eq!(doc.children(form)[1], root);
    assert_eq!(doc.parent(root), Some(form));
    assert_eq!(doc.parent(placeholder), None);
}

#[test]
fn test_detached_placeholder_leaves_fragment_unmounted() {
    let doc = Document::new();
    let loose = doc.insert(Element::new("div"));

    let view = rendered(&doc, FieldConfig::new("title").el(loose));

    assert_eq!(doc.parent(view.el().unwrap()), None);
}

// ============================================================================
// Removal
// ============================================================================

#[test]
fn test_remove_detaches_and_stops_listening() {
    let doc = Document::new();
    let form = doc.insert(Element::new("form").child(Element::new("div").id("slot")));
    let placeholder = doc.select(form, "#slot").unwrap()[0];
    let mut view = rendered(&doc, FieldConfig::new("title").el(placeholder));
    let input = view.input().unwrap();

    view.remove();

    assert!(doc.children(form).is_empty());
    assert!(doc.listeners(input).is_empty());
    doc.set_value(input, "typed after removal");
    assert!(!view.dispatch(&Event::Input { target: input }));
    assert!(view.value().is_empty());

    // Again is fine
    view.remove();
}

#[test]
fn test_render_after_remove_keeps_fragment() {
    let doc = Document::new();
    let mut view = rendered(&doc, FieldConfig::new("title"));
    let root = view.el();

    view.remove();
    view.render().unwrap();

    assert_eq!(view.el(), root);
    assert!(!view.dispatch(&Event::Input {
        target: view.input().unwrap()
    }));
}

#[test]
fn test_rerender_after_remove_builds_fresh_fragment() {
    let doc = Document::new();
    let mut view = rendered(&doc, FieldConfig::new("title").value("kept"));
    let old_root = view.el().unwrap();

    view.remove();
    view.rerender().unwrap();

    let root = view.el().unwrap();
    let input = view.input().unwrap();
    assert_ne!(root, old_root);
    assert!(!doc.contains(old_root));
    assert_eq!(doc.parent(root), None);
    assert_eq!(doc.value(input).as_deref(), Some("kept"));

    doc.set_value(input, "typed");
    assert!(view.dispatch(&Event::Input { target: input }));
    assert_eq!(view.value(), Value::from("typed"));
}

#[test]
fn test_rerender_takes_place_of_attached_fragment() {
    let doc = Document::new();
    let form = doc.insert(Element::new("form").child(Element::new("div").id("slot")));
    let placeholder = doc.select(form, "#slot").unwrap()[0];
    let mut view = rendered(&doc, FieldConfig::new("title").el(placeholder));
    let old_input = view.input().unwrap();

    view.before_submit();
    view.rerender().unwrap();

    let root = view.el().unwrap();
    let input = view.input().unwrap();
    assert_eq!(doc.children(form), vec![root]);
    assert!(!doc.contains(old_input));
    assert!(doc.has_class(input, "input-invalid"));
    assert!(!doc.is_hidden(view.slots().unwrap().message_container));
    assert!(doc.is_listening(input, EventKind::Submit));
}

#[test]
fn test_rerender_before_render_acts_as_render() {
    let doc = Document::new();
    let mut view = InputView::new(&doc, FieldConfig::new("title")).unwrap();

    view.rerender().unwrap();
    assert!(view.is_rendered());

    let mut broken =
        InputView::new(&doc, FieldConfig::new("broken").template("<div>")).unwrap();
    assert!(matches!(broken.rerender(), Err(ViewError::Template { .. })));
    assert!(!broken.is_rendered());
}

#[test]
fn test_remove_before_render_is_noop() {
    let doc = Document::new();
    let mut view = InputView::new(&doc, FieldConfig::new("title")).unwrap();

    view.remove();

    assert!(!view.is_rendered());
}

#[test]
fn test_drop_discards_fragment() {
    let doc = Document::new();
    let view = rendered(&doc, FieldConfig::new("title"));
    let root = view.el().unwrap();
    let input = view.input().unwrap();

    drop(view);

    assert!(!doc.contains(root));
    assert!(!doc.contains(input));
}

#[test]
fn test_dispatch_ignores_other_targets() {
    let doc = Document::new();
    let mut first = rendered(&doc, FieldConfig::new("first"));
    let second = rendered(&doc, FieldConfig::new("second"));

    assert!(!first.dispatch(&Event::Input {
        target: second.input().unwrap()
    }));
    assert!(doc.is_listening(first.input().unwrap(), EventKind::Blur));
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_field_options_from_json() {
    let options: FieldOptions = serde_json::from_str(
        r#"{
            "name": "age",
            "type": "number",
            "value": 0,
            "label": "Age",
            "requiredMessage": "Age please.",
            "validityClassSelector": "label, input"
        }"#,
    )
    .unwrap();
    let config = FieldConfig::from(options).test(rules::range(0.0, 130.0, "Out of range."));

    assert_eq!(config.name, "age");
    assert_eq!(config.input_type, "number");
    assert_eq!(config.value, Value::Number(0.0));
    assert!(config.required);
    assert_eq!(config.required_message, "Age please.");
    assert_eq!(config.valid_class, "input-valid");

    let doc = Document::new();
    let view = rendered(&doc, config);
    assert!(view.is_valid());
}

#[test]
fn test_field_options_reject_unknown_keys() {
    let result = serde_json::from_str::<FieldOptions>(r#"{ "name": "a", "colour": "red" }"#);

    assert!(result.is_err());
}

// ============================================================================
// Keystrokes
// ============================================================================

#[test]
fn test_keystrokes_drive_the_field() {
    let doc = Document::new();
    let mut view = rendered(
        &doc,
        FieldConfig::new("email").test(rules::email("Not an email.")),
    );
    let input = view.input().unwrap();
    let mut editor = TextInputState::new();

    for event in editor.type_str(&doc, input, "me@") {
        view.dispatch(&event);
    }
    assert_eq!(view.value(), Value::from("me@"));
    assert!(doc.is_hidden(view.slots().unwrap().message_container));

    let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
    let event = editor.handle_key(&doc, input, tab).unwrap();
    assert_eq!(event, Event::Blur { target: input });
    view.dispatch(&event);
    assert!(!doc.is_hidden(view.slots().unwrap().message_container));

    for event in editor.type_str(&doc, input, "example.com") {
        view.dispatch(&event);
    }
    assert!(view.is_valid());
    assert!(doc.has_class(input, "input-valid"));
}

#[test]
fn test_reset_resyncs_editor() {
    let doc = Document::new();
    let mut view = rendered(&doc, FieldConfig::new("title").value("start"));
    let input = view.input().unwrap();
    let mut editor = TextInputState::new();

    for event in editor.type_str(&doc, input, "ed") {
        view.dispatch(&event);
    }
    assert_eq!(view.value(), Value::from("started"));

    view.reset();
    let event = editor
        .handle_key(&doc, input, KeyEvent::new(KeyCode::Char('!'), KeyModifiers::NONE))
        .unwrap();
    view.dispatch(&event);

    assert_eq!(view.value(), Value::from("start!"));
}
