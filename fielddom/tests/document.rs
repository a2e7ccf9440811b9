use fielddom::{Document, DomError, Element, EventKind, Selector};

fn form_with_slot(doc: &Document) -> (fielddom::NodeId, fielddom::NodeId) {
    let form = doc.insert(Element::new("form").id("signup"));
    let slot = doc.insert(Element::new("div").class("slot"));
    doc.append_child(form, slot).unwrap();
    (form, slot)
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_insert_builds_parent_links() {
    let doc = Document::new();
    let root = doc.insert(
        Element::new("label")
            .child(Element::new("span").role("label"))
            .child(Element::input("hi")),
    );

    let children = doc.children(root);
    assert_eq!(children.len(), 2);
    assert_eq!(doc.parent(children[0]), Some(root));
    assert_eq!(doc.tag(children[1]).as_deref(), Some("input"));
    assert_eq!(doc.value(children[1]).as_deref(), Some("hi"));
    assert_eq!(doc.parent(root), None);
}

#[test]
fn test_append_child_moves_between_parents() {
    let doc = Document::new();
    let (form, slot) = form_with_slot(&doc);
    let other = doc.insert(Element::new("section"));

    doc.append_child(other, slot).unwrap();

    assert!(doc.children(form).is_empty());
    assert_eq!(doc.children(other), vec![slot]);
    assert_eq!(doc.parent(slot), Some(other));
}

#[test]
fn test_append_child_rejects_cycles_and_void_parents() {
    let doc = Document::new();
    let (form, slot) = form_with_slot(&doc);
    let input = doc.insert(Element::input(""));

    assert_eq!(doc.append_child(slot, form), Err(DomError::Cycle(form)));
    assert_eq!(doc.append_child(form, form), Err(DomError::Cycle(form)));
    assert_eq!(
        doc.append_child(input, slot),
        Err(DomError::NotAContainer(input))
    );
}

#[test]
fn test_append_child_to_text_element_keeps_text() {
    let doc = Document::new();
    let label = doc.insert(Element::new("label").text_content("Name: "));
    let input = doc.insert(Element::input("x"));

    doc.append_child(label, input).unwrap();

    assert_eq!(doc.children(label).len(), 2);
    assert_eq!(doc.text(label).as_deref(), Some("Name: "));
}

#[test]
fn test_replace_child_swaps_in_place() {
    let doc = Document::new();
    let (form, slot) = form_with_slot(&doc);
    let after = doc.insert(Element::new("button"));
    doc.append_child(form, after).unwrap();
    let field = doc.insert(Element::new("label"));

    doc.replace_child(slot, field).unwrap();

    assert_eq!(doc.children(form), vec![field, after]);
    assert_eq!(doc.parent(field), Some(form));
    assert_eq!(doc.parent(slot), None);
    assert!(doc.contains(slot));
}

#[test]
fn test_replace_child_requires_attached_node() {
    let doc = Document::new();
    let loose = doc.insert(Element::new("div"));
    let field = doc.insert(Element::new("label"));

    assert_eq!(doc.replace_child(loose, field), Err(DomError::Detached(loose)));
}

#[test]
fn test_detach_is_safe_when_unattached() {
    let doc = Document::new();
    let (form, slot) = form_with_slot(&doc);

    assert!(doc.detach(slot));
    assert!(!doc.detach(slot));
    assert!(!doc.detach(form));
    assert!(doc.children(form).is_empty());
}

#[test]
fn test_discard_drops_subtree() {
    let doc = Document::new();
    let root = doc.insert(Element::new("label").child(Element::input("")));
    let input = doc.children(root)[0];

    doc.discard(root);

    assert!(!doc.contains(root));
    assert!(!doc.contains(input));
    // Mutating a discarded node is ignored
    doc.add_class(input, "x");
    assert!(!doc.has_class(input, "x"));
}

// ============================================================================
// Markup and state
// ============================================================================

#[test]
fn test_classes_add_and_remove_without_duplicates() {
    let doc = Document::new();
    let input = doc.insert(Element::input("").class("field"));

    doc.add_class(input, "input-valid");
    doc.add_class(input, "input-valid");
    doc.add_class(input, "a b");
    assert_eq!(doc.classes(input), vec!["field", "input-valid", "a", "b"]);

    doc.remove_class(input, "input-valid a");
    assert_eq!(doc.classes(input), vec!["field", "b"]);
}

#[test]
fn test_attributes() {
    let doc = Document::new();
    let input = doc.insert(Element::input(""));

    doc.set_attribute(input, "type", "text");
    doc.set_attribute(input, "TYPE", "password");
    assert_eq!(doc.attribute(input, "type").as_deref(), Some("password"));

    doc.remove_attribute(input, "type");
    assert_eq!(doc.attribute(input, "type"), None);
}

#[test]
fn test_set_text_replaces_children() {
    let doc = Document::new();
    let p = doc.insert(
        Element::new("p")
            .child(Element::text("a"))
            .child(Element::new("b").text_content("c")),
    );
    let bold = doc.children(p)[1];

    doc.set_text(p, "Too short");

    assert_eq!(doc.text(p).as_deref(), Some("Too short"));
    assert!(doc.children(p).is_empty());
    assert!(!doc.contains(bold));
}

#[test]
fn test_hidden_and_value() {
    let doc = Document::new();
    let input = doc.insert(Element::input("a"));

    assert!(!doc.is_hidden(input));
    doc.set_hidden(input, true);
    assert!(doc.is_hidden(input));

    doc.set_value(input, "b");
    assert_eq!(doc.value(input).as_deref(), Some("b"));
}

#[test]
fn test_to_markup() {
    let doc = Document::new();
    let root = doc.insert(
        Element::new("label")
            .class("field")
            .child(Element::new("span").role("label").text_content("Name & co"))
            .child(Element::input("x").attr("type", "text"))
            .child(Element::new("div").role("message-container").hidden(true)),
    );

    assert_eq!(
        doc.to_markup(root),
        "<label class=\"field\"><span role=\"label\">Name &amp; co</span>\
         <input type=\"text\" value=\"x\">\
         <div role=\"message-container\" hidden></div></label>"
    );
}

// ============================================================================
// Observers
// ============================================================================

#[test]
fn test_listen_and_unlisten() {
    let doc = Document::new();
    let input = doc.insert(Element::input(""));

    doc.listen(input, EventKind::Input);
    doc.listen(input, EventKind::Input);
    doc.listen(input, EventKind::Blur);
    assert_eq!(doc.listeners(input), vec![EventKind::Input, EventKind::Blur]);

    doc.unlisten(input, EventKind::Input);
    assert!(!doc.is_listening(input, EventKind::Input));
    assert!(doc.is_listening(input, EventKind::Blur));

    doc.unlisten_all(input);
    assert!(doc.listeners(input).is_empty());
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_query_includes_scope_and_uses_document_order() {
    let doc = Document::new();
    let root = doc.insert(
        Element::new("label")
            .child(Element::new("span").role("label"))
            .child(Element::input(""))
            .child(Element::new("div").child(Element::input(""))),
    );

    let all = doc.select(root, "label, input").unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0], root);

    let selector = Selector::parse("input").unwrap();
    let first = doc.query(root, &selector).unwrap();
    assert_eq!(first, doc.children(root)[1]);
}

#[test]
fn test_query_combinators() {
    let doc = Document::new();
    let root = doc.insert(
        Element::new("label")
            .child(Element::new("span").role("label"))
            .child(Element::new("div").child(Element::new("span").role("label"))),
    );

    assert_eq!(doc.select(root, "label > [role=label]").unwrap().len(), 1);
    assert_eq!(doc.select(root, "label [role=label]").unwrap().len(), 2);
    assert_eq!(doc.select(root, "div > span").unwrap().len(), 1);
    assert!(doc.select(root, "div > label").unwrap().is_empty());
}

#[test]
fn test_query_by_id_class_and_attribute_presence() {
    let doc = Document::new();
    let root = doc.insert(
        Element::new("form")
            .child(Element::input("").id("email").class("wide"))
            .child(Element::input("").attr("required", "")),
    );

    assert_eq!(doc.select(root, "#email").unwrap().len(), 1);
    assert_eq!(doc.select(root, "input.wide").unwrap().len(), 1);
    assert_eq!(doc.select(root, "[required]").unwrap().len(), 1);
    assert_eq!(doc.select(root, "*").unwrap().len(), 3);
}

#[test]
fn test_query_skips_text_nodes() {
    let doc = Document::new();
    let root = doc.insert(
        Element::new("label")
            .child(Element::text("Name"))
            .child(Element::input("")),
    );

    assert_eq!(doc.select(root, "*").unwrap().len(), 2);
}
